//! Generic type resolution.
//!
//! Turns a reference into the ABI specification's type graph into a
//! [`ResolvedType`] tree with every generic parameter substituted.
//!
//! The graph is walked through id lookups. Resolution first builds
//! [`ResolvableType`] nodes for metadata types, resolving components eagerly
//! whenever everything they depend on is already concrete, and leaving
//! [`TypeNode::Resolvable`] placeholders otherwise. Placeholders are
//! substituted once the enclosing type supplies its bindings.
//!
//! Nothing is cached between calls: the same metadata type bound to
//! different arguments must produce independent trees.

mod error;
mod resolvable;
mod resolved;

pub use error::ResolveError;
pub use resolvable::{ResolvableComponent, ResolvableType, TypeNode};
pub use resolved::{ResolvedComponent, ResolvedType, ResolvedTypeId};

use std::collections::HashMap;

use crate::config::CoderOptions;
use crate::logging::{debug, trace};
use crate::matchers::SwayType;
use crate::spec::{AbiConcreteType, AbiMetadataType, AbiSpecification, AbiTypeArgument, TypeRef};

type Bindings = [(u32, ResolvedType)];

/// A component reference as it appears in a metadata type definition.
struct ComponentRef<'s> {
    name: &'s str,
    type_id: &'s TypeRef,
    type_arguments: Option<&'s [AbiTypeArgument]>,
}

/// Resolves types against one ABI specification.
///
/// The resolver only reads the specification, so several resolvers may
/// share it across threads.
#[derive(Debug, Clone)]
pub struct TypeResolver<'a> {
    metadata: HashMap<u32, &'a AbiMetadataType>,
    concrete: HashMap<&'a str, &'a AbiConcreteType>,
    max_depth: usize,
}

impl<'a> TypeResolver<'a> {
    pub fn new(abi: &'a AbiSpecification) -> Self {
        Self::with_options(abi, &CoderOptions::default())
    }

    pub fn with_options(abi: &'a AbiSpecification, options: &CoderOptions) -> Self {
        Self {
            metadata: abi
                .metadata_types
                .iter()
                .map(|mt| (mt.metadata_type_id, mt))
                .collect(),
            concrete: abi
                .concrete_types
                .iter()
                .map(|ct| (ct.concrete_type_id.as_str(), ct))
                .collect(),
            max_depth: options.max_depth,
        }
    }

    pub fn metadata_type(&self, id: u32) -> Result<&'a AbiMetadataType, ResolveError> {
        self.metadata
            .get(&id)
            .copied()
            .ok_or(ResolveError::UnknownMetadataType(id))
    }

    pub fn concrete_type(&self, id: &str) -> Result<&'a AbiConcreteType, ResolveError> {
        self.concrete
            .get(id)
            .copied()
            .ok_or_else(|| ResolveError::UnknownConcreteType(id.to_string()))
    }

    /// Resolve a concrete type into a fully concrete tree.
    pub fn resolve(&self, concrete_type_id: &str) -> Result<ResolvedType, ResolveError> {
        let concrete = self.concrete_type(concrete_type_id)?;
        let resolved = self.resolve_concrete_type(concrete, 0)?;
        debug!(
            concrete_type_id = concrete_type_id,
            type_name = %resolved.type_name,
            "resolved concrete type"
        );
        Ok(resolved)
    }

    /// Resolve a metadata type with its type parameters bound positionally
    /// to `type_arguments`.
    pub fn resolve_metadata(
        &self,
        metadata_type_id: u32,
        type_arguments: &[ResolvedType],
    ) -> Result<ResolvedType, ResolveError> {
        let metadata = self.metadata_type(metadata_type_id)?;
        let args = type_arguments
            .iter()
            .cloned()
            .map(TypeNode::Resolved)
            .collect();
        let params = self.map_type_parameters_and_args(metadata, Some(args), 0)?;
        let node = self.build_resolvable(metadata_type_id, params, 1)?;
        self.resolve_internal(&node, ResolvedTypeId::Metadata(metadata_type_id), None, 1)
    }

    /// Build the node for a metadata type with its type parameters left
    /// bound to themselves, for structural inspection.
    pub fn resolvable(&self, metadata_type_id: u32) -> Result<ResolvableType, ResolveError> {
        self.build_resolvable(metadata_type_id, None, 0)
    }

    fn check_depth(&self, depth: usize) -> Result<(), ResolveError> {
        if depth > self.max_depth {
            return Err(ResolveError::RecursionLimit {
                depth: self.max_depth,
            });
        }
        Ok(())
    }

    /// Concrete types are resolved outright: everything about them is known.
    fn resolve_concrete_type(
        &self,
        concrete: &AbiConcreteType,
        depth: usize,
    ) -> Result<ResolvedType, ResolveError> {
        self.check_depth(depth)?;
        trace!(concrete_type_id = %concrete.concrete_type_id, "resolving concrete type");

        let type_id = ResolvedTypeId::Concrete(concrete.concrete_type_id.clone());
        let Some(metadata_type_id) = concrete.metadata_type_id else {
            return Ok(ResolvedType::leaf(concrete.type_name.clone(), type_id));
        };

        let params = match &concrete.type_arguments {
            None => None,
            Some(arg_ids) => {
                let metadata = self.metadata_type(metadata_type_id)?;
                let args = arg_ids
                    .iter()
                    .map(|id| {
                        let arg = self.concrete_type(id)?;
                        self.resolve_concrete_type(arg, depth + 1)
                            .map(TypeNode::Resolved)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                self.map_type_parameters_and_args(metadata, Some(args), depth)?
            }
        };

        let node = self.build_resolvable(metadata_type_id, params, depth + 1)?;
        self.resolve_internal(&node, type_id, None, depth + 1)
    }

    /// Build the node for a metadata type, handling each of its components.
    ///
    /// Without explicit `type_params` every declared parameter is bound to a
    /// placeholder for itself.
    fn build_resolvable(
        &self,
        metadata_type_id: u32,
        type_params: Option<Vec<(u32, TypeNode)>>,
        depth: usize,
    ) -> Result<ResolvableType, ResolveError> {
        self.check_depth(depth)?;
        let metadata = self.metadata_type(metadata_type_id)?;

        let type_params = match type_params {
            Some(params) => Some(params),
            None => self.map_type_parameters_and_args(metadata, None, depth)?,
        };

        let components = match &metadata.components {
            None => None,
            Some(components) => {
                // Only the element type of a vector matters downstream.
                let refs = if SwayType::Vector.matches(&metadata.type_name) {
                    vec![self.vector_element(metadata)?]
                } else {
                    components
                        .iter()
                        .map(|c| ComponentRef {
                            name: &c.name,
                            type_id: &c.type_id,
                            type_arguments: c.type_arguments.as_deref(),
                        })
                        .collect()
                };
                let resolved = refs
                    .into_iter()
                    .map(|c| {
                        let ty = self.handle_component(
                            type_params.as_deref(),
                            c.type_id,
                            c.type_arguments,
                            depth + 1,
                        )?;
                        Ok(ResolvableComponent {
                            name: c.name.to_string(),
                            ty,
                        })
                    })
                    .collect::<Result<Vec<_>, ResolveError>>()?;
                Some(resolved)
            }
        };

        Ok(ResolvableType {
            metadata_type_id,
            type_name: metadata.type_name.clone(),
            components,
            type_params,
        })
    }

    /// The first type argument of a vector's `buf` component.
    fn vector_element(&self, metadata: &'a AbiMetadataType) -> Result<ComponentRef<'a>, ResolveError> {
        metadata
            .components
            .iter()
            .flatten()
            .find(|c| c.name == "buf")
            .and_then(|c| c.type_arguments.as_ref()?.first())
            .map(|arg| ComponentRef {
                name: "buf",
                type_id: &arg.type_id,
                type_arguments: arg.type_arguments.as_deref(),
            })
            .ok_or(ResolveError::MissingVectorElementType(
                metadata.metadata_type_id,
            ))
    }

    fn handle_component(
        &self,
        parent_params: Option<&[(u32, TypeNode)]>,
        type_id: &TypeRef,
        type_arguments: Option<&[AbiTypeArgument]>,
        depth: usize,
    ) -> Result<TypeNode, ResolveError> {
        match type_id {
            TypeRef::Concrete(id) => {
                let concrete = self.concrete_type(id)?;
                self.resolve_concrete_type(concrete, depth)
                    .map(TypeNode::Resolved)
            }
            TypeRef::Metadata(id) => {
                let metadata = self.metadata_type(*id)?;
                self.handle_metadata_type(parent_params, metadata, type_arguments, depth)
            }
        }
    }

    /// Metadata types are handled rather than resolved: they may be generic,
    /// in which case they stay symbolic until an enclosing type binds them.
    fn handle_metadata_type(
        &self,
        parent_params: Option<&[(u32, TypeNode)]>,
        metadata: &AbiMetadataType,
        type_arguments: Option<&[AbiTypeArgument]>,
        depth: usize,
    ) -> Result<TypeNode, ResolveError> {
        self.check_depth(depth)?;
        let id = metadata.metadata_type_id;
        trace!(metadata_type_id = id, type_name = %metadata.type_name, "handling metadata type");

        if SwayType::Generic.matches(&metadata.type_name) {
            let bound = parent_params
                .into_iter()
                .flatten()
                .find(|(tp, _)| *tp == id)
                .map(|(_, ty)| ty.clone());
            return match bound {
                Some(ty) => Ok(ty),
                None => self
                    .build_resolvable(id, None, depth + 1)
                    .map(TypeNode::Resolvable),
            };
        }

        // Primitives only used inside other types show up as component-less
        // metadata types.
        if metadata.components.is_none() {
            let node = self.build_resolvable(id, None, depth + 1)?;
            return self
                .resolve_internal(&node, ResolvedTypeId::Metadata(id), None, depth + 1)
                .map(TypeNode::Resolved);
        }

        let args = type_arguments
            .map(|args| {
                args.iter()
                    .map(|arg| {
                        self.handle_component(
                            parent_params,
                            &arg.type_id,
                            arg.type_arguments.as_deref(),
                            depth + 1,
                        )
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;
        let args_resolved = args
            .as_ref()
            .is_some_and(|args| args.iter().all(TypeNode::is_resolved));

        let params = self.map_type_parameters_and_args(metadata, args, depth)?;
        let node = self.build_resolvable(id, params, depth + 1)?;

        if args_resolved || node.components_resolved() {
            return self
                .resolve_internal(&node, ResolvedTypeId::Metadata(id), None, depth + 1)
                .map(TypeNode::Resolved);
        }
        Ok(TypeNode::Resolvable(node))
    }

    /// Pair declared type parameters with arguments.
    ///
    /// Without arguments each parameter is bound to a placeholder for itself.
    fn map_type_parameters_and_args(
        &self,
        metadata: &AbiMetadataType,
        args: Option<Vec<TypeNode>>,
        depth: usize,
    ) -> Result<Option<Vec<(u32, TypeNode)>>, ResolveError> {
        let declared = metadata.type_parameters.as_deref().unwrap_or_default();
        match args {
            None => {
                if metadata.type_parameters.is_none() {
                    return Ok(None);
                }
                declared
                    .iter()
                    .map(|&tp| {
                        self.build_resolvable(tp, None, depth + 1)
                            .map(|node| (tp, TypeNode::Resolvable(node)))
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(Some)
            }
            Some(args) => {
                if args.len() != declared.len() {
                    return Err(ResolveError::TypeArgumentMismatch {
                        metadata_type_id: metadata.metadata_type_id,
                        expected: declared.len(),
                        got: args.len(),
                    });
                }
                if metadata.type_parameters.is_none() {
                    return Ok(None);
                }
                Ok(Some(declared.iter().copied().zip(args).collect()))
            }
        }
    }

    /// Turn a node into a resolved tree, substituting bound type parameters.
    fn resolve_internal(
        &self,
        node: &ResolvableType,
        type_id: ResolvedTypeId,
        bindings: Option<&Bindings>,
        depth: usize,
    ) -> Result<ResolvedType, ResolveError> {
        self.check_depth(depth)?;
        let type_args = self.resolve_type_args(node, bindings, depth)?;
        let type_params = match &node.type_params {
            Some(params) => Some(
                params
                    .iter()
                    .filter_map(|(tp, _)| {
                        lookup(type_args.as_deref(), *tp).map(|ty| (*tp, ty.clone()))
                    })
                    .collect(),
            ),
            None => type_args.clone(),
        };

        let components = node
            .components
            .as_ref()
            .map(|components| {
                components
                    .iter()
                    .map(|c| {
                        let ty = match &c.ty {
                            TypeNode::Resolved(ty) => ty.clone(),
                            TypeNode::Resolvable(inner) => {
                                match lookup(type_args.as_deref(), inner.metadata_type_id) {
                                    Some(bound) => bound.clone(),
                                    None => self.resolve_internal(
                                        inner,
                                        ResolvedTypeId::Metadata(inner.metadata_type_id),
                                        type_args.as_deref(),
                                        depth + 1,
                                    )?,
                                }
                            }
                        };
                        Ok(ResolvedComponent {
                            name: c.name.clone(),
                            ty,
                        })
                    })
                    .collect::<Result<Vec<_>, ResolveError>>()
            })
            .transpose()?;

        Ok(ResolvedType {
            type_name: node.type_name.clone(),
            type_id,
            components,
            type_params,
            metadata_type_id: Some(node.metadata_type_id),
        })
    }

    /// Resolve the node's own type parameter bindings against the bindings
    /// available from enclosing types.
    ///
    /// Placeholders inside a deferred node refer to the parameters of the
    /// outermost unbound type, so a binding found through a placeholder is
    /// also recorded under the placeholder's id for nested lookups.
    fn resolve_type_args(
        &self,
        node: &ResolvableType,
        bindings: Option<&Bindings>,
        depth: usize,
    ) -> Result<Option<Vec<(u32, ResolvedType)>>, ResolveError> {
        let Some(params) = &node.type_params else {
            return Ok(bindings.map(<[_]>::to_vec));
        };
        let mut declared = Vec::with_capacity(params.len());
        let mut aliases = Vec::new();
        for (tp, value) in params {
            match value {
                TypeNode::Resolved(ty) => declared.push((*tp, ty.clone())),
                TypeNode::Resolvable(inner) => {
                    let ty = match lookup(bindings, inner.metadata_type_id) {
                        Some(bound) => bound.clone(),
                        None => self.resolve_internal(
                            inner,
                            ResolvedTypeId::Metadata(inner.metadata_type_id),
                            bindings,
                            depth + 1,
                        )?,
                    };
                    if inner.metadata_type_id != *tp {
                        aliases.push((inner.metadata_type_id, ty.clone()));
                    }
                    declared.push((*tp, ty));
                }
            }
        }
        declared.extend(aliases);
        Ok(Some(declared))
    }
}

fn lookup(bindings: Option<&Bindings>, type_parameter: u32) -> Option<&ResolvedType> {
    bindings
        .into_iter()
        .flatten()
        .find(|(tp, _)| *tp == type_parameter)
        .map(|(_, ty)| ty)
}
