//! Intermediate, possibly generic type nodes.

use crate::matchers::SwayType;

use super::ResolvedType;

/// Either a node that may still contain generics, or a concrete one.
///
/// Every consumer has to branch on which of the two it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNode {
    Resolvable(ResolvableType),
    Resolved(ResolvedType),
}

impl TypeNode {
    pub fn is_resolved(&self) -> bool {
        matches!(self, TypeNode::Resolved(_))
    }

    pub fn as_resolved(&self) -> Option<&ResolvedType> {
        match self {
            TypeNode::Resolved(ty) => Some(ty),
            TypeNode::Resolvable(_) => None,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            TypeNode::Resolvable(ty) => &ty.type_name,
            TypeNode::Resolved(ty) => &ty.type_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvableComponent {
    pub name: String,
    pub ty: TypeNode,
}

/// A metadata type together with what is known about its type parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvableType {
    pub metadata_type_id: u32,
    pub type_name: String,
    pub components: Option<Vec<ResolvableComponent>>,
    /// Type parameter id to its argument, in declaration order.
    pub type_params: Option<Vec<(u32, TypeNode)>>,
}

impl ResolvableType {
    /// The argument currently bound to type parameter `id`.
    pub fn type_param(&self, id: u32) -> Option<&TypeNode> {
        self.type_params
            .iter()
            .flatten()
            .find(|(tp, _)| *tp == id)
            .map(|(_, ty)| ty)
    }

    /// Every component is already resolved.
    pub fn components_resolved(&self) -> bool {
        self.components
            .as_ref()
            .is_some_and(|cs| cs.iter().all(|c| c.ty.is_resolved()))
    }

    /// Whether resolving this node still needs bindings from an enclosing type.
    pub fn is_generic(&self) -> bool {
        if SwayType::Generic.matches(&self.type_name) {
            return true;
        }
        self.components.iter().flatten().any(|c| match &c.ty {
            TypeNode::Resolved(_) => false,
            TypeNode::Resolvable(inner) => {
                let bound = self
                    .type_param(inner.metadata_type_id)
                    .is_some_and(TypeNode::is_resolved);
                !bound && inner.is_generic()
            }
        })
    }
}
