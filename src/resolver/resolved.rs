//! Fully concrete type trees.

use serde::Serialize;

use crate::matchers::SwayType;

/// Identity of a resolved node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ResolvedTypeId {
    /// Resolution started from this concrete type.
    Concrete(String),
    /// Concreteness was reached structurally from this metadata type.
    Metadata(u32),
}

impl std::fmt::Display for ResolvedTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolvedTypeId::Concrete(id) => f.write_str(id),
            ResolvedTypeId::Metadata(id) => write!(f, "{id}"),
        }
    }
}

/// A named component of a resolved type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedComponent {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ResolvedType,
}

/// A terminal node with no unresolved generics.
///
/// Resolved trees are never edited after construction; binding the same
/// metadata type to different arguments always yields separate trees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedType {
    #[serde(rename = "type")]
    pub type_name: String,
    pub type_id: ResolvedTypeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<ResolvedComponent>>,
    /// Type parameter id to bound type, in declaration order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_params: Option<Vec<(u32, ResolvedType)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_type_id: Option<u32>,
}

impl ResolvedType {
    /// A type with no components or parameters, such as a primitive.
    pub fn leaf(type_name: impl Into<String>, type_id: ResolvedTypeId) -> Self {
        Self {
            type_name: type_name.into(),
            type_id,
            components: None,
            type_params: None,
            metadata_type_id: None,
        }
    }

    /// Category of this node's raw type name.
    pub fn category(&self) -> Option<SwayType> {
        SwayType::classify(&self.type_name)
    }

    /// Components in declaration order (empty when there are none).
    pub fn components(&self) -> &[ResolvedComponent] {
        self.components.as_deref().unwrap_or_default()
    }

    pub fn component(&self, name: &str) -> Option<&ResolvedType> {
        self.components()
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.ty)
    }

    /// The type bound to type parameter `id`.
    pub fn type_param(&self, id: u32) -> Option<&ResolvedType> {
        self.type_params
            .iter()
            .flatten()
            .find(|(tp, _)| *tp == id)
            .map(|(_, ty)| ty)
    }

    /// Whether an unbound generic parameter survived anywhere in the tree.
    pub fn has_unbound_generic(&self) -> bool {
        SwayType::Generic.matches(&self.type_name)
            || self.components().iter().any(|c| c.ty.has_unbound_generic())
    }
}
