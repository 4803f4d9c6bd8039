//! ABI specification data model.
//!
//! Mirrors the JSON ABI emitted by the Sway compiler. Metadata types are
//! possibly-generic definitions keyed by an integer id; concrete types are
//! fully instantiated types keyed by a string id and used directly by
//! function signatures, logs and configurables.

use serde::{Deserialize, Serialize};

/// Root of an ABI specification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiSpecification {
    #[serde(default)]
    pub program_type: Option<String>,
    #[serde(default)]
    pub spec_version: Option<String>,
    #[serde(default)]
    pub encoding_version: Option<String>,
    #[serde(default)]
    pub concrete_types: Vec<AbiConcreteType>,
    #[serde(default)]
    pub metadata_types: Vec<AbiMetadataType>,
    #[serde(default)]
    pub functions: Vec<AbiFunction>,
    #[serde(default)]
    pub logged_types: Vec<AbiLoggedType>,
    #[serde(default)]
    pub configurables: Vec<AbiConfigurable>,
}

impl AbiSpecification {
    /// Parse a specification from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A fully instantiated type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiConcreteType {
    #[serde(rename = "type")]
    pub type_name: String,
    pub concrete_type_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_type_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_arguments: Option<Vec<String>>,
}

/// A possibly generic type definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiMetadataType {
    #[serde(rename = "type")]
    pub type_name: String,
    pub metadata_type_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<AbiComponent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_parameters: Option<Vec<u32>>,
}

/// Reference from a component or type argument to another type.
///
/// Integers refer to metadata types, strings to concrete types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeRef {
    Metadata(u32),
    Concrete(String),
}

/// A named field, tuple element, array element or enum variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiComponent {
    pub name: String,
    pub type_id: TypeRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_arguments: Option<Vec<AbiTypeArgument>>,
}

/// A type argument applied to a generic metadata type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiTypeArgument {
    pub type_id: TypeRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_arguments: Option<Vec<AbiTypeArgument>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiFunction {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<AbiFunctionInput>,
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<AbiAttribute>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiFunctionInput {
    pub name: String,
    pub concrete_type_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiAttribute {
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiLoggedType {
    pub log_id: String,
    pub concrete_type_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiConfigurable {
    pub name: String,
    pub concrete_type_id: String,
    pub offset: u64,
}
