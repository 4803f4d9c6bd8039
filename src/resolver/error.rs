//! Error types for type resolution.

use thiserror::Error;

/// The ABI specification is internally inconsistent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Unknown metadata type id: {0}")]
    UnknownMetadataType(u32),

    #[error("Unknown concrete type id: {0}")]
    UnknownConcreteType(String),

    #[error(
        "Metadata type {metadata_type_id} declares {expected} type parameters but {got} type arguments were supplied"
    )]
    TypeArgumentMismatch {
        metadata_type_id: u32,
        expected: usize,
        got: usize,
    },

    #[error("Vector metadata type {0} has no `buf` element type argument")]
    MissingVectorElementType(u32),

    #[error("Type nesting exceeds the maximum depth of {depth}")]
    RecursionLimit { depth: usize },
}
