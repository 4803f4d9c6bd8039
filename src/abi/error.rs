//! Error types for ABI encoding and decoding.

use thiserror::Error;

/// Errors that can occur while composing coders, encoding or decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("Invalid UTF-8 in string")]
    InvalidUtf8,

    #[error("Invalid discriminant {discriminant} for enum with {num_variants} variants")]
    InvalidDiscriminant {
        discriminant: u64,
        num_variants: usize,
    },

    #[error("Invalid bool value: {0}")]
    InvalidBool(u8),

    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Cannot build coder for type: {0}")]
    UnsupportedType(String),

    #[error("Invalid {ty} value: {value}")]
    ValueOutOfRange { ty: &'static str, value: String },

    #[error("Length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("Unknown enum variant: {0}")]
    UnknownVariant(String),

    #[error("Dynamic length {length} exceeds limit {limit}")]
    LengthLimitExceeded { length: u64, limit: u64 },

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl CodecError {
    pub(crate) fn mismatch(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            got: got.into(),
        }
    }
}
