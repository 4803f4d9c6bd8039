//! Unified error type for the sway-abi-coder library.
//!
//! This module provides a single [`Error`] type covering every failure the
//! library can report, from parsing the ABI JSON to decoding a value.

use thiserror::Error;

use crate::abi::CodecError;
use crate::config::ConfigError;
use crate::resolver::ResolveError;

/// Unified error type for all sway-abi-coder operations.
///
/// # Example
///
/// ```ignore
/// use sway_abi_coder::{AbiCoder, AbiValue, Result};
///
/// fn encode(json: &str) -> Result<Vec<u8>> {
///     let coder = AbiCoder::from_json(json)?;
///     Ok(coder.function("types_u16")?.encode_output(&AbiValue::U16(1))?)
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The ABI text is not valid JSON for the specification model.
    #[error("ABI parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// The ABI references types it does not define, or defines them inconsistently.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Coder composition, encoding or decoding failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Function '{0}' not found in ABI")]
    UnknownFunction(String),

    #[error("Log id '{0}' not found in ABI")]
    UnknownLog(String),

    #[error("Configurable '{0}' not found in ABI")]
    UnknownConfigurable(String),
}

/// A [`Result`] type alias using the unified [`Error`] type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Returns `true` if the ABI itself is malformed.
    pub fn is_malformed_abi(&self) -> bool {
        matches!(self, Self::Resolve(_) | Self::Json(_))
    }

    /// Returns `true` if a type has no coder.
    pub fn is_unsupported_type(&self) -> bool {
        matches!(self, Self::Codec(CodecError::UnsupportedType(_)))
    }

    /// Returns `true` if this is an encode or decode error.
    pub fn is_codec(&self) -> bool {
        matches!(self, Self::Codec(_))
    }

    /// Returns `true` if a function, log or configurable lookup failed.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UnknownFunction(_) | Self::UnknownLog(_) | Self::UnknownConfigurable(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let err = Error::from(ResolveError::UnknownMetadataType(3));
        assert!(err.is_malformed_abi());
        assert!(!err.is_codec());

        let err = Error::from(CodecError::UnsupportedType("u128".into()));
        assert!(err.is_unsupported_type());
        assert!(err.is_codec());
        assert_eq!(err.to_string(), "Cannot build coder for type: u128");

        assert!(Error::UnknownLog("1".into()).is_not_found());
    }
}
