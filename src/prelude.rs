//! Convenient re-exports for common usage patterns.
//!
//! This module provides a single import to bring all commonly used types
//! into scope.
//!
//! # Example
//!
//! ```ignore
//! use sway_abi_coder::prelude::*;
//!
//! let coder = AbiCoder::from_json(json)?;
//! let bytes = coder.function("types_u16")?.encode_output(&AbiValue::U16(255))?;
//! ```

// Unified error handling
pub use crate::error::{Error, Result};

// Specification and resolution
pub use crate::resolver::{ResolveError, ResolvedType, TypeResolver};
pub use crate::spec::AbiSpecification;

// Coders and values
pub use crate::abi::{AbiValue, CodecError, Coder};
pub use crate::program::{AbiCoder, FunctionCoder};

// Configuration
pub use crate::config::{Config, CoderOptions};

// Dependency re-exports
pub use crate::{coder_for_type, U256};
