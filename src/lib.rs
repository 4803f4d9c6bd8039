//! Type resolution and binary encoding for Sway contract ABIs.
//!
//! This library turns a JSON ABI specification into encoders and decoders
//! for the Fuel VM wire format: big-endian fixed-width integers, one-word
//! length prefixes for dynamic data, and enum discriminant words.
//!
//! # Quick Start
//!
//! ```ignore
//! use sway_abi_coder::prelude::*;
//!
//! let coder = AbiCoder::from_json(&std::fs::read_to_string("contract-abi.json")?)?;
//!
//! let f = coder.function("make_point")?;
//! let bytes = f.encode_arguments(&[AbiValue::U8(1), AbiValue::U8(2)])?;
//! let output = f.decode_output(&returned)?;
//! ```
//!
//! # Modules
//!
//! - [`spec`] - ABI specification data model (serde)
//! - [`matchers`] - Classification of raw Sway type names
//! - [`resolver`] - Generic type resolution into concrete type trees
//! - [`abi`] - Coders composed from resolved types
//! - [`program`] - Coders for every function, log and configurable of an ABI
//! - [`config`] - Coder limits and TOML configuration
//!
//! # Feature Flags
//!
//! - `logging` - Enable library-level tracing (consumers provide their own subscriber)
//! - `cli` - Enable the `abi-coder` command-line binary
//! - `full` - Enable all features

pub mod abi;
pub mod config;
mod logging;
pub mod matchers;
pub mod prelude;
pub mod program;
pub mod resolver;
pub mod spec;

mod error;

// Re-export the unified error type
pub use error::{Error, Result};

pub use abi::{AbiValue, CodecError, Coder};
pub use config::{Config, CoderOptions};
pub use matchers::SwayType;
pub use program::{AbiCoder, ConfigurableCoder, FunctionCoder};
pub use resolver::{ResolveError, ResolvedType, TypeResolver};
pub use spec::AbiSpecification;

// Re-export the 256-bit integer used by `AbiValue::U256`
pub use ethnum::U256;

/// Resolve `concrete_type_id` in `abi` and compose its coder.
///
/// # Example
///
/// ```ignore
/// use sway_abi_coder::{coder_for_type, AbiSpecification, AbiValue};
///
/// let abi = AbiSpecification::from_json(json)?;
/// let coder = coder_for_type(&abi, "wrapper_u32")?;
/// let bytes = coder.encode(&AbiValue::structure([("value", AbiValue::U32(7))]))?;
/// ```
pub fn coder_for_type(abi: &AbiSpecification, concrete_type_id: &str) -> Result<Coder> {
    let ty = TypeResolver::new(abi).resolve(concrete_type_id)?;
    Ok(Coder::from_resolved(&ty)?)
}
