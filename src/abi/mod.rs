//! Binary encoding and decoding of Sway values.
//!
//! A [`Coder`] is composed once from a [`ResolvedType`](crate::resolver::ResolvedType)
//! and then encodes [`AbiValue`]s to bytes and decodes them back.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for coder operations
//! - [`buffer`]: Low-level buffer read helpers
//! - [`number`]: Fixed-width big-endian integers
//! - [`dynamic`]: Length prefixes and byte blobs
//! - [`coder`]: Coder composition and encoded-length queries
//! - [`encode`]: Values to bytes
//! - [`decode`]: Bytes to values
//! - [`json`]: JSON form of values
//!
//! # Example
//!
//! ```ignore
//! use sway_abi_coder::abi::{AbiValue, Coder};
//!
//! let ty = resolver.resolve("wrapper_u32")?;
//! let coder = Coder::from_resolved(&ty)?;
//!
//! let bytes = coder.encode(&AbiValue::structure([("value", AbiValue::U32(7))]))?;
//! assert_eq!(bytes, [0, 0, 0, 7]);
//!
//! let (value, size) = coder.decode_prefix(&bytes)?;
//! ```

mod buffer;
mod coder;
mod decode;
mod dynamic;
mod encode;
mod error;
mod json;
mod number;
mod value;

pub use buffer::WORD_SIZE;
pub use coder::Coder;
pub use dynamic::{ByteCoder, DynamicLengthCoder};
pub use error::CodecError;
pub use number::{decode_uint, encode_uint, UintWidth};
pub use value::AbiValue;
