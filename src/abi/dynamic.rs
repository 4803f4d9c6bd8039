//! Length-prefixed coders for dynamically sized data.
//!
//! Every dynamically sized value starts with one word holding the length of
//! what follows: a byte length for [`ByteCoder`], an element count for vectors.

use super::buffer::{read_slice, read_word, WORD_SIZE};
use super::CodecError;

/// Encodes and decodes the one-word length prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicLengthCoder;

impl DynamicLengthCoder {
    /// The prefix always occupies exactly one word.
    pub const ENCODED_LENGTH: usize = WORD_SIZE;

    pub fn encode(length: usize) -> [u8; WORD_SIZE] {
        (length as u64).to_be_bytes()
    }

    pub fn decode(data: &[u8]) -> Result<u64, CodecError> {
        read_word(data, 0)
    }

    /// Prefix size plus the payload size the prefix announces, which must be
    /// present in `data`.
    pub fn encoded_length(data: &[u8]) -> Result<usize, CodecError> {
        let payload = Self::decode(data)?;
        let needed = usize::try_from(payload)
            .ok()
            .and_then(|p| p.checked_add(WORD_SIZE))
            .unwrap_or(usize::MAX);
        if needed > data.len() {
            return Err(CodecError::BufferTooSmall {
                needed,
                available: data.len(),
            });
        }
        Ok(needed)
    }
}

/// Byte-length prefixed raw bytes, no padding.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteCoder;

impl ByteCoder {
    pub fn encode(value: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(WORD_SIZE + value.len());
        out.extend_from_slice(&DynamicLengthCoder::encode(value.len()));
        out.extend_from_slice(value);
        out
    }

    pub fn decode(data: &[u8]) -> Result<&[u8], CodecError> {
        let len = DynamicLengthCoder::decode(data)?;
        let len = usize::try_from(len).map_err(|_| CodecError::BufferTooSmall {
            needed: usize::MAX,
            available: data.len(),
        })?;
        read_slice(data, WORD_SIZE, len)
    }

    pub fn encoded_length(data: &[u8]) -> Result<usize, CodecError> {
        DynamicLengthCoder::encoded_length(data)
    }
}
