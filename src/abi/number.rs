//! Fixed-width big-endian unsigned integer coders.

use ethnum::U256;

use super::buffer::read_slice;
use super::CodecError;

/// Width of an unsigned integer on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UintWidth {
    U8,
    U16,
    U32,
    U64,
    U256,
}

impl UintWidth {
    /// Number of bytes the integer occupies.
    pub const fn encoded_length(self) -> usize {
        match self {
            UintWidth::U8 => 1,
            UintWidth::U16 => 2,
            UintWidth::U32 => 4,
            UintWidth::U64 => 8,
            UintWidth::U256 => 32,
        }
    }

    /// Largest representable value.
    pub fn max(self) -> U256 {
        match self {
            UintWidth::U8 => U256::from(u8::MAX),
            UintWidth::U16 => U256::from(u16::MAX),
            UintWidth::U32 => U256::from(u32::MAX),
            UintWidth::U64 => U256::from(u64::MAX),
            UintWidth::U256 => U256::MAX,
        }
    }

    /// Sway name of the type.
    pub const fn name(self) -> &'static str {
        match self {
            UintWidth::U8 => "u8",
            UintWidth::U16 => "u16",
            UintWidth::U32 => "u32",
            UintWidth::U64 => "u64",
            UintWidth::U256 => "u256",
        }
    }
}

/// Encode `value` as exactly `width.encoded_length()` big-endian bytes.
pub fn encode_uint(value: U256, width: UintWidth) -> Result<Vec<u8>, CodecError> {
    if value > width.max() {
        return Err(CodecError::ValueOutOfRange {
            ty: width.name(),
            value: value.to_string(),
        });
    }
    let bytes = value.to_be_bytes();
    let start = bytes.len() - width.encoded_length();
    Ok(bytes.get(start..).map(<[u8]>::to_vec).unwrap_or_default())
}

/// Decode the first `width.encoded_length()` bytes of `data` as a big-endian integer.
pub fn decode_uint(data: &[u8], width: UintWidth) -> Result<U256, CodecError> {
    let len = width.encoded_length();
    let src = read_slice(data, 0, len)?;
    let mut bytes = [0u8; 32];
    if let Some(dst) = bytes.get_mut(32 - len..) {
        dst.copy_from_slice(src);
    }
    Ok(U256::from_be_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u16_boundaries() {
        assert_eq!(encode_uint(U256::ZERO, UintWidth::U16), Ok(vec![0, 0]));
        assert_eq!(
            encode_uint(U256::from(65535u32), UintWidth::U16),
            Ok(vec![0xff, 0xff])
        );
        assert_eq!(
            encode_uint(U256::from(255u32), UintWidth::U16),
            Ok(vec![0, 255])
        );
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = encode_uint(U256::from(65536u32), UintWidth::U16);
        assert_eq!(
            err,
            Err(CodecError::ValueOutOfRange {
                ty: "u16",
                value: "65536".to_string()
            })
        );
        assert!(encode_uint(U256::from(256u32), UintWidth::U8).is_err());
        assert!(encode_uint(U256::from(u64::MAX) + U256::ONE, UintWidth::U64).is_err());
    }

    #[test]
    fn test_u256_max_is_all_ones() {
        let bytes = encode_uint(U256::MAX, UintWidth::U256).unwrap();
        assert_eq!(bytes, vec![0xff; 32]);
        assert_eq!(decode_uint(&bytes, UintWidth::U256), Ok(U256::MAX));
    }

    #[test]
    fn test_decode_reads_only_leading_bytes() {
        let data = [0, 0, 0, 7, 0xaa, 0xbb];
        assert_eq!(decode_uint(&data, UintWidth::U32), Ok(U256::from(7u32)));
    }

    #[test]
    fn test_decode_short_buffer() {
        assert_eq!(
            decode_uint(&[1], UintWidth::U16),
            Err(CodecError::BufferTooSmall {
                needed: 2,
                available: 1
            })
        );
    }
}
