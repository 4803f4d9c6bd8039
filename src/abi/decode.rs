//! Bytes to native values.

use crate::config::CoderOptions;

use super::buffer::{read_array, read_byte, read_slice, read_word, tail, WORD_SIZE};
use super::coder::select_variant;
use super::number::{decode_uint, UintWidth};
use super::{AbiValue, CodecError, Coder};

impl Coder {
    /// Decode one value from the start of `data`, ignoring trailing bytes.
    pub fn decode(&self, data: &[u8]) -> Result<AbiValue, CodecError> {
        self.decode_prefix(data).map(|(value, _)| value)
    }

    /// Decode one value and report how many bytes it occupied.
    pub fn decode_prefix(&self, data: &[u8]) -> Result<(AbiValue, usize), CodecError> {
        self.decode_with(data, &CoderOptions::default())
    }

    /// Like [`Coder::decode_prefix`], with explicit limits on length prefixes.
    pub fn decode_with(
        &self,
        data: &[u8],
        options: &CoderOptions,
    ) -> Result<(AbiValue, usize), CodecError> {
        self.decode_at(data, 0, options)
    }

    fn decode_at(
        &self,
        data: &[u8],
        offset: usize,
        options: &CoderOptions,
    ) -> Result<(AbiValue, usize), CodecError> {
        match self {
            Coder::Empty => Ok((AbiValue::Unit, 0)),
            Coder::Bool => match read_byte(data, offset)? {
                0 => Ok((AbiValue::Bool(false), 1)),
                1 => Ok((AbiValue::Bool(true), 1)),
                other => Err(CodecError::InvalidBool(other)),
            },
            Coder::Uint(width) => {
                let value = match width {
                    UintWidth::U8 => AbiValue::U8(read_byte(data, offset)?),
                    UintWidth::U16 => AbiValue::U16(u16::from_be_bytes(read_array(data, offset)?)),
                    UintWidth::U32 => AbiValue::U32(u32::from_be_bytes(read_array(data, offset)?)),
                    UintWidth::U64 => AbiValue::U64(read_word(data, offset)?),
                    UintWidth::U256 => AbiValue::U256(decode_uint(tail(data, offset)?, *width)?),
                };
                Ok((value, width.encoded_length()))
            }
            Coder::B256 => Ok((AbiValue::B256(read_array(data, offset)?), 32)),
            Coder::B512 => Ok((AbiValue::B512(read_array(data, offset)?), 64)),
            Coder::Str(len) => {
                let bytes = read_slice(data, offset, *len)?;
                let s = std::str::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)?;
                Ok((AbiValue::Str(s.to_string()), *len))
            }
            Coder::Array { element, length } => {
                let (items, used) = decode_sequence(
                    std::iter::repeat_n(&**element, *length),
                    data,
                    offset,
                    options,
                )?;
                Ok((AbiValue::Array(items), used))
            }
            Coder::Tuple(coders) => {
                let (items, used) = decode_sequence(coders.iter(), data, offset, options)?;
                Ok((AbiValue::Tuple(items), used))
            }
            Coder::Struct { fields, .. } => {
                let (items, used) =
                    decode_sequence(fields.iter().map(|(_, c)| c), data, offset, options)?;
                let values = fields.iter().map(|(n, _)| n.clone()).zip(items).collect();
                Ok((AbiValue::Struct(values), used))
            }
            Coder::Enum { variants, .. } => {
                let discriminant = read_word(data, offset)?;
                let (name, coder) = select_variant(variants, discriminant)?;
                let (value, used) = coder.decode_at(data, offset + WORD_SIZE, options)?;
                Ok((AbiValue::variant(name.clone(), value), WORD_SIZE + used))
            }
            Coder::Vector(element) => {
                let announced = read_word(data, offset)?;
                let count = checked_length(announced, options)?;
                let start = offset + WORD_SIZE;
                match element.fixed_length() {
                    Some(0) => {
                        let limit = options.max_zero_sized_elements;
                        if announced > limit {
                            return Err(CodecError::LengthLimitExceeded {
                                length: announced,
                                limit,
                            });
                        }
                    }
                    // Reject counts the buffer cannot back before allocating.
                    Some(width) => {
                        read_slice(data, start, count.saturating_mul(width))?;
                    }
                    None => {}
                }
                let (items, used) = decode_sequence(
                    std::iter::repeat_n(&**element, count),
                    data,
                    start,
                    options,
                )?;
                Ok((AbiValue::Vector(items), WORD_SIZE + used))
            }
            Coder::Bytes => {
                let bytes = decode_bytes(data, offset, options)?;
                Ok((AbiValue::Bytes(bytes.to_vec()), WORD_SIZE + bytes.len()))
            }
            Coder::StdString => {
                let bytes = decode_bytes(data, offset, options)?;
                let s = std::str::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)?;
                Ok((AbiValue::StdString(s.to_string()), WORD_SIZE + bytes.len()))
            }
        }
    }
}

fn decode_sequence<'c>(
    coders: impl Iterator<Item = &'c Coder>,
    data: &[u8],
    offset: usize,
    options: &CoderOptions,
) -> Result<(Vec<AbiValue>, usize), CodecError> {
    let mut items = Vec::new();
    let mut pos = offset;
    for coder in coders {
        let (value, used) = coder.decode_at(data, pos, options)?;
        items.push(value);
        pos += used;
    }
    Ok((items, pos - offset))
}

fn decode_bytes<'d>(
    data: &'d [u8],
    offset: usize,
    options: &CoderOptions,
) -> Result<&'d [u8], CodecError> {
    let len = checked_length(read_word(data, offset)?, options)?;
    read_slice(data, offset + WORD_SIZE, len)
}

fn checked_length(length: u64, options: &CoderOptions) -> Result<usize, CodecError> {
    if length > options.max_dynamic_length {
        return Err(CodecError::LengthLimitExceeded {
            length,
            limit: options.max_dynamic_length,
        });
    }
    usize::try_from(length).map_err(|_| CodecError::LengthLimitExceeded {
        length,
        limit: options.max_dynamic_length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u16_decoding() {
        let coder = Coder::Uint(UintWidth::U16);
        assert_eq!(coder.decode_prefix(&[0, 255]).unwrap(), (AbiValue::U16(255), 2));
        assert_eq!(coder.decode(&[0, 0, 9, 9]).unwrap(), AbiValue::U16(0));
    }

    #[test]
    fn test_bool_rejects_other_bytes() {
        assert_eq!(Coder::Bool.decode(&[1]).unwrap(), AbiValue::Bool(true));
        assert_eq!(Coder::Bool.decode(&[2]), Err(CodecError::InvalidBool(2)));
    }

    #[test]
    fn test_struct_decoding() {
        let coder = Coder::Struct {
            name: "struct Point".into(),
            fields: vec![
                ("a".into(), Coder::Uint(UintWidth::U8)),
                ("b".into(), Coder::Uint(UintWidth::U8)),
            ],
        };
        let (value, used) = coder.decode_prefix(&[1, 2, 3]).unwrap();
        assert_eq!(used, 2);
        assert_eq!(value.field("a"), Some(&AbiValue::U8(1)));
        assert_eq!(value.field("b"), Some(&AbiValue::U8(2)));
    }

    #[test]
    fn test_enum_bad_discriminant() {
        let coder = Coder::Enum {
            name: "enum Color".into(),
            variants: vec![("Red".into(), Coder::Empty), ("Green".into(), Coder::Empty)],
        };
        assert_eq!(
            coder.decode(&[0, 0, 0, 0, 0, 0, 0, 1]).unwrap(),
            AbiValue::variant("Green", AbiValue::Unit)
        );
        assert_eq!(
            coder.decode(&[0, 0, 0, 0, 0, 0, 0, 5]),
            Err(CodecError::InvalidDiscriminant {
                discriminant: 5,
                num_variants: 2
            })
        );
    }

    #[test]
    fn test_vector_of_u16() {
        let coder = Coder::Vector(Box::new(Coder::Uint(UintWidth::U16)));
        let data = [0, 0, 0, 0, 0, 0, 0, 2, 0, 1, 0, 2];
        assert_eq!(
            coder.decode_prefix(&data).unwrap(),
            (AbiValue::Vector(vec![AbiValue::U16(1), AbiValue::U16(2)]), 12)
        );
    }

    #[test]
    fn test_vector_count_larger_than_buffer() {
        let coder = Coder::Vector(Box::new(Coder::Uint(UintWidth::U64)));
        let data = [0, 0, 0, 0, 0, 1, 0, 0];
        assert!(matches!(
            coder.decode(&data),
            Err(CodecError::BufferTooSmall { .. })
        ));
    }

    #[test]
    fn test_length_limit() {
        let options = CoderOptions {
            max_dynamic_length: 4,
            ..CoderOptions::default()
        };
        let data = [0, 0, 0, 0, 0, 0, 0, 5, 1, 2, 3, 4, 5];
        assert_eq!(
            Coder::Bytes.decode_with(&data, &options),
            Err(CodecError::LengthLimitExceeded { length: 5, limit: 4 })
        );
        assert_eq!(
            Coder::Bytes.decode(&data).unwrap(),
            AbiValue::Bytes(vec![1, 2, 3, 4, 5])
        );
    }

    #[test]
    fn test_zero_sized_elements_are_capped() {
        let coder = Coder::Vector(Box::new(Coder::Empty));
        let data = (10u64 * 1024 * 1024).to_be_bytes();
        assert_eq!(
            coder.decode(&data),
            Err(CodecError::LengthLimitExceeded {
                length: 10 * 1024 * 1024,
                limit: 4096
            })
        );
        assert_eq!(
            coder.decode_prefix(&3u64.to_be_bytes()).unwrap(),
            (AbiValue::Vector(vec![AbiValue::Unit; 3]), 8)
        );
    }

    #[test]
    fn test_std_string_invalid_utf8() {
        let data = [0, 0, 0, 0, 0, 0, 0, 1, 0xff];
        assert_eq!(Coder::StdString.decode(&data), Err(CodecError::InvalidUtf8));
    }

    #[test]
    fn test_truncated_input() {
        assert_eq!(
            Coder::B256.decode(&[0; 31]),
            Err(CodecError::BufferTooSmall {
                needed: 32,
                available: 31
            })
        );
    }

    #[test]
    fn test_encoded_length_matches_decode() {
        let coder = Coder::Tuple(vec![
            Coder::StdString,
            Coder::Vector(Box::new(Coder::Bytes)),
            Coder::Uint(UintWidth::U8),
        ]);
        let value = AbiValue::Tuple(vec![
            AbiValue::StdString("hey".into()),
            AbiValue::Vector(vec![AbiValue::Bytes(vec![1]), AbiValue::Bytes(vec![])]),
            AbiValue::U8(3),
        ]);
        let mut bytes = coder.encode(&value).unwrap();
        let len = bytes.len();
        bytes.extend_from_slice(&[0xaa; 4]);
        assert_eq!(coder.encoded_length(&bytes).unwrap(), len);
        assert_eq!(coder.decode_prefix(&bytes).unwrap(), (value, len));
    }
}
