//! Native values to bytes.

use super::dynamic::{ByteCoder, DynamicLengthCoder};
use super::number::{encode_uint, UintWidth};
use super::{AbiValue, CodecError, Coder};

impl Coder {
    /// Encode `value` into a fresh buffer.
    pub fn encode(&self, value: &AbiValue) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(self.fixed_length().unwrap_or_default());
        self.encode_into(value, &mut out)?;
        Ok(out)
    }

    /// Append the encoding of `value` to `out`.
    ///
    /// On error `out` may hold a partial encoding.
    pub fn encode_into(&self, value: &AbiValue, out: &mut Vec<u8>) -> Result<(), CodecError> {
        match (self, value) {
            (Coder::Empty, AbiValue::Unit) => {}
            (Coder::Bool, AbiValue::Bool(v)) => out.push(u8::from(*v)),
            (Coder::Uint(width), v) => {
                let n = v
                    .as_uint()
                    .ok_or_else(|| CodecError::mismatch(width.name(), v.kind()))?;
                out.extend_from_slice(&encode_uint(n, *width)?);
            }
            (Coder::B256, AbiValue::B256(v)) => out.extend_from_slice(v),
            (Coder::B512, AbiValue::B512(v)) => out.extend_from_slice(v),
            (Coder::Str(len), AbiValue::Str(s)) => {
                if s.len() != *len {
                    return Err(CodecError::LengthMismatch {
                        expected: *len,
                        got: s.len(),
                    });
                }
                out.extend_from_slice(s.as_bytes());
            }
            (Coder::Array { element, length }, AbiValue::Array(items)) => {
                if items.len() != *length {
                    return Err(CodecError::LengthMismatch {
                        expected: *length,
                        got: items.len(),
                    });
                }
                for item in items {
                    element.encode_into(item, out)?;
                }
            }
            (Coder::Tuple(coders), AbiValue::Tuple(items)) => {
                if items.len() != coders.len() {
                    return Err(CodecError::LengthMismatch {
                        expected: coders.len(),
                        got: items.len(),
                    });
                }
                for (coder, item) in coders.iter().zip(items) {
                    coder.encode_into(item, out)?;
                }
            }
            (Coder::Struct { name, fields }, AbiValue::Struct(values)) => {
                for (field, coder) in fields {
                    let v = values
                        .iter()
                        .find(|(n, _)| n == field)
                        .map(|(_, v)| v)
                        .ok_or_else(|| {
                            CodecError::InvalidValue(format!("{name} is missing field `{field}`"))
                        })?;
                    coder.encode_into(v, out)?;
                }
            }
            (Coder::Enum { variants, .. }, AbiValue::Enum { variant, value }) => {
                let (index, coder) = variants
                    .iter()
                    .enumerate()
                    .find(|(_, (n, _))| n == variant)
                    .map(|(i, (_, c))| (i, c))
                    .ok_or_else(|| CodecError::UnknownVariant(variant.clone()))?;
                out.extend_from_slice(&(index as u64).to_be_bytes());
                coder.encode_into(value, out)?;
            }
            (Coder::Vector(element), AbiValue::Vector(items)) => {
                out.extend_from_slice(&DynamicLengthCoder::encode(items.len()));
                for item in items {
                    element.encode_into(item, out)?;
                }
            }
            (Coder::Vector(element), AbiValue::Bytes(bytes))
                if **element == Coder::Uint(UintWidth::U8) =>
            {
                out.extend_from_slice(&ByteCoder::encode(bytes));
            }
            (Coder::Bytes, AbiValue::Bytes(bytes)) => out.extend_from_slice(&ByteCoder::encode(bytes)),
            (Coder::StdString, AbiValue::StdString(s)) => {
                out.extend_from_slice(&ByteCoder::encode(s.as_bytes()));
            }
            (coder, value) => return Err(CodecError::mismatch(coder.to_string(), value.kind())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethnum::U256;

    fn point() -> Coder {
        Coder::Struct {
            name: "struct Point".into(),
            fields: vec![
                ("a".into(), Coder::Uint(UintWidth::U8)),
                ("b".into(), Coder::Uint(UintWidth::U8)),
            ],
        }
    }

    #[test]
    fn test_u16_encoding() {
        let coder = Coder::Uint(UintWidth::U16);
        assert_eq!(coder.encode(&AbiValue::U16(0)).unwrap(), vec![0, 0]);
        assert_eq!(coder.encode(&AbiValue::U16(255)).unwrap(), vec![0, 255]);
        assert_eq!(coder.encode(&AbiValue::U8(255)).unwrap(), vec![0, 255]);
        assert!(matches!(
            coder.encode(&AbiValue::U32(70_000)),
            Err(CodecError::ValueOutOfRange { ty: "u16", .. })
        ));
    }

    #[test]
    fn test_unit_encodes_to_nothing() {
        assert!(Coder::Empty.encode(&AbiValue::Unit).unwrap().is_empty());
    }

    #[test]
    fn test_struct_fields_in_declaration_order() {
        let value = AbiValue::structure([("b", AbiValue::U8(2)), ("a", AbiValue::U8(1))]);
        assert_eq!(point().encode(&value).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_struct_missing_field() {
        let value = AbiValue::structure([("a", AbiValue::U8(1))]);
        assert!(matches!(
            point().encode(&value),
            Err(CodecError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_enum_discriminant_is_one_word() {
        let coder = Coder::Enum {
            name: "enum std::option::Option".into(),
            variants: vec![
                ("None".into(), Coder::Empty),
                ("Some".into(), Coder::Uint(UintWidth::U32)),
            ],
        };
        assert_eq!(coder.encode(&AbiValue::none()).unwrap(), vec![0; 8]);
        assert_eq!(
            coder.encode(&AbiValue::some(AbiValue::U32(7))).unwrap(),
            vec![0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 7]
        );
        assert_eq!(
            coder.encode(&AbiValue::variant("Maybe", AbiValue::Unit)),
            Err(CodecError::UnknownVariant("Maybe".into()))
        );
    }

    #[test]
    fn test_vector_prefix_counts_elements() {
        let coder = Coder::Vector(Box::new(point()));
        let p = |a, b| AbiValue::structure([("a", AbiValue::U8(a)), ("b", AbiValue::U8(b))]);
        let bytes = coder.encode(&AbiValue::Vector(vec![p(1, 2), p(3, 4)])).unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 0, 0, 0, 0, 2, 1, 2, 3, 4]);
    }

    #[test]
    fn test_byte_vector_from_bytes_value() {
        let coder = Coder::Vector(Box::new(Coder::Uint(UintWidth::U8)));
        let from_bytes = coder.encode(&AbiValue::Bytes(vec![9, 8])).unwrap();
        let from_items = coder
            .encode(&AbiValue::Vector(vec![AbiValue::U8(9), AbiValue::U8(8)]))
            .unwrap();
        assert_eq!(from_bytes, from_items);
    }

    #[test]
    fn test_fixed_string_length_checked() {
        let coder = Coder::Str(5);
        assert_eq!(coder.encode(&AbiValue::Str("hello".into())).unwrap(), b"hello");
        assert_eq!(
            coder.encode(&AbiValue::Str("hi".into())),
            Err(CodecError::LengthMismatch { expected: 5, got: 2 })
        );
    }

    #[test]
    fn test_std_string_is_length_prefixed() {
        let bytes = Coder::StdString
            .encode(&AbiValue::StdString("abc".into()))
            .unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 0, 0, 0, 0, 3, b'a', b'b', b'c']);
    }

    #[test]
    fn test_u256_full_width() {
        let bytes = Coder::Uint(UintWidth::U256)
            .encode(&AbiValue::U256(U256::ONE))
            .unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(bytes.last(), Some(&1));
    }

    #[test]
    fn test_type_mismatch() {
        assert_eq!(
            Coder::Bool.encode(&AbiValue::U8(1)),
            Err(CodecError::mismatch("bool", "u8"))
        );
    }
}
