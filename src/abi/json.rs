//! Conversion between [`AbiValue`] and `serde_json::Value`.
//!
//! Integers are accepted as JSON numbers or as decimal or `0x` hex strings;
//! `u256` is always written back as a decimal string. Fixed byte arrays and
//! `Bytes` use `0x` hex. Enum values are `{"Variant": payload}`, or just
//! `"Variant"` when the payload is `()`.

use ethnum::U256;
use serde_json::{Map, Number, Value};

use super::number::{encode_uint, UintWidth};
use super::{AbiValue, CodecError, Coder};

impl Coder {
    /// Build a value for this coder from its JSON form.
    pub fn value_from_json(&self, json: &Value) -> Result<AbiValue, CodecError> {
        match (self, json) {
            (Coder::Empty, Value::Null) => Ok(AbiValue::Unit),
            (Coder::Bool, Value::Bool(b)) => Ok(AbiValue::Bool(*b)),
            (Coder::Uint(width), json) => uint_from_json(json, *width),
            (Coder::B256, Value::String(s)) => Ok(AbiValue::B256(fixed_hex(s)?)),
            (Coder::B512, Value::String(s)) => Ok(AbiValue::B512(fixed_hex(s)?)),
            (Coder::Str(_), Value::String(s)) => Ok(AbiValue::Str(s.clone())),
            (Coder::StdString, Value::String(s)) => Ok(AbiValue::StdString(s.clone())),
            (Coder::Bytes, Value::String(s)) => Ok(AbiValue::Bytes(parse_hex(s)?)),
            (Coder::Bytes, Value::Array(items)) => items
                .iter()
                .map(|item| match uint_from_json(item, UintWidth::U8)? {
                    AbiValue::U8(b) => Ok(b),
                    other => Err(CodecError::mismatch("u8", other.kind())),
                })
                .collect::<Result<_, _>>()
                .map(AbiValue::Bytes),
            (Coder::Array { element, .. }, Value::Array(items)) => {
                elements_from_json(element, items).map(AbiValue::Array)
            }
            (Coder::Vector(element), Value::Array(items)) => {
                elements_from_json(element, items).map(AbiValue::Vector)
            }
            (Coder::Tuple(coders), Value::Array(items)) => {
                if coders.len() != items.len() {
                    return Err(CodecError::LengthMismatch {
                        expected: coders.len(),
                        got: items.len(),
                    });
                }
                coders
                    .iter()
                    .zip(items)
                    .map(|(c, v)| c.value_from_json(v))
                    .collect::<Result<_, _>>()
                    .map(AbiValue::Tuple)
            }
            (Coder::Struct { name, fields }, Value::Object(map)) => fields
                .iter()
                .map(|(field, coder)| {
                    let v = map.get(field).ok_or_else(|| {
                        CodecError::InvalidValue(format!("{name} is missing field `{field}`"))
                    })?;
                    Ok((field.clone(), coder.value_from_json(v)?))
                })
                .collect::<Result<_, _>>()
                .map(AbiValue::Struct),
            (Coder::Enum { variants, .. }, Value::String(variant)) => {
                let coder = find_variant(variants, variant)?;
                if *coder != Coder::Empty {
                    return Err(CodecError::InvalidValue(format!(
                        "variant `{variant}` needs a {coder} payload"
                    )));
                }
                Ok(AbiValue::variant(variant.clone(), AbiValue::Unit))
            }
            (Coder::Enum { variants, name }, Value::Object(map)) => {
                let mut entries = map.iter();
                match (entries.next(), entries.next()) {
                    (Some((variant, payload)), None) => {
                        let coder = find_variant(variants, variant)?;
                        Ok(AbiValue::variant(
                            variant.clone(),
                            coder.value_from_json(payload)?,
                        ))
                    }
                    _ => Err(CodecError::InvalidValue(format!(
                        "{name} expects an object with exactly one variant"
                    ))),
                }
            }
            (coder, json) => Err(CodecError::mismatch(coder.to_string(), json_kind(json))),
        }
    }
}

impl AbiValue {
    /// JSON form of this value, readable back by [`Coder::value_from_json`].
    pub fn to_json(&self) -> Value {
        match self {
            AbiValue::Unit => Value::Null,
            AbiValue::Bool(b) => Value::Bool(*b),
            AbiValue::U8(v) => Value::from(*v),
            AbiValue::U16(v) => Value::from(*v),
            AbiValue::U32(v) => Value::from(*v),
            AbiValue::U64(v) => Value::Number(Number::from(*v)),
            AbiValue::U256(v) => Value::String(v.to_string()),
            AbiValue::B256(b) => Value::String(format!("0x{}", hex::encode(b))),
            AbiValue::B512(b) => Value::String(format!("0x{}", hex::encode(b))),
            AbiValue::Bytes(b) => Value::String(format!("0x{}", hex::encode(b))),
            AbiValue::Str(s) | AbiValue::StdString(s) => Value::String(s.clone()),
            AbiValue::Array(items) | AbiValue::Tuple(items) | AbiValue::Vector(items) => {
                Value::Array(items.iter().map(AbiValue::to_json).collect())
            }
            AbiValue::Struct(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(name, v)| (name.clone(), v.to_json()))
                    .collect::<Map<_, _>>(),
            ),
            AbiValue::Enum { variant, value } => match value.as_ref() {
                AbiValue::Unit => Value::String(variant.clone()),
                payload => {
                    let mut map = Map::new();
                    map.insert(variant.clone(), payload.to_json());
                    Value::Object(map)
                }
            },
        }
    }
}

fn uint_from_json(json: &Value, width: UintWidth) -> Result<AbiValue, CodecError> {
    let out_of_range = |value: String| CodecError::ValueOutOfRange {
        ty: width.name(),
        value,
    };
    let n = match json {
        Value::Number(n) => match n.as_u64() {
            Some(v) => U256::from(v),
            None => return Err(out_of_range(n.to_string())),
        },
        Value::String(s) => {
            let parsed = match s.strip_prefix("0x") {
                Some(digits) => U256::from_str_radix(digits, 16),
                None => U256::from_str_radix(s, 10),
            };
            parsed.map_err(|_| out_of_range(s.clone()))?
        }
        other => return Err(CodecError::mismatch(width.name(), json_kind(other))),
    };
    uint_value(n, width)
}

/// Narrow a range-checked integer to the value variant of its width.
fn uint_value(n: U256, width: UintWidth) -> Result<AbiValue, CodecError> {
    let bytes = encode_uint(n, width)?;
    let value = match width {
        UintWidth::U8 => AbiValue::U8(word(&bytes)?),
        UintWidth::U16 => AbiValue::U16(word(&bytes)?),
        UintWidth::U32 => AbiValue::U32(word(&bytes)?),
        UintWidth::U64 => AbiValue::U64(word(&bytes)?),
        UintWidth::U256 => AbiValue::U256(n),
    };
    Ok(value)
}

fn word<T>(bytes: &[u8]) -> Result<T, CodecError>
where
    T: TryFrom<u64>,
{
    let v = bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b));
    T::try_from(v).map_err(|_| CodecError::InvalidValue(format!("{v} does not fit")))
}

fn elements_from_json(element: &Coder, items: &[Value]) -> Result<Vec<AbiValue>, CodecError> {
    items.iter().map(|item| element.value_from_json(item)).collect()
}

fn find_variant<'c>(variants: &'c [(String, Coder)], name: &str) -> Result<&'c Coder, CodecError> {
    variants
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, c)| c)
        .ok_or_else(|| CodecError::UnknownVariant(name.to_string()))
}

fn parse_hex(s: &str) -> Result<Vec<u8>, CodecError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(digits).map_err(|e| CodecError::InvalidValue(format!("invalid hex `{s}`: {e}")))
}

fn fixed_hex<const N: usize>(s: &str) -> Result<[u8; N], CodecError> {
    let bytes = parse_hex(s)?;
    let got = bytes.len();
    bytes
        .try_into()
        .map_err(|_| CodecError::LengthMismatch { expected: N, got })
}

fn json_kind(json: &Value) -> &'static str {
    match json {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
