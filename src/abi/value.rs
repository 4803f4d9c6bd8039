//! Native values encoded and decoded by [`Coder`](super::Coder).

use ethnum::U256;

/// A native value of some Sway type.
///
/// Numeric variants are interchangeable on encode: a `u16` coder accepts any
/// unsigned variant whose value fits in 16 bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    /// The unit value `()`.
    Unit,
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U256(U256),
    B256([u8; 32]),
    B512([u8; 64]),
    /// Fixed-length string `str[N]`.
    Str(String),
    Array(Vec<AbiValue>),
    Tuple(Vec<AbiValue>),
    /// Struct fields as `(name, value)` pairs.
    Struct(Vec<(String, AbiValue)>),
    /// Enum, option or result value.
    Enum {
        variant: String,
        value: Box<AbiValue>,
    },
    Vector(Vec<AbiValue>),
    Bytes(Vec<u8>),
    StdString(String),
}

impl AbiValue {
    /// `Option::Some(value)`.
    pub fn some(value: AbiValue) -> Self {
        Self::variant("Some", value)
    }

    /// `Option::None`.
    pub fn none() -> Self {
        Self::variant("None", AbiValue::Unit)
    }

    /// `Result::Ok(value)`.
    pub fn ok(value: AbiValue) -> Self {
        Self::variant("Ok", value)
    }

    /// `Result::Err(value)`.
    pub fn err(value: AbiValue) -> Self {
        Self::variant("Err", value)
    }

    pub fn variant(name: impl Into<String>, value: AbiValue) -> Self {
        Self::Enum {
            variant: name.into(),
            value: Box::new(value),
        }
    }

    /// Build a struct value from `(name, value)` pairs.
    pub fn structure<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, AbiValue)>,
        S: Into<String>,
    {
        Self::Struct(fields.into_iter().map(|(n, v)| (n.into(), v)).collect())
    }

    /// Look up a struct field by name.
    pub fn field(&self, name: &str) -> Option<&AbiValue> {
        match self {
            AbiValue::Struct(fields) => fields.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Numeric value widened to 256 bits, if this is an unsigned integer.
    pub fn as_uint(&self) -> Option<U256> {
        match self {
            AbiValue::U8(v) => Some(U256::from(*v)),
            AbiValue::U16(v) => Some(U256::from(*v)),
            AbiValue::U32(v) => Some(U256::from(*v)),
            AbiValue::U64(v) => Some(U256::from(*v)),
            AbiValue::U256(v) => Some(*v),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            AbiValue::Unit => "unit",
            AbiValue::Bool(_) => "bool",
            AbiValue::U8(_) => "u8",
            AbiValue::U16(_) => "u16",
            AbiValue::U32(_) => "u32",
            AbiValue::U64(_) => "u64",
            AbiValue::U256(_) => "u256",
            AbiValue::B256(_) => "b256",
            AbiValue::B512(_) => "b512",
            AbiValue::Str(_) => "str",
            AbiValue::Array(_) => "array",
            AbiValue::Tuple(_) => "tuple",
            AbiValue::Struct(_) => "struct",
            AbiValue::Enum { .. } => "enum",
            AbiValue::Vector(_) => "vector",
            AbiValue::Bytes(_) => "bytes",
            AbiValue::StdString(_) => "string",
        }
    }
}

impl From<bool> for AbiValue {
    fn from(v: bool) -> Self {
        AbiValue::Bool(v)
    }
}

impl From<u8> for AbiValue {
    fn from(v: u8) -> Self {
        AbiValue::U8(v)
    }
}

impl From<u16> for AbiValue {
    fn from(v: u16) -> Self {
        AbiValue::U16(v)
    }
}

impl From<u32> for AbiValue {
    fn from(v: u32) -> Self {
        AbiValue::U32(v)
    }
}

impl From<u64> for AbiValue {
    fn from(v: u64) -> Self {
        AbiValue::U64(v)
    }
}

impl From<U256> for AbiValue {
    fn from(v: U256) -> Self {
        AbiValue::U256(v)
    }
}

impl From<()> for AbiValue {
    fn from(_: ()) -> Self {
        AbiValue::Unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_uint_widens() {
        assert_eq!(AbiValue::U8(7).as_uint(), Some(U256::from(7u8)));
        assert_eq!(AbiValue::U64(u64::MAX).as_uint(), Some(U256::from(u64::MAX)));
        assert_eq!(AbiValue::Bool(true).as_uint(), None);
    }

    #[test]
    fn test_field_lookup() {
        let value = AbiValue::structure([("a", AbiValue::U8(1)), ("b", AbiValue::U8(2))]);
        assert_eq!(value.field("b"), Some(&AbiValue::U8(2)));
        assert_eq!(value.field("c"), None);
    }
}
