//! Composite coders built from resolved type trees.

use std::fmt;

use crate::logging::debug;
use crate::matchers::{array_length, string_length, SwayType};
use crate::resolver::ResolvedType;

use super::buffer::{read_word, tail, WORD_SIZE};
use super::dynamic::{ByteCoder, DynamicLengthCoder};
use super::number::UintWidth;
use super::CodecError;

/// Encoder/decoder for one concrete type.
///
/// Built once per resolved type by [`Coder::from_resolved`]; every type the
/// coder can meet is known at that point, so unsupported types fail there
/// rather than while processing values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coder {
    /// `()`: zero bytes.
    Empty,
    /// One byte, 0 or 1.
    Bool,
    /// Big-endian unsigned integer.
    Uint(UintWidth),
    B256,
    B512,
    /// `str[N]`: exactly N UTF-8 bytes.
    Str(usize),
    Array {
        element: Box<Coder>,
        length: usize,
    },
    Tuple(Vec<Coder>),
    Struct {
        name: String,
        fields: Vec<(String, Coder)>,
    },
    /// Enum, option or result: one discriminant word, then the payload.
    Enum {
        name: String,
        variants: Vec<(String, Coder)>,
    },
    /// Element count word, then each element.
    Vector(Box<Coder>),
    /// Byte length word, then raw bytes.
    Bytes,
    /// Byte length word, then UTF-8 bytes.
    StdString,
}

impl Coder {
    /// Compose a coder for a fully resolved type tree.
    pub fn from_resolved(ty: &ResolvedType) -> Result<Self, CodecError> {
        let category = ty
            .category()
            .ok_or_else(|| CodecError::UnsupportedType(ty.type_name.clone()))?;

        let coder = match category {
            SwayType::Empty => Coder::Empty,
            SwayType::Bool => Coder::Bool,
            SwayType::U8 => Coder::Uint(UintWidth::U8),
            SwayType::U16 => Coder::Uint(UintWidth::U16),
            SwayType::U32 => Coder::Uint(UintWidth::U32),
            SwayType::U64 | SwayType::RawUntypedPtr => Coder::Uint(UintWidth::U64),
            SwayType::U256 => Coder::Uint(UintWidth::U256),
            SwayType::B256 => Coder::B256,
            SwayType::B512 => Coder::B512,
            SwayType::String => Coder::Str(
                string_length(&ty.type_name)
                    .ok_or_else(|| CodecError::UnsupportedType(ty.type_name.clone()))?,
            ),
            SwayType::Array => Coder::Array {
                element: Box::new(Self::from_resolved(element_type(ty)?)?),
                length: array_length(&ty.type_name)
                    .ok_or_else(|| CodecError::UnsupportedType(ty.type_name.clone()))?,
            },
            SwayType::Tuple => Coder::Tuple(
                ty.components()
                    .iter()
                    .map(|c| Self::from_resolved(&c.ty))
                    .collect::<Result<_, _>>()?,
            ),
            SwayType::Struct | SwayType::AssetId | SwayType::EvmAddress => Coder::Struct {
                name: ty.type_name.clone(),
                fields: named_components(ty)?,
            },
            SwayType::Option | SwayType::Result | SwayType::Enum => Coder::Enum {
                name: ty.type_name.clone(),
                variants: named_components(ty)?,
            },
            SwayType::Vector => Coder::Vector(Box::new(Self::from_resolved(element_type(ty)?)?)),
            SwayType::Bytes | SwayType::RawUntypedSlice => Coder::Bytes,
            SwayType::StdString => Coder::StdString,
            SwayType::Generic => {
                return Err(CodecError::UnsupportedType(format!(
                    "unbound generic parameter `{}`",
                    ty.type_name
                )));
            }
        };

        debug!(type_name = %ty.type_name, category = %category, "built coder");
        Ok(coder)
    }

    /// Byte length of every encoding, if it does not depend on the value.
    pub fn fixed_length(&self) -> Option<usize> {
        match self {
            Coder::Empty => Some(0),
            Coder::Bool => Some(1),
            Coder::Uint(width) => Some(width.encoded_length()),
            Coder::B256 => Some(32),
            Coder::B512 => Some(64),
            Coder::Str(len) => Some(*len),
            Coder::Array { element, length } => element.fixed_length()?.checked_mul(*length),
            Coder::Tuple(items) => sum_fixed(items.iter()),
            Coder::Struct { fields, .. } => sum_fixed(fields.iter().map(|(_, c)| c)),
            Coder::Enum { variants, .. } => {
                let mut lengths = variants.iter().map(|(_, c)| c.fixed_length());
                let first = lengths.next().flatten()?;
                if lengths.all(|len| len == Some(first)) {
                    first.checked_add(WORD_SIZE)
                } else {
                    None
                }
            }
            Coder::Vector(_) | Coder::Bytes | Coder::StdString => None,
        }
    }

    /// Whether the encoding length depends on the value.
    pub fn is_dynamic(&self) -> bool {
        self.fixed_length().is_none()
    }

    /// Number of bytes the encoded value at the start of `data` occupies.
    ///
    /// Walks length prefixes and discriminants without building values, so a
    /// caller can split a buffer of concatenated encodings. Fails with
    /// `BufferTooSmall` whenever [`Coder::decode_prefix`] would run out of
    /// input on the same bytes.
    pub fn encoded_length(&self, data: &[u8]) -> Result<usize, CodecError> {
        if let Some(len) = self.fixed_length() {
            return within(len, data);
        }
        let len = match self {
            Coder::Bytes | Coder::StdString => ByteCoder::encoded_length(data)?,
            Coder::Vector(element) => {
                let count = DynamicLengthCoder::decode(data)?;
                match element.fixed_length() {
                    Some(width) => usize::try_from(count)
                        .ok()
                        .and_then(|count| count.checked_mul(width))
                        .and_then(|payload| payload.checked_add(WORD_SIZE))
                        .ok_or_else(|| overflow(data))?,
                    None => {
                        let mut offset = WORD_SIZE;
                        for _ in 0..count {
                            offset = advance(offset, element, data)?;
                        }
                        offset
                    }
                }
            }
            Coder::Array { element, length } => {
                sum_lengths(std::iter::repeat_n(&**element, *length), data)?
            }
            Coder::Tuple(items) => sum_lengths(items.iter(), data)?,
            Coder::Struct { fields, .. } => sum_lengths(fields.iter().map(|(_, c)| c), data)?,
            Coder::Enum { variants, .. } => {
                let (_, variant) = select_variant(variants, read_word(data, 0)?)?;
                advance(WORD_SIZE, variant, data)?
            }
            fixed => fixed.fixed_length().unwrap_or_default(),
        };
        within(len, data)
    }
}

/// The variant selected by an encoded discriminant.
pub(super) fn select_variant(
    variants: &[(String, Coder)],
    discriminant: u64,
) -> Result<&(String, Coder), CodecError> {
    usize::try_from(discriminant)
        .ok()
        .and_then(|idx| variants.get(idx))
        .ok_or(CodecError::InvalidDiscriminant {
            discriminant,
            num_variants: variants.len(),
        })
}

fn element_type(ty: &ResolvedType) -> Result<&ResolvedType, CodecError> {
    ty.components()
        .first()
        .map(|c| &c.ty)
        .ok_or_else(|| CodecError::UnsupportedType(format!("{} has no element type", ty.type_name)))
}

fn named_components(ty: &ResolvedType) -> Result<Vec<(String, Coder)>, CodecError> {
    ty.components()
        .iter()
        .map(|c| Ok((c.name.clone(), Coder::from_resolved(&c.ty)?)))
        .collect()
}

fn sum_fixed<'c>(mut coders: impl Iterator<Item = &'c Coder>) -> Option<usize> {
    coders.try_fold(0usize, |acc, c| acc.checked_add(c.fixed_length()?))
}

fn sum_lengths<'c>(mut coders: impl Iterator<Item = &'c Coder>, data: &[u8]) -> Result<usize, CodecError> {
    coders.try_fold(0, |offset, coder| advance(offset, coder, data))
}

/// Offset just past the value `coder` finds at `offset`.
fn advance(offset: usize, coder: &Coder, data: &[u8]) -> Result<usize, CodecError> {
    let len = coder.encoded_length(tail(data, offset)?)?;
    offset.checked_add(len).ok_or_else(|| overflow(data))
}

fn within(len: usize, data: &[u8]) -> Result<usize, CodecError> {
    if len > data.len() {
        return Err(CodecError::BufferTooSmall {
            needed: len,
            available: data.len(),
        });
    }
    Ok(len)
}

fn overflow(data: &[u8]) -> CodecError {
    CodecError::BufferTooSmall {
        needed: usize::MAX,
        available: data.len(),
    }
}

impl fmt::Display for Coder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coder::Empty => f.write_str("()"),
            Coder::Bool => f.write_str("bool"),
            Coder::Uint(width) => f.write_str(width.name()),
            Coder::B256 => f.write_str("b256"),
            Coder::B512 => f.write_str("B512"),
            Coder::Str(len) => write!(f, "str[{len}]"),
            Coder::Array { element, length } => write!(f, "[{element}; {length}]"),
            Coder::Tuple(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
            Coder::Struct { name, .. } | Coder::Enum { name, .. } => f.write_str(name),
            Coder::Vector(element) => write!(f, "Vec<{element}>"),
            Coder::Bytes => f.write_str("Bytes"),
            Coder::StdString => f.write_str("String"),
        }
    }
}
