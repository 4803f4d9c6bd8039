//! Classification of raw Sway type names.
//!
//! ABI specifications describe types by their raw Sway name (`u64`,
//! `struct std::vec::Vec`, `[_; 4]`, ...). [`SwayType::classify`] maps such a
//! name to exactly one category, or `None` when the name is not supported.
//!
//! Several patterns overlap. The reserved standard library structs also match
//! `struct ...`, and `Option`/`Result` also match `enum ...`. The generic
//! [`SwayType::Struct`] and [`SwayType::Enum`] predicates exclude them, and
//! [`SwayType::classify`] checks the dedicated categories first.

use once_cell::sync::Lazy;
use regex::Regex;

/// Build a regex from a pattern that is a compile-time constant.
fn pattern(re: &str) -> Regex {
    // The patterns below are literals; failing to compile one is a bug in this file.
    #[allow(clippy::expect_used)]
    Regex::new(re).expect("invalid built-in type pattern")
}

static GENERIC: Lazy<Regex> = Lazy::new(|| pattern(r"^generic ([^\s]+)$"));
static STRING: Lazy<Regex> = Lazy::new(|| pattern(r"^str\[(.+)\]$"));
static TUPLE: Lazy<Regex> = Lazy::new(|| pattern(r"^\([_,\s]+\)$"));
static ARRAY: Lazy<Regex> = Lazy::new(|| pattern(r"^\[_; ([0-9]+)\]$"));
static STRUCT: Lazy<Regex> = Lazy::new(|| pattern(r"^struct (.+::)?(.+)$"));
static RESERVED_STRUCT: Lazy<Regex> = Lazy::new(|| {
    pattern(r"^struct (std::.*)?(AssetId|B512|Vec|RawVec|EvmAddress|Bytes|String|RawBytes)$")
});
static ENUM: Lazy<Regex> = Lazy::new(|| pattern(r"^enum (.+::)?(.+)$"));

const ASSET_ID: &str = "struct std::asset_id::AssetId";
const B512: &str = "struct std::b512::B512";
const BYTES: &str = "struct std::bytes::Bytes";
const EVM_ADDRESS: &str = "struct std::vm::evm::evm_address::EvmAddress";
const STD_STRING: &str = "struct std::string::String";
const VECTOR: &str = "struct std::vec::Vec";
const OPTION: &str = "enum std::option::Option";
const RESULT: &str = "enum std::result::Result";

/// Semantic category of a raw Sway type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwayType {
    Empty,
    Bool,
    U8,
    U16,
    U32,
    U64,
    U256,
    B256,
    Generic,
    String,
    Tuple,
    Array,
    Struct,
    AssetId,
    B512,
    Bytes,
    EvmAddress,
    StdString,
    Vector,
    Option,
    Result,
    Enum,
    RawUntypedPtr,
    RawUntypedSlice,
}

impl SwayType {
    /// Every category in classification priority order.
    ///
    /// Dedicated categories precede the catch-all `Struct` and `Enum`.
    pub const PRIORITY: [SwayType; 24] = [
        SwayType::Empty,
        SwayType::Bool,
        SwayType::U8,
        SwayType::U16,
        SwayType::U32,
        SwayType::U64,
        SwayType::U256,
        SwayType::B256,
        SwayType::RawUntypedPtr,
        SwayType::RawUntypedSlice,
        SwayType::Generic,
        SwayType::String,
        SwayType::Tuple,
        SwayType::Array,
        SwayType::AssetId,
        SwayType::B512,
        SwayType::Bytes,
        SwayType::EvmAddress,
        SwayType::StdString,
        SwayType::Vector,
        SwayType::Struct,
        SwayType::Option,
        SwayType::Result,
        SwayType::Enum,
    ];

    /// Classify a raw type name, or `None` if no category accepts it.
    pub fn classify(ty: &str) -> Option<SwayType> {
        Self::PRIORITY.into_iter().find(|category| category.matches(ty))
    }

    /// Whether `ty` belongs to this category.
    pub fn matches(self, ty: &str) -> bool {
        match self {
            SwayType::Empty => ty == "()",
            SwayType::Bool => ty == "bool",
            SwayType::U8 => ty == "u8",
            SwayType::U16 => ty == "u16",
            SwayType::U32 => ty == "u32",
            SwayType::U64 => ty == "u64",
            SwayType::U256 => ty == "u256",
            SwayType::B256 => ty == "b256",
            SwayType::Generic => GENERIC.is_match(ty),
            SwayType::String => STRING.is_match(ty),
            SwayType::Tuple => TUPLE.is_match(ty),
            SwayType::Array => ARRAY.is_match(ty),
            SwayType::Struct => STRUCT.is_match(ty) && !RESERVED_STRUCT.is_match(ty),
            SwayType::AssetId => ty == ASSET_ID,
            SwayType::B512 => ty == B512,
            SwayType::Bytes => ty == BYTES,
            SwayType::EvmAddress => ty == EVM_ADDRESS,
            SwayType::StdString => ty == STD_STRING,
            SwayType::Vector => ty == VECTOR,
            SwayType::Option => ty == OPTION,
            SwayType::Result => ty == RESULT,
            SwayType::Enum => {
                !SwayType::Option.matches(ty) && !SwayType::Result.matches(ty) && ENUM.is_match(ty)
            }
            SwayType::RawUntypedPtr => ty == "raw untyped ptr",
            SwayType::RawUntypedSlice => ty == "raw untyped slice",
        }
    }

    /// Name of the category.
    pub const fn name(self) -> &'static str {
        match self {
            SwayType::Empty => "empty",
            SwayType::Bool => "bool",
            SwayType::U8 => "u8",
            SwayType::U16 => "u16",
            SwayType::U32 => "u32",
            SwayType::U64 => "u64",
            SwayType::U256 => "u256",
            SwayType::B256 => "b256",
            SwayType::Generic => "generic",
            SwayType::String => "string",
            SwayType::Tuple => "tuple",
            SwayType::Array => "array",
            SwayType::Struct => "struct",
            SwayType::AssetId => "assetId",
            SwayType::B512 => "b512",
            SwayType::Bytes => "bytes",
            SwayType::EvmAddress => "evmAddress",
            SwayType::StdString => "stdString",
            SwayType::Vector => "vector",
            SwayType::Option => "option",
            SwayType::Result => "result",
            SwayType::Enum => "enum",
            SwayType::RawUntypedPtr => "rawUntypedPtr",
            SwayType::RawUntypedSlice => "rawUntypedSlice",
        }
    }
}

impl std::fmt::Display for SwayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Length `N` of a `str[N]` type name.
pub fn string_length(ty: &str) -> Option<usize> {
    STRING
        .captures(ty)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().trim().parse().ok())
}

/// Length `N` of a `[_; N]` type name.
pub fn array_length(ty: &str) -> Option<usize> {
    ARRAY
        .captures(ty)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
