//! Property-based tests for coder round-trips and wire invariants.
//!
//! These tests verify that decode(encode(x)) == x for random inputs.

use proptest::prelude::*;
use sway_abi_coder::abi::{DynamicLengthCoder, UintWidth};
use sway_abi_coder::{coder_for_type, AbiSpecification, AbiValue, CodecError, Coder, U256};

const FIXTURE: &str = include_str!("fixtures/types.json");

/// Helper to build the coder for a concrete type of the fixture ABI
fn coder(concrete_type_id: &str) -> Result<Coder, anyhow::Error> {
    let abi = AbiSpecification::from_json(FIXTURE)?;
    Ok(coder_for_type(&abi, concrete_type_id)?)
}

fn u256() -> impl Strategy<Value = U256> {
    any::<[u8; 32]>().prop_map(U256::from_be_bytes)
}

fn point() -> impl Strategy<Value = AbiValue> {
    (any::<u8>(), any::<u8>())
        .prop_map(|(a, b)| AbiValue::structure([("a", AbiValue::U8(a)), ("b", AbiValue::U8(b))]))
}

proptest! {
    #[test]
    fn roundtrip_u16(val in any::<u16>()) {
        let coder = coder("u16").unwrap();
        let bytes = coder.encode(&AbiValue::U16(val)).unwrap();
        prop_assert_eq!(&bytes, &val.to_be_bytes().to_vec());
        prop_assert_eq!(coder.decode(&bytes).unwrap(), AbiValue::U16(val));
    }

    #[test]
    fn roundtrip_u64(val in any::<u64>()) {
        let coder = coder("u64").unwrap();
        let bytes = coder.encode(&AbiValue::U64(val)).unwrap();
        prop_assert_eq!(bytes.len(), 8);
        prop_assert_eq!(coder.decode(&bytes).unwrap(), AbiValue::U64(val));
    }

    #[test]
    fn roundtrip_u256(val in u256()) {
        let coder = coder("u256").unwrap();
        let bytes = coder.encode(&AbiValue::U256(val)).unwrap();
        prop_assert_eq!(&bytes, &val.to_be_bytes().to_vec());
        prop_assert_eq!(coder.decode(&bytes).unwrap(), AbiValue::U256(val));
    }

    #[test]
    fn u32_rejects_values_above_max(val in (u64::from(u32::MAX) + 1)..=u64::MAX) {
        let coder = coder("u32").unwrap();
        let result = coder.encode(&AbiValue::U64(val));
        let is_range_error = matches!(result, Err(CodecError::ValueOutOfRange { ty: "u32", .. }));
        prop_assert!(is_range_error);
    }

    #[test]
    fn roundtrip_vector_of_points(items in prop::collection::vec(point(), 0..16)) {
        let coder = coder("vec_point").unwrap();
        let value = AbiValue::Vector(items.clone());
        let bytes = coder.encode(&value).unwrap();
        prop_assert_eq!(DynamicLengthCoder::decode(&bytes).unwrap(), items.len() as u64);
        prop_assert_eq!(coder.encoded_length(&bytes).unwrap(), bytes.len());
        prop_assert_eq!(coder.decode(&bytes).unwrap(), value);
    }

    #[test]
    fn byte_prefix_is_payload_length(data in prop::collection::vec(any::<u8>(), 0..64)) {
        let coder = coder("bytes").unwrap();
        let bytes = coder.encode(&AbiValue::Bytes(data.clone())).unwrap();
        prop_assert_eq!(DynamicLengthCoder::decode(&bytes).unwrap(), data.len() as u64);
        prop_assert_eq!(bytes.len(), 8 + data.len());
        prop_assert_eq!(coder.decode(&bytes).unwrap(), AbiValue::Bytes(data));
    }

    #[test]
    fn roundtrip_std_string(s in ".{0,32}") {
        let coder = coder("std_string").unwrap();
        let value = AbiValue::StdString(s.clone());
        let bytes = coder.encode(&value).unwrap();
        prop_assert_eq!(DynamicLengthCoder::decode(&bytes).unwrap(), s.len() as u64);
        prop_assert_eq!(coder.decode(&bytes).unwrap(), value);
    }

    #[test]
    fn roundtrip_option_u32(val in prop::option::of(any::<u32>())) {
        let coder = coder("option_u32").unwrap();
        let value = match val {
            Some(v) => AbiValue::some(AbiValue::U32(v)),
            None => AbiValue::none(),
        };
        let bytes = coder.encode(&value).unwrap();
        prop_assert_eq!(coder.encoded_length(&bytes).unwrap(), bytes.len());
        prop_assert_eq!(coder.decode(&bytes).unwrap(), value);
    }

    #[test]
    fn roundtrip_json(a in any::<u8>(), b in any::<u8>()) {
        let coder = coder("point").unwrap();
        let value = AbiValue::structure([("a", AbiValue::U8(a)), ("b", AbiValue::U8(b))]);
        let json = value.to_json();
        prop_assert_eq!(coder.value_from_json(&json).unwrap(), value);
    }
}

#[test]
fn test_width_boundaries() -> Result<(), anyhow::Error> {
    let cases = [
        (UintWidth::U8, "u8"),
        (UintWidth::U16, "u16"),
        (UintWidth::U32, "u32"),
        (UintWidth::U64, "u64"),
        (UintWidth::U256, "u256"),
    ];
    for (width, id) in cases {
        let coder = coder(id)?;
        let len = width.encoded_length();
        assert_eq!(coder.encode(&AbiValue::U256(U256::ZERO))?, vec![0; len]);
        assert_eq!(coder.encode(&AbiValue::U256(width.max()))?, vec![0xff; len]);
        if width != UintWidth::U256 {
            assert!(coder.encode(&AbiValue::U256(width.max() + U256::ONE)).is_err());
        }
    }
    Ok(())
}
