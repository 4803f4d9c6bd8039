//! End-to-end tests: ABI JSON in, bytes out, and back.

use serde_json::json;
use sway_abi_coder::abi::{ByteCoder, DynamicLengthCoder};
use sway_abi_coder::{AbiCoder, AbiSpecification, AbiValue, CodecError, Coder, TypeResolver};

const FIXTURE: &str = include_str!("fixtures/types.json");

fn abi_coder() -> Result<AbiCoder, anyhow::Error> {
    Ok(AbiCoder::from_json(FIXTURE)?)
}

#[test]
fn test_u16_output_zero() -> Result<(), anyhow::Error> {
    let coder = abi_coder()?;
    let f = coder.function("types_u16")?;
    let bytes = f.encode_output(&AbiValue::U16(0))?;
    assert_eq!(bytes, vec![0, 0]);
    assert_eq!(f.decode_output(&[0, 0])?, AbiValue::U16(0));
    Ok(())
}

#[test]
fn test_u16_output_255() -> Result<(), anyhow::Error> {
    let coder = abi_coder()?;
    let f = coder.function("types_u16")?;
    let bytes = f.encode_output(&AbiValue::U16(255))?;
    assert_eq!(bytes, vec![0, 255]);
    assert_eq!(f.decode_output(&[0, 255])?, AbiValue::U16(255));
    Ok(())
}

#[test]
fn test_void_output() -> Result<(), anyhow::Error> {
    let coder = abi_coder()?;
    let f = coder.function("types_void")?;
    assert!(f.encode_output(&AbiValue::Unit)?.is_empty());
    assert_eq!(f.decode_output(&[])?, AbiValue::Unit);
    assert!(f.encode_arguments(&[])?.is_empty());
    Ok(())
}

#[test]
fn test_struct_of_two_u8() -> Result<(), anyhow::Error> {
    let coder = abi_coder()?;
    let f = coder.function("make_point")?;
    let point = AbiValue::structure([("a", AbiValue::U8(7)), ("b", AbiValue::U8(9))]);
    let bytes = f.encode_output(&point)?;
    assert_eq!(bytes, vec![7, 9]);
    assert_eq!(f.decode_output(&bytes)?, point);
    Ok(())
}

#[test]
fn test_generic_wrapper_u32() -> Result<(), anyhow::Error> {
    let abi = AbiSpecification::from_json(FIXTURE)?;
    let ty = TypeResolver::new(&abi).resolve("wrapper_u32")?;
    let value_ty = ty
        .component("value")
        .ok_or_else(|| anyhow::anyhow!("missing value component"))?;
    assert_eq!(value_ty.type_name, "u32");

    let coder = Coder::from_resolved(&ty)?;
    let bytes = coder.encode(&AbiValue::structure([("value", AbiValue::U32(7))]))?;
    assert_eq!(bytes, vec![0, 0, 0, 7]);
    Ok(())
}

#[test]
fn test_vector_of_structs_uses_element_count() -> Result<(), anyhow::Error> {
    let coder = abi_coder()?;
    let f = coder.function("points")?;
    let p = |a, b| AbiValue::structure([("a", AbiValue::U8(a)), ("b", AbiValue::U8(b))]);
    let bytes = f.encode_arguments(&[AbiValue::Vector(vec![p(1, 2), p(3, 4), p(5, 6)])])?;
    assert_eq!(DynamicLengthCoder::decode(&bytes)?, 3);
    assert_eq!(bytes.len(), 8 + 6);

    let output = f.encode_output(&AbiValue::Bytes(vec![1, 2, 3]))?;
    assert_eq!(output, ByteCoder::encode(&[1, 2, 3]));
    Ok(())
}

#[test]
fn test_mixed_arguments_split_by_encoded_length() -> Result<(), anyhow::Error> {
    let coder = abi_coder()?;
    let f = coder.function("maybe")?;
    let args = [
        AbiValue::some(AbiValue::U32(42)),
        AbiValue::StdString("fuel".into()),
    ];
    let bytes = f.encode_arguments(&args)?;

    let (_, option) = f
        .inputs
        .first()
        .ok_or_else(|| anyhow::anyhow!("missing input"))?;
    let first = option.encoded_length(&bytes)?;
    assert_eq!(first, 8 + 4);
    assert_eq!(bytes.len() - first, 8 + 4);
    assert_eq!(f.decode_arguments(&bytes)?, args.to_vec());
    Ok(())
}

#[test]
fn test_result_output() -> Result<(), anyhow::Error> {
    let coder = abi_coder()?;
    let f = coder.function("maybe")?;
    let err = AbiValue::err(AbiValue::Bool(true));
    let bytes = f.encode_output(&err)?;
    assert_eq!(bytes, vec![0, 0, 0, 0, 0, 0, 0, 1, 1]);
    assert_eq!(f.decode_output(&bytes)?, err);

    let bad = [0, 0, 0, 0, 0, 0, 0, 2, 1];
    assert!(matches!(
        f.decode_output(&bad),
        Err(CodecError::InvalidDiscriminant { discriminant: 2, .. })
    ));
    Ok(())
}

#[test]
fn test_json_arguments() -> Result<(), anyhow::Error> {
    let coder = abi_coder()?;
    let f = coder.function("wrap_u32")?;
    let (_, input) = f
        .inputs
        .first()
        .ok_or_else(|| anyhow::anyhow!("missing input"))?;
    let value = input.value_from_json(&json!({ "value": "0x07" }))?;
    assert_eq!(f.encode_arguments(&[value])?, vec![0, 0, 0, 7]);

    let decoded = f.decode_output(&[0, 0, 1, 0])?;
    assert_eq!(decoded.to_json(), json!({ "value": 256 }));
    Ok(())
}

#[test]
fn test_out_of_range_is_encode_error() -> Result<(), anyhow::Error> {
    let coder = abi_coder()?;
    let f = coder.function("types_u16")?;
    assert!(matches!(
        f.encode_output(&AbiValue::U32(65536)),
        Err(CodecError::ValueOutOfRange { ty: "u16", .. })
    ));
    Ok(())
}

#[test]
fn test_truncated_input_is_decode_error() -> Result<(), anyhow::Error> {
    let coder = abi_coder()?;
    let f = coder.function("maybe")?;
    let bytes = f.encode_arguments(&[AbiValue::none(), AbiValue::StdString("abc".into())])?;
    let truncated = bytes
        .get(..bytes.len() - 1)
        .ok_or_else(|| anyhow::anyhow!("empty encoding"))?;
    assert!(matches!(
        f.decode_arguments(truncated),
        Err(CodecError::BufferTooSmall { .. })
    ));
    Ok(())
}
