//! Coders for a whole program: functions, logs and configurables.

use std::collections::HashMap;
use std::path::Path;

use crate::abi::{AbiValue, CodecError, Coder};
use crate::config::CoderOptions;
use crate::error::{Error, Result};
use crate::logging::{debug, info};
use crate::resolver::TypeResolver;
use crate::spec::AbiSpecification;

/// Input and output coders of one function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCoder {
    pub name: String,
    /// Named inputs in declaration order.
    pub inputs: Vec<(String, Coder)>,
    pub output: Coder,
    options: CoderOptions,
}

impl FunctionCoder {
    /// Encode all arguments back to back.
    pub fn encode_arguments(&self, values: &[AbiValue]) -> Result<Vec<u8>, CodecError> {
        if values.len() != self.inputs.len() {
            return Err(CodecError::LengthMismatch {
                expected: self.inputs.len(),
                got: values.len(),
            });
        }
        let mut out = Vec::new();
        for ((_, coder), value) in self.inputs.iter().zip(values) {
            coder.encode_into(value, &mut out)?;
        }
        Ok(out)
    }

    /// Decode the concatenated arguments at the start of `data`.
    pub fn decode_arguments(&self, data: &[u8]) -> Result<Vec<AbiValue>, CodecError> {
        let mut values = Vec::with_capacity(self.inputs.len());
        let mut offset = 0;
        for (_, coder) in &self.inputs {
            let rest = data.get(offset..).ok_or(CodecError::BufferTooSmall {
                needed: offset,
                available: data.len(),
            })?;
            let (value, used) = coder.decode_with(rest, &self.options)?;
            values.push(value);
            offset += used;
        }
        Ok(values)
    }

    pub fn encode_output(&self, value: &AbiValue) -> Result<Vec<u8>, CodecError> {
        self.output.encode(value)
    }

    pub fn decode_output(&self, data: &[u8]) -> Result<AbiValue, CodecError> {
        self.output
            .decode_with(data, &self.options)
            .map(|(value, _)| value)
    }

    /// Human-readable signature, e.g. `make_point(a: u8, b: u8) -> struct Point`.
    pub fn signature(&self) -> String {
        let inputs = self
            .inputs
            .iter()
            .map(|(name, coder)| format!("{name}: {coder}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({}) -> {}", self.name, inputs, self.output)
    }
}

/// A configurable constant and where it lives in the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurableCoder {
    pub name: String,
    pub offset: u64,
    pub coder: Coder,
}

/// All coders of one ABI, composed up front.
///
/// Any type anywhere in the ABI that cannot be resolved or composed fails
/// construction; no value is ever processed against a partial coder set.
#[derive(Debug, Clone)]
pub struct AbiCoder {
    functions: Vec<FunctionCoder>,
    logs: HashMap<String, Coder>,
    configurables: Vec<ConfigurableCoder>,
    options: CoderOptions,
}

impl AbiCoder {
    /// Parse ABI JSON and build its coders with default options.
    pub fn from_json(json: &str) -> Result<Self> {
        let abi = AbiSpecification::from_json(json)?;
        Self::new(&abi)
    }

    /// Read an ABI JSON file and build its coders.
    pub fn from_file(path: impl AsRef<Path>, options: CoderOptions) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let abi = AbiSpecification::from_json(&json)?;
        Self::with_options(&abi, options)
    }

    pub fn new(abi: &AbiSpecification) -> Result<Self> {
        Self::with_options(abi, CoderOptions::default())
    }

    pub fn with_options(abi: &AbiSpecification, options: CoderOptions) -> Result<Self> {
        let resolver = TypeResolver::with_options(abi, &options);
        let coder_for = |concrete_type_id: &str| -> Result<Coder> {
            let ty = resolver.resolve(concrete_type_id)?;
            Ok(Coder::from_resolved(&ty)?)
        };

        let functions = abi
            .functions
            .iter()
            .map(|f| {
                let inputs = f
                    .inputs
                    .iter()
                    .map(|input| Ok((input.name.clone(), coder_for(&input.concrete_type_id)?)))
                    .collect::<Result<Vec<_>>>()?;
                let coder = FunctionCoder {
                    name: f.name.clone(),
                    inputs,
                    output: coder_for(&f.output)?,
                    options,
                };
                debug!(signature = %coder.signature(), "built function coder");
                Ok(coder)
            })
            .collect::<Result<Vec<_>>>()?;

        let logs = abi
            .logged_types
            .iter()
            .map(|log| Ok((log.log_id.clone(), coder_for(&log.concrete_type_id)?)))
            .collect::<Result<HashMap<_, _>>>()?;

        let configurables = abi
            .configurables
            .iter()
            .map(|c| {
                Ok(ConfigurableCoder {
                    name: c.name.clone(),
                    offset: c.offset,
                    coder: coder_for(&c.concrete_type_id)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        info!(
            program_type = abi.program_type.as_deref().unwrap_or("unknown"),
            functions = functions.len(),
            logs = logs.len(),
            configurables = configurables.len(),
            "built ABI coder"
        );

        Ok(Self {
            functions,
            logs,
            configurables,
            options,
        })
    }

    pub fn options(&self) -> &CoderOptions {
        &self.options
    }

    /// Function coders in ABI order.
    pub fn functions(&self) -> &[FunctionCoder] {
        &self.functions
    }

    pub fn function(&self, name: &str) -> Result<&FunctionCoder> {
        self.functions
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| Error::UnknownFunction(name.to_string()))
    }

    /// Coder for the type logged under `log_id`.
    pub fn log(&self, log_id: &str) -> Result<&Coder> {
        self.logs
            .get(log_id)
            .ok_or_else(|| Error::UnknownLog(log_id.to_string()))
    }

    pub fn decode_log(&self, log_id: &str, data: &[u8]) -> Result<AbiValue> {
        let (value, _) = self.log(log_id)?.decode_with(data, &self.options)?;
        Ok(value)
    }

    pub fn configurables(&self) -> &[ConfigurableCoder] {
        &self.configurables
    }

    pub fn configurable(&self, name: &str) -> Result<&ConfigurableCoder> {
        self.configurables
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| Error::UnknownConfigurable(name.to_string()))
    }

    /// Encode a new value for a configurable, returning its offset and bytes.
    pub fn encode_configurable(&self, name: &str, value: &AbiValue) -> Result<(u64, Vec<u8>)> {
        let configurable = self.configurable(name)?;
        Ok((configurable.offset, configurable.coder.encode(value)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../tests/fixtures/types.json");

    fn coder() -> AbiCoder {
        AbiCoder::from_json(FIXTURE).unwrap()
    }

    #[test]
    fn test_function_lookup() {
        let abi = coder();
        assert_eq!(abi.functions().len(), 6);
        assert!(abi.function("types_u16").is_ok());
        let err = abi.function("missing").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_from_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/types.json");
        let abi = AbiCoder::from_file(path, CoderOptions::default()).unwrap();
        assert_eq!(abi.functions().len(), 6);

        let err = AbiCoder::from_file("does/not/exist.json", CoderOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_signature() {
        let abi = coder();
        assert_eq!(
            abi.function("make_point").unwrap().signature(),
            "make_point(a: u8, b: u8) -> struct Point"
        );
    }

    #[test]
    fn test_arguments_are_concatenated() {
        let abi = coder();
        let f = abi.function("make_point").unwrap();
        let bytes = f
            .encode_arguments(&[AbiValue::U8(1), AbiValue::U8(2)])
            .unwrap();
        assert_eq!(bytes, vec![1, 2]);
        assert_eq!(
            f.decode_arguments(&bytes).unwrap(),
            vec![AbiValue::U8(1), AbiValue::U8(2)]
        );
        assert_eq!(
            f.encode_arguments(&[AbiValue::U8(1)]),
            Err(CodecError::LengthMismatch {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn test_log_and_configurable() {
        let abi = coder();
        let value = abi.decode_log("1515152261580153489", &[3, 4]).unwrap();
        assert_eq!(value.field("b"), Some(&AbiValue::U8(4)));
        assert!(abi.decode_log("0", &[]).unwrap_err().is_not_found());

        let (offset, bytes) = abi.encode_configurable("MAX", &AbiValue::U64(1)).unwrap();
        assert_eq!(offset, 4216);
        assert_eq!(bytes, vec![0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_unsupported_type_fails_construction() {
        let json = r#"{
            "concreteTypes": [{ "type": "u128", "concreteTypeId": "u128" }],
            "functions": [{ "name": "f", "inputs": [], "output": "u128" }]
        }"#;
        let err = AbiCoder::from_json(json).unwrap_err();
        assert!(err.is_unsupported_type());
    }

    #[test]
    fn test_malformed_abi() {
        let json = r#"{ "functions": [{ "name": "f", "inputs": [], "output": "nope" }] }"#;
        let err = AbiCoder::from_json(json).unwrap_err();
        assert!(err.is_malformed_abi());
    }
}
