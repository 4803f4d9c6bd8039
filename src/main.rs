use clap::{Parser, Subcommand};
use serde_json::Value as JsonValue;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sway_abi_coder::config::{LogFormat, LoggingConfig};
use sway_abi_coder::{
    AbiCoder, AbiSpecification, AbiValue, CodecError, Config, FunctionCoder, TypeResolver,
};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Abi(#[from] sway_abi_coder::Error),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid hex data: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("Invalid log filter: {0}")]
    LogFilter(String),

    #[error("Expected a JSON array with {expected} arguments")]
    Arguments { expected: usize },
}

#[derive(Parser)]
#[command(name = "abi-coder")]
#[command(about = "Resolve Sway ABI types and encode or decode values in the Fuel wire format")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true, env = "ABI_CODER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved type tree of a concrete type as JSON
    Resolve {
        /// Path to the ABI JSON file
        #[arg(short, long)]
        abi: PathBuf,

        /// Concrete type id to resolve
        #[arg(short = 't', long)]
        concrete_type: String,
    },

    /// Encode a JSON value and print it as 0x hex
    Encode {
        /// Path to the ABI JSON file
        #[arg(short, long)]
        abi: PathBuf,

        /// Name of the function
        #[arg(short, long)]
        function: String,

        /// Encode the function output instead of its arguments
        #[arg(long)]
        output: bool,

        /// JSON value: an array of arguments, or the output value with --output
        #[arg(short, long)]
        value: String,
    },

    /// Decode hex data and print it as JSON
    Decode {
        /// Path to the ABI JSON file
        #[arg(short, long)]
        abi: PathBuf,

        /// Name of the function
        #[arg(short, long)]
        function: String,

        /// Decode the function output instead of its arguments
        #[arg(long)]
        output: bool,

        /// Encoded bytes as hex, with or without 0x prefix
        #[arg(short, long)]
        data: String,
    },

    /// List the function signatures of an ABI
    Functions {
        /// Path to the ABI JSON file
        #[arg(short, long)]
        abi: PathBuf,
    },
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    init_tracing(&config.logging)?;

    match cli.command {
        Commands::Resolve { abi, concrete_type } => {
            let spec = load_spec(&abi)?;
            let resolver = TypeResolver::with_options(&spec, &config.coder);
            let ty = resolver
                .resolve(&concrete_type)
                .map_err(sway_abi_coder::Error::from)?;
            println!("{}", serde_json::to_string_pretty(&ty)?);
            Ok(())
        }
        Commands::Encode {
            abi,
            function,
            output,
            value,
        } => {
            let coder = AbiCoder::from_file(&abi, config.coder)?;
            let f = coder.function(&function)?;
            let json: JsonValue = serde_json::from_str(&value)?;
            let bytes = if output {
                f.encode_output(&f.output.value_from_json(&json)?)?
            } else {
                f.encode_arguments(&arguments_from_json(f, &json)?)?
            };
            println!("0x{}", hex::encode(bytes));
            Ok(())
        }
        Commands::Decode {
            abi,
            function,
            output,
            data,
        } => {
            let coder = AbiCoder::from_file(&abi, config.coder)?;
            let f = coder.function(&function)?;
            let bytes = hex::decode(data.trim().trim_start_matches("0x"))?;
            let json = if output {
                f.decode_output(&bytes)?.to_json()
            } else {
                JsonValue::Array(
                    f.decode_arguments(&bytes)?
                        .iter()
                        .map(AbiValue::to_json)
                        .collect(),
                )
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
            Ok(())
        }
        Commands::Functions { abi } => {
            let coder = AbiCoder::from_file(&abi, config.coder)?;
            for f in coder.functions() {
                println!("{}", f.signature());
            }
            Ok(())
        }
    }
}

/// Install the stderr subscriber; `RUST_LOG` overrides the configured level.
fn init_tracing(config: &LoggingConfig) -> Result<(), AppError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| AppError::LogFilter(e.to_string()))?,
    };

    match config.format {
        LogFormat::Text => {
            let layer = fmt::layer()
                .with_ansi(io::stderr().is_terminal())
                .with_writer(io::stderr);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        LogFormat::Json => {
            let layer = fmt::layer().json().with_writer(io::stderr);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    }
    Ok(())
}

fn load_spec(path: &Path) -> Result<AbiSpecification, AppError> {
    let json = std::fs::read_to_string(path)?;
    Ok(AbiSpecification::from_json(&json)?)
}

fn arguments_from_json(f: &FunctionCoder, json: &JsonValue) -> Result<Vec<AbiValue>, AppError> {
    let expected = f.inputs.len();
    match json {
        JsonValue::Array(items) if items.len() == expected => Ok(f
            .inputs
            .iter()
            .zip(items)
            .map(|((_, coder), item)| coder.value_from_json(item))
            .collect::<Result<_, _>>()?),
        _ => Err(AppError::Arguments { expected }),
    }
}
