//! Coder options and configuration file parsing.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Default cap on a decoded length or count prefix (10 MiB).
pub const DEFAULT_MAX_DYNAMIC_LENGTH: u64 = 10 * 1024 * 1024;

/// Default cap on the element count of a vector whose elements encode to
/// zero bytes, where the input size bounds nothing.
pub const DEFAULT_MAX_ZERO_SIZED_ELEMENTS: u64 = 4096;

/// Default cap on resolver recursion.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Limits applied while resolving and decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoderOptions {
    /// Largest length or element count a decoded prefix may announce.
    pub max_dynamic_length: u64,
    /// Largest element count accepted for vectors of zero-byte elements.
    pub max_zero_sized_elements: u64,
    /// Deepest recursion the resolver accepts before giving up.
    pub max_depth: usize,
}

impl Default for CoderOptions {
    fn default() -> Self {
        Self {
            max_dynamic_length: DEFAULT_MAX_DYNAMIC_LENGTH,
            max_zero_sized_elements: DEFAULT_MAX_ZERO_SIZED_ELEMENTS,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging settings for the command-line tool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "info" or "sway_abi_coder=trace".
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub coder: CoderOptions,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(path.as_ref().display().to_string(), e))?;
        Ok(Self::from_str(&content)?)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }
}

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}': {1}")]
    Io(String, #[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}
