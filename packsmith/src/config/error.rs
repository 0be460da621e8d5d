//! Error types for configuration loading and saving.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {}: {source}", .path.display())]
    ReadFailed { path: PathBuf, source: io::Error },

    /// The configuration file is not valid INI.
    #[error("failed to parse config file {}: {source}", .path.display())]
    ParseFailed {
        path: PathBuf,
        source: ini::ParseError,
    },

    /// Failed to write the configuration file.
    #[error("failed to write config file {}: {source}", .path.display())]
    WriteFailed { path: PathBuf, source: io::Error },

    /// A setting has a value it cannot take.
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// No setting with this name.
    #[error("unknown configuration key '{0}'")]
    UnknownKey(String),
}
