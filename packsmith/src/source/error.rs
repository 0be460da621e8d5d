//! Error types for asset sources.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors that can occur while loading or registering asset sources.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to read a source file or directory.
    #[error("failed to read {}: {source}", .path.display())]
    ReadFailed { path: PathBuf, source: io::Error },

    /// An asset index could not be parsed.
    #[error("failed to parse asset index {}: {source}", .path.display())]
    IndexParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A source with the same id is already registered.
    #[error("source id already registered: {0}")]
    DuplicateId(String),

    /// The id is reserved for the baseline or the project.
    #[error("source id is reserved: {0}")]
    ReservedId(String),
}
