//! Error types for project access.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for project operations.
pub type ProjectResult<T> = Result<T, ProjectError>;

/// Errors that can occur while reading or mutating a project.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// A mutator was given a malformed value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Failed to create a project directory.
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDirFailed { path: PathBuf, source: io::Error },

    /// Failed to read a project file.
    #[error("failed to read {}: {source}", .path.display())]
    ReadFailed { path: PathBuf, source: io::Error },

    /// Failed to write a project file.
    #[error("failed to write {}: {source}", .path.display())]
    WriteFailed { path: PathBuf, source: io::Error },

    /// The project file is not valid JSON.
    #[error("failed to parse {}: {source}", .path.display())]
    ParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The project metadata could not be serialized.
    #[error("failed to serialize project metadata: {0}")]
    SerializeFailed(#[source] serde_json::Error),
}
