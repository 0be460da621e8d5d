//! Error types for the library store.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::archive::ArchiveError;
use crate::source::SourceError;

/// Result type for library operations.
pub type LibraryResult<T> = Result<T, LibraryError>;

/// Errors that can occur while managing library packs.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The name cannot be used as a library pack name.
    #[error("\"{name}\" is not a valid name: {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// No library pack with this name.
    #[error("library pack not found: {0}")]
    NotFound(String),

    /// A library pack with this name already exists.
    #[error("library pack already exists: {0}")]
    AlreadyExists(String),

    /// Renaming a pack to its current name.
    #[error("library pack is already named {0}")]
    SameName(String),

    /// Failed to read the library directory.
    #[error("failed to read {}: {source}", .path.display())]
    ReadFailed { path: PathBuf, source: io::Error },

    /// Failed to modify the library directory.
    #[error("failed to write {}: {source}", .path.display())]
    WriteFailed { path: PathBuf, source: io::Error },

    /// Importing a pack archive failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Scanning a library pack failed.
    #[error(transparent)]
    Source(#[from] SourceError),
}
