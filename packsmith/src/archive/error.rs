//! Error types for archive access.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use zip::result::ZipError;

/// Result type for archive operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Errors that can occur while reading a pack archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The archive file could not be opened.
    #[error("failed to open archive {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    /// The file is not a readable zip archive.
    #[error("not a valid archive {}: {source}", .path.display())]
    Invalid { path: PathBuf, source: ZipError },

    /// An entry could not be read from the archive.
    #[error("failed to read entry {name}: {source}")]
    ReadEntry { name: String, source: ZipError },

    /// An entry's content is not valid UTF-8 text.
    #[error("entry {name} is not valid text: {reason}")]
    Decode { name: String, reason: String },

    /// An entry could not be written to its destination.
    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    /// The archive handle was already closed.
    #[error("archive {} is closed", .path.display())]
    Closed { path: PathBuf },
}
