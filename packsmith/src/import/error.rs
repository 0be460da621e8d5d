//! Error types for the import pipeline.

use std::fmt;

use thiserror::Error;

use crate::archive::ArchiveError;
use crate::project::ProjectError;

/// Result type for import steps.
pub type ImportResult<T> = Result<T, ImportError>;

/// Coarse classification of an import failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The archive cannot be opened or read.
    Archive,
    /// Entry content is not the expected text or JSON.
    Decode,
    /// Writing an extracted file failed.
    Io,
    /// A metadata value is malformed.
    InvalidArgument,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Archive => write!(f, "archive"),
            ErrorKind::Decode => write!(f, "decode"),
            ErrorKind::Io => write!(f, "io"),
            ErrorKind::InvalidArgument => write!(f, "invalid argument"),
        }
    }
}

/// Errors raised inside an import step.
///
/// These never leave the sequence: the runner logs them and turns them into a
/// step failure.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Reading from or extracting out of the archive failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// A JSON entry could not be parsed.
    #[error("failed to parse {entry}: {source}")]
    Decode {
        entry: String,
        source: serde_json::Error,
    },

    /// Writing to or mutating the project failed.
    #[error(transparent)]
    Project(#[from] ProjectError),

    /// A step needing the archive ran before the archive was listed.
    #[error("pack file has not been listed")]
    NotListed,
}

impl ImportError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImportError::Archive(e) => match e {
                ArchiveError::Decode { .. } => ErrorKind::Decode,
                ArchiveError::Write { .. } => ErrorKind::Io,
                ArchiveError::Open { .. }
                | ArchiveError::Invalid { .. }
                | ArchiveError::ReadEntry { .. }
                | ArchiveError::Closed { .. } => ErrorKind::Archive,
            },
            ImportError::Decode { .. } => ErrorKind::Decode,
            ImportError::Project(e) => match e {
                ProjectError::InvalidArgument(_) => ErrorKind::InvalidArgument,
                ProjectError::ParseFailed { .. } | ProjectError::SerializeFailed(_) => {
                    ErrorKind::Decode
                }
                ProjectError::CreateDirFailed { .. }
                | ProjectError::ReadFailed { .. }
                | ProjectError::WriteFailed { .. } => ErrorKind::Io,
            },
            ImportError::NotListed => ErrorKind::Archive,
        }
    }
}
