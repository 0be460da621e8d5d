//! CLI error type.

use std::fmt;
use std::io;

use packsmith::config::ConfigError;
use packsmith::library::LibraryError;
use packsmith::project::ProjectError;
use packsmith::source::SourceError;

/// Errors reported by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Invalid or missing configuration.
    Config(String),
    /// Reading or writing the configuration file failed.
    ConfigFile(ConfigError),
    /// A command argument is unusable.
    InvalidInput(String),
    /// The import sequence did not complete.
    ImportFailed(String),
    /// A library operation failed.
    Library(LibraryError),
    /// Opening or saving the project failed.
    Project(ProjectError),
    /// Loading the baseline or a library source failed.
    Source(SourceError),
    /// Terminal interaction failed.
    Prompt(String),
    /// Other I/O failure.
    Io(io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "Configuration error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "{}", msg),
            CliError::ImportFailed(msg) => write!(f, "Import failed: {}", msg),
            CliError::Library(e) => write!(f, "Library error: {}", e),
            CliError::Project(e) => write!(f, "Project error: {}", e),
            CliError::Source(e) => write!(f, "Source error: {}", e),
            CliError::Prompt(msg) => write!(f, "Prompt failed: {}", msg),
            CliError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Library(e) => Some(e),
            CliError::Project(e) => Some(e),
            CliError::Source(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<LibraryError> for CliError {
    fn from(e: LibraryError) -> Self {
        CliError::Library(e)
    }
}

impl From<ProjectError> for CliError {
    fn from(e: ProjectError) -> Self {
        CliError::Project(e)
    }
}

impl From<SourceError> for CliError {
    fn from(e: SourceError) -> Self {
        CliError::Source(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(e: dialoguer::Error) -> Self {
        CliError::Prompt(e.to_string())
    }
}
