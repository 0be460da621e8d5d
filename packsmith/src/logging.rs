//! Tracing subscriber setup.
//!
//! Console output always goes to stderr. When a log directory is configured,
//! a second layer writes plain-text logs to a daily rolling file through a
//! non-blocking writer; the returned [`LoggingGuard`] flushes it on drop.

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingSettings;

/// Log file name prefix; the appender adds the date.
pub const LOG_FILE_PREFIX: &str = "packsmith.log";

/// Errors that can occur while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The level filter could not be parsed.
    #[error("invalid log filter '{filter}': {source}")]
    InvalidFilter {
        filter: String,
        source: tracing_subscriber::filter::ParseError,
    },

    /// The log directory could not be created.
    #[error("failed to create log directory {}: {source}", .path.display())]
    CreateDirFailed { path: PathBuf, source: io::Error },

    /// A global subscriber is already installed.
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

/// Logging options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter directive (e.g. `info` or `packsmith=debug`).
    ///
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Directory for rolling log files.
    pub directory: Option<PathBuf>,
    /// Use ANSI colors on the console.
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            ansi: true,
        }
    }
}

impl From<&LoggingSettings> for LoggingConfig {
    fn from(settings: &LoggingSettings) -> Self {
        Self {
            level: settings.level.clone(),
            directory: settings.directory.clone(),
            ..Default::default()
        }
    }
}

impl LoggingConfig {
    /// Set the default filter directive.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Write log files to this directory.
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// Build the level filter: `RUST_LOG` if set and valid, else `level`.
    pub fn filter(&self) -> Result<EnvFilter, LoggingError> {
        EnvFilter::try_from_default_env().or_else(|_| {
            EnvFilter::try_new(&self.level).map_err(|e| LoggingError::InvalidFilter {
                filter: self.level.clone(),
                source: e,
            })
        })
    }
}

/// Keeps the file writer alive; dropping it flushes pending log lines.
#[derive(Debug)]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global tracing subscriber.
///
/// Hold the returned guard for the lifetime of the program.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard, LoggingError> {
    let filter = config.filter()?;

    let (file_layer, file_guard) = match &config.directory {
        Some(dir) => {
            fs::create_dir_all(dir).map_err(|e| LoggingError::CreateDirFailed {
                path: dir.clone(),
                source: e,
            })?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(config.ansi)
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(file_layer)
        .try_init()?;

    Ok(LoggingGuard { _file: file_guard })
}
