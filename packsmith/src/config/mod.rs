//! Configuration file handling.
//!
//! Settings live in an INI file at `<config dir>/packsmith/config.ini`.
//! Command-line arguments override file values when given.

mod error;
mod file;
mod keys;

pub use error::{ConfigError, ConfigResult};
pub use file::{
    config_file_path, parse_log_level, ConfigFile, LoggingSettings, PathsSettings, APP_DIR,
    CONFIG_FILE, LOG_LEVELS,
};
pub use keys::ConfigKey;
