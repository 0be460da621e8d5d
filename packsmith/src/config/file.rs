//! INI configuration file.
//!
//! ```ini
//! [paths]
//! library_dir = /home/user/.local/share/packsmith/library
//! projects_dir = /home/user/packsmith
//! baseline_index = /home/user/.minecraft/assets/indexes/1.8.json
//!
//! [logging]
//! level = info
//! directory = /home/user/.local/state/packsmith
//! ```
//!
//! Missing keys take their defaults; unknown keys are ignored.

use std::fs;
use std::path::{Path, PathBuf};

use ini::Ini;
use tracing::debug;

use super::error::{ConfigError, ConfigResult};

/// Application directory name under the platform config and data dirs.
pub const APP_DIR: &str = "packsmith";

/// Configuration file name.
pub const CONFIG_FILE: &str = "config.ini";

/// Log levels accepted in `[logging] level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const DEFAULT_LOG_LEVEL: &str = "info";

/// Path of the configuration file: `<config dir>/packsmith/config.ini`.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILE)
}

/// `[paths]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathsSettings {
    /// Directory holding extracted library packs.
    pub library_dir: Option<PathBuf>,
    /// Directory new projects are created in.
    pub projects_dir: Option<PathBuf>,
    /// Asset index describing the baseline asset set.
    pub baseline_index: Option<PathBuf>,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Default level filter, overridden by `RUST_LOG`.
    pub level: String,
    /// Directory for rolling log files; console only when unset.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            directory: None,
        }
    }
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub paths: PathsSettings,
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Load from the default location.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load from a specific file.
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        let ini = Ini::load_from_str(&content).map_err(|e| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_ini(&ini)
    }

    /// Save to the default location.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&config_file_path())
    }

    /// Save to a specific file, creating its directory.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        self.to_ini()
            .write_to_file(path)
            .map_err(|e| ConfigError::WriteFailed {
                path: path.to_path_buf(),
                source: e,
            })?;

        debug!(path = %path.display(), "Saved config file");
        Ok(())
    }

    /// Read settings from parsed INI.
    pub fn from_ini(ini: &Ini) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(section) = ini.section(Some("paths")) {
            config.paths.library_dir = non_empty_path(section.get("library_dir"));
            config.paths.projects_dir = non_empty_path(section.get("projects_dir"));
            config.paths.baseline_index = non_empty_path(section.get("baseline_index"));
        }

        if let Some(section) = ini.section(Some("logging")) {
            if let Some(level) = section.get("level").map(str::trim) {
                if !level.is_empty() {
                    config.logging.level = parse_log_level(level)?;
                }
            }
            config.logging.directory = non_empty_path(section.get("directory"));
        }

        Ok(config)
    }

    /// Render settings as INI. Unset paths are written as empty values.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("paths"))
            .set("library_dir", path_value(&self.paths.library_dir))
            .set("projects_dir", path_value(&self.paths.projects_dir))
            .set("baseline_index", path_value(&self.paths.baseline_index));

        ini.with_section(Some("logging"))
            .set("level", self.logging.level.as_str())
            .set("directory", path_value(&self.logging.directory));

        ini
    }

    /// Library directory, defaulting to `<data dir>/packsmith/library`.
    pub fn library_dir(&self) -> PathBuf {
        self.paths.library_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
                .join("library")
        })
    }

    /// Projects directory, defaulting to `~/packsmith`.
    pub fn projects_dir(&self) -> PathBuf {
        self.paths.projects_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
        })
    }
}

/// Validate a log level name, returning it lowercased.
pub fn parse_log_level(value: &str) -> ConfigResult<String> {
    let level = value.trim().to_lowercase();
    if LOG_LEVELS.contains(&level.as_str()) {
        Ok(level)
    } else {
        Err(ConfigError::InvalidValue {
            key: "logging.level".to_string(),
            value: value.to_string(),
            reason: format!("expected one of {}", LOG_LEVELS.join(", ")),
        })
    }
}

fn non_empty_path(value: Option<&str>) -> Option<PathBuf> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(expand_tilde)
}

fn path_value(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}

/// Expand a leading `~/` to the home directory.
fn expand_tilde(value: &str) -> PathBuf {
    match value.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(value)),
        None => PathBuf::from(value),
    }
}
