//! Addressable configuration settings.
//!
//! Settings are named `section.key`, matching their place in the INI file.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::error::{ConfigError, ConfigResult};
use super::file::{parse_log_level, ConfigFile};

/// A single setting of the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    PathsLibraryDir,
    PathsProjectsDir,
    PathsBaselineIndex,
    LoggingLevel,
    LoggingDirectory,
}

impl ConfigKey {
    /// Every setting, in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::PathsLibraryDir,
            ConfigKey::PathsProjectsDir,
            ConfigKey::PathsBaselineIndex,
            ConfigKey::LoggingLevel,
            ConfigKey::LoggingDirectory,
        ]
    }

    /// INI section.
    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::PathsLibraryDir
            | ConfigKey::PathsProjectsDir
            | ConfigKey::PathsBaselineIndex => "paths",
            ConfigKey::LoggingLevel | ConfigKey::LoggingDirectory => "logging",
        }
    }

    /// Key within the section.
    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::PathsLibraryDir => "library_dir",
            ConfigKey::PathsProjectsDir => "projects_dir",
            ConfigKey::PathsBaselineIndex => "baseline_index",
            ConfigKey::LoggingLevel => "level",
            ConfigKey::LoggingDirectory => "directory",
        }
    }

    /// Full `section.key` name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Current value as text; empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        let path = match self {
            ConfigKey::PathsLibraryDir => &config.paths.library_dir,
            ConfigKey::PathsProjectsDir => &config.paths.projects_dir,
            ConfigKey::PathsBaselineIndex => &config.paths.baseline_index,
            ConfigKey::LoggingDirectory => &config.logging.directory,
            ConfigKey::LoggingLevel => return config.logging.level.clone(),
        };
        path.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    }

    /// Set the value from text. An empty value unsets a path.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> ConfigResult<()> {
        let value = value.trim();
        let path = (!value.is_empty()).then(|| PathBuf::from(value));

        match self {
            ConfigKey::PathsLibraryDir => config.paths.library_dir = path,
            ConfigKey::PathsProjectsDir => config.paths.projects_dir = path,
            ConfigKey::PathsBaselineIndex => config.paths.baseline_index = path,
            ConfigKey::LoggingDirectory => config.logging.directory = path,
            ConfigKey::LoggingLevel => config.logging.level = parse_log_level(value)?,
        }
        Ok(())
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section(), self.key_name())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::all()
            .iter()
            .find(|key| key.name() == s)
            .copied()
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        for key in ConfigKey::all() {
            assert_eq!(key.name().parse::<ConfigKey>().unwrap(), *key);
        }
        assert!(matches!(
            "paths.nope".parse::<ConfigKey>(),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_get_and_set() {
        let mut config = ConfigFile::default();
        assert_eq!(ConfigKey::PathsLibraryDir.get(&config), "");

        ConfigKey::PathsLibraryDir
            .set(&mut config, "/data/library")
            .unwrap();
        assert_eq!(ConfigKey::PathsLibraryDir.get(&config), "/data/library");

        ConfigKey::PathsLibraryDir.set(&mut config, "  ").unwrap();
        assert_eq!(config.paths.library_dir, None);

        ConfigKey::LoggingLevel.set(&mut config, "Trace").unwrap();
        assert_eq!(ConfigKey::LoggingLevel.get(&config), "trace");
        assert!(ConfigKey::LoggingLevel.set(&mut config, "verbose").is_err());
    }
}
