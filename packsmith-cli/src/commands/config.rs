//! Config command - inspect and edit `config.ini`.
//!
//! Values are shown as the commands will use them: unset directories are
//! reported with the default they fall back to.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use console::style;
use packsmith::config::{config_file_path, ConfigFile, ConfigKey};
use packsmith::source::FileObjectIndex;

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the effective value of a setting
    Get {
        /// Setting name, e.g. paths.library_dir
        key: String,
    },

    /// Change a setting (an empty value unsets a path)
    Set {
        /// Setting name, e.g. paths.baseline_index
        key: String,

        /// New value
        value: String,
    },

    /// Show every setting
    List,

    /// Print the configuration file location
    Path,
}

/// Run a config subcommand against the default configuration file.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    let file = config_file_path();

    match command {
        ConfigCommands::Get { key } => {
            let config = ConfigFile::load_from(&file)?;
            println!("{}", describe(lookup(&key)?, &config));
        }
        ConfigCommands::Set { key, value } => {
            let key = lookup(&key)?;
            let config = set_value(&file, key, &value)?;
            println!("{} = {}", key, describe(key, &config));
        }
        ConfigCommands::List => {
            let config = ConfigFile::load_from(&file)?;
            let note = if file.exists() { "" } else { " (not created yet)" };
            println!("{}{}", style(file.display()).bold(), note);
            for key in ConfigKey::all() {
                println!("  {:<22} {}", key.name(), describe(*key, &config));
            }
        }
        ConfigCommands::Path => println!("{}", file.display()),
    }
    Ok(())
}

fn lookup(name: &str) -> Result<ConfigKey, CliError> {
    name.parse().map_err(|_| {
        let known: Vec<String> = ConfigKey::all().iter().map(ConfigKey::name).collect();
        CliError::Config(format!(
            "unknown setting '{}' (known: {})",
            name,
            known.join(", ")
        ))
    })
}

/// Effective value of a setting, with the fallback used when it is unset.
fn describe(key: ConfigKey, config: &ConfigFile) -> String {
    let value = key.get(config);
    if !value.is_empty() {
        return value;
    }

    match key {
        ConfigKey::PathsLibraryDir => format!("{} (default)", config.library_dir().display()),
        ConfigKey::PathsProjectsDir => format!("{} (default)", config.projects_dir().display()),
        ConfigKey::PathsBaselineIndex => "(not set, every asset is new)".to_string(),
        ConfigKey::LoggingDirectory => "(not set, console only)".to_string(),
        ConfigKey::LoggingLevel => "(not set)".to_string(),
    }
}

/// Load `file`, change one setting and write it back.
///
/// A file that fails to load is left untouched.
fn set_value(file: &Path, key: ConfigKey, value: &str) -> Result<ConfigFile, CliError> {
    let mut config = ConfigFile::load_from(file)?;
    check_path_value(key, value.trim())?;
    key.set(&mut config, value)?;
    config.save_to(file)?;
    Ok(config)
}

fn check_path_value(key: ConfigKey, value: &str) -> Result<(), CliError> {
    if value.is_empty() {
        return Ok(());
    }
    let path = PathBuf::from(value);

    match key {
        ConfigKey::PathsBaselineIndex => {
            FileObjectIndex::load(&path)?;
        }
        ConfigKey::PathsLibraryDir | ConfigKey::PathsProjectsDir | ConfigKey::LoggingDirectory
            if path.exists() && !path.is_dir() =>
        {
            return Err(CliError::InvalidInput(format!(
                "{} is not a directory",
                path.display()
            )));
        }
        _ => {}
    }
    Ok(())
}
