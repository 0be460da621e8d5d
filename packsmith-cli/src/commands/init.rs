//! Init command - initialize configuration file.

use packsmith::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Run the init command.
///
/// Existing settings are kept and a file that fails to load is not
/// overwritten. Missing directories get their defaults
/// written out so they are visible in the file.
pub fn run() -> Result<(), CliError> {
    let mut config = ConfigFile::load()?;

    if config.paths.library_dir.is_none() {
        config.paths.library_dir = Some(config.library_dir());
    }
    if config.paths.projects_dir.is_none() {
        config.paths.projects_dir = Some(config.projects_dir());
    }
    config.save()?;

    println!("Configuration file: {}", config_file_path().display());
    println!();
    if config.paths.baseline_index.is_none() {
        println!("Set baseline_index in the [paths] section to the asset index of the");
        println!("game version your packs target, e.g. .minecraft/assets/indexes/1.8.json.");
    }
    println!("CLI arguments override config file values when specified.");
    Ok(())
}
