//! Packsmith CLI - Command-line interface
//!
//! Imports resource packs into projects and manages the pack library.

mod commands;
mod error;
mod ui;

use clap::{Parser, Subcommand};
use console::style;
use packsmith::config::ConfigFile;
use packsmith::logging::{init_logging, LoggingConfig};

use commands::config::ConfigCommands;
use commands::import::ImportArgs;
use commands::library::LibraryCommands;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "packsmith", version, about = "Resource pack workbench")]
struct Cli {
    /// Log filter (e.g. debug, packsmith=trace); overrides config
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Shorthand for --log-level debug
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create or complete the configuration file
    Init,

    /// Import a resource pack archive into a project
    Import(ImportArgs),

    /// Manage library packs
    Library {
        #[command(subcommand)]
        command: LibraryCommands,
    },

    /// View or change configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();
    let config = ConfigFile::load().unwrap_or_else(|e| {
        eprintln!("{} {}; using defaults", style("Warning:").yellow(), e);
        ConfigFile::default()
    });

    let mut logging = LoggingConfig::from(&config.logging);
    if let Some(level) = cli.log_level.clone() {
        logging.level = level;
    } else if cli.verbose {
        logging.level = "debug".to_string();
    }

    let guard = match init_logging(&logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("{} {}", style("Warning:").yellow(), e);
            None
        }
    };

    if let Err(e) = run(cli.command, &config) {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        // Flush the file writer before exiting.
        drop(guard);
        std::process::exit(1);
    }
}

fn run(command: Commands, config: &ConfigFile) -> Result<(), CliError> {
    match command {
        Commands::Init => commands::init::run(),
        Commands::Import(args) => commands::import::run(args, config),
        Commands::Library { command } => commands::library::run(command, config),
        Commands::Config { command } => commands::config::run(command),
    }
}
