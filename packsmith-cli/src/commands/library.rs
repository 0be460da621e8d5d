//! Library commands - manage stored library packs.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use console::style;
use dialoguer::Confirm;
use packsmith::config::ConfigFile;
use packsmith::library::LibraryStore;

use crate::error::CliError;

/// Library subcommands.
#[derive(Debug, Subcommand)]
pub enum LibraryCommands {
    /// List library packs
    List {
        /// Library directory (overrides config)
        #[arg(long)]
        library_dir: Option<PathBuf>,
    },

    /// Rename a library pack
    Rename {
        /// Current name
        old_name: String,

        /// New name (do not use / \ * ? = : " < > |)
        new_name: String,

        /// Library directory (overrides config)
        #[arg(long)]
        library_dir: Option<PathBuf>,
    },

    /// Delete one or more library packs
    Delete {
        /// Names of the packs to delete
        #[arg(required = true)]
        names: Vec<String>,

        /// Do not ask for confirmation
        #[arg(long, short)]
        force: bool,

        /// Library directory (overrides config)
        #[arg(long)]
        library_dir: Option<PathBuf>,
    },

    /// Import a pack archive into the library
    Import {
        /// Resource pack archive (.zip)
        archive: PathBuf,

        /// Library name (default: archive file name)
        #[arg(long, short)]
        name: Option<String>,

        /// Library directory (overrides config)
        #[arg(long)]
        library_dir: Option<PathBuf>,
    },
}

/// Run a library subcommand.
pub fn run(command: LibraryCommands, config: &ConfigFile) -> Result<(), CliError> {
    let store =
        |dir: Option<PathBuf>| LibraryStore::new(dir.unwrap_or_else(|| config.library_dir()));

    match command {
        LibraryCommands::List { library_dir } => run_list(&store(library_dir)),
        LibraryCommands::Rename {
            old_name,
            new_name,
            library_dir,
        } => run_rename(&store(library_dir), &old_name, &new_name),
        LibraryCommands::Delete {
            names,
            force,
            library_dir,
        } => run_delete(&store(library_dir), &names, force),
        LibraryCommands::Import {
            archive,
            name,
            library_dir,
        } => run_import(&store(library_dir), &archive, name),
    }
}

fn run_list(store: &LibraryStore) -> Result<(), CliError> {
    let names = store.list()?;

    if names.is_empty() {
        println!("No library packs in {}", store.root().display());
        return Ok(());
    }

    println!("Library packs ({})", store.root().display());
    for name in names {
        println!("  {}", name);
    }
    Ok(())
}

fn run_rename(store: &LibraryStore, old_name: &str, new_name: &str) -> Result<(), CliError> {
    let new_name = store.rename(old_name, new_name)?;
    println!("Renamed {} to {}", old_name, style(new_name).bold());
    Ok(())
}

fn run_delete(store: &LibraryStore, names: &[String], force: bool) -> Result<(), CliError> {
    if !force {
        let prompt = if names.len() == 1 {
            format!("Delete library pack \"{}\"?", names[0])
        } else {
            format!("Delete {} library packs?", names.len())
        };
        let confirmed = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    for name in names {
        store.delete(name)?;
        println!("Deleted {}", name);
    }
    Ok(())
}

fn run_import(
    store: &LibraryStore,
    archive: &Path,
    name: Option<String>,
) -> Result<(), CliError> {
    let name = match name {
        Some(name) => name,
        None => archive
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                CliError::InvalidInput(format!(
                    "Cannot derive a name from {}; use --name",
                    archive.display()
                ))
            })?,
    };

    let count = store.import_pack(archive, &name)?;
    println!(
        "{} {} ({} files)",
        style("Imported").green().bold(),
        name.trim(),
        count
    );
    Ok(())
}
