//! Import command - populate a project from a resource pack archive.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use clap::Args;
use console::style;
use packsmith::config::ConfigFile;
use packsmith::import::{ImportSummary, PopulateProjectFromPack, SequenceRunner, SequenceState};
use packsmith::library::LibraryStore;
use packsmith::project::Project;
use packsmith::source::{AssetSource, FileObjectIndex, SourceKind, SourceSet, BASELINE_SOURCE_ID};
use tracing::{info, warn};

use crate::error::CliError;
use crate::ui::{ChannelObserver, ImportProgress, SequenceEvent};

/// Arguments of `packsmith import`.
#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Resource pack archive (.zip)
    pub archive: PathBuf,

    /// Project directory (default: <projects_dir>/<archive name>)
    #[arg(long, short)]
    pub project: Option<PathBuf>,

    /// Asset index describing the baseline assets
    #[arg(long)]
    pub baseline_index: Option<PathBuf>,

    /// Library directory (overrides config)
    #[arg(long)]
    pub library_dir: Option<PathBuf>,
}

/// Outcome reported by the worker thread.
struct ImportOutcome {
    state: SequenceState,
    summary: ImportSummary,
    project_root: PathBuf,
}

/// Run the import command.
pub fn run(args: ImportArgs, config: &ConfigFile) -> Result<(), CliError> {
    if !args.archive.is_file() {
        return Err(CliError::InvalidInput(format!(
            "Archive not found: {}",
            args.archive.display()
        )));
    }

    let project_dir = match args.project {
        Some(dir) => dir,
        None => config.projects_dir().join(project_name(&args.archive)?),
    };

    let baseline_index = args
        .baseline_index
        .or_else(|| config.paths.baseline_index.clone());
    let baseline = load_baseline(baseline_index.as_deref())?;

    let library_dir = args.library_dir.unwrap_or_else(|| config.library_dir());
    let sources = LibraryStore::new(library_dir).load_sources(baseline)?;

    println!("Archive: {}", args.archive.display());
    println!("Project: {}", project_dir.display());
    println!();

    let (tx, rx) = mpsc::channel();
    let archive = args.archive;
    let worker = thread::spawn(move || import_worker(archive, project_dir, sources, tx));

    let progress = ImportProgress::new();
    progress.follow(rx);

    let outcome = worker
        .join()
        .map_err(|_| CliError::ImportFailed("import worker panicked".to_string()))??;

    println!();
    match outcome.state {
        SequenceState::Succeeded => {
            println!(
                "{} {}",
                style("Imported:").green().bold(),
                outcome.summary
            );
            if let Some(title) = &outcome.summary.title {
                println!("Title:    {}", title);
            }
            println!("Project:  {}", outcome.project_root.display());
            Ok(())
        }
        state => Err(CliError::ImportFailed(format!(
            "sequence ended in state {:?}; files written before the failure were kept ({})",
            state, outcome.summary
        ))),
    }
}

/// Open the project, run the sequence and save the project on success.
fn import_worker(
    archive: PathBuf,
    project_dir: PathBuf,
    sources: SourceSet,
    tx: mpsc::Sender<SequenceEvent>,
) -> Result<ImportOutcome, CliError> {
    let mut project = Project::open(&project_dir)?;
    let observer = ChannelObserver::new(tx.clone());

    let mut sequence = PopulateProjectFromPack::new(archive, &mut project, &sources)
        .on_complete(move || {
            tx.send(SequenceEvent::Completed).ok();
        });
    let state = SequenceRunner::new().run(&mut sequence, &observer);
    let summary = sequence.summary().clone();
    drop(sequence);

    if state.is_success() {
        project.save()?;
        info!(project = %project.root().display(), "Saved project");
    }

    Ok(ImportOutcome {
        state,
        summary,
        project_root: project.root().to_path_buf(),
    })
}

/// Build the baseline source, empty when no index is configured.
fn load_baseline(index: Option<&Path>) -> Result<AssetSource, CliError> {
    match index {
        Some(path) => {
            let index = FileObjectIndex::load(path)?;
            Ok(AssetSource::from_index(
                BASELINE_SOURCE_ID,
                "Vanilla",
                SourceKind::Baseline,
                &index,
            ))
        }
        None => {
            warn!("No baseline index configured, every asset is treated as new");
            println!(
                "{} no baseline index set; use --baseline-index or [paths] baseline_index",
                style("Warning:").yellow()
            );
            Ok(AssetSource::new(
                BASELINE_SOURCE_ID,
                "Vanilla",
                SourceKind::Baseline,
            ))
        }
    }
}

/// Project directory name derived from the archive file name.
fn project_name(archive: &Path) -> Result<String, CliError> {
    archive
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| packsmith::asset::escape_filename(s.trim()))
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            CliError::InvalidInput(format!(
                "Cannot derive a project name from {}; use --project",
                archive.display()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_project_name_from_archive() {
        assert_eq!(
            project_name(Path::new("/downloads/My Pack.zip")).unwrap(),
            "My Pack"
        );
        assert_eq!(project_name(Path::new("a?b.zip")).unwrap(), "ab");
        assert!(project_name(Path::new("/")).is_err());
    }

    #[test]
    fn test_load_baseline_from_index() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("1.8.json");
        fs::write(
            &path,
            r#"{"objects": {"minecraft/lang/en_US.lang": {"hash": "ab", "size": 3}}}"#,
        )
        .unwrap();

        let baseline = load_baseline(Some(&path)).unwrap();
        assert!(baseline.provides("assets.minecraft.lang.en_US"));
        assert_eq!(baseline.kind, SourceKind::Baseline);
    }

    #[test]
    fn test_load_baseline_without_index_is_empty() {
        let baseline = load_baseline(None).unwrap();
        assert!(baseline.is_empty());
        assert_eq!(baseline.id, BASELINE_SOURCE_ID);
    }
}
