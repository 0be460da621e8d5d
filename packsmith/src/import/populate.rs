//! Populate a project from a resource pack archive.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::error::{ImportError, ImportResult};
use super::ledger::ExtractionLedger;
use super::sequence::{
    MonitoredSequence, SequenceObserver, SequenceRunner, SequenceState, StepDescriptor,
};
use crate::archive::{ArchiveEntry, PackArchive};
use crate::asset::{
    classify, escape_filename, sanitize_relative_path, AssetKey, AssetKind, LANG_DIR, LANG_SUFFIX,
    SOUNDS_DIR,
};
use crate::project::{PackMcmeta, Project, ProjectError, SoundEntryMap};
use crate::source::{SourceLayering, PROJECT_SOURCE_ID};

/// Pack icon at the archive root.
pub const PACK_ICON: &str = "pack.png";

/// Pack manifest at the archive root.
pub const PACK_MANIFEST: &str = "pack.mcmeta";

/// Sound event definitions.
pub const SOUND_DEFINITIONS: &str = "assets/minecraft/sounds.json";

/// What an import wrote into the project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// The pack icon was extracted.
    pub icon: bool,
    /// Title adopted from the manifest.
    pub title: Option<String>,
    /// Codes of the custom languages registered.
    pub languages: Vec<String>,
    /// Custom sound files extracted.
    pub sounds: usize,
    /// Baseline assets overridden by the project.
    pub overrides: usize,
    /// Unmanaged files copied to the extras directory.
    pub extras: usize,
    /// Language or sound files not referenced by any manifest.
    pub orphans: usize,
    /// Entries whose name had nothing usable left after sanitizing.
    pub skipped: usize,
}

impl ImportSummary {
    /// Total number of files written.
    pub fn files_written(&self) -> usize {
        usize::from(self.icon)
            + self.languages.len()
            + self.sounds
            + self.overrides
            + self.extras
            + self.orphans
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} languages, {} sounds, {} overrides, {} extras",
            self.languages.len(),
            self.sounds,
            self.overrides,
            self.extras
        )?;
        if self.orphans > 0 {
            write!(f, ", {} unreferenced", self.orphans)?;
        }
        if self.skipped > 0 {
            write!(f, ", {} skipped", self.skipped)?;
        }
        Ok(())
    }
}

/// Import sequence filling a freshly created project from a pack archive.
///
/// Steps, in order:
///
/// 1. **Listing pack file** - open the archive and list its entries
/// 2. **Reading pack metadata and languages** - icon, title, custom languages
/// 3. **Adding custom sounds** - `sounds.json` and the files it references
/// 4. **Adding project files** - everything not claimed yet, as overrides or extras
///
/// Languages and sounds are claimed before the final sweep so they end up in
/// their own directories instead of the extras.
pub struct PopulateProjectFromPack<'a> {
    pack_file: PathBuf,
    project: &'a mut Project,
    sources: &'a dyn SourceLayering,
    archive: Option<PackArchive>,
    entries: Vec<String>,
    ledger: ExtractionLedger,
    summary: ImportSummary,
    on_complete: Option<Box<dyn FnOnce() + 'a>>,
}

impl<'a> PopulateProjectFromPack<'a> {
    /// Create the sequence for one import run.
    pub fn new(
        pack_file: impl Into<PathBuf>,
        project: &'a mut Project,
        sources: &'a dyn SourceLayering,
    ) -> Self {
        Self {
            pack_file: pack_file.into(),
            project,
            sources,
            archive: None,
            entries: Vec::new(),
            ledger: ExtractionLedger::new(),
            summary: ImportSummary::default(),
            on_complete: None,
        }
    }

    /// Set a callback invoked once after the run, whatever its outcome.
    pub fn on_complete(mut self, callback: impl FnOnce() + 'a) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Archive being imported.
    pub fn pack_file(&self) -> &Path {
        &self.pack_file
    }

    /// What has been written so far.
    pub fn summary(&self) -> &ImportSummary {
        &self.summary
    }

    /// Entries handled so far.
    pub fn ledger(&self) -> &ExtractionLedger {
        &self.ledger
    }

    /// Entry names listed from the archive.
    pub fn entry_names(&self) -> &[String] {
        &self.entries
    }

    /// Check if the archive handle is currently open.
    pub fn is_archive_open(&self) -> bool {
        self.archive.as_ref().is_some_and(PackArchive::is_open)
    }

    fn list_pack_file(&mut self) -> ImportResult<()> {
        let archive = PackArchive::open(&self.pack_file)?;
        self.entries = archive.entry_names();
        info!(entries = self.entries.len(), "Listed pack file");
        self.archive = Some(archive);
        Ok(())
    }

    fn read_metadata_and_languages(&mut self) -> ImportResult<()> {
        let archive = self.archive.as_mut().ok_or(ImportError::NotListed)?;

        if let Some(icon) = archive.find_entry(PACK_ICON) {
            let dest = self.project.root().join(PACK_ICON);
            if extract_once(archive, &mut self.ledger, &icon, &dest)? {
                self.summary.icon = true;
                debug!("Extracted pack icon");
            }
        }

        let Some(manifest) = archive.find_entry(PACK_MANIFEST) else {
            debug!("Pack has no manifest");
            return Ok(());
        };

        let json = archive.read_to_string(&manifest)?;
        let mcmeta = PackMcmeta::from_json(&json).map_err(|e| ImportError::Decode {
            entry: manifest.name.clone(),
            source: e,
        })?;
        self.ledger.mark(&manifest.name);

        if let Some(title) = mcmeta.title() {
            debug!(title = %title, "Adopted pack title");
            self.project.set_title(title.clone());
            self.summary.title = Some(title);
        }

        for (code, entry) in mcmeta.language.unwrap_or_default() {
            if code.trim().is_empty() {
                return Err(ProjectError::InvalidArgument(format!(
                    "{} declares a language with an empty code",
                    PACK_MANIFEST
                ))
                .into());
            }

            let key = AssetKey::language(&code);
            if self.sources.provides_baseline(key.key()) {
                debug!(language = %code, "Language already provided by baseline, skipping");
                continue;
            }

            let Some(lang_file) = archive.find_entry(key.path()) else {
                warn!(
                    language = %code,
                    path = key.path(),
                    "Declared language has no file in pack"
                );
                continue;
            };

            let file_name = escape_filename(&format!("{}.{}", code, LANG_SUFFIX));
            if file_name.is_empty() {
                warn!(language = %code, "Language code has no usable file name, skipping");
                continue;
            }

            let dest = self.project.custom_lang_dir()?.join(file_name);
            if extract_once(archive, &mut self.ledger, &lang_file, &dest)? {
                self.project.register_language(&code, entry)?;
                self.summary.languages.push(code);
            }
        }

        Ok(())
    }

    fn add_custom_sounds(&mut self) -> ImportResult<()> {
        let archive = self.archive.as_mut().ok_or(ImportError::NotListed)?;

        let Some(definitions) = archive.find_entry(SOUND_DEFINITIONS) else {
            debug!("Pack has no sound definitions");
            return Ok(());
        };

        let json = archive.read_to_string(&definitions)?;
        let sounds = SoundEntryMap::from_json(&json).map_err(|e| ImportError::Decode {
            entry: definitions.name.clone(),
            source: e,
        })?;
        self.ledger.mark(&definitions.name);

        let files: Vec<String> = sounds.sound_files().map(str::to_string).collect();
        info!(events = sounds.len(), files = files.len(), "Installed sound definitions");
        self.project.set_sound_map(sounds);

        for name in &files {
            let name = name.as_str();
            let key = AssetKey::sound(name);
            if self.sources.provides_baseline(key.key()) {
                debug!(sound = name, "Sound already provided by baseline, skipping");
                continue;
            }

            let Some(sound_file) = archive.find_entry(key.path()) else {
                debug!(sound = name, "Referenced sound has no file in pack");
                continue;
            };

            let relative = key
                .path()
                .strip_prefix(SOUNDS_DIR)
                .and_then(sanitize_relative_path);
            let Some(relative) = relative else {
                warn!(sound = name, "Sound name has no usable file name, skipping");
                continue;
            };

            let dest = self.project.custom_sounds_dir()?.join(relative);
            if extract_once(archive, &mut self.ledger, &sound_file, &dest)? {
                self.summary.sounds += 1;
            }
        }

        Ok(())
    }

    fn add_project_files(&mut self) -> ImportResult<()> {
        let archive = self.archive.as_mut().ok_or(ImportError::NotListed)?;

        for name in &self.entries {
            if self.ledger.contains(name) {
                continue;
            }

            let Some(entry) = archive.find_entry(name) else {
                self.ledger.mark(name);
                continue;
            };

            // Keys come from the name as stored; only destinations are sanitized.
            let key = classify(name);

            let Some(relative) = sanitize_relative_path(name) else {
                warn!(entry = %name, "Entry name has no usable path, skipping");
                self.ledger.mark(name);
                self.summary.skipped += 1;
                continue;
            };

            if self.sources.provides_baseline(key.key()) {
                let dest = self.project.root().join(&relative);
                extract_once(archive, &mut self.ledger, &entry, &dest)?;
                self.project
                    .record_source_attribution(key.key(), PROJECT_SOURCE_ID)?;
                self.summary.overrides += 1;
                debug!(entry = %name, key = key.key(), "Added baseline override");
                continue;
            }

            let typed_dest = match key.kind() {
                AssetKind::Language => Some((self.project.custom_lang_dir()?, LANG_DIR)),
                AssetKind::Sound => Some((self.project.custom_sounds_dir()?, SOUNDS_DIR)),
                AssetKind::Generic => None,
            }
            .and_then(|(dir, prefix)| {
                key.path()
                    .strip_prefix(prefix)
                    .and_then(sanitize_relative_path)
                    .map(|file| dir.join(file))
            });

            match typed_dest {
                Some(dest) => {
                    extract_once(archive, &mut self.ledger, &entry, &dest)?;
                    self.summary.orphans += 1;
                    debug!(entry = %name, kind = %key.kind(), "Added unreferenced custom asset");
                }
                None => {
                    let dest = self.project.extras_dir()?.join(&relative);
                    extract_once(archive, &mut self.ledger, &entry, &dest)?;
                    self.summary.extras += 1;
                    debug!(entry = %name, "Added extra file");
                }
            }
        }

        Ok(())
    }
}

/// Extract an entry unless the ledger already holds it, then mark it.
///
/// Returns `true` if the entry was written.
fn extract_once(
    archive: &mut PackArchive,
    ledger: &mut ExtractionLedger,
    entry: &ArchiveEntry,
    dest: &Path,
) -> ImportResult<bool> {
    if ledger.contains(&entry.name) {
        debug!(entry = %entry.name, "Entry already extracted");
        return Ok(false);
    }

    archive.extract_to(entry, dest)?;
    ledger.mark(&entry.name);
    Ok(true)
}

impl MonitoredSequence for PopulateProjectFromPack<'_> {
    fn heading(&self) -> &str {
        "Loading resource pack"
    }

    fn steps(&self) -> Vec<StepDescriptor<Self>> {
        vec![
            StepDescriptor::new("Listing pack file", Self::list_pack_file),
            StepDescriptor::new(
                "Reading pack metadata and languages",
                Self::read_metadata_and_languages,
            ),
            StepDescriptor::new("Adding custom sounds", Self::add_custom_sounds),
            StepDescriptor::new("Adding project files", Self::add_project_files),
        ]
    }

    fn before(&mut self) {
        info!("Loading resource pack into project");
        info!(pack = %self.pack_file.display(), project = %self.project.root().display(), "Pack file");
    }

    fn after(&mut self, succeeded: bool) {
        if let Some(archive) = self.archive.as_mut() {
            archive.close();
        }

        if succeeded {
            info!(summary = %self.summary, "Loading resource pack into project - done");
        } else {
            warn!(summary = %self.summary, "Loading resource pack into project - not completed");
        }

        if let Some(callback) = self.on_complete.take() {
            callback();
        }
    }
}

impl fmt::Debug for PopulateProjectFromPack<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopulateProjectFromPack")
            .field("pack_file", &self.pack_file)
            .field("project", &self.project.root())
            .field("entries", &self.entries.len())
            .field("extracted", &self.ledger.len())
            .finish()
    }
}

/// Import a pack archive into a project in one call.
///
/// Runs [`PopulateProjectFromPack`] to completion and returns its final state
/// together with what was written. The project is not saved.
pub fn import_pack(
    pack_file: impl Into<PathBuf>,
    project: &mut Project,
    sources: &dyn SourceLayering,
    observer: &dyn SequenceObserver,
) -> (SequenceState, ImportSummary) {
    let mut sequence = PopulateProjectFromPack::new(pack_file, project, sources);
    let state = SequenceRunner::new().run(&mut sequence, observer);
    (state, sequence.summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::sequence::NoopObserver;
    use crate::source::{AssetSource, SourceKind, SourceSet};
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_pack(dir: &Path, entries: &[(&str, &str)]) -> PathBuf {
        let path = dir.join("pack.zip");
        let mut writer = ZipWriter::new(File::create(&path).unwrap());
        for (name, data) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(data.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    fn baseline(keys: &[&str]) -> SourceSet {
        SourceSet::new(
            AssetSource::new("vanilla", "Vanilla", SourceKind::Baseline)
                .with_keys(keys.iter().copied()),
        )
    }

    #[test]
    fn test_step_names() {
        let temp = TempDir::new().unwrap();
        let mut project = Project::open(temp.path().join("project")).unwrap();
        let sources = baseline(&[]);
        let sequence = PopulateProjectFromPack::new("pack.zip", &mut project, &sources);

        let names: Vec<&str> = sequence.steps().iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "Listing pack file",
                "Reading pack metadata and languages",
                "Adding custom sounds",
                "Adding project files",
            ]
        );
        assert_eq!(sequence.heading(), "Loading resource pack");
    }

    #[test]
    fn test_manifest_and_sound_definitions_not_copied_to_extras() {
        let temp = TempDir::new().unwrap();
        let pack = write_pack(
            temp.path(),
            &[
                (PACK_MANIFEST, r#"{"pack": {"description": "Tiny"}}"#),
                (SOUND_DEFINITIONS, "{}"),
            ],
        );
        let mut project = Project::open(temp.path().join("project")).unwrap();
        let sources = baseline(&[]);

        let (state, summary) = import_pack(&pack, &mut project, &sources, &NoopObserver);

        assert_eq!(state, SequenceState::Succeeded);
        assert_eq!(summary.extras, 0);
        assert!(!project.root().join("extra_files/pack.mcmeta").exists());
        assert_eq!(project.title(), Some("Tiny"));
    }

    #[test]
    fn test_unreferenced_sound_goes_to_custom_sounds() {
        let temp = TempDir::new().unwrap();
        let pack = write_pack(
            temp.path(),
            &[("assets/minecraft/sounds/custom/zap.ogg", "ogg")],
        );
        let mut project = Project::open(temp.path().join("project")).unwrap();
        let sources = baseline(&[]);

        let (state, summary) = import_pack(&pack, &mut project, &sources, &NoopObserver);

        assert_eq!(state, SequenceState::Succeeded);
        assert_eq!(summary.orphans, 1);
        assert_eq!(summary.extras, 0);
        assert!(project.root().join("custom_sounds/custom/zap.ogg").is_file());
    }

    #[test]
    fn test_empty_language_code_fails_step() {
        let temp = TempDir::new().unwrap();
        let pack = write_pack(
            temp.path(),
            &[(PACK_MANIFEST, r#"{"language": {" ": {"name": "Blank"}}}"#)],
        );
        let mut project = Project::open(temp.path().join("project")).unwrap();
        let sources = baseline(&[]);

        let (state, _) = import_pack(&pack, &mut project, &sources, &NoopObserver);
        assert_eq!(state, SequenceState::Failed(1));
    }

    #[test]
    fn test_summary_display() {
        let summary = ImportSummary {
            icon: true,
            languages: vec!["fr_FR".to_string()],
            sounds: 2,
            overrides: 3,
            extras: 4,
            skipped: 1,
            ..Default::default()
        };
        assert_eq!(
            summary.to_string(),
            "1 languages, 2 sounds, 3 overrides, 4 extras, 1 skipped"
        );
        assert_eq!(summary.files_written(), 11);
    }

    #[test]
    fn test_after_closes_archive() {
        let temp = TempDir::new().unwrap();
        let pack = write_pack(temp.path(), &[("extra/readme.txt", "hello")]);
        let mut project = Project::open(temp.path().join("project")).unwrap();
        let sources = baseline(&[]);

        let mut sequence = PopulateProjectFromPack::new(&pack, &mut project, &sources);
        SequenceRunner::new().run(&mut sequence, &NoopObserver);

        assert!(!sequence.is_archive_open());
        assert_eq!(sequence.entry_names(), ["extra/readme.txt".to_string()]);
        assert!(sequence.ledger().contains("extra/readme.txt"));
        drop(sequence);

        assert_eq!(
            fs::read_to_string(project.root().join("extra_files/extra/readme.txt")).unwrap(),
            "hello"
        );
    }
}
