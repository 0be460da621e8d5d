//! The project an import populates.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{ProjectError, ProjectResult};
use super::meta::{LangEntry, SoundEntryMap};

/// Project metadata file inside the project root.
pub const PROJECT_FILE: &str = "project.json";

/// Directory for custom language files.
pub const CUSTOM_LANG_DIR: &str = "custom_languages";

/// Directory for custom sound files.
pub const CUSTOM_SOUNDS_DIR: &str = "custom_sounds";

/// Directory for unmanaged extra files.
pub const EXTRAS_DIR: &str = "extra_files";

/// Persisted part of a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct ProjectManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default)]
    languages: BTreeMap<String, LangEntry>,
    #[serde(default)]
    sounds: SoundEntryMap,
    /// Asset key → id of the source supplying it.
    #[serde(default)]
    sources: BTreeMap<String, String>,
}

/// A resource pack project rooted in a directory.
///
/// ```text
/// <root>/
/// ├── project.json
/// ├── pack.png
/// ├── assets/…              ← overrides of baseline assets
/// ├── custom_languages/     ← <code>.lang
/// ├── custom_sounds/        ← <name>.ogg
/// └── extra_files/          ← everything else, verbatim
/// ```
///
/// The project is not safe for concurrent mutation; callers run at most one
/// import per project at a time.
#[derive(Debug)]
pub struct Project {
    root: PathBuf,
    manifest: ProjectManifest,
}

impl Project {
    /// Open the project at `root`, creating the directory if needed.
    ///
    /// Existing metadata is loaded from `project.json` when present.
    pub fn open(root: impl AsRef<Path>) -> ProjectResult<Self> {
        let root = root.as_ref();
        fs::create_dir_all(root).map_err(|e| ProjectError::CreateDirFailed {
            path: root.to_path_buf(),
            source: e,
        })?;

        let root = root.canonicalize().map_err(|e| ProjectError::ReadFailed {
            path: root.to_path_buf(),
            source: e,
        })?;

        let file = root.join(PROJECT_FILE);
        let manifest = if file.is_file() {
            let json = fs::read_to_string(&file).map_err(|e| ProjectError::ReadFailed {
                path: file.clone(),
                source: e,
            })?;
            serde_json::from_str(&json).map_err(|e| ProjectError::ParseFailed {
                path: file.clone(),
                source: e,
            })?
        } else {
            ProjectManifest::default()
        };

        debug!(root = %root.display(), "Opened project");
        Ok(Self { root, manifest })
    }

    /// Write the project metadata to `project.json`.
    pub fn save(&self) -> ProjectResult<()> {
        let file = self.root.join(PROJECT_FILE);
        let json =
            serde_json::to_string_pretty(&self.manifest).map_err(ProjectError::SerializeFailed)?;

        fs::write(&file, json).map_err(|e| ProjectError::WriteFailed {
            path: file.clone(),
            source: e,
        })?;

        debug!(file = %file.display(), "Saved project");
        Ok(())
    }

    /// Absolute project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Project title.
    pub fn title(&self) -> Option<&str> {
        self.manifest.title.as_deref()
    }

    /// Set the project title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.manifest.title = Some(title.into());
    }

    /// Custom languages keyed by code.
    pub fn languages(&self) -> &BTreeMap<String, LangEntry> {
        &self.manifest.languages
    }

    /// Register a custom language.
    ///
    /// Fails with `InvalidArgument` on an empty or blank code.
    pub fn register_language(&mut self, code: &str, entry: LangEntry) -> ProjectResult<()> {
        if code.trim().is_empty() {
            return Err(ProjectError::InvalidArgument(
                "language code must not be empty".to_string(),
            ));
        }
        self.manifest.languages.insert(code.to_string(), entry);
        Ok(())
    }

    /// Custom sound events.
    pub fn sound_map(&self) -> &SoundEntryMap {
        &self.manifest.sounds
    }

    /// Replace the custom sound events wholesale.
    pub fn set_sound_map(&mut self, sounds: SoundEntryMap) {
        self.manifest.sounds = sounds;
    }

    /// Asset key → source id attribution map.
    pub fn source_attribution(&self) -> &BTreeMap<String, String> {
        &self.manifest.sources
    }

    /// Source attributed to an asset key.
    pub fn source_for(&self, key: &str) -> Option<&str> {
        self.manifest.sources.get(key).map(String::as_str)
    }

    /// Record which source supplies an asset key.
    ///
    /// Fails with `InvalidArgument` if either value is empty.
    pub fn record_source_attribution(&mut self, key: &str, source_id: &str) -> ProjectResult<()> {
        if key.is_empty() {
            return Err(ProjectError::InvalidArgument(
                "asset key must not be empty".to_string(),
            ));
        }
        if source_id.is_empty() {
            return Err(ProjectError::InvalidArgument(format!(
                "source id for {} must not be empty",
                key
            )));
        }
        self.manifest
            .sources
            .insert(key.to_string(), source_id.to_string());
        Ok(())
    }

    /// Directory for custom language files, created on first access.
    pub fn custom_lang_dir(&self) -> ProjectResult<PathBuf> {
        self.ensure_dir(CUSTOM_LANG_DIR)
    }

    /// Directory for custom sound files, created on first access.
    pub fn custom_sounds_dir(&self) -> ProjectResult<PathBuf> {
        self.ensure_dir(CUSTOM_SOUNDS_DIR)
    }

    /// Directory for unmanaged extra files, created on first access.
    pub fn extras_dir(&self) -> ProjectResult<PathBuf> {
        self.ensure_dir(EXTRAS_DIR)
    }

    fn ensure_dir(&self, name: &str) -> ProjectResult<PathBuf> {
        let dir = self.root.join(name);
        fs::create_dir_all(&dir).map_err(|e| ProjectError::CreateDirFailed {
            path: dir.clone(),
            source: e,
        })?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::meta::{SoundEntry, SoundRef};
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("projects/demo");

        let project = Project::open(&root).unwrap();
        assert!(root.is_dir());
        assert!(project.root().is_absolute());
        assert_eq!(project.title(), None);
        assert!(project.languages().is_empty());
    }

    #[test]
    fn test_dirs_created_lazily() {
        let temp = TempDir::new().unwrap();
        let project = Project::open(temp.path()).unwrap();

        assert!(!temp.path().join(CUSTOM_LANG_DIR).exists());
        let dir = project.custom_lang_dir().unwrap();
        assert!(dir.is_dir());
        assert!(dir.is_absolute());
        assert!(dir.ends_with(CUSTOM_LANG_DIR));

        assert!(project.custom_sounds_dir().unwrap().is_dir());
        assert!(project.extras_dir().unwrap().is_dir());
    }

    #[test]
    fn test_register_language_rejects_empty_code() {
        let temp = TempDir::new().unwrap();
        let mut project = Project::open(temp.path()).unwrap();

        let result = project.register_language("  ", LangEntry::default());
        assert!(matches!(result, Err(ProjectError::InvalidArgument(_))));

        project
            .register_language("fr_FR", LangEntry::default())
            .unwrap();
        assert!(project.languages().contains_key("fr_FR"));
    }

    #[test]
    fn test_record_source_attribution() {
        let temp = TempDir::new().unwrap();
        let mut project = Project::open(temp.path()).unwrap();

        project
            .record_source_attribution("assets.minecraft.textures.block.stone", "project")
            .unwrap();
        assert_eq!(
            project.source_for("assets.minecraft.textures.block.stone"),
            Some("project")
        );

        assert!(project.record_source_attribution("", "project").is_err());
        assert!(project.record_source_attribution("key", "").is_err());
    }

    #[test]
    fn test_save_and_reopen() {
        let temp = TempDir::new().unwrap();
        let mut project = Project::open(temp.path()).unwrap();
        project.set_title("My Pack");
        project
            .register_language(
                "fr_FR",
                LangEntry {
                    name: "Français".to_string(),
                    region: "France".to_string(),
                    bidirectional: false,
                },
            )
            .unwrap();
        let mut sounds = SoundEntryMap::new();
        sounds.insert(
            "custom.boom",
            SoundEntry {
                sounds: vec![SoundRef::Name("custom/boom".to_string())],
                ..Default::default()
            },
        );
        project.set_sound_map(sounds.clone());
        project.record_source_attribution("pack", "project").unwrap();
        project.save().unwrap();

        let reopened = Project::open(temp.path()).unwrap();
        assert_eq!(reopened.title(), Some("My Pack"));
        assert_eq!(reopened.languages()["fr_FR"].name, "Français");
        assert_eq!(reopened.sound_map(), &sounds);
        assert_eq!(reopened.source_for("pack"), Some("project"));
    }

    #[test]
    fn test_open_rejects_corrupt_project_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_FILE), "{ broken").unwrap();

        let result = Project::open(temp.path());
        assert!(matches!(result, Err(ProjectError::ParseFailed { .. })));
    }
}
