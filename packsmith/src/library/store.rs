//! Directory of extracted library packs.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};

use super::error::{LibraryError, LibraryResult};
use crate::archive::PackArchive;
use crate::asset::sanitize_relative_path;
use crate::source::{AssetSource, SourceKind, SourceSet, BASELINE_SOURCE_ID, PROJECT_SOURCE_ID};

/// Characters not allowed in a library pack name.
const FORBIDDEN_NAME_CHARS: &[char] = &['/', '\\', '*', '?', '=', ':', '"', '<', '>', '|'];

/// Check that a name can be used for a library pack.
///
/// # Examples
///
/// ```
/// use packsmith::library::validate_name;
///
/// assert!(validate_name("Faithful 32x").is_ok());
/// assert!(validate_name("a/b").is_err());
/// assert!(validate_name("vanilla").is_err());
/// ```
pub fn validate_name(name: &str) -> LibraryResult<()> {
    let invalid = |reason| {
        Err(LibraryError::InvalidName {
            name: name.to_string(),
            reason,
        })
    };

    if name.trim().is_empty() {
        return invalid("name is empty");
    }
    if name != name.trim() {
        return invalid("name has leading or trailing whitespace");
    }
    if name == "." || name == ".." {
        return invalid("name is a relative directory");
    }
    if name.chars().any(|c| FORBIDDEN_NAME_CHARS.contains(&c) || c.is_control()) {
        return invalid("do not use / \\ * ? = : \" < > |");
    }
    if name == BASELINE_SOURCE_ID || name == PROJECT_SOURCE_ID {
        return invalid("name is reserved");
    }
    Ok(())
}

/// Check that `name` addresses a directory directly under the store root.
///
/// Looser than [`validate_name`] so packs with reserved names can still be
/// removed or renamed.
fn check_existing_name(name: &str) -> LibraryResult<()> {
    let mut components = Path::new(name).components();
    let single = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !single || name.contains(['/', '\\']) {
        return Err(LibraryError::InvalidName {
            name: name.to_string(),
            reason: "name is not a directory inside the library",
        });
    }
    Ok(())
}

/// Store of library packs, one directory per pack.
///
/// ```text
/// <root>/
/// ├── Faithful/
/// │   └── assets/…
/// └── Sphax/
///     └── assets/…
/// ```
#[derive(Debug, Clone)]
pub struct LibraryStore {
    root: PathBuf,
}

impl LibraryStore {
    /// Create a store over `root`.
    ///
    /// The directory is created on the first import.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of a pack.
    pub fn pack_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Check if a pack exists.
    pub fn contains(&self, name: &str) -> bool {
        check_existing_name(name).is_ok() && self.pack_dir(name).is_dir()
    }

    /// Names of all packs, sorted.
    pub fn list(&self) -> LibraryResult<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.root).map_err(|e| LibraryError::ReadFailed {
            path: self.root.clone(),
            source: e,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| LibraryError::ReadFailed {
                path: self.root.clone(),
                source: e,
            })?;

            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    /// Rename a pack.
    ///
    /// The new name is trimmed and validated. If the move fails, anything
    /// created at the new location is removed again.
    pub fn rename(&self, old_name: &str, new_name: &str) -> LibraryResult<String> {
        check_existing_name(old_name)?;
        let new_name = new_name.trim();
        validate_name(new_name)?;

        if !self.contains(old_name) {
            return Err(LibraryError::NotFound(old_name.to_string()));
        }
        if old_name == new_name {
            return Err(LibraryError::SameName(new_name.to_string()));
        }
        if self.pack_dir(new_name).exists() {
            return Err(LibraryError::AlreadyExists(new_name.to_string()));
        }

        let old_dir = self.pack_dir(old_name);
        let new_dir = self.pack_dir(new_name);

        if let Err(e) = fs::rename(&old_dir, &new_dir) {
            if new_dir.exists() {
                fs::remove_dir_all(&new_dir).ok();
            }
            return Err(LibraryError::WriteFailed {
                path: new_dir,
                source: e,
            });
        }

        info!(from = old_name, to = new_name, "Renamed library pack");
        Ok(new_name.to_string())
    }

    /// Delete a pack and all its files.
    pub fn delete(&self, name: &str) -> LibraryResult<()> {
        check_existing_name(name)?;
        if !self.contains(name) {
            return Err(LibraryError::NotFound(name.to_string()));
        }

        let dir = self.pack_dir(name);
        fs::remove_dir_all(&dir).map_err(|e| LibraryError::WriteFailed {
            path: dir.clone(),
            source: e,
        })?;

        info!(pack = name, "Deleted library pack");
        Ok(())
    }

    /// Extract a pack archive into the store under `name`.
    ///
    /// On failure the partially extracted pack is removed.
    ///
    /// # Returns
    ///
    /// The number of files extracted.
    pub fn import_pack(&self, archive_path: &Path, name: &str) -> LibraryResult<usize> {
        let name = name.trim();
        validate_name(name)?;

        if self.pack_dir(name).exists() {
            return Err(LibraryError::AlreadyExists(name.to_string()));
        }

        let mut archive = PackArchive::open(archive_path)?;
        let dir = self.pack_dir(name);
        fs::create_dir_all(&dir).map_err(|e| LibraryError::WriteFailed {
            path: dir.clone(),
            source: e,
        })?;

        let result = extract_all(&mut archive, &dir);
        archive.close();

        match result {
            Ok(count) => {
                info!(pack = name, files = count, "Imported library pack");
                Ok(count)
            }
            Err(e) => {
                fs::remove_dir_all(&dir).ok();
                Err(e)
            }
        }
    }

    /// Build the source layering: `baseline` plus every pack in the store.
    ///
    /// Packs are layered in name order. Directories named after a reserved
    /// source id are skipped.
    pub fn load_sources(&self, baseline: AssetSource) -> LibraryResult<SourceSet> {
        let mut set = SourceSet::new(baseline);

        for name in self.list()? {
            if name == BASELINE_SOURCE_ID || name == PROJECT_SOURCE_ID {
                warn!(pack = %name, "Library pack uses a reserved name, skipping");
                continue;
            }

            let source =
                AssetSource::from_directory(&name, &name, SourceKind::Library, &self.pack_dir(&name))?;
            set.add_library(source)?;
        }

        debug!(libraries = set.libraries().len(), "Loaded library sources");
        Ok(set)
    }
}

fn extract_all(archive: &mut PackArchive, dir: &Path) -> LibraryResult<usize> {
    let mut count = 0;
    for entry in archive.entries().to_vec() {
        let Some(relative) = sanitize_relative_path(&entry.name) else {
            warn!(entry = %entry.name, "Entry name has no usable path, skipping");
            continue;
        };
        archive.extract_to(&entry, &dir.join(relative))?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_pack(path: &Path, entries: &[&str]) {
        let mut writer = ZipWriter::new(File::create(path).unwrap());
        for name in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"data").unwrap();
        }
        writer.finish().unwrap();
    }

    fn store_with(temp: &TempDir, packs: &[&str]) -> LibraryStore {
        let store = LibraryStore::new(temp.path().join("library"));
        for pack in packs {
            fs::create_dir_all(store.pack_dir(pack).join("assets")).unwrap();
        }
        store
    }

    // ========================================================================
    // Name validation
    // ========================================================================

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Faithful").is_ok());
        assert!(validate_name("My Pack (1.8)").is_ok());

        for bad in ["", "   ", " padded", ".", "..", "a*b", "a=b", "a:b", "a\"b", "project"] {
            assert!(
                matches!(validate_name(bad), Err(LibraryError::InvalidName { .. })),
                "{:?} should be rejected",
                bad
            );
        }
    }

    // ========================================================================
    // Listing, renaming and deleting
    // ========================================================================

    #[test]
    fn test_list_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = LibraryStore::new(temp.path().join("nowhere"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_sorted_dirs_only() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, &["Sphax", "Faithful"]);
        fs::write(store.root().join("notes.txt"), "x").unwrap();

        assert_eq!(store.list().unwrap(), vec!["Faithful", "Sphax"]);
    }

    #[test]
    fn test_rename() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, &["Old", "Taken"]);

        assert!(matches!(
            store.rename("Old", "Taken"),
            Err(LibraryError::AlreadyExists(_))
        ));
        assert!(matches!(
            store.rename("Old", " Old "),
            Err(LibraryError::SameName(_))
        ));
        assert!(matches!(
            store.rename("Missing", "Other"),
            Err(LibraryError::NotFound(_))
        ));
        assert!(matches!(
            store.rename("Old", "a/b"),
            Err(LibraryError::InvalidName { .. })
        ));

        assert_eq!(store.rename("Old", "  New ").unwrap(), "New");
        assert_eq!(store.list().unwrap(), vec!["New", "Taken"]);
        assert!(store.pack_dir("New").join("assets").is_dir());
    }

    #[test]
    fn test_delete() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, &["Gone"]);

        store.delete("Gone").unwrap();
        assert!(store.list().unwrap().is_empty());
        assert!(matches!(store.delete("Gone"), Err(LibraryError::NotFound(_))));
    }

    #[test]
    fn test_delete_stays_inside_root() {
        let temp = TempDir::new().unwrap();
        let outside = temp.path().join("important");
        fs::create_dir_all(&outside).unwrap();
        let store = store_with(&temp, &["vanilla"]);
        let absolute = outside.display().to_string();

        for name in ["..", ".", "", "sub/..", absolute.as_str()] {
            assert!(
                matches!(store.delete(name), Err(LibraryError::InvalidName { .. })),
                "{:?} should be rejected",
                name
            );
            assert!(!store.contains(name));
        }
        assert!(outside.is_dir());
        assert!(store.root().is_dir());

        // Reserved names can still be cleaned up.
        store.delete("vanilla").unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_rename_stays_inside_root() {
        let temp = TempDir::new().unwrap();
        let outside = temp.path().join("important");
        fs::create_dir_all(&outside).unwrap();
        let store = store_with(&temp, &["Pack"]);

        let result = store.rename(&outside.display().to_string(), "Stolen");
        assert!(matches!(result, Err(LibraryError::InvalidName { .. })));
        assert!(matches!(
            store.rename("..", "Stolen"),
            Err(LibraryError::InvalidName { .. })
        ));
        assert!(outside.is_dir());
        assert_eq!(store.list().unwrap(), vec!["Pack"]);
    }

    // ========================================================================
    // Importing and layering
    // ========================================================================

    #[test]
    fn test_import_pack() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("pack.zip");
        write_pack(
            &archive,
            &[
                "pack.mcmeta",
                "assets/minecraft/textures/block/stone.png",
                "../escape.txt",
            ],
        );
        let store = LibraryStore::new(temp.path().join("library"));

        let count = store.import_pack(&archive, "Faithful").unwrap();

        assert_eq!(count, 3);
        let dir = store.pack_dir("Faithful");
        assert!(dir.join("assets/minecraft/textures/block/stone.png").is_file());
        assert!(dir.join("escape.txt").is_file());
        assert!(!temp.path().join("library/escape.txt").exists());

        assert!(matches!(
            store.import_pack(&archive, "Faithful"),
            Err(LibraryError::AlreadyExists(_))
        ));
    }

    #[test]
    fn test_import_bad_archive_leaves_nothing() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("broken.zip");
        fs::write(&archive, b"not a zip").unwrap();
        let store = LibraryStore::new(temp.path().join("library"));

        let result = store.import_pack(&archive, "Broken");
        assert!(matches!(result, Err(LibraryError::Archive(_))));
        assert!(!store.contains("Broken"));
    }

    #[test]
    fn test_load_sources() {
        let temp = TempDir::new().unwrap();
        let store = LibraryStore::new(temp.path().join("library"));
        let stone = store.pack_dir("Faithful").join("assets/minecraft/textures/block");
        fs::create_dir_all(&stone).unwrap();
        fs::write(stone.join("stone.png"), "png").unwrap();
        fs::create_dir_all(store.pack_dir("vanilla")).unwrap();

        let baseline = AssetSource::new(BASELINE_SOURCE_ID, "Vanilla", SourceKind::Baseline);
        let set = store.load_sources(baseline).unwrap();

        assert_eq!(set.library_ids(), vec!["Faithful"]);
        assert_eq!(
            set.resolve("assets.minecraft.textures.block.stone"),
            Some("Faithful")
        );
    }
}
