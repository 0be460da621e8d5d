//! Zip-backed pack archive handle.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::ZipArchive;

use super::error::{ArchiveError, ArchiveResult};

/// Upper bound on the buffer reserved up front when reading an entry.
const READ_PREALLOC_LIMIT: u64 = 64 * 1024;

/// A file entry listed from an archive.
///
/// Entries are plain descriptors; content is read through the
/// [`PackArchive`] that listed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Archive-relative name, exactly as stored in the archive.
    pub name: String,
    /// Uncompressed size in bytes.
    pub size: u64,
    /// Position of the entry in the zip central directory.
    index: usize,
}

/// An open pack archive.
///
/// The underlying file is released by [`PackArchive::close`] or when the
/// handle is dropped, whichever happens first.
pub struct PackArchive {
    path: PathBuf,
    zip: Option<ZipArchive<File>>,
    entries: Vec<ArchiveEntry>,
    by_name: HashMap<String, usize>,
}

impl PackArchive {
    /// Open an archive and list its file entries.
    ///
    /// Fails if the file cannot be read or is not a zip archive.
    pub fn open(path: impl AsRef<Path>) -> ArchiveResult<Self> {
        let path = path.as_ref().to_path_buf();

        let file = File::open(&path).map_err(|e| ArchiveError::Open {
            path: path.clone(),
            source: e,
        })?;

        let mut zip = ZipArchive::new(file).map_err(|e| ArchiveError::Invalid {
            path: path.clone(),
            source: e,
        })?;

        let mut entries = Vec::with_capacity(zip.len());
        let mut by_name = HashMap::with_capacity(zip.len());

        for index in 0..zip.len() {
            let file = zip.by_index_raw(index).map_err(|e| ArchiveError::Invalid {
                path: path.clone(),
                source: e,
            })?;

            if file.is_dir() {
                continue;
            }

            let name = file.name().to_string();
            if by_name.contains_key(&name) {
                debug!(entry = %name, "Ignoring duplicate archive entry");
                continue;
            }

            by_name.insert(name.clone(), entries.len());
            entries.push(ArchiveEntry {
                name,
                size: file.size(),
                index,
            });
        }

        debug!(archive = %path.display(), entries = entries.len(), "Opened archive");

        Ok(Self {
            path,
            zip: Some(zip),
            entries,
            by_name,
        })
    }

    /// Path of the archive file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All file entries, each exactly once.
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    /// Names of all file entries, each exactly once.
    pub fn entry_names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    /// Number of file entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the archive has no file entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by its exact archive name.
    pub fn find_entry(&self, name: &str) -> Option<ArchiveEntry> {
        self.by_name.get(name).map(|&i| self.entries[i].clone())
    }

    /// Check if the handle is still open.
    pub fn is_open(&self) -> bool {
        self.zip.is_some()
    }

    /// Extract an entry to a file, creating parent directories as needed.
    ///
    /// An existing file at `dest` is overwritten.
    ///
    /// # Returns
    ///
    /// The number of bytes written.
    pub fn extract_to(&mut self, entry: &ArchiveEntry, dest: &Path) -> ArchiveResult<u64> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| ArchiveError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let zip = self.zip_mut()?;
        let mut file = zip
            .by_index(entry.index)
            .map_err(|e| ArchiveError::ReadEntry {
                name: entry.name.clone(),
                source: e,
            })?;

        let mut out = File::create(dest).map_err(|e| ArchiveError::Write {
            path: dest.to_path_buf(),
            source: e,
        })?;

        let written = io::copy(&mut file, &mut out).map_err(|e| ArchiveError::Write {
            path: dest.to_path_buf(),
            source: e,
        })?;

        debug!(entry = %entry.name, dest = %dest.display(), bytes = written, "Extracted entry");
        Ok(written)
    }

    /// Read an entry's raw bytes.
    pub fn read_bytes(&mut self, entry: &ArchiveEntry) -> ArchiveResult<Vec<u8>> {
        let zip = self.zip_mut()?;
        let mut file = zip
            .by_index(entry.index)
            .map_err(|e| ArchiveError::ReadEntry {
                name: entry.name.clone(),
                source: e,
            })?;

        // The declared size comes from the archive and is not trusted.
        let mut bytes = Vec::with_capacity(entry.size.min(READ_PREALLOC_LIMIT) as usize);
        file.read_to_end(&mut bytes)
            .map_err(|e| ArchiveError::ReadEntry {
                name: entry.name.clone(),
                source: e.into(),
            })?;

        Ok(bytes)
    }

    /// Read an entry as UTF-8 text.
    ///
    /// A leading byte order mark is dropped.
    pub fn read_to_string(&mut self, entry: &ArchiveEntry) -> ArchiveResult<String> {
        let bytes = self.read_bytes(entry)?;
        let text = String::from_utf8(bytes).map_err(|e| ArchiveError::Decode {
            name: entry.name.clone(),
            reason: e.to_string(),
        })?;

        match text.strip_prefix('\u{feff}') {
            Some(stripped) => Ok(stripped.to_string()),
            None => Ok(text),
        }
    }

    /// Release the underlying file.
    ///
    /// Idempotent; entry metadata stays available after closing.
    pub fn close(&mut self) {
        if self.zip.take().is_some() {
            debug!(archive = %self.path.display(), "Closed archive");
        }
    }

    fn zip_mut(&mut self) -> ArchiveResult<&mut ZipArchive<File>> {
        let path = &self.path;
        self.zip.as_mut().ok_or_else(|| ArchiveError::Closed { path: path.clone() })
    }
}

impl std::fmt::Debug for PackArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackArchive")
            .field("path", &self.path)
            .field("entries", &self.entries.len())
            .field("open", &self.zip.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_zip(dir: &Path, entries: &[(&str, &[u8])]) -> PathBuf {
        let path = dir.join("pack.zip");
        let mut writer = ZipWriter::new(File::create(&path).unwrap());
        writer
            .add_directory("assets/", SimpleFileOptions::default())
            .unwrap();
        for (name, data) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    #[test]
    fn test_open_lists_files_only() {
        let temp = TempDir::new().unwrap();
        let path = write_zip(
            temp.path(),
            &[
                ("pack.mcmeta", "{}".as_bytes()),
                ("assets/readme.txt", "hi".as_bytes()),
            ],
        );

        let archive = PackArchive::open(&path).unwrap();
        let mut names = archive.entry_names();
        names.sort();
        assert_eq!(names, vec!["assets/readme.txt", "pack.mcmeta"]);
        assert_eq!(archive.len(), 2);
        assert!(archive.is_open());
    }

    #[test]
    fn test_open_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = PackArchive::open(temp.path().join("missing.zip"));
        assert!(matches!(result, Err(ArchiveError::Open { .. })));
    }

    #[test]
    fn test_open_not_a_zip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bogus.zip");
        fs::write(&path, b"this is not a zip file").unwrap();

        let result = PackArchive::open(&path);
        assert!(matches!(result, Err(ArchiveError::Invalid { .. })));
    }

    #[test]
    fn test_find_entry_absent_is_none() {
        let temp = TempDir::new().unwrap();
        let path = write_zip(temp.path(), &[("pack.png", "png".as_bytes())]);

        let archive = PackArchive::open(&path).unwrap();
        assert!(archive.find_entry("pack.png").is_some());
        assert!(archive.find_entry("pack.mcmeta").is_none());
        assert!(archive.find_entry("assets/").is_none());
    }

    #[test]
    fn test_extract_creates_parents_and_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = write_zip(temp.path(), &[("a/b.txt", "fresh".as_bytes())]);
        let dest = temp.path().join("out/deep/b.txt");

        let mut archive = PackArchive::open(&path).unwrap();
        let entry = archive.find_entry("a/b.txt").unwrap();

        assert_eq!(archive.extract_to(&entry, &dest).unwrap(), 5);
        fs::write(&dest, b"stale content").unwrap();
        archive.extract_to(&entry, &dest).unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "fresh");
    }

    #[test]
    fn test_read_to_string_strips_bom() {
        let temp = TempDir::new().unwrap();
        let path = write_zip(temp.path(), &[("pack.mcmeta", "\u{feff}{\"a\":1}".as_bytes())]);

        let mut archive = PackArchive::open(&path).unwrap();
        let entry = archive.find_entry("pack.mcmeta").unwrap();
        assert_eq!(archive.read_to_string(&entry).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_read_ignores_declared_size() {
        let temp = TempDir::new().unwrap();
        let path = write_zip(temp.path(), &[("sounds.json", "{}".as_bytes())]);

        let mut archive = PackArchive::open(&path).unwrap();
        let mut entry = archive.find_entry("sounds.json").unwrap();
        entry.size = 1 << 40;

        assert_eq!(archive.read_bytes(&entry).unwrap(), b"{}");
    }

    #[test]
    fn test_read_to_string_invalid_utf8() {
        let temp = TempDir::new().unwrap();
        let path = write_zip(temp.path(), &[("bad.txt", [0xffu8, 0xfe, 0x00, 0xc3].as_slice())]);

        let mut archive = PackArchive::open(&path).unwrap();
        let entry = archive.find_entry("bad.txt").unwrap();
        let result = archive.read_to_string(&entry);
        assert!(matches!(result, Err(ArchiveError::Decode { .. })));
    }

    #[test]
    fn test_close_is_idempotent_and_blocks_reads() {
        let temp = TempDir::new().unwrap();
        let path = write_zip(temp.path(), &[("x.txt", "x".as_bytes())]);

        let mut archive = PackArchive::open(&path).unwrap();
        let entry = archive.find_entry("x.txt").unwrap();
        archive.close();
        archive.close();

        assert!(!archive.is_open());
        assert_eq!(archive.len(), 1);
        assert!(matches!(
            archive.read_bytes(&entry),
            Err(ArchiveError::Closed { .. })
        ));
    }
}
