//! A single asset source (baseline or library pack).

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{SourceError, SourceResult};
use super::index::FileObjectIndex;
use crate::asset::classify;

/// Role of a source in the layering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    /// The reference asset set every project is compared against.
    Baseline,
    /// A reusable pack from the library.
    Library,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Baseline => write!(f, "baseline"),
            SourceKind::Library => write!(f, "library"),
        }
    }
}

/// A named set of asset keys.
///
/// Membership queries are pure lookups; a source is never modified while an
/// import reads it.
#[derive(Debug, Clone)]
pub struct AssetSource {
    /// Unique id used for attribution (e.g. `vanilla`, a library pack name).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Role in the layering.
    pub kind: SourceKind,
    keys: HashSet<String>,
}

impl AssetSource {
    /// Create an empty source.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            keys: HashSet::new(),
        }
    }

    /// Add asset keys to the source.
    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Add a single asset key.
    pub fn insert_key(&mut self, key: impl Into<String>) {
        self.keys.insert(key.into());
    }

    /// Build a source from an asset index.
    ///
    /// Every object path is classified to its canonical key.
    pub fn from_index(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: SourceKind,
        index: &FileObjectIndex,
    ) -> Self {
        let source = Self::new(id, name, kind)
            .with_keys(index.archive_paths().map(|path| classify(&path).key().to_string()));
        debug!(source = %source.id, keys = source.len(), "Loaded source from index");
        source
    }

    /// Build a source by scanning an extracted pack directory.
    ///
    /// Every regular file below `dir` is classified by its path relative to
    /// `dir`.
    pub fn from_directory(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: SourceKind,
        dir: &Path,
    ) -> SourceResult<Self> {
        let mut source = Self::new(id, name, kind);
        let mut relative = Vec::new();
        collect_files(dir, "", &mut relative)?;

        for path in relative {
            source.insert_key(classify(&path).key());
        }

        debug!(source = %source.id, dir = %dir.display(), keys = source.len(), "Scanned source directory");
        Ok(source)
    }

    /// Check if the source provides an asset under this exact key.
    pub fn provides(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// All keys provided by the source, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if the source provides nothing.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Collect `/`-separated relative paths of all files below `dir`.
fn collect_files(dir: &Path, prefix: &str, out: &mut Vec<String>) -> SourceResult<()> {
    let entries = fs::read_dir(dir).map_err(|e| SourceError::ReadFailed {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        let relative = format!("{}{}", prefix, name);

        if path.is_dir() {
            collect_files(&path, &format!("{}/", relative), out)?;
        } else if path.is_file() {
            out.push(relative);
        }
    }

    Ok(())
}
