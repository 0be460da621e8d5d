//! Baseline asset index.
//!
//! The baseline ships an index of every object it provides, keyed by path
//! relative to the `assets/` directory:
//!
//! ```json
//! {
//!   "virtual": false,
//!   "objects": {
//!     "minecraft/lang/en_US.lang": { "hash": "…", "size": 12345 },
//!     "minecraft/sounds/ambient/cave/cave1.ogg": { "hash": "…", "size": 6789 }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{SourceError, SourceResult};

/// Prefix joined onto index object paths to form archive-relative paths.
const ASSETS_PREFIX: &str = "assets/";

/// A single object in the asset index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileObject {
    /// Content hash of the object.
    pub hash: String,
    /// Size in bytes.
    pub size: u64,
}

/// Index of the objects provided by an asset source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileObjectIndex {
    /// Whether objects are stored under their path rather than their hash.
    #[serde(rename = "virtual", default)]
    pub is_virtual: bool,

    /// Objects keyed by path relative to `assets/`.
    #[serde(default)]
    pub objects: BTreeMap<String, FileObject>,
}

impl FileObjectIndex {
    /// Parse an index from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize the index as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load an index file from disk.
    pub fn load(path: &Path) -> SourceResult<Self> {
        let json = fs::read_to_string(path).map_err(|e| SourceError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_json(&json).map_err(|e| SourceError::IndexParseFailed {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Archive-relative paths of all objects (`assets/…`).
    pub fn archive_paths(&self) -> impl Iterator<Item = String> + '_ {
        self.objects
            .keys()
            .map(|path| format!("{}{}", ASSETS_PREFIX, path.trim_start_matches('/')))
    }

    /// Number of objects in the index.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the index has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
