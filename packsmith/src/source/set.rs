//! Ordered set of asset sources.

use tracing::debug;

use super::asset_source::{AssetSource, SourceKind};
use super::error::{SourceError, SourceResult};

/// Id of the baseline source.
pub const BASELINE_SOURCE_ID: &str = "vanilla";

/// Id attributed to files supplied by the project itself.
pub const PROJECT_SOURCE_ID: &str = "project";

/// Read-only view of the source layering consulted during an import.
pub trait SourceLayering {
    /// Check if the baseline source ships an asset under this exact key.
    fn provides_baseline(&self, key: &str) -> bool;

    /// Check if the named source ships an asset under this exact key.
    ///
    /// Unknown source ids provide nothing.
    fn provides(&self, source_id: &str, key: &str) -> bool;
}

/// The baseline source plus library sources in priority order.
///
/// # Example
///
/// ```
/// use packsmith::source::{AssetSource, SourceKind, SourceLayering, SourceSet};
///
/// let baseline = AssetSource::new("vanilla", "Vanilla", SourceKind::Baseline)
///     .with_keys(["assets.minecraft.textures.block.stone"]);
/// let mut set = SourceSet::new(baseline);
/// set.add_library(
///     AssetSource::new("faithful", "Faithful", SourceKind::Library)
///         .with_keys(["assets.minecraft.textures.block.stone"]),
/// )
/// .unwrap();
///
/// assert!(set.provides_baseline("assets.minecraft.textures.block.stone"));
/// assert_eq!(set.resolve("assets.minecraft.textures.block.stone"), Some("faithful"));
/// ```
#[derive(Debug, Clone)]
pub struct SourceSet {
    baseline: AssetSource,
    libraries: Vec<AssetSource>,
}

impl SourceSet {
    /// Create a set holding only the baseline.
    pub fn new(baseline: AssetSource) -> Self {
        Self {
            baseline,
            libraries: Vec::new(),
        }
    }

    /// Append a library source at the lowest library priority.
    ///
    /// Rejects ids that are reserved or already present.
    pub fn add_library(&mut self, mut source: AssetSource) -> SourceResult<()> {
        if source.id == BASELINE_SOURCE_ID || source.id == PROJECT_SOURCE_ID {
            return Err(SourceError::ReservedId(source.id));
        }
        if source.id == self.baseline.id || self.get(&source.id).is_some() {
            return Err(SourceError::DuplicateId(source.id));
        }

        source.kind = SourceKind::Library;
        debug!(source = %source.id, keys = source.len(), "Registered library source");
        self.libraries.push(source);
        Ok(())
    }

    /// The baseline source.
    pub fn baseline(&self) -> &AssetSource {
        &self.baseline
    }

    /// Library sources in priority order.
    pub fn libraries(&self) -> &[AssetSource] {
        &self.libraries
    }

    /// Ids of the library sources in priority order.
    pub fn library_ids(&self) -> Vec<&str> {
        self.libraries.iter().map(|s| s.id.as_str()).collect()
    }

    /// Look up any source by id.
    pub fn get(&self, id: &str) -> Option<&AssetSource> {
        if self.baseline.id == id {
            return Some(&self.baseline);
        }
        self.libraries.iter().find(|s| s.id == id)
    }

    /// Id of the highest-priority source providing a key.
    ///
    /// Libraries win over the baseline, earlier libraries over later ones.
    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.libraries
            .iter()
            .chain(std::iter::once(&self.baseline))
            .find(|s| s.provides(key))
            .map(|s| s.id.as_str())
    }

    /// Total number of sources, baseline included.
    pub fn len(&self) -> usize {
        self.libraries.len() + 1
    }

    /// Always false; a set holds at least the baseline.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl SourceLayering for SourceSet {
    fn provides_baseline(&self, key: &str) -> bool {
        self.baseline.provides(key)
    }

    fn provides(&self, source_id: &str, key: &str) -> bool {
        self.get(source_id).is_some_and(|s| s.provides(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> AssetSource {
        AssetSource::new(BASELINE_SOURCE_ID, "Vanilla", SourceKind::Baseline)
            .with_keys(["assets.minecraft.lang.en_US", "assets.minecraft.textures.block.stone"])
    }

    fn library(id: &str, keys: &[&str]) -> AssetSource {
        AssetSource::new(id, id, SourceKind::Library).with_keys(keys.iter().copied())
    }

    #[test]
    fn test_provides_baseline() {
        let set = SourceSet::new(baseline());
        assert!(set.provides_baseline("assets.minecraft.lang.en_US"));
        assert!(!set.provides_baseline("assets.minecraft.lang.fr_FR"));
    }

    #[test]
    fn test_provides_by_id() {
        let mut set = SourceSet::new(baseline());
        set.add_library(library("hd", &["assets.minecraft.textures.block.dirt"]))
            .unwrap();

        assert!(set.provides("hd", "assets.minecraft.textures.block.dirt"));
        assert!(!set.provides(BASELINE_SOURCE_ID, "assets.minecraft.textures.block.dirt"));
        assert!(!set.provides("unknown", "assets.minecraft.textures.block.dirt"));
    }

    #[test]
    fn test_library_does_not_count_as_baseline() {
        let mut set = SourceSet::new(baseline());
        set.add_library(library("hd", &["assets.minecraft.lang.fr_FR"]))
            .unwrap();
        assert!(!set.provides_baseline("assets.minecraft.lang.fr_FR"));
    }

    #[test]
    fn test_resolve_priority() {
        let mut set = SourceSet::new(baseline());
        set.add_library(library("first", &["assets.minecraft.textures.block.stone"]))
            .unwrap();
        set.add_library(library("second", &["assets.minecraft.textures.block.stone"]))
            .unwrap();

        assert_eq!(set.resolve("assets.minecraft.textures.block.stone"), Some("first"));
        assert_eq!(set.resolve("assets.minecraft.lang.en_US"), Some(BASELINE_SOURCE_ID));
        assert_eq!(set.resolve("nothing"), None);
        assert_eq!(set.library_ids(), vec!["first", "second"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_add_library_rejects_reserved_and_duplicates() {
        let mut set = SourceSet::new(baseline());
        assert!(matches!(
            set.add_library(library(PROJECT_SOURCE_ID, &[])),
            Err(SourceError::ReservedId(_))
        ));
        assert!(matches!(
            set.add_library(library(BASELINE_SOURCE_ID, &[])),
            Err(SourceError::ReservedId(_))
        ));

        set.add_library(library("hd", &[])).unwrap();
        assert!(matches!(
            set.add_library(library("hd", &[])),
            Err(SourceError::DuplicateId(_))
        ));
    }
}
