//! Canonical asset keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Archive directory holding language files.
pub const LANG_DIR: &str = "assets/minecraft/lang/";

/// Archive directory holding sound files.
pub const SOUNDS_DIR: &str = "assets/minecraft/sounds/";

/// Key prefix shared by all language assets.
pub const LANG_KEY_PREFIX: &str = "assets.minecraft.lang.";

/// Key prefix shared by all sound assets.
pub const SOUNDS_KEY_PREFIX: &str = "assets.minecraft.sounds.";

/// File suffix of language files (without the dot).
pub const LANG_SUFFIX: &str = "lang";

/// File suffix of sound files (without the dot).
pub const SOUND_SUFFIX: &str = "ogg";

/// Kind of asset a key refers to.
///
/// Language and sound assets have a fixed directory and suffix, so their path
/// can be rebuilt from the key alone. Everything else is generic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    /// A `.lang` file under `assets/minecraft/lang/`.
    Language,
    /// An `.ogg` file under `assets/minecraft/sounds/`.
    Sound,
    /// Any other file.
    Generic,
}

impl AssetKind {
    /// File suffix for typed kinds.
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            AssetKind::Language => Some(LANG_SUFFIX),
            AssetKind::Sound => Some(SOUND_SUFFIX),
            AssetKind::Generic => None,
        }
    }

    /// Check if the kind has a specialized project directory.
    pub fn is_typed(&self) -> bool {
        !matches!(self, AssetKind::Generic)
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Language => write!(f, "language"),
            AssetKind::Sound => write!(f, "sound"),
            AssetKind::Generic => write!(f, "generic"),
        }
    }
}

/// A classified asset: kind, canonical dotted key and archive-relative path.
///
/// For typed kinds the path is a pure function of the key. Generic keys drop
/// the file suffix, so a generic `AssetKey` keeps the path it was classified
/// from.
///
/// # Example
///
/// ```
/// use packsmith::asset::{AssetKey, AssetKind};
///
/// let lang = AssetKey::language("fr_FR");
/// assert_eq!(lang.key(), "assets.minecraft.lang.fr_FR");
/// assert_eq!(lang.path(), "assets/minecraft/lang/fr_FR.lang");
///
/// let sound = AssetKey::sound("ambient/cave/cave1");
/// assert_eq!(sound.key(), "assets.minecraft.sounds.ambient.cave.cave1");
/// assert_eq!(sound.path(), "assets/minecraft/sounds/ambient/cave/cave1.ogg");
/// assert_eq!(sound.kind(), AssetKind::Sound);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetKey {
    kind: AssetKind,
    key: String,
    path: String,
}

impl AssetKey {
    /// Key for the language file with the given code (e.g. `fr_FR`).
    pub fn language(code: &str) -> Self {
        Self {
            kind: AssetKind::Language,
            key: format!("{}{}", LANG_KEY_PREFIX, code),
            path: format!("{}{}.{}", LANG_DIR, code, LANG_SUFFIX),
        }
    }

    /// Key for a sound, named relative to the sounds directory without suffix.
    ///
    /// This is the form used by `sounds.json` (`ambient/cave/cave1`).
    pub fn sound(name: &str) -> Self {
        let name = name.replace('\\', "/");
        Self {
            kind: AssetKind::Sound,
            key: format!("{}{}", SOUNDS_KEY_PREFIX, name.replace('/', ".")),
            path: format!("{}{}.{}", SOUNDS_DIR, name, SOUND_SUFFIX),
        }
    }

    /// Rebuild a typed key from its dotted form.
    ///
    /// Returns `None` for generic keys (the suffix is not part of the key) and
    /// for keys that do not carry the prefix of their kind.
    pub fn from_key(kind: AssetKind, key: &str) -> Option<Self> {
        match kind {
            AssetKind::Language => key
                .strip_prefix(LANG_KEY_PREFIX)
                .filter(|code| !code.is_empty())
                .map(Self::language),
            AssetKind::Sound => key
                .strip_prefix(SOUNDS_KEY_PREFIX)
                .filter(|rest| !rest.is_empty())
                .map(|rest| Self::sound(&rest.replace('.', "/"))),
            AssetKind::Generic => None,
        }
    }

    /// Kind of the asset.
    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    /// Canonical dotted key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Archive-relative path, `/`-separated.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.key, self.kind)
    }
}

/// Normalize an archive-relative path: `/` separators, no leading slash.
pub fn normalize_archive_path(path: &str) -> String {
    path.replace('\\', "/").trim_start_matches('/').to_string()
}

/// Classify an archive-relative path into an [`AssetKey`].
///
/// # Examples
///
/// ```
/// use packsmith::asset::{classify, AssetKind};
///
/// let key = classify("assets/minecraft/textures/block/stone.png");
/// assert_eq!(key.kind(), AssetKind::Generic);
/// assert_eq!(key.key(), "assets.minecraft.textures.block.stone");
///
/// let key = classify("assets/minecraft/lang/de_DE.lang");
/// assert_eq!(key.kind(), AssetKind::Language);
/// ```
pub fn classify(path: &str) -> AssetKey {
    let path = normalize_archive_path(path);

    if let Some(code) = path
        .strip_prefix(LANG_DIR)
        .and_then(|rest| rest.strip_suffix(".lang"))
        .filter(|code| !code.is_empty() && !code.contains('/'))
    {
        return AssetKey::language(code);
    }

    if let Some(name) = path
        .strip_prefix(SOUNDS_DIR)
        .and_then(|rest| rest.strip_suffix(".ogg"))
        .filter(|name| !name.is_empty() && !name.ends_with('/'))
    {
        return AssetKey::sound(name);
    }

    AssetKey {
        kind: AssetKind::Generic,
        key: strip_suffix(&path).replace('/', "."),
        path,
    }
}

/// Drop the suffix of the last path component, if it has one.
///
/// Dot-files (`.mcassetsroot`) are treated as having no suffix.
fn strip_suffix(path: &str) -> &str {
    let name_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    match path[name_start..].rfind('.') {
        Some(dot) if dot > 0 => &path[..name_start + dot],
        _ => path,
    }
}
