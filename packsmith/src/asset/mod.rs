//! Asset keys and archive path classification.
//!
//! Every logical asset in a resource pack has a canonical dotted key that is
//! independent of where it is stored on disk. This module is the single source
//! of truth for converting between keys and archive-relative paths:
//!
//! ```text
//! assets/minecraft/lang/fr_FR.lang          ⇄  assets.minecraft.lang.fr_FR           (Language)
//! assets/minecraft/sounds/ambient/cave.ogg  ⇄  assets.minecraft.sounds.ambient.cave  (Sound)
//! assets/minecraft/textures/block/stone.png →  assets.minecraft.textures.block.stone (Generic)
//! ```
//!
//! Keys are always derived from the original archive name. Names taken from
//! archive content must go through [`sanitize_relative_path`] before they are
//! used as a destination on disk, and that transformation never feeds back
//! into the key.

mod key;
mod sanitize;

pub use key::{
    classify, normalize_archive_path, AssetKey, AssetKind, LANG_DIR, LANG_KEY_PREFIX, LANG_SUFFIX,
    SOUNDS_DIR, SOUNDS_KEY_PREFIX, SOUND_SUFFIX,
};
pub use sanitize::{escape_filename, sanitize_relative_path};
