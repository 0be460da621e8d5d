//! Resource pack projects.
//!
//! A [`Project`] is the mutable destination of an import: a directory tree
//! plus metadata (title, custom languages, custom sound events and per-key
//! source attribution). Projects are created by the caller; the import
//! pipeline only fills them in.

mod error;
mod meta;
#[allow(clippy::module_inception)]
mod project;

pub use error::{ProjectError, ProjectResult};
pub use meta::{LangEntry, PackInfo, PackMcmeta, SoundEntry, SoundEntryMap, SoundFile, SoundRef};
pub use project::{Project, CUSTOM_LANG_DIR, CUSTOM_SOUNDS_DIR, EXTRAS_DIR, PROJECT_FILE};
