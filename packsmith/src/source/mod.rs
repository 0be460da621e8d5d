//! Asset sources and their layering.
//!
//! A project is built on top of a stack of asset sources:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ project files                │  ← attributed as "project"
//! ├──────────────────────────────┤
//! │ library pack A               │
//! │ library pack B               │  ← insertion order = priority
//! ├──────────────────────────────┤
//! │ baseline ("vanilla")         │  ← always present
//! └──────────────────────────────┘
//! ```
//!
//! The import pipeline only reads this registry: an archive entry whose key
//! the baseline already provides is an override, anything else is an
//! addition. Pipelines take the registry as a [`SourceLayering`] trait object
//! so tests can supply a fixed in-memory set.

mod asset_source;
mod error;
mod index;
mod set;

pub use asset_source::{AssetSource, SourceKind};
pub use error::{SourceError, SourceResult};
pub use index::{FileObject, FileObjectIndex};
pub use set::{SourceLayering, SourceSet, BASELINE_SOURCE_ID, PROJECT_SOURCE_ID};
