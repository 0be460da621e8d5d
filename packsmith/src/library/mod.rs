//! Library of reusable resource packs.
//!
//! Library packs are stored extracted, one directory per pack, and are layered
//! over the baseline as asset sources. The store renames, deletes and imports
//! packs; it does not touch projects.

mod error;
mod store;

pub use error::{LibraryError, LibraryResult};
pub use store::{validate_name, LibraryStore};
