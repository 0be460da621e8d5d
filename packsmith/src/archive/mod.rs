//! Read-only access to pack archives.
//!
//! A [`PackArchive`] is a scoped handle over a zip file. The entry list is read
//! once when the archive is opened and stays fixed for the lifetime of the
//! handle; directory entries are not listed.
//!
//! # Example
//!
//! ```ignore
//! use packsmith::archive::PackArchive;
//!
//! let mut archive = PackArchive::open("MyPack.zip")?;
//! if let Some(entry) = archive.find_entry("pack.mcmeta") {
//!     let json = archive.read_to_string(&entry)?;
//! }
//! archive.close();
//! ```

mod error;
mod reader;

pub use error::{ArchiveError, ArchiveResult};
pub use reader::{ArchiveEntry, PackArchive};
