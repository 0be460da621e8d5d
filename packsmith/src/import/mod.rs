//! Import pipeline.
//!
//! Populates a [`Project`](crate::project::Project) from a resource pack
//! archive as a monitored sequence of named steps. Every archive entry is
//! classified against the source layering and materialized exactly once:
//!
//! | Entry                                   | Destination                  |
//! |-----------------------------------------|------------------------------|
//! | `pack.png`                              | project root                 |
//! | language declared in `pack.mcmeta`      | `custom_languages/<code>.lang` |
//! | sound referenced by `sounds.json`       | `custom_sounds/<name>.ogg`   |
//! | key provided by the baseline            | project root (override)      |
//! | anything else                           | `extra_files/`               |
//!
//! Step errors are caught at the step boundary, logged and turned into a
//! [`SequenceState::Failed`] with the index of the failing step. Files written
//! before a failure are kept.
//!
//! # Example
//!
//! ```ignore
//! use packsmith::import::{import_pack, NoopObserver};
//!
//! let (state, summary) = import_pack("MyPack.zip", &mut project, &sources, &NoopObserver);
//! if state.is_success() {
//!     project.save()?;
//! }
//! ```

mod error;
mod ledger;
mod populate;
mod sequence;

pub use error::{ErrorKind, ImportError, ImportResult};
pub use ledger::ExtractionLedger;
pub use populate::{
    import_pack, ImportSummary, PopulateProjectFromPack, PACK_ICON, PACK_MANIFEST,
    SOUND_DEFINITIONS,
};
pub use sequence::{
    MonitoredSequence, NoopObserver, SequenceObserver, SequenceRunner, SequenceState,
    StepAction, StepDescriptor,
};
