//! Terminal UI helpers.

pub mod progress;

pub use progress::{ChannelObserver, ImportProgress, SequenceEvent};
