//! Record of archive entries already handled during one import.

use std::collections::HashSet;

/// Names of archive entries already materialized by the current run.
///
/// The ledger only grows. Every step consults it before extracting, so an
/// entry claimed by an earlier step is never written twice.
#[derive(Debug, Clone, Default)]
pub struct ExtractionLedger {
    names: HashSet<String>,
}

impl ExtractionLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an entry as handled.
    ///
    /// Returns `false` if it was already marked.
    pub fn mark(&mut self, name: &str) -> bool {
        self.names.insert(name.to_string())
    }

    /// Check if an entry was already handled.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of handled entries.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if nothing was handled yet.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Handled entry names, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
