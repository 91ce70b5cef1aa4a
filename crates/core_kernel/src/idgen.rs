//! Natural identifier allocation
//!
//! Every "create" operation allocates a fresh natural identifier for the new
//! record. Identifiers must be unique across all records of a class for the
//! life of the ledger and cheap to compute without coordination, so the
//! default source issues time-ordered UUID v7 values. A deterministic
//! sequence source exists for tests and fixtures that need stable keys.

use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

use crate::class::EntityClass;

/// Source of natural identifiers for newly created records.
pub trait IdSource: Send + Sync {
    /// Allocates a fresh identifier for a record of the given class.
    fn allocate(&self, class: EntityClass) -> String;
}

/// Production identifier source backed by UUID v7.
///
/// Time-ordered and collision-free without any coordination between
/// concurrent invocations.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdSource;

impl UuidIdSource {
    pub fn new() -> Self {
        Self
    }
}

impl IdSource for UuidIdSource {
    fn allocate(&self, _class: EntityClass) -> String {
        Uuid::now_v7().to_string()
    }
}

/// Deterministic identifier source: a per-class counter.
///
/// Only suitable for tests and demo fixtures; counters reset with the
/// process.
#[derive(Debug)]
pub struct SequenceIdSource {
    start: u64,
    counters: Mutex<HashMap<EntityClass, u64>>,
}

impl SequenceIdSource {
    /// Creates a source whose first identifier per class is `start`.
    pub fn new(start: u64) -> Self {
        Self {
            start,
            counters: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for SequenceIdSource {
    fn default() -> Self {
        Self::new(1_000_000_001)
    }
}

impl IdSource for SequenceIdSource {
    fn allocate(&self, class: EntityClass) -> String {
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        let next = counters.entry(class).or_insert(self.start);
        let id = *next;
        *next += 1;
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_uuid_source_unique() {
        let source = UuidIdSource::new();
        let ids: HashSet<String> = (0..100)
            .map(|_| source.allocate(EntityClass::AccidentReport))
            .collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_sequence_source_counts_per_class() {
        let source = SequenceIdSource::new(100);
        assert_eq!(source.allocate(EntityClass::AccidentReport), "100");
        assert_eq!(source.allocate(EntityClass::AccidentReport), "101");
        // Independent counter per class
        assert_eq!(source.allocate(EntityClass::RepairQuote), "100");
    }

    #[test]
    fn test_sequence_source_default_start() {
        let source = SequenceIdSource::default();
        assert_eq!(source.allocate(EntityClass::QuoteRequest), "1000000001");
    }
}
