//! # Outbound Ports (Driven Ports)
//!
//! The world-state collaborator used by the record service.

use crate::domain::{IndexEntry, StateError};
use async_trait::async_trait;

/// One entry yielded by a range scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    /// Full encoded key.
    pub key: Vec<u8>,
    /// Stored value.
    pub value: Vec<u8>,
}

/// One put in an atomic batch. Records are never deleted, so a batch only
/// ever inserts or overwrites keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOperation {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Key touched by this operation.
    pub fn key(&self) -> &[u8] {
        &self.key
    }
}

impl From<IndexEntry> for BatchOperation {
    fn from(entry: IndexEntry) -> Self {
        Self::put(entry.key, entry.value)
    }
}

/// Ordered cursor over a range scan.
///
/// Entries come back in ascending byte order of their keys. `next()` returns
/// `Ok(None)` only once the last entry has been yielded. `close()` is
/// idempotent; calling `next()` after it yields `StateError::IteratorClosed`.
#[async_trait]
pub trait StateIterator: Send {
    /// Advance the cursor.
    async fn next(&mut self) -> Result<Option<KeyValue>, StateError>;

    /// Release the cursor.
    fn close(&mut self);
}

/// Key-value world state with atomic batches and ordered prefix scans.
///
/// Production: `FileBackedWorldState`
/// Testing: `InMemoryWorldState`
#[async_trait]
pub trait WorldState: Send + Sync {
    /// Get a value by key.
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError>;

    /// Execute an atomic batch write.
    ///
    /// Either ALL operations in the batch are applied, or NONE are.
    async fn apply_batch(&self, operations: Vec<BatchOperation>) -> Result<(), StateError>;

    /// Open an ordered scan over every key starting with `prefix`.
    async fn range_scan(&self, prefix: &[u8]) -> Result<Box<dyn StateIterator>, StateError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_operation_from_index_entry() {
        let entry = IndexEntry {
            key: vec![0, 1, 2],
            value: b"X".to_vec(),
        };
        let op = BatchOperation::from(entry);
        assert_eq!(op, BatchOperation::put(vec![0, 1, 2], b"X".to_vec()));
        assert_eq!(op.key(), &[0, 1, 2]);
    }
}
