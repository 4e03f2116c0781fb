use crate::domain::StateError;
use crate::ports::outbound::{BatchOperation, KeyValue, StateIterator, WorldState};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, VecDeque};
use std::ops::Bound;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Ordered snapshot of every entry under `prefix`.
pub(crate) fn collect_prefix(data: &BTreeMap<Vec<u8>, Vec<u8>>, prefix: &[u8]) -> VecDeque<KeyValue> {
    data.range::<[u8], _>((Bound::Included(prefix), Bound::Unbounded))
        .take_while(|(k, _)| k.starts_with(prefix))
        .map(|(k, v)| KeyValue {
            key: k.clone(),
            value: v.clone(),
        })
        .collect()
}

/// Apply `operations` to `data`.
pub(crate) fn apply_to(data: &mut BTreeMap<Vec<u8>, Vec<u8>>, operations: Vec<BatchOperation>) {
    for BatchOperation { key, value } in operations {
        data.insert(key, value);
    }
}

/// In-memory world state for unit tests.
///
/// Keeps counters of opened and released range scans, and supports one-shot
/// failure injection for batches and scans.
#[derive(Default)]
pub struct InMemoryWorldState {
    data: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
    scans_opened: AtomicU64,
    scans_closed: Arc<AtomicU64>,
    fail_next_batch: AtomicBool,
    fail_scan_after: Mutex<Option<usize>>,
}

impl InMemoryWorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Every stored key, in order.
    pub fn keys(&self) -> Vec<Vec<u8>> {
        self.data.read().keys().cloned().collect()
    }

    /// Range scans opened so far.
    pub fn scans_opened(&self) -> u64 {
        self.scans_opened.load(Ordering::SeqCst)
    }

    /// Range scans released so far.
    pub fn scans_closed(&self) -> u64 {
        self.scans_closed.load(Ordering::SeqCst)
    }

    /// Make the next `apply_batch` fail without touching state.
    pub fn fail_next_batch(&self) {
        self.fail_next_batch.store(true, Ordering::SeqCst);
    }

    /// Make the next scan fail after yielding `after` entries.
    pub fn inject_scan_failure(&self, after: usize) {
        *self.fail_scan_after.lock() = Some(after);
    }
}

#[async_trait]
impl WorldState for InMemoryWorldState {
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        Ok(self.data.read().get(key).cloned())
    }

    async fn apply_batch(&self, operations: Vec<BatchOperation>) -> Result<(), StateError> {
        if self.fail_next_batch.swap(false, Ordering::SeqCst) {
            return Err(StateError::Backend("injected batch failure".to_string()));
        }
        apply_to(&mut self.data.write(), operations);
        Ok(())
    }

    async fn range_scan(&self, prefix: &[u8]) -> Result<Box<dyn StateIterator>, StateError> {
        let entries = collect_prefix(&self.data.read(), prefix);
        self.scans_opened.fetch_add(1, Ordering::SeqCst);

        let mut iter = SnapshotIterator::new(entries).with_close_counter(self.scans_closed.clone());
        if let Some(after) = self.fail_scan_after.lock().take() {
            iter = iter.fail_after(after);
        }
        Ok(Box::new(iter))
    }
}

/// Iterator over a point-in-time copy of a key range.
pub struct SnapshotIterator {
    entries: VecDeque<KeyValue>,
    closed: bool,
    fail_after: Option<usize>,
    yielded: usize,
    close_counter: Option<Arc<AtomicU64>>,
}

impl SnapshotIterator {
    pub fn new(entries: VecDeque<KeyValue>) -> Self {
        Self {
            entries,
            closed: false,
            fail_after: None,
            yielded: 0,
            close_counter: None,
        }
    }

    /// Count the release of this iterator in `counter`.
    pub fn with_close_counter(mut self, counter: Arc<AtomicU64>) -> Self {
        self.close_counter = Some(counter);
        self
    }

    /// Fail with a backend error once `after` entries have been yielded.
    pub fn fail_after(mut self, after: usize) -> Self {
        self.fail_after = Some(after);
        self
    }
}

#[async_trait]
impl StateIterator for SnapshotIterator {
    async fn next(&mut self) -> Result<Option<KeyValue>, StateError> {
        if self.closed {
            return Err(StateError::IteratorClosed);
        }
        if self.fail_after == Some(self.yielded) {
            return Err(StateError::Backend("injected scan failure".to_string()));
        }
        let entry = self.entries.pop_front();
        if entry.is_some() {
            self.yielded += 1;
        }
        Ok(entry)
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.entries.clear();
        if let Some(counter) = &self.close_counter {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }
}
