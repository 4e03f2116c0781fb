//! # Scan Handle
//!
//! Owns a range-scan cursor and releases it exactly once: explicitly through
//! `finish` on the success path, or on drop when the caller bails out early.

use pc_01_composite_keys::{KeyValue, StateError, StateIterator};
use tracing::debug;

pub(crate) struct ScanHandle {
    iter: Option<Box<dyn StateIterator>>,
    yielded: usize,
}

impl ScanHandle {
    pub(crate) fn new(iter: Box<dyn StateIterator>) -> Self {
        Self {
            iter: Some(iter),
            yielded: 0,
        }
    }

    pub(crate) async fn next(&mut self) -> Result<Option<KeyValue>, StateError> {
        let Some(iter) = self.iter.as_mut() else {
            return Err(StateError::IteratorClosed);
        };
        let entry = iter.next().await?;
        if entry.is_some() {
            self.yielded += 1;
        }
        Ok(entry)
    }

    /// Release the cursor after a complete scan.
    pub(crate) fn finish(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(mut iter) = self.iter.take() {
            iter.close();
            debug!(entries = self.yielded, "Range scan released");
        }
    }
}

impl Drop for ScanHandle {
    fn drop(&mut self) {
        self.release();
    }
}
