use super::memory::{apply_to, collect_prefix, SnapshotIterator};
use crate::domain::StateError;
use crate::ports::outbound::{BatchOperation, StateIterator, WorldState};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File-backed world state for the development runtime.
///
/// The whole map is persisted as one bincode snapshot. Every batch is applied
/// to a copy, written to a temp file, renamed over the snapshot and only then
/// made visible, so a failed write leaves both disk and memory unchanged.
pub struct FileBackedWorldState {
    data: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
    path: PathBuf,
}

impl FileBackedWorldState {
    /// Open the snapshot at `path`, starting empty if it does not exist.
    ///
    /// # Errors
    ///
    /// * `StateError::Io` - The file exists but cannot be read
    /// * `StateError::Serialization` - The file is not a valid snapshot
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StateError> {
        let path = path.as_ref().to_path_buf();
        let data = Self::load(&path)?;

        if data.is_empty() {
            info!("[pc-01] No existing world state at {}", path.display());
        } else {
            info!(
                "[pc-01] Loaded {} keys from {}",
                data.len(),
                path.display()
            );
        }

        Ok(Self {
            data: RwLock::new(data),
            path,
        })
    }

    /// Snapshot location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    fn load(path: &Path) -> Result<BTreeMap<Vec<u8>, Vec<u8>>, StateError> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(StateError::Io {
                    message: e.to_string(),
                })
            }
        };
        if bytes.is_empty() {
            return Ok(BTreeMap::new());
        }
        bincode::deserialize(&bytes).map_err(|e| StateError::Serialization {
            message: e.to_string(),
        })
    }

    fn save(&self, data: &BTreeMap<Vec<u8>, Vec<u8>>) -> Result<(), StateError> {
        let io_err = |e: std::io::Error| StateError::Io {
            message: e.to_string(),
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let bytes = bincode::serialize(data).map_err(|e| StateError::Serialization {
            message: e.to_string(),
        })?;

        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, &bytes).map_err(io_err)?;
        std::fs::rename(&temp_path, &self.path).map_err(io_err)?;

        debug!(
            "[pc-01] Persisted {} keys ({} bytes)",
            data.len(),
            bytes.len()
        );
        Ok(())
    }
}

#[async_trait]
impl WorldState for FileBackedWorldState {
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        Ok(self.data.read().get(key).cloned())
    }

    async fn apply_batch(&self, operations: Vec<BatchOperation>) -> Result<(), StateError> {
        let mut data = self.data.write();
        let mut next = data.clone();
        apply_to(&mut next, operations);
        self.save(&next)?;
        *data = next;
        Ok(())
    }

    async fn range_scan(&self, prefix: &[u8]) -> Result<Box<dyn StateIterator>, StateError> {
        let entries = collect_prefix(&self.data.read(), prefix);
        Ok(Box::new(SnapshotIterator::new(entries)))
    }
}
