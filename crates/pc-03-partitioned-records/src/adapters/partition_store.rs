use crate::domain::PartitionRequest;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_bus::{ServiceHandler, WireArgs};
use shared_types::Response;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// In-memory partition service for one organization.
///
/// A query for a record that was never pushed answers with an empty payload.
/// `fail_with` makes every later call answer with an error status.
#[derive(Default)]
pub struct InMemoryPartitionStore {
    records: RwLock<BTreeMap<(String, String), Vec<u8>>>,
    failure: RwLock<Option<String>>,
    pushes: AtomicU64,
    queries: AtomicU64,
}

impl InMemoryPartitionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored private payload of `(client_id, file_id)`.
    pub fn get(&self, client_id: &str, file_id: &str) -> Option<Vec<u8>> {
        self.records
            .read()
            .get(&(client_id.to_string(), file_id.to_string()))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Push calls received (including failed ones).
    pub fn pushes(&self) -> u64 {
        self.pushes.load(Ordering::SeqCst)
    }

    /// Query calls received (including failed ones).
    pub fn queries(&self) -> u64 {
        self.queries.load(Ordering::SeqCst)
    }

    /// Answer every later call with an error status carrying `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.write() = Some(message.into());
    }

    /// Resume normal answers.
    pub fn recover(&self) {
        *self.failure.write() = None;
    }
}

#[async_trait]
impl ServiceHandler for InMemoryPartitionStore {
    async fn handle(&self, args: WireArgs) -> Response {
        let request = match PartitionRequest::from_wire_args(&args) {
            Ok(request) => request,
            Err(e) => return Response::error(e.to_string()),
        };

        match &request {
            PartitionRequest::Push { .. } => self.pushes.fetch_add(1, Ordering::SeqCst),
            PartitionRequest::Query { .. } => self.queries.fetch_add(1, Ordering::SeqCst),
        };

        if let Some(message) = self.failure.read().clone() {
            return Response::error(message);
        }

        match request {
            PartitionRequest::Push {
                client_id,
                file_id,
                payload,
            } => {
                debug!(client_id = %client_id, file_id = %file_id, payload_len = payload.len(), "Private data stored");
                self.records.write().insert((client_id, file_id), payload);
                Response::success(Vec::new())
            }
            PartitionRequest::Query { client_id, file_id } => {
                Response::success(self.get(&client_id, &file_id).unwrap_or_default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(client: &str, file: &str, payload: &[u8]) -> WireArgs {
        PartitionRequest::Push {
            client_id: client.to_string(),
            file_id: file.to_string(),
            payload: payload.to_vec(),
        }
        .to_wire_args()
    }

    fn query(client: &str, file: &str) -> WireArgs {
        PartitionRequest::Query {
            client_id: client.to_string(),
            file_id: file.to_string(),
        }
        .to_wire_args()
    }

    #[tokio::test]
    async fn test_push_then_query() {
        let store = InMemoryPartitionStore::new();
        assert!(store.handle(push("C1", "F1", b"priv1")).await.is_success());

        let resp = store.handle(query("C1", "F1")).await;
        assert!(resp.is_success());
        assert_eq!(resp.payload_utf8(), "priv1");
        assert_eq!((store.pushes(), store.queries()), (1, 1));
    }

    #[tokio::test]
    async fn test_push_overwrites() {
        let store = InMemoryPartitionStore::new();
        store.handle(push("C1", "F1", b"old")).await;
        store.handle(push("C1", "F1", b"new")).await;

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("C1", "F1"), Some(b"new".to_vec()));
    }

    #[tokio::test]
    async fn test_query_missing_is_empty() {
        let store = InMemoryPartitionStore::new();
        let resp = store.handle(query("C1", "F1")).await;
        assert!(resp.is_success());
        assert!(resp.payload.is_empty());
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = InMemoryPartitionStore::new();
        store.fail_with("collection unavailable");

        let resp = store.handle(push("C1", "F1", b"priv1")).await;
        assert!(!resp.is_success());
        assert_eq!(resp.message, "collection unavailable");
        assert!(store.is_empty());
        assert_eq!(store.pushes(), 1);

        store.recover();
        assert!(store.handle(push("C1", "F1", b"priv1")).await.is_success());
    }

    #[tokio::test]
    async fn test_malformed_call() {
        let store = InMemoryPartitionStore::new();
        let resp = store.handle(vec![b"push".to_vec()]).await;
        assert!(!resp.is_success());
    }
}
