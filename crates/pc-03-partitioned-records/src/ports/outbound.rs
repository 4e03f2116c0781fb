//! # Outbound Ports (Driven Ports)
//!
//! The per-organization partition store holding private payloads.

use async_trait::async_trait;
use shared_types::{CrossServiceError, Response};

/// Remote organization-scoped store of private payloads.
///
/// Production: `ServicePartitionClient` (over a `ServiceClient`)
///
/// An `Ok(Response)` with an error status means the store answered and
/// refused; `Err` means it could not be reached.
#[async_trait]
pub trait PartitionStore: Send + Sync {
    /// Upsert the private payload of `(client_id, file_id)` in `org_id`'s
    /// partition.
    async fn push(
        &self,
        org_id: &str,
        client_id: &str,
        file_id: &str,
        payload: Vec<u8>,
    ) -> Result<Response, CrossServiceError>;

    /// Fetch the private payload of `(client_id, file_id)` from `org_id`'s
    /// partition.
    async fn fetch(
        &self,
        org_id: &str,
        client_id: &str,
        file_id: &str,
    ) -> Result<Response, CrossServiceError>;
}
