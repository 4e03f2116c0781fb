//! # Inbound Ports
//!
//! The record operations offered to the dispatcher.

use crate::domain::ClientDataset;
use crate::errors::RecordError;
use async_trait::async_trait;
use shared_types::InvocationContext;

/// Record API.
#[async_trait]
pub trait RecordApi: Send + Sync {
    /// Record a client file.
    ///
    /// `args` must be `[clientID, fileID]`; the payloads are taken from the
    /// context's transient channel (`public`, `private`).
    ///
    /// # Returns
    ///
    /// * `Ok(payload)` - `"Data recorded"`
    async fn put(&self, ctx: &mut InvocationContext, args: &[String]) -> Result<Vec<u8>, RecordError>;

    /// Assemble every file recorded for a client.
    ///
    /// `args` must be `[clientID, opsReserved]`; the second argument is not
    /// interpreted.
    async fn list(&self, ctx: &InvocationContext, args: &[String]) -> Result<ClientDataset, RecordError>;
}
