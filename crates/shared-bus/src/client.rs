//! # Service Client
//!
//! Caller and callee sides of a cross-service call.

use async_trait::async_trait;
use shared_types::{CrossServiceError, Response};

/// Positional wire arguments. The first entry is the opcode.
pub type WireArgs = Vec<Vec<u8>>;

/// Caller side: issue a call to a named service.
#[async_trait]
pub trait ServiceClient: Send + Sync {
    /// Invoke `service` with positional `args` and wait for its response.
    ///
    /// # Returns
    ///
    /// * `Ok(Response)` - The service answered (the answer itself may carry
    ///   an error status)
    /// * `Err(CrossServiceError)` - The service could not be reached or did
    ///   not answer in time
    async fn invoke(&self, service: &str, args: WireArgs) -> Result<Response, CrossServiceError>;
}

/// Callee side: a service that answers calls.
#[async_trait]
pub trait ServiceHandler: Send + Sync {
    /// Handle one call.
    async fn handle(&self, args: WireArgs) -> Response;
}
