//! # In-Memory Service Bus
//!
//! Routes calls by service name to handlers registered in the same process.
//! Suitable for single-node operation and tests; a networked deployment would
//! provide a different `ServiceClient`.

use crate::client::{ServiceClient, ServiceHandler, WireArgs};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{CrossServiceError, Response};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// In-process implementation of `ServiceClient`.
#[derive(Default)]
pub struct InMemoryServiceBus {
    /// Registered handlers by service name.
    handlers: RwLock<HashMap<String, Arc<dyn ServiceHandler>>>,

    /// Total calls routed (including calls to unknown services).
    calls_routed: AtomicU64,
}

impl InMemoryServiceBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the handler for `service`.
    pub fn register(&self, service: impl Into<String>, handler: Arc<dyn ServiceHandler>) {
        let service = service.into();
        debug!(service = %service, "Service registered");
        self.handlers.write().insert(service, handler);
    }

    /// Remove the handler for `service`. Returns true if one was registered.
    pub fn deregister(&self, service: &str) -> bool {
        self.handlers.write().remove(service).is_some()
    }

    /// Whether a handler is registered for `service`.
    #[must_use]
    pub fn is_registered(&self, service: &str) -> bool {
        self.handlers.read().contains_key(service)
    }

    /// Total calls routed so far.
    #[must_use]
    pub fn calls_routed(&self) -> u64 {
        self.calls_routed.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ServiceClient for InMemoryServiceBus {
    async fn invoke(&self, service: &str, args: WireArgs) -> Result<Response, CrossServiceError> {
        self.calls_routed.fetch_add(1, Ordering::Relaxed);

        // Clone the handle so the lock is not held across the await.
        let handler = self.handlers.read().get(service).cloned();
        let Some(handler) = handler else {
            warn!(service = %service, "Call to unregistered service");
            return Err(CrossServiceError::UnknownService(service.to_string()));
        };

        let response = handler.handle(args).await;
        debug!(
            service = %service,
            status = response.status,
            payload_len = response.payload.len(),
            "Service call answered"
        );
        Ok(response)
    }
}
