//! # Timed Service Client
//!
//! Decorator bounding every call with one timeout. A stalled collaborator
//! surfaces as `CrossServiceError::Timeout` instead of stalling the invocation.

use crate::client::{ServiceClient, WireArgs};
use async_trait::async_trait;
use shared_types::{CrossServiceError, Response};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// `ServiceClient` that applies a per-call timeout to an inner client.
pub struct TimedServiceClient {
    inner: Arc<dyn ServiceClient>,
    timeout: Duration,
}

impl TimedServiceClient {
    /// Wrap `inner` with a timeout of `timeout_ms` milliseconds.
    pub fn new(inner: Arc<dyn ServiceClient>, timeout_ms: u64) -> Self {
        Self {
            inner,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// The configured timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl ServiceClient for TimedServiceClient {
    async fn invoke(&self, service: &str, args: WireArgs) -> Result<Response, CrossServiceError> {
        match tokio::time::timeout(self.timeout, self.inner.invoke(service, args)).await {
            Ok(result) => result,
            Err(_) => {
                let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
                warn!(service = %service, timeout_ms, "Cross-service call timed out");
                Err(CrossServiceError::Timeout {
                    service: service.to_string(),
                    timeout_ms,
                })
            }
        }
    }
}
