//! # Inbound Ports
//!
//! What the consent oracle offers to the record service.

use crate::domain::{ConsentDecision, ConsentError};
use async_trait::async_trait;

/// Consent check API.
#[async_trait]
pub trait ConsentApi: Send + Sync {
    /// Query the authority and decide whether `org_id` may access
    /// `client_id`'s records.
    ///
    /// # Returns
    ///
    /// * `Ok(ConsentDecision)` - The authority answered (any answer that is
    ///   not an explicit grant is a denial)
    /// * `Err(ConsentError)` - The authority could not be reached
    async fn evaluate(&self, client_id: &str, org_id: &str) -> Result<ConsentDecision, ConsentError>;

    /// Boolean form of [`ConsentApi::evaluate`].
    async fn check_consent(&self, client_id: &str, org_id: &str) -> Result<bool, ConsentError> {
        Ok(self.evaluate(client_id, org_id).await?.is_granted())
    }
}
