//! # Consent Oracle Service
//!
//! Calls the consent authority through a `ServiceClient` and applies the
//! grant rule. Every check is a fresh call; nothing is cached.

use crate::domain::{ConsentDecision, ConsentError, ConsentRecord, ConsentRequest, DenialReason};
use crate::ports::inbound::ConsentApi;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_bus::ServiceClient;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Service name of the consent authority.
pub const DEFAULT_CONSENT_SERVICE: &str = "consentcc";

/// Counters for consent checks.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConsentStats {
    /// Checks issued to the authority.
    pub checks: u64,
    /// Checks that ended in a grant.
    pub granted: u64,
    /// Checks that ended in a denial.
    pub denied: u64,
    /// Checks that failed to reach the authority.
    pub failures: u64,
}

/// Consent oracle backed by a remote authority.
pub struct ConsentOracle {
    client: Arc<dyn ServiceClient>,
    service_name: String,
    stats: RwLock<ConsentStats>,
}

impl ConsentOracle {
    /// Create an oracle calling the default `consentcc` service.
    pub fn new(client: Arc<dyn ServiceClient>) -> Self {
        Self::with_service_name(client, DEFAULT_CONSENT_SERVICE)
    }

    /// Create an oracle calling `service_name`.
    pub fn with_service_name(client: Arc<dyn ServiceClient>, service_name: impl Into<String>) -> Self {
        Self {
            client,
            service_name: service_name.into(),
            stats: RwLock::new(ConsentStats::default()),
        }
    }

    /// Name of the authority service.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Snapshot of the check counters.
    pub fn stats(&self) -> ConsentStats {
        self.stats.read().clone()
    }

    fn record(&self, outcome: &Result<ConsentDecision, ConsentError>) {
        let mut stats = self.stats.write();
        stats.checks += 1;
        match outcome {
            Ok(ConsentDecision::Granted) => stats.granted += 1,
            Ok(ConsentDecision::Denied(_)) => stats.denied += 1,
            Err(_) => stats.failures += 1,
        }
    }

    async fn query_authority(
        &self,
        client_id: &str,
        org_id: &str,
    ) -> Result<ConsentDecision, ConsentError> {
        let request = ConsentRequest::Query {
            client_id: client_id.to_string(),
            org_id: org_id.to_string(),
        };
        let response = self
            .client
            .invoke(&self.service_name, request.to_wire_args())
            .await?;

        if !response.is_success() {
            return Ok(ConsentDecision::Denied(DenialReason::AuthorityRejected {
                status: response.status,
                message: response.message,
            }));
        }

        debug!(payload_len = response.payload.len(), "Consent authority answered");

        match ConsentRecord::from_payload(&response.payload) {
            Ok(record) => Ok(record.decide(client_id, org_id)),
            Err(e) => Ok(ConsentDecision::Denied(DenialReason::MalformedResponse {
                detail: e.to_string(),
            })),
        }
    }
}

#[async_trait]
impl ConsentApi for ConsentOracle {
    #[instrument(skip(self))]
    async fn evaluate(&self, client_id: &str, org_id: &str) -> Result<ConsentDecision, ConsentError> {
        let outcome = self.query_authority(client_id, org_id).await;
        self.record(&outcome);

        match &outcome {
            Ok(ConsentDecision::Granted) => info!(service = %self.service_name, "Consent granted"),
            Ok(ConsentDecision::Denied(reason)) => {
                info!(service = %self.service_name, %reason, "Consent denied")
            }
            Err(e) => warn!(service = %self.service_name, error = %e, "Consent authority unreachable"),
        }
        outcome
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryConsentAuthority;
    use shared_bus::{InMemoryServiceBus, ServiceHandler, TimedServiceClient, WireArgs};
    use shared_types::{CrossServiceError, Response};
    use std::time::Duration;

    fn setup(authority: InMemoryConsentAuthority) -> (Arc<InMemoryServiceBus>, ConsentOracle) {
        let bus = Arc::new(InMemoryServiceBus::new());
        bus.register(DEFAULT_CONSENT_SERVICE, Arc::new(authority));
        let oracle = ConsentOracle::new(bus.clone());
        (bus, oracle)
    }

    #[tokio::test]
    async fn test_granted() {
        let authority = InMemoryConsentAuthority::new();
        authority.grant("C1", "ORG1");
        let (bus, oracle) = setup(authority);

        assert!(oracle.check_consent("C1", "ORG1").await.unwrap());
        assert_eq!(bus.calls_routed(), 1);
    }

    #[tokio::test]
    async fn test_other_org_denied() {
        let authority = InMemoryConsentAuthority::new();
        authority.grant("C1", "ORG2");
        let (_bus, oracle) = setup(authority);

        assert_eq!(
            oracle.evaluate("C1", "ORG1").await.unwrap(),
            ConsentDecision::Denied(DenialReason::TokenAbsent)
        );
    }

    #[tokio::test]
    async fn test_every_check_calls_authority() {
        let authority = Arc::new(InMemoryConsentAuthority::new());
        authority.grant("C1", "ORG1");
        let bus = Arc::new(InMemoryServiceBus::new());
        bus.register(DEFAULT_CONSENT_SERVICE, authority.clone());
        let oracle = ConsentOracle::new(bus.clone());

        assert!(oracle.check_consent("C1", "ORG1").await.unwrap());
        authority.revoke("C1", "ORG1");
        assert!(!oracle.check_consent("C1", "ORG1").await.unwrap());

        assert_eq!(bus.calls_routed(), 2);
        assert_eq!(
            oracle.stats(),
            ConsentStats {
                checks: 2,
                granted: 1,
                denied: 1,
                failures: 0
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_reply_denied() {
        let authority = InMemoryConsentAuthority::new();
        authority.grant("C1", "ORG1");
        authority.respond_with(Response::success(br#"{"ClientID":"C1"}"#.to_vec()));
        let (_bus, oracle) = setup(authority);

        let decision = oracle.evaluate("C1", "ORG1").await.unwrap();
        assert!(matches!(
            decision,
            ConsentDecision::Denied(DenialReason::MalformedResponse { .. })
        ));
    }

    #[tokio::test]
    async fn test_mismatched_client_denied() {
        let authority = InMemoryConsentAuthority::new();
        authority.respond_with(Response::success(
            br#"{"ClientID":"C2","Consents":["ORG1:X"]}"#.to_vec(),
        ));
        let (_bus, oracle) = setup(authority);

        assert!(!oracle.check_consent("C1", "ORG1").await.unwrap());
    }

    #[tokio::test]
    async fn test_error_status_denied() {
        let authority = InMemoryConsentAuthority::new();
        authority.respond_with(Response::error("ledger unavailable"));
        let (_bus, oracle) = setup(authority);

        assert_eq!(
            oracle.evaluate("C1", "ORG1").await.unwrap(),
            ConsentDecision::Denied(DenialReason::AuthorityRejected {
                status: shared_types::ERROR,
                message: "ledger unavailable".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_unreachable_authority_is_error() {
        let bus = Arc::new(InMemoryServiceBus::new());
        let oracle = ConsentOracle::new(bus);

        let result = oracle.check_consent("C1", "ORG1").await;
        assert_eq!(
            result,
            Err(ConsentError::CrossService(CrossServiceError::UnknownService(
                "consentcc".to_string()
            )))
        );
        assert_eq!(oracle.stats().failures, 1);
    }

    struct Stalled;

    #[async_trait]
    impl ServiceHandler for Stalled {
        async fn handle(&self, _args: WireArgs) -> Response {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Response::success(Vec::new())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_authority_times_out() {
        let bus = Arc::new(InMemoryServiceBus::new());
        bus.register("consent-slow", Arc::new(Stalled));
        let client = Arc::new(TimedServiceClient::new(bus, 500));
        let oracle = ConsentOracle::with_service_name(client, "consent-slow");

        let err = oracle.evaluate("C1", "ORG1").await.unwrap_err();
        assert!(matches!(err, ConsentError::CrossService(e) if e.is_timeout()));
    }
}
