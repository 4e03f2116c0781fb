use crate::domain::{consent_token, ConsentRecord, ConsentRequest};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_bus::{ServiceHandler, WireArgs};
use shared_types::Response;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// In-memory consent authority.
///
/// Answers `["query", clientID, orgID]` with the client's recorded grants. A
/// client with no grants still gets a well-formed reply with an empty
/// `Consents` list. `respond_with` overrides every reply, for exercising
/// malformed or rejected answers.
#[derive(Default)]
pub struct InMemoryConsentAuthority {
    grants: RwLock<BTreeMap<String, BTreeSet<String>>>,
    override_response: RwLock<Option<Response>>,
}

impl InMemoryConsentAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a grant of `client_id`'s data to `org_id`.
    pub fn grant(&self, client_id: &str, org_id: &str) {
        self.grants
            .write()
            .entry(client_id.to_string())
            .or_default()
            .insert(consent_token(org_id));
    }

    /// Withdraw a grant. Returns true if it existed.
    pub fn revoke(&self, client_id: &str, org_id: &str) -> bool {
        self.grants
            .write()
            .get_mut(client_id)
            .is_some_and(|tokens| tokens.remove(&consent_token(org_id)))
    }

    /// Answer every subsequent call with `response`.
    pub fn respond_with(&self, response: Response) {
        *self.override_response.write() = Some(response);
    }

    /// Current record for `client_id`.
    pub fn record(&self, client_id: &str) -> ConsentRecord {
        let consents = self
            .grants
            .read()
            .get(client_id)
            .map(|tokens| tokens.iter().cloned().collect())
            .unwrap_or_default();
        ConsentRecord::new(client_id, consents)
    }
}

#[async_trait]
impl ServiceHandler for InMemoryConsentAuthority {
    async fn handle(&self, args: WireArgs) -> Response {
        if let Some(response) = self.override_response.read().clone() {
            return response;
        }

        let ConsentRequest::Query { client_id, org_id } = match ConsentRequest::from_wire_args(&args) {
            Ok(request) => request,
            Err(e) => return Response::error(e.to_string()),
        };
        debug!(client_id = %client_id, org_id = %org_id, "Consent query received");

        match serde_json::to_vec(&self.record(&client_id)) {
            Ok(payload) => Response::success(payload),
            Err(e) => Response::error(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(client: &str, org: &str) -> WireArgs {
        ConsentRequest::Query {
            client_id: client.to_string(),
            org_id: org.to_string(),
        }
        .to_wire_args()
    }

    #[tokio::test]
    async fn test_answers_with_recorded_grants() {
        let authority = InMemoryConsentAuthority::new();
        authority.grant("C1", "ORG1");
        authority.grant("C1", "ORG2");

        let resp = authority.handle(query("C1", "ORG1")).await;
        assert!(resp.is_success());
        assert_eq!(
            resp.payload_utf8(),
            r#"{"ClientID":"C1","Consents":["ORG1:X","ORG2:X"]}"#
        );
    }

    #[tokio::test]
    async fn test_unknown_client_has_empty_grants() {
        let authority = InMemoryConsentAuthority::new();
        let resp = authority.handle(query("C9", "ORG1")).await;
        assert_eq!(resp.payload_utf8(), r#"{"ClientID":"C9","Consents":[]}"#);
    }

    #[tokio::test]
    async fn test_revoke() {
        let authority = InMemoryConsentAuthority::new();
        authority.grant("C1", "ORG1");
        assert!(authority.revoke("C1", "ORG1"));
        assert!(!authority.revoke("C1", "ORG1"));
        assert!(authority.record("C1").consents.is_empty());
    }

    #[tokio::test]
    async fn test_bad_request_is_error_response() {
        let authority = InMemoryConsentAuthority::new();
        let resp = authority.handle(vec![b"push".to_vec()]).await;
        assert!(!resp.is_success());
    }
}
