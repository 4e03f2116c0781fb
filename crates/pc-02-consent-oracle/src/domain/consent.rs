//! # Consent Records
//!
//! The authority's reply schema and the pure grant rule.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffix appended to an organization id to form its consent token.
pub const CONSENT_MARKER: &str = ":X";

/// Consent token the authority records for `org_id`.
pub fn consent_token(org_id: &str) -> String {
    format!("{org_id}{CONSENT_MARKER}")
}

/// Grants recorded by the authority for one client.
///
/// Both fields are required; a reply missing either, or carrying the wrong
/// JSON type, does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    #[serde(rename = "ClientID")]
    pub client_id: String,
    #[serde(rename = "Consents")]
    pub consents: Vec<String>,
}

impl ConsentRecord {
    pub fn new(client_id: impl Into<String>, consents: Vec<String>) -> Self {
        Self {
            client_id: client_id.into(),
            consents,
        }
    }

    /// Parse an authority reply payload.
    pub fn from_payload(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }

    /// Apply the grant rule for `(client_id, org_id)`.
    pub fn decide(&self, client_id: &str, org_id: &str) -> ConsentDecision {
        if self.client_id != client_id {
            return ConsentDecision::Denied(DenialReason::ClientMismatch {
                returned: self.client_id.clone(),
            });
        }
        let token = consent_token(org_id);
        if self.consents.iter().any(|c| *c == token) {
            ConsentDecision::Granted
        } else {
            ConsentDecision::Denied(DenialReason::TokenAbsent)
        }
    }
}

/// True iff `record` belongs to `client_id` and lists `org_id`'s token.
pub fn consent_granted(record: &ConsentRecord, client_id: &str, org_id: &str) -> bool {
    record.decide(client_id, org_id).is_granted()
}

/// Why a consent check came back negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialReason {
    /// The authority answered for a different client.
    ClientMismatch { returned: String },
    /// The organization's token is not among the grants.
    TokenAbsent,
    /// The reply payload did not match the expected schema.
    MalformedResponse { detail: String },
    /// The authority answered with a non-success status.
    AuthorityRejected { status: i32, message: String },
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialReason::ClientMismatch { returned } => {
                write!(f, "authority answered for client {returned}")
            }
            DenialReason::TokenAbsent => write!(f, "no grant for organization"),
            DenialReason::MalformedResponse { detail } => {
                write!(f, "malformed authority reply: {detail}")
            }
            DenialReason::AuthorityRejected { status, message } => {
                write!(f, "authority rejected query ({status}): {message}")
            }
        }
    }
}

/// Outcome of a consent check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsentDecision {
    Granted,
    Denied(DenialReason),
}

impl ConsentDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, ConsentDecision::Granted)
    }

    /// The denial reason, if denied.
    pub fn denial(&self) -> Option<&DenialReason> {
        match self {
            ConsentDecision::Granted => None,
            ConsentDecision::Denied(reason) => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(client: &str, consents: &[&str]) -> ConsentRecord {
        ConsentRecord::new(client, consents.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_token_format() {
        assert_eq!(consent_token("ORG1"), "ORG1:X");
    }

    #[test]
    fn test_granted_regardless_of_position() {
        let r = record("C1", &["ORG2:X", "ORG3:X", "ORG1:X"]);
        assert!(consent_granted(&r, "C1", "ORG1"));
        assert!(consent_granted(&r, "C1", "ORG2"));
    }

    #[test]
    fn test_token_match_is_exact() {
        let r = record("C1", &["org1:X", "ORG1", "ORG1:Y", "ORG1:X "]);
        assert_eq!(r.decide("C1", "ORG1"), ConsentDecision::Denied(DenialReason::TokenAbsent));
        assert!(!consent_granted(&record("C1", &[]), "C1", "ORG1"));
    }

    #[test]
    fn test_client_mismatch_denied() {
        let r = record("C2", &["ORG1:X"]);
        assert_eq!(
            r.decide("C1", "ORG1"),
            ConsentDecision::Denied(DenialReason::ClientMismatch {
                returned: "C2".to_string()
            })
        );
    }

    #[test]
    fn test_schema_is_strict() {
        let ok = ConsentRecord::from_payload(br#"{"ClientID":"C1","Consents":["ORG1:X"]}"#);
        assert_eq!(ok.unwrap(), record("C1", &["ORG1:X"]));

        for bad in [
            &br#"{"ClientID":"C1"}"#[..],
            br#"{"Consents":["ORG1:X"]}"#,
            br#"{"ClientID":7,"Consents":["ORG1:X"]}"#,
            br#"{"ClientID":"C1","Consents":"ORG1:X"}"#,
            br#"{"ClientID":"C1","Consents":[1]}"#,
            br#"{"ClientID":null,"Consents":[]}"#,
            b"not json",
            b"",
        ] {
            assert!(ConsentRecord::from_payload(bad).is_err(), "{:?}", String::from_utf8_lossy(bad));
        }
    }

    #[test]
    fn test_serializes_with_wire_names() {
        let json = serde_json::to_string(&record("C1", &["ORG1:X"])).unwrap();
        assert_eq!(json, r#"{"ClientID":"C1","Consents":["ORG1:X"]}"#);
    }
}
