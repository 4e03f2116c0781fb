//! # Error Types
//!
//! Every way a record operation can fail. The dispatcher renders the
//! `Display` form into the error response message.

use pc_01_composite_keys::{KeyError, StateError};
use pc_02_consent_oracle::{ConsentError, DenialReason};
use shared_types::CrossServiceError;
use thiserror::Error;

/// Record operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Wrong number of positional arguments.
    #[error("Expecting {expected}")]
    ArgumentArity { expected: &'static str, found: usize },

    /// A required transient field was not supplied.
    #[error("Missing transient field: {0}")]
    MissingTransient(&'static str),

    /// The consent authority did not grant access to record data.
    #[error("Consent not given for client: {client_id} and MSP: {org_id}")]
    ConsentDenied {
        client_id: String,
        org_id: String,
        reason: DenialReason,
    },

    /// The consent authority did not grant access to list data. The message
    /// names neither party.
    #[error("No Consent given")]
    QueryDenied {
        client_id: String,
        org_id: String,
        reason: DenialReason,
    },

    /// The partition store answered a private fetch with an error status.
    #[error("Private data fetch failed for file {file_id} ({status}): {message}")]
    PrivateFetchFailed {
        file_id: String,
        status: i32,
        message: String,
    },

    /// A collaborator could not be reached or did not answer in time.
    #[error(transparent)]
    CrossService(#[from] CrossServiceError),

    /// The consent request could not be formed.
    #[error(transparent)]
    Consent(ConsentError),

    /// World-state failure.
    #[error(transparent)]
    State(#[from] StateError),

    /// Composite key failure.
    #[error(transparent)]
    Key(#[from] KeyError),

    /// Wire arguments do not form a partition request.
    #[error("Invalid partition request: {0}")]
    InvalidRequest(String),

    /// Result could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<ConsentError> for RecordError {
    fn from(err: ConsentError) -> Self {
        match err {
            ConsentError::CrossService(e) => RecordError::CrossService(e),
            other => RecordError::Consent(other),
        }
    }
}

impl RecordError {
    /// Returns true for consent denials.
    pub fn is_consent_denied(&self) -> bool {
        matches!(
            self,
            RecordError::ConsentDenied { .. } | RecordError::QueryDenied { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consent_transport_error_flattens() {
        let err: RecordError = ConsentError::CrossService(CrossServiceError::UnknownService(
            "consentcc".to_string(),
        ))
        .into();
        assert_eq!(
            err,
            RecordError::CrossService(CrossServiceError::UnknownService("consentcc".to_string()))
        );
    }

    #[test]
    fn test_messages() {
        let err = RecordError::ArgumentArity {
            expected: "client ID and file id",
            found: 3,
        };
        assert_eq!(err.to_string(), "Expecting client ID and file id");

        let err = RecordError::ConsentDenied {
            client_id: "C1".to_string(),
            org_id: "ORG1".to_string(),
            reason: DenialReason::TokenAbsent,
        };
        assert_eq!(err.to_string(), "Consent not given for client: C1 and MSP: ORG1");
        assert!(err.is_consent_denied());

        let err = RecordError::QueryDenied {
            client_id: "C1".to_string(),
            org_id: "ORG1".to_string(),
            reason: DenialReason::TokenAbsent,
        };
        assert_eq!(err.to_string(), "No Consent given");
        assert!(err.is_consent_denied());
    }
}
