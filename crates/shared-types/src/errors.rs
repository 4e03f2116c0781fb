//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

/// Failure to reach, or get an answer from, another service.
///
/// Always fatal for the current invocation. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrossServiceError {
    /// The collaborator did not answer within the configured timeout.
    #[error("Call to {service} timed out after {timeout_ms}ms")]
    Timeout { service: String, timeout_ms: u64 },

    /// The collaborator could not be reached or the call broke mid-flight.
    #[error("Transport failure calling {service}: {message}")]
    Transport { service: String, message: String },

    /// No service is registered under the requested name.
    #[error("Unknown service: {0}")]
    UnknownService(String),
}

impl CrossServiceError {
    /// Returns true if this is a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Name of the service the failed call targeted.
    #[must_use]
    pub fn service(&self) -> &str {
        match self {
            Self::Timeout { service, .. } | Self::Transport { service, .. } => service,
            Self::UnknownService(service) => service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        let err = CrossServiceError::Timeout {
            service: "consentcc".to_string(),
            timeout_ms: 3000,
        };
        assert_eq!(err.to_string(), "Call to consentcc timed out after 3000ms");
        assert!(err.is_timeout());
        assert_eq!(err.service(), "consentcc");
    }

    #[test]
    fn test_unknown_service() {
        let err = CrossServiceError::UnknownService("privateccORG9".to_string());
        assert!(!err.is_timeout());
        assert!(err.to_string().contains("privateccORG9"));
    }
}
