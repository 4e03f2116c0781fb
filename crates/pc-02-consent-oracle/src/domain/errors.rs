//! # Domain Errors

use shared_types::CrossServiceError;
use thiserror::Error;

/// Errors from a consent check.
///
/// Denials are not errors; they are `ConsentDecision::Denied` values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsentError {
    /// The authority could not be reached or did not answer in time.
    #[error(transparent)]
    CrossService(#[from] CrossServiceError),

    /// Wire arguments do not form a consent request.
    #[error("Invalid consent request: {0}")]
    InvalidRequest(String),
}
