//! # Wire Response
//!
//! The single result shape crossing every service boundary.

use serde::{Deserialize, Serialize};

/// Status code of a successful response.
pub const OK: i32 = 200;

/// Status code of a failed response.
pub const ERROR: i32 = 500;

/// Result of an invocation or of a cross-service call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// `OK` or `ERROR`.
    pub status: i32,
    /// Human-readable error message (empty on success).
    pub message: String,
    /// Result payload (empty on error).
    pub payload: Vec<u8>,
}

impl Response {
    /// Build a success response.
    pub fn success(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            status: OK,
            message: String::new(),
            payload: payload.into(),
        }
    }

    /// Build an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ERROR,
            message: message.into(),
            payload: Vec::new(),
        }
    }

    /// Returns true if `status` is below 400.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status < 400
    }

    /// The payload interpreted as UTF-8, lossily.
    #[must_use]
    pub fn payload_utf8(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }
}
