//! # Domain Errors
//!
//! Error types for key encoding and world-state access.

use thiserror::Error;

/// Errors from encoding or decoding composite keys.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// Namespace must be non-empty.
    #[error("Composite key namespace must not be empty")]
    EmptyNamespace,

    /// Key does not start with the composite-key marker.
    #[error("Not a composite key: missing 0x00 marker")]
    MissingMarker,

    /// Key ended inside a component or an escape sequence.
    #[error("Truncated composite key at byte {offset}")]
    Truncated { offset: usize },

    /// A 0x00 byte was followed by something other than 0xFF or 0x01.
    #[error("Invalid escape 0x00 0x{byte:02X} at byte {offset}")]
    InvalidEscape { offset: usize, byte: u8 },

    /// A decoded component is not valid UTF-8.
    #[error("Component {index} is not valid UTF-8")]
    InvalidUtf8 { index: usize },

    /// Key belongs to a different namespace than expected.
    #[error("Namespace mismatch: expected {expected}, found {found}")]
    NamespaceMismatch { expected: String, found: String },

    /// Key has an unexpected number of attributes.
    #[error("Expected {expected} attributes, found {found}")]
    AttributeCount { expected: usize, found: usize },
}

/// Errors from the world-state collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// The backing store rejected or failed the operation.
    #[error("World state backend error: {0}")]
    Backend(String),

    /// File I/O failed.
    #[error("World state I/O error: {message}")]
    Io { message: String },

    /// Snapshot (de)serialization failed.
    #[error("World state serialization error: {message}")]
    Serialization { message: String },

    /// `next()` was called on a closed range-scan handle.
    #[error("Range scan iterator already closed")]
    IteratorClosed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_error_display() {
        let err = KeyError::InvalidEscape {
            offset: 7,
            byte: 0x02,
        };
        assert_eq!(err.to_string(), "Invalid escape 0x00 0x02 at byte 7");
    }

    #[test]
    fn test_state_error_display() {
        let err = StateError::Io {
            message: "disk full".to_string(),
        };
        assert!(err.to_string().contains("disk full"));
    }
}
