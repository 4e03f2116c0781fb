//! # PC-02 Consent Oracle - Fail-Closed Consent Checks
//!
//! **Subsystem ID:** 2
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! ## Purpose
//!
//! Answers "may organization O touch client C's records?" by calling the
//! external consent authority on every gated operation. Grants are never
//! cached.
//!
//! ## Decision Table
//!
//! | Authority reply | Decision |
//! |-----------------|----------|
//! | `ClientID == C` and `Consents` contains `"O:X"` | Granted |
//! | `ClientID != C` | Denied (`ClientMismatch`) |
//! | Token absent from `Consents` | Denied (`TokenAbsent`) |
//! | Payload violates `{"ClientID": string, "Consents": [string]}` | Denied (`MalformedResponse`) |
//! | Non-success status | Denied (`AuthorityRejected`) |
//! | Unreachable / timed out | `ConsentError::CrossService` |
//!
//! ## Wire Call
//!
//! ```text
//! consentcc  ["query", clientID, organizationID]  ->  {"ClientID": .., "Consents": [..]}
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::InMemoryConsentAuthority;
pub use domain::{
    consent_granted, consent_token, ConsentDecision, ConsentError, ConsentRecord, ConsentRequest,
    DenialReason, CONSENT_MARKER,
};
pub use ports::ConsentApi;
pub use service::{ConsentOracle, ConsentStats, DEFAULT_CONSENT_SERVICE};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 2;

#[cfg(test)]
mod tests {
    #[test]
    #[allow(clippy::const_is_empty)]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
