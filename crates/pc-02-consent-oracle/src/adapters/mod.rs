//! # Adapters
//!
//! Test double for the external consent authority.

mod authority;

pub use authority::InMemoryConsentAuthority;
