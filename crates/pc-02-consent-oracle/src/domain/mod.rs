//! # Domain Layer
//!
//! Consent records, the grant rule and the typed authority request.

pub mod consent;
pub mod errors;
pub mod request;

pub use consent::*;
pub use errors::*;
pub use request::*;
