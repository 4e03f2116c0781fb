//! # Domain Layer
//!
//! Query result shapes and the typed partition-store request.

pub mod dataset;
pub mod request;

pub use dataset::*;
pub use request::*;

/// Transient key carrying the public payload.
pub const TRANSIENT_PUBLIC: &str = "public";

/// Transient key carrying the private payload.
pub const TRANSIENT_PRIVATE: &str = "private";
