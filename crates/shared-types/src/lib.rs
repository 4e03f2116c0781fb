//! # Shared Types Crate
//!
//! Types every subsystem of the public-record chaincode agrees on.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Cross-subsystem types are defined here.
//! - **Context Authority**: The `InvocationContext` is the sole source of the
//!   caller's identity. Positional arguments MUST NOT carry identity.
//! - **One Wire Shape**: Every outer invocation and every cross-service call
//!   answers with a `Response` (status, message, payload).

pub mod context;
pub mod errors;
pub mod identity;
pub mod response;

pub use context::{CallerIdentity, InvocationContext, TransientMap};
pub use errors::CrossServiceError;
pub use identity::resolve;
pub use response::{Response, ERROR, OK};
