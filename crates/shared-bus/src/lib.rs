//! # Shared Bus - Cross-Service Calls
//!
//! The one way a subsystem talks to another service (the consent authority,
//! a per-organization partition store).
//!
//! ## Call Model
//!
//! ```text
//! ┌──────────────┐   invoke(service, args)   ┌────────────────┐
//! │  Subsystem   │ ────────────────────────→ │ ServiceClient  │
//! │              │ ←──────────────────────── │ (bus / remote) │
//! └──────────────┘        Response           └────────────────┘
//! ```
//!
//! - Calls are blocking from the caller's point of view: the invocation waits
//!   until the collaborator answers or errors.
//! - `TimedServiceClient` bounds every call with one configurable timeout.
//!   There is no retry.
//! - Wire arguments are raw byte strings; typed requests live in the
//!   subsystem crates and convert at this boundary.

pub mod bus;
pub mod client;
pub mod timed;

// Re-export main types
pub use bus::InMemoryServiceBus;
pub use client::{ServiceClient, ServiceHandler, WireArgs};
pub use timed::TimedServiceClient;

/// Default per-call timeout in milliseconds.
pub const DEFAULT_CALL_TIMEOUT_MS: u64 = 30_000;
