//! # Node Runtime Library
//!
//! Wiring, dispatch and session replay for the public-record chaincode. The
//! `main.rs` binary is a thin shell over these modules.
//!
//! ## Modules
//!
//! - `container/` - Configuration and subsystem wiring
//! - `dispatch` - Function-name routing to the record service
//! - `session` - JSON session replay for local development

#![warn(clippy::all)]

pub mod container;
pub mod dispatch;
pub mod session;

pub use container::{ConfigError, ContainerError, RuntimeConfig, RuntimeContainer};
pub use dispatch::{Dispatcher, Function};
pub use session::{run_session, Outcome, Session, SessionError};
