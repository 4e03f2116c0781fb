//! # Ports Layer
//!
//! Abstract interfaces to the world state.

pub mod outbound;

pub use outbound::*;
