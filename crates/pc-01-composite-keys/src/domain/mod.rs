//! # Domain Layer (Inner Hexagon)
//!
//! Pure key encoding logic. NO I/O, NO async.

pub mod codec;
pub mod errors;
pub mod namespaces;

pub use codec::*;
pub use errors::*;
pub use namespaces::*;
