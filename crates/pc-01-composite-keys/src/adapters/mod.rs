//! # World State Adapters
//!
//! Implementations of the `WorldState` port.

mod file;
mod memory;

pub use file::FileBackedWorldState;
pub use memory::{InMemoryWorldState, SnapshotIterator};
