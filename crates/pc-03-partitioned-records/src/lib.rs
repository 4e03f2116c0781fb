//! # PC-03 Partitioned Records - Consent-Gated Client File Records
//!
//! **Subsystem ID:** 3
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! ## Purpose
//!
//! Records a per-client file reference whose payload is split in two:
//!
//! | Half | Stored in | Visible to |
//! |------|-----------|------------|
//! | Public | Local world state, primary composite key | Every organization with consent |
//! | Private | Partition service `privatecc<orgID>` | The writing organization |
//!
//! and reassembles both halves on lookup.
//!
//! ## Write Protocol (`put`)
//!
//! ```text
//! [clientID, fileID] + transient {public, private}
//!   0. exactly two args
//!   1. consent(clientID, caller org)          -- denied: nothing written
//!   2. take transient public + private
//!   3. partition.push(clientID, fileID, private)
//!   4. apply_batch(primary=public, 2 x marker="X")
//! ```
//!
//! The two halves share no transaction. A rejected private push is logged and
//! the public half is still written, so a record may be public-only.
//!
//! ## Read Protocol (`list`)
//!
//! Consent first, then one ordered prefix scan over the client's primary keys
//! with a private fetch per row. Any failure aborts the whole result. The scan
//! is released exactly once on every exit path.

#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{InMemoryPartitionStore, ServicePartitionClient};
pub use domain::{
    partition_service_name, ClientDataset, FileRow, PartitionRequest, DEFAULT_PARTITION_PREFIX,
    TRANSIENT_PRIVATE, TRANSIENT_PUBLIC,
};
pub use errors::RecordError;
pub use ports::{PartitionStore, RecordApi};
pub use service::{RecordDependencies, RecordService, RecordStats, RECORDED};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 3;
