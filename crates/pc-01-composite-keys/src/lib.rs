//! # PC-01 Composite Keys - Ordered Index over a Key-Value World State
//!
//! **Subsystem ID:** 1
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! ## Purpose
//!
//! Lets a plain key-value store answer ordered prefix queries without a query
//! engine. An ordered tuple of string attributes is encoded under a namespace
//! into one byte key such that:
//!
//! | Property | Guarantee |
//! |----------|-----------|
//! | Ordering | Byte order of keys == lexicographic order of attribute tuples |
//! | Prefix | Keys sharing the first K encoded attributes are exactly the records whose first K attributes match |
//! | Round trip | `decode(encode(ns, attrs)) == (ns, attrs)` for any attribute bytes |
//!
//! ## Key Layout
//!
//! ```text
//! 0x00 | esc(namespace) 0x00 0x01 | esc(attr_0) 0x00 0x01 | ... | esc(attr_n) 0x00 0x01
//!
//! esc(x): every 0x00 byte inside x is written as 0x00 0xFF
//! ```
//!
//! ## Record Index
//!
//! Every stored client record is maintained under three namespaces:
//!
//! | Namespace | Attributes | Value |
//! |-----------|------------|-------|
//! | `clid~fileid` | client, file | public payload |
//! | `clid~mspid~fileid` | client, org, file | `"X"` |
//! | `clid~fileid~mspid` | client, file, org | `"X"` |
//!
//! ## Outbound Dependencies
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | `WorldState` | Atomic batch writes and ordered prefix scans |

#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{FileBackedWorldState, InMemoryWorldState, SnapshotIterator};
pub use domain::{
    client_prefix, decode, encode, encode_prefix, file_id_from_primary, primary_key,
    record_entries, CompositeKey, IndexEntry, KeyError, StateError, CLIENT_FILE,
    CLIENT_FILE_ORG, CLIENT_ORG_FILE, COMPOSITE_KEY_MARKER, SENTINEL,
};
pub use ports::{BatchOperation, KeyValue, StateIterator, WorldState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 1;

#[cfg(test)]
mod tests {
    #[test]
    #[allow(clippy::const_is_empty)]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
