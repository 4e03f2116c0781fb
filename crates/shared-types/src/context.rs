//! # Invocation Context
//!
//! Per-call execution context supplied by the hosting runtime.
//!
//! ## Properties
//!
//! - **Caller identity**: `CallerIdentity` is fixed at construction and cannot
//!   be altered by the operation.
//! - **Transient channel**: `TransientMap` carries payload data alongside the
//!   positional arguments. It is never persisted and each entry can be taken
//!   at most once.
//! - **Correlation**: `tx_id` identifies the invocation in logs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Identity of the caller that submitted the invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallerIdentity {
    /// The caller's owning organization (MSP id).
    pub org_id: String,
    /// The caller's individual identity within the organization.
    pub caller_id: String,
}

impl CallerIdentity {
    /// Create a caller identity.
    pub fn new(org_id: impl Into<String>, caller_id: impl Into<String>) -> Self {
        Self {
            org_id: org_id.into(),
            caller_id: caller_id.into(),
        }
    }
}

/// Invocation-scoped key/value side channel.
#[derive(Debug, Default, Clone)]
pub struct TransientMap {
    entries: HashMap<String, Vec<u8>>,
}

impl TransientMap {
    /// Create an empty transient channel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert an entry, replacing any previous value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Take an entry out of the channel.
    ///
    /// A second `take` for the same key returns `None`.
    pub fn take(&mut self, key: &str) -> Option<Vec<u8>> {
        self.entries.remove(key)
    }

    /// Whether an entry is still present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries not yet taken.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if every entry has been taken (or none was supplied).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for TransientMap
where
    K: Into<String>,
    V: Into<Vec<u8>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// The per-call context threaded through every operation.
///
/// Constructed by the dispatcher for exactly one invocation and dropped when
/// the invocation returns.
#[derive(Debug)]
pub struct InvocationContext {
    /// Unique id of this invocation (log correlation).
    pub tx_id: Uuid,
    caller: CallerIdentity,
    transient: TransientMap,
}

impl InvocationContext {
    /// Create a context for a new invocation.
    #[must_use]
    pub fn new(caller: CallerIdentity, transient: TransientMap) -> Self {
        Self {
            tx_id: Uuid::new_v4(),
            caller,
            transient,
        }
    }

    /// Create a context with an explicit transaction id.
    #[must_use]
    pub fn with_tx_id(tx_id: Uuid, caller: CallerIdentity, transient: TransientMap) -> Self {
        Self {
            tx_id,
            caller,
            transient,
        }
    }

    /// The caller identity.
    #[must_use]
    pub fn caller(&self) -> &CallerIdentity {
        &self.caller
    }

    /// Mutable access to the transient channel.
    pub fn transient_mut(&mut self) -> &mut TransientMap {
        &mut self.transient
    }
}

// =============================================================================
// TESTS
// =============================================================================
