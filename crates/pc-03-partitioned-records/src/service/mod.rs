//! # Record Service
//!
//! The service implementing the Record API.
//!
//! ## Architecture
//!
//! This service:
//! 1. Gates every operation on a fresh consent check
//! 2. Splits writes between the local world state and the caller's partition
//! 3. Joins both halves back on read
//! 4. Uses dependency injection for all external collaborators

mod assembler;
mod scan;
mod store;

use crate::domain::ClientDataset;
use crate::errors::RecordError;
use crate::ports::inbound::RecordApi;
use crate::ports::outbound::PartitionStore;
use async_trait::async_trait;
use parking_lot::RwLock;
use pc_01_composite_keys::WorldState;
use pc_02_consent_oracle::{ConsentApi, ConsentDecision, DenialReason};
use shared_types::InvocationContext;
use std::sync::Arc;
use tracing::{info, instrument};

/// Success payload of `put`.
pub const RECORDED: &[u8] = b"Data recorded";

/// Counters for record operations.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordStats {
    /// Records whose public half was committed.
    pub records_written: u64,
    /// Private pushes the partition store refused.
    pub private_push_rejected: u64,
    /// Queries answered.
    pub lists_served: u64,
    /// Operations refused for lack of consent.
    pub consent_denied: u64,
}

/// Dependencies for `RecordService`.
pub struct RecordDependencies {
    pub world_state: Arc<dyn WorldState>,
    pub consent: Arc<dyn ConsentApi>,
    pub partitions: Arc<dyn PartitionStore>,
}

/// The Record Service.
pub struct RecordService {
    pub(crate) world_state: Arc<dyn WorldState>,
    pub(crate) consent: Arc<dyn ConsentApi>,
    pub(crate) partitions: Arc<dyn PartitionStore>,
    pub(crate) stats: RwLock<RecordStats>,
}

impl RecordService {
    /// Create a Record Service with the given dependencies.
    pub fn new(deps: RecordDependencies) -> Self {
        Self {
            world_state: deps.world_state,
            consent: deps.consent,
            partitions: deps.partitions,
            stats: RwLock::new(RecordStats::default()),
        }
    }

    /// Snapshot of the operation counters.
    pub fn stats(&self) -> RecordStats {
        self.stats.read().clone()
    }

    /// Fail with `ConsentDenied` unless the authority grants `org_id` access
    /// to `client_id`.
    /// Ask the consent oracle about `(client_id, org_id)`. `Some(reason)`
    /// when access is denied.
    pub(crate) async fn consent_denial(
        &self,
        client_id: &str,
        org_id: &str,
    ) -> Result<Option<DenialReason>, RecordError> {
        match self.consent.evaluate(client_id, org_id).await? {
            ConsentDecision::Granted => Ok(None),
            ConsentDecision::Denied(reason) => {
                self.stats.write().consent_denied += 1;
                Ok(Some(reason))
            }
        }
    }
}

#[async_trait]
impl RecordApi for RecordService {
    #[instrument(skip(self, ctx))]
    async fn put(&self, ctx: &mut InvocationContext, args: &[String]) -> Result<Vec<u8>, RecordError> {
        let result = self.put_record(ctx, args).await;
        if result.is_ok() {
            info!("Client data recorded");
        }
        result
    }

    #[instrument(skip(self, ctx))]
    async fn list(&self, ctx: &InvocationContext, args: &[String]) -> Result<ClientDataset, RecordError> {
        let result = self.list_records(ctx, args).await;
        if let Ok(dataset) = &result {
            info!(files = dataset.files.len(), "Client dataset assembled");
        }
        result
    }
}
