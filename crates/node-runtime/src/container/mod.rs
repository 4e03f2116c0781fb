//! # Runtime Container
//!
//! Holds every subsystem instance and wires them together.
//!
//! ```text
//!                  InMemoryServiceBus
//!   consentcc ─────────► InMemoryConsentAuthority
//!   privatecc<org> ────► InMemoryPartitionStore (one per organization)
//!
//!   RecordService ── ConsentOracle ─────────┐
//!                 ── ServicePartitionClient ┴─► TimedServiceClient ─► bus
//!                 ── WorldState (memory | file)
//! ```

pub mod config;

pub use config::{ConfigError, LoggingConfig, RuntimeConfig, ServicesConfig, StorageConfig};

use parking_lot::RwLock;
use pc_01_composite_keys::{FileBackedWorldState, InMemoryWorldState, StateError, WorldState};
use pc_02_consent_oracle::{ConsentOracle, InMemoryConsentAuthority};
use pc_03_partitioned_records::{
    partition_service_name, InMemoryPartitionStore, RecordDependencies, RecordService,
    ServicePartitionClient,
};
use shared_bus::{InMemoryServiceBus, TimedServiceClient};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors while building the container.
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot open world state: {0}")]
    State(#[from] StateError),
}

/// Central container holding all subsystem instances.
pub struct RuntimeContainer {
    config: RuntimeConfig,
    bus: Arc<InMemoryServiceBus>,
    authority: Arc<InMemoryConsentAuthority>,
    partitions: RwLock<HashMap<String, Arc<InMemoryPartitionStore>>>,
    world_state: Arc<dyn WorldState>,
    records: Arc<RecordService>,
}

impl RuntimeContainer {
    /// Validate `config` and build every subsystem.
    pub fn new(config: RuntimeConfig) -> Result<Self, ContainerError> {
        config.validate()?;

        let bus = Arc::new(InMemoryServiceBus::new());
        let authority = Arc::new(InMemoryConsentAuthority::new());
        bus.register(config.services.consent_service.clone(), authority.clone());

        let world_state: Arc<dyn WorldState> = match &config.storage.state_file {
            Some(path) => Arc::new(FileBackedWorldState::open(path)?),
            None => Arc::new(InMemoryWorldState::new()),
        };

        let client = Arc::new(TimedServiceClient::new(
            bus.clone(),
            config.services.call_timeout_ms,
        ));
        let records = Arc::new(RecordService::new(RecordDependencies {
            world_state: world_state.clone(),
            consent: Arc::new(ConsentOracle::with_service_name(
                client.clone(),
                config.services.consent_service.clone(),
            )),
            partitions: Arc::new(ServicePartitionClient::with_prefix(
                client,
                config.services.partition_prefix.clone(),
            )),
        }));

        info!(
            consent_service = %config.services.consent_service,
            partition_prefix = %config.services.partition_prefix,
            call_timeout_ms = config.services.call_timeout_ms,
            persistent = config.storage.state_file.is_some(),
            "Runtime container initialized"
        );

        Ok(Self {
            config,
            bus,
            authority,
            partitions: RwLock::new(HashMap::new()),
            world_state,
            records,
        })
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn bus(&self) -> Arc<InMemoryServiceBus> {
        Arc::clone(&self.bus)
    }

    pub fn authority(&self) -> Arc<InMemoryConsentAuthority> {
        Arc::clone(&self.authority)
    }

    pub fn world_state(&self) -> Arc<dyn WorldState> {
        Arc::clone(&self.world_state)
    }

    pub fn records(&self) -> Arc<RecordService> {
        Arc::clone(&self.records)
    }

    /// The partition store of `org_id`, registering one on first use.
    pub fn partition(&self, org_id: &str) -> Arc<InMemoryPartitionStore> {
        if let Some(store) = self.partitions.read().get(org_id) {
            return Arc::clone(store);
        }

        let mut partitions = self.partitions.write();
        let store = partitions.entry(org_id.to_string()).or_insert_with(|| {
            let store = Arc::new(InMemoryPartitionStore::new());
            let service = partition_service_name(&self.config.services.partition_prefix, org_id);
            info!(service = %service, "Partition store registered");
            self.bus.register(service, store.clone());
            store
        });
        Arc::clone(store)
    }
}
