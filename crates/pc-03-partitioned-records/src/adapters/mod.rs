//! # Adapters
//!
//! Partition store client over the service bus, and an in-memory partition
//! service for tests and the development runtime.

mod partition_client;
mod partition_store;

pub use partition_client::ServicePartitionClient;
pub use partition_store::InMemoryPartitionStore;
