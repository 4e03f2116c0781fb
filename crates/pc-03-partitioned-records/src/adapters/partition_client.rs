use crate::domain::{partition_service_name, PartitionRequest, DEFAULT_PARTITION_PREFIX};
use crate::ports::outbound::PartitionStore;
use async_trait::async_trait;
use shared_bus::ServiceClient;
use shared_types::{CrossServiceError, Response};
use std::sync::Arc;
use tracing::debug;

/// `PartitionStore` that calls the `<prefix><orgID>` service.
pub struct ServicePartitionClient {
    client: Arc<dyn ServiceClient>,
    prefix: String,
}

impl ServicePartitionClient {
    /// Client for services named `privatecc<orgID>`.
    pub fn new(client: Arc<dyn ServiceClient>) -> Self {
        Self::with_prefix(client, DEFAULT_PARTITION_PREFIX)
    }

    /// Client for services named `<prefix><orgID>`.
    pub fn with_prefix(client: Arc<dyn ServiceClient>, prefix: impl Into<String>) -> Self {
        Self {
            client,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    async fn call(&self, org_id: &str, request: PartitionRequest) -> Result<Response, CrossServiceError> {
        let service = partition_service_name(&self.prefix, org_id);
        debug!(service = %service, opcode = request.opcode(), "Calling partition store");
        self.client.invoke(&service, request.to_wire_args()).await
    }
}

#[async_trait]
impl PartitionStore for ServicePartitionClient {
    async fn push(
        &self,
        org_id: &str,
        client_id: &str,
        file_id: &str,
        payload: Vec<u8>,
    ) -> Result<Response, CrossServiceError> {
        let request = PartitionRequest::Push {
            client_id: client_id.to_string(),
            file_id: file_id.to_string(),
            payload,
        };
        self.call(org_id, request).await
    }

    async fn fetch(
        &self,
        org_id: &str,
        client_id: &str,
        file_id: &str,
    ) -> Result<Response, CrossServiceError> {
        let request = PartitionRequest::Query {
            client_id: client_id.to_string(),
            file_id: file_id.to_string(),
        };
        self.call(org_id, request).await
    }
}
