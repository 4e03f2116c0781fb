//! # Partition Request
//!
//! Typed form of the calls sent to an organization's partition store.

use crate::errors::RecordError;
use shared_bus::WireArgs;

/// Default prefix of partition service names.
pub const DEFAULT_PARTITION_PREFIX: &str = "privatecc";

/// Name of the partition service owned by `org_id`.
pub fn partition_service_name(prefix: &str, org_id: &str) -> String {
    format!("{prefix}{org_id}")
}

/// Request understood by a partition store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartitionRequest {
    /// Store the private half of a record (upsert).
    Push {
        client_id: String,
        file_id: String,
        payload: Vec<u8>,
    },
    /// Fetch the private half of a record.
    Query { client_id: String, file_id: String },
}

impl PartitionRequest {
    const PUSH: &'static [u8] = b"push";
    const QUERY: &'static [u8] = b"query";

    /// Positional wire form.
    ///
    /// ```text
    /// Push  -> ["push", clientID, fileID, payload]
    /// Query -> ["query", clientID, fileID]
    /// ```
    pub fn to_wire_args(&self) -> WireArgs {
        match self {
            PartitionRequest::Push {
                client_id,
                file_id,
                payload,
            } => vec![
                Self::PUSH.to_vec(),
                client_id.as_bytes().to_vec(),
                file_id.as_bytes().to_vec(),
                payload.clone(),
            ],
            PartitionRequest::Query { client_id, file_id } => vec![
                Self::QUERY.to_vec(),
                client_id.as_bytes().to_vec(),
                file_id.as_bytes().to_vec(),
            ],
        }
    }

    /// Parse the positional wire form.
    pub fn from_wire_args(args: &[Vec<u8>]) -> Result<Self, RecordError> {
        match args {
            [op, client_id, file_id, payload] if op.as_slice() == Self::PUSH => {
                Ok(PartitionRequest::Push {
                    client_id: utf8(client_id)?,
                    file_id: utf8(file_id)?,
                    payload: payload.clone(),
                })
            }
            [op, client_id, file_id] if op.as_slice() == Self::QUERY => {
                Ok(PartitionRequest::Query {
                    client_id: utf8(client_id)?,
                    file_id: utf8(file_id)?,
                })
            }
            [op, ..] => Err(RecordError::InvalidRequest(format!(
                "{} with {} arguments",
                String::from_utf8_lossy(op),
                args.len() - 1
            ))),
            [] => Err(RecordError::InvalidRequest("missing opcode".to_string())),
        }
    }

    /// The opcode name, for logging.
    pub fn opcode(&self) -> &'static str {
        match self {
            PartitionRequest::Push { .. } => "push",
            PartitionRequest::Query { .. } => "query",
        }
    }
}

fn utf8(bytes: &[u8]) -> Result<String, RecordError> {
    String::from_utf8(bytes.to_vec())
        .map_err(|_| RecordError::InvalidRequest("argument is not UTF-8".to_string()))
}
