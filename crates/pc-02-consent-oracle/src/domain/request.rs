//! # Consent Request
//!
//! Typed form of the call sent to the consent authority. Opcode strings only
//! exist at the wire boundary.

use super::errors::ConsentError;
use shared_bus::WireArgs;

/// Request understood by the consent authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsentRequest {
    /// Look up the grants recorded for `client_id`.
    Query { client_id: String, org_id: String },
}

impl ConsentRequest {
    const QUERY: &'static [u8] = b"query";

    /// Positional wire form: `["query", clientID, organizationID]`.
    pub fn to_wire_args(&self) -> WireArgs {
        match self {
            ConsentRequest::Query { client_id, org_id } => vec![
                Self::QUERY.to_vec(),
                client_id.as_bytes().to_vec(),
                org_id.as_bytes().to_vec(),
            ],
        }
    }

    /// Parse the positional wire form.
    pub fn from_wire_args(args: &[Vec<u8>]) -> Result<Self, ConsentError> {
        let Some((opcode, rest)) = args.split_first() else {
            return Err(ConsentError::InvalidRequest("missing opcode".to_string()));
        };
        if opcode.as_slice() != Self::QUERY {
            return Err(ConsentError::InvalidRequest(format!(
                "unknown opcode {}",
                String::from_utf8_lossy(opcode)
            )));
        }
        let [client_id, org_id] = rest else {
            return Err(ConsentError::InvalidRequest(format!(
                "query expects 2 arguments, got {}",
                rest.len()
            )));
        };
        Ok(ConsentRequest::Query {
            client_id: utf8(client_id)?,
            org_id: utf8(org_id)?,
        })
    }
}

fn utf8(bytes: &[u8]) -> Result<String, ConsentError> {
    String::from_utf8(bytes.to_vec())
        .map_err(|_| ConsentError::InvalidRequest("argument is not UTF-8".to_string()))
}
