//! # Record Index Namespaces
//!
//! The three index namespaces maintained for every client record. Only the
//! primary namespace is read by the query path; the two marker namespaces
//! support alternate lookup orders and MUST be written by every writer.

use super::codec::{decode, encode, encode_prefix};
use super::errors::KeyError;

/// Primary namespace `(client, file)`. Value: public payload.
pub const CLIENT_FILE: &str = "clid~fileid";

/// Marker namespace `(client, org, file)`. Value: [`SENTINEL`].
pub const CLIENT_ORG_FILE: &str = "clid~mspid~fileid";

/// Marker namespace `(client, file, org)`. Value: [`SENTINEL`].
pub const CLIENT_FILE_ORG: &str = "clid~fileid~mspid";

/// Value stored under both marker namespaces.
pub const SENTINEL: &[u8] = b"X";

/// One key/value pair to be written to the world state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Encoded composite key.
    pub key: Vec<u8>,
    /// Value bytes.
    pub value: Vec<u8>,
}

/// Primary key for `(client_id, file_id)`.
pub fn primary_key(client_id: &str, file_id: &str) -> Result<Vec<u8>, KeyError> {
    encode(CLIENT_FILE, &[client_id, file_id])
}

/// Range-scan prefix covering every primary entry of `client_id`.
pub fn client_prefix(client_id: &str) -> Result<Vec<u8>, KeyError> {
    encode_prefix(CLIENT_FILE, &[client_id])
}

/// The three index entries written for one record, primary first.
pub fn record_entries(
    client_id: &str,
    org_id: &str,
    file_id: &str,
    public_payload: Vec<u8>,
) -> Result<[IndexEntry; 3], KeyError> {
    Ok([
        IndexEntry {
            key: primary_key(client_id, file_id)?,
            value: public_payload,
        },
        IndexEntry {
            key: encode(CLIENT_ORG_FILE, &[client_id, org_id, file_id])?,
            value: SENTINEL.to_vec(),
        },
        IndexEntry {
            key: encode(CLIENT_FILE_ORG, &[client_id, file_id, org_id])?,
            value: SENTINEL.to_vec(),
        },
    ])
}

/// Extract the file id from a primary-namespace key.
///
/// # Errors
///
/// * Decode errors from the codec
/// * `KeyError::NamespaceMismatch` - Key is not in [`CLIENT_FILE`]
/// * `KeyError::AttributeCount` - Key does not carry exactly two attributes
pub fn file_id_from_primary(key: &[u8]) -> Result<String, KeyError> {
    let (namespace, mut attributes) = decode(key)?;
    if namespace != CLIENT_FILE {
        return Err(KeyError::NamespaceMismatch {
            expected: CLIENT_FILE.to_string(),
            found: namespace,
        });
    }
    if attributes.len() != 2 {
        return Err(KeyError::AttributeCount {
            expected: 2,
            found: attributes.len(),
        });
    }
    Ok(attributes.swap_remove(1))
}
