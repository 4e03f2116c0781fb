//! # Client Dataset
//!
//! The joined view returned by a query.

use crate::errors::RecordError;
use serde::{Deserialize, Serialize};

/// One file of a client, public and private halves joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRow {
    pub file: String,
    #[serde(rename = "pubData")]
    pub pub_data: String,
    #[serde(rename = "prvData")]
    pub prv_data: String,
}

impl FileRow {
    /// Join both halves. Payloads are rendered as UTF-8, lossily.
    pub fn join(file: String, public: &[u8], private: &[u8]) -> Self {
        Self {
            file,
            pub_data: String::from_utf8_lossy(public).into_owned(),
            prv_data: String::from_utf8_lossy(private).into_owned(),
        }
    }
}

/// All files of one client, in encoded-key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDataset {
    #[serde(rename = "ClientID")]
    pub client_id: String,
    #[serde(rename = "Files")]
    pub files: Vec<FileRow>,
}

impl ClientDataset {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            files: Vec::new(),
        }
    }

    /// Wire form: `{"ClientID": .., "Files": [..]}`.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, RecordError> {
        serde_json::to_vec(self).map_err(|e| RecordError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let mut dataset = ClientDataset::new("C1");
        dataset.files.push(FileRow::join("F1".to_string(), b"pub1", b"priv1"));

        let json = String::from_utf8(dataset.to_json_bytes().unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"ClientID":"C1","Files":[{"file":"F1","pubData":"pub1","prvData":"priv1"}]}"#
        );
    }

    #[test]
    fn test_empty_dataset() {
        let json = ClientDataset::new("C9").to_json_bytes().unwrap();
        assert_eq!(json, br#"{"ClientID":"C9","Files":[]}"#.to_vec());
    }

    #[test]
    fn test_non_utf8_payload_is_lossy() {
        let row = FileRow::join("F1".to_string(), &[0x70, 0xFF], b"");
        assert_eq!(row.pub_data, "p\u{FFFD}");
        assert_eq!(row.prv_data, "");
    }
}
