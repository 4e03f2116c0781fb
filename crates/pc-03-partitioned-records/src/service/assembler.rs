//! # Record Service - Read Path
//!
//! Joins the client's primary index entries with per-row private fetches.
//! Rows come back in encoded-key order, so `f1, f10, f2`.

use super::scan::ScanHandle;
use super::*;
use crate::domain::FileRow;
use pc_01_composite_keys::{client_prefix, file_id_from_primary};
use shared_types::resolve;
use tracing::debug;

const QUERY_ARGS: &str = "client ID and query operation as input";

impl RecordService {
    pub(crate) async fn list_records(
        &self,
        ctx: &InvocationContext,
        args: &[String],
    ) -> Result<ClientDataset, RecordError> {
        let [client_id, _ops] = args else {
            return Err(RecordError::ArgumentArity {
                expected: QUERY_ARGS,
                found: args.len(),
            });
        };

        let (org_id, _) = resolve(ctx);
        if let Some(reason) = self.consent_denial(client_id, org_id).await? {
            return Err(RecordError::QueryDenied {
                client_id: client_id.to_string(),
                org_id: org_id.to_string(),
                reason,
            });
        }

        let prefix = client_prefix(client_id)?;
        let mut scan = ScanHandle::new(self.world_state.range_scan(&prefix).await?);

        let mut dataset = ClientDataset::new(client_id.as_str());
        while let Some(entry) = scan.next().await? {
            let file_id = file_id_from_primary(&entry.key)?;
            let private = self.fetch_private(org_id, client_id, &file_id).await?;
            debug!(
                file_id = %file_id,
                public_len = entry.value.len(),
                private_len = private.len(),
                "Row assembled"
            );
            dataset
                .files
                .push(FileRow::join(file_id, &entry.value, &private));
        }
        scan.finish();

        self.stats.write().lists_served += 1;
        Ok(dataset)
    }

    async fn fetch_private(
        &self,
        org_id: &str,
        client_id: &str,
        file_id: &str,
    ) -> Result<Vec<u8>, RecordError> {
        let response = self.partitions.fetch(org_id, client_id, file_id).await?;
        if !response.is_success() {
            return Err(RecordError::PrivateFetchFailed {
                file_id: file_id.to_string(),
                status: response.status,
                message: response.message,
            });
        }
        Ok(response.payload)
    }
}
