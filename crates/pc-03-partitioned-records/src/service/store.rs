//! # Record Service - Write Path
//!
//! Consent-gated split write. The private half goes to the caller's
//! partition first; the public half and both marker keys are then committed
//! locally in one batch. The two commits are independent.

use super::*;
use crate::domain::{TRANSIENT_PRIVATE, TRANSIENT_PUBLIC};
use pc_01_composite_keys::{record_entries, BatchOperation};
use shared_types::resolve;
use tracing::{debug, warn};

const PUSH_ARGS: &str = "client ID and file id";

impl RecordService {
    pub(crate) async fn put_record(
        &self,
        ctx: &mut InvocationContext,
        args: &[String],
    ) -> Result<Vec<u8>, RecordError> {
        let [client_id, file_id] = args else {
            return Err(RecordError::ArgumentArity {
                expected: PUSH_ARGS,
                found: args.len(),
            });
        };

        let (org_id, caller_id) = resolve(ctx);
        let org_id = org_id.to_string();
        debug!(client_id = %client_id, org_id = %org_id, caller_id = %caller_id, "Record client data");

        if let Some(reason) = self.consent_denial(client_id, &org_id).await? {
            return Err(RecordError::ConsentDenied {
                client_id: client_id.to_string(),
                org_id,
                reason,
            });
        }

        // Transient fields are only read once consent is established.
        let transient = ctx.transient_mut();
        let public = transient
            .take(TRANSIENT_PUBLIC)
            .ok_or(RecordError::MissingTransient(TRANSIENT_PUBLIC))?;
        let private = transient
            .take(TRANSIENT_PRIVATE)
            .ok_or(RecordError::MissingTransient(TRANSIENT_PRIVATE))?;

        let public_len = public.len();
        let batch: Vec<BatchOperation> = record_entries(client_id, &org_id, file_id, public)?
            .into_iter()
            .map(BatchOperation::from)
            .collect();

        let response = self
            .partitions
            .push(&org_id, client_id, file_id, private)
            .await?;
        if !response.is_success() {
            self.stats.write().private_push_rejected += 1;
            warn!(
                status = response.status,
                message = %response.message,
                "Private data push rejected; recording public half anyway"
            );
        }

        if tracing::enabled!(tracing::Level::DEBUG) {
            for op in &batch {
                debug!(key = %hex::encode(op.key()), "Index entry");
            }
        }
        self.world_state.apply_batch(batch).await?;
        self.stats.write().records_written += 1;

        debug!(public_len, "Public data recorded");
        Ok(RECORDED.to_vec())
    }
}
