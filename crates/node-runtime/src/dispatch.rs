//! # Dispatcher
//!
//! Routes an invocation by function name and turns every outcome into a wire
//! `Response`. Each invocation runs inside its own `invoke` span carrying the
//! transaction id and function name.

use pc_03_partitioned_records::{RecordApi, RecordError};
use shared_types::{InvocationContext, Response};
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};

/// Functions the chaincode answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    /// `push` / `pushClientData`: record a client file.
    Push,
    /// `query`: assemble a client's files.
    Query,
}

impl Function {
    /// Resolve a wire function name.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "push" | "pushClientData" => Some(Function::Push),
            "query" => Some(Function::Query),
            _ => None,
        }
    }
}

/// Thin router from invocation name to the record service.
#[derive(Clone)]
pub struct Dispatcher {
    records: Arc<dyn RecordApi>,
}

impl Dispatcher {
    pub fn new(records: Arc<dyn RecordApi>) -> Self {
        Self { records }
    }

    /// Run one invocation to completion.
    pub async fn invoke(&self, function: &str, args: &[String], ctx: InvocationContext) -> Response {
        let span = info_span!("invoke", tx_id = %ctx.tx_id, function = %function);
        self.route(function, args, ctx).instrument(span).await
    }

    async fn route(&self, function: &str, args: &[String], mut ctx: InvocationContext) -> Response {
        info!(args = args.len(), "Invoke");

        let Some(parsed) = Function::parse(function) else {
            warn!("Unknown action: {function}");
            return Response::error(format!("Unknown action: {function}"));
        };

        let result: Result<Vec<u8>, RecordError> = match parsed {
            Function::Push => self.records.put(&mut ctx, args).await,
            Function::Query => self
                .records
                .list(&ctx, args)
                .await
                .and_then(|dataset| dataset.to_json_bytes()),
        };

        match result {
            Ok(payload) => Response::success(payload),
            Err(e) => {
                warn!(error = %e, "Invocation failed");
                Response::error(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_names() {
        assert_eq!(Function::parse("push"), Some(Function::Push));
        assert_eq!(Function::parse("pushClientData"), Some(Function::Push));
        assert_eq!(Function::parse("query"), Some(Function::Query));
        assert_eq!(Function::parse("Query"), None);
        assert_eq!(Function::parse("delete"), None);
    }
}
