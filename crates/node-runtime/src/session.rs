//! # Session Files
//!
//! A session is a JSON document of consent grants followed by invocations,
//! replayed in order against a fresh runtime.
//!
//! ```json
//! {
//!   "grants": [{ "client_id": "C1", "org_id": "ORG1" }],
//!   "invocations": [
//!     { "function": "push", "args": ["C1", "F1"], "org_id": "ORG1",
//!       "transient": { "public": "pub1", "private": "priv1" } },
//!     { "function": "query", "args": ["C1", "all"], "org_id": "ORG1" }
//!   ]
//! }
//! ```

use crate::container::RuntimeContainer;
use crate::dispatch::Dispatcher;
use serde::{Deserialize, Serialize};
use shared_types::{CallerIdentity, InvocationContext, Response, TransientMap};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors while loading a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Cannot read session file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid session file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One recorded consent grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub client_id: String,
    pub org_id: String,
}

/// One invocation to replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
    pub org_id: String,
    #[serde(default = "default_caller")]
    pub caller_id: String,
    /// Transient entries, UTF-8.
    #[serde(default)]
    pub transient: BTreeMap<String, String>,
}

fn default_caller() -> String {
    "session-user".to_string()
}

impl Invocation {
    /// Build the invocation context for this call.
    pub fn context(&self) -> InvocationContext {
        let transient: TransientMap = self
            .transient
            .iter()
            .map(|(k, v)| (k.clone(), v.as_bytes().to_vec()))
            .collect();
        InvocationContext::new(
            CallerIdentity::new(self.org_id.clone(), self.caller_id.clone()),
            transient,
        )
    }
}

/// A full session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Organizations that get a partition store even if they never invoke.
    #[serde(default)]
    pub organizations: Vec<String>,
    #[serde(default)]
    pub grants: Vec<Grant>,
    #[serde(default)]
    pub invocations: Vec<Invocation>,
}

impl Session {
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, SessionError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Every organization named anywhere in the session.
    pub fn organizations(&self) -> BTreeSet<&str> {
        self.organizations
            .iter()
            .map(String::as_str)
            .chain(self.grants.iter().map(|g| g.org_id.as_str()))
            .chain(self.invocations.iter().map(|i| i.org_id.as_str()))
            .collect()
    }
}

/// Result line printed for each invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub function: String,
    pub status: i32,
    pub message: String,
    /// Payload, UTF-8 lossy.
    pub payload: String,
}

impl Outcome {
    fn new(function: &str, response: &Response) -> Self {
        Self {
            function: function.to_string(),
            status: response.status,
            message: response.message.clone(),
            payload: response.payload_utf8(),
        }
    }
}

/// Replay `session` against `container`.
pub async fn run_session(container: &RuntimeContainer, session: &Session) -> Vec<Outcome> {
    for org_id in session.organizations() {
        container.partition(org_id);
    }

    let authority = container.authority();
    for grant in &session.grants {
        authority.grant(&grant.client_id, &grant.org_id);
    }
    info!(
        grants = session.grants.len(),
        invocations = session.invocations.len(),
        "Session loaded"
    );

    let dispatcher = Dispatcher::new(container.records());
    let mut outcomes = Vec::with_capacity(session.invocations.len());
    for invocation in &session.invocations {
        let response = dispatcher
            .invoke(&invocation.function, &invocation.args, invocation.context())
            .await;
        outcomes.push(Outcome::new(&invocation.function, &response));
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_defaults() {
        let session = Session::from_json(
            r#"{"invocations":[{"function":"query","args":["C1","all"],"org_id":"ORG1"}]}"#,
        )
        .unwrap();

        assert!(session.grants.is_empty());
        let inv = &session.invocations[0];
        assert_eq!(inv.caller_id, "session-user");
        assert!(inv.transient.is_empty());
    }

    #[test]
    fn test_organizations_union() {
        let session = Session::from_json(
            r#"{
                "organizations": ["ORG3"],
                "grants": [{"client_id":"C1","org_id":"ORG2"}],
                "invocations": [{"function":"push","org_id":"ORG1"}]
            }"#,
        )
        .unwrap();

        let orgs: Vec<&str> = session.organizations().into_iter().collect();
        assert_eq!(orgs, vec!["ORG1", "ORG2", "ORG3"]);
    }

    #[test]
    fn test_context_carries_transient() {
        let session = Session::from_json(
            r#"{"invocations":[{"function":"push","args":["C1","F1"],"org_id":"ORG1",
                "caller_id":"alice","transient":{"public":"pub1","private":"priv1"}}]}"#,
        )
        .unwrap();

        let mut ctx = session.invocations[0].context();
        assert_eq!(ctx.caller(), &CallerIdentity::new("ORG1", "alice"));
        assert_eq!(ctx.transient_mut().take("public"), Some(b"pub1".to_vec()));
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            Session::from_json("{\"grants\": 3}"),
            Err(SessionError::Parse(_))
        ));
    }
}
