//! # Public-Record Chaincode Runtime
//!
//! Development entry point. Wires every subsystem in-process, replays a JSON
//! session and prints one JSON line per invocation result.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, then environment, then CLI flags)
//! 2. Initialize logging
//! 3. Build the runtime container
//! 4. Replay the session through the dispatcher

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use node_runtime::{run_session, RuntimeConfig, RuntimeContainer, Session};

/// Replay a session of consent grants and invocations.
#[derive(Parser, Debug)]
#[command(name = "node-runtime")]
#[command(about = "Run public-record chaincode invocations against in-process collaborators")]
struct Args {
    /// Session file (JSON)
    session: PathBuf,

    /// Persist the world state to this file (overrides PC_STATE_FILE)
    #[arg(long)]
    state_file: Option<PathBuf>,

    /// Cross-service call timeout in milliseconds (overrides PC_CALL_TIMEOUT_MS)
    #[arg(long)]
    timeout_ms: Option<u64>,
}

/// Load configuration from environment and CLI flags.
fn load_config(args: &Args) -> RuntimeConfig {
    let mut config = RuntimeConfig::from_env();

    if let Some(path) = &args.state_file {
        config.storage.state_file = Some(path.clone());
    }
    if let Some(ms) = args.timeout_ms {
        config.services.call_timeout_ms = ms;
    }

    config
}

fn init_logging(config: &RuntimeConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .context("invalid log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to install tracing subscriber")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args);
    init_logging(&config)?;

    let session = Session::load(&args.session)
        .with_context(|| format!("loading session {}", args.session.display()))?;
    let container = RuntimeContainer::new(config).context("building runtime")?;

    for outcome in run_session(&container, &session).await {
        println!("{}", serde_json::to_string(&outcome)?);
    }

    info!("Session complete");
    Ok(())
}
