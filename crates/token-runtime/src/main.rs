//! # Token Runtime
//!
//! Hosts a currency token and a membership token in one process.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RUST_LOG`, default `info`)
//! 2. Load configuration from `TK_*` environment variables
//! 3. Validate configuration (warn on development settings)
//! 4. Start background tasks
//! 5. Wait for Ctrl+C, then shut down

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use token_runtime::{RuntimeConfig, TokenRuntime};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load configuration
    let config = RuntimeConfig::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    // Anonymous controller is fine for local runs, never for deployments
    if let Err(e) = config.validate_for_production() {
        warn!("{}", e);
    }

    let runtime = TokenRuntime::new(config);
    runtime.start().await?;

    info!("Token runtime is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    runtime.shutdown().await;

    Ok(())
}
