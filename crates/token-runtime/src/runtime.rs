//! # Token Runtime
//!
//! Owns the container, the background tasks and the shutdown signal.
//!
//! ## Startup Sequence
//!
//! 1. Wire services into the container (`new`)
//! 2. Start the event log handler
//! 3. Start the scheduler ticker
//!
//! ## Shutdown Sequence
//!
//! 1. Signal shutdown to all tasks
//! 2. Await every task

use std::sync::Arc;

use anyhow::Result;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use shared_bus::EventFilter;

use crate::container::{RuntimeConfig, TokenContainer};
use crate::dispatch::CallRouter;
use crate::tasks::{EventLogHandler, Ticker};

/// The in-process host of the token services.
pub struct TokenRuntime {
    /// Container with all hosted services.
    container: Arc<TokenContainer>,
    /// Handles of spawned tasks, drained on shutdown.
    tasks: Mutex<Vec<JoinHandle<()>>>,
    /// Shutdown signal sender.
    shutdown_tx: watch::Sender<bool>,
    /// Shutdown signal receiver.
    shutdown_rx: watch::Receiver<bool>,
}

impl TokenRuntime {
    /// Create a runtime with services on the system clock.
    pub fn new(config: RuntimeConfig) -> Self {
        Self::with_container(TokenContainer::new(config))
    }

    /// Create a runtime around an already wired container.
    pub fn with_container(container: TokenContainer) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            container: Arc::new(container),
            tasks: Mutex::new(Vec::new()),
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Start the background tasks.
    ///
    /// # Errors
    /// Fails if the configuration does not validate.
    pub async fn start(&self) -> Result<()> {
        info!("===========================================");
        info!("  Token Runtime v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        self.container.config.validate()?;

        let event_log = EventLogHandler::new(self.container.event_bus.subscribe(EventFilter::all()));
        let log_shutdown = self.shutdown_rx.clone();
        let log_task = tokio::spawn(event_log.run(log_shutdown));

        let ticker = Ticker::new(
            Arc::clone(&self.container.currency),
            self.container.config.tick_interval,
        );
        let tick_shutdown = self.shutdown_rx.clone();
        let tick_task = tokio::spawn(ticker.run(tick_shutdown));

        self.tasks.lock().extend([log_task, tick_task]);

        info!(
            controller = %self.container.config.controller,
            tick_interval_ms = self.container.config.tick_interval.as_millis() as u64,
            "Token services running"
        );
        Ok(())
    }

    /// A router for delivering calls.
    pub fn router(&self) -> CallRouter {
        self.container.router()
    }

    /// Get a reference to the container.
    pub fn container(&self) -> Arc<TokenContainer> {
        Arc::clone(&self.container)
    }

    /// Shutdown the runtime gracefully.
    pub async fn shutdown(&self) {
        info!("Initiating graceful shutdown...");

        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }

        let tasks = std::mem::take(&mut *self.tasks.lock());
        for task in tasks {
            if let Err(e) = task.await {
                warn!("Task ended abnormally: {}", e);
            }
        }

        info!("Shutdown complete");
    }
}
