//! Bus record logger.

use tokio::sync::watch;
use tracing::{info, warn};

use shared_bus::Subscription;

/// Writes each bus record as one `EVENT_FLOW_JSON` log line.
pub struct EventLogHandler {
    subscription: Subscription,
}

impl EventLogHandler {
    pub fn new(subscription: Subscription) -> Self {
        Self { subscription }
    }

    /// Run the handler loop.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!("[tk-runtime] Event log handler started");

        loop {
            tokio::select! {
                record = self.subscription.recv() => {
                    let Some(record) = record else {
                        warn!("[tk-runtime] Event bus closed, stopping event log");
                        break;
                    };
                    match serde_json::to_string(&record) {
                        Ok(line) => info!("EVENT_FLOW_JSON {}", line),
                        Err(e) => warn!(id = %record.id, "[tk-runtime] Unencodable event: {}", e),
                    }
                }
                _ = shutdown.changed() => {
                    info!("[tk-runtime] Event log handler stopped");
                    break;
                }
            }
        }
    }
}
