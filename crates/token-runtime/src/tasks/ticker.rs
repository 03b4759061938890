//! Scheduler tick driver.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

use crate::container::SharedCurrencyToken;

/// Calls `tick()` on the currency token at a fixed period.
pub struct Ticker {
    currency: SharedCurrencyToken,
    period: Duration,
}

impl Ticker {
    pub fn new(currency: SharedCurrencyToken, period: Duration) -> Self {
        Self { currency, period }
    }

    /// Run the tick loop until `shutdown` changes.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(period_ms = self.period.as_millis() as u64, "[tk-runtime] Ticker started");

        let mut ticks = interval(self.period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticks.tick() => {
                    // Lock held for the sweep only; never across an await
                    let report = self.currency.lock().tick();
                    if !report.is_idle() {
                        info!(
                            executed = report.executed,
                            completed = report.completed,
                            cancelled = report.cancelled,
                            "[tk-01] Scheduler tick"
                        );
                    }
                }
                _ = shutdown.changed() => {
                    info!("[tk-runtime] Ticker stopped");
                    break;
                }
            }
        }
    }
}
