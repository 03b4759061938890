//! # Event Subscriber
//!
//! Defines the subscription side of the event bus.

use crate::events::{EventFilter, EventRecord};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::debug;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The event bus was closed.
    #[error("Event bus closed")]
    Closed,
}

/// A filtered view of the bus.
///
/// Records published before the subscription was created are never seen.
/// Dropping the handle detaches it from the bus.
pub struct Subscription {
    receiver: broadcast::Receiver<EventRecord>,
    filter: EventFilter,
}

impl Subscription {
    pub(crate) fn new(receiver: broadcast::Receiver<EventRecord>, filter: EventFilter) -> Self {
        Self { receiver, filter }
    }

    /// Waits for the next record that matches the filter.
    ///
    /// Returns `None` once the bus is dropped. A lagging subscriber skips
    /// the overwritten records and keeps going.
    pub async fn recv(&mut self) -> Option<EventRecord> {
        loop {
            match self.receiver.recv().await {
                Ok(record) if self.filter.matches(&record) => return Some(record),
                Ok(_) => {}
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "Subscriber lagged, records dropped");
                }
            }
        }
    }

    /// Takes the next buffered matching record, if any.
    ///
    /// # Errors
    /// - `SubscriptionError::Closed` once the bus is dropped
    pub fn try_recv(&mut self) -> Result<Option<EventRecord>, SubscriptionError> {
        loop {
            match self.receiver.try_recv() {
                Ok(record) if self.filter.matches(&record) => return Ok(Some(record)),
                Ok(_) | Err(broadcast::error::TryRecvError::Lagged(_)) => {}
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => return Err(SubscriptionError::Closed),
            }
        }
    }

    /// Drain every matching record currently buffered.
    pub fn drain(&mut self) -> Vec<EventRecord> {
        let mut records = Vec::new();
        while let Ok(Some(record)) = self.try_recv() {
            records.push(record);
        }
        records
    }
}
