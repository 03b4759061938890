//! # Event Publisher
//!
//! Defines the publishing side of the event bus.
//!
//! Publishing is synchronous: token calls run to completion without
//! suspending, so emission must not await.

use crate::events::{EventFilter, EventRecord, EventTopic, TokenEvent};
use crate::subscriber::Subscription;
use crate::DEFAULT_CHANNEL_CAPACITY;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use shared_types::Timestamp;
use tokio::sync::broadcast;
use tracing::{debug, trace};

/// Trait for publishing events to the bus.
pub trait EventPublisher: Send + Sync {
    /// Publish a record to the bus.
    ///
    /// # Returns
    ///
    /// The number of active subscribers that received the record.
    fn publish(&self, record: EventRecord) -> usize;

    /// Get the total number of records published.
    fn events_published(&self) -> u64;

    /// Wrap a batch of events from one call into records and publish them
    /// in order.
    fn publish_all(&self, topic: EventTopic, emitted_at: Timestamp, events: Vec<TokenEvent>) -> usize {
        events
            .into_iter()
            .map(|event| self.publish(EventRecord::new(topic, emitted_at, event)))
            .sum()
    }
}

/// In-memory implementation of the event bus.
///
/// Uses `tokio::sync::broadcast` for multi-producer, multi-consumer semantics.
pub struct InMemoryEventBus {
    /// Broadcast sender for records.
    sender: broadcast::Sender<EventRecord>,

    /// Total records published.
    events_published: AtomicU64,

    /// Channel capacity.
    capacity: usize,
}

impl InMemoryEventBus {
    /// Create a new in-memory event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new in-memory event bus with specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            events_published: AtomicU64::new(0),
            capacity,
        }
    }

    /// Subscribe to records matching a filter.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(topics = ?filter.topics, "New subscription created");
        Subscription::new(self.sender.subscribe(), filter)
    }

    /// Get the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Get the channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for InMemoryEventBus {
    fn publish(&self, record: EventRecord) -> usize {
        let topic = record.topic;

        self.events_published.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(record) {
            Ok(receiver_count) => {
                debug!(topic = ?topic, receivers = receiver_count, "Event published");
                receiver_count
            }
            Err(_) => {
                trace!(topic = ?topic, "Event dropped (no receivers)");
                0
            }
        }
    }

    fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}

/// No-op publisher for running a service without a bus.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpPublisher;

impl EventPublisher for NoOpPublisher {
    fn publish(&self, _record: EventRecord) -> usize {
        0
    }

    fn events_published(&self) -> u64 {
        0
    }
}

impl<P: EventPublisher + ?Sized> EventPublisher for Arc<P> {
    fn publish(&self, record: EventRecord) -> usize {
        (**self).publish(record)
    }

    fn events_published(&self) -> u64 {
        (**self).events_published()
    }
}
