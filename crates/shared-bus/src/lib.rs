//! # Shared Bus - Event Hook for Token Services
//!
//! Carries the events emitted by the token services to whoever listens:
//! indexers, wallets, governance tooling. The services never read the bus.
//!
//! ## Pass-Through Rule
//!
//! - The opaque `payload` attached to a mint/transfer is forwarded untouched
//! - Publishing never fails a token call; an event with no subscriber is dropped
//!
//! ```text
//! ┌──────────────────┐                    ┌──────────────┐
//! │ Currency token   │    publish()       │  Consumer    │
//! │ Membership token │ ──────┐            │              │
//! └──────────────────┘       │            └──────────────┘
//!                            ▼                    ↑
//!                      ┌──────────────┐          │
//!                      │  Event Bus   │ ─────────┘
//!                      └──────────────┘  subscribe()
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventRecord, EventTopic, MembershipStatus, TokenEvent};
pub use publisher::{EventPublisher, InMemoryEventBus, NoOpPublisher};
pub use subscriber::{Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before it starts lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
