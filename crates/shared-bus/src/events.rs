//! # Token Events
//!
//! Defines all event types that flow through the shared bus.

use serde::{Deserialize, Serialize};
use shared_types::{Account, ControllerKind, ControllerSet, Payload, Principal, Timestamp, TokenInfo};
use uuid::Uuid;

/// Membership transitions reported to consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MembershipStatus {
    Issued,
    Accepted,
    Declined,
    Revoked,
}

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenEvent {
    // =========================================================================
    // CURRENCY TOKEN
    // =========================================================================
    /// Funds moved. `from == None` is a mint, `to == None` a burn.
    TokenMove {
        from: Account,
        to: Account,
        qty: u64,
        payload: Payload,
    },

    /// Total supply changed after a mint or burn.
    TotalSupplyUpdate { new_total_supply: u64 },

    /// Token metadata was replaced.
    InfoUpdate { new_info: TokenInfo },

    // =========================================================================
    // MEMBERSHIP TOKEN
    // =========================================================================
    /// A membership record changed state.
    MembershipStatusUpdate {
        member: Principal,
        new_status: MembershipStatus,
    },

    // =========================================================================
    // SHARED
    // =========================================================================
    /// Voting power of a principal changed. Currency: the new balance.
    /// Membership: 1 for a member, 0 otherwise.
    VotingPowerUpdate {
        voter: Principal,
        new_voting_power: u64,
    },

    /// A controller set was replaced.
    ControllersUpdate {
        kind: ControllerKind,
        new_controllers: ControllerSet,
    },
}

/// Which service emitted an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Currency token events.
    CurrencyToken,
    /// Membership token events.
    MembershipToken,
    /// All events (no filtering).
    All,
}

/// An event as it travels on the bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Unique id for de-duplication by consumers.
    pub id: Uuid,
    /// Emitting service.
    pub topic: EventTopic,
    /// Host time at emission.
    pub emitted_at: Timestamp,
    pub event: TokenEvent,
}

impl EventRecord {
    pub fn new(topic: EventTopic, emitted_at: Timestamp, event: TokenEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            topic,
            emitted_at,
            event,
        }
    }
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self { topics }
    }

    /// Check if a record matches this filter.
    #[must_use]
    pub fn matches(&self, record: &EventRecord) -> bool {
        self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&record.topic)
    }
}
