//! Membership token entities.

use serde::{Deserialize, Serialize};
use shared_types::{ControllerSet, Principal};

/// State of one principal's membership.
///
/// ```text
/// NonMember ──issue──→ PendingMember ──accept──→ Member
///     ↑                    │    │                  │
///     └───── decline ──────┘    │                  │
///     └───── revoke ────────────┘                  │
///     └───── decline / revoke ─────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MembershipState {
    #[default]
    NonMember,
    PendingMember,
    Member,
}

impl MembershipState {
    /// Voting power attached to the state.
    pub fn voting_power(self) -> u64 {
        match self {
            MembershipState::Member => 1,
            MembershipState::NonMember | MembershipState::PendingMember => 0,
        }
    }
}

/// Controller sets of the membership token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipControllers {
    pub issue_controllers: ControllerSet,
}

impl MembershipControllers {
    pub fn new(deployer: Principal) -> Self {
        Self {
            issue_controllers: ControllerSet::single(deployer),
        }
    }
}
