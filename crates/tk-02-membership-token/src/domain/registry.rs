//! # Membership Registry
//!
//! Per-principal membership state plus the issue controller set.
//!
//! ## Transitions
//!
//! | Operation | From | To | Otherwise |
//! |-----------|------|----|-----------|
//! | `issue` | NonMember | PendingMember | no-op |
//! | `accept` | PendingMember | Member | `NotPendingMember` |
//! | `decline` | PendingMember, Member | NonMember | `NotAMember` |
//! | `revoke` | PendingMember, Member | NonMember | no-op |
//!
//! Principals back at NonMember are dropped from the map, so absence and
//! NonMember are the same thing.

use std::collections::HashMap;

use shared_bus::{MembershipStatus, TokenEvent};
use shared_types::{ControllerKind, ControllerSet, Principal};

use super::entities::{MembershipControllers, MembershipState};
use super::errors::MembershipError;

/// Membership records and their controllers.
#[derive(Debug, Clone)]
pub struct MembershipRegistry {
    records: HashMap<Principal, MembershipState>,
    controllers: MembershipControllers,
}

impl MembershipRegistry {
    /// An empty registry; `deployer` may issue.
    pub fn new(deployer: Principal) -> Self {
        Self {
            records: HashMap::new(),
            controllers: MembershipControllers::new(deployer),
        }
    }

    pub fn state_of(&self, principal: &Principal) -> MembershipState {
        self.records.get(principal).copied().unwrap_or_default()
    }

    pub fn is_member(&self, principal: &Principal) -> bool {
        self.state_of(principal) == MembershipState::Member
    }

    pub fn is_pending_member(&self, principal: &Principal) -> bool {
        self.state_of(principal) == MembershipState::PendingMember
    }

    pub fn total_members(&self) -> usize {
        self.records
            .values()
            .filter(|state| **state == MembershipState::Member)
            .count()
    }

    /// Principals holding a record (pending or member).
    #[cfg(test)]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn controllers(&self) -> &MembershipControllers {
        &self.controllers
    }

    /// Checks the issue capability, the only privileged one on this token.
    ///
    /// # Errors
    /// - `Unauthorized` unless `caller` is an issue controller
    pub fn authorize_issue(&self, caller: &Principal) -> Result<(), MembershipError> {
        Ok(self
            .controllers
            .issue_controllers
            .authorize(caller, ControllerKind::Issue)?)
    }

    /// Offers a membership to each NonMember in `principals`.
    pub fn issue(&mut self, principals: &[Principal]) -> Vec<TokenEvent> {
        let mut events = Vec::new();
        for principal in principals {
            if self.state_of(principal) == MembershipState::NonMember {
                events.extend(self.transition(principal, MembershipState::PendingMember, MembershipStatus::Issued));
            }
        }
        events
    }

    /// # Errors
    /// - `NotPendingMember` unless `principal` holds a pending membership
    pub fn accept(&mut self, principal: &Principal) -> Result<Vec<TokenEvent>, MembershipError> {
        if self.state_of(principal) != MembershipState::PendingMember {
            return Err(MembershipError::NotPendingMember(principal.clone()));
        }
        Ok(self.transition(principal, MembershipState::Member, MembershipStatus::Accepted))
    }

    /// Gives up a pending or active membership.
    ///
    /// # Errors
    /// - `NotAMember` if `principal` is a NonMember
    pub fn decline(&mut self, principal: &Principal) -> Result<Vec<TokenEvent>, MembershipError> {
        if self.state_of(principal) == MembershipState::NonMember {
            return Err(MembershipError::NotAMember(principal.clone()));
        }
        Ok(self.transition(principal, MembershipState::NonMember, MembershipStatus::Declined))
    }

    /// Withdraws the membership of each pending or member principal.
    pub fn revoke(&mut self, principals: &[Principal]) -> Vec<TokenEvent> {
        let mut events = Vec::new();
        for principal in principals {
            if self.state_of(principal) != MembershipState::NonMember {
                events.extend(self.transition(principal, MembershipState::NonMember, MembershipStatus::Revoked));
            }
        }
        events
    }

    /// Replaces the issue controller set wholesale, returning the old one.
    pub fn replace_issue_controllers(&mut self, new_controllers: ControllerSet) -> (ControllerSet, TokenEvent) {
        let event = TokenEvent::ControllersUpdate {
            kind: ControllerKind::Issue,
            new_controllers: new_controllers.clone(),
        };
        (self.controllers.issue_controllers.replace(new_controllers), event)
    }

    fn transition(&mut self, principal: &Principal, to: MembershipState, status: MembershipStatus) -> Vec<TokenEvent> {
        let from = self.state_of(principal);
        if to == MembershipState::NonMember {
            self.records.remove(principal);
        } else {
            self.records.insert(principal.clone(), to);
        }

        let mut events = vec![TokenEvent::MembershipStatusUpdate {
            member: principal.clone(),
            new_status: status,
        }];
        if from.voting_power() != to.voting_power() {
            events.push(TokenEvent::VotingPowerUpdate {
                voter: principal.clone(),
                new_voting_power: to.voting_power(),
            });
        }
        events
    }
}
