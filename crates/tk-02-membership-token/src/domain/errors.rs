//! Membership token error types.

use shared_types::{AccessError, ControllerKind, Principal};
use thiserror::Error;

/// Membership token error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MembershipError {
    /// Caller is not in the controller set of the capability.
    #[error("Unauthorized: {caller} is not a {capability} controller")]
    Unauthorized {
        caller: Principal,
        capability: ControllerKind,
    },

    /// `accept` from a principal that holds no pending membership.
    #[error("{0} has no pending membership")]
    NotPendingMember(Principal),

    /// `decline` from a principal that is neither pending nor a member.
    #[error("{0} is not a member")]
    NotAMember(Principal),
}

impl From<AccessError> for MembershipError {
    fn from(error: AccessError) -> Self {
        match error {
            AccessError::Unauthorized { caller, capability } => {
                MembershipError::Unauthorized { caller, capability }
            }
        }
    }
}
