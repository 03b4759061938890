//! Currency token error types.
//!
//! Every variant aborts the call that produced it with no partial mutation.

use shared_types::{AccessError, ControllerKind, Principal, RecurrenceError};
use thiserror::Error;

/// Currency token error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    /// Caller is not in the controller set of the capability.
    #[error("Unauthorized: {caller} is not a {capability} controller")]
    Unauthorized {
        caller: Principal,
        capability: ControllerKind,
    },

    /// Debited account holds less than the requested quantity.
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: u64, available: u64 },

    /// Zero quantity.
    #[error("Invalid amount: {qty}")]
    InvalidAmount { qty: u64 },

    /// Recurrence spec that can never be scheduled.
    #[error("Invalid recurrence: {reason}")]
    InvalidRecurrence { reason: RecurrenceError },

    /// A credit would overflow a balance or the total supply.
    #[error("Supply overflow")]
    SupplyOverflow,
}

impl From<AccessError> for CurrencyError {
    fn from(error: AccessError) -> Self {
        match error {
            AccessError::Unauthorized { caller, capability } => {
                CurrencyError::Unauthorized { caller, capability }
            }
        }
    }
}

impl From<RecurrenceError> for CurrencyError {
    fn from(reason: RecurrenceError) -> Self {
        CurrencyError::InvalidRecurrence { reason }
    }
}
