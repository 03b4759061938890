//! Dispatch error types.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tk_01_currency_token::CurrencyError;
use tk_02_membership_token::MembershipError;

use super::Canister;

/// Reason class of a rejected call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectCode {
    /// No canister with that name is hosted.
    UnknownCanister,
    /// The canister has no such method.
    UnknownMethod,
    /// Arguments did not decode into the method's request type.
    MalformedArguments,
    /// The caller lacks the capability the method requires.
    Unauthorized,
    /// The canister refused the call.
    CanisterReject,
    /// The reply could not be encoded.
    Internal,
}

impl fmt::Display for RejectCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The generic rejected-call reply returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{code}: {message}")]
pub struct CallRejection {
    pub code: RejectCode,
    pub message: String,
}

/// Dispatch failures before, inside or after a canister method.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("Unknown canister: {0}")]
    UnknownCanister(String),

    #[error("Unknown method {canister}.{method}")]
    UnknownMethod { canister: Canister, method: String },

    #[error("Malformed arguments for {method}: {reason}")]
    MalformedArguments { method: String, reason: String },

    #[error("Reply encoding failed: {0}")]
    Encoding(String),

    #[error(transparent)]
    Currency(#[from] CurrencyError),

    #[error(transparent)]
    Membership(#[from] MembershipError),
}

impl RuntimeError {
    pub fn code(&self) -> RejectCode {
        match self {
            RuntimeError::UnknownCanister(_) => RejectCode::UnknownCanister,
            RuntimeError::UnknownMethod { .. } => RejectCode::UnknownMethod,
            RuntimeError::MalformedArguments { .. } => RejectCode::MalformedArguments,
            RuntimeError::Encoding(_) => RejectCode::Internal,
            RuntimeError::Currency(CurrencyError::Unauthorized { .. })
            | RuntimeError::Membership(MembershipError::Unauthorized { .. }) => RejectCode::Unauthorized,
            RuntimeError::Currency(_) | RuntimeError::Membership(_) => RejectCode::CanisterReject,
        }
    }
}

impl From<RuntimeError> for CallRejection {
    fn from(error: RuntimeError) -> Self {
        CallRejection {
            code: error.code(),
            message: error.to_string(),
        }
    }
}
