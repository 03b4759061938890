//! # Error Types
//!
//! Defines error types used across both token services.

use thiserror::Error;

use crate::access::ControllerKind;
use crate::entities::Principal;

/// Errors building a principal from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrincipalError {
    /// Zero-length principal.
    #[error("Principal must not be empty")]
    Empty,

    /// Longer than the maximum principal length.
    #[error("Principal too long: {len} bytes, max {max}")]
    TooLong { len: usize, max: usize },

    /// Text form was not valid hex.
    #[error("Invalid principal hex: {0}")]
    InvalidHex(String),
}

/// Capability check failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The caller is not in the controller set of the capability.
    #[error("Unauthorized: {caller} is not a {capability} controller")]
    Unauthorized {
        caller: Principal,
        capability: ControllerKind,
    },
}

/// A recurrence spec that can never produce a valid schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecurrenceError {
    /// `duration_nano` was zero.
    #[error("recurrence interval must be greater than zero")]
    ZeroInterval,

    /// `Finite(0)` iterations.
    #[error("finite recurrence must run at least once")]
    ZeroIterations,
}
