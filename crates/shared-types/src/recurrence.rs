//! # Recurrence Specs
//!
//! The wire shape a caller attaches to a transfer entry to make it repeat.
//!
//! ```text
//! { duration_nano: u64, iterations: Finite(n) | Infinite }
//! ```
//!
//! `iterations` counts the repetitions that follow the initial execution
//! performed by the call itself.

use serde::{Deserialize, Serialize};

use crate::entities::{Nanos, Timestamp};
use crate::errors::RecurrenceError;

/// How many more times an instruction should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Iterations {
    Finite(u64),
    Infinite,
}

impl Iterations {
    /// Consumes one iteration. Returns `true` when nothing remains.
    pub fn consume(&mut self) -> bool {
        match self {
            Iterations::Finite(n) => {
                *n = n.saturating_sub(1);
                *n == 0
            }
            Iterations::Infinite => false,
        }
    }
}

/// Caller-supplied recurrence request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceSpec {
    /// Interval between executions, in nanoseconds.
    pub duration_nano: Nanos,
    /// Number of repetitions after the initial execution.
    pub iterations: Iterations,
}

impl RecurrenceSpec {
    pub fn finite(duration_nano: Nanos, iterations: u64) -> Self {
        Self {
            duration_nano,
            iterations: Iterations::Finite(iterations),
        }
    }

    pub fn infinite(duration_nano: Nanos) -> Self {
        Self {
            duration_nano,
            iterations: Iterations::Infinite,
        }
    }

    /// # Errors
    /// - `RecurrenceError::ZeroInterval` if `duration_nano == 0`
    /// - `RecurrenceError::ZeroIterations` for `Finite(0)`
    pub fn validate(&self) -> Result<(), RecurrenceError> {
        if self.duration_nano == 0 {
            return Err(RecurrenceError::ZeroInterval);
        }
        if self.iterations == Iterations::Finite(0) {
            return Err(RecurrenceError::ZeroIterations);
        }
        Ok(())
    }

    /// First due time for a recurrence registered at `now`.
    pub fn first_due(&self, now: Timestamp) -> Timestamp {
        now.saturating_add(self.duration_nano)
    }
}
