//! # Recurrence Scheduler
//!
//! Holds pending recurring instructions and runs the due ones on each tick.
//!
//! ## Lifecycle
//!
//! ```text
//! register ──→ [PENDING] ──tick: Ok, iterations left──→ [PENDING] (next due)
//!                  │
//!                  ├──tick: Ok, last iteration──→ [REMOVED] (completed)
//!                  └──tick: Err──────────────────→ [REMOVED] (cancelled, never retried)
//! ```
//!
//! ## Ordering
//!
//! Due instructions run in `(next_due_time, id)` order. An instruction runs
//! at most once per tick; intervals missed while no tick happened are
//! skipped, not back-executed.

use std::collections::{BTreeMap, BTreeSet};

use shared_types::{Nanos, Payload, Principal, RecurrenceSpec, Timestamp};
use tracing::debug;

use super::entities::{InstructionId, InstructionKind, RecurrenceInstruction, TickReport};
use super::errors::CurrencyError;

/// Arena of instructions plus an index ordered by due time.
#[derive(Debug, Clone, Default)]
pub struct RecurrenceScheduler {
    instructions: BTreeMap<InstructionId, RecurrenceInstruction>,
    due: BTreeSet<(Timestamp, InstructionId)>,
    next_id: u64,
}

impl RecurrenceScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new instruction first due at `now + spec.duration_nano`.
    ///
    /// `spec` must already be validated.
    pub fn register(
        &mut self,
        kind: InstructionKind,
        to: Principal,
        amount: u64,
        spec: &RecurrenceSpec,
        event_payload: Payload,
        now: Timestamp,
    ) -> InstructionId {
        let id = InstructionId(self.next_id);
        self.next_id += 1;

        let instruction = RecurrenceInstruction {
            id,
            kind,
            to,
            amount,
            interval: spec.duration_nano,
            remaining: spec.iterations,
            next_due_time: spec.first_due(now),
            event_payload,
        };

        debug!(
            id = %id,
            amount,
            interval = instruction.interval,
            next_due_time = instruction.next_due_time,
            "Recurrence registered"
        );

        self.due.insert((instruction.next_due_time, id));
        self.instructions.insert(id, instruction);
        id
    }

    pub fn get(&self, id: InstructionId) -> Option<&RecurrenceInstruction> {
        self.instructions.get(&id)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Pending transfers debiting `owner`.
    pub fn instructions_of<'a>(
        &'a self,
        owner: &'a Principal,
    ) -> impl Iterator<Item = &'a RecurrenceInstruction> + 'a {
        self.instructions
            .values()
            .filter(move |instruction| instruction.source() == Some(owner))
    }

    /// Earliest due time of any pending instruction.
    pub fn next_due_time(&self) -> Option<Timestamp> {
        self.due.first().map(|(due, _)| *due)
    }

    /// Runs every instruction due at `now` through `execute`.
    ///
    /// Successful instructions consume one iteration and are rescheduled or
    /// removed. Failed instructions are removed silently.
    pub fn tick<F>(&mut self, now: Timestamp, mut execute: F) -> TickReport
    where
        F: FnMut(&RecurrenceInstruction) -> Result<(), CurrencyError>,
    {
        let due: Vec<(Timestamp, InstructionId)> = self
            .due
            .range(..=(now, InstructionId::MAX))
            .copied()
            .collect();

        let mut report = TickReport::default();

        for (due_time, id) in due {
            self.due.remove(&(due_time, id));
            let Some(instruction) = self.instructions.get_mut(&id) else {
                continue;
            };

            match execute(instruction) {
                Ok(()) => {
                    report.executed += 1;
                    let next = if instruction.remaining.consume() {
                        None
                    } else {
                        next_due_after(due_time, instruction.interval, now)
                    };
                    match next {
                        Some(next) => {
                            instruction.next_due_time = next;
                            self.due.insert((next, id));
                        }
                        // Exhausted, or no representable due time remains
                        None => {
                            debug!(id = %id, "Recurrence completed");
                            self.instructions.remove(&id);
                            report.completed += 1;
                        }
                    }
                }
                Err(error) => {
                    debug!(id = %id, %error, "Recurrence cancelled");
                    self.instructions.remove(&id);
                    report.cancelled += 1;
                }
            }
        }

        report
    }
}

/// First `due + k * interval` strictly after `now`, for `k >= 1`.
///
/// `None` when that time does not fit in a `Timestamp`.
fn next_due_after(due: Timestamp, interval: Nanos, now: Timestamp) -> Option<Timestamp> {
    let elapsed = now.saturating_sub(due);
    let steps = elapsed / interval + 1;
    steps.checked_mul(interval).and_then(|offset| due.checked_add(offset))
}
