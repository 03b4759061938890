//! Currency token entities.
//!
//! ## Clusters
//!
//! - **Call input**: `TransferEntry`
//! - **Access control**: `CurrencyControllers`, `CurrencyCapability`
//! - **Scheduling**: `InstructionId`, `InstructionKind`, `RecurrenceInstruction`, `TickReport`

use std::fmt;

use serde::{Deserialize, Serialize};
use shared_types::{ControllerKind, ControllerSet, Iterations, Nanos, Payload, Principal, RecurrenceSpec, Timestamp};

use super::ledger::Movement;

/// One credit of a mint or transfer call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEntry {
    pub to: Principal,
    pub qty: u64,
    /// Repeat this entry on a schedule after the initial execution.
    #[serde(default)]
    pub recurrence: Option<RecurrenceSpec>,
    /// Forwarded verbatim in the `TokenMove` event.
    #[serde(default)]
    pub event_payload: Payload,
}

impl TransferEntry {
    pub fn new(to: Principal, qty: u64) -> Self {
        Self {
            to,
            qty,
            recurrence: None,
            event_payload: None,
        }
    }

    #[must_use]
    pub fn with_recurrence(mut self, recurrence: RecurrenceSpec) -> Self {
        self.recurrence = Some(recurrence);
        self
    }

    #[must_use]
    pub fn with_payload(mut self, payload: Vec<u8>) -> Self {
        self.event_payload = Some(payload);
        self
    }
}

/// Controller sets of the currency token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyControllers {
    pub mint_controllers: ControllerSet,
    pub info_controllers: ControllerSet,
}

impl CurrencyControllers {
    /// Both capabilities held by the deployer.
    pub fn new(deployer: Principal) -> Self {
        Self {
            mint_controllers: ControllerSet::single(deployer.clone()),
            info_controllers: ControllerSet::single(deployer),
        }
    }

    /// The set guarding `capability`.
    pub fn of(&self, capability: CurrencyCapability) -> &ControllerSet {
        match capability {
            CurrencyCapability::Mint => &self.mint_controllers,
            CurrencyCapability::Info => &self.info_controllers,
        }
    }
}

/// Privileged capabilities of the currency token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurrencyCapability {
    Mint,
    Info,
}

impl From<CurrencyCapability> for ControllerKind {
    fn from(capability: CurrencyCapability) -> Self {
        match capability {
            CurrencyCapability::Mint => ControllerKind::Mint,
            CurrencyCapability::Info => ControllerKind::Info,
        }
    }
}

// =============================================================================
// SCHEDULING
// =============================================================================

/// Opaque handle of a scheduled instruction, assigned in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstructionId(pub u64);

impl InstructionId {
    pub const MAX: InstructionId = InstructionId(u64::MAX);
}

impl fmt::Display for InstructionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a recurring instruction does when it fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// Move funds out of `from`. Fails once `from` runs dry.
    Transfer { from: Principal },
    /// Create new supply. Unconstrained source.
    Mint,
}

/// A pending recurring transfer or mint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceInstruction {
    pub id: InstructionId,
    pub kind: InstructionKind,
    pub to: Principal,
    pub amount: u64,
    pub interval: Nanos,
    /// Executions still owed.
    pub remaining: Iterations,
    pub next_due_time: Timestamp,
    pub event_payload: Payload,
}

impl RecurrenceInstruction {
    /// The debited principal, `None` for mints.
    pub fn source(&self) -> Option<&Principal> {
        match &self.kind {
            InstructionKind::Transfer { from } => Some(from),
            InstructionKind::Mint => None,
        }
    }

    /// The ledger movement performed on each execution.
    pub fn movement(&self) -> Movement {
        match &self.kind {
            InstructionKind::Transfer { from } => Movement::Transfer {
                from: from.clone(),
                to: self.to.clone(),
                qty: self.amount,
            },
            InstructionKind::Mint => Movement::Mint {
                to: self.to.clone(),
                qty: self.amount,
            },
        }
    }
}

/// Outcome of one scheduler sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Instructions that ran successfully.
    pub executed: usize,
    /// Of those, instructions that used their last iteration.
    pub completed: usize,
    /// Instructions removed after a failed execution.
    pub cancelled: usize,
}

impl TickReport {
    pub fn is_idle(&self) -> bool {
        self.executed == 0 && self.cancelled == 0
    }
}
