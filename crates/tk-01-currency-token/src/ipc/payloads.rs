//! Request and response payloads of the currency token calls.
//!
//! The caller principal is never part of a request; the host supplies it.

use serde::{Deserialize, Serialize};
use shared_types::{Payload, Principal, TokenInfo};

use crate::domain::{CurrencyControllers, InstructionId, RecurrenceInstruction, TransferEntry};

pub use shared_types::{UpdateControllerRequest, UpdateControllerResponse};

/// Body of `mint` and `transfer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub entries: Vec<TransferEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferResponse {
    /// Instructions registered for entries carrying a recurrence.
    #[serde(default)]
    pub recurrences: Vec<InstructionId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnRequest {
    pub quantity: u64,
    #[serde(default)]
    pub payload: Payload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnResponse {
    pub new_balance: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetBalanceOfRequest {
    pub account_owner: Principal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetBalanceOfResponse {
    pub balance: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTotalSupplyResponse {
    pub total_supply: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetInfoResponse {
    pub info: TokenInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateInfoRequest {
    pub new_info: TokenInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateInfoResponse {
    pub old_info: TokenInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetControllersResponse {
    pub controllers: CurrencyControllers,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetRecurrencesOfRequest {
    pub account_owner: Principal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetRecurrencesOfResponse {
    pub recurrences: Vec<RecurrenceInstruction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetRecurrenceCountResponse {
    pub count: usize,
}
