//! # Inbound Port - CurrencyTokenApi
//!
//! Primary driving port exposing the currency token calls to the host.
//!
//! ## Authorization
//!
//! | Method | Authorized Caller |
//! |--------|-------------------|
//! | `mint` | mint controllers |
//! | `update_info` | info controllers |
//! | `update_mint_controller` | mint controllers |
//! | `update_info_controller` | info controllers |
//! | everything else | any principal |

use shared_types::Principal;

use crate::domain::{CurrencyError, TickReport};
use crate::ipc::payloads::*;

/// Call surface of a currency token.
///
/// The host delivers calls one at a time; every method runs to completion
/// before the next starts.
///
/// # Example
///
/// ```rust,ignore
/// use tk_01_currency_token::ports::CurrencyTokenApi;
///
/// fn pay(token: &mut impl CurrencyTokenApi, caller: &Principal, to: Principal) {
///     let entries = vec![TransferEntry::new(to, 200)
///         .with_recurrence(RecurrenceSpec::infinite(10 * NANOS_PER_SEC))];
///     token.transfer(caller, TransferRequest { entries })?;
/// }
/// ```
pub trait CurrencyTokenApi: Send + Sync {
    /// Creates new supply for every entry.
    ///
    /// # Errors
    /// - `Unauthorized`: caller is not a mint controller
    /// - `InvalidAmount`: an entry has `qty == 0`
    /// - `InvalidRecurrence`: an entry's recurrence can never be scheduled
    /// - `SupplyOverflow`: the supply would exceed `u64::MAX`
    fn mint(&mut self, caller: &Principal, request: TransferRequest) -> Result<TransferResponse, CurrencyError>;

    /// Moves funds from the caller to every entry.
    ///
    /// # Errors
    /// - `InsufficientBalance`: the caller runs short at some entry
    /// - `InvalidAmount`, `InvalidRecurrence`: as for `mint`
    fn transfer(&mut self, caller: &Principal, request: TransferRequest) -> Result<TransferResponse, CurrencyError>;

    /// Destroys part of the caller's balance.
    ///
    /// # Errors
    /// - `InsufficientBalance`, `InvalidAmount`
    fn burn(&mut self, caller: &Principal, request: BurnRequest) -> Result<BurnResponse, CurrencyError>;

    fn get_balance_of(&self, request: GetBalanceOfRequest) -> GetBalanceOfResponse;

    fn get_total_supply(&self) -> GetTotalSupplyResponse;

    fn get_info(&self) -> GetInfoResponse;

    /// # Errors
    /// - `Unauthorized`: caller is not an info controller
    fn update_info(&mut self, caller: &Principal, request: UpdateInfoRequest) -> Result<UpdateInfoResponse, CurrencyError>;

    fn get_controllers(&self) -> GetControllersResponse;

    /// Replaces the mint controller set. An empty set locks minting forever.
    ///
    /// # Errors
    /// - `Unauthorized`: caller is not a mint controller
    fn update_mint_controller(
        &mut self,
        caller: &Principal,
        request: UpdateControllerRequest,
    ) -> Result<UpdateControllerResponse, CurrencyError>;

    /// Replaces the info controller set.
    ///
    /// # Errors
    /// - `Unauthorized`: caller is not an info controller
    fn update_info_controller(
        &mut self,
        caller: &Principal,
        request: UpdateControllerRequest,
    ) -> Result<UpdateControllerResponse, CurrencyError>;

    /// Pending recurring transfers debiting `account_owner`.
    fn get_recurrences_of(&self, request: GetRecurrencesOfRequest) -> GetRecurrencesOfResponse;

    fn get_recurrence_count(&self) -> GetRecurrenceCountResponse;

    /// Runs every recurrence due now. Driven by the host, never by callers.
    fn tick(&mut self) -> TickReport;
}
