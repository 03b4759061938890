//! # Call Dispatch
//!
//! Turns an untyped call `(caller, canister, method, JSON args)` into a typed
//! request, runs it against the hosted service under its lock and encodes
//! the reply.
//!
//! ```text
//! call(caller, "currency_token", "transfer", {"entries": [...]})
//!   ├── decode args → TransferRequest        (MalformedArguments)
//!   ├── lock service, run transfer(caller)   (Unauthorized / CanisterReject)
//!   └── encode TransferResponse → JSON
//! ```
//!
//! Each call holds the service lock for its whole run, so calls and ticks
//! never interleave.

pub mod errors;

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::Principal;
use tk_01_currency_token::CurrencyTokenApi;
use tk_02_membership_token::MembershipTokenApi;
use tracing::debug;

use crate::container::{SharedCurrencyToken, SharedMembershipToken};

pub use errors::{CallRejection, RejectCode, RuntimeError};

/// Services hosted by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Canister {
    CurrencyToken,
    MembershipToken,
}

impl Canister {
    pub fn name(&self) -> &'static str {
        match self {
            Canister::CurrencyToken => "currency_token",
            Canister::MembershipToken => "membership_token",
        }
    }
}

impl fmt::Display for Canister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Canister {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "currency_token" => Ok(Canister::CurrencyToken),
            "membership_token" => Ok(Canister::MembershipToken),
            other => Err(RuntimeError::UnknownCanister(other.to_string())),
        }
    }
}

/// Routes untyped calls to the hosted services.
#[derive(Clone)]
pub struct CallRouter {
    currency: SharedCurrencyToken,
    membership: SharedMembershipToken,
}

impl CallRouter {
    pub fn new(currency: SharedCurrencyToken, membership: SharedMembershipToken) -> Self {
        Self { currency, membership }
    }

    /// Runs one call.
    ///
    /// # Errors
    /// Returns a `CallRejection` for unknown methods, malformed arguments
    /// and every domain error.
    pub fn call(
        &self,
        caller: &Principal,
        canister: Canister,
        method: &str,
        args: Value,
    ) -> Result<Value, CallRejection> {
        debug!(%caller, %canister, method, "[tk-runtime] Dispatching call");
        let result = match canister {
            Canister::CurrencyToken => self.call_currency(caller, method, args),
            Canister::MembershipToken => self.call_membership(caller, method, args),
        };
        result.map_err(|error| {
            debug!(%caller, %canister, method, %error, "[tk-runtime] Call rejected");
            CallRejection::from(error)
        })
    }

    /// Like `call`, with the canister given by name.
    ///
    /// # Errors
    /// - `RejectCode::UnknownCanister` for an unknown name
    pub fn call_by_name(
        &self,
        caller: &Principal,
        canister: &str,
        method: &str,
        args: Value,
    ) -> Result<Value, CallRejection> {
        let canister = Canister::from_str(canister)?;
        self.call(caller, canister, method, args)
    }

    fn call_currency(&self, caller: &Principal, method: &str, args: Value) -> Result<Value, RuntimeError> {
        let mut token = self.currency.lock();
        match method {
            "mint" => encode(token.mint(caller, decode(method, args)?)?),
            "transfer" => encode(token.transfer(caller, decode(method, args)?)?),
            "burn" => encode(token.burn(caller, decode(method, args)?)?),
            "get_balance_of" => encode(token.get_balance_of(decode(method, args)?)),
            "get_total_supply" => encode(token.get_total_supply()),
            "get_info" => encode(token.get_info()),
            "update_info" => encode(token.update_info(caller, decode(method, args)?)?),
            "get_controllers" => encode(token.get_controllers()),
            "update_mint_controller" => encode(token.update_mint_controller(caller, decode(method, args)?)?),
            "update_info_controller" => encode(token.update_info_controller(caller, decode(method, args)?)?),
            "get_recurrences_of" => encode(token.get_recurrences_of(decode(method, args)?)),
            "get_recurrence_count" => encode(token.get_recurrence_count()),
            _ => Err(RuntimeError::UnknownMethod {
                canister: Canister::CurrencyToken,
                method: method.to_string(),
            }),
        }
    }

    fn call_membership(&self, caller: &Principal, method: &str, args: Value) -> Result<Value, RuntimeError> {
        let mut token = self.membership.lock();
        match method {
            "issue_memberships" => encode(token.issue_memberships(caller, decode(method, args)?)?),
            "accept_membership" => encode(token.accept_membership(caller)?),
            "decline_membership" => encode(token.decline_membership(caller)?),
            "revoke_memberships" => encode(token.revoke_memberships(caller, decode(method, args)?)?),
            "update_issue_controller" => encode(token.update_issue_controller(caller, decode(method, args)?)?),
            "get_controllers" => encode(token.get_controllers()),
            "is_member" => encode(token.is_member(decode(method, args)?)),
            "is_pending_member" => encode(token.is_pending_member(decode(method, args)?)),
            "get_total_members" => encode(token.get_total_members()),
            _ => Err(RuntimeError::UnknownMethod {
                canister: Canister::MembershipToken,
                method: method.to_string(),
            }),
        }
    }
}

fn decode<T: DeserializeOwned>(method: &str, args: Value) -> Result<T, RuntimeError> {
    serde_json::from_value(args).map_err(|e| RuntimeError::MalformedArguments {
        method: method.to_string(),
        reason: e.to_string(),
    })
}

fn encode<T: Serialize>(reply: T) -> Result<Value, RuntimeError> {
    serde_json::to_value(reply).map_err(|e| RuntimeError::Encoding(e.to_string()))
}
