//! # Domain Layer - Currency Token
//!
//! Pure state machine: no clock, no bus, no logging subscriber. Callers pass
//! `now` in and publish the returned events.
//!
//! ## Components
//!
//! - `ledger`: balances and total supply, atomic batch settlement
//! - `scheduler`: recurring transfers and mints
//! - `token`: aggregate tying ledger, scheduler, controllers and metadata
//! - `entities`: call inputs, controller sets, instruction types
//! - `errors`: `CurrencyError`

pub mod entities;
pub mod errors;
pub mod ledger;
pub mod scheduler;
pub mod token;

pub use entities::*;
pub use errors::*;
pub use ledger::{Ledger, Movement, Settlement};
pub use scheduler::RecurrenceScheduler;
pub use token::{Applied, CurrencyToken};
