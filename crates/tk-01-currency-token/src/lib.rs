//! # Currency Token
//!
//! **Token ID:** 1
//!
//! ## Purpose
//!
//! A fungible token with controller-gated minting, caller-funded transfers,
//! burning and a built-in scheduler for recurring payments.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Balances never negative | `domain/ledger.rs` - `StagedBatch::debit()` |
//! | Supply = mints - burns | `domain/ledger.rs` - `StagedBatch::apply()` |
//! | Multi-entry calls are atomic | `domain/ledger.rs` - `Ledger::settle()` overlay |
//! | Failed recurrences never retry | `domain/scheduler.rs` - `tick()` removes on `Err` |
//! | One execution per instruction per tick | `domain/scheduler.rs` - `next_due_after()` |
//!
//! ## Recurring Payments
//!
//! ```text
//! transfer(entries[i].recurrence = {10s, Infinite})
//!   ├── initial transfer runs inside the call
//!   └── instruction registered, due at now + 10s
//!
//! tick(now) ── for each due instruction, in (due, id) order:
//!   ├── Ok  → consume iteration → reschedule or remove
//!   └── Err → remove (the payer ran dry)
//! ```
//!
//! ## Authorization
//!
//! | Call | Authorized Caller |
//! |------|-------------------|
//! | `mint`, `update_mint_controller` | mint controllers |
//! | `update_info`, `update_info_controller` | info controllers |
//! | everything else | any principal |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      OUTER LAYER                                │
//! │  ipc/handler.rs  - CurrencyTokenService (guards, clock, events) │
//! │  ipc/payloads.rs - request / response types                     │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      MIDDLE LAYER                               │
//! │  ports/inbound.rs  - CurrencyTokenApi trait                     │
//! │  ports/outbound.rs - TimeSource, EventPublisher                 │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      INNER LAYER                                │
//! │  domain/ledger.rs    - balances, supply, batch settlement       │
//! │  domain/scheduler.rs - RecurrenceScheduler                      │
//! │  domain/token.rs     - CurrencyToken aggregate                  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod domain;
pub mod ipc;
pub mod ports;

pub use domain::{
    Applied, CurrencyCapability, CurrencyControllers, CurrencyError, CurrencyToken, InstructionId, InstructionKind,
    Ledger, RecurrenceInstruction, RecurrenceScheduler, TickReport, TransferEntry,
};
pub use ipc::CurrencyTokenService;
pub use ports::CurrencyTokenApi;
