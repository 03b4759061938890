//! # Token Runtime Library
//!
//! The in-process host for the token services, exposed as a library for
//! integration tests. The binary entry point is `main.rs`.
//!
//! ## Host Contract
//!
//! - Calls are delivered one at a time per service, each with the caller
//!   principal attached
//! - The currency token's scheduler is ticked on a fixed interval
//! - Every token event is published on the shared bus
//!
//! ## Modules
//!
//! - `container/` - configuration and service wiring
//! - `dispatch/` - JSON call router and rejection codes
//! - `tasks/` - ticker and event log handler
//! - `runtime` - lifecycle (start / shutdown)

pub mod container;
pub mod dispatch;
pub mod runtime;
pub mod tasks;

pub use container::{ConfigError, RuntimeConfig, TokenContainer};
pub use dispatch::{CallRejection, CallRouter, Canister, RejectCode, RuntimeError};
pub use runtime::TokenRuntime;
