//! # Shared Types Crate
//!
//! This crate contains the value types shared by the currency token, the
//! membership token and the runtime that hosts them.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Caller Authority**: Requests never carry a `caller` field; the caller
//!   principal is supplied by the host alongside the request.
//! - **Wholesale Access Control**: Controller sets are replaced as a whole,
//!   never diffed.

pub mod access;
pub mod entities;
pub mod errors;
pub mod recurrence;
pub mod time;

pub use access::{ControllerKind, ControllerSet, UpdateControllerRequest, UpdateControllerResponse};
pub use entities::*;
pub use errors::*;
pub use recurrence::{Iterations, RecurrenceSpec};
pub use time::{ManualTimeSource, SystemTimeSource, TimeSource, NANOS_PER_SEC};
