//! # Domain Layer - Membership Token
//!
//! - `registry`: membership state machine and issue controllers
//! - `entities`: `MembershipState`, `MembershipControllers`
//! - `errors`: `MembershipError`

pub mod entities;
pub mod errors;
pub mod registry;

pub use entities::*;
pub use errors::*;
pub use registry::MembershipRegistry;
