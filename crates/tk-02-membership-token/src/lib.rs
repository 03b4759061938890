//! # Membership Token
//!
//! **Token ID:** 2
//!
//! ## Purpose
//!
//! Tracks which principals are members. Controllers offer memberships,
//! principals accept or decline their own, controllers may revoke.
//! A member carries one unit of voting power.
//!
//! ## State Machine
//!
//! ```text
//! [NonMember] ──issue (controller)──→ [PendingMember] ──accept (self)──→ [Member]
//!      ↑                                   │                               │
//!      └──── decline (self) / revoke (controller) ─────────────────────────┘
//! ```
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Issue never downgrades | `domain/registry.rs` - `issue()` only touches NonMember |
//! | Only the principal can accept/decline | `ipc/handler.rs` - caller is the subject |
//! | Absent == NonMember | `domain/registry.rs` - `transition()` removes the record |
//! | Empty controller set locks issuing | `shared_types::ControllerSet::authorize()` |
//!
//! ## Module Structure
//!
//! ```text
//! ipc/handler.rs       - MembershipTokenService (guards, events)
//! ports/inbound.rs     - MembershipTokenApi trait
//! domain/registry.rs   - MembershipRegistry
//! ```

pub mod domain;
pub mod ipc;
pub mod ports;

pub use domain::{MembershipControllers, MembershipError, MembershipRegistry, MembershipState};
pub use ipc::MembershipTokenService;
pub use ports::MembershipTokenApi;
