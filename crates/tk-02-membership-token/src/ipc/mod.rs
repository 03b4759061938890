//! # IPC Layer - Membership Token
//!
//! Typed call payloads and the handler that enforces the issue capability.

pub mod handler;
pub mod payloads;

pub use handler::*;
pub use payloads::*;
