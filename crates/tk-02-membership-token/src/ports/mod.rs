//! Ports layer for the membership token.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
