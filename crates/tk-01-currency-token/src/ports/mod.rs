//! Ports layer for the currency token.
//!
//! - Inbound (Driving) ports: the call surface exposed to the host
//! - Outbound (Driven) ports: clock and event sink

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
