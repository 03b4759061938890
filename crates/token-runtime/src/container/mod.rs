//! # Token Container
//!
//! Holds the hosted token services, the event bus and the clock.
//!
//! - Services are wrapped in `Arc<Mutex<_>>`: one call or tick at a time
//! - The event bus is the only channel out to consumers

pub mod config;
pub mod services;

pub use config::{ConfigError, RuntimeConfig};
pub use services::{SharedCurrencyToken, SharedMembershipToken, TokenContainer};
