//! # Background Tasks
//!
//! - `ticker`: drives the currency token's recurrence scheduler
//! - `event_log`: writes every bus record to the log
//!
//! Both run until the runtime's shutdown signal fires.

pub mod event_log;
pub mod ticker;

pub use event_log::EventLogHandler;
pub use ticker::Ticker;
