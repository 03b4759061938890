//! # Outbound Ports
//!
//! The membership token only needs a clock for event timestamps and an
//! event sink.

pub use shared_bus::{EventPublisher, InMemoryEventBus, NoOpPublisher};
pub use shared_types::{ManualTimeSource, SystemTimeSource, TimeSource};
