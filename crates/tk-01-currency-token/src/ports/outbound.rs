//! # Outbound Ports
//!
//! | Port | Production | Tests |
//! |------|------------|-------|
//! | `TimeSource` | `SystemTimeSource` | `ManualTimeSource` |
//! | `EventPublisher` | `InMemoryEventBus` | `NoOpPublisher` / bus subscription |

pub use shared_bus::{EventPublisher, InMemoryEventBus, NoOpPublisher};
pub use shared_types::{ManualTimeSource, SystemTimeSource, TimeSource};
