//! # Service Wiring
//!
//! ```text
//!   TimeSource ──┐            ┌── CurrencyTokenService ──┐
//!                ├── wire ───→┤                          ├──→ InMemoryEventBus
//!   RuntimeConfig┘            └── MembershipTokenService ┘
//! ```
//!
//! Both services share one bus and one clock. Each sits behind its own
//! mutex; the router and the ticker are the only lock holders.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, instrument};

use shared_bus::InMemoryEventBus;
use shared_types::{SystemTimeSource, TimeSource};
use tk_01_currency_token::{CurrencyToken, CurrencyTokenApi, CurrencyTokenService};
use tk_02_membership_token::{MembershipRegistry, MembershipTokenApi, MembershipTokenService};

use crate::container::config::RuntimeConfig;
use crate::dispatch::CallRouter;

/// The currency token as held by the runtime.
pub type SharedCurrencyToken = Arc<Mutex<Box<dyn CurrencyTokenApi>>>;

/// The membership token as held by the runtime.
pub type SharedMembershipToken = Arc<Mutex<Box<dyn MembershipTokenApi>>>;

/// Central container holding the hosted services.
pub struct TokenContainer {
    /// Currency token (token 1).
    pub currency: SharedCurrencyToken,

    /// Membership token (token 2).
    pub membership: SharedMembershipToken,

    /// Bus every service publishes to.
    pub event_bus: Arc<InMemoryEventBus>,

    /// Clock shared by both services.
    pub time_source: Arc<dyn TimeSource>,

    /// Runtime configuration (immutable after initialization).
    pub config: RuntimeConfig,
}

impl TokenContainer {
    /// Wires both services against the system clock.
    pub fn new(config: RuntimeConfig) -> Self {
        Self::with_time_source(config, Arc::new(SystemTimeSource))
    }

    /// Wires both services against `time_source`.
    #[instrument(name = "token_init", skip_all, fields(controller = %config.controller))]
    pub fn with_time_source(config: RuntimeConfig, time_source: Arc<dyn TimeSource>) -> Self {
        let event_bus = Arc::new(InMemoryEventBus::with_capacity(config.event_bus_capacity));

        let currency = CurrencyTokenService::new(
            CurrencyToken::new(config.token_info.clone(), config.controller.clone()),
            Arc::clone(&time_source),
            Arc::clone(&event_bus),
        );
        info!(
            name = %config.token_info.name,
            symbol = %config.token_info.symbol,
            decimals = config.token_info.decimals,
            "  [tk-01] Currency token initialized"
        );

        let membership = MembershipTokenService::new(
            MembershipRegistry::new(config.controller.clone()),
            Arc::clone(&time_source),
            Arc::clone(&event_bus),
        );
        info!("  [tk-02] Membership token initialized");

        let currency: Box<dyn CurrencyTokenApi> = Box::new(currency);
        let membership: Box<dyn MembershipTokenApi> = Box::new(membership);

        Self {
            currency: Arc::new(Mutex::new(currency)),
            membership: Arc::new(Mutex::new(membership)),
            event_bus,
            time_source,
            config,
        }
    }

    /// A router over the hosted services.
    pub fn router(&self) -> CallRouter {
        CallRouter::new(Arc::clone(&self.currency), Arc::clone(&self.membership))
    }
}
