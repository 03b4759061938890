//! # Runtime Configuration
//!
//! Defaults overridden from `TK_*` environment variables.
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `TK_TICK_INTERVAL_MS` | `tick_interval` | 1000 ms |
//! | `TK_CONTROLLER` | `controller` (hex principal) | anonymous |
//! | `TK_TOKEN_NAME` | `token_info.name` | `Token` |
//! | `TK_TOKEN_SYMBOL` | `token_info.symbol` | `TKN` |
//! | `TK_TOKEN_DECIMALS` | `token_info.decimals` | 8 |
//! | `TK_EVENT_BUS_CAPACITY` | `event_bus_capacity` | 1000 |
//!
//! ## Security Requirements
//!
//! - `controller` MUST NOT be the anonymous principal in production: every
//!   capability would be held by any unauthenticated caller.

use std::time::Duration;

use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use shared_types::{Principal, TokenInfo};
use thiserror::Error;

pub const ENV_TICK_INTERVAL_MS: &str = "TK_TICK_INTERVAL_MS";
pub const ENV_CONTROLLER: &str = "TK_CONTROLLER";
pub const ENV_TOKEN_NAME: &str = "TK_TOKEN_NAME";
pub const ENV_TOKEN_SYMBOL: &str = "TK_TOKEN_SYMBOL";
pub const ENV_TOKEN_DECIMALS: &str = "TK_TOKEN_DECIMALS";
pub const ENV_EVENT_BUS_CAPACITY: &str = "TK_EVENT_BUS_CAPACITY";

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Period of the scheduler tick.
    pub tick_interval: Duration,
    /// Deployer of both tokens; initial holder of every capability.
    pub controller: Principal,
    /// Currency token metadata.
    pub token_info: TokenInfo,
    /// Buffered records per bus subscriber.
    pub event_bus_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(1000),
            controller: Principal::anonymous(),
            token_info: TokenInfo {
                name: "Token".to_string(),
                symbol: "TKN".to_string(),
                decimals: 8,
            },
            event_bus_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An environment variable could not be parsed.
    #[error("Invalid value {value:?} for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    /// The tick interval is zero.
    #[error("Tick interval must be greater than zero")]
    ZeroTickInterval,

    /// The event bus would hold no records.
    #[error("Event bus capacity must be greater than zero")]
    ZeroBusCapacity,

    /// Controller left at the anonymous principal.
    #[error(
        "SECURITY VIOLATION: controller is the anonymous principal. \
         Set TK_CONTROLLER to the deployer principal."
    )]
    AnonymousController,
}

impl RuntimeConfig {
    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    /// - `ConfigError::InvalidValue` for an unparsable variable
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Loads the configuration through `lookup`, starting from defaults.
    ///
    /// # Errors
    /// - `ConfigError::InvalidValue` for an unparsable variable
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_TICK_INTERVAL_MS) {
            let millis: u64 = parse(ENV_TICK_INTERVAL_MS, &value)?;
            config.tick_interval = Duration::from_millis(millis);
        }
        if let Some(value) = lookup(ENV_CONTROLLER) {
            config.controller = parse(ENV_CONTROLLER, &value)?;
        }
        if let Some(value) = lookup(ENV_TOKEN_NAME) {
            config.token_info.name = value;
        }
        if let Some(value) = lookup(ENV_TOKEN_SYMBOL) {
            config.token_info.symbol = value;
        }
        if let Some(value) = lookup(ENV_TOKEN_DECIMALS) {
            config.token_info.decimals = parse(ENV_TOKEN_DECIMALS, &value)?;
        }
        if let Some(value) = lookup(ENV_EVENT_BUS_CAPACITY) {
            config.event_bus_capacity = parse(ENV_EVENT_BUS_CAPACITY, &value)?;
        }

        Ok(config)
    }

    /// Checks values that would make the runtime unusable.
    ///
    /// # Errors
    /// - `ZeroTickInterval`, `ZeroBusCapacity`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.event_bus_capacity == 0 {
            return Err(ConfigError::ZeroBusCapacity);
        }
        Ok(())
    }

    /// Validate configuration for production readiness.
    ///
    /// # Errors
    /// - everything `validate()` rejects
    /// - `AnonymousController` if no controller was configured
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        self.validate()?;
        if self.controller.is_anonymous() {
            return Err(ConfigError::AnonymousController);
        }
        Ok(())
    }
}

fn parse<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
