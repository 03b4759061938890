//! # IPC Layer - Currency Token
//!
//! Typed call payloads and the handler that enforces caller capabilities.
//! The host decodes a call into one of the request types here and hands it,
//! together with the caller principal, to `CurrencyTokenService`.

pub mod handler;
pub mod payloads;

pub use handler::*;
pub use payloads::*;
