//! # Core Entities
//!
//! Identity and payload types used by every token service.
//!
//! ## Clusters
//!
//! - **Identity**: `Principal`, `Account`
//! - **Time**: `Timestamp`, `Nanos`
//! - **Hooks**: `Payload`
//! - **Metadata**: `TokenInfo`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha224};

use crate::errors::PrincipalError;

/// Nanoseconds since the Unix epoch.
pub type Timestamp = u64;

/// A duration in nanoseconds.
pub type Nanos = u64;

/// Opaque bytes attached to a mint/transfer for external consumers.
///
/// Never interpreted by the token services.
pub type Payload = Option<Vec<u8>>;

/// A balance holder. `None` stands for the token itself (mint source,
/// burn destination).
pub type Account = Option<Principal>;

/// Display metadata of a currency token.
///
/// `decimals` only tells clients where to place the decimal point; balances
/// are always stored in the smallest denomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

// =============================================================================
// PRINCIPAL
// =============================================================================

/// Maximum principal length in bytes.
pub const MAX_PRINCIPAL_LEN: usize = 29;

/// Suffix byte marking a self-authenticating principal.
const SELF_AUTHENTICATING_TAG: u8 = 0x02;

/// Suffix byte marking the anonymous principal.
const ANONYMOUS_TAG: u8 = 0x04;

/// An opaque, unforgeable caller identity.
///
/// Principals key balances and membership records and are the subject of
/// every authorization check. Serialized as lowercase hex.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Principal(Vec<u8>);

impl Principal {
    /// Builds a principal from raw bytes.
    ///
    /// # Errors
    /// - `PrincipalError::Empty` for an empty slice
    /// - `PrincipalError::TooLong` above `MAX_PRINCIPAL_LEN` bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, PrincipalError> {
        if bytes.is_empty() {
            return Err(PrincipalError::Empty);
        }
        if bytes.len() > MAX_PRINCIPAL_LEN {
            return Err(PrincipalError::TooLong {
                len: bytes.len(),
                max: MAX_PRINCIPAL_LEN,
            });
        }
        Ok(Self(bytes.to_vec()))
    }

    /// Derives the self-authenticating principal of a public key:
    /// `SHA-224(public_key) || 0x02`.
    pub fn self_authenticating(public_key: &[u8]) -> Self {
        let mut bytes = Sha224::digest(public_key).to_vec();
        bytes.push(SELF_AUTHENTICATING_TAG);
        Self(bytes)
    }

    /// The anonymous principal.
    pub fn anonymous() -> Self {
        Self(vec![ANONYMOUS_TAG])
    }

    /// Returns true for the anonymous principal.
    pub fn is_anonymous(&self) -> bool {
        self.0 == [ANONYMOUS_TAG]
    }

    /// Raw bytes of the principal.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hex form.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Principal({})", self.to_hex())
    }
}

impl FromStr for Principal {
    type Err = PrincipalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|e| PrincipalError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

impl Serialize for Principal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Principal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
