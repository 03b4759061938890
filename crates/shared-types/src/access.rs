//! # Access Control
//!
//! Controller sets gate the privileged operations of a token.
//!
//! ## Rules
//!
//! | Rule | Enforcement |
//! |------|-------------|
//! | One independent set per capability | each token holds one `ControllerSet` per `ControllerKind` |
//! | Membership checked at call time | `ControllerSet::authorize()` |
//! | Wholesale replacement | `ControllerSet::replace()` swaps the whole set |
//! | Empty set locks the capability | nobody passes `authorize()` on an empty set |

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entities::Principal;
use crate::errors::AccessError;

/// Privileged capabilities guarded by a controller set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllerKind {
    /// Currency token: create new supply.
    Mint,
    /// Currency token: replace token metadata.
    Info,
    /// Membership token: issue and revoke memberships.
    Issue,
}

impl fmt::Display for ControllerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ControllerKind::Mint => "mint",
            ControllerKind::Info => "info",
            ControllerKind::Issue => "issue",
        };
        f.write_str(name)
    }
}

/// The principals authorized for one capability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControllerSet(BTreeSet<Principal>);

impl ControllerSet {
    /// A set holding exactly one controller.
    pub fn single(controller: Principal) -> Self {
        Self(BTreeSet::from([controller]))
    }

    /// An empty (locked) set.
    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    pub fn contains(&self, principal: &Principal) -> bool {
        self.0.contains(principal)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Principal> {
        self.0.iter()
    }

    /// Checks that `caller` holds `capability`.
    ///
    /// # Errors
    /// - `AccessError::Unauthorized` if `caller` is not in the set
    pub fn authorize(&self, caller: &Principal, capability: ControllerKind) -> Result<(), AccessError> {
        if self.contains(caller) {
            Ok(())
        } else {
            Err(AccessError::Unauthorized {
                caller: caller.clone(),
                capability,
            })
        }
    }

    /// Replaces the whole set, returning the previous one.
    pub fn replace(&mut self, new_controllers: ControllerSet) -> ControllerSet {
        std::mem::replace(self, new_controllers)
    }
}

impl FromIterator<Principal> for ControllerSet {
    fn from_iter<I: IntoIterator<Item = Principal>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<Principal>> for ControllerSet {
    fn from(principals: Vec<Principal>) -> Self {
        principals.into_iter().collect()
    }
}

/// Replaces one controller set of a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateControllerRequest {
    pub new_controllers: ControllerSet,
}

/// The set that was replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateControllerResponse {
    pub old_controllers: ControllerSet,
}
