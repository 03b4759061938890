//! # Ledger
//!
//! Per-principal balances and the total supply.
//!
//! ## Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Balances never go negative | `StagedBatch::debit()` rejects short debits |
//! | Supply = mints - burns | only `Mint` and `Burn` touch `total_supply` |
//! | Transfers conserve supply | `Transfer` is a debit plus an equal credit |
//! | Absent == zero | `Ledger::settle()` drops zero balances on commit |
//! | Batches are all-or-nothing | movements run against an overlay, committed only if all succeed |
//!
//! ```text
//! settle([m1, m2, m3])
//!   ├── overlay ← apply(m1) ─┐
//!   ├── overlay ← apply(m2)  ├── any Err → overlay dropped, ledger untouched
//!   ├── overlay ← apply(m3) ─┘
//!   └── commit(overlay)
//! ```

use std::collections::HashMap;

use shared_types::Principal;

use super::errors::CurrencyError;

/// A single balance change requested of the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Movement {
    Mint {
        to: Principal,
        qty: u64,
    },
    Transfer {
        from: Principal,
        to: Principal,
        qty: u64,
    },
    Burn {
        from: Principal,
        qty: u64,
    },
}

impl Movement {
    pub fn qty(&self) -> u64 {
        match self {
            Movement::Mint { qty, .. }
            | Movement::Transfer { qty, .. }
            | Movement::Burn { qty, .. } => *qty,
        }
    }
}

/// Post-state of one applied movement, used to build events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub movement: Movement,
    /// Balance of the debited principal after the movement.
    pub from_balance: Option<u64>,
    /// Balance of the credited principal after the movement.
    pub to_balance: Option<u64>,
    pub total_supply: u64,
}

/// Balance map plus supply counter.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    balances: HashMap<Principal, u64>,
    total_supply: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of `owner`, 0 when unknown.
    pub fn balance_of(&self, owner: &Principal) -> u64 {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    /// Number of principals with a non-zero balance.
    #[cfg(test)]
    pub fn holder_count(&self) -> usize {
        self.balances.len()
    }

    pub fn balances(&self) -> impl Iterator<Item = (&Principal, u64)> {
        self.balances.iter().map(|(owner, balance)| (owner, *balance))
    }

    /// Applies `movements` in order as one atomic batch.
    ///
    /// # Errors
    /// - `InvalidAmount` for a zero quantity
    /// - `InsufficientBalance` when a debit exceeds the balance at that point
    /// - `SupplyOverflow` when a mint would overflow a balance or the supply
    ///
    /// On error no balance changes.
    pub fn settle(&mut self, movements: Vec<Movement>) -> Result<Vec<Settlement>, CurrencyError> {
        let mut batch = StagedBatch::new(self);
        let settlements = movements
            .into_iter()
            .map(|movement| batch.apply(movement))
            .collect::<Result<Vec<_>, _>>()?;
        let (overlay, total_supply) = batch.into_parts();

        for (owner, balance) in overlay {
            if balance == 0 {
                self.balances.remove(&owner);
            } else {
                self.balances.insert(owner, balance);
            }
        }
        self.total_supply = total_supply;

        Ok(settlements)
    }
}

/// Uncommitted view of the ledger during one batch.
struct StagedBatch<'a> {
    base: &'a Ledger,
    overlay: HashMap<Principal, u64>,
    total_supply: u64,
}

impl<'a> StagedBatch<'a> {
    fn new(base: &'a Ledger) -> Self {
        Self {
            base,
            overlay: HashMap::new(),
            total_supply: base.total_supply,
        }
    }

    fn balance_of(&self, owner: &Principal) -> u64 {
        self.overlay
            .get(owner)
            .copied()
            .unwrap_or_else(|| self.base.balance_of(owner))
    }

    fn credit(&mut self, to: &Principal, qty: u64) -> Result<(), CurrencyError> {
        let balance = self
            .balance_of(to)
            .checked_add(qty)
            .ok_or(CurrencyError::SupplyOverflow)?;
        self.overlay.insert(to.clone(), balance);
        Ok(())
    }

    fn debit(&mut self, from: &Principal, qty: u64) -> Result<(), CurrencyError> {
        let available = self.balance_of(from);
        if available < qty {
            return Err(CurrencyError::InsufficientBalance {
                required: qty,
                available,
            });
        }
        self.overlay.insert(from.clone(), available - qty);
        Ok(())
    }

    fn apply(&mut self, movement: Movement) -> Result<Settlement, CurrencyError> {
        let qty = movement.qty();
        if qty == 0 {
            return Err(CurrencyError::InvalidAmount { qty });
        }

        let (from_balance, to_balance) = match &movement {
            Movement::Mint { to, qty } => {
                self.total_supply = self
                    .total_supply
                    .checked_add(*qty)
                    .ok_or(CurrencyError::SupplyOverflow)?;
                self.credit(to, *qty)?;
                (None, Some(self.balance_of(to)))
            }
            Movement::Transfer { from, to, qty } => {
                self.debit(from, *qty)?;
                self.credit(to, *qty)?;
                (Some(self.balance_of(from)), Some(self.balance_of(to)))
            }
            Movement::Burn { from, qty } => {
                self.debit(from, *qty)?;
                // A balance never exceeds the supply, so this cannot wrap.
                self.total_supply = self.total_supply.saturating_sub(*qty);
                (Some(self.balance_of(from)), None)
            }
        };

        Ok(Settlement {
            movement,
            from_balance,
            to_balance,
            total_supply: self.total_supply,
        })
    }

    fn into_parts(self) -> (HashMap<Principal, u64>, u64) {
        (self.overlay, self.total_supply)
    }
}
