//! # Currency Token Aggregate
//!
//! Ties the ledger, the recurrence scheduler, the controller sets and the
//! token metadata together. Operations return the events they caused; the
//! service layer publishes them.
//!
//! ## Events per movement
//!
//! | Movement | Events |
//! |----------|--------|
//! | Mint | `TokenMove{from: None}`, `TotalSupplyUpdate`, `VotingPowerUpdate(to)` |
//! | Transfer | `TokenMove`, `VotingPowerUpdate(from)`, `VotingPowerUpdate(to)` |
//! | Burn | `TokenMove{to: None}`, `TotalSupplyUpdate`, `VotingPowerUpdate(from)` |

use shared_bus::TokenEvent;
use shared_types::{ControllerKind, ControllerSet, Payload, Principal, Timestamp, TokenInfo};

use super::entities::{
    CurrencyCapability, CurrencyControllers, InstructionId, InstructionKind, TickReport, TransferEntry,
};
use super::errors::CurrencyError;
use super::ledger::{Ledger, Movement, Settlement};
use super::scheduler::RecurrenceScheduler;

/// Result of a state-changing call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Applied {
    pub events: Vec<TokenEvent>,
    /// Instructions registered by the call, in entry order.
    pub recurrences: Vec<InstructionId>,
}

/// Complete state of one currency token.
#[derive(Debug, Clone)]
pub struct CurrencyToken {
    ledger: Ledger,
    scheduler: RecurrenceScheduler,
    controllers: CurrencyControllers,
    info: TokenInfo,
}

impl CurrencyToken {
    /// A token with no supply; `deployer` holds every capability.
    pub fn new(info: TokenInfo, deployer: Principal) -> Self {
        Self {
            ledger: Ledger::new(),
            scheduler: RecurrenceScheduler::new(),
            controllers: CurrencyControllers::new(deployer),
            info,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn scheduler(&self) -> &RecurrenceScheduler {
        &self.scheduler
    }

    pub fn controllers(&self) -> &CurrencyControllers {
        &self.controllers
    }

    pub fn info(&self) -> &TokenInfo {
        &self.info
    }

    /// # Errors
    /// - `Unauthorized` if `caller` is not in the set of `capability`
    pub fn authorize(&self, caller: &Principal, capability: CurrencyCapability) -> Result<(), CurrencyError> {
        Ok(self.controllers.of(capability).authorize(caller, capability.into())?)
    }

    /// Credits every entry from new supply. Authorization is the caller's
    /// concern.
    pub fn mint(&mut self, entries: Vec<TransferEntry>, now: Timestamp) -> Result<Applied, CurrencyError> {
        self.apply_entries(None, entries, now)
    }

    /// Moves every entry out of `from`.
    pub fn transfer(
        &mut self,
        from: &Principal,
        entries: Vec<TransferEntry>,
        now: Timestamp,
    ) -> Result<Applied, CurrencyError> {
        self.apply_entries(Some(from), entries, now)
    }

    /// Destroys `qty` of `from`'s balance.
    pub fn burn(&mut self, from: &Principal, qty: u64, payload: Payload) -> Result<Applied, CurrencyError> {
        let settlements = self.ledger.settle(vec![Movement::Burn {
            from: from.clone(),
            qty,
        }])?;
        let events = settlements
            .iter()
            .flat_map(|settlement| settlement_events(settlement, payload.clone()))
            .collect();
        Ok(Applied {
            events,
            recurrences: Vec::new(),
        })
    }

    fn apply_entries(
        &mut self,
        source: Option<&Principal>,
        entries: Vec<TransferEntry>,
        now: Timestamp,
    ) -> Result<Applied, CurrencyError> {
        for entry in &entries {
            if let Some(spec) = &entry.recurrence {
                spec.validate()?;
            }
        }

        let movements = entries
            .iter()
            .map(|entry| match source {
                Some(from) => Movement::Transfer {
                    from: from.clone(),
                    to: entry.to.clone(),
                    qty: entry.qty,
                },
                None => Movement::Mint {
                    to: entry.to.clone(),
                    qty: entry.qty,
                },
            })
            .collect();
        let settlements = self.ledger.settle(movements)?;

        let mut applied = Applied::default();
        for (entry, settlement) in entries.into_iter().zip(settlements) {
            applied
                .events
                .extend(settlement_events(&settlement, entry.event_payload.clone()));

            if let Some(spec) = entry.recurrence {
                let kind = match source {
                    Some(from) => InstructionKind::Transfer { from: from.clone() },
                    None => InstructionKind::Mint,
                };
                let id = self
                    .scheduler
                    .register(kind, entry.to, entry.qty, &spec, entry.event_payload, now);
                applied.recurrences.push(id);
            }
        }

        Ok(applied)
    }

    /// Runs every recurrence due at `now`.
    pub fn tick(&mut self, now: Timestamp) -> (TickReport, Vec<TokenEvent>) {
        let ledger = &mut self.ledger;
        let mut events = Vec::new();

        let report = self.scheduler.tick(now, |instruction| {
            let settlements = ledger.settle(vec![instruction.movement()])?;
            for settlement in &settlements {
                events.extend(settlement_events(settlement, instruction.event_payload.clone()));
            }
            Ok(())
        });

        (report, events)
    }

    /// Replaces the metadata, returning the previous value.
    pub fn update_info(&mut self, new_info: TokenInfo) -> (TokenInfo, TokenEvent) {
        let event = TokenEvent::InfoUpdate {
            new_info: new_info.clone(),
        };
        (std::mem::replace(&mut self.info, new_info), event)
    }

    pub fn replace_mint_controllers(&mut self, new_controllers: ControllerSet) -> (ControllerSet, TokenEvent) {
        let event = controllers_event(ControllerKind::Mint, &new_controllers);
        (self.controllers.mint_controllers.replace(new_controllers), event)
    }

    pub fn replace_info_controllers(&mut self, new_controllers: ControllerSet) -> (ControllerSet, TokenEvent) {
        let event = controllers_event(ControllerKind::Info, &new_controllers);
        (self.controllers.info_controllers.replace(new_controllers), event)
    }
}

fn controllers_event(kind: ControllerKind, new_controllers: &ControllerSet) -> TokenEvent {
    TokenEvent::ControllersUpdate {
        kind,
        new_controllers: new_controllers.clone(),
    }
}

fn voting_power(voter: &Principal, balance: Option<u64>) -> TokenEvent {
    TokenEvent::VotingPowerUpdate {
        voter: voter.clone(),
        new_voting_power: balance.unwrap_or(0),
    }
}

fn settlement_events(settlement: &Settlement, payload: Payload) -> Vec<TokenEvent> {
    match &settlement.movement {
        Movement::Mint { to, qty } => vec![
            TokenEvent::TokenMove {
                from: None,
                to: Some(to.clone()),
                qty: *qty,
                payload,
            },
            TokenEvent::TotalSupplyUpdate {
                new_total_supply: settlement.total_supply,
            },
            voting_power(to, settlement.to_balance),
        ],
        Movement::Transfer { from, to, qty } => vec![
            TokenEvent::TokenMove {
                from: Some(from.clone()),
                to: Some(to.clone()),
                qty: *qty,
                payload,
            },
            voting_power(from, settlement.from_balance),
            voting_power(to, settlement.to_balance),
        ],
        Movement::Burn { from, qty } => vec![
            TokenEvent::TokenMove {
                from: Some(from.clone()),
                to: None,
                qty: *qty,
                payload,
            },
            TokenEvent::TotalSupplyUpdate {
                new_total_supply: settlement.total_supply,
            },
            voting_power(from, settlement.from_balance),
        ],
    }
}
