//! Call handler for the currency token.
//!
//! Checks caller capabilities, stamps the domain with the current time and
//! publishes the resulting events.

use shared_bus::{EventPublisher, EventTopic, TokenEvent};
use shared_types::{ControllerKind, Principal, TimeSource};
use tracing::{debug, info, warn};

use crate::domain::{CurrencyCapability, CurrencyError, CurrencyToken, TickReport};
use crate::ipc::payloads::*;
use crate::ports::CurrencyTokenApi;

/// Currency token service bound to a clock and an event sink.
pub struct CurrencyTokenService<T: TimeSource, P: EventPublisher> {
    token: CurrencyToken,
    time_source: T,
    publisher: P,
}

impl<T: TimeSource, P: EventPublisher> CurrencyTokenService<T, P> {
    pub fn new(token: CurrencyToken, time_source: T, publisher: P) -> Self {
        Self {
            token,
            time_source,
            publisher,
        }
    }

    /// Returns a reference to the underlying token state.
    pub fn token(&self) -> &CurrencyToken {
        &self.token
    }

    fn emit(&self, events: Vec<TokenEvent>) {
        if events.is_empty() {
            return;
        }
        let count = events.len();
        let receivers = self
            .publisher
            .publish_all(EventTopic::CurrencyToken, self.time_source.now(), events);
        debug!(count, receivers, "[tk-01] Events emitted");
    }

    fn guard(&self, caller: &Principal, capability: CurrencyCapability, method: &str) -> Result<(), CurrencyError> {
        if let Err(error) = self.token.authorize(caller, capability) {
            warn!(%caller, capability = %ControllerKind::from(capability), method, "[tk-01] Rejected privileged call");
            return Err(error);
        }
        Ok(())
    }
}

impl<T: TimeSource, P: EventPublisher> CurrencyTokenApi for CurrencyTokenService<T, P> {
    fn mint(&mut self, caller: &Principal, request: TransferRequest) -> Result<TransferResponse, CurrencyError> {
        self.guard(caller, CurrencyCapability::Mint, "mint")?;

        let entries = request.entries.len();
        let applied = self.token.mint(request.entries, self.time_source.now())?;
        info!(
            %caller,
            entries,
            recurrences = applied.recurrences.len(),
            total_supply = self.token.ledger().total_supply(),
            "[tk-01] Minted"
        );

        self.emit(applied.events);
        Ok(TransferResponse {
            recurrences: applied.recurrences,
        })
    }

    fn transfer(&mut self, caller: &Principal, request: TransferRequest) -> Result<TransferResponse, CurrencyError> {
        let entries = request.entries.len();
        let applied = self
            .token
            .transfer(caller, request.entries, self.time_source.now())?;
        info!(
            %caller,
            entries,
            recurrences = applied.recurrences.len(),
            "[tk-01] Transferred"
        );

        self.emit(applied.events);
        Ok(TransferResponse {
            recurrences: applied.recurrences,
        })
    }

    fn burn(&mut self, caller: &Principal, request: BurnRequest) -> Result<BurnResponse, CurrencyError> {
        let applied = self.token.burn(caller, request.quantity, request.payload)?;
        let new_balance = self.token.ledger().balance_of(caller);
        info!(%caller, quantity = request.quantity, new_balance, "[tk-01] Burned");

        self.emit(applied.events);
        Ok(BurnResponse { new_balance })
    }

    fn get_balance_of(&self, request: GetBalanceOfRequest) -> GetBalanceOfResponse {
        GetBalanceOfResponse {
            balance: self.token.ledger().balance_of(&request.account_owner),
        }
    }

    fn get_total_supply(&self) -> GetTotalSupplyResponse {
        GetTotalSupplyResponse {
            total_supply: self.token.ledger().total_supply(),
        }
    }

    fn get_info(&self) -> GetInfoResponse {
        GetInfoResponse {
            info: self.token.info().clone(),
        }
    }

    fn update_info(&mut self, caller: &Principal, request: UpdateInfoRequest) -> Result<UpdateInfoResponse, CurrencyError> {
        self.guard(caller, CurrencyCapability::Info, "update_info")?;

        let (old_info, event) = self.token.update_info(request.new_info);
        info!(%caller, symbol = %self.token.info().symbol, "[tk-01] Info updated");

        self.emit(vec![event]);
        Ok(UpdateInfoResponse { old_info })
    }

    fn get_controllers(&self) -> GetControllersResponse {
        GetControllersResponse {
            controllers: self.token.controllers().clone(),
        }
    }

    fn update_mint_controller(
        &mut self,
        caller: &Principal,
        request: UpdateControllerRequest,
    ) -> Result<UpdateControllerResponse, CurrencyError> {
        self.guard(caller, CurrencyCapability::Mint, "update_mint_controller")?;

        let size = request.new_controllers.len();
        let (old_controllers, event) = self.token.replace_mint_controllers(request.new_controllers);
        info!(%caller, new_controllers = size, "[tk-01] Mint controllers replaced");

        self.emit(vec![event]);
        Ok(UpdateControllerResponse { old_controllers })
    }

    fn update_info_controller(
        &mut self,
        caller: &Principal,
        request: UpdateControllerRequest,
    ) -> Result<UpdateControllerResponse, CurrencyError> {
        self.guard(caller, CurrencyCapability::Info, "update_info_controller")?;

        let size = request.new_controllers.len();
        let (old_controllers, event) = self.token.replace_info_controllers(request.new_controllers);
        info!(%caller, new_controllers = size, "[tk-01] Info controllers replaced");

        self.emit(vec![event]);
        Ok(UpdateControllerResponse { old_controllers })
    }

    fn get_recurrences_of(&self, request: GetRecurrencesOfRequest) -> GetRecurrencesOfResponse {
        GetRecurrencesOfResponse {
            recurrences: self
                .token
                .scheduler()
                .instructions_of(&request.account_owner)
                .cloned()
                .collect(),
        }
    }

    fn get_recurrence_count(&self) -> GetRecurrenceCountResponse {
        GetRecurrenceCountResponse {
            count: self.token.scheduler().len(),
        }
    }

    fn tick(&mut self) -> TickReport {
        let (report, events) = self.token.tick(self.time_source.now());
        if !report.is_idle() {
            debug!(
                executed = report.executed,
                completed = report.completed,
                cancelled = report.cancelled,
                pending = self.token.scheduler().len(),
                "[tk-01] Recurrences processed"
            );
        }

        self.emit(events);
        report
    }
}
