//! Call handler for the membership token.

use shared_bus::{EventPublisher, EventTopic, TokenEvent};
use shared_types::{Principal, TimeSource};
use tracing::{debug, info, warn};

use crate::domain::{MembershipError, MembershipRegistry};
use crate::ipc::payloads::*;
use crate::ports::MembershipTokenApi;

/// Membership token service bound to a clock and an event sink.
pub struct MembershipTokenService<T: TimeSource, P: EventPublisher> {
    registry: MembershipRegistry,
    time_source: T,
    publisher: P,
}

impl<T: TimeSource, P: EventPublisher> MembershipTokenService<T, P> {
    pub fn new(registry: MembershipRegistry, time_source: T, publisher: P) -> Self {
        Self {
            registry,
            time_source,
            publisher,
        }
    }

    pub fn registry(&self) -> &MembershipRegistry {
        &self.registry
    }

    /// Publishes `events` and returns how many principals changed state.
    fn emit(&self, events: Vec<TokenEvent>) -> MembershipUpdateResponse {
        let changed = events
            .iter()
            .filter(|event| matches!(event, TokenEvent::MembershipStatusUpdate { .. }))
            .count();
        if !events.is_empty() {
            let receivers = self
                .publisher
                .publish_all(EventTopic::MembershipToken, self.time_source.now(), events);
            debug!(changed, receivers, "[tk-02] Events emitted");
        }
        MembershipUpdateResponse { changed }
    }

    fn guard(&self, caller: &Principal, method: &str) -> Result<(), MembershipError> {
        if let Err(error) = self.registry.authorize_issue(caller) {
            warn!(%caller, method, "[tk-02] Rejected privileged call");
            return Err(error);
        }
        Ok(())
    }
}

impl<T: TimeSource, P: EventPublisher> MembershipTokenApi for MembershipTokenService<T, P> {
    fn issue_memberships(
        &mut self,
        caller: &Principal,
        request: IssueMembershipsRequest,
    ) -> Result<MembershipUpdateResponse, MembershipError> {
        self.guard(caller, "issue_memberships")?;

        let events = self.registry.issue(&request.principals);
        let response = self.emit(events);
        info!(
            %caller,
            requested = request.principals.len(),
            issued = response.changed,
            "[tk-02] Memberships issued"
        );
        Ok(response)
    }

    fn accept_membership(&mut self, caller: &Principal) -> Result<MembershipUpdateResponse, MembershipError> {
        let events = self.registry.accept(caller)?;
        info!(%caller, "[tk-02] Membership accepted");
        Ok(self.emit(events))
    }

    fn decline_membership(&mut self, caller: &Principal) -> Result<MembershipUpdateResponse, MembershipError> {
        let events = self.registry.decline(caller)?;
        info!(%caller, "[tk-02] Membership declined");
        Ok(self.emit(events))
    }

    fn revoke_memberships(
        &mut self,
        caller: &Principal,
        request: RevokeMembershipsRequest,
    ) -> Result<MembershipUpdateResponse, MembershipError> {
        self.guard(caller, "revoke_memberships")?;

        let events = self.registry.revoke(&request.principals);
        let response = self.emit(events);
        info!(
            %caller,
            requested = request.principals.len(),
            revoked = response.changed,
            "[tk-02] Memberships revoked"
        );
        Ok(response)
    }

    fn update_issue_controller(
        &mut self,
        caller: &Principal,
        request: UpdateControllerRequest,
    ) -> Result<UpdateControllerResponse, MembershipError> {
        self.guard(caller, "update_issue_controller")?;

        let size = request.new_controllers.len();
        let (old_controllers, event) = self.registry.replace_issue_controllers(request.new_controllers);
        info!(%caller, new_controllers = size, "[tk-02] Issue controllers replaced");

        self.emit(vec![event]);
        Ok(UpdateControllerResponse { old_controllers })
    }

    fn get_controllers(&self) -> GetControllersResponse {
        GetControllersResponse {
            controllers: self.registry.controllers().clone(),
        }
    }

    fn is_member(&self, request: IsMemberRequest) -> IsMemberResponse {
        IsMemberResponse {
            is_member: self.registry.is_member(&request.prin),
        }
    }

    fn is_pending_member(&self, request: IsMemberRequest) -> IsMemberResponse {
        IsMemberResponse {
            is_member: self.registry.is_pending_member(&request.prin),
        }
    }

    fn get_total_members(&self) -> GetTotalMembersResponse {
        GetTotalMembersResponse {
            total_members: self.registry.total_members(),
        }
    }
}
