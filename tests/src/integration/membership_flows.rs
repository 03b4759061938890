//! # Membership Token Flows
//!
//! The three-state membership machine, its events and the issue capability,
//! driven through the service API.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use shared_bus::{EventFilter, InMemoryEventBus, MembershipStatus, Subscription, TokenEvent};
    use shared_types::{ControllerSet, ManualTimeSource, Principal};
    use tk_02_membership_token::ipc::{
        IsMemberRequest, IssueMembershipsRequest, RevokeMembershipsRequest, UpdateControllerRequest,
    };
    use tk_02_membership_token::{MembershipError, MembershipRegistry, MembershipTokenApi, MembershipTokenService};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    type Service = MembershipTokenService<Arc<ManualTimeSource>, Arc<InMemoryEventBus>>;

    fn principal(seed: u8) -> Principal {
        Principal::from_slice(&[seed]).unwrap()
    }

    fn service(controller: u8) -> (Service, Subscription) {
        let bus = Arc::new(InMemoryEventBus::new());
        let events = bus.subscribe(EventFilter::all());
        let service = MembershipTokenService::new(
            MembershipRegistry::new(principal(controller)),
            Arc::new(ManualTimeSource::new(0)),
            bus,
        );
        (service, events)
    }

    fn issue(service: &mut Service, caller: u8, to: &[u8]) -> Result<usize, MembershipError> {
        service
            .issue_memberships(
                &principal(caller),
                IssueMembershipsRequest {
                    principals: to.iter().map(|&seed| principal(seed)).collect(),
                },
            )
            .map(|response| response.changed)
    }

    fn revoke(service: &mut Service, caller: u8, to: &[u8]) -> Result<usize, MembershipError> {
        service
            .revoke_memberships(
                &principal(caller),
                RevokeMembershipsRequest {
                    principals: to.iter().map(|&seed| principal(seed)).collect(),
                },
            )
            .map(|response| response.changed)
    }

    fn hand_over(service: &mut Service, caller: u8, to: &[u8]) -> Result<ControllerSet, MembershipError> {
        service
            .update_issue_controller(
                &principal(caller),
                UpdateControllerRequest {
                    new_controllers: to.iter().map(|&seed| principal(seed)).collect(),
                },
            )
            .map(|response| response.old_controllers)
    }

    fn is_member(service: &Service, seed: u8) -> bool {
        service.is_member(IsMemberRequest { prin: principal(seed) }).is_member
    }

    fn is_pending(service: &Service, seed: u8) -> bool {
        service
            .is_pending_member(IsMemberRequest { prin: principal(seed) })
            .is_member
    }

    // =============================================================================
    // STATE MACHINE
    // =============================================================================

    #[test]
    fn test_issue_is_idempotent() {
        let (mut service, mut events) = service(0xC);

        assert_eq!(issue(&mut service, 0xC, &[1]), Ok(1));
        assert_eq!(issue(&mut service, 0xC, &[1]), Ok(0));
        assert!(is_pending(&service, 1));

        service.accept_membership(&principal(1)).unwrap();
        events.drain();

        assert_eq!(issue(&mut service, 0xC, &[1]), Ok(0));
        assert!(is_member(&service, 1));
        assert!(events.drain().is_empty());
    }

    #[test]
    fn test_fsm_transitions() {
        let (mut service, _events) = service(0xC);

        // NonMember
        assert_eq!(
            service.accept_membership(&principal(1)),
            Err(MembershipError::NotPendingMember(principal(1)))
        );
        assert_eq!(
            service.decline_membership(&principal(1)),
            Err(MembershipError::NotAMember(principal(1)))
        );

        // PendingMember -> NonMember
        issue(&mut service, 0xC, &[1]).unwrap();
        service.decline_membership(&principal(1)).unwrap();
        assert!(!is_pending(&service, 1));
        assert!(!is_member(&service, 1));

        // Member -> NonMember
        issue(&mut service, 0xC, &[1]).unwrap();
        service.accept_membership(&principal(1)).unwrap();
        assert!(is_member(&service, 1));
        service.decline_membership(&principal(1)).unwrap();
        assert!(!is_member(&service, 1));
        assert_eq!(service.get_total_members().total_members, 0);

        // Member cannot accept twice
        issue(&mut service, 0xC, &[1]).unwrap();
        service.accept_membership(&principal(1)).unwrap();
        assert_eq!(
            service.accept_membership(&principal(1)),
            Err(MembershipError::NotPendingMember(principal(1)))
        );
    }

    #[test]
    fn test_revoke_pending_and_member() {
        let (mut service, _events) = service(0xC);
        issue(&mut service, 0xC, &[1, 2]).unwrap();
        service.accept_membership(&principal(2)).unwrap();

        assert_eq!(revoke(&mut service, 0xC, &[1, 2, 3]), Ok(2));
        assert!(!is_pending(&service, 1));
        assert!(!is_member(&service, 2));
        assert_eq!(service.get_total_members().total_members, 0);
    }

    #[test]
    fn test_voting_power_follows_membership() {
        let (mut service, mut events) = service(0xC);
        issue(&mut service, 0xC, &[1]).unwrap();
        service.accept_membership(&principal(1)).unwrap();
        revoke(&mut service, 0xC, &[1]).unwrap();

        let power: Vec<u64> = events
            .drain()
            .into_iter()
            .filter_map(|record| match record.event {
                TokenEvent::VotingPowerUpdate { new_voting_power, .. } => Some(new_voting_power),
                _ => None,
            })
            .collect();
        assert_eq!(power, vec![1, 0]);
    }

    #[test]
    fn test_status_events_in_order() {
        let (mut service, mut events) = service(0xC);
        issue(&mut service, 0xC, &[1]).unwrap();
        service.accept_membership(&principal(1)).unwrap();
        service.decline_membership(&principal(1)).unwrap();

        let statuses: Vec<MembershipStatus> = events
            .drain()
            .into_iter()
            .filter_map(|record| match record.event {
                TokenEvent::MembershipStatusUpdate { new_status, .. } => Some(new_status),
                _ => None,
            })
            .collect();
        assert_eq!(
            statuses,
            vec![MembershipStatus::Issued, MembershipStatus::Accepted, MembershipStatus::Declined]
        );
    }

    // =============================================================================
    // ACCESS CONTROL
    // =============================================================================

    #[test]
    fn test_empty_controller_set_locks_everyone_out() {
        let (mut service, _events) = service(0xC);
        issue(&mut service, 0xC, &[1]).unwrap();

        assert_eq!(hand_over(&mut service, 0xC, &[]), Ok(ControllerSet::single(principal(0xC))));

        for caller in [0xC, 1, 2] {
            assert!(matches!(issue(&mut service, caller, &[3]), Err(MembershipError::Unauthorized { .. })));
            assert!(matches!(revoke(&mut service, caller, &[1]), Err(MembershipError::Unauthorized { .. })));
            assert!(matches!(
                hand_over(&mut service, caller, &[caller]),
                Err(MembershipError::Unauthorized { .. })
            ));
        }
        assert!(is_pending(&service, 1));

        // Self-service transitions need no capability.
        service.accept_membership(&principal(1)).unwrap();
        assert!(is_member(&service, 1));
    }

    #[test]
    fn test_controller_handoff() {
        const C: u8 = 0xC;
        const A: u8 = 0xA;
        const B: u8 = 0xB;
        let (mut service, _events) = service(C);

        assert_eq!(issue(&mut service, C, &[A]), Ok(1));
        assert!(matches!(issue(&mut service, B, &[B]), Err(MembershipError::Unauthorized { .. })));

        hand_over(&mut service, C, &[B]).unwrap();

        assert!(matches!(issue(&mut service, C, &[0x1]), Err(MembershipError::Unauthorized { .. })));
        assert_eq!(issue(&mut service, B, &[0x2]), Ok(1));
        assert_eq!(
            service.get_controllers().controllers.issue_controllers,
            ControllerSet::single(principal(B))
        );
    }

    // =============================================================================
    // PROPERTIES
    // =============================================================================

    /// Random calls never leave a principal both pending and member, and the
    /// member count always matches the individual lookups.
    #[test]
    fn test_random_calls_keep_states_consistent() {
        let mut rng = StdRng::seed_from_u64(0xB0A7);
        let (mut service, _events) = service(0xC);
        let population: Vec<u8> = (1..=8).collect();

        for _ in 0..500 {
            let seed = population[rng.gen_range(0..population.len())];
            match rng.gen_range(0..4) {
                0 => {
                    issue(&mut service, 0xC, &[seed]).unwrap();
                }
                1 => {
                    let _ = service.accept_membership(&principal(seed));
                }
                2 => {
                    let _ = service.decline_membership(&principal(seed));
                }
                _ => {
                    revoke(&mut service, 0xC, &[seed]).unwrap();
                }
            }

            let members = population.iter().filter(|&&p| is_member(&service, p)).count();
            assert_eq!(service.get_total_members().total_members, members);
            assert!(population
                .iter()
                .all(|&p| !(is_member(&service, p) && is_pending(&service, p))));
        }
    }
}
