//! # Currency Token Flows
//!
//! Ledger, scheduler and bus exercised together through the service API,
//! on a manual clock so ticks are deterministic.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use shared_bus::{EventFilter, EventTopic, InMemoryEventBus, Subscription, TokenEvent};
    use shared_types::{Iterations, ManualTimeSource, Principal, RecurrenceSpec, TokenInfo, NANOS_PER_SEC};
    use tk_01_currency_token::ipc::{BurnRequest, GetBalanceOfRequest, GetRecurrencesOfRequest, TransferRequest};
    use tk_01_currency_token::{
        CurrencyError, CurrencyToken, CurrencyTokenApi, CurrencyTokenService, TickReport, TransferEntry,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    type Service = CurrencyTokenService<Arc<ManualTimeSource>, Arc<InMemoryEventBus>>;

    struct Harness {
        service: Service,
        clock: Arc<ManualTimeSource>,
        events: Subscription,
    }

    fn principal(seed: u8) -> Principal {
        Principal::from_slice(&[seed]).unwrap()
    }

    fn controller() -> Principal {
        principal(0xC0)
    }

    fn harness() -> Harness {
        let clock = Arc::new(ManualTimeSource::new(0));
        let bus = Arc::new(InMemoryEventBus::new());
        let events = bus.subscribe(EventFilter::topics(vec![EventTopic::CurrencyToken]));
        let info = TokenInfo {
            name: "Test".to_string(),
            symbol: "TST".to_string(),
            decimals: 2,
        };
        let service = CurrencyTokenService::new(CurrencyToken::new(info, controller()), Arc::clone(&clock), bus);
        Harness { service, clock, events }
    }

    fn entry(to: u8, qty: u64) -> TransferEntry {
        TransferEntry::new(principal(to), qty)
    }

    fn mint(h: &mut Harness, to: u8, qty: u64) {
        h.service
            .mint(
                &controller(),
                TransferRequest {
                    entries: vec![entry(to, qty)],
                },
            )
            .unwrap();
    }

    fn balance(h: &Harness, seed: u8) -> u64 {
        h.service
            .get_balance_of(GetBalanceOfRequest {
                account_owner: principal(seed),
            })
            .balance
    }

    fn tick_after(h: &mut Harness, secs: u64) -> TickReport {
        h.clock.advance_secs(secs);
        h.service.tick()
    }

    // =============================================================================
    // RECURRENCE
    // =============================================================================

    #[test]
    fn test_infinite_recurrence_drains_sender_then_stops() {
        let mut h = harness();
        mint(&mut h, 1, 1000);

        let response = h
            .service
            .transfer(
                &principal(1),
                TransferRequest {
                    entries: vec![entry(2, 200).with_recurrence(RecurrenceSpec::infinite(NANOS_PER_SEC))],
                },
            )
            .unwrap();
        assert_eq!(response.recurrences.len(), 1);
        assert_eq!(balance(&h, 1), 800);

        for _ in 0..4 {
            assert_eq!(tick_after(&mut h, 1).executed, 1);
        }
        assert_eq!(balance(&h, 1), 0);
        assert_eq!(balance(&h, 2), 1000);

        let report = tick_after(&mut h, 1);
        assert_eq!(report.executed, 0);
        assert_eq!(report.cancelled, 1);
        assert_eq!(h.service.get_recurrence_count().count, 0);

        assert!(tick_after(&mut h, 3600).is_idle());
        assert_eq!(balance(&h, 1), 0);
        assert_eq!(balance(&h, 2), 1000);
        assert_eq!(h.service.get_total_supply().total_supply, 1000);
    }

    #[test]
    fn test_finite_recurrence_runs_exactly_n_times() {
        let mut h = harness();
        mint(&mut h, 1, 1000);

        h.service
            .transfer(
                &principal(1),
                TransferRequest {
                    entries: vec![entry(2, 10).with_recurrence(RecurrenceSpec::finite(NANOS_PER_SEC, 3))],
                },
            )
            .unwrap();

        let mut executed = 0;
        let mut completed = 0;
        for _ in 0..6 {
            let report = tick_after(&mut h, 1);
            executed += report.executed;
            completed += report.completed;
        }

        assert_eq!(executed, 3);
        assert_eq!(completed, 1);
        assert_eq!(balance(&h, 2), 40);
        assert_eq!(balance(&h, 1), 960);
    }

    #[test]
    fn test_late_tick_executes_once_and_realigns() {
        let mut h = harness();
        mint(&mut h, 1, 1000);
        h.service
            .transfer(
                &principal(1),
                TransferRequest {
                    entries: vec![entry(2, 10).with_recurrence(RecurrenceSpec::infinite(NANOS_PER_SEC))],
                },
            )
            .unwrap();

        let report = tick_after(&mut h, 5);
        assert_eq!(report.executed, 1);
        assert_eq!(balance(&h, 2), 20);

        let recurrences = h
            .service
            .get_recurrences_of(GetRecurrencesOfRequest {
                account_owner: principal(1),
            })
            .recurrences;
        assert_eq!(recurrences.len(), 1);
        assert_eq!(recurrences[0].next_due_time, 6 * NANOS_PER_SEC);
        assert_eq!(recurrences[0].remaining, Iterations::Infinite);
    }

    #[test]
    fn test_recurring_mint_grows_supply() {
        let mut h = harness();
        h.service
            .mint(
                &controller(),
                TransferRequest {
                    entries: vec![entry(1, 10).with_recurrence(RecurrenceSpec::finite(NANOS_PER_SEC, 2))],
                },
            )
            .unwrap();

        tick_after(&mut h, 1);
        tick_after(&mut h, 1);
        tick_after(&mut h, 1);

        assert_eq!(h.service.get_total_supply().total_supply, 30);
        assert_eq!(balance(&h, 1), 30);
    }

    #[test]
    fn test_invalid_recurrence_rejects_whole_call() {
        let mut h = harness();
        mint(&mut h, 1, 100);
        h.events.drain();

        let result = h.service.transfer(
            &principal(1),
            TransferRequest {
                entries: vec![
                    entry(2, 10),
                    entry(3, 10).with_recurrence(RecurrenceSpec::finite(NANOS_PER_SEC, 0)),
                ],
            },
        );

        assert!(matches!(result, Err(CurrencyError::InvalidRecurrence { .. })));
        assert_eq!(balance(&h, 1), 100);
        assert_eq!(balance(&h, 2), 0);
        assert!(h.events.drain().is_empty());
    }

    // =============================================================================
    // BATCHES AND SUPPLY
    // =============================================================================

    #[test]
    fn test_failing_entry_leaves_batch_untouched() {
        let mut h = harness();
        mint(&mut h, 1, 100);
        h.events.drain();

        let result = h.service.transfer(
            &principal(1),
            TransferRequest {
                entries: vec![entry(2, 50), entry(3, 80)],
            },
        );

        assert!(matches!(
            result,
            Err(CurrencyError::InsufficientBalance {
                required: 80,
                available: 50
            })
        ));
        assert_eq!(balance(&h, 1), 100);
        assert_eq!(balance(&h, 2), 0);
        assert_eq!(balance(&h, 3), 0);
        assert!(h.events.drain().is_empty());
    }

    #[test]
    fn test_burn_reduces_supply_exactly() {
        let mut h = harness();
        mint(&mut h, 1, 500);

        let response = h
            .service
            .burn(
                &principal(1),
                BurnRequest {
                    quantity: 120,
                    payload: None,
                },
            )
            .unwrap();

        assert_eq!(response.new_balance, 380);
        assert_eq!(h.service.get_total_supply().total_supply, 380);
        assert!(h
            .service
            .burn(
                &principal(1),
                BurnRequest {
                    quantity: 381,
                    payload: None,
                },
            )
            .is_err());
    }

    #[test]
    fn test_transfer_events_carry_payload_in_order() {
        let mut h = harness();
        mint(&mut h, 1, 100);
        h.events.drain();

        h.service
            .transfer(
                &principal(1),
                TransferRequest {
                    entries: vec![entry(2, 30).with_payload(b"invoice-7".to_vec())],
                },
            )
            .unwrap();

        let events: Vec<TokenEvent> = h.events.drain().into_iter().map(|r| r.event).collect();
        assert_eq!(
            events,
            vec![
                TokenEvent::TokenMove {
                    from: Some(principal(1)),
                    to: Some(principal(2)),
                    qty: 30,
                    payload: Some(b"invoice-7".to_vec()),
                },
                TokenEvent::VotingPowerUpdate {
                    voter: principal(1),
                    new_voting_power: 70,
                },
                TokenEvent::VotingPowerUpdate {
                    voter: principal(2),
                    new_voting_power: 30,
                },
            ]
        );
    }

    #[test]
    fn test_scheduled_events_use_tick_time() {
        let mut h = harness();
        mint(&mut h, 1, 100);
        h.service
            .transfer(
                &principal(1),
                TransferRequest {
                    entries: vec![entry(2, 10).with_recurrence(RecurrenceSpec::finite(NANOS_PER_SEC, 1))],
                },
            )
            .unwrap();
        h.events.drain();

        tick_after(&mut h, 2);

        let records = h.events.drain();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.emitted_at == 2 * NANOS_PER_SEC));
    }

    // =============================================================================
    // PROPERTIES
    // =============================================================================

    /// Random mint/transfer/burn/tick sequences keep the books balanced.
    #[test]
    fn test_random_operations_conserve_supply() {
        let mut rng = StdRng::seed_from_u64(0x70C3);
        let mut h = harness();
        let holders: Vec<u8> = (1..=5).collect();
        let mut minted: u64 = 0;
        let mut burned: u64 = 0;

        for _ in 0..400 {
            let from = holders[rng.gen_range(0..holders.len())];
            let to = holders[rng.gen_range(0..holders.len())];
            let qty = rng.gen_range(1..300);

            match rng.gen_range(0..5) {
                0 => {
                    mint(&mut h, to, qty);
                    minted += qty;
                }
                1 => {
                    let entries = vec![entry(to, qty), entry(holders[0], rng.gen_range(1..50))];
                    let _ = h.service.transfer(&principal(from), TransferRequest { entries });
                }
                2 => {
                    let request = BurnRequest {
                        quantity: qty,
                        payload: None,
                    };
                    if h.service.burn(&principal(from), request).is_ok() {
                        burned += qty;
                    }
                }
                3 => {
                    let spec = RecurrenceSpec::finite(NANOS_PER_SEC * rng.gen_range(1..4), rng.gen_range(1..5));
                    let _ = h.service.transfer(
                        &principal(from),
                        TransferRequest {
                            entries: vec![entry(to, qty).with_recurrence(spec)],
                        },
                    );
                }
                _ => {
                    tick_after(&mut h, rng.gen_range(0..3));
                }
            }

            let sum: u64 = holders.iter().map(|&seed| balance(&h, seed)).sum();
            let supply = h.service.get_total_supply().total_supply;
            assert_eq!(sum, supply);
            assert_eq!(supply, minted - burned);
        }
    }
}
