//! # Runtime Flows
//!
//! Both tokens hosted by the runtime: JSON calls through the router, the
//! periodic ticker and the shared bus.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use parking_lot::Mutex;
    use serde_json::{json, Value};
    use tokio::time::timeout;

    use shared_bus::{EventFilter, EventTopic, TokenEvent};
    use shared_types::{ManualTimeSource, Principal, NANOS_PER_SEC};
    use tk_01_currency_token::CurrencyTokenApi;
    use token_runtime::{CallRouter, Canister, RejectCode, RuntimeConfig, TokenContainer, TokenRuntime};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn principal(seed: u8) -> Principal {
        Principal::from_slice(&[seed]).unwrap()
    }

    fn controller() -> Principal {
        principal(0xC0)
    }

    fn config(tick_ms: u64) -> RuntimeConfig {
        RuntimeConfig {
            controller: controller(),
            tick_interval: Duration::from_millis(tick_ms),
            ..RuntimeConfig::default()
        }
    }

    fn balance(router: &CallRouter, owner: &str) -> u64 {
        let reply = router
            .call(
                &principal(0x99),
                Canister::CurrencyToken,
                "get_balance_of",
                json!({ "account_owner": owner }),
            )
            .unwrap();
        reply["balance"].as_u64().unwrap()
    }

    async fn wait_for_balance(router: &CallRouter, owner: &str, expected: u64) -> bool {
        timeout(Duration::from_secs(5), async {
            while balance(router, owner) != expected {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .is_ok()
    }

    // =============================================================================
    // ROUTER
    // =============================================================================

    #[test]
    fn test_recurring_transfer_through_router() {
        let clock = Arc::new(ManualTimeSource::new(0));
        let container = TokenContainer::with_time_source(config(1000), clock.clone());
        let router = container.router();

        router
            .call(
                &controller(),
                Canister::CurrencyToken,
                "mint",
                json!({"entries": [{"to": "01", "qty": 1000}]}),
            )
            .unwrap();
        let reply = router
            .call(
                &principal(1),
                Canister::CurrencyToken,
                "transfer",
                json!({"entries": [{
                    "to": "02",
                    "qty": 200,
                    "recurrence": {"duration_nano": NANOS_PER_SEC, "iterations": "Infinite"}
                }]}),
            )
            .unwrap();
        assert_eq!(reply["recurrences"].as_array().map(Vec::len), Some(1));

        for _ in 0..10 {
            clock.advance_secs(1);
            container.currency.lock().tick();
        }

        assert_eq!(balance(&router, "01"), 0);
        assert_eq!(balance(&router, "02"), 1000);
        let reply = router
            .call(&principal(1), Canister::CurrencyToken, "get_recurrence_count", Value::Null)
            .unwrap();
        assert_eq!(reply, json!({"count": 0}));
    }

    #[test]
    fn test_mint_controller_handoff_through_router() {
        let container = TokenContainer::new(config(1000));
        let router = container.router();

        let reply = router
            .call(
                &controller(),
                Canister::CurrencyToken,
                "update_mint_controller",
                json!({"new_controllers": ["0b"]}),
            )
            .unwrap();
        assert_eq!(reply, json!({"old_controllers": ["c0"]}));

        let rejection = router
            .call(
                &controller(),
                Canister::CurrencyToken,
                "mint",
                json!({"entries": [{"to": "01", "qty": 1}]}),
            )
            .unwrap_err();
        assert_eq!(rejection.code, RejectCode::Unauthorized);

        router
            .call(
                &principal(0x0b),
                Canister::CurrencyToken,
                "mint",
                json!({"entries": [{"to": "01", "qty": 1}]}),
            )
            .unwrap();

        // Info capability is independent of the mint capability.
        router
            .call(
                &controller(),
                Canister::CurrencyToken,
                "update_info",
                json!({"new_info": {"name": "Gold", "symbol": "GLD", "decimals": 0}}),
            )
            .unwrap();
        let reply = router
            .call(&principal(1), Canister::CurrencyToken, "get_info", Value::Null)
            .unwrap();
        assert_eq!(reply["info"]["symbol"], "GLD");
    }

    #[test]
    fn test_both_tokens_publish_on_one_bus() {
        let container = TokenContainer::new(config(1000));
        let mut currency = container
            .event_bus
            .subscribe(EventFilter::topics(vec![EventTopic::CurrencyToken]));
        let mut membership = container
            .event_bus
            .subscribe(EventFilter::topics(vec![EventTopic::MembershipToken]));
        let router = container.router();

        router
            .call_by_name(
                &controller(),
                "currency_token",
                "mint",
                json!({"entries": [{"to": "01", "qty": 5, "event_payload": [1, 2, 3]}]}),
            )
            .unwrap();
        router
            .call_by_name(
                &controller(),
                "membership_token",
                "issue_memberships",
                json!({"principals": ["01"]}),
            )
            .unwrap();

        let currency_events: Vec<TokenEvent> = currency.drain().into_iter().map(|r| r.event).collect();
        assert_eq!(
            currency_events.first(),
            Some(&TokenEvent::TokenMove {
                from: None,
                to: Some(principal(1)),
                qty: 5,
                payload: Some(vec![1, 2, 3]),
            })
        );
        assert!(currency_events
            .iter()
            .any(|e| matches!(e, TokenEvent::TotalSupplyUpdate { new_total_supply: 5 })));

        let membership_records = membership.drain();
        assert_eq!(membership_records.len(), 1);
        assert_eq!(membership_records[0].topic, EventTopic::MembershipToken);
    }

    /// Callers on separate threads are serialized by the service lock, so
    /// supply is conserved and no account is overdrawn.
    #[test]
    fn test_concurrent_transfers_conserve_supply() {
        let container = TokenContainer::new(config(1000));
        let router = container.router();
        for owner in ["01", "02", "03", "04"] {
            router
                .call(
                    &controller(),
                    Canister::CurrencyToken,
                    "mint",
                    json!({"entries": [{"to": owner, "qty": 100}]}),
                )
                .unwrap();
        }

        let rejections: Arc<Mutex<Vec<RejectCode>>> = Arc::new(Mutex::new(Vec::new()));
        let workers: Vec<_> = (1u8..=4)
            .map(|seed| {
                let router = router.clone();
                let rejections = Arc::clone(&rejections);
                std::thread::spawn(move || {
                    let to = format!("{:02x}", seed % 4 + 1);
                    for _ in 0..50 {
                        let result = router.call(
                            &principal(seed),
                            Canister::CurrencyToken,
                            "transfer",
                            json!({"entries": [{"to": to, "qty": 7}]}),
                        );
                        if let Err(rejection) = result {
                            rejections.lock().push(rejection.code);
                        }
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let total: u64 = ["01", "02", "03", "04"].iter().map(|owner| balance(&router, owner)).sum();
        assert_eq!(total, 400);
        assert!(rejections.lock().iter().all(|code| *code == RejectCode::CanisterReject));

        let supply = container.currency.lock().get_total_supply().total_supply;
        assert_eq!(supply, 400);
    }

    // =============================================================================
    // RUNTIME LIFECYCLE
    // =============================================================================

    #[tokio::test]
    async fn test_ticker_drains_recurrence() {
        let clock = Arc::new(ManualTimeSource::new(0));
        let runtime = TokenRuntime::with_container(TokenContainer::with_time_source(config(5), clock.clone()));
        runtime.start().await.unwrap();
        let router = runtime.router();

        router
            .call(
                &controller(),
                Canister::CurrencyToken,
                "mint",
                json!({"entries": [{"to": "01", "qty": 1000}]}),
            )
            .unwrap();
        router
            .call(
                &principal(1),
                Canister::CurrencyToken,
                "transfer",
                json!({"entries": [{
                    "to": "02",
                    "qty": 200,
                    "recurrence": {"duration_nano": NANOS_PER_SEC, "iterations": "Infinite"}
                }]}),
            )
            .unwrap();

        for expected in [400, 600, 800, 1000] {
            clock.advance_secs(1);
            assert!(wait_for_balance(&router, "02", expected).await);
        }
        assert_eq!(balance(&router, "01"), 0);

        clock.advance_secs(60);
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(balance(&router, "02"), 1000);

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_stops_ticker() {
        let clock = Arc::new(ManualTimeSource::new(0));
        let runtime = TokenRuntime::with_container(TokenContainer::with_time_source(config(5), clock.clone()));
        runtime.start().await.unwrap();
        let router = runtime.router();

        router
            .call(
                &controller(),
                Canister::CurrencyToken,
                "mint",
                json!({"entries": [{
                    "to": "01",
                    "qty": 1,
                    "recurrence": {"duration_nano": NANOS_PER_SEC, "iterations": "Infinite"}
                }]}),
            )
            .unwrap();

        runtime.shutdown().await;

        clock.advance_secs(5);
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(balance(&router, "01"), 1);
    }
}
