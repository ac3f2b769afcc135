// Property-based tests for event callback invocation.
//
// For any registered event callback, every subscribed event is delivered
// with its structured data, unsubscribed events are dropped, and each
// PIPELINE_END is followed by a STATS_REPORT when stats are subscribed.

#[cfg(test)]
mod tests {
    use crate::callback::event_manager::EventManager;
    use crate::test_utils::CollectingCallback;
    use crate::types::event_callback::{EventData, EventType};
    use proptest::prelude::*;

    /// Event sequences a typical nuke run might produce.
    fn arb_event_sequence() -> impl Strategy<Value = Vec<(EventType, Option<String>)>> {
        prop::collection::vec(
            prop_oneof![
                Just((EventType::PIPELINE_START, None)),
                "[a-z0-9]{10}".prop_map(|id| (EventType::DELETE_FAILED, Some(id))),
                Just((EventType::PIPELINE_ERROR, None)),
                Just((EventType::PIPELINE_END, None)),
            ],
            1..30,
        )
    }

    fn make_event(event_type: EventType, identifier: &Option<String>) -> EventData {
        let mut event_data = EventData::new(event_type);
        event_data.identifier = identifier.clone();
        event_data
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn prop_all_events_callback_receives_every_event(
            events in arb_event_sequence(),
        ) {
            runtime().block_on(async {
                let mut manager = EventManager::new();
                let (callback, collected) = CollectingCallback::new();
                manager.register_callback(EventType::ALL_EVENTS, callback, false);

                let pipeline_end_count = events.iter()
                    .filter(|(et, _)| *et == EventType::PIPELINE_END)
                    .count();

                for (event_type, identifier) in &events {
                    manager.trigger_event(make_event(*event_type, identifier)).await;
                }

                // Each event plus one STATS_REPORT per PIPELINE_END.
                let received = collected.lock().await;
                assert_eq!(received.len(), events.len() + pipeline_end_count);
            });
        }

        #[test]
        fn prop_delete_failed_carries_structured_data(
            identifier in "[a-z0-9]{10}",
            error_message in "[A-Za-z ]{1,40}",
        ) {
            runtime().block_on(async {
                let mut manager = EventManager::new();
                let (callback, collected) = CollectingCallback::new();
                manager.register_callback(EventType::ALL_EVENTS, callback, false);

                let mut event_data = EventData::new(EventType::DELETE_FAILED)
                    .with_name("Error Nuking apigateway")
                    .with_attribute("region", "us-east-1");
                event_data.identifier = Some(identifier.clone());
                event_data.error_message = Some(error_message.clone());
                manager.trigger_event(event_data).await;

                let received = collected.lock().await;
                assert_eq!(received.len(), 1);
                assert_eq!(received[0].event_type, EventType::DELETE_FAILED);
                assert_eq!(received[0].event_name, "Error Nuking apigateway");
                assert_eq!(received[0].identifier.as_deref(), Some(identifier.as_str()));
                assert_eq!(received[0].error_message.as_deref(), Some(error_message.as_str()));
                assert_eq!(received[0].attributes.get("region").map(String::as_str), Some("us-east-1"));
            });
        }

        #[test]
        fn prop_event_flag_filtering(
            events in arb_event_sequence(),
        ) {
            runtime().block_on(async {
                let mut manager = EventManager::new();
                let (callback, collected) = CollectingCallback::new();
                manager.register_callback(EventType::DELETE_FAILED, callback, false);

                for (event_type, identifier) in &events {
                    manager.trigger_event(make_event(*event_type, identifier)).await;
                }

                let received = collected.lock().await;
                let expected_count = events.iter()
                    .filter(|(et, _)| *et == EventType::DELETE_FAILED)
                    .count();
                assert_eq!(received.len(), expected_count);
                assert!(received.iter().all(|event| event.event_type == EventType::DELETE_FAILED));
            });
        }

        #[test]
        fn prop_dry_run_propagated_to_events(
            events in arb_event_sequence(),
            dry_run in proptest::bool::ANY,
        ) {
            runtime().block_on(async {
                let mut manager = EventManager::new();
                let (callback, collected) = CollectingCallback::new();
                manager.register_callback(EventType::ALL_EVENTS, callback, dry_run);

                for (event_type, identifier) in &events {
                    manager.trigger_event(make_event(*event_type, identifier)).await;
                }

                let received = collected.lock().await;
                assert!(received.iter().all(|event| event.dry_run == dry_run));
            });
        }
    }
}
