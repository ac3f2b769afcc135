// Property-based tests for bulk deletion.
//
// For any batch within the safety ceiling and any subset of failing
// identifiers, every identifier is attempted exactly once, every attempt is
// reported, and the aggregated result names exactly the failed identifiers.
// For any batch above the ceiling, nothing is attempted.

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use proptest::prelude::*;

    use crate::deleter::{AggregatedError, BulkDeleter};
    use crate::report::Report;
    use crate::test_utils::{CollectingCallback, MockProvider, make_test_config};
    use crate::types::error::is_too_many_resources_error;
    use crate::types::event_callback::EventType;
    use crate::types::token::create_pipeline_cancellation_token;

    /// Unique identifiers paired with a "fails" flag.
    fn arb_batch() -> impl Strategy<Value = Vec<(String, bool)>> {
        prop::collection::btree_set("[a-z0-9]{1,12}", 0..=100).prop_flat_map(|identifiers| {
            let len = identifiers.len();
            (
                Just(identifiers.into_iter().collect::<Vec<_>>()),
                prop::collection::vec(any::<bool>(), len),
            )
                .prop_map(|(identifiers, fails)| identifiers.into_iter().zip(fails).collect())
        })
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(40))]

        #[test]
        fn prop_every_identifier_attempted_and_reported_once(batch in arb_batch()) {
            runtime().block_on(async {
                let mut config = make_test_config();
                let (callback, events) = CollectingCallback::new();
                config
                    .event_manager
                    .register_callback(EventType::ALL_EVENTS, callback, false);

                let mut provider = MockProvider::new(vec![]);
                for (identifier, fails) in &batch {
                    if *fails {
                        provider = provider.fail_on(identifier, "denied");
                    }
                }
                let report = Report::new();
                let bulk_deleter = BulkDeleter::new(
                    &config,
                    Arc::new(provider.clone()),
                    Arc::new(report.clone()),
                    create_pipeline_cancellation_token(),
                );

                let identifiers: Vec<String> =
                    batch.iter().map(|(identifier, _)| identifier.clone()).collect();
                let expected_failures: BTreeSet<String> = batch
                    .iter()
                    .filter(|(_, fails)| *fails)
                    .map(|(identifier, _)| identifier.clone())
                    .collect();

                let result = bulk_deleter.nuke_all(&identifiers).await;

                let mut calls = provider.delete_calls();
                calls.sort();
                let mut sorted_identifiers = identifiers.clone();
                sorted_identifiers.sort();
                prop_assert_eq!(calls, sorted_identifiers);

                prop_assert_eq!(report.len(), identifiers.len());
                prop_assert_eq!(report.summary().failed as usize, expected_failures.len());

                match result {
                    Ok(()) => prop_assert!(expected_failures.is_empty()),
                    Err(e) => {
                        let aggregated = e.downcast_ref::<AggregatedError>().unwrap();
                        let failed: BTreeSet<String> = aggregated
                            .failed_identifiers()
                            .into_iter()
                            .map(str::to_string)
                            .collect();
                        prop_assert_eq!(&failed, &expected_failures);
                        prop_assert_eq!(aggregated.attempted, identifiers.len());
                    }
                }

                prop_assert_eq!(events.lock().await.len(), expected_failures.len());
                Ok(())
            })?;
        }

        #[test]
        fn prop_batch_over_ceiling_attempts_nothing(
            max_batch_size in 1usize..20,
            excess in 1usize..20,
        ) {
            runtime().block_on(async {
                let mut config = make_test_config();
                config.max_batch_size = max_batch_size;
                let provider = MockProvider::new(vec![]);
                let report = Report::new();
                let bulk_deleter = BulkDeleter::new(
                    &config,
                    Arc::new(provider.clone()),
                    Arc::new(report.clone()),
                    create_pipeline_cancellation_token(),
                );

                let identifiers: Vec<String> =
                    (0..max_batch_size + excess).map(|i| format!("r{i}")).collect();
                let e = bulk_deleter.nuke_all(&identifiers).await.unwrap_err();

                prop_assert!(is_too_many_resources_error(&e));
                prop_assert!(provider.delete_calls().is_empty());
                prop_assert!(report.is_empty());
                Ok(())
            })?;
        }
    }
}
