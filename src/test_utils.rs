//! Shared test utilities for the nuke library crate.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use crate::config::Config;
use crate::provider::ProviderClient;
use crate::types::ResourceDescriptor;
use crate::types::event_callback::{EventCallback, EventData};

/// Initialise a dummy tracing subscriber for tests.
///
/// Uses `try_init` so that only the first call in a process actually
/// installs the subscriber; subsequent calls are silently ignored.
pub(crate) fn init_dummy_tracing_subscriber() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("dummy=trace")
        .try_init();
}

/// `Config` for unit tests: `apigateway` in `us-east-1`, ceiling 100, no prompt.
pub(crate) fn make_test_config() -> Config {
    Config::for_resource("apigateway", "us-east-1")
}

pub(crate) fn make_identifiers(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("id-{i:04}")).collect()
}

/// In-memory provider with scripted failures, delays and panics.
///
/// Clones share the call log.
#[derive(Clone, Default)]
pub(crate) struct MockProvider {
    descriptors: Vec<ResourceDescriptor>,
    listing_error: Option<String>,
    failures: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    panics: HashSet<String>,
    list_calls: Arc<AtomicU32>,
    delete_calls: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    pub(crate) fn new(descriptors: Vec<ResourceDescriptor>) -> Self {
        Self {
            descriptors,
            ..Default::default()
        }
    }

    pub(crate) fn fail_listing(mut self, message: &str) -> Self {
        self.listing_error = Some(message.to_string());
        self
    }

    pub(crate) fn fail_on(mut self, identifier: &str, message: &str) -> Self {
        self.failures
            .insert(identifier.to_string(), message.to_string());
        self
    }

    pub(crate) fn delay_on(mut self, identifier: &str, delay: Duration) -> Self {
        self.delays.insert(identifier.to_string(), delay);
        self
    }

    pub(crate) fn panic_on(mut self, identifier: &str) -> Self {
        self.panics.insert(identifier.to_string());
        self
    }

    pub(crate) fn list_calls(&self) -> u32 {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn delete_calls(&self) -> Vec<String> {
        self.delete_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProviderClient for MockProvider {
    async fn list_candidates(&self) -> Result<Vec<ResourceDescriptor>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.listing_error {
            return Err(anyhow!(message.clone()));
        }
        Ok(self.descriptors.clone())
    }

    async fn delete_one(&self, identifier: &str) -> Result<()> {
        self.delete_calls
            .lock()
            .unwrap()
            .push(identifier.to_string());

        if let Some(delay) = self.delays.get(identifier) {
            tokio::time::sleep(*delay).await;
        }
        if self.panics.contains(identifier) {
            panic!("mock provider panicked on {identifier}");
        }
        match self.failures.get(identifier) {
            Some(message) => Err(anyhow!(message.clone())),
            None => Ok(()),
        }
    }
}

/// Event callback that stores every event it receives.
pub(crate) struct CollectingCallback {
    events: Arc<tokio::sync::Mutex<Vec<EventData>>>,
}

impl CollectingCallback {
    pub(crate) fn new() -> (Self, Arc<tokio::sync::Mutex<Vec<EventData>>>) {
        let events = Arc::new(tokio::sync::Mutex::new(Vec::new()));
        (
            Self {
                events: events.clone(),
            },
            events,
        )
    }
}

#[async_trait]
impl EventCallback for CollectingCallback {
    async fn on_event(&mut self, event_data: EventData) {
        self.events.lock().await.push(event_data);
    }
}
