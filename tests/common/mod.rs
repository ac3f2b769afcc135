//! Shared test infrastructure for nuke-rs integration tests.
//!
//! Provides an in-memory `ProviderClient` and an event collector so that
//! whole pipelines can run without cloud credentials.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use nuke_rs::provider::ProviderClient;
use nuke_rs::types::ResourceDescriptor;
use nuke_rs::types::event_callback::{EventCallback, EventData};

/// Provider backed by a map of live resources.
///
/// Successful deletes remove the resource, so a second listing reflects
/// the first run.
#[derive(Clone, Default)]
pub struct InMemoryProvider {
    resources: Arc<Mutex<Vec<ResourceDescriptor>>>,
    failures: Arc<HashMap<String, String>>,
    deleted: Arc<Mutex<Vec<String>>>,
    attempts: Arc<Mutex<Vec<String>>>,
}

impl InMemoryProvider {
    pub fn new(resources: Vec<ResourceDescriptor>) -> Self {
        Self {
            resources: Arc::new(Mutex::new(resources)),
            ..Default::default()
        }
    }

    pub fn with_named(names: &[&str]) -> Self {
        Self::new(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| ResourceDescriptor::new(&format!("api{i:03}")).with_display_name(name))
                .collect(),
        )
    }

    pub fn failing_on(mut self, identifier: &str, message: &str) -> Self {
        let mut failures = (*self.failures).clone();
        failures.insert(identifier.to_string(), message.to_string());
        self.failures = Arc::new(failures);
        self
    }

    pub fn remaining(&self) -> HashSet<String> {
        self.resources
            .lock()
            .unwrap()
            .iter()
            .map(|descriptor| descriptor.identifier.clone())
            .collect()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProviderClient for InMemoryProvider {
    async fn list_candidates(&self) -> Result<Vec<ResourceDescriptor>> {
        Ok(self.resources.lock().unwrap().clone())
    }

    async fn delete_one(&self, identifier: &str) -> Result<()> {
        self.attempts.lock().unwrap().push(identifier.to_string());
        if let Some(message) = self.failures.get(identifier) {
            return Err(anyhow!("{message}"));
        }

        let mut resources = self.resources.lock().unwrap();
        let before = resources.len();
        resources.retain(|descriptor| descriptor.identifier != identifier);
        if resources.len() == before {
            return Err(anyhow!("NotFoundException: Invalid API identifier specified"));
        }
        drop(resources);

        self.deleted.lock().unwrap().push(identifier.to_string());
        Ok(())
    }
}

/// Event callback that stores every event it receives.
pub struct CollectingCallback {
    events: Arc<tokio::sync::Mutex<Vec<EventData>>>,
}

impl CollectingCallback {
    pub fn new() -> (Self, Arc<tokio::sync::Mutex<Vec<EventData>>>) {
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
