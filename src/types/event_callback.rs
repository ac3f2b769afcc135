//! Event callback trait and event data types for nuke telemetry.
//!
//! Events are fire-and-forget: a callback cannot fail the operation that
//! triggered it.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bitflags::bitflags;

bitflags! {
    /// Event type flags for filtering which events a callback receives.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    pub struct EventType: u64 {
        const UNDEFINED = 0u64;
        const PIPELINE_START = 1u64 << 1;
        const PIPELINE_END = 1u64 << 2;
        const DELETE_FAILED = 1u64 << 3;
        const PIPELINE_ERROR = 1u64 << 4;
        const STATS_REPORT = 1u64 << 5;
        const ALL_EVENTS = !0;
    }
}

/// Structured event data passed to event callbacks.
#[derive(Default, Debug, Clone)]
pub struct EventData {
    pub event_type: EventType,
    pub event_name: String,
    pub dry_run: bool,
    pub resource_type: Option<String>,
    pub region: Option<String>,
    pub identifier: Option<String>,
    pub error_message: Option<String>,
    pub message: Option<String>,
    /// Free-form attributes attached by the emitter.
    pub attributes: BTreeMap<String, String>,

    // Statistics fields (populated in STATS_REPORT events)
    pub stats_attempted: Option<u64>,
    pub stats_deleted: Option<u64>,
    pub stats_failed: Option<u64>,
    pub stats_error_count: Option<u64>,
    pub stats_duration_sec: Option<f64>,
}

impl EventData {
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, event_name: &str) -> Self {
        self.event_name = event_name.to_string();
        self
    }

    pub fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }
}

/// Trait for event callbacks that receive telemetry events.
///
/// # Notes
///
/// - Callbacks are called serially for each event
/// - Callbacks should return promptly to avoid delaying the caller
#[async_trait]
pub trait EventCallback: Send {
    async fn on_event(&mut self, event_data: EventData);
}
