//! Event callback manager.
//!
//! The telemetry sink of the crate. Deletion failures and pipeline lifecycle
//! events are dispatched here; delivery is best effort and never surfaces
//! an error to the emitter.

use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::types::event_callback::{EventCallback, EventData, EventType};

/// Accumulated pipeline statistics for the STATS_REPORT event.
#[derive(Default, Debug, Clone)]
pub struct PipelineStats {
    pub pipeline_start_time: Option<Instant>,
    pub stats_attempted: u64,
    pub stats_deleted: u64,
    pub stats_failed: u64,
    pub stats_error_count: u64,
    pub stats_duration_sec: f64,
}

impl From<PipelineStats> for EventData {
    fn from(stats: PipelineStats) -> Self {
        let mut event_data = EventData::new(EventType::STATS_REPORT).with_name("Nuke Stats");
        event_data.stats_attempted = Some(stats.stats_attempted);
        event_data.stats_deleted = Some(stats.stats_deleted);
        event_data.stats_failed = Some(stats.stats_failed);
        event_data.stats_error_count = Some(stats.stats_error_count);
        event_data.stats_duration_sec = Some(stats.stats_duration_sec);
        event_data
    }
}

/// Manages event callback registration and dispatching.
///
/// Holds an optional `EventCallback` trait object and accumulated pipeline statistics.
/// On `PIPELINE_END`, sends a `STATS_REPORT` event with accumulated stats if the caller
/// subscribed to `STATS_REPORT` via `event_flags`.
#[derive(Clone)]
pub struct EventManager {
    pub event_callback: Option<Arc<Mutex<Box<dyn EventCallback + Send + Sync>>>>,
    pub event_flags: EventType,
    pub dry_run: bool,
    pub pipeline_stats: Arc<Mutex<PipelineStats>>,
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new()
    }
}

impl EventManager {
    pub fn new() -> Self {
        Self {
            event_callback: None,
            event_flags: EventType::ALL_EVENTS,
            dry_run: false,
            pipeline_stats: Arc::new(Mutex::new(PipelineStats::default())),
        }
    }

    /// Register an event callback with event type filter and dry-run flag.
    pub fn register_callback<T: EventCallback + Send + Sync + 'static>(
        &mut self,
        events_flag: EventType,
        callback: T,
        dry_run: bool,
    ) {
        self.event_callback = Some(Arc::new(Mutex::new(Box::new(callback))));
        self.event_flags = events_flag;
        self.dry_run = dry_run;
    }

    /// Returns true if an event callback has been registered.
    pub fn is_callback_registered(&self) -> bool {
        self.event_callback.is_some()
    }

    /// Trigger an event, updating internal stats and dispatching to the callback.
    pub async fn trigger_event(&self, mut event_data: EventData) {
        self.update_pipeline_stats(&event_data).await;

        if let Some(callback) = &self.event_callback {
            let event_type = event_data.event_type;
            if self.event_flags.contains(event_type) {
                event_data.dry_run = self.dry_run;
                callback.lock().await.on_event(event_data).await;
            }
            if event_type == EventType::PIPELINE_END
                && self.event_flags.contains(EventType::STATS_REPORT)
            {
                let stats = self.pipeline_stats.lock().await.clone();
                let mut stats_event: EventData = stats.into();
                stats_event.dry_run = self.dry_run;
                callback.lock().await.on_event(stats_event).await;
            }
        }
    }

    async fn update_pipeline_stats(&self, event_data: &EventData) {
        let mut stats = self.pipeline_stats.lock().await;

        match event_data.event_type {
            EventType::PIPELINE_START => {
                stats.pipeline_start_time = Some(Instant::now());
            }
            EventType::PIPELINE_END => {
                if let Some(attempted) = event_data.stats_attempted {
                    stats.stats_attempted = attempted;
                }
                if let Some(deleted) = event_data.stats_deleted {
                    stats.stats_deleted = deleted;
                }
                if let Some(start) = stats.pipeline_start_time {
                    stats.stats_duration_sec = start.elapsed().as_secs_f64();
                }
            }
            EventType::DELETE_FAILED => {
                stats.stats_failed += 1;
            }
            EventType::PIPELINE_ERROR => {
                stats.stats_error_count += 1;
            }
            _ => {}
        }
    }
}

impl fmt::Debug for EventManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventManager")
            .field("event_flags", &self.event_flags)
            .field("callback_registered", &self.event_callback.is_some())
            .finish()
    }
}
