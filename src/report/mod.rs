//! Audit report of every attempted deletion.
//!
//! Delete tasks record one entry each, successful or not, in the order they
//! finish. The sink is append-only and shared by all concurrent tasks.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use tracing::{error, info};

/// One attempted deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub identifier: String,
    pub resource_type: String,
    pub error: Option<String>,
}

impl ReportEntry {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Append-only recorder of [`ReportEntry`] values.
///
/// `record` is called concurrently from every delete task.
pub trait ReportSink: Send + Sync {
    fn record(&self, entry: ReportEntry);
}

/// Counts per resource type, derived from a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub attempted: u64,
    pub deleted: u64,
    pub failed: u64,
}

/// In-memory report shared between the deleter and the caller.
///
/// Cloning is cheap and every clone appends to the same entry list.
#[derive(Debug, Clone, Default)]
pub struct Report {
    entries: Arc<Mutex<Vec<ReportEntry>>>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all entries in completion order.
    pub fn entries(&self) -> Vec<ReportEntry> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn summary(&self) -> ReportSummary {
        let entries = self.lock();
        let failed = entries.iter().filter(|entry| !entry.is_success()).count() as u64;
        let attempted = entries.len() as u64;
        ReportSummary {
            attempted,
            deleted: attempted - failed,
            failed,
        }
    }

    pub fn summary_by_resource_type(&self) -> BTreeMap<String, ReportSummary> {
        let mut summaries: BTreeMap<String, ReportSummary> = BTreeMap::new();
        for entry in self.lock().iter() {
            let summary = summaries.entry(entry.resource_type.clone()).or_default();
            summary.attempted += 1;
            if entry.is_success() {
                summary.deleted += 1;
            } else {
                summary.failed += 1;
            }
        }
        summaries
    }

    /// Emit one log line per entry followed by per-type totals.
    pub fn log_report(&self) {
        for entry in self.lock().iter() {
            match &entry.error {
                None => info!(
                    resource_type = entry.resource_type,
                    identifier = entry.identifier,
                    "deleted."
                ),
                Some(e) => error!(
                    resource_type = entry.resource_type,
                    identifier = entry.identifier,
                    error = e,
                    "failed to delete."
                ),
            }
        }

        for (resource_type, summary) in self.summary_by_resource_type() {
            info!(
                resource_type = resource_type,
                attempted = summary.attempted,
                deleted = summary.deleted,
                failed = summary.failed,
                "nuke report."
            );
        }
    }

    // A task that panicked while holding the lock has still appended a
    // complete entry, so the poisoned data is usable.
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ReportEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ReportSink for Report {
    fn record(&self, entry: ReportEntry) {
        self.lock().push(entry);
    }
}
