//! Bulk deletion orchestrator.
//!
//! [`BulkDeleter::nuke_all`] enforces the safety ceiling, spawns one delete
//! task per identifier, waits for all of them, and folds their outcomes into
//! a single result. Every attempt lands in the report; every failure also
//! triggers one `DELETE_FAILED` telemetry event.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use tokio::task::JoinSet;
use tracing::{debug, error, trace};

use crate::callback::event_manager::EventManager;
use crate::config::Config;
use crate::provider::Provider;
use crate::report::ReportSink;
use crate::types::{DeletionOutcome, DeletionStatus};
use crate::types::error::NukeError;
use crate::types::event_callback::{EventData, EventType};
use crate::types::token::PipelineCancellationToken;

pub mod aggregate;
pub mod single;

#[cfg(test)]
mod deleter_properties;

pub use aggregate::{AggregatedError, FailedDeletion};
pub use single::SingleDeleter;

const PANICKED_TASK_MESSAGE: &str = "delete task panicked before reporting an outcome";

pub struct BulkDeleter {
    resource_type: String,
    region: String,
    max_batch_size: usize,
    event_manager: EventManager,
    single_deleter: SingleDeleter,
}

impl BulkDeleter {
    pub fn new(
        config: &Config,
        provider: Provider,
        report: Arc<dyn ReportSink>,
        cancellation_token: PipelineCancellationToken,
    ) -> Self {
        Self {
            resource_type: config.resource_type.clone(),
            region: config.region.clone(),
            max_batch_size: config.max_batch_size,
            event_manager: config.event_manager.clone(),
            single_deleter: SingleDeleter::new(
                provider,
                report,
                &config.resource_type,
                &config.region,
                config.delete_timeout,
                cancellation_token,
            ),
        }
    }

    /// Delete every identifier concurrently.
    ///
    /// Returns `Ok(())` only if every delete succeeded. A batch larger than
    /// the safety ceiling fails with [`NukeError::TooManyResources`] before
    /// any delete is attempted. Individual failures never stop sibling
    /// deletes; they are returned together as an [`AggregatedError`].
    pub async fn nuke_all(&self, identifiers: &[String]) -> Result<()> {
        if identifiers.is_empty() {
            debug!(
                resource_type = self.resource_type,
                region = self.region,
                "no {} to nuke in region {}.",
                self.resource_type,
                self.region
            );
            return Ok(());
        }

        self.check_batch_size(identifiers.len())?;

        debug!(
            resource_type = self.resource_type,
            region = self.region,
            count = identifiers.len(),
            "deleting {} in region {}.",
            self.resource_type,
            self.region
        );

        let outcomes = self.delete_concurrently(identifiers).await;
        self.aggregate_outcomes(&outcomes).await
    }

    /// Fails with [`NukeError::TooManyResources`] if `count` exceeds the
    /// safety ceiling.
    ///
    /// `nuke_all` runs this itself. Callers that prompt before deleting run
    /// it first so the prompt never offers a batch that will be refused.
    pub fn check_batch_size(&self, count: usize) -> Result<()> {
        if count <= self.max_batch_size {
            return Ok(());
        }

        error!(
            resource_type = self.resource_type,
            count = count,
            max_batch_size = self.max_batch_size,
            "nuking too many {} at once ({}): halting to avoid hitting API rate limiting.",
            self.resource_type,
            self.max_batch_size
        );
        Err(anyhow!(NukeError::TooManyResources {
            resource_type: self.resource_type.clone(),
            count,
            max_batch_size: self.max_batch_size,
        }))
    }

    /// Spawn one task per identifier and wait for all of them.
    ///
    /// The returned outcomes are in submission order, one per identifier.
    async fn delete_concurrently(&self, identifiers: &[String]) -> Vec<DeletionOutcome> {
        let mut join_set = JoinSet::new();
        for (index, identifier) in identifiers.iter().enumerate() {
            trace!(
                resource_type = self.resource_type,
                identifier = identifier,
                status = %DeletionStatus::Pending,
                "delete task queued."
            );
            let single_deleter = self.single_deleter.clone();
            let identifier = identifier.clone();
            join_set.spawn(async move { (index, single_deleter.delete(identifier).await) });
        }

        let mut slots: Vec<Option<DeletionOutcome>> = vec![None; identifiers.len()];
        while let Some(join_result) = join_set.join_next().await {
            match join_result {
                Ok((index, outcome)) => slots[index] = Some(outcome),
                Err(join_error) => {
                    error!(
                        resource_type = self.resource_type,
                        error = %join_error,
                        "delete task failed to complete."
                    );
                }
            }
        }

        slots
            .into_iter()
            .zip(identifiers)
            .map(|(slot, identifier)| {
                slot.unwrap_or_else(|| {
                    let outcome =
                        DeletionOutcome::failed(identifier, PANICKED_TASK_MESSAGE.to_string());
                    self.single_deleter.record(&outcome);
                    outcome
                })
            })
            .collect()
    }

    async fn aggregate_outcomes(&self, outcomes: &[DeletionOutcome]) -> Result<()> {
        for outcome in outcomes {
            let Some(e) = &outcome.error else {
                continue;
            };

            debug!(
                resource_type = self.resource_type,
                identifier = outcome.identifier,
                "[Failed] {}",
                e
            );

            let mut event_data = EventData::new(EventType::DELETE_FAILED)
                .with_name(&format!("Error Nuking {}", self.resource_type))
                .with_attribute("region", &self.region);
            event_data.resource_type = Some(self.resource_type.clone());
            event_data.region = Some(self.region.clone());
            event_data.identifier = Some(outcome.identifier.clone());
            event_data.error_message = Some(e.clone());
            self.event_manager.trigger_event(event_data).await;
        }

        aggregate::aggregate(&self.resource_type, &self.region, outcomes).map_err(|e| {
            let context = format!(
                "failed to nuke {} of {} {} in {}.",
                e.failures.len(),
                e.attempted,
                self.resource_type,
                self.region
            );
            anyhow!(e).context(context)
        })
    }
}
