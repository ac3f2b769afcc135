//! One delete attempt for one identifier.
//!
//! Each spawned task owns a clone of [`SingleDeleter`] and runs
//! [`SingleDeleter::delete`] exactly once.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow};
use tracing::debug;

use crate::provider::Provider;
use crate::report::{ReportEntry, ReportSink};
use crate::types::error::NukeError;
use crate::types::token::PipelineCancellationToken;
use crate::types::{DeletionOutcome, DeletionStatus};

#[derive(Clone)]
pub struct SingleDeleter {
    provider: Provider,
    report: Arc<dyn ReportSink>,
    resource_type: String,
    region: String,
    delete_timeout: Option<Duration>,
    cancellation_token: PipelineCancellationToken,
}

impl SingleDeleter {
    pub fn new(
        provider: Provider,
        report: Arc<dyn ReportSink>,
        resource_type: &str,
        region: &str,
        delete_timeout: Option<Duration>,
        cancellation_token: PipelineCancellationToken,
    ) -> Self {
        Self {
            provider,
            report,
            resource_type: resource_type.to_string(),
            region: region.to_string(),
            delete_timeout,
            cancellation_token,
        }
    }

    /// Attempt the delete, record it in the report, and return the outcome.
    ///
    /// Never retries. A failure here does not affect sibling tasks.
    pub async fn delete(&self, identifier: String) -> DeletionOutcome {
        debug!(
            resource_type = self.resource_type,
            identifier = identifier,
            status = %DeletionStatus::Deleting,
            "sending delete request."
        );

        let outcome = match self.delete_with_deadline(&identifier).await {
            Ok(()) => DeletionOutcome::succeeded(&identifier),
            Err(e) => DeletionOutcome::failed(&identifier, format!("{e:#}")),
        };

        self.record(&outcome);

        match &outcome.error {
            None => debug!(
                resource_type = self.resource_type,
                identifier = identifier,
                status = %outcome.status(),
                "[OK] {} deleted in {}.",
                identifier,
                self.region,
            ),
            Some(e) => debug!(
                resource_type = self.resource_type,
                identifier = identifier,
                status = %outcome.status(),
                error = e,
                "[Failed] Error deleting {} in {}.",
                identifier,
                self.region,
            ),
        }

        outcome
    }

    /// Append the outcome to the report sink.
    pub fn record(&self, outcome: &DeletionOutcome) {
        self.report.record(ReportEntry {
            identifier: outcome.identifier.clone(),
            resource_type: self.resource_type.clone(),
            error: outcome.error.clone(),
        });
    }

    async fn delete_with_deadline(&self, identifier: &str) -> Result<()> {
        let delete = async {
            match self.delete_timeout {
                Some(timeout) => {
                    match tokio::time::timeout(timeout, self.provider.delete_one(identifier)).await
                    {
                        Ok(result) => result,
                        Err(_) => Err(anyhow!(NukeError::DeleteTimeout {
                            identifier: identifier.to_string(),
                            timeout_milliseconds: saturating_millis(timeout),
                        })),
                    }
                }
                None => self.provider.delete_one(identifier).await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancellation_token.cancelled() => Err(anyhow!(NukeError::Cancelled)),
            result = delete => result,
        }
    }
}

fn saturating_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
