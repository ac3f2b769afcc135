//! Nuke pipeline orchestrator.
//!
//! Drives one resource type in one region through
//! select → confirm → delete → report, and fires the pipeline lifecycle
//! events around it.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Result, anyhow};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::deleter::BulkDeleter;
use crate::provider::Provider;
use crate::report::Report;
use crate::safety::{PromptHandler, SafetyChecker};
use crate::selector::CandidateSelector;
use crate::types::error::{NukeError, is_cancelled_error};
use crate::types::event_callback::{EventData, EventType};
use crate::types::token::PipelineCancellationToken;

/// Runs one nuke for the configured resource type and region.
///
/// ```text
/// CandidateSelector → SafetyChecker → BulkDeleter → Report
/// ```
///
/// ## Usage
///
/// ```no_run
/// # async fn example() -> anyhow::Result<()> {
/// use nuke_rs::provider::create_provider;
/// use nuke_rs::{Config, NukePipeline, create_pipeline_cancellation_token};
///
/// let config = Config::for_resource("apigateway", "us-east-1");
/// let provider = create_provider(&config).await?;
/// let mut pipeline = NukePipeline::new(config, provider, create_pipeline_cancellation_token());
/// pipeline.run().await;
/// if pipeline.has_error() {
///     eprintln!("{:?}", pipeline.get_errors_and_consume().unwrap()[0]);
/// }
/// # Ok(())
/// # }
/// ```
pub struct NukePipeline {
    config: Config,
    provider: Provider,
    cancellation_token: PipelineCancellationToken,
    prompt_handler: Option<Box<dyn PromptHandler>>,
    report: Report,
    candidates: Vec<String>,
    errors: Arc<Mutex<VecDeque<anyhow::Error>>>,
    ready: bool,
}

impl NukePipeline {
    pub fn new(
        config: Config,
        provider: Provider,
        cancellation_token: PipelineCancellationToken,
    ) -> Self {
        Self {
            config,
            provider,
            cancellation_token,
            prompt_handler: None,
            report: Report::new(),
            candidates: Vec::new(),
            errors: Arc::new(Mutex::new(VecDeque::new())),
            ready: true,
        }
    }

    /// Replace the stdin/stdout confirmation prompt.
    pub fn set_prompt_handler(&mut self, prompt_handler: Box<dyn PromptHandler>) {
        self.prompt_handler = Some(prompt_handler);
    }

    /// Run the pipeline.
    ///
    /// 1. Fire PIPELINE_START
    /// 2. Select candidates
    /// 3. Confirm (or list only, in dry-run mode)
    /// 4. Delete and log the report
    /// 5. Fire PIPELINE_ERROR (on error) and PIPELINE_END
    pub async fn run(&mut self) {
        assert!(self.ready, "NukePipeline::run() called more than once");
        self.ready = false;

        self.config
            .event_manager
            .trigger_event(EventData::new(EventType::PIPELINE_START))
            .await;

        if let Err(e) = self.execute().await {
            if is_cancelled_error(&e) {
                warn!(resource_type = self.config.resource_type, "{}", e);
            } else {
                error!(resource_type = self.config.resource_type, "{:#}", e);
            }
            self.record_error(e);
        }

        if self.config.log_report && !self.report.is_empty() {
            self.report.log_report();
        }

        self.fire_completion_events().await;
    }

    pub fn has_error(&self) -> bool {
        !self.lock_errors().is_empty()
    }

    /// Consume and return all accumulated errors.
    ///
    /// Returns `None` if no errors occurred.
    pub fn get_errors_and_consume(&self) -> Option<Vec<anyhow::Error>> {
        let mut error_list = self.lock_errors();
        if error_list.is_empty() {
            return None;
        }
        Some(error_list.drain(..).collect())
    }

    /// Get error messages without consuming them.
    pub fn get_error_messages(&self) -> Option<Vec<String>> {
        let error_list = self.lock_errors();
        if error_list.is_empty() {
            return None;
        }
        Some(error_list.iter().map(|e| format!("{e:#}")).collect())
    }

    /// Identifiers selected by the last run, in listing order.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// The audit report. Empty after a dry run.
    pub fn report(&self) -> &Report {
        &self.report
    }

    async fn execute(&mut self) -> Result<()> {
        let selector = CandidateSelector::new(&self.config, self.provider.clone());
        self.candidates = selector.select_candidates().await?;

        info!(
            resource_type = self.config.resource_type,
            region = self.config.region,
            count = self.candidates.len(),
            "found {} {} to nuke.",
            self.candidates.len(),
            self.config.resource_type
        );

        if self.config.dry_run {
            for identifier in &self.candidates {
                info!(
                    resource_type = self.config.resource_type,
                    region = self.config.region,
                    identifier = identifier,
                    "[dry-run] would delete."
                );
            }
            return Ok(());
        }

        let bulk_deleter = BulkDeleter::new(
            &self.config,
            self.provider.clone(),
            Arc::new(self.report.clone()),
            self.cancellation_token.clone(),
        );
        bulk_deleter.check_batch_size(self.candidates.len())?;

        self.check_prerequisites()?;

        if self.cancellation_token.is_cancelled() {
            return Err(anyhow!(NukeError::Cancelled));
        }

        bulk_deleter.nuke_all(&self.candidates).await
    }

    fn check_prerequisites(&mut self) -> Result<()> {
        let checker = match self.prompt_handler.take() {
            Some(prompt_handler) => SafetyChecker::with_prompt_handler(&self.config, prompt_handler),
            None => SafetyChecker::new(&self.config),
        };
        checker.check_before_deletion(self.candidates.len())
    }

    fn record_error(&self, error: anyhow::Error) {
        self.lock_errors().push_back(error);
    }

    async fn fire_completion_events(&self) {
        if let Some(messages) = self.get_error_messages() {
            let mut event_data = EventData::new(EventType::PIPELINE_ERROR);
            event_data.resource_type = Some(self.config.resource_type.clone());
            event_data.region = Some(self.config.region.clone());
            event_data.message = messages.into_iter().next();
            self.config.event_manager.trigger_event(event_data).await;
        }

        let summary = self.report.summary();
        debug!(
            resource_type = self.config.resource_type,
            attempted = summary.attempted,
            deleted = summary.deleted,
            failed = summary.failed,
            "pipeline has been completed."
        );

        let mut event_data = EventData::new(EventType::PIPELINE_END);
        event_data.resource_type = Some(self.config.resource_type.clone());
        event_data.region = Some(self.config.region.clone());
        event_data.stats_attempted = Some(summary.attempted);
        event_data.stats_deleted = Some(summary.deleted);
        event_data.stats_failed = Some(summary.failed);
        self.config.event_manager.trigger_event(event_data).await;
    }

    // A panic while the lock is held cannot leave the queue half-written.
    fn lock_errors(&self) -> MutexGuard<'_, VecDeque<anyhow::Error>> {
        self.errors
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
