use anyhow::{Context, Result};
use tracing::debug;

use crate::callback::filter_manager::FilterManager;
use crate::config::Config;
use crate::provider::Provider;

/// Produces the identifiers to delete for one resource type in one region.
///
/// The selector performs exactly one listing call and evaluates every
/// descriptor against the registered inclusion filter. It never deletes.
///
/// ```text
/// CandidateSelector → BulkDeleter → Report
/// ```
pub struct CandidateSelector {
    provider: Provider,
    filter_manager: FilterManager,
    resource_type: String,
    region: String,
}

impl CandidateSelector {
    pub fn new(config: &Config, provider: Provider) -> Self {
        Self {
            provider,
            filter_manager: config.filter_manager.clone(),
            resource_type: config.resource_type.clone(),
            region: config.region.clone(),
        }
    }

    /// List resources and return the identifiers the filter includes.
    ///
    /// Identifiers keep the provider's listing order. A listing failure is
    /// returned as-is with context; no partial result is produced.
    pub async fn select_candidates(&self) -> Result<Vec<String>> {
        debug!(
            resource_type = self.resource_type,
            region = self.region,
            "listing candidates has started."
        );

        let descriptors = self.provider.list_candidates().await.with_context(|| {
            format!(
                "failed to list {} in {}.",
                self.resource_type, self.region
            )
        })?;

        let listed = descriptors.len();
        let identifiers: Vec<String> = descriptors
            .into_iter()
            .filter_map(|descriptor| {
                if self.filter_manager.should_include(&descriptor.value()) {
                    return Some(descriptor.identifier);
                }

                debug!(
                    resource_type = self.resource_type,
                    identifier = descriptor.identifier,
                    name = descriptor.display_name,
                    "excluded by filter."
                );
                None
            })
            .collect();

        debug!(
            resource_type = self.resource_type,
            region = self.region,
            listed = listed,
            selected = identifiers.len(),
            "listing candidates has been completed."
        );

        Ok(identifiers)
    }
}
