//! Folding per-identifier outcomes into one batch result.

use std::fmt;

use crate::types::DeletionOutcome;

/// One failed identifier and its cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedDeletion {
    pub identifier: String,
    pub error: String,
}

/// Every failure of one `nuke_all` batch.
///
/// Never constructed with an empty `failures` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedError {
    pub resource_type: String,
    pub region: String,
    pub attempted: usize,
    pub failures: Vec<FailedDeletion>,
}

impl AggregatedError {
    pub fn failed_identifiers(&self) -> Vec<&str> {
        self.failures
            .iter()
            .map(|failure| failure.identifier.as_str())
            .collect()
    }
}

impl fmt::Display for AggregatedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} {} deletions failed in {}:",
            self.failures.len(),
            self.attempted,
            self.resource_type,
            self.region
        )?;
        for failure in &self.failures {
            write!(f, "\n\t* {}: {}", failure.identifier, failure.error)?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregatedError {}

/// `Ok(())` iff no outcome carries an error.
///
/// Failures keep the order of `outcomes`.
pub fn aggregate(
    resource_type: &str,
    region: &str,
    outcomes: &[DeletionOutcome],
) -> Result<(), AggregatedError> {
    let failures: Vec<FailedDeletion> = outcomes
        .iter()
        .filter_map(|outcome| {
            outcome.error.as_ref().map(|error| FailedDeletion {
                identifier: outcome.identifier.clone(),
                error: error.clone(),
            })
        })
        .collect();

    if failures.is_empty() {
        return Ok(());
    }

    Err(AggregatedError {
        resource_type: resource_type.to_string(),
        region: region.to_string(),
        attempted: outcomes.len(),
        failures,
    })
}
