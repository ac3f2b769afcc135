use anyhow::Error;
use thiserror::Error;

use crate::deleter::aggregate::AggregatedError;

/// Application-level error types for nuke-rs.
///
/// ## Exit Codes
///
/// Each variant maps to an exit code (via `exit_code()`):
/// - 0: Non-error conditions (Cancelled)
/// - 1: General errors (DeleteTimeout, listing and client failures)
/// - 2: Configuration errors and safety ceiling violations
///
/// A partial failure is reported as an [`AggregatedError`] and maps to 3 in
/// [`exit_code_from_error`].
#[derive(Error, Debug, PartialEq)]
pub enum NukeError {
    /// More identifiers than the safety ceiling allows in one batch.
    /// Nothing has been deleted when this is returned.
    #[error(
        "Too many {resource_type} resources to nuke at once: {count} (max {max_batch_size}). halting to avoid hitting API rate limiting"
    )]
    TooManyResources {
        resource_type: String,
        count: usize,
        max_batch_size: usize,
    },

    /// Configuration error.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A single delete did not finish within the configured deadline.
    #[error("Deleting {identifier} timed out after {timeout_milliseconds}ms")]
    DeleteTimeout {
        identifier: String,
        timeout_milliseconds: u64,
    },

    /// Operation cancelled by user.
    #[error("Operation cancelled by user")]
    Cancelled,
}

impl NukeError {
    pub fn exit_code(&self) -> i32 {
        match self {
            NukeError::Cancelled => 0,
            NukeError::InvalidConfig(_) | NukeError::TooManyResources { .. } => 2,
            _ => 1,
        }
    }
}

/// Check if an anyhow::Error wraps a cancellation error.
pub fn is_cancelled_error(e: &Error) -> bool {
    if let Some(err) = e.downcast_ref::<NukeError>() {
        return *err == NukeError::Cancelled;
    }
    false
}

/// Check if an anyhow::Error wraps a safety ceiling violation.
pub fn is_too_many_resources_error(e: &Error) -> bool {
    matches!(
        e.downcast_ref::<NukeError>(),
        Some(NukeError::TooManyResources { .. })
    )
}

/// Extract the exit code from an anyhow::Error, defaulting to 1.
///
/// An [`AggregatedError`] anywhere in the chain is a partial failure.
pub fn exit_code_from_error(e: &Error) -> i32 {
    if let Some(err) = e.downcast_ref::<NukeError>() {
        return err.exit_code();
    }
    if e.downcast_ref::<AggregatedError>().is_some() {
        return 3;
    }
    1
}
