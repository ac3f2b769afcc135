//! Safety features for nuke operations.
//!
//! Implements safeguards against accidental resource loss:
//! - Dry-run mode: skips confirmation (candidates are listed, nothing is deleted)
//! - Confirmation prompt: requires exact "yes" input before deleting
//! - Force flag: skips the confirmation prompt
//! - Non-TTY detection: skips prompts in non-interactive environments
//! - JSON logging: skips prompts to avoid corrupting structured output
//!
//! The safety ceiling on batch size is enforced by `BulkDeleter`, not here.


use crate::config::Config;
use crate::types::error::NukeError;
use anyhow::{Result, anyhow};
use std::io::{BufRead, IsTerminal, Write};

/// Trait for handling user prompts, enabling testability.
///
/// The default implementation ([`StdioPromptHandler`]) uses stdin/stdout.
/// Tests provide their own implementations to avoid blocking on input.
pub trait PromptHandler: Send + Sync {
    /// Show what is about to be deleted and read one line of user input.
    ///
    /// Returns the trimmed input.
    fn read_confirmation(&self, target_display: &str) -> Result<String>;

    /// Returns `true` if both stdin and stdout are connected to a TTY.
    fn is_interactive(&self) -> bool;
}

/// Default prompt handler using stdin/stdout.
///
/// Prompts are written with `println!`/`print!`, not tracing.
pub struct StdioPromptHandler;

impl PromptHandler for StdioPromptHandler {
    fn read_confirmation(&self, target_display: &str) -> Result<String> {
        println!("{target_display}");
        print!("Type 'yes' to confirm deletion: ");
        std::io::stdout().flush()?;

        let mut input = String::new();
        std::io::stdin().lock().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }

    fn is_interactive(&self) -> bool {
        std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
    }
}

/// Validates preconditions before any resource is deleted.
///
/// Checks run in this order:
/// 1. Dry-run mode (no confirmation, nothing will be deleted)
/// 2. Force flag
/// 3. Environment (non-TTY or JSON logging)
/// 4. Confirmation prompt (exact "yes")
pub struct SafetyChecker {
    resource_type: String,
    region: String,
    dry_run: bool,
    force: bool,
    json_logging: bool,
    prompt_handler: Box<dyn PromptHandler>,
}

impl SafetyChecker {
    /// Uses [`StdioPromptHandler`] for interactive prompts.
    pub fn new(config: &Config) -> Self {
        Self::with_prompt_handler(config, Box::new(StdioPromptHandler))
    }

    pub fn with_prompt_handler(config: &Config, prompt_handler: Box<dyn PromptHandler>) -> Self {
        let json_logging = config
            .tracing_config
            .map(|tc| tc.json_tracing)
            .unwrap_or(false);

        Self {
            resource_type: config.resource_type.clone(),
            region: config.region.clone(),
            dry_run: config.dry_run,
            force: config.force,
            json_logging,
            prompt_handler,
        }
    }

    /// Check all safety preconditions before deleting `candidate_count` resources.
    ///
    /// Returns `Err(NukeError::Cancelled)` if the user declines.
    pub fn check_before_deletion(&self, candidate_count: usize) -> Result<()> {
        if self.dry_run || self.force || candidate_count == 0 {
            return Ok(());
        }

        if self.should_skip_prompt() {
            return Ok(());
        }

        self.prompt_confirmation(candidate_count)
    }

    fn should_skip_prompt(&self) -> bool {
        self.json_logging || !self.prompt_handler.is_interactive()
    }

    fn prompt_confirmation(&self, candidate_count: usize) -> Result<()> {
        let input = self
            .prompt_handler
            .read_confirmation(&self.target_display(candidate_count))?;

        if input != "yes" {
            return Err(anyhow!(NukeError::Cancelled));
        }

        Ok(())
    }

    fn target_display(&self, candidate_count: usize) -> String {
        format!(
            "{} {} resource(s) in region {} will be permanently deleted.",
            candidate_count, self.resource_type, self.region
        )
    }
}
