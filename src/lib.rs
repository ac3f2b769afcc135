/*!
# Overview
nuke-rs deletes every cloud resource of one type in one region that matches
an inclusion filter.

## Features
- **Concurrent deletion**: one task per resource, every outcome collected
- **Safety ceiling**: batches larger than `max_batch_size` are refused before anything is deleted
- **Aggregated errors**: one failure never stops the others; all causes are returned together
- **Auditable report**: every attempt, successful or not, is recorded
- **Telemetry**: failures and pipeline lifecycle events go to a registered callback
- **Safety First**: dry-run mode, confirmation prompt, force flag

## As a Library
The `nuke` CLI is a thin wrapper over this library.

```toml
[dependencies]
nuke-rs = "0.1"
tokio = { version = "1", features = ["full"] }
```

```no_run
use nuke_rs::config::args::parse_from_args;
use nuke_rs::provider::create_provider;
use nuke_rs::types::ResourceValue;
use nuke_rs::{Config, NukePipeline, create_pipeline_cancellation_token};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = vec!["nuke", "--region", "us-east-1", "--dry-run"];
    let mut config = Config::try_from(parse_from_args(args)?).map_err(anyhow::Error::msg)?;
    config
        .filter_manager
        .register_filter(|value: &ResourceValue| {
            value.name.is_some_and(|name| name.starts_with("test-"))
        });

    let provider = create_provider(&config).await?;
    let mut pipeline = NukePipeline::new(config, provider, create_pipeline_cancellation_token());
    pipeline.run().await;

    if pipeline.has_error() {
        eprintln!("{:?}", pipeline.get_errors_and_consume().unwrap()[0]);
    }
    Ok(())
}
```
*/

pub mod callback;
pub mod config;
pub mod deleter;
pub mod pipeline;
pub mod provider;
pub mod report;
pub mod safety;
pub mod selector;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use config::Config;
pub use config::args::CLIArgs;
pub use deleter::{AggregatedError, BulkDeleter};
pub use pipeline::NukePipeline;
pub use report::{Report, ReportEntry};
pub use selector::CandidateSelector;
pub use types::error::{NukeError, exit_code_from_error, is_cancelled_error};
pub use types::token::{PipelineCancellationToken, create_pipeline_cancellation_token};
