use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing::{debug, error, trace};

use nuke_rs::config::Config;
use nuke_rs::provider::create_provider;
use nuke_rs::{
    CLIArgs, NukePipeline, create_pipeline_cancellation_token, exit_code_from_error,
    is_cancelled_error,
};

mod ctrl_c_handler;
mod tracing_init;

/// nuke - Bulk deletion of cloud resources.
///
/// This binary is a thin wrapper over the nuke-rs library.
#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config_exit_if_err();

    if let Some(shell) = config.auto_complete_shell {
        generate(
            shell,
            &mut CLIArgs::command(),
            "nuke",
            &mut std::io::stdout(),
        );

        return Ok(());
    }

    start_tracing_if_necessary(&config);

    trace!("config = {:?}", config);

    let exit_code = run(config).await?;
    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

fn load_config_exit_if_err() -> Config {
    match Config::try_from(CLIArgs::parse()) {
        Ok(config) => config,
        Err(error_message) => {
            clap::Error::raw(clap::error::ErrorKind::ValueValidation, error_message).exit()
        }
    }
}

fn start_tracing_if_necessary(config: &Config) -> bool {
    let Some(tracing_config) = &config.tracing_config else {
        return false;
    };

    tracing_init::init_tracing(tracing_config);
    true
}

/// Run one nuke and return the process exit code.
async fn run(config: Config) -> Result<i32> {
    let cancellation_token = create_pipeline_cancellation_token();
    ctrl_c_handler::spawn_ctrl_c_handler(cancellation_token.clone());

    let start_time = tokio::time::Instant::now();
    debug!("nuke pipeline start.");

    let provider = create_provider(&config).await?;
    let mut pipeline = NukePipeline::new(config, provider, cancellation_token);
    pipeline.run().await;

    let duration_sec = format!("{:.3}", start_time.elapsed().as_secs_f32());

    let Some(errors) = pipeline.get_errors_and_consume() else {
        debug!(duration_sec = duration_sec, "nuke has been completed.");
        return Ok(0);
    };

    let mut exit_code = 0;
    for err in &errors {
        if is_cancelled_error(err) {
            debug!("nuke cancelled by user.");
            continue;
        }
        error!("{:#}", err);
        exit_code = exit_code.max(exit_code_from_error(err));
    }

    if exit_code != 0 {
        error!(duration_sec = duration_sec, "nuke failed.");
    }
    Ok(exit_code)
}
