use crate::callback::event_manager::EventManager;
use crate::callback::filter_manager::FilterManager;
use crate::config::{
    CLITimeoutConfig, ClientConfig, Config, DEFAULT_MAX_BATCH_SIZE, RetryConfig, TracingConfig,
};
use crate::provider::apigateway;
use crate::types::{AccessKeys, AwsCredentials, ClientConfigLocation};
use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

mod value_parser;


const DEFAULT_AWS_MAX_ATTEMPTS: u32 = 10;
const DEFAULT_INITIAL_BACKOFF_MILLISECONDS: u64 = 100;
const DEFAULT_JSON_TRACING: bool = false;
const DEFAULT_AWS_SDK_TRACING: bool = false;
const DEFAULT_SPAN_EVENTS_TRACING: bool = false;
const DEFAULT_DISABLE_COLOR_TRACING: bool = false;
const DEFAULT_DRY_RUN: bool = false;
const DEFAULT_FORCE: bool = false;
const DEFAULT_NO_REPORT: bool = false;

const ERROR_MESSAGE_REGION_REQUIRED: &str = "--region is required.";
const ERROR_MESSAGE_MAX_BATCH_SIZE_ZERO: &str = "Max batch size must be at least 1.";
const ERROR_MESSAGE_DELETE_TIMEOUT_ZERO: &str = "Delete timeout must be at least 1 millisecond.";
const ERROR_MESSAGE_SECRET_KEY_REQUIRED: &str =
    "--secret-key is required when --access-key is set.";

/// nuke - Bulk deletion of cloud resources.
///
/// Lists every resource of one type in one region, asks for confirmation,
/// and deletes them all concurrently. Batches larger than the safety
/// ceiling are refused before anything is deleted.
///
/// Example:
///   nuke --region us-east-1 --dry-run
///   nuke --region eu-west-1 --resource-type apigateway --force
///   nuke --region us-east-1 --max-batch-size 50 -vv
#[derive(Parser, Clone, Debug)]
#[command(name = "nuke", version, about, long_about = None)]
pub struct CLIArgs {
    /// Region to nuke. Required unless generating shell completions.
    #[arg(long, env, value_parser = NonEmptyStringValueParser::new())]
    pub region: Option<String>,

    /// Resource type to nuke.
    #[arg(long, env, default_value = apigateway::RESOURCE_TYPE, value_parser = [apigateway::RESOURCE_TYPE])]
    pub resource_type: String,

    /// Simulation mode. Lists and filters resources but does not delete.
    #[arg(short = 'd', long, env, default_value_t = DEFAULT_DRY_RUN, help_heading = "General")]
    pub dry_run: bool,

    /// Don't log the per-resource report after deleting.
    #[arg(long, env, default_value_t = DEFAULT_NO_REPORT, help_heading = "General")]
    pub no_report: bool,

    /// Largest number of resources deleted in one run. Default: 100.
    #[arg(long, env, default_value_t = DEFAULT_MAX_BATCH_SIZE, help_heading = "Safety")]
    pub max_batch_size: usize,

    /// Skip confirmation prompt before deleting.
    #[arg(short = 'f', long, env, default_value_t = DEFAULT_FORCE, help_heading = "Safety")]
    pub force: bool,

    /// Deadline for each single delete in milliseconds.
    #[arg(long, env, help_heading = "Safety")]
    pub delete_timeout_milliseconds: Option<u64>,

    /// Verbosity level. -q (quiet), default (normal), -v, -vv, -vvv.
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Output logs in JSON format.
    #[arg(long, env, default_value_t = DEFAULT_JSON_TRACING, help_heading = "Logging")]
    pub json_tracing: bool,

    /// Enable AWS SDK tracing.
    #[arg(long, env, default_value_t = DEFAULT_AWS_SDK_TRACING, help_heading = "Logging")]
    pub aws_sdk_tracing: bool,

    /// Enable tracing span events.
    #[arg(long, env, default_value_t = DEFAULT_SPAN_EVENTS_TRACING, help_heading = "Logging")]
    pub span_events_tracing: bool,

    /// Disable colored output in logs.
    #[arg(long, env, default_value_t = DEFAULT_DISABLE_COLOR_TRACING, help_heading = "Logging")]
    pub disable_color_tracing: bool,

    /// Maximum retry attempts for AWS SDK operations. Default: 10.
    #[arg(long, env, default_value_t = DEFAULT_AWS_MAX_ATTEMPTS, help_heading = "Retry")]
    pub aws_max_attempts: u32,

    /// Initial backoff in milliseconds for SDK retries. Default: 100.
    #[arg(long, env, default_value_t = DEFAULT_INITIAL_BACKOFF_MILLISECONDS, help_heading = "Retry")]
    pub initial_backoff_milliseconds: u64,

    /// Overall operation timeout in milliseconds.
    #[arg(long, env, help_heading = "Timeout")]
    pub operation_timeout_milliseconds: Option<u64>,

    /// Per-attempt operation timeout in milliseconds.
    #[arg(long, env, help_heading = "Timeout")]
    pub operation_attempt_timeout_milliseconds: Option<u64>,

    /// Connection timeout in milliseconds.
    #[arg(long, env, help_heading = "Timeout")]
    pub connect_timeout_milliseconds: Option<u64>,

    /// Read timeout in milliseconds.
    #[arg(long, env, help_heading = "Timeout")]
    pub read_timeout_milliseconds: Option<u64>,

    /// AWS config file path.
    #[arg(long, env, value_parser = value_parser::file_exist::is_file_exist, help_heading = "AWS")]
    pub aws_config_file: Option<String>,

    /// AWS shared credentials file path.
    #[arg(long, env, value_parser = value_parser::file_exist::is_file_exist, help_heading = "AWS")]
    pub aws_shared_credentials_file: Option<String>,

    /// AWS profile. If not set, uses the default credential chain.
    #[arg(long, env, value_parser = NonEmptyStringValueParser::new(), conflicts_with = "access_key", help_heading = "AWS")]
    pub profile: Option<String>,

    /// AWS access key ID.
    #[arg(long, env, value_parser = NonEmptyStringValueParser::new(), help_heading = "AWS")]
    pub access_key: Option<String>,

    /// AWS secret access key.
    #[arg(long, env, value_parser = NonEmptyStringValueParser::new(), help_heading = "AWS")]
    pub secret_key: Option<String>,

    /// AWS session token.
    #[arg(long, env, value_parser = NonEmptyStringValueParser::new(), help_heading = "AWS")]
    pub session_token: Option<String>,

    /// Custom endpoint URL (e.g. LocalStack).
    #[arg(long, env, value_parser = value_parser::url::check_scheme, help_heading = "AWS")]
    pub endpoint_url: Option<String>,

    /// Generate shell completions.
    #[arg(long, env, help_heading = "Advanced")]
    pub auto_complete_shell: Option<clap_complete::shells::Shell>,
}

/// Parse command-line arguments into a `CLIArgs` struct.
///
/// # Example
///
/// ```
/// use nuke_rs::config::args::parse_from_args;
///
/// let args = vec!["nuke", "--region", "us-east-1", "--dry-run"];
/// let cli_args = parse_from_args(args).unwrap();
/// assert!(cli_args.dry_run);
/// ```
pub fn parse_from_args<I, T>(args: I) -> Result<CLIArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    CLIArgs::try_parse_from(args)
}

/// Parse arguments and build a Config in one step.
pub fn build_config_from_args<I, T>(args: I) -> Result<Config, String>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli_args = CLIArgs::try_parse_from(args).map_err(|e| e.to_string())?;
    Config::try_from(cli_args)
}

impl CLIArgs {
    fn validate(&self) -> Result<(), String> {
        if self.region.is_none() && self.auto_complete_shell.is_none() {
            return Err(ERROR_MESSAGE_REGION_REQUIRED.to_string());
        }
        if self.max_batch_size == 0 {
            return Err(ERROR_MESSAGE_MAX_BATCH_SIZE_ZERO.to_string());
        }
        if self.delete_timeout_milliseconds == Some(0) {
            return Err(ERROR_MESSAGE_DELETE_TIMEOUT_ZERO.to_string());
        }
        if self.access_key.is_some() && self.secret_key.is_none() {
            return Err(ERROR_MESSAGE_SECRET_KEY_REQUIRED.to_string());
        }
        Ok(())
    }

    fn build_client_config(&self) -> ClientConfig {
        let credential = if let Some(ref profile) = self.profile {
            AwsCredentials::Profile(profile.clone())
        } else if let Some(ref access_key) = self.access_key {
            AwsCredentials::Credentials {
                access_keys: AccessKeys {
                    access_key: access_key.clone(),
                    secret_access_key: self.secret_key.clone().unwrap_or_default(),
                    session_token: self.session_token.clone(),
                },
            }
        } else {
            AwsCredentials::FromEnvironment
        };

        ClientConfig {
            client_config_location: ClientConfigLocation {
                aws_config_file: self.aws_config_file.as_ref().map(PathBuf::from),
                aws_shared_credentials_file: self
                    .aws_shared_credentials_file
                    .as_ref()
                    .map(PathBuf::from),
            },
            credential,
            region: self.region.clone(),
            endpoint_url: self.endpoint_url.clone(),
            retry_config: RetryConfig {
                aws_max_attempts: self.aws_max_attempts,
                initial_backoff_milliseconds: self.initial_backoff_milliseconds,
            },
            cli_timeout_config: CLITimeoutConfig {
                operation_timeout_milliseconds: self.operation_timeout_milliseconds,
                operation_attempt_timeout_milliseconds: self.operation_attempt_timeout_milliseconds,
                connect_timeout_milliseconds: self.connect_timeout_milliseconds,
                read_timeout_milliseconds: self.read_timeout_milliseconds,
            },
        }
    }

    fn build_tracing_config(&self) -> Option<TracingConfig> {
        let log_level = self.verbosity.log_level()?;

        Some(TracingConfig {
            tracing_level: log_level,
            json_tracing: self.json_tracing,
            aws_sdk_tracing: self.aws_sdk_tracing,
            span_events_tracing: self.span_events_tracing,
            disable_color_tracing: self.disable_color_tracing,
        })
    }
}

impl TryFrom<CLIArgs> for Config {
    type Error = String;

    fn try_from(args: CLIArgs) -> Result<Self, Self::Error> {
        args.validate()?;

        let client_config = args.build_client_config();
        let tracing_config = args.build_tracing_config();

        Ok(Config {
            resource_type: args.resource_type,
            region: args.region.unwrap_or_default(),
            max_batch_size: args.max_batch_size,
            delete_timeout: args.delete_timeout_milliseconds.map(Duration::from_millis),
            dry_run: args.dry_run,
            force: args.force,
            log_report: !args.no_report,
            client_config: Some(client_config),
            tracing_config,
            auto_complete_shell: args.auto_complete_shell,
            filter_manager: FilterManager::new(),
            event_manager: EventManager::new(),
        })
    }
}
