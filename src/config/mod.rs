pub mod args;

use std::time::Duration;

use aws_config::profile::profile_file::{ProfileFileKind, ProfileFiles};
use aws_config::retry::RetryConfig as SdkRetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_apigateway::config::Credentials;

use crate::callback::event_manager::EventManager;
use crate::callback::filter_manager::FilterManager;
use crate::provider::apigateway;
use crate::types::{AccessKeys, AwsCredentials, ClientConfigLocation};

/// Safety ceiling applied when none is configured.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 100;

/// Main configuration for one nuke run.
///
/// Holds the resource type and region being nuked, the safety ceiling,
/// the optional per-delete deadline, safety flags (dry-run, force), the
/// provider client settings, and the filter and telemetry registrations.
///
/// # Quick Start
///
/// ```
/// use nuke_rs::Config;
///
/// let config = Config::for_resource("apigateway", "us-east-1");
/// assert_eq!(config.max_batch_size, 100);
/// assert!(config.force);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub resource_type: String,
    pub region: String,
    /// Largest batch `BulkDeleter::nuke_all` accepts.
    pub max_batch_size: usize,
    /// Deadline for each single delete. `None` waits for the provider.
    pub delete_timeout: Option<Duration>,
    pub dry_run: bool,
    pub force: bool,
    pub log_report: bool,
    pub client_config: Option<ClientConfig>,
    pub tracing_config: Option<TracingConfig>,
    pub auto_complete_shell: Option<clap_complete::shells::Shell>,
    // Callback managers
    pub filter_manager: FilterManager,
    pub event_manager: EventManager,
}

impl Config {
    /// Create a `Config` with defaults for the given resource type and region.
    ///
    /// The `force` flag is set so that programmatic callers never block on
    /// a confirmation prompt.
    pub fn for_resource(resource_type: &str, region: &str) -> Self {
        Config {
            resource_type: resource_type.to_string(),
            region: region.to_string(),
            force: true,
            ..Config::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            resource_type: apigateway::RESOURCE_TYPE.to_string(),
            region: String::new(),
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            delete_timeout: None,
            dry_run: false,
            force: false,
            log_report: true,
            client_config: None,
            tracing_config: None,
            auto_complete_shell: None,
            filter_manager: FilterManager::new(),
            event_manager: EventManager::new(),
        }
    }
}

/// AWS client configuration for the provider.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub client_config_location: ClientConfigLocation,
    pub credential: AwsCredentials,
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
    pub retry_config: RetryConfig,
    pub cli_timeout_config: CLITimeoutConfig,
}

impl ClientConfig {
    pub async fn create_client(&self) -> aws_sdk_apigateway::Client {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }

        if self.client_config_location.aws_config_file.is_some()
            || self
                .client_config_location
                .aws_shared_credentials_file
                .is_some()
        {
            let mut profile_files = ProfileFiles::builder();
            if let Some(path) = &self.client_config_location.aws_config_file {
                profile_files = profile_files.with_file(ProfileFileKind::Config, path);
            }
            if let Some(path) = &self.client_config_location.aws_shared_credentials_file {
                profile_files = profile_files.with_file(ProfileFileKind::Credentials, path);
            }
            loader = loader.profile_files(profile_files.build());
        }

        loader = match &self.credential {
            AwsCredentials::Profile(profile) => loader.profile_name(profile),
            AwsCredentials::Credentials { access_keys } => {
                loader.credentials_provider(static_credentials(access_keys))
            }
            AwsCredentials::FromEnvironment => loader,
        };

        if let Some(endpoint_url) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }

        loader = loader
            .retry_config(
                SdkRetryConfig::standard()
                    .with_max_attempts(self.retry_config.aws_max_attempts)
                    .with_initial_backoff(Duration::from_millis(
                        self.retry_config.initial_backoff_milliseconds,
                    )),
            )
            .timeout_config(self.cli_timeout_config.to_timeout_config());

        aws_sdk_apigateway::Client::new(&loader.load().await)
    }
}

fn static_credentials(access_keys: &AccessKeys) -> Credentials {
    Credentials::new(
        access_keys.access_key.clone(),
        access_keys.secret_access_key.clone(),
        access_keys.session_token.clone(),
        None,
        "nuke-rs",
    )
}

/// Retry configuration for AWS SDK operations.
///
/// These retries happen inside the SDK; the nuke core itself never retries.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub aws_max_attempts: u32,
    pub initial_backoff_milliseconds: u64,
}

/// Timeout configuration for AWS SDK operations.
#[derive(Debug, Clone, Default)]
pub struct CLITimeoutConfig {
    pub operation_timeout_milliseconds: Option<u64>,
    pub operation_attempt_timeout_milliseconds: Option<u64>,
    pub connect_timeout_milliseconds: Option<u64>,
    pub read_timeout_milliseconds: Option<u64>,
}

impl CLITimeoutConfig {
    pub fn to_timeout_config(&self) -> TimeoutConfig {
        let mut builder = TimeoutConfig::builder();
        builder
            .set_operation_timeout(self.operation_timeout_milliseconds.map(Duration::from_millis))
            .set_operation_attempt_timeout(
                self.operation_attempt_timeout_milliseconds
                    .map(Duration::from_millis),
            )
            .set_connect_timeout(self.connect_timeout_milliseconds.map(Duration::from_millis))
            .set_read_timeout(self.read_timeout_milliseconds.map(Duration::from_millis));
        builder.build()
    }
}

/// Tracing (logging) configuration.
#[derive(Debug, Clone, Copy)]
pub struct TracingConfig {
    pub tracing_level: log::Level,
    pub json_tracing: bool,
    pub aws_sdk_tracing: bool,
    pub span_events_tracing: bool,
    pub disable_color_tracing: bool,
}
