use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::Config;
use crate::types::ResourceDescriptor;

pub mod apigateway;

/// Shared handle to a provider client.
///
/// Each delete task holds its own clone, so the client must be `Send + Sync`.
pub type Provider = Arc<dyn ProviderClient + Send + Sync>;

/// The two provider operations the nuke core needs for one resource type.
///
/// Transport, authentication, retries and pagination are the
/// implementation's business. Each call is attempted exactly once by the
/// core.
#[async_trait]
pub trait ProviderClient {
    /// List every resource of this client's type in its region.
    ///
    /// A paginated API must be drained here; the caller treats the returned
    /// vector as the complete listing.
    async fn list_candidates(&self) -> Result<Vec<ResourceDescriptor>>;

    /// Delete exactly one resource by identifier.
    async fn delete_one(&self, identifier: &str) -> Result<()>;
}

/// Create the provider client for the configured resource type.
pub async fn create_provider(config: &Config) -> Result<Provider> {
    match config.resource_type.as_str() {
        apigateway::RESOURCE_TYPE => {
            let client = match &config.client_config {
                Some(client_config) => client_config.create_client().await,
                None => apigateway::default_client(&config.region).await,
            };
            Ok(Arc::new(apigateway::ApiGatewayProvider::new(
                client,
                &config.region,
            )))
        }
        other => Err(anyhow::anyhow!(
            crate::types::error::NukeError::InvalidConfig(format!(
                "unsupported resource type: {other}"
            ))
        )),
    }
}
