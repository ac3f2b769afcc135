//! API Gateway (v1) REST API provider.
//!
//! Lists REST APIs with `GetRestApis` and deletes them one at a time with
//! `DeleteRestApi`. There is no bulk delete API for this resource type.

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_apigateway::Client;
use aws_sdk_apigateway::error::SdkError;
use aws_sdk_apigateway::types::RestApi;
use aws_smithy_types::error::metadata::ProvideErrorMetadata;
use aws_smithy_types_convert::date_time::DateTimeExt;
use tracing::{trace, warn};

use crate::provider::ProviderClient;
use crate::types::ResourceDescriptor;

pub const RESOURCE_TYPE: &str = "apigateway";

// Largest page GetRestApis accepts.
const LIST_PAGE_LIMIT: i32 = 500;

/// Extracts the error code and message from an AWS SDK error.
///
/// For service errors, returns the API error code (e.g. "AccessDenied")
/// and message. Other error types (network, timeout, construction failure)
/// yield "N/A" as the code and the full error description as the message.
fn extract_sdk_error_details<E: std::fmt::Display + ProvideErrorMetadata>(
    e: &SdkError<E>,
) -> (String, String) {
    if let Some(service_err) = e.as_service_error() {
        (
            service_err.code().unwrap_or("unknown").to_string(),
            service_err.message().unwrap_or("no message").to_string(),
        )
    } else {
        ("N/A".to_string(), e.to_string())
    }
}

/// Build a client from the default credential chain for `region`.
pub async fn default_client(region: &str) -> Client {
    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await;
    Client::new(&sdk_config)
}

#[derive(Debug, Clone)]
pub struct ApiGatewayProvider {
    client: Client,
    region: String,
}

impl ApiGatewayProvider {
    pub fn new(client: Client, region: &str) -> Self {
        Self {
            client,
            region: region.to_string(),
        }
    }
}

#[async_trait]
impl ProviderClient for ApiGatewayProvider {
    async fn list_candidates(&self) -> Result<Vec<ResourceDescriptor>> {
        let mut descriptors = Vec::new();
        let mut position: Option<String> = None;

        loop {
            let output = self
                .client
                .get_rest_apis()
                .limit(LIST_PAGE_LIMIT)
                .set_position(position.take())
                .send()
                .await
                .map_err(|e| {
                    let (error_code, error_message) = extract_sdk_error_details(&e);
                    warn!(
                        region = self.region,
                        error_code = error_code,
                        error_message = error_message,
                        "GetRestApis API call failed: {} ({}).",
                        error_code,
                        error_message,
                    );
                    anyhow::anyhow!(e)
                })
                .context("aws_sdk_apigateway::client::get_rest_apis() failed.")?;

            descriptors.extend(output.items().iter().filter_map(descriptor_from_rest_api));

            match output.position() {
                Some(next) if !next.is_empty() => position = Some(next.to_string()),
                _ => break,
            }
        }

        trace!(
            region = self.region,
            count = descriptors.len(),
            "GetRestApis completed."
        );
        Ok(descriptors)
    }

    async fn delete_one(&self, identifier: &str) -> Result<()> {
        self.client
            .delete_rest_api()
            .rest_api_id(identifier)
            .send()
            .await
            .map_err(|e| {
                let (error_code, error_message) = extract_sdk_error_details(&e);
                warn!(
                    region = self.region,
                    identifier = identifier,
                    error_code = error_code,
                    error_message = error_message,
                    "DeleteRestApi API call failed for {}: {} ({}).",
                    identifier,
                    error_code,
                    error_message,
                );
                anyhow::anyhow!(e)
            })
            .context("aws_sdk_apigateway::client::delete_rest_api() failed.")?;

        Ok(())
    }
}

/// REST APIs without an id cannot be deleted and are skipped.
fn descriptor_from_rest_api(api: &RestApi) -> Option<ResourceDescriptor> {
    let identifier = api.id()?;
    Some(ResourceDescriptor {
        identifier: identifier.to_string(),
        display_name: api.name().map(|name| name.to_string()),
        creation_time: api
            .created_date()
            .and_then(|created| created.to_chrono_utc().ok()),
    })
}
