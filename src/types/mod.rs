use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use zeroize_derive::{Zeroize, ZeroizeOnDrop};

pub mod error;
pub mod event_callback;
pub mod filter_callback;
pub mod token;

/// A provider-side resource as returned by a listing call.
///
/// Only the fields the inclusion filter needs are kept. The descriptor is
/// produced by [`ProviderClient::list_candidates`](crate::provider::ProviderClient::list_candidates)
/// and dropped once the selector has evaluated it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub identifier: String,
    pub display_name: Option<String>,
    pub creation_time: Option<DateTime<Utc>>,
}

impl ResourceDescriptor {
    pub fn new(identifier: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            display_name: None,
            creation_time: None,
        }
    }

    pub fn with_display_name(mut self, display_name: &str) -> Self {
        self.display_name = Some(display_name.to_string());
        self
    }

    pub fn with_creation_time(mut self, creation_time: DateTime<Utc>) -> Self {
        self.creation_time = Some(creation_time);
        self
    }

    /// The `{name, time}` view evaluated by inclusion filters.
    pub fn value(&self) -> ResourceValue<'_> {
        ResourceValue {
            name: self.display_name.as_deref(),
            time: self.creation_time.as_ref(),
        }
    }
}

/// Borrowed view of a [`ResourceDescriptor`] handed to inclusion filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceValue<'a> {
    pub name: Option<&'a str>,
    pub time: Option<&'a DateTime<Utc>>,
}

/// Per-identifier lifecycle within one `nuke_all` call.
///
/// `Succeeded` and `Failed` are terminal. There is no way back to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionStatus {
    Pending,
    Deleting,
    Succeeded,
    Failed,
}

impl Display for DeletionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let status = match self {
            DeletionStatus::Pending => "pending",
            DeletionStatus::Deleting => "deleting",
            DeletionStatus::Succeeded => "succeeded",
            DeletionStatus::Failed => "failed",
        };
        f.write_str(status)
    }
}

/// Result of a single delete attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionOutcome {
    pub identifier: String,
    pub error: Option<String>,
}

impl DeletionOutcome {
    pub fn succeeded(identifier: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            error: None,
        }
    }

    pub fn failed(identifier: &str, error: String) -> Self {
        Self {
            identifier: identifier.to_string(),
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn status(&self) -> DeletionStatus {
        if self.is_success() {
            DeletionStatus::Succeeded
        } else {
            DeletionStatus::Failed
        }
    }
}

/// AWS configuration file locations.
#[derive(Debug, Clone, Default)]
pub struct ClientConfigLocation {
    pub aws_config_file: Option<PathBuf>,
    pub aws_shared_credentials_file: Option<PathBuf>,
}

/// How the provider client obtains AWS credentials.
#[derive(Debug, Clone)]
pub enum AwsCredentials {
    Profile(String),
    Credentials { access_keys: AccessKeys },
    FromEnvironment,
}

/// AWS access key pair, cleared from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AccessKeys {
    pub access_key: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl Debug for AccessKeys {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut keys = f.debug_struct("AccessKeys");
        let session_token = self
            .session_token
            .as_ref()
            .map_or("None", |_| "** redacted **");
        keys.field("access_key", &self.access_key)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &session_token);
        keys.finish()
    }
}
