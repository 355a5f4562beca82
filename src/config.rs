//! Configuration System
//!
//! Target, session and HTTP settings for the CLI. Configuration is layered (defaults,
//! global config file, environment) and handed to the command pipeline as a read-only
//! value shared through `Arc`.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use semver::Version;
use serde::{Deserialize, Serialize};

mod facade;
mod merge_policy;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CfConfig {
    /// API target
    #[serde(default)]
    pub target: TargetConfig,

    /// Current session (token, user, targeted org and space)
    #[serde(default)]
    pub session: SessionConfig,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Base URL of the control-plane API, e.g. `https://api.example.com`
    #[serde(default)]
    pub api_endpoint: String,

    /// API version reported by the target (semantic version, e.g. `2.54.0`)
    #[serde(default)]
    pub api_version: Option<String>,

    #[serde(default)]
    pub skip_ssl_validation: bool,
}

/// A targeted organization or space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub guid: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Value sent as the `Authorization` header, e.g. `bearer eyJ...`
    #[serde(default)]
    pub access_token: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub organization: Option<EntityRef>,

    #[serde(default)]
    pub space: Option<EntityRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl CfConfig {
    pub fn is_logged_in(&self) -> bool {
        !self.session.access_token.trim().is_empty()
    }

    pub fn organization(&self) -> Option<&EntityRef> {
        self.session
            .organization
            .as_ref()
            .filter(|org| !org.guid.is_empty())
    }

    pub fn space(&self) -> Option<&EntityRef> {
        self.session
            .space
            .as_ref()
            .filter(|space| !space.guid.is_empty())
    }

    pub fn username(&self) -> &str {
        &self.session.username
    }

    /// Parsed API version of the target, if one is recorded.
    pub fn api_version(&self) -> Result<Option<Version>, ApiError> {
        match self.target.api_version.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => Version::parse(raw).map(Some).map_err(|e| {
                ApiError::ConfigError(format!("Invalid API version '{}': {}", raw, e))
            }),
        }
    }

    /// Validate settings needed before any request is made.
    pub fn validate(&self) -> Result<(), ApiError> {
        let endpoint = self.target.api_endpoint.trim();
        if !endpoint.is_empty()
            && !endpoint.starts_with("http://")
            && !endpoint.starts_with("https://")
        {
            return Err(ApiError::ConfigError(format!(
                "API endpoint must start with http:// or https://, got '{}'",
                endpoint
            )));
        }
        if self.http.request_timeout_secs == 0 {
            return Err(ApiError::ConfigError(
                "http.request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        self.api_version()?;
        Ok(())
    }
}
