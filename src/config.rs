//! Client configuration

use std::time::Duration;

use crate::credentials::{ApiKey, CredentialSource, EnvCredentials};
use crate::error::ApiError;

/// Production base URL of the partner API
pub const DEFAULT_BASE_URL: &str = "https://partner.ultrahuman.com/api/v1";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "ULTRAHUMAN_BASE_URL";

const MISSING_API_KEY: &str = "API key is not provided and not found in environment variables";

/// Settings for [`UltrahumanClient`](crate::UltrahumanClient)
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: ApiKey,
    /// Whole-request timeout; `None` leaves the transport default
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            timeout: None,
        }
    }

    /// Resolve the key from `source`; a missing key is a configuration error.
    pub fn from_source(source: &impl CredentialSource) -> Result<Self, ApiError> {
        let api_key = source
            .api_key()
            .ok_or_else(|| ApiError::Configuration(MISSING_API_KEY.to_string()))?;
        Ok(Self::new(api_key))
    }

    /// Read `ULTRAHUMAN_API_KEY` and `ULTRAHUMAN_BASE_URL`, loading `.env` first.
    pub fn from_env() -> Result<Self, ApiError> {
        let mut config = Self::from_source(&EnvCredentials::default())?;
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.is_empty() {
                config.base_url = base_url;
            }
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Check the base URL is an absolute http(s) URL
    pub fn validate(&self) -> Result<(), ApiError> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            ApiError::Configuration(format!("Invalid base URL '{}': {e}", self.base_url))
        })?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ApiError::Configuration(format!(
                "Unsupported base URL scheme '{scheme}'"
            ))),
        }
    }
}
