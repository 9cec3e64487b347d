//! HTTP transport
//!
//! The client talks to the API through [`Transport`], so the request layer can
//! be exercised without a network. [`HttpTransport`] is the [`reqwest`]-backed
//! implementation used in production; it pools connections and is safe to
//! share between concurrent callers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use thiserror::Error;

use crate::credentials::ApiKey;

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, replacing invalid UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// The request never produced a response (DNS, connect, TLS, timeout, ...)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends authenticated GET requests relative to a base URL
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(
        &self,
        path: &str,
        query: &[(&'static str, String)],
        api_key: &ApiKey,
    ) -> Result<RawResponse, TransportError>;
}

/// [`Transport`] over a pooled [`reqwest::Client`]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Reuse an existing [`reqwest::Client`] and its connection pool
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(
        &self,
        path: &str,
        query: &[(&'static str, String)],
        api_key: &ApiKey,
    ) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .header(AUTHORIZATION, api_key.expose())
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_url_join() {
        let transport = HttpTransport::new("https://test-api.example.com/api/v1/", None).unwrap();
        assert_eq!(
            transport.url("/partner/daily_metrics"),
            "https://test-api.example.com/api/v1/partner/daily_metrics"
        );

        let transport = HttpTransport::new("https://test-api.example.com/api/v1", None).unwrap();
        assert_eq!(
            transport.url("partner/daily_metrics"),
            "https://test-api.example.com/api/v1/partner/daily_metrics"
        );
    }

    #[test]
    fn test_raw_response_helpers() {
        let ok = RawResponse {
            status: 204,
            body: Vec::new(),
        };
        assert!(ok.is_success());

        let err = RawResponse {
            status: 500,
            body: b"Internal Server Error".to_vec(),
        };
        assert!(!err.is_success());
        assert_eq!(err.text(), "Internal Server Error");
    }
}
