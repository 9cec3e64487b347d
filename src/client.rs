//! Ultrahuman partner API client
//!
//! Builds the daily metrics query, sends it through a [`Transport`] and decodes
//! the body. HTTP failures are mapped to [`ApiError`] kinds by status code.

use chrono::NaiveDate;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::credentials::ApiKey;
use crate::decoder;
use crate::error::ApiError;
use crate::request::{DailyMetricsRequest, Selector, DAILY_METRICS_PATH};
use crate::schema::UltrahumanData;
use crate::transport::{HttpTransport, RawResponse, Transport};

/// Client for the `/partner/daily_metrics` endpoint.
///
/// Methods take `&self`; one client can serve concurrent callers. The
/// underlying connection pool is released when the client is dropped.
pub struct UltrahumanClient<T: Transport = HttpTransport> {
    transport: T,
    api_key: ApiKey,
}

impl UltrahumanClient<HttpTransport> {
    /// Create a client over HTTP from `config`
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        config.validate()?;
        tracing::debug!(
            base_url = %config.base_url,
            api_key = %config.api_key,
            "initializing Ultrahuman client"
        );
        let transport = HttpTransport::new(config.base_url, config.timeout)
            .map_err(|e| ApiError::Configuration(e.to_string()))?;
        Ok(Self::with_transport(transport, config.api_key))
    }

    /// Create a client configured from the environment (and `.env`)
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }
}

impl<T: Transport> UltrahumanClient<T> {
    pub fn with_transport(transport: T, api_key: ApiKey) -> Self {
        Self { transport, api_key }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch daily metrics for one calendar day
    pub async fn daily_metrics_for_date(
        &self,
        date: NaiveDate,
        email: Option<&str>,
    ) -> Result<UltrahumanData, ApiError> {
        self.daily_metrics(&build_request(Selector::date(date), email))
            .await
    }

    /// Fetch daily metrics for an epoch range (at most 7 days, enforced by the API)
    pub async fn daily_metrics_for_range(
        &self,
        start_epoch: i64,
        end_epoch: i64,
        email: Option<&str>,
    ) -> Result<UltrahumanData, ApiError> {
        self.daily_metrics(&build_request(
            Selector::epoch_range(start_epoch, end_epoch),
            email,
        ))
        .await
    }

    /// Fetch daily metrics from optional selector parts.
    ///
    /// Fails with [`ApiError::Parameter`] before any request unless exactly one
    /// of `date` or both epochs is given.
    pub async fn daily_metrics_from_parts(
        &self,
        date: Option<NaiveDate>,
        start_epoch: Option<i64>,
        end_epoch: Option<i64>,
        email: Option<&str>,
    ) -> Result<UltrahumanData, ApiError> {
        let selector = Selector::from_parts(date, start_epoch, end_epoch)?;
        self.daily_metrics(&build_request(selector, email)).await
    }

    /// Send `request` and decode the response
    pub async fn daily_metrics(
        &self,
        request: &DailyMetricsRequest,
    ) -> Result<UltrahumanData, ApiError> {
        let query = request.query();
        tracing::debug!(path = DAILY_METRICS_PATH, ?query, "requesting daily metrics");

        let response = self
            .transport
            .get(DAILY_METRICS_PATH, &query, &self.api_key)
            .await
            .map_err(|e| ApiError::Transport(format!("Request failed: {e}")))?;

        if !response.is_success() {
            let err = error_from_response(&response);
            tracing::warn!(status = response.status, error = %err, "daily metrics request failed");
            return Err(err);
        }

        decoder::decode(&response.body)
    }
}

fn build_request(selector: Selector, email: Option<&str>) -> DailyMetricsRequest {
    let request = DailyMetricsRequest::new(selector);
    match email {
        Some(email) => request.with_email(email),
        None => request,
    }
}

/// Map a non-2xx response to an error, extracting the most specific message.
///
/// JSON bodies: `error`, then `message`, then the status description.
/// Other bodies: the raw text, or the status description if empty.
fn error_from_response(response: &RawResponse) -> ApiError {
    let status_description = format!(
        "HTTP status {} returned by daily metrics endpoint",
        response.status
    );

    let message = match serde_json::from_slice::<Value>(&response.body) {
        Ok(Value::Object(body)) => ["error", "message"]
            .iter()
            .find_map(|field| body.get(*field).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or(status_description),
        Ok(_) => status_description,
        Err(_) => {
            let text = response.text();
            if text.is_empty() {
                status_description
            } else {
                text
            }
        }
    };

    ApiError::from_status(response.status, message)
}
