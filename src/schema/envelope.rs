//! Response envelope for `/partner/daily_metrics`

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::de;
use super::entry::{MetricData, MetricEntry};
use crate::error::ApiError;

/// Payload of a successful response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UltrahumanData {
    /// Entries keyed by date (`YYYY-MM-DD`) or range key
    pub metrics: HashMap<String, Vec<MetricEntry>>,
    pub latest_time_zone: String,
}

impl UltrahumanData {
    /// Entries recorded under `key`, empty if the key is absent
    pub fn entries(&self, key: &str) -> &[MetricEntry] {
        self.metrics.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Typed payloads under `key`; untyped entries are skipped
    pub fn typed(&self, key: &str) -> impl Iterator<Item = &MetricData> {
        self.entries(key).iter().filter_map(MetricEntry::data)
    }

    /// Sorted metric keys
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.metrics.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of entries that fell back to the untyped payload
    pub fn untyped_count(&self) -> usize {
        self.metrics
            .values()
            .flatten()
            .filter(|entry| !entry.metric_data.is_typed())
            .count()
    }
}

/// Outer response document: status, optional error and data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawResponse")]
pub struct UltrahumanResponse {
    pub status: u16,
    #[serde(default)]
    pub error: Option<String>,
    pub data: UltrahumanData,
}

#[derive(Deserialize)]
struct RawResponse {
    #[serde(deserialize_with = "de::integral")]
    status: i64,
    #[serde(default)]
    error: Option<String>,
    data: UltrahumanData,
}

impl TryFrom<RawResponse> for UltrahumanResponse {
    type Error = String;

    fn try_from(raw: RawResponse) -> Result<Self, Self::Error> {
        if !(100..=599).contains(&raw.status) {
            return Err(format!(
                "Status must be a valid HTTP status code, got {}",
                raw.status
            ));
        }
        Ok(Self {
            status: raw.status as u16,
            error: raw.error,
            data: raw.data,
        })
    }
}

impl UltrahumanResponse {
    /// Parse a JSON string into a validated envelope
    pub fn from_json(json: &str) -> Result<Self, ApiError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| ApiError::Parse(format!("Invalid JSON string: {e}")))?;
        Self::from_value(value)
    }

    /// Validate an already-parsed JSON document
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        serde_json::from_value(value)
            .map_err(|e| ApiError::Parse(format!("Failed to parse UltrahumanResponse: {e}")))
    }

    /// The error reported inside the body, if any.
    ///
    /// An empty `error` string counts as no error.
    pub fn reported_error(&self) -> Option<ApiError> {
        self.error
            .as_deref()
            .filter(|message| !message.is_empty())
            .map(|message| ApiError::from_status(self.status, message))
    }

    /// Consume the envelope, raising the body-reported error if present
    pub fn into_data(self) -> Result<UltrahumanData, ApiError> {
        match self.reported_error() {
            Some(err) => Err(err),
            None => Ok(self.data),
        }
    }
}
