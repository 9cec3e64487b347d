//! Scalar, series and index metric shapes
//!
//! Every numeric `value`-like field is an `f64`; integer literals on the wire
//! are widened on deserialization.

use serde::{Deserialize, Serialize};

use super::de;
use crate::error::ApiError;
use crate::types::TrendDirection;

/// Single reading with its epoch timestamp (seconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMetricValue")]
pub struct MetricValue {
    value: f64,
    timestamp: i64,
}

#[derive(Deserialize)]
struct RawMetricValue {
    value: f64,
    #[serde(deserialize_with = "de::integral")]
    timestamp: i64,
}

impl TryFrom<RawMetricValue> for MetricValue {
    type Error = ApiError;

    fn try_from(raw: RawMetricValue) -> Result<Self, Self::Error> {
        MetricValue::new(raw.value, raw.timestamp)
    }
}

impl MetricValue {
    /// Create a reading; negative timestamps are rejected.
    pub fn new(value: f64, timestamp: i64) -> Result<Self, ApiError> {
        if timestamp < 0 {
            return Err(ApiError::Parse(format!(
                "Timestamp must be non-negative, got {timestamp}"
            )));
        }
        Ok(Self { value, timestamp })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

/// Series metric with a headline reading (`hr`, `temp`, `spo2`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesMetric {
    #[serde(deserialize_with = "de::integral")]
    pub day_start_timestamp: i64,
    pub title: String,
    pub unit: String,
    pub last_reading: f64,
    pub values: Vec<MetricValue>,
}

/// Series metric annotated with an average and trend (`hrv`, `night_rhr`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendMetric {
    #[serde(deserialize_with = "de::integral")]
    pub day_start_timestamp: i64,
    pub title: String,
    pub unit: String,
    pub last_reading: f64,
    pub values: Vec<MetricValue>,
    pub avg: f64,
    pub subtitle: String,
    pub trend_title: String,
    pub trend_direction: TrendDirection,
}

/// Step counts; unlike the other series there is no title, unit or last reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepsMetric {
    #[serde(deserialize_with = "de::integral")]
    pub day_start_timestamp: i64,
    pub values: Vec<MetricValue>,
    pub subtitle: String,
    pub total: f64,
    pub avg: f64,
    pub trend_title: String,
    pub trend_direction: TrendDirection,
}

/// Single value for the day (`avg_sleep_hrv`, `sleep_rhr`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleValueMetric {
    pub value: f64,
    #[serde(deserialize_with = "de::integral")]
    pub day_start_timestamp: i64,
}

/// Titled score (`recovery_index`, `movement_index`, `active_minutes`, `vo2_max`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexMetric {
    pub value: f64,
    pub title: String,
    #[serde(deserialize_with = "de::integral")]
    pub day_start_timestamp: i64,
}
