//! Tagged metric entries
//!
//! Each entry in the `metrics` map carries a `type` tag and an untyped
//! `object`. The tag selects the schema through [`MetricKind`]; a payload that
//! does not match its schema, or a tag the table doesn't know, is kept as the
//! original JSON in [`MetricPayload::Untyped`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::metric::{IndexMetric, SeriesMetric, SimpleValueMetric, StepsMetric, TrendMetric};
use super::sleep::SleepMetric;
use crate::error::ApiError;

/// The closed set of metric tags understood by the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    HeartRate,
    Temperature,
    Spo2,
    Hrv,
    NightRhr,
    Steps,
    AvgSleepHrv,
    SleepRhr,
    RecoveryIndex,
    MovementIndex,
    ActiveMinutes,
    Vo2Max,
    Sleep,
}

impl MetricKind {
    pub const ALL: [MetricKind; 13] = [
        MetricKind::HeartRate,
        MetricKind::Temperature,
        MetricKind::Spo2,
        MetricKind::Hrv,
        MetricKind::NightRhr,
        MetricKind::Steps,
        MetricKind::AvgSleepHrv,
        MetricKind::SleepRhr,
        MetricKind::RecoveryIndex,
        MetricKind::MovementIndex,
        MetricKind::ActiveMinutes,
        MetricKind::Vo2Max,
        MetricKind::Sleep,
    ];

    /// Wire tag for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::HeartRate => "hr",
            MetricKind::Temperature => "temp",
            MetricKind::Spo2 => "spo2",
            MetricKind::Hrv => "hrv",
            MetricKind::NightRhr => "night_rhr",
            MetricKind::Steps => "steps",
            MetricKind::AvgSleepHrv => "avg_sleep_hrv",
            MetricKind::SleepRhr => "sleep_rhr",
            MetricKind::RecoveryIndex => "recovery_index",
            MetricKind::MovementIndex => "movement_index",
            MetricKind::ActiveMinutes => "active_minutes",
            MetricKind::Vo2Max => "vo2_max",
            MetricKind::Sleep => "sleep",
        }
    }

    /// Look up a wire tag. Tags are case-sensitive.
    pub fn from_tag(tag: &str) -> Option<MetricKind> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }

    /// Whether the schema carries a `values` series of [`MetricValue`](super::MetricValue)
    pub fn has_series(&self) -> bool {
        matches!(
            self,
            MetricKind::HeartRate
                | MetricKind::Temperature
                | MetricKind::Spo2
                | MetricKind::Hrv
                | MetricKind::NightRhr
                | MetricKind::Steps
        )
    }

    /// Validate `object` against the schema for this kind.
    pub fn decode(&self, object: &Value) -> Result<MetricData, serde_json::Error> {
        let data = match self {
            MetricKind::HeartRate => MetricData::HeartRate(SeriesMetric::deserialize(object)?),
            MetricKind::Temperature => MetricData::Temperature(SeriesMetric::deserialize(object)?),
            MetricKind::Spo2 => MetricData::Spo2(SeriesMetric::deserialize(object)?),
            MetricKind::Hrv => MetricData::Hrv(TrendMetric::deserialize(object)?),
            MetricKind::NightRhr => MetricData::NightRhr(TrendMetric::deserialize(object)?),
            MetricKind::Steps => MetricData::Steps(StepsMetric::deserialize(object)?),
            MetricKind::AvgSleepHrv => {
                MetricData::AvgSleepHrv(SimpleValueMetric::deserialize(object)?)
            }
            MetricKind::SleepRhr => MetricData::SleepRhr(SimpleValueMetric::deserialize(object)?),
            MetricKind::RecoveryIndex => {
                MetricData::RecoveryIndex(IndexMetric::deserialize(object)?)
            }
            MetricKind::MovementIndex => {
                MetricData::MovementIndex(IndexMetric::deserialize(object)?)
            }
            MetricKind::ActiveMinutes => {
                MetricData::ActiveMinutes(IndexMetric::deserialize(object)?)
            }
            MetricKind::Vo2Max => MetricData::Vo2Max(IndexMetric::deserialize(object)?),
            MetricKind::Sleep => MetricData::Sleep(Box::new(SleepMetric::deserialize(object)?)),
        };
        Ok(data)
    }

    /// Reject negative reading timestamps before schema validation.
    ///
    /// A negative timestamp fails the whole document rather than just the entry.
    fn check_timestamps(&self, object: &Value) -> Result<(), ApiError> {
        if !self.has_series() {
            return Ok(());
        }
        let Some(values) = object.get("values").and_then(Value::as_array) else {
            return Ok(());
        };
        for (idx, reading) in values.iter().enumerate() {
            let Some(ts) = reading.get("timestamp") else {
                continue;
            };
            if ts.as_f64().is_some_and(|ts| ts < 0.0) {
                return Err(ApiError::Parse(format!(
                    "Timestamp must be non-negative: '{}' values[{}] has timestamp {}",
                    self.as_str(),
                    idx,
                    ts
                )));
            }
        }
        Ok(())
    }
}

/// Typed metric payload, one arm per tag
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricData {
    HeartRate(SeriesMetric),
    Temperature(SeriesMetric),
    Spo2(SeriesMetric),
    Hrv(TrendMetric),
    NightRhr(TrendMetric),
    Steps(StepsMetric),
    AvgSleepHrv(SimpleValueMetric),
    SleepRhr(SimpleValueMetric),
    RecoveryIndex(IndexMetric),
    MovementIndex(IndexMetric),
    ActiveMinutes(IndexMetric),
    Vo2Max(IndexMetric),
    Sleep(Box<SleepMetric>),
}

impl MetricData {
    pub fn kind(&self) -> MetricKind {
        match self {
            MetricData::HeartRate(_) => MetricKind::HeartRate,
            MetricData::Temperature(_) => MetricKind::Temperature,
            MetricData::Spo2(_) => MetricKind::Spo2,
            MetricData::Hrv(_) => MetricKind::Hrv,
            MetricData::NightRhr(_) => MetricKind::NightRhr,
            MetricData::Steps(_) => MetricKind::Steps,
            MetricData::AvgSleepHrv(_) => MetricKind::AvgSleepHrv,
            MetricData::SleepRhr(_) => MetricKind::SleepRhr,
            MetricData::RecoveryIndex(_) => MetricKind::RecoveryIndex,
            MetricData::MovementIndex(_) => MetricKind::MovementIndex,
            MetricData::ActiveMinutes(_) => MetricKind::ActiveMinutes,
            MetricData::Vo2Max(_) => MetricKind::Vo2Max,
            MetricData::Sleep(_) => MetricKind::Sleep,
        }
    }

    /// Series shape shared by `hr`, `temp` and `spo2`
    pub fn as_series(&self) -> Option<&SeriesMetric> {
        match self {
            MetricData::HeartRate(m) | MetricData::Temperature(m) | MetricData::Spo2(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_trend(&self) -> Option<&TrendMetric> {
        match self {
            MetricData::Hrv(m) | MetricData::NightRhr(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_steps(&self) -> Option<&StepsMetric> {
        match self {
            MetricData::Steps(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_simple(&self) -> Option<&SimpleValueMetric> {
        match self {
            MetricData::AvgSleepHrv(m) | MetricData::SleepRhr(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_index(&self) -> Option<&IndexMetric> {
        match self {
            MetricData::RecoveryIndex(m)
            | MetricData::MovementIndex(m)
            | MetricData::ActiveMinutes(m)
            | MetricData::Vo2Max(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sleep(&self) -> Option<&SleepMetric> {
        match self {
            MetricData::Sleep(m) => Some(m.as_ref()),
            _ => None,
        }
    }
}

/// Result of resolving an entry's `object`: typed, or the original JSON
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricPayload {
    Typed(MetricData),
    Untyped(Value),
}

impl MetricPayload {
    /// Resolve `object` against the schema for `tag`.
    ///
    /// A payload that doesn't match the schema falls back to
    /// [`MetricPayload::Untyped`]. A negative reading timestamp is an error.
    pub fn resolve(tag: &str, object: Value) -> Result<Self, ApiError> {
        let Some(kind) = MetricKind::from_tag(tag) else {
            tracing::debug!(tag, "unknown metric tag, keeping untyped payload");
            return Ok(MetricPayload::Untyped(object));
        };

        kind.check_timestamps(&object)?;

        match kind.decode(&object) {
            Ok(data) => Ok(MetricPayload::Typed(data)),
            // Decoding from a `Value` only fails on a schema mismatch
            Err(e) => {
                tracing::debug!(
                    tag,
                    error = %e,
                    "metric payload does not match schema, keeping untyped payload"
                );
                Ok(MetricPayload::Untyped(object))
            }
        }
    }

    pub fn is_typed(&self) -> bool {
        matches!(self, MetricPayload::Typed(_))
    }

    pub fn as_typed(&self) -> Option<&MetricData> {
        match self {
            MetricPayload::Typed(data) => Some(data),
            MetricPayload::Untyped(_) => None,
        }
    }

    pub fn as_untyped(&self) -> Option<&Value> {
        match self {
            MetricPayload::Typed(_) => None,
            MetricPayload::Untyped(value) => Some(value),
        }
    }
}

/// One tagged entry in the `metrics` map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricEntry {
    #[serde(rename = "type")]
    pub tag: String,
    #[serde(rename = "object")]
    pub metric_data: MetricPayload,
}

#[derive(Deserialize)]
struct RawMetricEntry {
    #[serde(rename = "type")]
    tag: String,
    object: Value,
}

impl<'de> Deserialize<'de> for MetricEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawMetricEntry::deserialize(deserializer)?;
        MetricEntry::resolve(raw.tag, raw.object).map_err(serde::de::Error::custom)
    }
}

impl MetricEntry {
    /// Build an entry from its tag and raw payload
    pub fn resolve(tag: impl Into<String>, object: Value) -> Result<Self, ApiError> {
        let tag = tag.into();
        let metric_data = MetricPayload::resolve(&tag, object)?;
        Ok(Self { tag, metric_data })
    }

    pub fn typed(data: MetricData) -> Self {
        Self {
            tag: data.kind().as_str().to_string(),
            metric_data: MetricPayload::Typed(data),
        }
    }

    /// Schema kind for the tag, if the tag is known
    pub fn kind(&self) -> Option<MetricKind> {
        MetricKind::from_tag(&self.tag)
    }

    pub fn data(&self) -> Option<&MetricData> {
        self.metric_data.as_typed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::sleep::fixtures::sleep_payload;
    use crate::types::TrendDirection;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn series_payload(title: &str, unit: &str) -> Value {
        json!({
            "day_start_timestamp": 1705276800,
            "title": title,
            "unit": unit,
            "last_reading": 72.5,
            "values": [
                {"value": 70.0, "timestamp": 1705276800},
                {"value": 72.5, "timestamp": 1705276900}
            ]
        })
    }

    fn trend_payload() -> Value {
        let mut payload = series_payload("HRV", "ms");
        let obj = payload.as_object_mut().unwrap();
        obj.insert("avg".into(), json!(44.5));
        obj.insert("subtitle".into(), json!("Heart Rate Variability"));
        obj.insert("trend_title".into(), json!("Above average"));
        obj.insert("trend_direction".into(), json!("positive"));
        payload
    }

    fn steps_payload() -> Value {
        json!({
            "day_start_timestamp": 1705276800,
            "subtitle": "Steps",
            "total": 8500.0,
            "avg": 59.0,
            "trend_title": "Above average",
            "trend_direction": "positive",
            "values": [{"value": 100, "timestamp": 1705276800}]
        })
    }

    fn well_formed(kind: MetricKind) -> Value {
        match kind {
            MetricKind::HeartRate | MetricKind::Temperature | MetricKind::Spo2 => {
                series_payload("Reading", "unit")
            }
            MetricKind::Hrv | MetricKind::NightRhr => trend_payload(),
            MetricKind::Steps => steps_payload(),
            MetricKind::AvgSleepHrv | MetricKind::SleepRhr => {
                json!({"value": 45, "day_start_timestamp": 1705276800})
            }
            MetricKind::RecoveryIndex
            | MetricKind::MovementIndex
            | MetricKind::ActiveMinutes
            | MetricKind::Vo2Max => {
                json!({"value": 85.0, "title": "Index", "day_start_timestamp": 1705276800})
            }
            MetricKind::Sleep => sleep_payload(),
        }
    }

    #[test]
    fn test_tag_table_round_trips() {
        for kind in MetricKind::ALL {
            assert_eq!(MetricKind::from_tag(kind.as_str()), Some(kind));
        }
        assert_eq!(MetricKind::from_tag("HR"), None);
        assert_eq!(MetricKind::from_tag("unknown_type"), None);
    }

    #[test]
    fn test_every_known_tag_decodes_to_its_variant() {
        for kind in MetricKind::ALL {
            let entry = MetricEntry::resolve(kind.as_str(), well_formed(kind)).unwrap();
            let data = entry.data().unwrap_or_else(|| panic!("{} fell back", kind.as_str()));
            assert_eq!(data.kind(), kind);
        }
    }

    #[test]
    fn test_every_known_tag_falls_back_on_malformed_payload() {
        for kind in MetricKind::ALL {
            let payload = json!({"some": "data"});
            let entry = MetricEntry::resolve(kind.as_str(), payload.clone()).unwrap();
            assert_eq!(entry.metric_data, MetricPayload::Untyped(payload));
        }
    }

    #[test]
    fn test_unknown_tag_keeps_payload_regardless_of_shape() {
        for payload in [
            json!({"some": "data"}),
            series_payload("Heart Rate", "bpm"),
            json!([1, 2, 3]),
            json!(null),
            json!("text"),
        ] {
            let entry = MetricEntry::resolve("unknown_type", payload.clone()).unwrap();
            assert_eq!(entry.kind(), None);
            assert_eq!(entry.metric_data.as_untyped(), Some(&payload));
        }
    }

    #[test]
    fn test_hr_entry_from_json() {
        let entry: MetricEntry = serde_json::from_value(json!({
            "type": "hr",
            "object": series_payload("Heart Rate", "bpm")
        }))
        .unwrap();

        assert_eq!(entry.tag, "hr");
        let hr = entry.data().and_then(MetricData::as_series).unwrap();
        assert_eq!(hr.title, "Heart Rate");
        assert_eq!(hr.last_reading, 72.5);
        assert_eq!(hr.values.len(), 2);
    }

    #[test]
    fn test_invalid_trend_direction_falls_back() {
        let mut payload = trend_payload();
        payload["trend_direction"] = json!("sideways");
        let entry = MetricEntry::resolve("hrv", payload.clone()).unwrap();
        assert!(!entry.metric_data.is_typed());
        assert_eq!(entry.metric_data.as_untyped(), Some(&payload));
    }

    #[test]
    fn test_trend_entry() {
        let entry = MetricEntry::resolve("night_rhr", trend_payload()).unwrap();
        let trend = entry.data().and_then(MetricData::as_trend).unwrap();
        assert_eq!(trend.avg, 44.5);
        assert_eq!(trend.trend_direction, TrendDirection::Positive);
    }

    #[test]
    fn test_negative_reading_timestamp_is_structural() {
        let mut payload = series_payload("Heart Rate", "bpm");
        payload["values"][1]["timestamp"] = json!(-5);
        let err = MetricEntry::resolve("hr", payload).unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
        assert!(err.message().contains("non-negative"));

        let result: Result<MetricEntry, _> = serde_json::from_value(json!({
            "type": "steps",
            "object": {
                "day_start_timestamp": 1705276800,
                "subtitle": "Steps",
                "total": 1.0,
                "avg": 1.0,
                "trend_title": "t",
                "trend_direction": "negative",
                "values": [{"value": 1, "timestamp": -1}]
            }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_whole_number_floats_fill_integer_fields() {
        let mut payload = sleep_payload();
        payload["sleep_efficiency"]["percentage"] = json!(92.0);
        payload["sleep_stages"][0]["stage_time"] = json!(5760.0);
        let entry = MetricEntry::resolve("sleep", payload).unwrap();
        let sleep = entry.data().and_then(MetricData::as_sleep).unwrap();
        assert_eq!(sleep.sleep_efficiency.percentage, 92);
        assert_eq!(sleep.sleep_stages[0].stage_time, 5760);

        let index = json!({"value": 85.0, "title": "Index", "day_start_timestamp": 1705276800.0});
        let entry = MetricEntry::resolve("recovery_index", index).unwrap();
        let index = entry.data().and_then(MetricData::as_index).unwrap();
        assert_eq!(index.day_start_timestamp, 1705276800);

        let mut series = series_payload("Heart Rate", "bpm");
        series["values"][0]["timestamp"] = json!(1705276800.0);
        let entry = MetricEntry::resolve("hr", series).unwrap();
        let hr = entry.data().and_then(MetricData::as_series).unwrap();
        assert_eq!(hr.values[0].timestamp(), 1705276800);
    }

    #[test]
    fn test_fractional_float_in_integer_field_falls_back() {
        let mut payload = sleep_payload();
        payload["sleep_efficiency"]["percentage"] = json!(92.5);
        let entry = MetricEntry::resolve("sleep", payload.clone()).unwrap();
        assert_eq!(entry.metric_data.as_untyped(), Some(&payload));
    }

    #[test]
    fn test_negative_float_timestamp_is_structural() {
        let mut payload = series_payload("Heart Rate", "bpm");
        payload["values"][0]["timestamp"] = json!(-1.0);
        let err = MetricEntry::resolve("spo2", payload).unwrap_err();
        assert!(err.message().contains("non-negative"));
    }

    #[test]
    fn test_negative_timestamp_under_unknown_tag_is_kept() {
        let payload = json!({"values": [{"value": 1, "timestamp": -1}]});
        let entry = MetricEntry::resolve("blood_glucose", payload.clone()).unwrap();
        assert_eq!(entry.metric_data.as_untyped(), Some(&payload));
    }

    #[test]
    fn test_null_object_falls_back() {
        let entry: MetricEntry =
            serde_json::from_value(json!({"type": "hr", "object": null})).unwrap();
        assert_eq!(entry.metric_data, MetricPayload::Untyped(Value::Null));
    }

    #[test]
    fn test_missing_object_is_rejected() {
        assert!(serde_json::from_value::<MetricEntry>(json!({"type": "hr"})).is_err());
    }

    #[test]
    fn test_serialize_restores_wire_shape() {
        let original = json!({
            "type": "recovery_index",
            "object": {"value": 85.0, "title": "Recovery Index", "day_start_timestamp": 1705276800}
        });
        let entry: MetricEntry = serde_json::from_value(original.clone()).unwrap();
        assert!(entry.metric_data.is_typed());
        assert_eq!(serde_json::to_value(&entry).unwrap(), original);

        let unknown = json!({"type": "unknown_type", "object": {"some": "data"}});
        let entry: MetricEntry = serde_json::from_value(unknown.clone()).unwrap();
        assert_eq!(serde_json::to_value(&entry).unwrap(), unknown);
    }

    #[test]
    fn test_typed_constructor_sets_tag() {
        let entry = MetricEntry::typed(MetricData::Vo2Max(IndexMetric {
            value: 48.0,
            title: "VO2 Max".to_string(),
            day_start_timestamp: 1705276800,
        }));
        assert_eq!(entry.tag, "vo2_max");
        assert_eq!(entry.kind(), Some(MetricKind::Vo2Max));
    }
}
