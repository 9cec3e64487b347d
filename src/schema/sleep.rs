//! Sleep session schema (`sleep` tag)
//!
//! The sleep object is the largest payload the API returns: bedtime bounds,
//! quick-metric tiles, a stage breakdown, three graphs and a set of named
//! sub-metrics. Optional fields are the ones the API omits on some nights.

use serde::{Deserialize, Serialize};

use super::de;
use crate::types::{MovementIntensity, SleepStageKind};

/// Analytics key/value pair attached to a quick metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingParam {
    pub key_name: String,
    pub value: String,
}

/// Untiled quick metric summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickMetric {
    pub title: String,
    pub display_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deeplink: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education_modal_deeplink: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_params: Option<Vec<TrackingParam>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_text_marked_up: Option<String>,
}

/// Tiled quick metric summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickMetricTiled {
    pub title: String,
    pub value: String,
    pub tag: String,
    pub tag_color: String,
    pub deeplink: String,
    pub trends_unit: String,
    pub trends_value: f64,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Share of the night spent in one stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepStage {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: SleepStageKind,
    #[serde(deserialize_with = "de::integral")]
    pub percentage: i64,
    pub stage_time_text: String,
    /// Seconds spent in the stage
    #[serde(deserialize_with = "de::integral")]
    pub stage_time: i64,
}

/// Interval in the hypnogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepGraphEntry {
    #[serde(deserialize_with = "de::integral")]
    pub start: i64,
    #[serde(deserialize_with = "de::integral")]
    pub end: i64,
    #[serde(rename = "type")]
    pub kind: SleepStageKind,
    #[serde(
        default,
        deserialize_with = "de::integral_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub toss_turn: Option<i64>,
}

impl SleepGraphEntry {
    pub fn duration_secs(&self) -> i64 {
        self.end.saturating_sub(self.start)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepGraph {
    pub title: String,
    pub data: Vec<SleepGraphEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education_modal_deeplink: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementGraphEntry {
    #[serde(deserialize_with = "de::integral")]
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub kind: MovementIntensity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementGraph {
    pub title: String,
    pub data: Vec<MovementGraphEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HrGraphEntry {
    pub value: f64,
    #[serde(deserialize_with = "de::integral")]
    pub timestamp: i64,
}

/// Annotation drawn on the heart rate graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkPoint {
    pub mark_type: String,
    pub mark_color: String,
    #[serde(deserialize_with = "de::integral")]
    pub mark_point: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HrGraph {
    pub title: String,
    pub data: Vec<HrGraphEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<Vec<MarkPoint>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepScore {
    #[serde(deserialize_with = "de::integral")]
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalSleep {
    #[serde(deserialize_with = "de::integral")]
    pub minutes: i64,
    #[serde(deserialize_with = "de::integral")]
    pub hours: i64,
    #[serde(deserialize_with = "de::integral")]
    pub remaining_minutes: i64,
    #[serde(deserialize_with = "de::integral")]
    pub seconds: i64,
    pub badge: Badge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepEfficiency {
    #[serde(deserialize_with = "de::integral")]
    pub percentage: i64,
    #[serde(deserialize_with = "de::integral")]
    pub contributor: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeInBed {
    #[serde(deserialize_with = "de::integral")]
    pub minutes: i64,
    #[serde(deserialize_with = "de::integral")]
    pub hours: i64,
    #[serde(deserialize_with = "de::integral")]
    pub remaining_minutes: i64,
    pub badge: Badge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemSleep {
    #[serde(deserialize_with = "de::integral")]
    pub minutes: i64,
    #[serde(deserialize_with = "de::integral")]
    pub seconds: i64,
    pub percentage: f64,
    #[serde(deserialize_with = "de::integral")]
    pub hours: i64,
    #[serde(deserialize_with = "de::integral")]
    pub remaining_minutes: i64,
    pub contributor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeepSleep {
    #[serde(deserialize_with = "de::integral")]
    pub minutes: i64,
    #[serde(deserialize_with = "de::integral")]
    pub seconds: i64,
    #[serde(deserialize_with = "de::integral")]
    pub hours: i64,
    #[serde(deserialize_with = "de::integral")]
    pub remaining_minutes: i64,
    pub contributor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightSleep {
    #[serde(deserialize_with = "de::integral")]
    pub minutes: i64,
    #[serde(deserialize_with = "de::integral")]
    pub seconds: i64,
    #[serde(deserialize_with = "de::integral")]
    pub percentage: i64,
    #[serde(deserialize_with = "de::integral")]
    pub hours: i64,
    #[serde(deserialize_with = "de::integral")]
    pub remaining_minutes: i64,
}

/// Skin temperature deviation from the user's baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureDeviation {
    pub celsius: f64,
    #[serde(deserialize_with = "de::integral")]
    pub contributor: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SleepHrDrop {
    #[serde(
        default,
        deserialize_with = "de::integral_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestorativeSleep {
    #[serde(deserialize_with = "de::integral")]
    pub percentage: i64,
    pub badge: Badge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movements {
    #[serde(deserialize_with = "de::integral")]
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MorningAlertness {
    #[serde(deserialize_with = "de::integral")]
    pub minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullSleepCycles {
    #[serde(deserialize_with = "de::integral")]
    pub cycles: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TossesAndTurns {
    #[serde(deserialize_with = "de::integral")]
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AverageBodyTemperature {
    pub celsius: f64,
    #[serde(deserialize_with = "de::integral")]
    pub contributor: i64,
}

/// Complete sleep session record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepMetric {
    #[serde(deserialize_with = "de::integral")]
    pub bedtime_start: i64,
    #[serde(deserialize_with = "de::integral")]
    pub bedtime_end: i64,
    pub quick_metrics: Vec<QuickMetric>,
    pub quick_metrics_tiled: Vec<QuickMetricTiled>,
    pub sleep_stages: Vec<SleepStage>,
    pub sleep_graph: SleepGraph,
    pub movement_graph: MovementGraph,
    pub hr_graph: HrGraph,
    pub sleep_score: SleepScore,
    pub total_sleep: TotalSleep,
    pub sleep_efficiency: SleepEfficiency,
    pub time_in_bed: TimeInBed,
    pub rem_sleep: RemSleep,
    pub deep_sleep: DeepSleep,
    pub light_sleep: LightSleep,
    pub temperature_deviation: TemperatureDeviation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hr_drop: Option<SleepHrDrop>,
    pub restorative_sleep: RestorativeSleep,
    pub movements: Movements,
    pub morning_alertness: MorningAlertness,
    pub full_sleep_cycles: FullSleepCycles,
    pub tosses_and_turns: TossesAndTurns,
    pub average_body_temperature: AverageBodyTemperature,
}

impl SleepMetric {
    /// Time between going to bed and getting up, in seconds
    pub fn bedtime_duration_secs(&self) -> i64 {
        self.bedtime_end.saturating_sub(self.bedtime_start)
    }

    /// Stage breakdown entry for `kind`, if reported
    pub fn stage(&self, kind: SleepStageKind) -> Option<&SleepStage> {
        self.sleep_stages.iter().find(|s| s.kind == kind)
    }
}
