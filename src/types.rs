//! Closed enumerations shared by the metric schemas
//!
//! Values outside these sets fail validation of the object that carries them,
//! which sends the enclosing metric entry down the untyped fallback path.

use serde::{Deserialize, Serialize};

/// Direction of a metric's trend relative to the user's average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Positive,
    Negative,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Positive => "positive",
            TrendDirection::Negative => "negative",
        }
    }
}

/// Sleep stage classification as reported by the ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepStageKind {
    DeepSleep,
    LightSleep,
    RemSleep,
    Awake,
}

impl SleepStageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SleepStageKind::DeepSleep => "deep_sleep",
            SleepStageKind::LightSleep => "light_sleep",
            SleepStageKind::RemSleep => "rem_sleep",
            SleepStageKind::Awake => "awake",
        }
    }
}

/// Intensity of a movement event in the sleep movement graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementIntensity {
    Light,
    Medium,
    Vigorous,
}

impl MovementIntensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementIntensity::Light => "light",
            MovementIntensity::Medium => "medium",
            MovementIntensity::Vigorous => "vigorous",
        }
    }
}
