//! Query construction for the daily metrics endpoint

use chrono::NaiveDate;

use crate::error::ApiError;

/// Path of the daily metrics resource, relative to the base URL
pub const DAILY_METRICS_PATH: &str = "partner/daily_metrics";

const SELECTOR_REQUIRED: &str =
    "Either 'date' or both 'start_epoch' and 'end_epoch' must be provided";

/// Scope of a daily metrics query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// A single calendar day
    Date(NaiveDate),
    /// Epoch seconds; the API rejects ranges longer than 7 days
    EpochRange { start_epoch: i64, end_epoch: i64 },
}

impl Selector {
    pub fn date(date: NaiveDate) -> Self {
        Selector::Date(date)
    }

    pub fn epoch_range(start_epoch: i64, end_epoch: i64) -> Self {
        Selector::EpochRange {
            start_epoch,
            end_epoch,
        }
    }

    /// Build a selector from optional parts.
    ///
    /// Exactly one of `date` or the pair `start_epoch`/`end_epoch` must be set.
    pub fn from_parts(
        date: Option<NaiveDate>,
        start_epoch: Option<i64>,
        end_epoch: Option<i64>,
    ) -> Result<Self, ApiError> {
        match (date, start_epoch, end_epoch) {
            (Some(date), None, None) => Ok(Selector::Date(date)),
            (None, Some(start), Some(end)) => Ok(Selector::epoch_range(start, end)),
            _ => Err(ApiError::Parameter(SELECTOR_REQUIRED.to_string())),
        }
    }

    fn push_query(&self, query: &mut Vec<(&'static str, String)>) {
        match self {
            Selector::Date(date) => query.push(("date", date.format("%Y-%m-%d").to_string())),
            Selector::EpochRange {
                start_epoch,
                end_epoch,
            } => {
                query.push(("start_epoch", start_epoch.to_string()));
                query.push(("end_epoch", end_epoch.to_string()));
            }
        }
    }
}

/// A daily metrics query: selector plus optional user e-mail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyMetricsRequest {
    pub selector: Selector,
    pub email: Option<String>,
}

impl DailyMetricsRequest {
    pub fn new(selector: Selector) -> Self {
        Self {
            selector,
            email: None,
        }
    }

    /// Query the metrics of another user who shared data with the partner
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Query parameters in wire order
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::with_capacity(3);
        self.selector.push_query(&mut query);
        if let Some(email) = &self.email {
            query.push(("email", email.clone()));
        }
        query
    }
}

impl From<Selector> for DailyMetricsRequest {
    fn from(selector: Selector) -> Self {
        Self::new(selector)
    }
}
