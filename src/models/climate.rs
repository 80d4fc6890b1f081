//! Climate dataset rows and the payloads built from them.

use chrono::NaiveDate;
use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Error text for a start date outside the dataset bounds
pub const START_OUT_OF_RANGE: &str = "Date not within range.";

/// Error text for a start/end pair with either date outside the dataset bounds
pub const RANGE_OUT_OF_RANGE: &str = "Either start date, stop date or both not within range.";

/// One observing site, as stored in the `station` table
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub station: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

/// One daily observation at one station, as stored in the `measurement` table
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub station: String,
    pub date: NaiveDate,
    pub prcp: Option<f64>,
    pub tobs: f64,
}

/// A precipitation value tied to its day and reporting station
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PrecipitationReading {
    pub date: NaiveDate,
    pub prcp: Option<f64>,
    pub station: String,
}

/// Date-by-date precipitation, keyed in ascending date order
pub type PrecipitationByDate = BTreeMap<NaiveDate, Option<f64>>;

/// Which measurements a temperature aggregation covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    /// `date >= start`
    From(NaiveDate),
    /// `start <= date <= end`, with no ordering enforced between the two
    Between(NaiveDate, NaiveDate),
}

/// Raw min/max/mean of temperature observations; all `None` when nothing matched
#[derive(Debug, Clone, Copy, Default, PartialEq, sqlx::FromRow)]
pub struct TemperatureStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
}

/// Earliest and latest measurement dates present in the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetBounds {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

impl DatasetBounds {
    /// Inclusive containment check
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.earliest <= date && date <= self.latest
    }
}

/// Aggregation object returned by the date-range endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSummary {
    #[serde(rename = "minimum temperature")]
    pub minimum: Option<f64>,
    #[serde(rename = "maximum temperature")]
    pub maximum: Option<f64>,
    #[serde(rename = "average temperature")]
    pub average: Option<f64>,
}

impl From<TemperatureStats> for TemperatureSummary {
    fn from(stats: TemperatureStats) -> Self {
        Self {
            minimum: stats.min,
            maximum: stats.max,
            average: stats.avg,
        }
    }
}

/// Domain-level error body, served with a 200 status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeErrorBody {
    pub error: String,
}

/// Payload of the date-range endpoints: the aggregation list or the range error
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TemperatureRangeResponse {
    Summary(Vec<TemperatureSummary>),
    OutOfRange(RangeErrorBody),
}

impl TemperatureRangeResponse {
    pub fn out_of_range(message: &str) -> Self {
        TemperatureRangeResponse::OutOfRange(RangeErrorBody {
            error: message.to_string(),
        })
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self, TemperatureRangeResponse::OutOfRange(_))
    }
}

/// Path parameters for `/api/v1.0/{start}`
#[derive(Debug, Clone, Deserialize, Apiv2Schema)]
pub struct StartDatePath {
    /// First day included, formatted YYYY-MM-DD
    pub start: String,
}

/// Path parameters for `/api/v1.0/{start}/{end}`
#[derive(Debug, Clone, Deserialize, Apiv2Schema)]
pub struct DateRangePath {
    /// First day included, formatted YYYY-MM-DD
    pub start: String,
    /// Last day included, formatted YYYY-MM-DD
    pub end: String,
}
