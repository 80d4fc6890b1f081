//! Fixed query windows over the static climate dataset.
//!
//! The dataset is historical, so the windows are anchored to its last
//! recorded day rather than to the wall clock.

use chrono::{Days, NaiveDate};
use std::env;

/// Most active station in the bundled dataset
pub const MOST_ACTIVE_STATION: &str = "USC00519281";

/// Anchors for the precipitation and temperature-observation endpoints
#[derive(Clone, Debug, PartialEq)]
pub struct ClimateConfig {
    /// Last recorded day of the dataset
    pub reference_date: NaiveDate,
    /// Length of the trailing precipitation window in days
    pub precipitation_window_days: u64,
    /// Station whose observations `/api/v1.0/tobs` returns
    pub active_station: String,
    /// First day included in `/api/v1.0/tobs`
    pub observations_since: NaiveDate,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            reference_date: ymd(2017, 8, 23),
            precipitation_window_days: 365,
            active_station: MOST_ACTIVE_STATION.to_string(),
            observations_since: ymd(2016, 8, 23),
        }
    }
}

impl ClimateConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let reference_date = env::var("CLIMATE_REFERENCE_DATE")
            .ok()
            .and_then(|v| NaiveDate::parse_from_str(&v, "%Y-%m-%d").ok())
            .unwrap_or(defaults.reference_date);

        let precipitation_window_days = env::var("CLIMATE_WINDOW_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.precipitation_window_days);

        let active_station = env::var("CLIMATE_ACTIVE_STATION")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.active_station);

        let observations_since = env::var("CLIMATE_TOBS_SINCE")
            .ok()
            .and_then(|v| NaiveDate::parse_from_str(&v, "%Y-%m-%d").ok())
            .unwrap_or(defaults.observations_since);

        Self {
            reference_date,
            precipitation_window_days,
            active_station,
            observations_since,
        }
    }

    /// First day of the trailing precipitation window
    pub fn precipitation_since(&self) -> NaiveDate {
        self.reference_date
            .checked_sub_days(Days::new(self.precipitation_window_days))
            .unwrap_or(NaiveDate::MIN)
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}
