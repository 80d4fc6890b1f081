//! Calendar date parsing for path parameters.

use crate::error::ApiError;
use chrono::NaiveDate;

/// Accepted path date format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` path segment into a calendar date
///
/// Anything else, including impossible dates such as `2017-02-30`, is an
/// [`ApiError::InvalidDate`]; nothing is coerced.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| ApiError::InvalidDate {
        value: value.to_string(),
    })
}
