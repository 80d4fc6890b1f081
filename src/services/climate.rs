//! Date-bounded queries and reductions behind the `/api/v1.0` endpoints.

use crate::{
    config::ClimateConfig,
    error::DatasetError,
    models::{
        DateFilter, DatasetBounds, PrecipitationByDate, PrecipitationReading, RANGE_OUT_OF_RANGE,
        START_OUT_OF_RANGE, TemperatureRangeResponse, TemperatureSummary,
    },
    services::dataset::ClimateQueries,
};
use chrono::NaiveDate;
use tracing::debug;

/// Collapse readings into one value per date
///
/// When several stations report on the same day the last reading in input
/// order wins. Missing precipitation stays `None`.
pub fn precipitation_by_date<I>(readings: I) -> PrecipitationByDate
where
    I: IntoIterator<Item = PrecipitationReading>,
{
    let mut by_date = PrecipitationByDate::new();
    for reading in readings {
        by_date.insert(reading.date, reading.prcp);
    }
    by_date
}

/// Earliest and latest measurement dates, `None` when the dataset is empty
pub async fn dataset_bounds<Q: ClimateQueries>(
    queries: &mut Q,
) -> Result<Option<DatasetBounds>, DatasetError> {
    let earliest = queries.earliest_measurement_date().await?;
    let latest = queries.latest_measurement_date().await?;

    Ok(earliest
        .zip(latest)
        .map(|(earliest, latest)| DatasetBounds { earliest, latest }))
}

/// Query handlers for the climate endpoints
///
/// Holds only the fixed windows; every call reads fresh from the session it
/// is given.
#[derive(Clone, Debug, Default)]
pub struct ClimateService {
    config: ClimateConfig,
}

impl ClimateService {
    pub fn new(config: ClimateConfig) -> Self {
        Self { config }
    }

    /// Precipitation per date over the trailing window ending at the reference date
    pub async fn precipitation<Q: ClimateQueries>(
        &self,
        queries: &mut Q,
    ) -> Result<PrecipitationByDate, DatasetError> {
        let since = self.config.precipitation_since();
        let readings = queries.measurements_since(since).await?;
        debug!(since = %since, rows = readings.len(), "Precipitation readings fetched");

        Ok(precipitation_by_date(readings))
    }

    /// Station identifiers in dataset order
    pub async fn stations<Q: ClimateQueries>(
        &self,
        queries: &mut Q,
    ) -> Result<Vec<String>, DatasetError> {
        queries.distinct_stations().await
    }

    /// The most active station's temperature observations over the last year
    pub async fn most_active_station_temperatures<Q: ClimateQueries>(
        &self,
        queries: &mut Q,
    ) -> Result<Vec<f64>, DatasetError> {
        queries
            .temperature_observations(&self.config.active_station, self.config.observations_since)
            .await
    }

    /// Temperature summary for every measurement on or after `start`
    pub async fn temperatures_from<Q: ClimateQueries>(
        &self,
        queries: &mut Q,
        start: NaiveDate,
    ) -> Result<TemperatureRangeResponse, DatasetError> {
        let stats = queries.temperature_stats(DateFilter::From(start)).await?;
        let bounds = dataset_bounds(queries).await?;

        match bounds {
            Some(bounds) if bounds.contains(start) => Ok(TemperatureRangeResponse::Summary(
                vec![TemperatureSummary::from(stats)],
            )),
            _ => {
                debug!(start = %start, ?bounds, "Start date outside dataset bounds");
                Ok(TemperatureRangeResponse::out_of_range(START_OUT_OF_RANGE))
            }
        }
    }

    /// Temperature summary for measurements between `start` and `end` inclusive
    ///
    /// Both dates must fall inside the dataset. `end` before `start` is
    /// accepted and yields an empty aggregation.
    pub async fn temperatures_between<Q: ClimateQueries>(
        &self,
        queries: &mut Q,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<TemperatureRangeResponse, DatasetError> {
        let stats = queries
            .temperature_stats(DateFilter::Between(start, end))
            .await?;
        let bounds = dataset_bounds(queries).await?;

        match bounds {
            Some(bounds) if bounds.contains(start) && bounds.contains(end) => Ok(
                TemperatureRangeResponse::Summary(vec![TemperatureSummary::from(stats)]),
            ),
            _ => {
                debug!(start = %start, end = %end, ?bounds, "Date range outside dataset bounds");
                Ok(TemperatureRangeResponse::out_of_range(RANGE_OUT_OF_RANGE))
            }
        }
    }
}
