//! Read-only query interface over the climate dataset.
//!
//! The dataset is a SQLite file with two tables, `station` and
//! `measurement`, populated by an external loader. This module declares the
//! columns the service depends on, checks them at startup, and hands out one
//! pooled connection per request through [`DatasetSession`].

use crate::{
    config::DatabaseConfig,
    error::DatasetError,
    models::{DateFilter, PrecipitationReading, TemperatureStats},
};
use chrono::NaiveDate;
use sqlx::{
    Sqlite, SqlitePool,
    pool::PoolConnection,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::str::FromStr;
use tracing::{debug, info};

/// DDL for the `station` table, matching the bundled dataset
pub const STATION_DDL: &str = "CREATE TABLE IF NOT EXISTS station (
    id INTEGER PRIMARY KEY,
    station TEXT NOT NULL,
    name TEXT,
    latitude REAL,
    longitude REAL,
    elevation REAL
)";

/// DDL for the `measurement` table, matching the bundled dataset
pub const MEASUREMENT_DDL: &str = "CREATE TABLE IF NOT EXISTS measurement (
    id INTEGER PRIMARY KEY,
    station TEXT NOT NULL,
    date TEXT NOT NULL,
    prcp REAL,
    tobs REAL NOT NULL
)";

/// Columns the queries below read, per table
pub const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("station", &["station"]),
    ("measurement", &["id", "station", "date", "prcp", "tobs"]),
];

const PRECIPITATION_SINCE: &str = "SELECT m.date AS date, CAST(m.prcp AS REAL) AS prcp, m.station AS station
    FROM measurement m
    JOIN station s ON m.station = s.station
    WHERE m.date >= ?1
    ORDER BY m.id";

const DISTINCT_STATIONS: &str = "SELECT DISTINCT station FROM measurement";

const STATION_OBSERVATIONS: &str = "SELECT CAST(tobs AS REAL) FROM measurement
    WHERE date >= ?1 AND station = ?2";

const STATS_FROM: &str = "SELECT CAST(MIN(tobs) AS REAL) AS min, CAST(MAX(tobs) AS REAL) AS max, AVG(tobs) AS avg
    FROM measurement
    WHERE date >= ?1";

const STATS_BETWEEN: &str = "SELECT CAST(MIN(tobs) AS REAL) AS min, CAST(MAX(tobs) AS REAL) AS max, AVG(tobs) AS avg
    FROM measurement
    WHERE date >= ?1 AND date <= ?2";

/// Reads the core needs from the dataset
///
/// Every method is a side-effect free read. Rows come back in storage order
/// unless a method says otherwise.
#[allow(async_fn_in_trait)]
pub trait ClimateQueries {
    /// Precipitation readings on or after `since` for known stations, in load order
    async fn measurements_since(
        &mut self,
        since: NaiveDate,
    ) -> Result<Vec<PrecipitationReading>, DatasetError>;

    /// Each station identifier that has at least one measurement
    async fn distinct_stations(&mut self) -> Result<Vec<String>, DatasetError>;

    /// Temperature observations for one station on or after `since`
    async fn temperature_observations(
        &mut self,
        station: &str,
        since: NaiveDate,
    ) -> Result<Vec<f64>, DatasetError>;

    /// Min, max and mean temperature over the filtered measurements
    async fn temperature_stats(
        &mut self,
        filter: DateFilter,
    ) -> Result<TemperatureStats, DatasetError>;

    /// Earliest measurement date, `None` for an empty dataset
    async fn earliest_measurement_date(&mut self) -> Result<Option<NaiveDate>, DatasetError>;

    /// Latest measurement date, `None` for an empty dataset
    async fn latest_measurement_date(&mut self) -> Result<Option<NaiveDate>, DatasetError>;
}

/// Shared handle to the dataset connection pool
#[derive(Clone)]
pub struct ClimateDataset {
    pool: SqlitePool,
}

impl ClimateDataset {
    /// Open a read-only pool against the configured SQLite file
    ///
    /// The file must already exist; it is never created.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatasetError> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        info!(
            url = %config.url,
            max_connections = config.max_connections,
            "Climate dataset pool opened"
        );

        Ok(Self { pool })
    }

    /// Wrap an existing pool (fixtures and embedding applications)
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Check that every column the queries read is present
    pub async fn verify_schema(&self) -> Result<(), DatasetError> {
        let mut conn = self.pool.acquire().await?;

        for (table, columns) in REQUIRED_COLUMNS {
            let present: Vec<String> =
                sqlx::query_scalar("SELECT name FROM pragma_table_info(?1)")
                    .bind(*table)
                    .fetch_all(&mut *conn)
                    .await?;

            if let Some(missing) = columns
                .iter()
                .find(|column| !present.iter().any(|name| name.as_str() == **column))
            {
                return Err(DatasetError::Schema {
                    table: table.to_string(),
                    column: missing.to_string(),
                });
            }
        }

        debug!("Climate dataset schema verified");
        Ok(())
    }

    /// Acquire the connection one request uses for all of its queries
    ///
    /// The connection returns to the pool when the session is dropped.
    pub async fn session(&self) -> Result<DatasetSession, DatasetError> {
        let conn = self.pool.acquire().await?;
        debug!(
            idle = self.pool.num_idle(),
            size = self.pool.size(),
            "Dataset session acquired"
        );
        Ok(DatasetSession { conn })
    }

    /// Close the pool, waiting for checked-out sessions to return
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Climate dataset pool closed");
    }
}

/// One request's scoped hold on a pooled connection
pub struct DatasetSession {
    conn: PoolConnection<Sqlite>,
}

impl ClimateQueries for DatasetSession {
    async fn measurements_since(
        &mut self,
        since: NaiveDate,
    ) -> Result<Vec<PrecipitationReading>, DatasetError> {
        let rows = sqlx::query_as::<_, PrecipitationReading>(PRECIPITATION_SINCE)
            .bind(since)
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(rows)
    }

    async fn distinct_stations(&mut self) -> Result<Vec<String>, DatasetError> {
        let stations = sqlx::query_scalar::<_, String>(DISTINCT_STATIONS)
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(stations)
    }

    async fn temperature_observations(
        &mut self,
        station: &str,
        since: NaiveDate,
    ) -> Result<Vec<f64>, DatasetError> {
        let observations = sqlx::query_scalar::<_, f64>(STATION_OBSERVATIONS)
            .bind(since)
            .bind(station)
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(observations)
    }

    async fn temperature_stats(
        &mut self,
        filter: DateFilter,
    ) -> Result<TemperatureStats, DatasetError> {
        let query = match filter {
            DateFilter::From(start) => {
                sqlx::query_as::<_, TemperatureStats>(STATS_FROM).bind(start)
            }
            DateFilter::Between(start, end) => sqlx::query_as::<_, TemperatureStats>(STATS_BETWEEN)
                .bind(start)
                .bind(end),
        };
        Ok(query.fetch_one(&mut *self.conn).await?)
    }

    async fn earliest_measurement_date(&mut self) -> Result<Option<NaiveDate>, DatasetError> {
        let date = sqlx::query_scalar::<_, Option<NaiveDate>>("SELECT MIN(date) FROM measurement")
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(date)
    }

    async fn latest_measurement_date(&mut self) -> Result<Option<NaiveDate>, DatasetError> {
        let date = sqlx::query_scalar::<_, Option<NaiveDate>>("SELECT MAX(date) FROM measurement")
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(date)
    }
}
