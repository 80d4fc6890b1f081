//! Shared fixtures: an in-memory SQLite dataset built from the declared schema.

#![allow(dead_code)]

use chrono::NaiveDate;
use climate_api::{ClimateDataset, MEASUREMENT_DDL, Measurement, STATION_DDL, Station};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn station(id: &str) -> Station {
    Station {
        station: id.to_string(),
        name: Some(format!("{id} station, HI US")),
        latitude: Some(21.27),
        longitude: Some(-157.82),
        elevation: Some(3.0),
    }
}

pub fn measurement(station: &str, date: &str, prcp: Option<f64>, tobs: f64) -> Measurement {
    Measurement {
        station: station.to_string(),
        date: day(date),
        prcp,
        tobs,
    }
}

/// Stations registered in the `station` table
pub fn sample_stations() -> Vec<Station> {
    vec![
        station("USC00519397"),
        station("USC00513117"),
        station("USC00519281"),
    ]
}

/// Measurements spanning 2010-01-01 to 2017-08-23, in load order
///
/// `USC00599999` reports but has no `station` row.
pub fn sample_measurements() -> Vec<Measurement> {
    vec![
        measurement("USC00519397", "2010-01-01", Some(0.08), 65.0),
        measurement("USC00513117", "2010-01-01", Some(0.28), 63.0),
        measurement("USC00519281", "2016-08-22", Some(0.40), 78.0),
        measurement("USC00519397", "2016-08-23", Some(0.00), 81.0),
        measurement("USC00519281", "2016-08-23", Some(1.79), 77.0),
        measurement("USC00513117", "2016-08-23", Some(0.15), 76.0),
        measurement("USC00599999", "2017-01-01", Some(2.00), 70.0),
        measurement("USC00519397", "2017-08-22", None, 82.0),
        measurement("USC00519281", "2017-08-23", Some(0.45), 76.0),
        measurement("USC00519397", "2017-08-23", Some(0.00), 81.0),
    ]
}

/// Single-connection in-memory pool that lives as long as the pool does
pub async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite")
}

pub async fn dataset_with(stations: &[Station], measurements: &[Measurement]) -> ClimateDataset {
    let pool = memory_pool().await;
    sqlx::query(STATION_DDL).execute(&pool).await.unwrap();
    sqlx::query(MEASUREMENT_DDL).execute(&pool).await.unwrap();

    for s in stations {
        sqlx::query(
            "INSERT INTO station (station, name, latitude, longitude, elevation) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&s.station)
        .bind(&s.name)
        .bind(s.latitude)
        .bind(s.longitude)
        .bind(s.elevation)
        .execute(&pool)
        .await
        .unwrap();
    }

    for m in measurements {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
            .bind(&m.station)
            .bind(m.date)
            .bind(m.prcp)
            .bind(m.tobs)
            .execute(&pool)
            .await
            .unwrap();
    }

    ClimateDataset::from_pool(pool)
}

pub async fn sample_dataset() -> ClimateDataset {
    dataset_with(&sample_stations(), &sample_measurements()).await
}

/// Pool with no tables at all, so every dataset query fails
pub async fn broken_dataset() -> ClimateDataset {
    ClimateDataset::from_pool(memory_pool().await)
}
