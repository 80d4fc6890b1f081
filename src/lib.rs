//! Climate API - read-only HTTP access to historical climate observations
//!
//! Serves daily precipitation, station listings, temperature observations
//! and min/max/average temperature summaries over caller-supplied date
//! ranges, backed by a static SQLite dataset of stations and measurements.
//!
//! ## Architecture
//!
//! - `models/` - Dataset row shapes and response payloads
//! - `services/` - Dataset query interface, climate query logic, metrics
//! - `handlers/` - HTTP request handlers and the app factory
//! - `middleware/` - Request IDs and request metrics
//! - `utils/` - Date parsing and request inspection helpers
//! - `config/` - Configuration structures and environment loading
//! - `telemetry` - Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```no_run
//! use climate_api::{create_base_app, AppMetrics, ClimateDataset, DatabaseConfig};
//! use actix_web::HttpServer;
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let dataset = ClimateDataset::connect(&DatabaseConfig::from_env())
//!         .await
//!         .expect("dataset");
//!     let metrics = AppMetrics::new().expect("metrics");
//!     HttpServer::new(move || create_base_app(dataset.clone(), metrics.clone()))
//!         .bind("127.0.0.1:8080")?
//!         .run()
//!         .await
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod utils;

pub use config::{ClimateConfig, DatabaseConfig, MetricsConfig, ServerConfig, TelemetryConfig};
pub use error::{ApiError, DatasetError};
pub use handlers::{
    create_base_app, create_openapi_spec, get_metrics, health, index, precipitation, stations,
    temperature_from, temperature_range, tobs, version,
};
pub use middleware::{RequestIdMiddleware, record_request_metrics};
pub use models::{
    DateFilter, DatasetBounds, HealthResponse, Measurement, PrecipitationByDate,
    PrecipitationReading, Station, TemperatureRangeResponse, TemperatureStats,
    TemperatureSummary, VersionResponse,
};
pub use services::{
    AppMetrics, ClimateDataset, ClimateQueries, ClimateService, DatasetSession,
    MEASUREMENT_DDL, STATION_DDL,
};
pub use telemetry::init_tracing;
