//! Configuration structures and loading utilities.
//!
//! This module contains all configuration structures used by the application,
//! including environment variable loading and default values.

pub mod climate;
pub mod database;
pub mod metrics;
pub mod server;
pub mod telemetry;

pub use climate::*;
pub use database::*;
pub use metrics::*;
pub use server::*;
pub use telemetry::*;
