//! Business logic and service layer modules.
//!
//! This module contains the dataset query interface, the climate query
//! handlers built on it, and metrics collection.

pub mod climate;
pub mod dataset;
pub mod metrics;

pub use climate::*;
pub use dataset::*;
pub use metrics::*;
