//! Custom middleware implementations for the API.
//!
//! Request IDs are a `Transform` middleware; metrics recording is a
//! `from_fn` middleware.

pub mod metrics;
pub mod request_id;

pub use metrics::*;
pub use request_id::*;
