//! Data models and schemas for the climate API.
//!
//! This module contains the dataset row shapes and the request/response
//! models served by the HTTP handlers.

pub mod api;
pub mod climate;

pub use api::*;
pub use climate::*;
