//! Utility functions and helper modules.
//!
//! This module contains request inspection helpers used by middleware and
//! the date parsing shared by the range handlers.

pub mod dates;
pub mod http;
pub mod route;

pub use dates::*;
pub use http::*;
pub use route::*;
