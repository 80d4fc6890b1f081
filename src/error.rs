//! Error types for dataset access and HTTP responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

/// Failures raised by the dataset query layer
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Dataset query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("Dataset table '{table}' is missing required column '{column}'")]
    Schema { table: String, column: String },
}

/// Errors surfaced to HTTP callers
///
/// Out-of-range dates are not represented here: they are successful
/// responses carrying an `{"error": ...}` body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Climate dataset is not configured")]
    DatasetUnavailable,

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

impl ApiError {
    /// Message safe to return to callers
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Dataset(_) => "Climate dataset temporarily unavailable".to_string(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidDate { .. } => StatusCode::BAD_REQUEST,
            ApiError::DatasetUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Dataset(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(serde_json::json!({
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": self.user_message(),
        }))
    }
}
