//! Health check endpoint handler.

use crate::{models::HealthResponse, services::ClimateDataset};
use actix_web::{HttpRequest, HttpResponse, web};
use paperclip::actix::api_v2_operation;

/// Health check endpoint
///
/// Reports healthy only when a dataset session can be acquired, so probes
/// catch a missing or locked dataset file.
#[api_v2_operation(
    summary = "Health Check Endpoint",
    description = "Returns the current health status of the API and whether the climate dataset is reachable.",
    tags("Health"),
    responses(
        (status = 200, description = "Service and dataset healthy", body = HealthResponse),
        (status = 503, description = "Dataset unreachable", body = HealthResponse)
    )
)]
pub async fn health(req: HttpRequest) -> HttpResponse {
    let reachable = match req.app_data::<web::Data<ClimateDataset>>() {
        Some(dataset) => match dataset.session().await {
            Ok(_session) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Health check could not reach dataset");
                false
            }
        },
        None => false,
    };

    if reachable {
        HttpResponse::Ok().json(HealthResponse {
            status: "healthy".to_string(),
            dataset: "reachable".to_string(),
        })
    } else {
        HttpResponse::ServiceUnavailable().json(HealthResponse {
            status: "unhealthy".to_string(),
            dataset: "unreachable".to_string(),
        })
    }
}
