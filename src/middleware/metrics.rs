//! Metrics collection middleware.

use crate::{services::AppMetrics, utils::route::extract_route_pattern};
use actix_web::{
    Error,
    body::{BoxBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web,
};
use std::time::Instant;

/// Record request count and latency for every response
///
/// Wrap with `actix_web::middleware::from_fn(record_request_metrics)`. The
/// route label is the matched template, resolved after routing.
pub async fn record_request_metrics<B: MessageBody + 'static>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let start_time = Instant::now();
    let method = req.method().to_string();

    let res = next.call(req).await?;

    if let Some(metrics) = res.request().app_data::<web::Data<AppMetrics>>() {
        let route = extract_route_pattern(res.request());
        metrics.record_request(&method, &route, res.status().as_u16(), start_time.elapsed());
        metrics.update_uptime();
    }

    Ok(res.map_into_boxed_body())
}
