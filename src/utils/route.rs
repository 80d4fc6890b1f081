//! Route pattern extraction utilities.

use actix_web::HttpRequest;

/// Label used for requests that matched no registered resource
pub const UNMATCHED_ROUTE: &str = "/unmatched";

/// Extract the registered route template for a request
///
/// `/api/v1.0/2016-08-23` is reported as `/api/v1.0/{start}` so metric
/// labels stay bounded. Unrouted paths collapse into [`UNMATCHED_ROUTE`].
pub fn extract_route_pattern(req: &HttpRequest) -> String {
    req.match_pattern()
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}
