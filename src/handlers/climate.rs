//! Climate data endpoint handlers.
//!
//! Each handler opens one dataset session, runs its queries through
//! [`ClimateService`] and drops the session before the response is built.

use crate::{
    error::{ApiError, DatasetError},
    middleware::current_request_id,
    models::{DateRangePath, StartDatePath, TemperatureRangeResponse},
    services::{AppMetrics, ClimateDataset, ClimateService, DatasetSession},
    utils::parse_iso_date,
};
use actix_web::{Error, HttpRequest, HttpResponse, Result, web};
use paperclip::actix::api_v2_operation;
use tracing::{error, info, warn};

/// Body of `GET /`, kept byte-for-byte for existing clients
pub const ROUTE_LISTING: &str = "Available Routes:<br/>\
/api/v1.0/precipitation<br/>\
/api/v1.0/stations<br>\
/api/v1.0/tobs<br>\
/api/v1.0/<start><br>\
/api/v1.0/<start>/<end><br>";

/// Route listing
#[api_v2_operation(
    summary = "Available Routes",
    description = "Lists the climate API route templates.",
    tags("Climate"),
    responses(
        (status = 200, description = "Route listing", content_type = "text/html")
    )
)]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(ROUTE_LISTING)
}

/// Precipitation over the last year of data
///
/// One value per date. When several stations report on the same day the
/// reading loaded last is returned.
#[api_v2_operation(
    summary = "Daily Precipitation",
    description = "Returns a JSON object mapping each date in the final year of the dataset to its precipitation reading (null when not recorded).",
    tags("Climate"),
    responses(
        (status = 200, description = "Date to precipitation mapping"),
        (status = 500, description = "Internal Server Error - Dataset query failed")
    )
)]
pub async fn precipitation(req: HttpRequest) -> Result<HttpResponse, Error> {
    let service = climate_service(&req);
    let mut session = open_session(&req, "precipitation").await?;

    let by_date = service
        .precipitation(&mut session)
        .await
        .map_err(|e| dataset_failure(&req, "precipitation", e))?;
    drop(session);

    Ok(HttpResponse::Ok().json(by_date))
}

/// Distinct observing stations
#[api_v2_operation(
    summary = "Stations",
    description = "Returns a JSON array of every station identifier with at least one measurement.",
    tags("Climate"),
    responses(
        (status = 200, description = "Station identifiers"),
        (status = 500, description = "Internal Server Error - Dataset query failed")
    )
)]
pub async fn stations(req: HttpRequest) -> Result<HttpResponse, Error> {
    let service = climate_service(&req);
    let mut session = open_session(&req, "stations").await?;

    let station_ids = service
        .stations(&mut session)
        .await
        .map_err(|e| dataset_failure(&req, "stations", e))?;
    drop(session);

    Ok(HttpResponse::Ok().json(station_ids))
}

/// Temperature observations of the most active station
#[api_v2_operation(
    summary = "Temperature Observations",
    description = "Returns a JSON array of the most active station's temperature observations for the final year of the dataset.",
    tags("Climate"),
    responses(
        (status = 200, description = "Temperature readings"),
        (status = 500, description = "Internal Server Error - Dataset query failed")
    )
)]
pub async fn tobs(req: HttpRequest) -> Result<HttpResponse, Error> {
    let service = climate_service(&req);
    let mut session = open_session(&req, "tobs").await?;

    let observations = service
        .most_active_station_temperatures(&mut session)
        .await
        .map_err(|e| dataset_failure(&req, "tobs", e))?;
    drop(session);

    Ok(HttpResponse::Ok().json(observations))
}

/// Temperature summary from a start date onward
///
/// A start date outside the dataset yields `{"error": "Date not within range."}`
/// with a 200 status. A malformed date is a 400.
#[api_v2_operation(
    summary = "Temperature Summary From Start Date",
    description = "Returns minimum, maximum and average temperature for all dates on or after the start date (YYYY-MM-DD). Dates outside the dataset return an error object with status 200.",
    tags("Climate"),
    responses(
        (status = 200, description = "Summary list or out-of-range error object"),
        (status = 400, description = "Bad Request - Date is not YYYY-MM-DD"),
        (status = 500, description = "Internal Server Error - Dataset query failed")
    )
)]
pub async fn temperature_from(
    req: HttpRequest,
    path: web::Path<StartDatePath>,
) -> Result<HttpResponse, Error> {
    let start = parse_path_date(&path.start)?;

    let service = climate_service(&req);
    let mut session = open_session(&req, "temperature_from").await?;

    let response = service
        .temperatures_from(&mut session, start)
        .await
        .map_err(|e| dataset_failure(&req, "temperature_from", e))?;
    drop(session);

    Ok(range_response(&req, "temperature_from", response))
}

/// Temperature summary between two dates, inclusive
///
/// Either date outside the dataset yields the range error object with a 200
/// status. An end before the start is not rejected.
#[api_v2_operation(
    summary = "Temperature Summary For Date Range",
    description = "Returns minimum, maximum and average temperature for dates between start and end inclusive (YYYY-MM-DD). Dates outside the dataset return an error object with status 200.",
    tags("Climate"),
    responses(
        (status = 200, description = "Summary list or out-of-range error object"),
        (status = 400, description = "Bad Request - Date is not YYYY-MM-DD"),
        (status = 500, description = "Internal Server Error - Dataset query failed")
    )
)]
pub async fn temperature_range(
    req: HttpRequest,
    path: web::Path<DateRangePath>,
) -> Result<HttpResponse, Error> {
    let start = parse_path_date(&path.start)?;
    let end = parse_path_date(&path.end)?;

    let service = climate_service(&req);
    let mut session = open_session(&req, "temperature_range").await?;

    let response = service
        .temperatures_between(&mut session, start, end)
        .await
        .map_err(|e| dataset_failure(&req, "temperature_range", e))?;
    drop(session);

    Ok(range_response(&req, "temperature_range", response))
}

fn climate_service(req: &HttpRequest) -> ClimateService {
    req.app_data::<web::Data<ClimateService>>()
        .map(|service| service.get_ref().clone())
        .unwrap_or_default()
}

async fn open_session(req: &HttpRequest, endpoint: &str) -> Result<DatasetSession, ApiError> {
    let dataset = req
        .app_data::<web::Data<ClimateDataset>>()
        .ok_or(ApiError::DatasetUnavailable)?;

    dataset
        .session()
        .await
        .map_err(|e| dataset_failure(req, endpoint, e))
}

fn parse_path_date(value: &str) -> Result<chrono::NaiveDate, ApiError> {
    parse_iso_date(value).inspect_err(|_| warn!(value = %value, "Rejected malformed date"))
}

fn dataset_failure(req: &HttpRequest, endpoint: &str, err: DatasetError) -> ApiError {
    error!(
        endpoint = endpoint,
        request_id = ?current_request_id(req),
        error = %err,
        "Dataset query failed"
    );
    if let Some(metrics) = req.app_data::<web::Data<AppMetrics>>() {
        metrics.record_dataset_failure(endpoint);
    }
    ApiError::Dataset(err)
}

fn range_response(
    req: &HttpRequest,
    endpoint: &str,
    response: TemperatureRangeResponse,
) -> HttpResponse {
    if response.is_out_of_range() {
        info!(
            endpoint = endpoint,
            request_id = ?current_request_id(req),
            path = %req.path(),
            "Date outside dataset range"
        );
        if let Some(metrics) = req.app_data::<web::Data<AppMetrics>>() {
            metrics.record_range_rejection(endpoint);
        }
    }
    HttpResponse::Ok().json(response)
}
