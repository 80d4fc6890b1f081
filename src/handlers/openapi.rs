//! OpenAPI specification generation and app factory.

use crate::{
    config::{ClimateConfig, MetricsConfig},
    handlers::{
        get_metrics, health, index, precipitation, stations, temperature_from, temperature_range,
        tobs, version,
    },
    middleware::{RequestIdMiddleware, record_request_metrics},
    services::{AppMetrics, ClimateDataset, ClimateService},
};
use actix_web::{App, middleware::from_fn};
use paperclip::actix::{OpenApiExt, web};
use paperclip::v2::models::{DefaultApiRaw, Info};

/// Creates the shared OpenAPI specification for the API
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "Climate API".into(),
            version: "1.0.0".into(),
            description: Some(
                "Read-only access to historical precipitation and temperature observations.\n\n\
                ## Date parameters\n\
                Path dates use `YYYY-MM-DD`. A malformed date is answered with `400 Bad Request`.\n\
                \n\
                ## Out-of-range dates\n\
                Well-formed dates outside the dataset's first and last measurement dates are \
                answered with status `200` and an error object instead of the summary list:\n\
                ```json\n\
                {\"error\": \"Date not within range.\"}\n\
                ```\n\
                Clients tell the two outcomes apart by the payload shape."
                    .into(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Creates the application with every route, middleware and shared state
///
/// Window anchors and the metrics toggle are read from the environment;
/// the dataset and metrics registry are shared across workers by the caller.
pub fn create_base_app(
    dataset: ClimateDataset,
    metrics: AppMetrics,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let climate_service = ClimateService::new(ClimateConfig::from_env());
    let metrics_config = MetricsConfig::from_env();

    App::new()
        .wrap(RequestIdMiddleware)
        .wrap(from_fn(record_request_metrics))
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(web::Data::new(dataset))
        .app_data(web::Data::new(climate_service))
        .app_data(web::Data::new(metrics_config))
        .app_data(web::Data::new(metrics))
        .service(web::resource("/").route(web::get().to(index)))
        // Fixed segments first: `{start}` would otherwise capture them
        .service(web::resource("/api/v1.0/precipitation").route(web::get().to(precipitation)))
        .service(web::resource("/api/v1.0/stations").route(web::get().to(stations)))
        .service(web::resource("/api/v1.0/tobs").route(web::get().to(tobs)))
        .service(web::resource("/api/v1.0/{start}").route(web::get().to(temperature_from)))
        .service(web::resource("/api/v1.0/{start}/{end}").route(web::get().to(temperature_range)))
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/version").route(web::get().to(version)))
        .service(web::resource("/api/metrics").route(web::get().to(get_metrics)))
        .with_json_spec_at("/api/spec/v2")
        .build()
}
