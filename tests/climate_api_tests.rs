//! Climate endpoint integration tests against an in-memory dataset.

mod common;

use actix_web::{App, http::StatusCode, test};
use climate_api::{AppMetrics, ClimateDataset, create_base_app, handlers::ROUTE_LISTING};
use common::{broken_dataset, dataset_with, measurement, sample_dataset, sample_stations};
use paperclip::actix::{OpenApiExt, web};
use serde_json::{Value, json};

async fn get(dataset: ClimateDataset, uri: &str) -> (StatusCode, Value) {
    let metrics = AppMetrics::new().expect("Failed to create metrics");
    let app = test::init_service(create_base_app(dataset, metrics)).await;

    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;

    let json = serde_json::from_slice(&body)
        .unwrap_or_else(|e| panic!("{uri}: body is not JSON ({e}): {body:?}"));
    (status, json)
}

fn assert_close(actual: &Value, expected: f64) {
    let actual = actual.as_f64().expect("numeric value");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[actix_web::test]
async fn test_index_lists_routes() {
    let app = test::init_service(create_base_app(
        sample_dataset().await,
        AppMetrics::new().unwrap(),
    ))
    .await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let body_str = std::str::from_utf8(&body).unwrap();
    assert_eq!(body_str, ROUTE_LISTING);
    assert!(body_str.contains("/api/v1.0/<start>/<end>"));
}

#[actix_web::test]
async fn test_precipitation_one_value_per_date() {
    let (status, json) = get(sample_dataset().await, "/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    // 2016-08-22 falls before the window; USC00599999 has no station row.
    // Three stations report on 2016-08-23 and the last one loaded wins.
    assert_eq!(
        json,
        json!({
            "2016-08-23": 0.15,
            "2017-08-22": null,
            "2017-08-23": 0.0
        })
    );
}

#[actix_web::test]
async fn test_precipitation_on_dataset_not_covering_window() {
    let dataset = dataset_with(
        &sample_stations(),
        &[measurement("USC00519397", "2012-05-01", Some(0.3), 70.0)],
    )
    .await;

    let (status, json) = get(dataset, "/api/v1.0/precipitation").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({}));
}

#[actix_web::test]
async fn test_stations_are_distinct() {
    let (status, json) = get(sample_dataset().await, "/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::OK);
    let mut stations: Vec<String> = serde_json::from_value(json).unwrap();
    assert_eq!(stations.len(), 4);

    stations.sort();
    stations.dedup();
    assert_eq!(
        stations,
        vec!["USC00513117", "USC00519281", "USC00519397", "USC00599999"]
    );
}

#[actix_web::test]
async fn test_tobs_returns_most_active_station_year() {
    let (status, json) = get(sample_dataset().await, "/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!([77.0, 76.0]));
}

#[actix_web::test]
async fn test_start_date_within_range() {
    let (status, json) = get(sample_dataset().await, "/api/v1.0/2016-08-23").await;

    assert_eq!(status, StatusCode::OK);
    let summaries = json.as_array().expect("summary list");
    assert_eq!(summaries.len(), 1);

    let summary = &summaries[0];
    assert_eq!(summary["minimum temperature"], json!(70.0));
    assert_eq!(summary["maximum temperature"], json!(82.0));
    assert_close(&summary["average temperature"], 543.0 / 7.0);
}

#[actix_web::test]
async fn test_start_date_at_bounds_is_accepted() {
    for uri in ["/api/v1.0/2010-01-01", "/api/v1.0/2017-08-23"] {
        let (status, json) = get(sample_dataset().await, uri).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json.is_array(), "{uri} should return a summary list");
    }
}

#[actix_web::test]
async fn test_start_date_out_of_range_is_200_error_body() {
    for uri in ["/api/v1.0/2018-01-01", "/api/v1.0/2009-12-31"] {
        let (status, json) = get(sample_dataset().await, uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"error": "Date not within range."}));
    }
}

#[actix_web::test]
async fn test_malformed_start_date_is_bad_request() {
    for uri in ["/api/v1.0/2016-13-45", "/api/v1.0/last-year", "/api/v1.0/08-23-2016"] {
        let (status, json) = get(sample_dataset().await, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json["error"], "Bad Request");
        assert!(json["message"].as_str().unwrap().contains("expected YYYY-MM-DD"));
    }
}

#[actix_web::test]
async fn test_single_day_range_with_one_reading() {
    let (status, json) = get(sample_dataset().await, "/api/v1.0/2017-08-22/2017-08-22").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!([{
            "minimum temperature": 82.0,
            "maximum temperature": 82.0,
            "average temperature": 82.0
        }])
    );
}

#[actix_web::test]
async fn test_range_end_before_start_yields_nulls() {
    let (status, json) = get(sample_dataset().await, "/api/v1.0/2016-08-23/2016-08-01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!([{
            "minimum temperature": null,
            "maximum temperature": null,
            "average temperature": null
        }])
    );
}

#[actix_web::test]
async fn test_range_out_of_bounds_is_200_error_body() {
    for uri in [
        "/api/v1.0/2009-01-01/2016-08-23",
        "/api/v1.0/2016-08-23/2018-01-01",
        "/api/v1.0/2009-01-01/2018-01-01",
    ] {
        let (status, json) = get(sample_dataset().await, uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({"error": "Either start date, stop date or both not within range."})
        );
    }
}

#[actix_web::test]
async fn test_malformed_end_date_is_bad_request() {
    let (status, json) = get(sample_dataset().await, "/api/v1.0/2016-08-23/soon").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["message"].as_str().unwrap().contains("'soon'"));
}

#[actix_web::test]
async fn test_empty_dataset_rejects_ranges() {
    let dataset = dataset_with(&sample_stations(), &[]).await;
    let (status, json) = get(dataset, "/api/v1.0/2016-08-23").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"error": "Date not within range."}));
}

#[actix_web::test]
async fn test_repeated_requests_are_byte_identical() {
    let app = test::init_service(create_base_app(
        sample_dataset().await,
        AppMetrics::new().unwrap(),
    ))
    .await;

    for uri in [
        "/api/v1.0/precipitation",
        "/api/v1.0/stations",
        "/api/v1.0/tobs",
        "/api/v1.0/2016-08-23",
        "/api/v1.0/2016-08-01/2017-01-01",
    ] {
        let first = test::call_and_read_body(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let second = test::call_and_read_body(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(first, second, "{uri} should be deterministic");
    }
}

#[actix_web::test]
async fn test_dataset_failure_is_server_error() {
    let metrics = AppMetrics::new().unwrap();
    let app = test::init_service(create_base_app(broken_dataset().await, metrics.clone())).await;

    let req = test::TestRequest::get().uri("/api/v1.0/stations").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = test::read_body(resp).await;
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["message"], "Climate dataset temporarily unavailable");
    // The SQL error stays in the logs
    assert!(!std::str::from_utf8(&body).unwrap().contains("no such table"));

    let rendered = metrics.render().unwrap();
    assert!(rendered.contains(r#"dataset_failures_total{endpoint="stations"} 1"#));
}

#[actix_web::test]
async fn test_range_rejections_are_counted() {
    let metrics = AppMetrics::new().unwrap();
    let app = test::init_service(create_base_app(sample_dataset().await, metrics.clone())).await;

    let req = test::TestRequest::get().uri("/api/v1.0/2018-01-01").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let rendered = metrics.render().unwrap();
    assert!(rendered.contains(r#"date_range_rejections_total{endpoint="temperature_from"} 1"#));
    assert!(rendered.contains(r#"route="/api/v1.0/{start}""#));
}

#[actix_web::test]
async fn test_handlers_without_dataset_are_unavailable() {
    let app = test::init_service(
        App::new()
            .wrap_api()
            .service(web::resource("/api/v1.0/stations").route(web::get().to(climate_api::stations)))
            .build(),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1.0/stations").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}
