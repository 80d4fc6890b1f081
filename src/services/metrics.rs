//! Metrics collection and Prometheus integration service.

use prometheus::{CounterVec, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use std::time::{Duration, Instant};

/// Route label for the metrics endpoint, which is never recorded
const METRICS_ROUTE: &str = "/api/metrics";

/// Short commit SHA baked in at build time, when built from a checkout
pub fn build_commit() -> &'static str {
    option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
}

/// Build timestamp baked in at build time
pub fn build_time() -> &'static str {
    option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown")
}

/// Application metrics collector for Prometheus integration
#[derive(Clone)]
pub struct AppMetrics {
    pub registry: Registry,
    pub http_requests_total: CounterVec,
    pub http_request_duration_seconds: HistogramVec,
    pub app_uptime_seconds: Gauge,
    pub app_info: CounterVec,
    pub date_range_rejections_total: CounterVec,
    pub dataset_failures_total: CounterVec,
    pub start_time: Instant,
}

impl AppMetrics {
    /// Create a new metrics collector with its own registry
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = CounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "status", "route"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
            ]),
            &["method", "route"],
        )?;

        let app_uptime_seconds = Gauge::new("app_uptime_seconds", "Application uptime in seconds")?;

        let app_info = CounterVec::new(
            Opts::new("app_info", "Application information"),
            &["version", "commit", "build_time"],
        )?;

        // Well-formed dates outside the dataset's coverage
        let date_range_rejections_total = CounterVec::new(
            Opts::new(
                "date_range_rejections_total",
                "Date-range requests answered with an out-of-range body",
            ),
            &["endpoint"],
        )?;

        let dataset_failures_total = CounterVec::new(
            Opts::new(
                "dataset_failures_total",
                "Requests that failed because a dataset query failed",
            ),
            &["endpoint"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(app_uptime_seconds.clone()))?;
        registry.register(Box::new(app_info.clone()))?;
        registry.register(Box::new(date_range_rejections_total.clone()))?;
        registry.register(Box::new(dataset_failures_total.clone()))?;

        app_info
            .with_label_values(&[env!("CARGO_PKG_VERSION"), build_commit(), build_time()])
            .inc();

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            app_uptime_seconds,
            app_info,
            date_range_rejections_total,
            dataset_failures_total,
            start_time: Instant::now(),
        })
    }

    /// Record an HTTP request with method, route template, status, and duration
    pub fn record_request(&self, method: &str, route: &str, status: u16, duration: Duration) {
        if route == METRICS_ROUTE {
            return;
        }

        self.http_requests_total
            .with_label_values(&[method, &status.to_string(), route])
            .inc();

        self.http_request_duration_seconds
            .with_label_values(&[method, route])
            .observe(duration.as_secs_f64());
    }

    /// Count a date-range request rejected as outside the dataset
    pub fn record_range_rejection(&self, endpoint: &str) {
        self.date_range_rejections_total
            .with_label_values(&[endpoint])
            .inc();
    }

    /// Count a request that failed on a dataset query
    pub fn record_dataset_failure(&self, endpoint: &str) {
        self.dataset_failures_total.with_label_values(&[endpoint]).inc();
    }

    /// Update the application uptime gauge
    pub fn update_uptime(&self) {
        self.app_uptime_seconds
            .set(self.start_time.elapsed().as_secs_f64());
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder.encode_to_string(&metric_families)
    }
}
