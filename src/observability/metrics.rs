//! Metrics collection and exposition.
//!
//! # Metrics
//! - `rancher_relay_info` (gauge): static info line, version label
//! - `rancher_relay_requests_total` (counter): scrapes of /metrics
//! - `rancher_relay_uptime_seconds` (gauge): recomputed at every scrape

use std::time::Instant;

use axum::{extract::State, http::header, response::IntoResponse, routing::get, Router};
use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

use crate::health::handlers::VERSION;

/// State captured by the metrics handler.
#[derive(Clone)]
pub struct MetricsState {
    handle: PrometheusHandle,
    started_at: Instant,
}

/// Install the Prometheus recorder and register the static metrics.
///
/// Must be called once per process, before any listener starts.
pub fn init() -> Result<MetricsState, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_gauge!(
        "rancher_relay_info",
        "Information about the Rancher monitoring relay"
    );
    describe_counter!(
        "rancher_relay_requests_total",
        "Total number of HTTP requests handled"
    );
    describe_gauge!(
        "rancher_relay_uptime_seconds",
        "Uptime of the service in seconds"
    );

    gauge!("rancher_relay_info", "version" => VERSION).set(1.0);

    Ok(MetricsState {
        handle,
        started_at: Instant::now(),
    })
}

/// Router exposing `GET /metrics`.
pub fn router(state: MetricsState) -> Router {
    Router::new()
        .route("/metrics", get(render))
        .with_state(state)
}

async fn render(State(state): State<MetricsState>) -> impl IntoResponse {
    counter!("rancher_relay_requests_total", "endpoint" => "/metrics").increment(1);
    gauge!("rancher_relay_uptime_seconds").set(state.started_at.elapsed().as_secs_f64());

    (
        [(header::CONTENT_TYPE, "text/plain")],
        state.handle.render(),
    )
}
