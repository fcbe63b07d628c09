//! Prometheus metrics for calls to the Consulta API.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::consulta::Endpoint;

// === Metric Name Constants ===

/// Outbound API calls counter metric name.
pub const METRIC_API_REQUESTS: &str = "consulta_api_requests_total";
/// Outbound API call latency metric name.
pub const METRIC_API_LATENCY: &str = "consulta_api_latency_ms";

/// How an outbound call ended, used as the `outcome` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum CallOutcome {
    /// The API answered with the endpoint's success status.
    Success,
    /// The API answered with any other status.
    Rejected,
    /// No response was received.
    TransportError,
    /// The response body could not be decoded.
    DecodeError,
}

/// Initialize all metric descriptions.
/// Call this once at startup, after installing the recorder.
pub fn init_metrics() {
    describe_counter!(
        METRIC_API_REQUESTS,
        "Total number of Consulta API calls by endpoint and outcome"
    );
    describe_histogram!(
        METRIC_API_LATENCY,
        "Consulta API call latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder and return the handle that renders it.
pub fn install_prometheus() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Record one outbound call and its latency.
pub fn record_api_call(endpoint: Endpoint, outcome: CallOutcome, start: Instant) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    let endpoint: &'static str = endpoint.into();
    let outcome: &'static str = outcome.into();

    counter!(METRIC_API_REQUESTS, "endpoint" => endpoint, "outcome" => outcome).increment(1);
    histogram!(METRIC_API_LATENCY, "endpoint" => endpoint).record(latency_ms);
}
