//! Request metrics collection and exposition.
//!
//! # Metrics
//! - `http_requests_total` (counter): requests by method, route, status code
//! - `http_request_duration_seconds` (histogram): latency distribution with
//!   the same label set
//!
//! # Design Decisions
//! - One registry owned by `GatewayMetrics`, shared via `Arc` through the
//!   request state; nothing registers into a global registry
//! - Bucket boundaries are fixed at construction
//! - `snapshot` gathers a consistent point-in-time view for the scrape
//!   endpoint; it never mutates the registry

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

/// Histogram bucket boundaries in seconds.
const DURATION_BUCKETS: [f64; 9] = [0.1, 0.3, 0.5, 0.7, 1.0, 3.0, 5.0, 7.0, 10.0];

const LABELS: [&str; 3] = ["method", "route", "code"];

/// Process-wide request metrics.
pub struct GatewayMetrics {
    registry: Registry,
    request_duration: HistogramVec,
    requests_total: IntCounterVec,
}

impl GatewayMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let request_duration = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "Duration of HTTP requests in seconds",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
            &LABELS,
        )?;

        let requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &LABELS,
        )?;

        registry.register(Box::new(request_duration.clone()))?;
        registry.register(Box::new(requests_total.clone()))?;

        Ok(Self {
            registry,
            request_duration,
            requests_total,
        })
    }

    /// Observe the duration of one completed call.
    pub fn record_duration(&self, method: &str, route: &str, code: u16, seconds: f64) {
        self.request_duration
            .with_label_values(&[method, route, &code.to_string()])
            .observe(seconds);
    }

    /// Count one completed call.
    pub fn increment_count(&self, method: &str, route: &str, code: u16) {
        self.requests_total
            .with_label_values(&[method, route, &code.to_string()])
            .inc();
    }

    /// Render the current state in Prometheus exposition format.
    pub fn snapshot(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
