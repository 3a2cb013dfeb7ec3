//! Instrumented request forwarding.
//!
//! # Data Flow
//! ```text
//! handler
//!     → forward(method, route, success status, downstream call)
//!         start timer → await call → stop timer
//!         → record one duration sample + one count, success or not
//!     → relay body with the route's success status, or a generic 500
//! ```
//!
//! # Design Decisions
//! - Exactly one metric sample per call; success and failure are the two
//!   arms of one match, so no path can skip recording
//! - Failure detail goes to the log; the caller only sees a fixed message
//! - No retries; a single downstream failure surfaces as 500 immediately

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::observability::metrics::GatewayMetrics;
use crate::upstream::UpstreamError;

/// Forwards downstream calls and records duration/outcome metrics for every
/// completed call.
pub struct InstrumentedProxy {
    metrics: Arc<GatewayMetrics>,
}

impl InstrumentedProxy {
    pub fn new(metrics: Arc<GatewayMetrics>) -> Self {
        Self { metrics }
    }

    /// Perform one downstream call and relay the outcome.
    ///
    /// On success the body is relayed unchanged with `success_status`. On any
    /// failure the caller receives `{"error": failure_message}` with 500 and
    /// the sample is labeled 500.
    pub async fn forward<F>(
        &self,
        method: Method,
        route: &str,
        success_status: StatusCode,
        failure_message: &'static str,
        call: F,
    ) -> Response
    where
        F: Future<Output = Result<Bytes, UpstreamError>>,
    {
        let start = Instant::now();
        let outcome = call.await;
        let elapsed = start.elapsed().as_secs_f64();

        match outcome {
            Ok(body) => {
                self.record(&method, route, success_status.as_u16(), elapsed);
                (
                    success_status,
                    [(header::CONTENT_TYPE, "application/json")],
                    body,
                )
                    .into_response()
            }
            Err(error) => {
                self.record(&method, route, StatusCode::INTERNAL_SERVER_ERROR.as_u16(), elapsed);
                tracing::error!(route = %route, error = %error, "Downstream call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": failure_message })),
                )
                    .into_response()
            }
        }
    }

    fn record(&self, method: &Method, route: &str, code: u16, seconds: f64) {
        self.metrics.record_duration(method.as_str(), route, code, seconds);
        self.metrics.increment_count(method.as_str(), route, code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proxy_with_metrics() -> (InstrumentedProxy, Arc<GatewayMetrics>) {
        let metrics = Arc::new(GatewayMetrics::new().unwrap());
        (InstrumentedProxy::new(metrics.clone()), metrics)
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn success_relays_body_and_records_one_sample() {
        let (proxy, metrics) = proxy_with_metrics();

        let response = proxy
            .forward(
                Method::GET,
                "/api/users",
                StatusCode::OK,
                "Failed to fetch users",
                async { Ok(Bytes::from_static(b"[{\"id\":1}]")) },
            )
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "[{\"id\":1}]");

        let snapshot = metrics.snapshot().unwrap();
        assert!(snapshot.contains("code=\"200\""));
        assert!(snapshot.contains("route=\"/api/users\""));
        assert!(!snapshot.contains("code=\"500\""));
    }

    #[tokio::test]
    async fn failure_hides_detail_and_records_one_sample() {
        let (proxy, metrics) = proxy_with_metrics();

        let response = proxy
            .forward(
                Method::POST,
                "/api/images/upload",
                StatusCode::CREATED,
                "Failed to upload image",
                async {
                    Err(UpstreamError::Status {
                        url: "http://image-service:5000/upload".to_string(),
                        status: reqwest::StatusCode::BAD_GATEWAY,
                    })
                },
            )
            .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_text(response).await,
            "{\"error\":\"Failed to upload image\"}"
        );

        let snapshot = metrics.snapshot().unwrap();
        assert!(snapshot.contains("code=\"500\""));
        assert!(snapshot.contains("route=\"/api/images/upload\""));
        // The success code must not have been recorded for the failed call.
        assert!(!snapshot.contains("code=\"201\""));
    }
}
