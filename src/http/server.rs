//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all gateway routes
//! - Wire up middleware (tracing, request ID, timeout, body limit,
//!   compression, CORS, security headers)
//! - Serve connections until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::health::HealthAggregator;
use crate::http::handlers;
use crate::http::request::MakeRequestUuid;
use crate::observability::metrics::GatewayMetrics;
use crate::proxy::InstrumentedProxy;
use crate::upstream::ServiceClient;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub health: Arc<HealthAggregator>,
    pub proxy: Arc<InstrumentedProxy>,
    pub upstream: Arc<ServiceClient>,
    pub metrics: Arc<GatewayMetrics>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(state: AppState) -> Self {
        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router with all routes and middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::index))
            .route("/health", get(handlers::health))
            .route("/metrics", get(handlers::metrics_snapshot))
            .route(
                "/api/users",
                get(handlers::list_users).post(handlers::create_user),
            )
            .route("/api/images", get(handlers::list_images))
            .route("/api/images/upload", post(handlers::upload_image))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
            .layer(CompressionLayer::new())
            .layer(CorsLayer::permissive())
            .layer(SetResponseHeaderLayer::overriding(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("DENY"),
            ))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Accept connections on the listener until the shutdown signal fires.
    /// New connections stop being accepted; in-flight requests are not
    /// explicitly drained.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, no longer accepting connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
