//! Route handlers.
//!
//! Proxy handlers stay thin: each names its route, the status a successful
//! downstream call maps to, and the fixed message for the failure payload;
//! everything else happens in the instrumented proxy.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::http::server::AppState;

/// `GET /`: static service descriptor.
pub async fn index() -> Json<serde_json::Value> {
    Json(json!({
        "message": "API Gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "metrics": "/metrics",
            "users": "/api/users",
            "images": "/api/images"
        }
    }))
}

/// `GET /health`: aggregate dependency health.
pub async fn health(State(state): State<AppState>) -> Response {
    let report = state.health.aggregate().await;
    (report.status.status_code(), Json(report)).into_response()
}

/// `GET /metrics`: Prometheus exposition text.
pub async fn metrics_snapshot(State(state): State<AppState>) -> Response {
    match state.metrics.snapshot() {
        Ok(text) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(error) => {
            tracing::error!(error = %error, "Failed to render metrics snapshot");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `GET /api/users`: proxy to the identity service.
pub async fn list_users(State(state): State<AppState>) -> Response {
    state
        .proxy
        .forward(
            Method::GET,
            "/api/users",
            StatusCode::OK,
            "Failed to fetch users",
            state.upstream.fetch_users(),
        )
        .await
}

/// `POST /api/users`: proxy the request body to the identity service.
pub async fn create_user(State(state): State<AppState>, body: Bytes) -> Response {
    state
        .proxy
        .forward(
            Method::POST,
            "/api/users",
            StatusCode::CREATED,
            "Failed to create user",
            state.upstream.create_user(body),
        )
        .await
}

/// `GET /api/images`: proxy to the media service.
pub async fn list_images(State(state): State<AppState>) -> Response {
    state
        .proxy
        .forward(
            Method::GET,
            "/api/images",
            StatusCode::OK,
            "Failed to fetch images",
            state.upstream.fetch_images(),
        )
        .await
}

/// `POST /api/images/upload`: proxy the request body to the media service.
pub async fn upload_image(State(state): State<AppState>, body: Bytes) -> Response {
    state
        .proxy
        .forward(
            Method::POST,
            "/api/images/upload",
            StatusCode::CREATED,
            "Failed to upload image",
            state.upstream.upload_image(body),
        )
        .await
}
