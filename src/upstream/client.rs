//! HTTP client for the identity and media services.

use std::time::Duration;

use axum::body::Bytes;
use axum::http::header;

use crate::config::UpstreamConfig;

/// Failure of one downstream call. The detail is logged at the proxy
/// boundary and never forwarded to the inbound caller.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Build the shared HTTP client used for proxy calls and health probes.
///
/// No client-level request timeout: proxy calls are bounded by the server's
/// request timeout layer, probes carry their own per-request timeout.
pub fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .tcp_keepalive(Duration::from_secs(30))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
}

/// Client for the two downstream services the gateway fronts.
pub struct ServiceClient {
    client: reqwest::Client,
    auth_base_url: String,
    image_base_url: String,
}

impl ServiceClient {
    pub fn new(client: reqwest::Client, upstreams: &UpstreamConfig) -> Self {
        Self {
            client,
            auth_base_url: upstreams.auth_service_url.clone(),
            image_base_url: upstreams.image_service_url.clone(),
        }
    }

    /// `GET {identity}/users`
    pub async fn fetch_users(&self) -> Result<Bytes, UpstreamError> {
        self.get(&self.auth_base_url, "/users").await
    }

    /// `POST {identity}/users`
    pub async fn create_user(&self, body: Bytes) -> Result<Bytes, UpstreamError> {
        self.post(&self.auth_base_url, "/users", body).await
    }

    /// `GET {media}/images`
    pub async fn fetch_images(&self) -> Result<Bytes, UpstreamError> {
        self.get(&self.image_base_url, "/images").await
    }

    /// `POST {media}/upload`
    pub async fn upload_image(&self, body: Bytes) -> Result<Bytes, UpstreamError> {
        self.post(&self.image_base_url, "/upload", body).await
    }

    async fn get(&self, base_url: &str, path: &str) -> Result<Bytes, UpstreamError> {
        let url = format!("{base_url}{path}");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport {
                url: url.clone(),
                source,
            })?;

        Self::read_success_body(url, response).await
    }

    async fn post(&self, base_url: &str, path: &str, body: Bytes) -> Result<Bytes, UpstreamError> {
        let url = format!("{base_url}{path}");
        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport {
                url: url.clone(),
                source,
            })?;

        Self::read_success_body(url, response).await
    }

    async fn read_success_body(
        url: String,
        response: reqwest::Response,
    ) -> Result<Bytes, UpstreamError> {
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status { url, status });
        }

        response
            .bytes()
            .await
            .map_err(|source| UpstreamError::Body { url, source })
    }
}
