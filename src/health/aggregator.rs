//! Concurrent health aggregation across all gateway dependencies.

use std::time::Duration;

use serde::Deserialize;

use crate::cache::{self, CacheConnection};
use crate::config::UpstreamConfig;
use crate::db::{self, StorePool};
use crate::health::report::{DependencyVerdict, HealthReport, HealthState};

/// Shape of a remote dependency's own health body. Only the `status` field
/// matters; anything else in the body is ignored.
#[derive(Debug, Deserialize)]
struct RemoteHealth {
    #[serde(default)]
    status: Option<HealthState>,
}

/// Probes every dependency and folds the verdicts into one report.
///
/// Handles that could not be established at startup are `None`; their probes
/// short-circuit to unknown without attempting I/O.
pub struct HealthAggregator {
    store: Option<StorePool>,
    cache: Option<CacheConnection>,
    client: reqwest::Client,
    auth_base_url: String,
    image_base_url: String,
    probe_timeout: Duration,
}

impl HealthAggregator {
    pub fn new(
        store: Option<StorePool>,
        cache: Option<CacheConnection>,
        client: reqwest::Client,
        upstreams: &UpstreamConfig,
    ) -> Self {
        Self {
            store,
            cache,
            client,
            auth_base_url: upstreams.auth_service_url.clone(),
            image_base_url: upstreams.image_service_url.clone(),
            probe_timeout: Duration::from_secs(upstreams.health_timeout_secs),
        }
    }

    /// Run all four probes concurrently and wait for every verdict.
    ///
    /// An unhealthy dependency never cancels the other probes; each verdict
    /// is reported independently, in fixed dependency order.
    pub async fn aggregate(&self) -> HealthReport {
        let (database, redis, auth_service, image_service) = tokio::join!(
            self.probe_store(),
            self.probe_cache(),
            self.probe_remote("auth_service", &self.auth_base_url),
            self.probe_remote("image_service", &self.image_base_url),
        );

        HealthReport::assemble(database, redis, auth_service, image_service)
    }

    async fn probe_store(&self) -> DependencyVerdict {
        let state = match &self.store {
            None => HealthState::Unknown,
            Some(pool) => match db::ping(pool).await {
                Ok(()) => HealthState::Healthy,
                Err(error) => {
                    tracing::warn!(error = %error, "Store health probe failed");
                    HealthState::Unhealthy
                }
            },
        };

        DependencyVerdict {
            name: "database",
            state,
        }
    }

    async fn probe_cache(&self) -> DependencyVerdict {
        let state = match &self.cache {
            None => HealthState::Unknown,
            Some(conn) => match cache::ping(conn).await {
                Ok(()) => HealthState::Healthy,
                Err(error) => {
                    tracing::warn!(error = %error, "Cache health probe failed");
                    HealthState::Unhealthy
                }
            },
        };

        DependencyVerdict {
            name: "redis",
            state,
        }
    }

    /// Probe a remote service's own health endpoint.
    ///
    /// On a 2xx response the verdict is the body's `status` field passed
    /// through as-is; a missing or unrecognized field counts as unhealthy.
    /// Timeouts, connection errors, and non-2xx responses are unhealthy.
    async fn probe_remote(&self, name: &'static str, base_url: &str) -> DependencyVerdict {
        let url = format!("{base_url}/health");

        let state = match self
            .client
            .get(&url)
            .timeout(self.probe_timeout)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                match response.json::<RemoteHealth>().await {
                    Ok(body) => body.status.unwrap_or(HealthState::Unhealthy),
                    Err(error) => {
                        tracing::warn!(dependency = name, error = %error, "Malformed health body");
                        HealthState::Unhealthy
                    }
                }
            }
            Ok(response) => {
                tracing::warn!(
                    dependency = name,
                    status = %response.status(),
                    "Health probe returned non-success status"
                );
                HealthState::Unhealthy
            }
            Err(error) => {
                tracing::warn!(dependency = name, error = %error, "Health probe failed");
                HealthState::Unhealthy
            }
        };

        DependencyVerdict { name, state }
    }
}
