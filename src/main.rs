//! Gateway process bootstrap.
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │                 API GATEWAY                   │
//!                         │                                               │
//!     Client Request      │  ┌────────┐   ┌──────────┐   ┌────────────┐  │
//!     ────────────────────┼─▶│  http  │──▶│  proxy   │──▶│  upstream  │──┼──▶ identity /
//!                         │  │ server │   │(metrics) │   │   client   │  │    media service
//!                         │  └────┬───┘   └──────────┘   └────────────┘  │
//!                         │       │                                      │
//!                         │       ▼ /health                              │
//!                         │  ┌──────────┐   store ─ cache ─ identity ─   │
//!                         │  │  health  │──▶        media (4 concurrent  │
//!                         │  │aggregator│           probes, wait-all)    │
//!                         │  └──────────┘                                │
//!                         │                                               │
//!                         │  config · observability · lifecycle           │
//!                         └──────────────────────────────────────────────┘
//! ```
//!
//! Startup order: logging → config → dependency handles → HTTP server.
//! A store or cache that cannot be reached at startup is logged and left
//! unset; the gateway still serves, reporting that dependency as unknown.

use std::sync::Arc;

use tokio::net::TcpListener;

use api_gateway::cache;
use api_gateway::config::GatewayConfig;
use api_gateway::db;
use api_gateway::health::HealthAggregator;
use api_gateway::http::{AppState, HttpServer};
use api_gateway::lifecycle::{signals, Shutdown};
use api_gateway::observability::{logging, metrics::GatewayMetrics};
use api_gateway::proxy::InstrumentedProxy;
use api_gateway::upstream::{self, ServiceClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    tracing::info!("api-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    let config = GatewayConfig::from_env()?;
    tracing::info!(
        port = config.listener.port,
        auth_service = %config.upstreams.auth_service_url,
        image_service = %config.upstreams.image_service_url,
        "Configuration loaded"
    );

    let store = match db::connect(&config.database).await {
        Ok(pool) => {
            tracing::info!("Store connection pool ready");
            Some(pool)
        }
        Err(error) => {
            tracing::error!(error = %error, "Store connection failed; health will report unknown");
            None
        }
    };

    let cache = match cache::connect(&config.cache).await {
        Ok(conn) => {
            tracing::info!("Cache connection ready");
            Some(conn)
        }
        Err(error) => {
            tracing::error!(error = %error, "Cache connection failed; health will report unknown");
            None
        }
    };

    let http_client = upstream::build_client()?;
    let metrics = Arc::new(GatewayMetrics::new()?);

    let state = AppState {
        health: Arc::new(HealthAggregator::new(
            store.clone(),
            cache.clone(),
            http_client.clone(),
            &config.upstreams,
        )),
        proxy: Arc::new(InstrumentedProxy::new(metrics.clone())),
        upstream: Arc::new(ServiceClient::new(http_client, &config.upstreams)),
        metrics,
    };

    let listener = TcpListener::bind(("0.0.0.0", config.listener.port)).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            signals::wait_for_termination().await;
            shutdown.trigger();
        });
    }

    let server = HttpServer::new(state);
    server.run(listener, shutdown.subscribe()).await?;

    if let Some(pool) = store {
        pool.close().await;
    }
    // The cache connection has no explicit close; dropping the handle tears
    // down the multiplexed connection.
    drop(cache);

    tracing::info!("Shutdown complete");
    Ok(())
}
