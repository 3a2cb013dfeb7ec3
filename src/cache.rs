//! Cache client.
//!
//! Wraps the connection-manager flavor of the async client: it multiplexes
//! one connection and transparently reconnects, so probes and request
//! handlers can share cheap clones of a single handle.

use redis::aio::ConnectionManager;
use redis::Client;

use crate::config::CacheConfig;

pub type CacheConnection = ConnectionManager;

/// Connect to the configured cache. Fails fast when the URL is malformed or
/// the initial connection cannot be established.
pub async fn connect(config: &CacheConfig) -> Result<CacheConnection, redis::RedisError> {
    let client = Client::open(config.url())?;
    client.get_connection_manager().await
}

/// Liveness ping used by the health surface.
pub async fn ping(conn: &CacheConnection) -> Result<(), redis::RedisError> {
    let mut conn = conn.clone();
    let _: () = redis::cmd("PING").query_async(&mut conn).await?;
    Ok(())
}
