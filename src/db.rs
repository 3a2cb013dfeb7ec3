//! Relational store connection pool.
//!
//! The pool is constructed once at startup and shared process-wide. A failed
//! construction is not fatal to the gateway: callers keep a `None` handle and
//! the health surface reports the store as unknown.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

use crate::config::DatabaseConfig;

pub type StorePool = Pool<Postgres>;

/// Open a connection pool against the configured store.
pub async fn connect(config: &DatabaseConfig) -> Result<StorePool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url())
        .await?;

    Ok(pool)
}

/// Trivial round-trip used by the health surface.
pub async fn ping(pool: &StorePool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
