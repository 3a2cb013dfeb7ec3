//! API gateway library.
//!
//! Fronts the identity and media services plus the relational store and the
//! cache behind one HTTP surface, with aggregated health and per-request
//! metrics.

pub mod cache;
pub mod config;
pub mod db;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod upstream;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
