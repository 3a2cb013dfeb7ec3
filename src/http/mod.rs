//! HTTP surface of the gateway.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID generation)
//!     → handlers.rs
//!         /            → static service descriptor
//!         /health      → health aggregator
//!         /metrics     → metrics snapshot
//!         /api/*       → instrumented proxy → downstream service
//! ```

pub mod handlers;
pub mod request;
pub mod server;

pub use request::MakeRequestUuid;
pub use server::{AppState, HttpServer};
