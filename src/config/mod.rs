//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment
//!     → schema.rs (typed sections, per-field defaults)
//!     → GatewayConfig::from_env (read, parse, validate)
//!     → shared with all subsystems at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - Every field has a default so an empty environment still boots
//! - Malformed numeric values fall back to the default rather than abort
//! - Upstream base URLs are validated eagerly; a bad URL is a startup error

pub mod schema;

pub use schema::CacheConfig;
pub use schema::ConfigError;
pub use schema::DatabaseConfig;
pub use schema::GatewayConfig;
pub use schema::ListenerConfig;
pub use schema::UpstreamConfig;
