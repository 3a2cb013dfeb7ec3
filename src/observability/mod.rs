//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (request counters and latency histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → GET /metrics (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - The metrics registry is an owned component injected into handlers,
//!   never a process global
//! - Metric updates are atomic; no caller-side locking
//! - Request ID flows through all log events via the trace layer

pub mod logging;
pub mod metrics;
