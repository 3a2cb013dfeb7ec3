//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! GET /health
//!     → aggregator.rs (fan out four probes, wait for all)
//!         store probe   → SELECT 1 round-trip
//!         cache probe   → PING
//!         remote probes → GET {base}/health, 5 s timeout
//!     → report.rs (fold verdicts, fixed dependency order)
//!     → 200 when every dependency is healthy, 503 otherwise
//! ```
//!
//! # Design Decisions
//! - Probes never fail; every error becomes an unhealthy verdict
//! - A dependency with no handle reports unknown without attempting I/O
//! - Probes run concurrently and independently; one slow or dead
//!   dependency cannot delay the others beyond its own timeout
//! - Verdict order in the report is fixed regardless of completion order

pub mod aggregator;
pub mod report;

pub use aggregator::HealthAggregator;
pub use report::{DependencyVerdict, HealthReport, HealthState, OverallHealth};
