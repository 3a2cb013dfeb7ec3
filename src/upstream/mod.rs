//! Downstream service communication subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → client.rs (build target URL, forward method + body)
//!     → identity or media service
//!     → success body, or typed UpstreamError
//! ```
//!
//! # Design Decisions
//! - One pooled HTTP client shared by proxy calls and health probes
//! - Non-2xx downstream responses are errors, not passthrough statuses
//! - No retries; a single failure surfaces immediately

pub mod client;

pub use client::{build_client, ServiceClient, UpstreamError};
