//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger graceful shutdown
//!
//! Shutdown (shutdown.rs):
//!     Signal received → stop accepting → close store pool → exit
//! ```
//!
//! # Design Decisions
//! - Shutdown is a broadcast: the server and any background task observe
//!   the same trigger
//! - Dependency handles are closed after the listener stops accepting

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
