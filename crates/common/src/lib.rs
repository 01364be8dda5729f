//! Recut Common Utilities
//!
//! Shared infrastructure for all recut crates:
//! - Error types and result aliases
//! - Clock and drift utilities for playback synchronization
//! - Cooperative cancellation for background work
//! - Tracing/logging initialization
//! - Configuration loading

pub mod cancel;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use cancel::*;
pub use clock::*;
pub use config::*;
pub use error::*;
