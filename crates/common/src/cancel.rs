//! Cooperative cancellation for background work.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A shared flag polled by long-running enumerations at loop boundaries.
///
/// Cancellation is cooperative: the holder of a clone calls [`cancel`],
/// the worker observes it on its next iteration and returns `Cancelled`
/// without mutating any state.
///
/// [`cancel`]: CancelFlag::cancel
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
