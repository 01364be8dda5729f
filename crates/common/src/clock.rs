//! Clock and timing utilities for playback synchronization.
//!
//! All timeline positions are integer milliseconds. The only place
//! fractional seconds appear is inside the cursor spring integrator,
//! which receives wall-clock deltas measured by [`WallTicker`].

use std::time::{Duration, Instant};

/// Measures real elapsed time between animation ticks.
///
/// The playback resolver advances its cursor spring by the wall-clock
/// delta since the previous tick, so smoothing stays frame-rate
/// independent regardless of how often the host loop fires.
#[derive(Debug)]
pub struct WallTicker {
    last: Instant,
}

impl WallTicker {
    /// Create a ticker anchored to now.
    pub fn start() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Elapsed time since the previous call (or construction).
    pub fn delta(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now.duration_since(self.last);
        self.last = now;
        dt
    }
}

impl Default for WallTicker {
    fn default() -> Self {
        Self::start()
    }
}

/// Drift measurement between the video clock and a follower audio track.
#[derive(Debug, Clone, Copy)]
pub struct DriftMeasurement {
    /// Position the follower should be at (ms).
    pub target_ms: u64,
    /// Position the follower reported (ms).
    pub actual_ms: u64,
}

impl DriftMeasurement {
    /// Drift in milliseconds (positive = follower is ahead).
    pub fn drift_ms(&self) -> i64 {
        self.actual_ms as i64 - self.target_ms as i64
    }

    /// Whether drift exceeds an acceptable threshold.
    pub fn exceeds_threshold_ms(&self, threshold_ms: u64) -> bool {
        self.drift_ms().unsigned_abs() > threshold_ms
    }
}
