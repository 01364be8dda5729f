//! Cursor motion smoothing.
//!
//! A per-axis critically-damped spring chases the raw sample stream in
//! continuous time, sampled at whatever cadence the playback clock
//! ticks. The result is independent of frame rate and seek history:
//! the same `(reset, [(target, dt)...])` sequence always produces the
//! same positions.

use recut_project_model::project::SpringConfig;

use crate::event_index::CursorSample;

/// Longest timestep the integrator will absorb in one step. Tab-hiding
/// stalls hand us multi-second deltas; integrating those would fling
/// the cursor past its target.
pub const MAX_STEP_SECS: f64 = 0.1;

/// One smoothed output sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothedPoint {
    pub x: f64,
    pub y: f64,
    pub raw_x: f64,
    pub raw_y: f64,
    pub cursor_id: String,
}

/// Spring-damper integrator tracking the raw cursor.
#[derive(Debug, Clone)]
pub struct CursorSmoother {
    spring: SpringConfig,
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    cursor_id: String,
}

impl CursorSmoother {
    pub fn new(spring: SpringConfig) -> Self {
        Self {
            spring,
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            cursor_id: String::new(),
        }
    }

    /// Snap to a position and kill all velocity.
    pub fn reset(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
        self.vx = 0.0;
        self.vy = 0.0;
    }

    /// Snap to a raw sample, adopting its cursor image.
    pub fn reset_to(&mut self, sample: &CursorSample) {
        self.reset(sample.x, sample.y);
        self.cursor_id = sample.cursor_id.clone();
    }

    /// Current smoothed position.
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Advance toward `target` by `dt_secs` of continuous time.
    ///
    /// A cursor-image change snaps instead of smoothing: chasing across
    /// the transition would render the new image sliding in from the
    /// old image's position. `dt = 0` leaves position and velocity
    /// untouched and just reports the current state.
    pub fn step(&mut self, target: &CursorSample, dt_secs: f64) -> SmoothedPoint {
        if target.cursor_id != self.cursor_id {
            self.reset_to(target);
        } else {
            let dt = dt_secs.clamp(0.0, MAX_STEP_SECS);
            if dt > 0.0 {
                let SpringConfig {
                    stiffness: k,
                    damping: c,
                    mass: m,
                } = self.spring;

                // Semi-implicit Euler, per axis
                let ax = (k * (target.x - self.x) - c * self.vx) / m;
                self.vx += ax * dt;
                self.x += self.vx * dt;

                let ay = (k * (target.y - self.y) - c * self.vy) / m;
                self.vy += ay * dt;
                self.y += self.vy * dt;
            }
        }

        SmoothedPoint {
            x: self.x,
            y: self.y,
            raw_x: target.x,
            raw_y: target.y,
            cursor_id: self.cursor_id.clone(),
        }
    }
}

impl Default for CursorSmoother {
    fn default() -> Self {
        Self::new(SpringConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(x: f64, y: f64) -> CursorSample {
        CursorSample {
            x,
            y,
            cursor_id: "arrow".to_string(),
        }
    }

    #[test]
    fn test_converges_to_constant_target() {
        let mut smoother = CursorSmoother::default();
        smoother.reset_to(&sample(0.0, 0.0));

        // 2 seconds of 16 ms ticks toward a fixed target
        let target = sample(1_000.0, 0.0);
        for _ in 0..125 {
            smoother.step(&target, 0.016);
        }

        let (x, y) = smoother.position();
        assert!((x - 1_000.0).abs() < 0.5, "x = {x}");
        assert!(y.abs() < 0.5, "y = {y}");
    }

    #[test]
    fn test_overshoot_stays_small() {
        let mut smoother = CursorSmoother::default();
        smoother.reset_to(&sample(0.0, 0.0));

        let target = sample(1_000.0, 0.0);
        let mut max_x: f64 = 0.0;
        for _ in 0..250 {
            let out = smoother.step(&target, 0.016);
            max_x = max_x.max(out.x);
        }
        assert!(max_x < 1_050.0, "overshoot to {max_x}");
    }

    #[test]
    fn test_deterministic_replay() {
        let run = || {
            let mut smoother = CursorSmoother::default();
            smoother.reset_to(&sample(3.0, 7.0));
            let mut outputs = Vec::new();
            for i in 0..100u32 {
                let t = sample(f64::from(i) * 9.5, f64::from(i % 7) * 3.0);
                outputs.push(smoother.step(&t, 0.016));
            }
            outputs
        };

        let a = run();
        let b = run();
        for (pa, pb) in a.iter().zip(&b) {
            assert_eq!(pa.x.to_bits(), pb.x.to_bits());
            assert_eq!(pa.y.to_bits(), pb.y.to_bits());
        }
    }

    #[test]
    fn test_cursor_change_snaps_without_intermediate_output() {
        let mut smoother = CursorSmoother::default();
        smoother.reset_to(&sample(0.0, 0.0));

        // Build up velocity toward a distant target
        let target = sample(1_000.0, 0.0);
        for _ in 0..6 {
            smoother.step(&target, 0.016);
        }
        let mid = smoother.position().0;
        assert!(mid > 0.0 && mid < 1_000.0);

        let changed = CursorSample {
            x: 1_000.0,
            y: 0.0,
            cursor_id: "pointer".to_string(),
        };
        let out = smoother.step(&changed, 0.016);
        assert_eq!(out.x, 1_000.0);
        assert_eq!(out.y, 0.0);
        assert_eq!(out.cursor_id, "pointer");

        // Velocity was zeroed: the next step barely moves
        let next = smoother.step(&changed, 0.016);
        assert_eq!(next.x, 1_000.0);
    }

    #[test]
    fn test_zero_dt_is_a_position_report() {
        let mut smoother = CursorSmoother::default();
        smoother.reset_to(&sample(10.0, 20.0));
        smoother.step(&sample(500.0, 500.0), 0.016);
        let (x, y) = smoother.position();

        let out = smoother.step(&sample(500.0, 500.0), 0.0);
        assert_eq!(out.x, x);
        assert_eq!(out.y, y);
        assert_eq!(smoother.position(), (x, y));
    }

    #[test]
    fn test_large_dt_clamps() {
        let mut a = CursorSmoother::default();
        let mut b = CursorSmoother::default();
        a.reset_to(&sample(0.0, 0.0));
        b.reset_to(&sample(0.0, 0.0));

        let target = sample(100.0, 100.0);
        let oa = a.step(&target, 5.0);
        let ob = b.step(&target, MAX_STEP_SECS);
        assert_eq!(oa.x.to_bits(), ob.x.to_bits());
        assert_eq!(oa.y.to_bits(), ob.y.to_bits());
    }

    #[test]
    fn test_output_carries_raw_position() {
        let mut smoother = CursorSmoother::default();
        smoother.reset_to(&sample(0.0, 0.0));
        let out = smoother.step(&sample(640.0, 360.0), 0.016);
        assert_eq!(out.raw_x, 640.0);
        assert_eq!(out.raw_y, 360.0);
        assert!(out.x < 640.0);
    }
}
