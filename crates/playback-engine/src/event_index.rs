//! Immutable, sorted indices over recorded input events.
//!
//! Built once per loaded recording and queried by SOURCE time; the
//! resolver maps output time to source time before asking. All queries
//! are binary searches over the sorted streams.

use recut_common::{RecutError, RecutResult};
use recut_project_model::bundle::RecordingBundle;
use recut_project_model::event::{is_monotonic, ClickPhase, MouseButton, MouseClick, MouseMove};

/// A raw cursor position at a query time, with the active cursor image.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorSample {
    pub x: f64,
    pub y: f64,
    pub cursor_id: String,
}

/// A recent down-click annotated with its age, for click highlights.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickHighlight {
    pub x: f64,
    pub y: f64,
    pub button: MouseButton,
    pub age_ms: u64,
}

/// Sorted move and click streams with time-based lookup.
#[derive(Debug, Clone, Default)]
pub struct InputEventIndex {
    moves: Vec<MouseMove>,
    clicks: Vec<MouseClick>,
}

impl InputEventIndex {
    /// Build an index from raw streams, validating monotonicity.
    pub fn build(moves: Vec<MouseMove>, clicks: Vec<MouseClick>) -> RecutResult<Self> {
        if !is_monotonic(&moves) {
            return Err(RecutError::bundle_invalid("move stream is not sorted"));
        }
        if !is_monotonic(&clicks) {
            return Err(RecutError::bundle_invalid("click stream is not sorted"));
        }
        Ok(Self { moves, clicks })
    }

    /// Build from an already-validated recording bundle.
    ///
    /// Pure CPU over a snapshot value; callers may run it on a
    /// background thread while the UI stays responsive.
    pub fn from_bundle(bundle: &RecordingBundle) -> Self {
        Self {
            moves: bundle.mouse_moves.clone(),
            clicks: bundle.mouse_clicks.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// The latest move sample at or before `t`, `None` before the first.
    pub fn sample_at(&self, t: u64) -> Option<&MouseMove> {
        let idx = self.moves.partition_point(|m| m.process_time_ms <= t);
        if idx == 0 {
            None
        } else {
            Some(&self.moves[idx - 1])
        }
    }

    /// Position at `t`, linearly interpolated between the surrounding
    /// samples. The cursor image is never interpolated — it comes from
    /// the sample on the left.
    pub fn interpolated_at(&self, t: u64) -> Option<CursorSample> {
        let idx = self.moves.partition_point(|m| m.process_time_ms <= t);
        if idx == 0 {
            return None;
        }
        let a = &self.moves[idx - 1];

        if idx < self.moves.len() {
            let b = &self.moves[idx];
            let span = b.process_time_ms - a.process_time_ms;
            if span > 0 {
                let f = (t - a.process_time_ms) as f64 / span as f64;
                return Some(CursorSample {
                    x: a.x + (b.x - a.x) * f,
                    y: a.y + (b.y - a.y) * f,
                    cursor_id: a.cursor_id.clone(),
                });
            }
        }

        Some(CursorSample {
            x: a.x,
            y: a.y,
            cursor_id: a.cursor_id.clone(),
        })
    }

    /// Clicks with `t0 <= process_time_ms <= t1`.
    pub fn clicks_in_range(&self, t0: u64, t1: u64) -> &[MouseClick] {
        let lo = self.clicks.partition_point(|c| c.process_time_ms < t0);
        let hi = self.clicks.partition_point(|c| c.process_time_ms <= t1);
        &self.clicks[lo..hi.max(lo)]
    }

    /// Down-phase clicks within `[t_now - window_ms, t_now]`, each
    /// annotated with its age relative to `t_now`.
    pub fn recent_clicks(&self, t_now: u64, window_ms: u64) -> Vec<ClickHighlight> {
        self.clicks_in_range(t_now.saturating_sub(window_ms), t_now)
            .iter()
            .filter(|c| c.phase == ClickPhase::Down)
            .map(|c| ClickHighlight {
                x: c.x,
                y: c.y,
                button: c.button,
                age_ms: t_now - c.process_time_ms,
            })
            .collect()
    }
}
