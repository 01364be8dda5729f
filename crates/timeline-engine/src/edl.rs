//! Edit decision lists: the concatenation plan exporters consume.
//!
//! Screen and camera EDLs are computed independently — their linking is
//! structural, not numerical, so after per-track trims the interval
//! lists may differ and the exporter multiplexes them.

use serde::{Deserialize, Serialize};

use recut_project_model::project::{Scene, Track};

use crate::time::round_half_even;

/// One source interval to concatenate, played at `time_scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditDecision {
    pub source_start_ms: u64,
    pub source_end_ms: u64,
    pub time_scale: f64,
}

impl EditDecision {
    /// Duration in the source media.
    pub fn source_duration_ms(&self) -> u64 {
        self.source_end_ms.saturating_sub(self.source_start_ms)
    }

    /// Duration in the output after time scaling.
    pub fn output_duration_ms(&self) -> u64 {
        round_half_even(self.source_duration_ms() as f64 / self.time_scale)
    }
}

/// Ordered edit decisions for one track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackEdits {
    pub segments: Vec<EditDecision>,
}

impl TrackEdits {
    /// Total output duration after all edits.
    pub fn total_output_duration_ms(&self) -> u64 {
        round_half_even(
            self.segments
                .iter()
                .map(|s| s.source_duration_ms() as f64 / s.time_scale)
                .sum(),
        )
    }

    /// Whether this is the whole source with no cuts: a single segment
    /// at roughly unit speed covering the recording (small tail
    /// tolerance for container rounding).
    pub fn is_full_source(&self, source_duration_ms: u64) -> bool {
        if self.segments.len() != 1 {
            return false;
        }
        let seg = &self.segments[0];
        seg.source_start_ms == 0
            && seg.source_end_ms >= source_duration_ms.saturating_sub(100)
            && (seg.time_scale - 1.0).abs() < 0.01
    }
}

/// Enumerate the edit decisions for one track of a scene snapshot.
pub fn track_edits(scene: &Scene, track: Track) -> TrackEdits {
    TrackEdits {
        segments: scene
            .slices(track)
            .iter()
            .map(|slice| EditDecision {
                source_start_ms: slice.source_start_ms,
                source_end_ms: slice.source_end_ms,
                time_scale: slice.time_scale,
            })
            .collect(),
    }
}
