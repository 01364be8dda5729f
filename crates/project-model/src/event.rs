//! Input-event streams recorded alongside the video.
//!
//! Events are stored in append-only JSONL sidecars for crash safety.
//! Timestamps are `process_time_ms`: milliseconds on the capture
//! session's monotonic clock, zero at video frame 0. Coordinates are
//! source pixels (the recording's native resolution). Both streams are
//! non-decreasing in time.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A single mouse-position sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouseMove {
    /// Milliseconds since recording start.
    #[serde(rename = "t")]
    pub process_time_ms: u64,

    pub x: f64,
    pub y: f64,

    /// Which cursor image was active at this sample.
    #[serde(rename = "cursor")]
    pub cursor_id: String,
}

/// A mouse button transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouseClick {
    /// Milliseconds since recording start.
    #[serde(rename = "t")]
    pub process_time_ms: u64,

    pub x: f64,
    pub y: f64,

    pub button: MouseButton,
    pub phase: ClickPhase,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
}

/// Press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickPhase {
    Down,
    Up,
}

impl MouseMove {
    pub fn new(process_time_ms: u64, x: f64, y: f64, cursor_id: impl Into<String>) -> Self {
        Self {
            process_time_ms,
            x,
            y,
            cursor_id: cursor_id.into(),
        }
    }
}

impl MouseClick {
    pub fn down(process_time_ms: u64, x: f64, y: f64, button: MouseButton) -> Self {
        Self {
            process_time_ms,
            x,
            y,
            button,
            phase: ClickPhase::Down,
        }
    }

    pub fn up(process_time_ms: u64, x: f64, y: f64, button: MouseButton) -> Self {
        Self {
            process_time_ms,
            x,
            y,
            button,
            phase: ClickPhase::Up,
        }
    }
}

/// Timestamp accessor shared by both stream types, so sorting checks
/// and index construction can be written once.
pub trait Timestamped {
    fn process_time_ms(&self) -> u64;
}

impl Timestamped for MouseMove {
    fn process_time_ms(&self) -> u64 {
        self.process_time_ms
    }
}

impl Timestamped for MouseClick {
    fn process_time_ms(&self) -> u64 {
        self.process_time_ms
    }
}

/// Whether a stream is non-decreasing in `process_time_ms`.
pub fn is_monotonic<T: Timestamped>(events: &[T]) -> bool {
    events
        .windows(2)
        .all(|w| w[0].process_time_ms() <= w[1].process_time_ms())
}

/// Parse a stream from JSONL content (one JSON object per line).
/// Blank lines and `#`-prefixed header comments are skipped.
pub fn parse_stream<T: DeserializeOwned>(jsonl: &str) -> Result<Vec<T>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Serialize a stream to JSONL format.
pub fn serialize_stream<T: Serialize>(events: &[T]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for event in events {
        output.push_str(&serde_json::to_string(event)?);
        output.push('\n');
    }
    Ok(output)
}
