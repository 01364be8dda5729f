//! Recording bundles: read-only source media plus sidecar event indexes.
//!
//! A recording bundle is a directory produced by the capture subsystem:
//!
//! - `bundle.json`  — media manifest (video metadata, optional webcam and
//!   audio tracks, cursor image table)
//! - `moves.jsonl`  — mouse-position samples, sorted by `t`
//! - `clicks.jsonl` — mouse-button events, sorted by `t`
//!
//! The bundle is immutable after load. Load failures surface as
//! `BundleInvalid` and leave no partial state behind.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use recut_common::{RecutError, RecutResult};

use crate::event::{is_monotonic, parse_stream, MouseClick, MouseMove};

/// Screen video track metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoTrack {
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub duration_ms: u64,
}

/// Webcam video track reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebcamTrack {
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub duration_ms: u64,
}

/// Audio track reference (microphone or system audio).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioTrack {
    pub path: String,
    pub duration_ms: u64,
}

/// A cursor image with its hotspot, keyed by cursor ID in the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorAsset {
    pub path: String,
    pub hotspot_x: f64,
    pub hotspot_y: f64,
}

/// The `bundle.json` manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleManifest {
    pub video: VideoTrack,
    #[serde(default)]
    pub webcam: Option<WebcamTrack>,
    #[serde(default)]
    pub mic: Option<AudioTrack>,
    #[serde(default)]
    pub system_audio: Option<AudioTrack>,
    #[serde(default)]
    pub cursors: BTreeMap<String, CursorAsset>,
}

/// An immutable, validated recording loaded into memory.
#[derive(Debug, Clone)]
pub struct RecordingBundle {
    /// Filesystem path to the bundle directory.
    pub root: PathBuf,

    pub video: VideoTrack,
    pub webcam: Option<WebcamTrack>,
    pub mic: Option<AudioTrack>,
    pub system_audio: Option<AudioTrack>,

    /// Mouse-position samples, sorted by `process_time_ms`.
    pub mouse_moves: Vec<MouseMove>,

    /// Mouse-button events, sorted by `process_time_ms`.
    pub mouse_clicks: Vec<MouseClick>,

    pub cursors: BTreeMap<String, CursorAsset>,
}

/// Name of the manifest file inside a bundle directory.
pub const MANIFEST_FILE: &str = "bundle.json";
/// Name of the mouse-move sidecar.
pub const MOVES_FILE: &str = "moves.jsonl";
/// Name of the mouse-click sidecar.
pub const CLICKS_FILE: &str = "clicks.jsonl";

impl RecordingBundle {
    /// Load and validate a bundle directory.
    pub fn load(root: impl AsRef<Path>) -> RecutResult<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(RecutError::bundle_invalid(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        let manifest_path = root.join(MANIFEST_FILE);
        if !manifest_path.exists() {
            return Err(RecutError::bundle_invalid(format!(
                "missing {MANIFEST_FILE}"
            )));
        }
        let manifest: BundleManifest =
            serde_json::from_str(&std::fs::read_to_string(&manifest_path)?)?;

        validate_video(&manifest.video)?;

        let mouse_moves: Vec<MouseMove> = read_sidecar(&root, MOVES_FILE)?;
        let mouse_clicks: Vec<MouseClick> = read_sidecar(&root, CLICKS_FILE)?;

        if !is_monotonic(&mouse_moves) {
            return Err(RecutError::bundle_invalid(format!(
                "{MOVES_FILE} is not sorted by time"
            )));
        }
        if !is_monotonic(&mouse_clicks) {
            return Err(RecutError::bundle_invalid(format!(
                "{CLICKS_FILE} is not sorted by time"
            )));
        }

        tracing::debug!(
            root = %root.display(),
            moves = mouse_moves.len(),
            clicks = mouse_clicks.len(),
            "Loaded recording bundle"
        );

        Ok(Self {
            root,
            video: manifest.video,
            webcam: manifest.webcam,
            mic: manifest.mic,
            system_audio: manifest.system_audio,
            mouse_moves,
            mouse_clicks,
            cursors: manifest.cursors,
        })
    }

    /// Recording offset of the microphone track.
    ///
    /// Audio capture starts a beat after video capture, so the mic file
    /// is shorter than the video; the follower seeks to
    /// `video_time - offset`. Clamped to zero when audio outlasts video.
    pub fn mic_offset_ms(&self) -> u64 {
        self.mic
            .as_ref()
            .map(|a| self.video.duration_ms.saturating_sub(a.duration_ms))
            .unwrap_or(0)
    }

    /// Recording offset of the system-audio track. Same clamp as the mic.
    pub fn system_audio_offset_ms(&self) -> u64 {
        self.system_audio
            .as_ref()
            .map(|a| self.video.duration_ms.saturating_sub(a.duration_ms))
            .unwrap_or(0)
    }

    /// Native aspect ratio of the webcam video, width over height.
    /// Falls back to 16:9 when no webcam was recorded.
    pub fn camera_aspect(&self) -> f64 {
        match &self.webcam {
            Some(w) if w.height > 0 => w.width as f64 / w.height as f64,
            _ => 16.0 / 9.0,
        }
    }
}

fn validate_video(video: &VideoTrack) -> RecutResult<()> {
    if video.width == 0 || video.height == 0 {
        return Err(RecutError::bundle_invalid("video has zero dimensions"));
    }
    if video.fps == 0 {
        return Err(RecutError::bundle_invalid("video has zero fps"));
    }
    if video.duration_ms == 0 {
        return Err(RecutError::bundle_invalid("video has zero duration"));
    }
    Ok(())
}

fn read_sidecar<T: serde::de::DeserializeOwned>(root: &Path, name: &str) -> RecutResult<Vec<T>> {
    let path = root.join(name);
    if !path.exists() {
        // Event sidecars are optional; a recording made with input
        // tracking disabled simply has empty streams.
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(&path)?;
    parse_stream(&content)
        .map_err(|e| RecutError::bundle_invalid(format!("{name} parse failure: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(video_duration_ms: u64, mic_duration_ms: Option<u64>) -> BundleManifest {
        BundleManifest {
            video: VideoTrack {
                path: "screen.mp4".to_string(),
                width: 1920,
                height: 1080,
                fps: 60,
                duration_ms: video_duration_ms,
            },
            webcam: None,
            mic: mic_duration_ms.map(|duration_ms| AudioTrack {
                path: "mic.ogg".to_string(),
                duration_ms,
            }),
            system_audio: None,
            cursors: BTreeMap::new(),
        }
    }

    fn bundle_from(manifest: BundleManifest) -> RecordingBundle {
        RecordingBundle {
            root: PathBuf::from("/tmp/none"),
            video: manifest.video,
            webcam: manifest.webcam,
            mic: manifest.mic,
            system_audio: manifest.system_audio,
            mouse_moves: Vec::new(),
            mouse_clicks: Vec::new(),
            cursors: manifest.cursors,
        }
    }

    #[test]
    fn test_mic_offset_is_video_minus_audio() {
        let bundle = bundle_from(manifest(30_000, Some(29_700)));
        assert_eq!(bundle.mic_offset_ms(), 300);
    }

    #[test]
    fn test_mic_offset_clamps_when_audio_outlasts_video() {
        let bundle = bundle_from(manifest(30_000, Some(31_000)));
        assert_eq!(bundle.mic_offset_ms(), 0);
    }

    #[test]
    fn test_offset_zero_without_track() {
        let bundle = bundle_from(manifest(30_000, None));
        assert_eq!(bundle.mic_offset_ms(), 0);
        assert_eq!(bundle.system_audio_offset_ms(), 0);
    }

    #[test]
    fn test_camera_aspect_defaults_to_widescreen() {
        let bundle = bundle_from(manifest(10_000, None));
        assert!((bundle.camera_aspect() - 16.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_validate_video_rejects_zero_duration() {
        let video = VideoTrack {
            path: "screen.mp4".to_string(),
            width: 1920,
            height: 1080,
            fps: 60,
            duration_ms: 0,
        };
        assert!(validate_video(&video).is_err());
    }
}
