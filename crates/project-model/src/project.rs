//! Project schema: the authoritative edit tree.
//!
//! A project owns an ordered list of scenes; each scene owns two linked
//! slice tracks (screen and camera), the layout intervals that cover the
//! output timeline, and deferred zoom ranges. All positions are integer
//! milliseconds. Scenes are held behind `Arc` so edited snapshots share
//! every aggregate the edit did not touch.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geometry::Point2D;
use crate::id::Id;

/// Shortest slice the editor will produce or keep, in output-source ms.
pub const MIN_SLICE_MS: u64 = 100;

/// Shortest layout interval the editor will produce or keep.
pub const MIN_LAYOUT_MS: u64 = 100;

/// Solid, gradient, or image canvas behind the composed frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Background {
    Solid { color: String },
    Gradient { gradient: GradientConfig },
    Image { image_url: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientConfig {
    pub start: Point2D,
    pub end: Point2D,
    pub stops: Vec<GradientStop>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub color: String,
    pub at: f64,
}

impl Default for Background {
    fn default() -> Self {
        Background::Gradient {
            gradient: GradientConfig {
                start: Point2D::new(0.0, 0.0),
                end: Point2D::new(1.0, 1.0),
                stops: vec![
                    GradientStop {
                        color: "#3F37C9".to_string(),
                        at: 0.0,
                    },
                    GradientStop {
                        color: "#8C87DF".to_string(),
                        at: 1.0,
                    },
                ],
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowConfig {
    pub intensity: f64,
    pub angle: f64,
    pub distance: f64,
    pub blur: f64,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            intensity: 0.75,
            angle: 90.0,
            distance: 25.0,
            blur: 20.0,
        }
    }
}

/// Spring parameters for the cursor smoother.
///
/// The defaults give a damping ratio of ~0.93 — near-critical with a
/// slight overshoot that reads as natural hand motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 470.0,
            damping: 70.0,
            mass: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorSmoothingConfig {
    pub enabled: bool,
    pub spring: SpringConfig,
}

impl Default for CursorSmoothingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            spring: SpringConfig::default(),
        }
    }
}

/// Cursor rendering configuration.
///
/// `size` is a renderer-side multiplier over the cursor asset's natural
/// size; the engine stores it opaquely and never interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorConfig {
    pub size: f64,
    pub smoothing: CursorSmoothingConfig,
    pub hide_after_ms: Option<u64>,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            size: 1.5,
            smoothing: CursorSmoothingConfig::default(),
            hide_after_ms: None,
        }
    }
}

/// Preset anchor for the camera bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CameraAnchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    pub enabled: bool,
    pub position: CameraAnchor,
    pub size: f64,
    pub roundness: f64,
    pub mirror: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            position: CameraAnchor::BottomRight,
            size: 0.35,
            roundness: 0.25,
            mirror: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioConfig {
    pub system_volume: f64,
    pub microphone_volume: f64,
    pub enhance_microphone: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            system_volume: 1.0,
            microphone_volume: 1.0,
            enhance_microphone: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectRatio {
    pub x: u32,
    pub y: u32,
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self { x: 16, y: 9 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub background: Background,
    pub padding: Padding,
    pub shadow: ShadowConfig,
    pub cursor: CursorConfig,
    pub camera: CameraConfig,
    pub audio: AudioConfig,
    /// Portion of the recording the edit covers, `[start_ms, end_ms]`.
    pub recording_range: (u64, u64),
    pub output_aspect_ratio: AspectRatio,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            background: Background::default(),
            padding: Padding::default(),
            shadow: ShadowConfig::default(),
            cursor: CursorConfig::default(),
            camera: CameraConfig::default(),
            audio: AudioConfig::default(),
            recording_range: (0, 0),
            output_aspect_ratio: AspectRatio::default(),
        }
    }
}

/// A selection of the half-open source interval
/// `[source_start_ms, source_end_ms)` played back at `time_scale`.
///
/// Output duration = source duration / time_scale. The atomic unit of
/// non-destructive editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slice {
    pub id: Id,
    pub source_start_ms: u64,
    pub source_end_ms: u64,
    /// Playback speed. 1 = real-time, 2 = double speed. Always > 0.
    pub time_scale: f64,
    pub volume: f64,
    pub hide_cursor: bool,
    pub disable_cursor_smoothing: bool,
}

impl Slice {
    /// A full-speed slice over `[start, end)` with default volume.
    pub fn over(source_start_ms: u64, source_end_ms: u64) -> Self {
        Self {
            id: Id::new(),
            source_start_ms,
            source_end_ms,
            time_scale: 1.0,
            volume: 1.0,
            hide_cursor: false,
            disable_cursor_smoothing: false,
        }
    }

    /// Duration of the selected source interval in ms.
    pub fn source_duration_ms(&self) -> u64 {
        self.source_end_ms.saturating_sub(self.source_start_ms)
    }

    /// Whether the slice satisfies the structural invariant: a minimum
    /// source duration and a strictly positive, finite time scale.
    pub fn is_valid(&self) -> bool {
        self.source_end_ms > self.source_start_ms
            && self.source_duration_ms() >= MIN_SLICE_MS
            && self.time_scale.is_finite()
            && self.time_scale > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZoomType {
    FollowCursor,
    FollowClicks,
    Manual,
}

/// Zoom intervals are part of the persisted model but have no playback
/// effect yet; they round-trip through edits untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomRange {
    pub id: Id,
    pub start_time: u64,
    pub end_time: u64,
    pub zoom: f64,
    #[serde(rename = "type")]
    pub zoom_type: ZoomType,
    pub target_point: Option<Point2D>,
    pub snap_to_edges: f64,
    pub instant: bool,
}

/// How screen and camera are composed over a layout interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutType {
    ScreenOnly,
    CameraOnly,
    ScreenWithCamera,
    SideBySide,
}

/// An interval `[start_time, end_time)` on the OUTPUT timeline with a
/// composition recipe. The layout list of a scene is contiguous and
/// covers the whole output duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub id: Id,
    pub start_time: u64,
    pub end_time: u64,
    #[serde(rename = "type")]
    pub layout_type: LayoutType,
    /// Camera width as a fraction of the container width, in (0, 1].
    pub camera_size: f64,
    /// Normalized camera centre within the viewport.
    pub camera_position: Point2D,
}

impl Layout {
    /// A layout spanning `[start, end)` with default camera placement.
    pub fn spanning(start_time: u64, end_time: u64, layout_type: LayoutType) -> Self {
        Self {
            id: Id::new(),
            start_time,
            end_time,
            layout_type,
            camera_size: 0.25,
            camera_position: Point2D::new(0.85, 0.85),
        }
    }

    pub fn duration_ms(&self) -> u64 {
        self.end_time.saturating_sub(self.start_time)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneType {
    Recording,
    Title,
    Transition,
}

/// Which linked slice track an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    Screen,
    Camera,
}

/// One continuous output segment: two position-linked slice tracks plus
/// the layouts and zoom ranges over the segment's output timeline.
///
/// `screen_slices` and `camera_slices` always have the same length; the
/// i-th slice of each represents the same clip. Cuts and removals act on
/// both tracks together, trims act per-track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: Id,
    pub name: String,
    #[serde(rename = "type")]
    pub scene_type: SceneType,
    pub session_index: usize,
    pub screen_slices: Vec<Slice>,
    pub camera_slices: Vec<Slice>,
    pub zoom_ranges: Vec<ZoomRange>,
    pub layouts: Vec<Layout>,
}

impl Scene {
    /// The slice track addressed by `track`.
    pub fn slices(&self, track: Track) -> &[Slice] {
        match track {
            Track::Screen => &self.screen_slices,
            Track::Camera => &self.camera_slices,
        }
    }

    /// Mutable access to the slice track addressed by `track`.
    pub fn slices_mut(&mut self, track: Track) -> &mut Vec<Slice> {
        match track {
            Track::Screen => &mut self.screen_slices,
            Track::Camera => &mut self.camera_slices,
        }
    }

    /// Positional index of a slice by ID, searching both tracks.
    pub fn clip_position(&self, slice_id: Id) -> Option<usize> {
        self.screen_slices
            .iter()
            .position(|s| s.id == slice_id)
            .or_else(|| self.camera_slices.iter().position(|s| s.id == slice_id))
    }
}

/// A user-placed timeline marker. Not consulted during playback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub id: Id,
    pub time_ms: u64,
    pub label: String,
    pub color: Option<String>,
}

/// Top-level project aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Id,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub config: ProjectConfig,
    /// Scenes behind `Arc` so snapshots share untouched aggregates.
    pub scenes: Vec<Arc<Scene>>,
}

impl Project {
    /// Create an empty project with default configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Id::new(),
            name: name.into(),
            created_at: Utc::now(),
            config: ProjectConfig::default(),
            scenes: Vec::new(),
        }
    }

    /// Create a project seeded from a recording: one default scene with a
    /// single full-duration slice on each track and one full-duration
    /// screen-with-camera layout.
    pub fn from_recording(name: impl Into<String>, duration_ms: u64) -> Self {
        let mut project = Self::new(name);
        project.config.recording_range = (0, duration_ms);
        project.scenes.push(Arc::new(Scene {
            id: Id::new(),
            name: "Scene 1".to_string(),
            scene_type: SceneType::Recording,
            session_index: 0,
            screen_slices: vec![Slice::over(0, duration_ms)],
            camera_slices: vec![Slice::over(0, duration_ms)],
            zoom_ranges: Vec::new(),
            layouts: vec![Layout::spanning(0, duration_ms, LayoutType::ScreenWithCamera)],
        }));
        project
    }

    /// The active scene. Exactly one scene is active at a time; the model
    /// keeps it first until multi-scene editing lands.
    pub fn active_scene(&self) -> Option<&Arc<Scene>> {
        self.scenes.first()
    }
}
