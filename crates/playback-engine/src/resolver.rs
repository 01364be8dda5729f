//! The playback clock and per-tick resolver.
//!
//! The resolver is the only stateful orchestrator. Driven by a media
//! clock, it advances output time across slice boundaries, maps it
//! through the scene snapshot to per-track source times and the active
//! layout, drives the cursor smoother, and publishes an immutable
//! [`FrameState`] per tick. Ticks never fail: problems surface in the
//! frame's `warning` field and playback continues.

use std::sync::Arc;
use std::time::Duration;

use recut_common::DriftMeasurement;
use recut_project_model::bundle::RecordingBundle;
use recut_project_model::id::Id;
use recut_project_model::project::{LayoutType, Scene, SpringConfig};
use recut_timeline_engine::time::{output_to_source, round_half_even, source_to_output};

use crate::event_index::{ClickHighlight, InputEventIndex};
use crate::layout::{find_layout_at, resolve_layout, LayoutRenderInfo};
use crate::smoother::{CursorSmoother, SmoothedPoint};

/// How long a click highlight stays visible.
pub const CLICK_FADE_MS: u64 = 500;

/// Audio drift tolerated before the follower is told to re-sync.
pub const AUDIO_DRIFT_MAX_MS: u64 = 20;

/// Static properties of the loaded media.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaMetadata {
    pub fps: u32,
    pub width: u32,
    pub height: u32,
    pub duration_ms: u64,
}

/// The media playback engine the resolver drives.
///
/// `current_time` is in the SOURCE timeline of the active slice. Seeks
/// are fire-and-forget; the resolver tolerates out-of-order completion
/// by re-issuing against the desired time on each tick.
pub trait MediaClock {
    fn seek(&mut self, source_ms: u64);
    fn play(&mut self);
    fn pause(&mut self);
    fn current_time(&self) -> u64;
    fn metadata(&self) -> MediaMetadata;
}

/// A deterministic media clock for tests and headless frame
/// enumeration. Time advances only through [`advance`], scaled by the
/// configured playback rate.
///
/// [`advance`]: VirtualClock::advance
#[derive(Debug, Clone)]
pub struct VirtualClock {
    metadata: MediaMetadata,
    position_ms: f64,
    rate: f64,
    playing: bool,
}

impl VirtualClock {
    pub fn new(metadata: MediaMetadata) -> Self {
        Self {
            metadata,
            position_ms: 0.0,
            rate: 1.0,
            playing: false,
        }
    }

    /// Source milliseconds advanced per wall millisecond while playing.
    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate.max(0.0);
    }

    /// Advance the clock by a wall-time delta.
    pub fn advance(&mut self, wall: Duration) {
        if self.playing {
            self.position_ms = (self.position_ms + wall.as_secs_f64() * 1_000.0 * self.rate)
                .min(self.metadata.duration_ms as f64);
        }
    }
}

impl MediaClock for VirtualClock {
    fn seek(&mut self, source_ms: u64) {
        self.position_ms = source_ms.min(self.metadata.duration_ms) as f64;
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn current_time(&self) -> u64 {
        self.position_ms as u64
    }

    fn metadata(&self) -> MediaMetadata {
        self.metadata
    }
}

/// Which follower audio track a target refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioTrackKind {
    Mic,
    SystemAudio,
}

impl std::fmt::Display for AudioTrackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mic => f.write_str("mic"),
            Self::SystemAudio => f.write_str("system audio"),
        }
    }
}

/// Where a follower audio track should be right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioTarget {
    pub track: AudioTrackKind,
    pub target_ms: u64,
}

/// The immutable snapshot published on every tick and seek.
#[derive(Debug, Clone)]
pub struct FrameState {
    pub t_out: u64,
    pub slice_index: usize,
    pub source_time_ms: u64,
    pub layout: LayoutRenderInfo,
    /// Absent when the slice or layout hides the cursor, or no sample
    /// exists yet at this source time.
    pub cursor: Option<SmoothedPoint>,
    pub recent_clicks: Vec<ClickHighlight>,
    /// Per-track source times for the audio followers.
    pub audio: Vec<AudioTarget>,
    pub warning: Option<String>,
}

/// Observer invoked with every published frame.
pub type FrameListener = Box<dyn Fn(&FrameState) + Send>;

/// Observer invoked once when playback reaches the end of the timeline.
pub type EndListener = Box<dyn Fn() + Send>;

/// The per-tick orchestrator.
pub struct Resolver<C: MediaClock> {
    scene: Arc<Scene>,
    index: Arc<InputEventIndex>,
    clock: C,
    smoother: CursorSmoother,
    viewport: (f64, f64),
    camera_aspect: f64,
    smoothing_enabled: bool,
    audio_offsets: Vec<(AudioTrackKind, u64)>,
    slice_index: usize,
    playing: bool,
    ended: bool,
    last_t_out: u64,
    pending_warning: Option<String>,
    frame_listener: Option<FrameListener>,
    end_listener: Option<EndListener>,
}

impl<C: MediaClock> Resolver<C> {
    pub fn new(
        scene: Arc<Scene>,
        index: Arc<InputEventIndex>,
        clock: C,
        spring: SpringConfig,
    ) -> Self {
        let meta = clock.metadata();
        Self {
            scene,
            index,
            clock,
            smoother: CursorSmoother::new(spring),
            viewport: (meta.width as f64, meta.height as f64),
            camera_aspect: 16.0 / 9.0,
            smoothing_enabled: true,
            audio_offsets: Vec::new(),
            slice_index: 0,
            playing: false,
            ended: false,
            last_t_out: 0,
            pending_warning: None,
            frame_listener: None,
            end_listener: None,
        }
    }

    /// Adopt the recording's webcam aspect and audio offsets.
    pub fn attach_bundle(&mut self, bundle: &RecordingBundle) {
        self.camera_aspect = bundle.camera_aspect();
        self.audio_offsets.clear();
        if bundle.mic.is_some() {
            self.audio_offsets
                .push((AudioTrackKind::Mic, bundle.mic_offset_ms()));
        }
        if bundle.system_audio.is_some() {
            self.audio_offsets
                .push((AudioTrackKind::SystemAudio, bundle.system_audio_offset_ms()));
        }
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = (width, height);
    }

    /// Webcam aspect ratio (width over height) for picture-in-picture
    /// sizing, when configuring without a bundle at hand.
    pub fn set_camera_aspect(&mut self, aspect: f64) {
        self.camera_aspect = aspect.max(f64::EPSILON);
    }

    /// Project-wide cursor smoothing toggle. When off, every frame
    /// reports the raw interpolated sample, as if each slice carried
    /// `disable_cursor_smoothing`.
    pub fn set_smoothing_enabled(&mut self, enabled: bool) {
        self.smoothing_enabled = enabled;
    }

    pub fn set_frame_listener(&mut self, listener: FrameListener) {
        self.frame_listener = Some(listener);
    }

    pub fn set_end_listener(&mut self, listener: EndListener) {
        self.end_listener = Some(listener);
    }

    /// Swap in a newer scene snapshot, re-resolving the current output
    /// position against it (latest-wins).
    pub fn set_scene(&mut self, scene: Arc<Scene>) {
        self.scene = scene;
        self.seek(self.last_t_out);
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn slice_index(&self) -> usize {
        self.slice_index
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Start playback, re-seeding the smoother at the current source
    /// time so motion never carries across a pause.
    pub fn play(&mut self) {
        self.playing = true;
        self.clock.play();
        if let Some(sample) = self.index.interpolated_at(self.clock.current_time()) {
            self.smoother.reset_to(&sample);
        }
    }

    pub fn pause(&mut self) {
        self.playing = false;
        self.clock.pause();
    }

    /// Jump to an output time (clamped to the timeline), command the
    /// media clock, reset the smoother, and publish a paused-semantics
    /// frame.
    pub fn seek(&mut self, t_out: u64) -> FrameState {
        let scene = Arc::clone(&self.scene);
        match output_to_source(&scene.screen_slices, t_out) {
            Some((index, source_ms)) => {
                self.slice_index = index;
                self.ended = false;
                self.clock.seek(source_ms);
                if let Some(sample) = self.index.interpolated_at(source_ms) {
                    self.smoother.reset_to(&sample);
                }
                self.resolve_and_publish(source_ms, 0.0)
            }
            None => {
                self.pending_warning = Some("seek on an empty timeline".to_string());
                self.resolve_and_publish(0, 0.0)
            }
        }
    }

    /// Seek one frame forward or backward, using the recording's fps.
    pub fn step_frame(&mut self, dir: i32) -> FrameState {
        let fps = self.clock.metadata().fps.max(1);
        let delta = 1_000.0 / fps as f64;
        let target = if dir >= 0 {
            self.last_t_out as f64 + delta
        } else {
            self.last_t_out as f64 - delta
        };
        self.seek(round_half_even(target.max(0.0)))
    }

    /// One animation step while playing.
    ///
    /// Reads the media clock, advances across slice boundaries (seeking
    /// the media and resetting the smoother), and publishes the frame.
    /// Reaching the end of the last slice pauses playback.
    pub fn tick(&mut self, wall_dt: Duration) -> FrameState {
        if !self.playing {
            let source_ms = self.clock.current_time();
            return self.resolve_and_publish(source_ms, 0.0);
        }

        let scene = Arc::clone(&self.scene);
        let slices = &scene.screen_slices;
        if slices.is_empty() {
            self.pending_warning = Some("tick on an empty timeline".to_string());
            return self.resolve_and_publish(0, 0.0);
        }
        if self.slice_index >= slices.len() {
            self.slice_index = slices.len() - 1;
        }

        let mut source_ms = self.clock.current_time();
        if source_ms >= slices[self.slice_index].source_end_ms {
            if self.slice_index + 1 < slices.len() {
                // The next slice may be temporally distant in source;
                // a smoothed cursor must not chase across the cut.
                self.slice_index += 1;
                source_ms = slices[self.slice_index].source_start_ms;
                self.clock.seek(source_ms);
                if let Some(sample) = self.index.interpolated_at(source_ms) {
                    self.smoother.reset_to(&sample);
                }
            } else {
                source_ms = slices[self.slice_index].source_end_ms;
                self.playing = false;
                self.ended = true;
                self.clock.pause();
                tracing::debug!("Playback reached end of stream");
                let frame = self.resolve_and_publish(source_ms, 0.0);
                if let Some(listener) = &self.end_listener {
                    listener();
                }
                return frame;
            }
        }

        self.resolve_and_publish(source_ms, wall_dt.as_secs_f64())
    }

    /// Where a follower audio track should be for a video source time.
    pub fn audio_target_ms(&self, track: AudioTrackKind, source_ms: u64) -> u64 {
        let offset = self
            .audio_offsets
            .iter()
            .find(|(kind, _)| *kind == track)
            .map(|(_, offset)| *offset)
            .unwrap_or(0);
        source_ms.saturating_sub(offset)
    }

    /// Check a follower's reported position against its target.
    ///
    /// Returns the position to re-sync to when drift exceeds the
    /// policy; the mismatch is noted on the next published frame and is
    /// never fatal.
    pub fn verify_audio(&mut self, track: AudioTrackKind, actual_ms: u64) -> Option<u64> {
        let target_ms = self.audio_target_ms(track, self.clock.current_time());
        let drift = DriftMeasurement {
            target_ms,
            actual_ms,
        };
        if drift.exceeds_threshold_ms(AUDIO_DRIFT_MAX_MS) {
            tracing::warn!(%track, drift_ms = drift.drift_ms(), "Audio drift, re-syncing");
            self.pending_warning = Some(format!(
                "media drift of {} ms on {track}",
                drift.drift_ms()
            ));
            Some(target_ms)
        } else {
            None
        }
    }

    /// The single resolve path shared by ticks, seeks, and paused
    /// refreshes. `dt_secs = 0` applies to the current time without
    /// advancing the spring.
    fn resolve_and_publish(&mut self, source_ms: u64, dt_secs: f64) -> FrameState {
        let scene = Arc::clone(&self.scene);
        let slices = &scene.screen_slices;
        let mut warning = self.pending_warning.take();

        let t_out = source_to_output(slices, self.slice_index, source_ms).unwrap_or(0);
        self.last_t_out = t_out;

        let layout = match find_layout_at(&scene.layouts, t_out) {
            Some(layout) => resolve_layout(layout, self.viewport.0, self.viewport.1, self.camera_aspect),
            None => {
                warning.get_or_insert_with(|| format!("no layout covers {t_out}"));
                fallback_layout(self.viewport)
            }
        };

        let slice = slices.get(self.slice_index);
        let hide_cursor = slice.map(|s| s.hide_cursor).unwrap_or(true)
            || layout.layout_type == LayoutType::CameraOnly;
        let cursor = if hide_cursor {
            None
        } else {
            self.index.interpolated_at(source_ms).map(|sample| {
                let bypass_spring = !self.smoothing_enabled
                    || slice.map(|s| s.disable_cursor_smoothing).unwrap_or(false);
                if bypass_spring {
                    // Raw passthrough still reports through the same shape
                    SmoothedPoint {
                        x: sample.x,
                        y: sample.y,
                        raw_x: sample.x,
                        raw_y: sample.y,
                        cursor_id: sample.cursor_id.clone(),
                    }
                } else {
                    self.smoother.step(&sample, dt_secs)
                }
            })
        };

        let frame = FrameState {
            t_out,
            slice_index: self.slice_index,
            source_time_ms: source_ms,
            layout,
            cursor,
            recent_clicks: self.index.recent_clicks(source_ms, CLICK_FADE_MS),
            audio: self
                .audio_offsets
                .iter()
                .map(|(track, offset)| AudioTarget {
                    track: *track,
                    target_ms: source_ms.saturating_sub(*offset),
                })
                .collect(),
            warning,
        };

        if let Some(listener) = &self.frame_listener {
            listener(&frame);
        }
        frame
    }
}

fn fallback_layout(viewport: (f64, f64)) -> LayoutRenderInfo {
    LayoutRenderInfo {
        layout_id: Id::new(),
        layout_type: LayoutType::ScreenOnly,
        screen: Some(recut_project_model::geometry::Rect::new(
            0.0, 0.0, viewport.0, viewport.1,
        )),
        camera: None,
    }
}
