//! Deterministic headless replay for export.
//!
//! Drives a resolver over a virtual clock at exact frame steps, so the
//! exporter overlays the same cursor motion and layouts the player
//! showed. Pure computation over snapshot values; safe to run on a
//! background worker with cooperative cancellation.

use std::sync::Arc;
use std::time::Duration;

use recut_common::{CancelFlag, RecutError, RecutResult};
use recut_project_model::project::{CursorSmoothingConfig, Scene};
use recut_timeline_engine::time::total_output_duration;

use crate::event_index::InputEventIndex;
use crate::resolver::{FrameState, MediaMetadata, Resolver, VirtualClock};

/// Parameters for a headless replay.
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Output frames per second.
    pub fps: u32,
    /// Viewport the layouts are resolved against.
    pub viewport: (f64, f64),
    /// Webcam aspect ratio for picture-in-picture sizing.
    pub camera_aspect: f64,
    /// Cursor smoothing toggle and spring parameters.
    pub smoothing: CursorSmoothingConfig,
}

/// Resolve every output frame of a scene.
///
/// Frame `n` lands at output time `n * 1000 / fps`; slice boundaries
/// and cursor resets happen exactly as during playback. Polls `cancel`
/// once per frame.
pub fn enumerate_frames(
    scene: Arc<Scene>,
    index: Arc<InputEventIndex>,
    metadata: MediaMetadata,
    config: &ReplayConfig,
    cancel: &CancelFlag,
) -> RecutResult<Vec<FrameState>> {
    let fps = config.fps.max(1);
    let total_ms = total_output_duration(&scene.screen_slices);
    if total_ms == 0 {
        return Ok(Vec::new());
    }

    let mut resolver = Resolver::new(
        Arc::clone(&scene),
        index,
        VirtualClock::new(metadata),
        config.smoothing.spring,
    );
    resolver.set_viewport(config.viewport.0, config.viewport.1);
    resolver.set_camera_aspect(config.camera_aspect);
    resolver.set_smoothing_enabled(config.smoothing.enabled);

    let frame_dt = Duration::from_secs_f64(1.0 / f64::from(fps));
    let total_frames = (total_ms as f64 / 1_000.0 * f64::from(fps)).ceil() as u64;

    tracing::debug!(total_frames, fps, "Enumerating export frames");

    let mut frames = Vec::with_capacity(total_frames as usize);
    resolver.seek(0);
    resolver.play();
    frames.push(resolver.tick(Duration::ZERO));

    for _ in 1..total_frames {
        if cancel.is_cancelled() {
            return Err(RecutError::Cancelled);
        }

        // The media clock runs in source time: it covers frame_dt of
        // output scaled by the active slice's speed.
        let rate = scene
            .screen_slices
            .get(resolver.slice_index())
            .map(|s| s.time_scale)
            .unwrap_or(1.0);
        resolver.clock_mut().set_rate(rate);
        resolver.clock_mut().advance(frame_dt);

        let frame = resolver.tick(frame_dt);
        let ended = resolver.is_ended();
        frames.push(frame);
        if ended {
            break;
        }
    }

    Ok(frames)
}
