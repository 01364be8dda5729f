//! Replay the timeline headlessly and report frame statistics.

use std::path::PathBuf;
use std::sync::Arc;

use recut_common::{AppConfig, CancelFlag};
use recut_playback_engine::event_index::InputEventIndex;
use recut_playback_engine::frames::{enumerate_frames, ReplayConfig};
use recut_playback_engine::resolver::MediaMetadata;

pub fn run(path: PathBuf, fps: Option<u32>, config: &AppConfig) -> anyhow::Result<()> {
    let (project, bundle) = super::open(&path)?;
    let scene = project
        .active_scene()
        .ok_or_else(|| anyhow::anyhow!("project has no scenes"))?;

    let fps = match fps.unwrap_or(bundle.video.fps) {
        0 => config.playback.fallback_fps,
        fps => fps,
    };

    let metadata = MediaMetadata {
        fps: bundle.video.fps,
        width: bundle.video.width,
        height: bundle.video.height,
        duration_ms: bundle.video.duration_ms,
    };
    let replay = ReplayConfig {
        fps,
        viewport: (
            f64::from(config.playback.viewport_width),
            f64::from(config.playback.viewport_height),
        ),
        camera_aspect: bundle.camera_aspect(),
        smoothing: project.config.cursor.smoothing.clone(),
    };

    let index = Arc::new(InputEventIndex::from_bundle(&bundle));
    let frames = enumerate_frames(
        Arc::clone(scene),
        index,
        metadata,
        &replay,
        &CancelFlag::new(),
    )?;

    let warnings = frames.iter().filter(|f| f.warning.is_some()).count();
    let with_cursor = frames.iter().filter(|f| f.cursor.is_some()).count();

    println!("Frames: {} @ {fps}fps", frames.len());
    if let (Some(first), Some(last)) = (frames.first(), frames.last()) {
        println!(
            "  Output range: {} ms .. {} ms",
            first.t_out, last.t_out
        );
    }
    println!("  With cursor: {with_cursor}");
    println!("  Warnings: {warnings}");

    Ok(())
}
