//! Show project and recording information.

use std::path::PathBuf;

use recut_timeline_engine::time::total_output_duration;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let (project, bundle) = super::open(&path)?;

    println!("Project: {}", project.name);
    println!("  ID: {}", project.id);
    println!("  Created: {}", project.created_at);
    println!();

    println!("Recording:");
    println!(
        "  Screen: {} ({}x{} @ {}fps, {:.1}s)",
        bundle.video.path,
        bundle.video.width,
        bundle.video.height,
        bundle.video.fps,
        bundle.video.duration_ms as f64 / 1_000.0
    );
    if let Some(ref w) = bundle.webcam {
        println!(
            "  Webcam: {} ({}x{}, {:.1}s)",
            w.path,
            w.width,
            w.height,
            w.duration_ms as f64 / 1_000.0
        );
    }
    if let Some(ref a) = bundle.mic {
        println!(
            "  Mic: {} ({:.1}s, offset {} ms)",
            a.path,
            a.duration_ms as f64 / 1_000.0,
            bundle.mic_offset_ms()
        );
    }
    if let Some(ref a) = bundle.system_audio {
        println!(
            "  System audio: {} ({:.1}s, offset {} ms)",
            a.path,
            a.duration_ms as f64 / 1_000.0,
            bundle.system_audio_offset_ms()
        );
    }
    println!(
        "  Input events: {} moves, {} clicks, {} cursor images",
        bundle.mouse_moves.len(),
        bundle.mouse_clicks.len(),
        bundle.cursors.len()
    );
    println!();

    println!("Scenes:");
    for scene in &project.scenes {
        let total = total_output_duration(&scene.screen_slices);
        println!(
            "  {} ({:?}): {} clips, {} layouts, {:.1}s output",
            scene.name,
            scene.scene_type,
            scene.screen_slices.len(),
            scene.layouts.len(),
            total as f64 / 1_000.0
        );
    }

    Ok(())
}
