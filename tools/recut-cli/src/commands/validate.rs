//! Validate a project bundle and its timeline invariants.

use std::path::PathBuf;

use recut_timeline_engine::edit::validate_scene;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let (project, bundle) = super::open(&path)?;

    println!(
        "Recording OK: {}x{} @ {}fps, {} input events",
        bundle.video.width,
        bundle.video.height,
        bundle.video.fps,
        bundle.mouse_moves.len() + bundle.mouse_clicks.len()
    );

    let mut problems = Vec::new();
    for scene in &project.scenes {
        for problem in validate_scene(scene) {
            problems.push(format!("{}: {}", scene.name, problem));
        }
        for slice in scene.screen_slices.iter().chain(&scene.camera_slices) {
            if slice.source_end_ms > bundle.video.duration_ms {
                problems.push(format!(
                    "{}: slice {} reaches past the recording end",
                    scene.name, slice.id
                ));
            }
        }
    }

    if problems.is_empty() {
        println!("Project OK: {} scene(s), all invariants hold", project.scenes.len());
        Ok(())
    } else {
        for problem in &problems {
            eprintln!("  ✗ {problem}");
        }
        anyhow::bail!("{} problem(s) found", problems.len())
    }
}
