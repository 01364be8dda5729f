//! Print the edit decision list the exporter would consume.

use std::path::PathBuf;

use serde_json::json;

use recut_project_model::project::Track;
use recut_timeline_engine::edl::track_edits;

pub fn run(path: PathBuf, track: &str) -> anyhow::Result<()> {
    let (project, bundle) = super::open(&path)?;
    let scene = project
        .active_scene()
        .ok_or_else(|| anyhow::anyhow!("project has no scenes"))?;

    let output = match track {
        "screen" => json!({ "screen": track_edits(scene, Track::Screen) }),
        "camera" => json!({ "camera": track_edits(scene, Track::Camera) }),
        "both" => {
            let screen = track_edits(scene, Track::Screen);
            let camera = track_edits(scene, Track::Camera);
            let full_source = screen.is_full_source(bundle.video.duration_ms);
            json!({
                "screen": screen,
                "camera": camera,
                "fullSource": full_source,
            })
        }
        other => anyhow::bail!("unknown track {other:?} (expected screen, camera, or both)"),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
