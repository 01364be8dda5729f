pub mod edl;
pub mod frames;
pub mod info;
pub mod validate;

use std::path::Path;

use recut_project_model::bundle::RecordingBundle;
use recut_project_model::persist::{self, RECORDING_DIR};
use recut_project_model::project::Project;

/// Open a project bundle: load the recording, then the saved project —
/// or seed a default one when the bundle has not been edited yet.
pub(crate) fn open(path: &Path) -> anyhow::Result<(Project, RecordingBundle)> {
    let bundle = RecordingBundle::load(path.join(RECORDING_DIR))
        .map_err(|e| anyhow::anyhow!("Failed to load recording: {e}"))?;

    let project = if persist::is_valid_bundle(path) {
        persist::read_project(path).map_err(|e| anyhow::anyhow!("Failed to load project: {e}"))?
    } else {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_string());
        tracing::info!("No project.json yet, seeding a default edit");
        Project::from_recording(name, bundle.video.duration_ms)
    };

    Ok((project, bundle))
}
