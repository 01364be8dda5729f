//! Project bundle read/write operations.
//!
//! A project bundle is a directory containing:
//! - `project.json` — project configuration and scenes
//! - `meta.json`    — format version and timestamps
//! - `markers.json` — user-defined markers (optional)
//! - `recording/`   — the immutable recording bundle
//!
//! The engine core never writes during editing; the auto-persist
//! collaborator debounces `project_changed` signals and calls
//! [`write_project`] with the latest snapshot.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use recut_common::{RecutError, RecutResult};

use crate::project::{Marker, Project};

/// Subdirectory holding the recording bundle.
pub const RECORDING_DIR: &str = "recording";

/// `meta.json` contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMeta {
    pub version: String,
    pub format: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for ProjectMeta {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "recut-v1".to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Read a project from a bundle directory.
pub fn read_project(bundle_path: &Path) -> RecutResult<Project> {
    if !bundle_path.is_dir() {
        return Err(RecutError::bundle_invalid("path is not a directory"));
    }

    let project_path = bundle_path.join("project.json");
    if !project_path.exists() {
        return Err(RecutError::not_found("project.json"));
    }

    let content = std::fs::read_to_string(&project_path)?;
    let project: Project = serde_json::from_str(&content)?;

    tracing::debug!("Loaded project '{}' from {:?}", project.name, bundle_path);

    Ok(project)
}

/// Read project metadata from a bundle.
pub fn read_meta(bundle_path: &Path) -> RecutResult<ProjectMeta> {
    let meta_path = bundle_path.join("meta.json");
    if !meta_path.exists() {
        return Err(RecutError::not_found("meta.json"));
    }

    let content = std::fs::read_to_string(&meta_path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Read markers from a bundle. Markers are optional; a missing file
/// yields an empty list.
pub fn read_markers(bundle_path: &Path) -> RecutResult<Vec<Marker>> {
    let markers_path = bundle_path.join("markers.json");
    if !markers_path.exists() {
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(&markers_path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write a project to a bundle directory, creating it if needed.
pub fn write_project(project: &Project, bundle_path: &Path) -> RecutResult<()> {
    if !bundle_path.exists() {
        std::fs::create_dir_all(bundle_path)?;
    }
    let recording_path = bundle_path.join(RECORDING_DIR);
    if !recording_path.exists() {
        std::fs::create_dir_all(&recording_path)?;
    }

    let project_content = serde_json::to_string_pretty(project)?;
    std::fs::write(bundle_path.join("project.json"), project_content)?;

    let meta = ProjectMeta::default();
    let meta_content = serde_json::to_string_pretty(&meta)?;
    std::fs::write(bundle_path.join("meta.json"), meta_content)?;

    let markers_path = bundle_path.join("markers.json");
    if !markers_path.exists() {
        std::fs::write(&markers_path, "[]")?;
    }

    tracing::debug!("Saved project '{}' to {:?}", project.name, bundle_path);

    Ok(())
}

/// Write markers to a bundle.
pub fn write_markers(markers: &[Marker], bundle_path: &Path) -> RecutResult<()> {
    let content = serde_json::to_string_pretty(markers)?;
    std::fs::write(bundle_path.join("markers.json"), content)?;
    Ok(())
}

/// Check if a path is a valid project bundle.
pub fn is_valid_bundle(path: &Path) -> bool {
    path.is_dir() && path.join("project.json").exists()
}
