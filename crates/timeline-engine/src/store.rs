//! Single-writer project state with immutable snapshots.
//!
//! The store owns the authoritative project tree. Every successful edit
//! clones the tree, mutates exactly one scene behind its `Arc`, and
//! republishes; scenes the edit did not touch are shared between the
//! old and new snapshots. Readers clone the current `Arc` and can keep
//! it for as long as they like — a stale snapshot stays internally
//! consistent.

use std::sync::Arc;

use recut_common::RecutResult;
use recut_project_model::geometry::Point2D;
use recut_project_model::id::Id;
use recut_project_model::project::{Layout, Project, Scene, Track};

use crate::edit::{self, EditError, LayoutPatch, SlicePatch};

/// Called with `(old, new)` after every successful edit.
pub type SnapshotListener = Box<dyn Fn(&Arc<Project>, &Arc<Project>) + Send>;

/// Owner of the authoritative project tree.
pub struct ProjectStore {
    current: Arc<Project>,
    listeners: Vec<SnapshotListener>,
}

impl ProjectStore {
    pub fn new(project: Project) -> Self {
        Self {
            current: Arc::new(project),
            listeners: Vec::new(),
        }
    }

    /// Seed a store from a recording: one default scene, full-duration
    /// slices on both tracks, one full-duration layout.
    pub fn from_recording(name: impl Into<String>, duration_ms: u64) -> Self {
        Self::new(Project::from_recording(name, duration_ms))
    }

    /// Deserialize a store from an opaque project value.
    pub fn from_bytes(bytes: &[u8]) -> RecutResult<Self> {
        let project: Project = serde_json::from_slice(bytes)?;
        Ok(Self::new(project))
    }

    /// The current immutable snapshot.
    pub fn snapshot(&self) -> Arc<Project> {
        Arc::clone(&self.current)
    }

    /// Serialize the current snapshot to an opaque project value.
    pub fn to_bytes(&self) -> RecutResult<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self.current.as_ref())?)
    }

    /// Register a listener for `project_changed` notifications.
    pub fn subscribe(&mut self, listener: SnapshotListener) {
        self.listeners.push(listener);
    }

    /// Apply an edit closure to one scene, atomically.
    ///
    /// The closure runs against a private clone; a refusal drops the
    /// clone and the published snapshot is untouched. On success the new
    /// snapshot is published and listeners run with `(old, new)`.
    pub fn edit_scene<F>(&mut self, scene_id: Id, op: F) -> Result<Arc<Project>, EditError>
    where
        F: FnOnce(&mut Scene) -> Result<(), EditError>,
    {
        let mut next = (*self.current).clone();
        let slot = next
            .scenes
            .iter_mut()
            .find(|s| s.id == scene_id)
            .ok_or_else(|| EditError::NotFound(format!("scene {scene_id}")))?;

        op(Arc::make_mut(slot))?;

        let old = std::mem::replace(&mut self.current, Arc::new(next));
        tracing::debug!(scene = %scene_id, "Published project snapshot");
        for listener in &self.listeners {
            listener(&old, &self.current);
        }
        Ok(self.snapshot())
    }

    pub fn split_all_tracks_at(
        &mut self,
        scene_id: Id,
        t_out: u64,
    ) -> Result<Arc<Project>, EditError> {
        self.edit_scene(scene_id, |scene| edit::split_all_tracks_at(scene, t_out))
    }

    pub fn remove_clip(&mut self, scene_id: Id, slice_id: Id) -> Result<Arc<Project>, EditError> {
        self.edit_scene(scene_id, |scene| edit::remove_clip(scene, slice_id))
    }

    pub fn update_slice(
        &mut self,
        scene_id: Id,
        track: Track,
        slice_id: Id,
        patch: SlicePatch,
    ) -> Result<Arc<Project>, EditError> {
        self.edit_scene(scene_id, |scene| {
            edit::update_slice(scene, track, slice_id, &patch)
        })
    }

    pub fn reorder(
        &mut self,
        scene_id: Id,
        track: Track,
        from: usize,
        to: usize,
    ) -> Result<Arc<Project>, EditError> {
        self.edit_scene(scene_id, |scene| edit::reorder(scene, track, from, to))
    }

    pub fn add_layout(&mut self, scene_id: Id, layout: Layout) -> Result<Arc<Project>, EditError> {
        self.edit_scene(scene_id, |scene| edit::add_layout(scene, layout))
    }

    pub fn update_layout(
        &mut self,
        scene_id: Id,
        layout_id: Id,
        patch: LayoutPatch,
    ) -> Result<Arc<Project>, EditError> {
        self.edit_scene(scene_id, |scene| {
            edit::update_layout(scene, layout_id, &patch)
        })
    }

    pub fn remove_layout(&mut self, scene_id: Id, layout_id: Id) -> Result<Arc<Project>, EditError> {
        self.edit_scene(scene_id, |scene| edit::remove_layout(scene, layout_id))
    }

    pub fn split_layout_at(&mut self, scene_id: Id, t_out: u64) -> Result<Arc<Project>, EditError> {
        self.edit_scene(scene_id, |scene| edit::split_layout_at(scene, t_out))
    }

    /// Move the camera bubble of a layout.
    pub fn place_camera(
        &mut self,
        scene_id: Id,
        layout_id: Id,
        size: f64,
        position: Point2D,
    ) -> Result<Arc<Project>, EditError> {
        self.update_layout(
            scene_id,
            layout_id,
            LayoutPatch {
                camera_size: Some(size),
                camera_position: Some(position),
                ..Default::default()
            },
        )
    }
}
