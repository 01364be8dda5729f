//! Invariant-preserving edit operations.
//!
//! Every operation validates its full effect before touching the scene:
//! on refusal the scene is untouched, on success every invariant holds
//! again. Cuts and removals act positionally on both linked tracks;
//! trims act per-track. Layout edits repair coverage by extending a
//! neighbour and refuse results shorter than the minimum.

use recut_common::RecutError;
use recut_project_model::geometry::Point2D;
use recut_project_model::id::Id;
use recut_project_model::project::{
    Layout, LayoutType, Scene, Slice, Track, MIN_LAYOUT_MS, MIN_SLICE_MS,
};

use crate::time::{render_infos, round_half_even, total_output_duration};

/// A refused edit. The scene it targeted is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("invariant violation: {0}")]
    Invariant(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("out of range: {0}")]
    OutOfRange(String),
}

impl From<EditError> for RecutError {
    fn from(e: EditError) -> Self {
        match e {
            EditError::Invariant(m) => RecutError::invariant(m),
            EditError::NotFound(m) => RecutError::not_found(m),
            EditError::OutOfRange(m) => RecutError::out_of_range(m),
        }
    }
}

/// Field-wise update for a slice trim. `None` fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct SlicePatch {
    pub source_start_ms: Option<u64>,
    pub source_end_ms: Option<u64>,
    pub time_scale: Option<f64>,
    pub volume: Option<f64>,
    pub hide_cursor: Option<bool>,
    pub disable_cursor_smoothing: Option<bool>,
}

/// Field-wise update for a layout. `None` fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct LayoutPatch {
    pub start_time: Option<u64>,
    pub end_time: Option<u64>,
    pub layout_type: Option<LayoutType>,
    pub camera_size: Option<f64>,
    pub camera_position: Option<Point2D>,
}

/// Split the clip covering `t_out` on BOTH tracks.
///
/// Each track's slice is replaced by two slices meeting at the rounded
/// source time of the cut; all four replacement slices get fresh IDs.
/// Refused when either resulting slice on either track would be shorter
/// than the minimum. Total output duration is unchanged.
pub fn split_all_tracks_at(scene: &mut Scene, t_out: u64) -> Result<(), EditError> {
    if scene.screen_slices.is_empty() {
        return Err(EditError::NotFound("scene has no clips".to_string()));
    }
    if scene.screen_slices.len() != scene.camera_slices.len() {
        return Err(EditError::Invariant(
            "screen and camera tracks are out of step".to_string(),
        ));
    }

    let total = total_output_duration(&scene.screen_slices);
    if t_out == 0 || t_out >= total {
        return Err(EditError::OutOfRange(format!(
            "split time {t_out} outside (0, {total})"
        )));
    }

    let infos = render_infos(&scene.screen_slices);
    let pos = infos
        .iter()
        .position(|ri| t_out < ri.output_end)
        .unwrap_or(infos.len() - 1);

    // Plan both tracks before touching either.
    let screen_halves = plan_split(&scene.screen_slices, pos, t_out)?;
    let camera_halves = plan_split(&scene.camera_slices, pos, t_out)?;

    commit_split(&mut scene.screen_slices, pos, screen_halves);
    commit_split(&mut scene.camera_slices, pos, camera_halves);
    Ok(())
}

fn plan_split(slices: &[Slice], pos: usize, t_out: u64) -> Result<(Slice, Slice), EditError> {
    let infos = render_infos(slices);
    let info = infos
        .get(pos)
        .ok_or_else(|| EditError::NotFound(format!("no clip at position {pos}")))?;
    let slice = &slices[pos];

    let src_f =
        slice.source_start_ms as f64 + t_out.saturating_sub(info.output_start) as f64 * slice.time_scale;
    let src = round_half_even(src_f);

    // Both halves must keep the minimum source duration.
    let lo = slice.source_start_ms + MIN_SLICE_MS;
    let hi = slice.source_end_ms.saturating_sub(MIN_SLICE_MS);
    if slice.source_duration_ms() < 2 * MIN_SLICE_MS || src < lo || src > hi {
        return Err(EditError::Invariant(format!(
            "split at source {src} would leave a slice shorter than {MIN_SLICE_MS} ms"
        )));
    }

    let mut left = slice.clone();
    left.id = Id::new();
    left.source_end_ms = src;

    let mut right = slice.clone();
    right.id = Id::new();
    right.source_start_ms = src;

    Ok((left, right))
}

fn commit_split(slices: &mut Vec<Slice>, pos: usize, halves: (Slice, Slice)) {
    slices.splice(pos..=pos, [halves.0, halves.1]);
}

/// Remove the clip identified by any of its slice IDs from BOTH tracks.
/// Refused when a track would be left empty.
pub fn remove_clip(scene: &mut Scene, slice_id: Id) -> Result<(), EditError> {
    let pos = scene
        .clip_position(slice_id)
        .ok_or_else(|| EditError::NotFound(format!("slice {slice_id}")))?;

    if scene.screen_slices.len() <= 1 || scene.camera_slices.len() <= 1 {
        return Err(EditError::Invariant(
            "removing the last clip would leave a track empty".to_string(),
        ));
    }

    scene.screen_slices.remove(pos);
    if pos < scene.camera_slices.len() {
        scene.camera_slices.remove(pos);
    }
    normalize_layouts(scene);
    Ok(())
}

/// Trim, re-speed, or re-flag a single slice on one track.
/// Refused when the result would violate the slice invariant.
pub fn update_slice(
    scene: &mut Scene,
    track: Track,
    slice_id: Id,
    patch: &SlicePatch,
) -> Result<(), EditError> {
    let idx = scene
        .slices(track)
        .iter()
        .position(|s| s.id == slice_id)
        .ok_or_else(|| EditError::NotFound(format!("slice {slice_id} on {track:?} track")))?;

    let mut updated = scene.slices(track)[idx].clone();
    if let Some(v) = patch.source_start_ms {
        updated.source_start_ms = v;
    }
    if let Some(v) = patch.source_end_ms {
        updated.source_end_ms = v;
    }
    if let Some(v) = patch.time_scale {
        updated.time_scale = v;
    }
    if let Some(v) = patch.volume {
        updated.volume = v;
    }
    if let Some(v) = patch.hide_cursor {
        updated.hide_cursor = v;
    }
    if let Some(v) = patch.disable_cursor_smoothing {
        updated.disable_cursor_smoothing = v;
    }

    if !updated.is_valid() {
        return Err(EditError::Invariant(format!(
            "slice [{}, {}) at x{} violates the minimum-duration or speed bound",
            updated.source_start_ms, updated.source_end_ms, updated.time_scale
        )));
    }

    scene.slices_mut(track)[idx] = updated;
    normalize_layouts(scene);
    Ok(())
}

/// Move a slice positionally within one track.
pub fn reorder(scene: &mut Scene, track: Track, from: usize, to: usize) -> Result<(), EditError> {
    let len = scene.slices(track).len();
    if from >= len || to >= len {
        return Err(EditError::OutOfRange(format!(
            "reorder {from} -> {to} on a track of {len} clips"
        )));
    }
    if from != to {
        let slices = scene.slices_mut(track);
        let slice = slices.remove(from);
        slices.insert(to, slice);
    }
    Ok(())
}

/// Insert a layout interval, clipping whatever it overlaps.
///
/// Overlapped neighbours keep their identity on the left remainder; a
/// right remainder gets a fresh ID. Refused when any remainder would be
/// shorter than the minimum.
pub fn add_layout(scene: &mut Scene, layout: Layout) -> Result<(), EditError> {
    validate_layout_shape(&layout)?;
    let total = total_output_duration(&scene.screen_slices);
    if layout.end_time > total {
        return Err(EditError::OutOfRange(format!(
            "layout ends at {} past the timeline end {total}",
            layout.end_time
        )));
    }

    let mut next: Vec<Layout> = Vec::with_capacity(scene.layouts.len() + 1);
    for existing in &scene.layouts {
        // Left remainder
        if existing.start_time < layout.start_time {
            let end = existing.end_time.min(layout.start_time);
            if end > existing.start_time {
                let mut piece = existing.clone();
                piece.end_time = end;
                ensure_min_layout(&piece)?;
                next.push(piece);
            }
        }
        // Right remainder
        if existing.end_time > layout.end_time {
            let start = existing.start_time.max(layout.end_time);
            if start < existing.end_time {
                let mut piece = existing.clone();
                piece.start_time = start;
                if piece.start_time != existing.start_time {
                    piece.id = Id::new();
                }
                ensure_min_layout(&piece)?;
                next.push(piece);
            }
        }
    }
    next.push(layout);
    next.sort_by_key(|l| l.start_time);

    validate_layouts(&next, total).map_err(EditError::Invariant)?;
    scene.layouts = next;
    Ok(())
}

/// Update a layout in place, shifting neighbour boundaries to keep the
/// list contiguous. Boundary moves that would shrink any layout below
/// the minimum are refused; the outer edges of the timeline are fixed.
pub fn update_layout(
    scene: &mut Scene,
    layout_id: Id,
    patch: &LayoutPatch,
) -> Result<(), EditError> {
    let idx = scene
        .layouts
        .iter()
        .position(|l| l.id == layout_id)
        .ok_or_else(|| EditError::NotFound(format!("layout {layout_id}")))?;

    let total = total_output_duration(&scene.screen_slices);
    let mut next = scene.layouts.clone();

    if let Some(v) = patch.start_time {
        if idx == 0 && v != 0 {
            return Err(EditError::OutOfRange(
                "the first layout must start at 0".to_string(),
            ));
        }
        next[idx].start_time = v;
        if idx > 0 {
            next[idx - 1].end_time = v;
        }
    }
    if let Some(v) = patch.end_time {
        if idx == next.len() - 1 && v != total {
            return Err(EditError::OutOfRange(format!(
                "the last layout must end at the timeline end {total}"
            )));
        }
        next[idx].end_time = v;
        if idx + 1 < next.len() {
            next[idx + 1].start_time = v;
        }
    }
    if let Some(v) = patch.layout_type {
        next[idx].layout_type = v;
    }
    if let Some(v) = patch.camera_size {
        next[idx].camera_size = v;
    }
    if let Some(v) = patch.camera_position {
        next[idx].camera_position = v;
    }

    validate_layout_shape(&next[idx])?;
    for layout in &next {
        ensure_min_layout(layout)?;
    }
    validate_layouts(&next, total).map_err(EditError::Invariant)?;
    scene.layouts = next;
    Ok(())
}

/// Remove a layout, extending a neighbour to fill the gap.
/// The only layout of a scene cannot be removed.
pub fn remove_layout(scene: &mut Scene, layout_id: Id) -> Result<(), EditError> {
    let idx = scene
        .layouts
        .iter()
        .position(|l| l.id == layout_id)
        .ok_or_else(|| EditError::NotFound(format!("layout {layout_id}")))?;

    if scene.layouts.len() == 1 {
        return Err(EditError::Invariant(
            "a scene keeps at least one layout".to_string(),
        ));
    }

    let removed = scene.layouts.remove(idx);
    if idx > 0 {
        scene.layouts[idx - 1].end_time = removed.end_time;
    } else {
        scene.layouts[0].start_time = removed.start_time;
    }
    Ok(())
}

/// Split the layout covering `t_out` into two. The left half keeps the
/// layout's identity; the right half gets a fresh ID and the same
/// composition. Refused when either half would be below the minimum.
pub fn split_layout_at(scene: &mut Scene, t_out: u64) -> Result<(), EditError> {
    let idx = scene
        .layouts
        .iter()
        .position(|l| l.start_time <= t_out && t_out < l.end_time)
        .ok_or_else(|| EditError::OutOfRange(format!("no layout covers {t_out}")))?;

    let layout = &scene.layouts[idx];
    if t_out < layout.start_time + MIN_LAYOUT_MS
        || t_out + MIN_LAYOUT_MS > layout.end_time
    {
        return Err(EditError::Invariant(format!(
            "layout split at {t_out} would leave a piece shorter than {MIN_LAYOUT_MS} ms"
        )));
    }

    let mut right = layout.clone();
    right.id = Id::new();
    right.start_time = t_out;
    scene.layouts[idx].end_time = t_out;
    scene.layouts.insert(idx + 1, right);
    Ok(())
}

fn validate_layout_shape(layout: &Layout) -> Result<(), EditError> {
    if layout.end_time <= layout.start_time {
        return Err(EditError::Invariant(format!(
            "layout [{}, {}) is empty or inverted",
            layout.start_time, layout.end_time
        )));
    }
    ensure_min_layout(layout)?;
    if !(layout.camera_size > 0.0 && layout.camera_size <= 1.0) {
        return Err(EditError::Invariant(format!(
            "camera size {} outside (0, 1]",
            layout.camera_size
        )));
    }
    Ok(())
}

fn ensure_min_layout(layout: &Layout) -> Result<(), EditError> {
    if layout.duration_ms() < MIN_LAYOUT_MS {
        return Err(EditError::Invariant(format!(
            "layout [{}, {}) shorter than {MIN_LAYOUT_MS} ms",
            layout.start_time, layout.end_time
        )));
    }
    Ok(())
}

/// Check that a layout list is contiguous and covers `[0, total]`.
/// Returns the first problem found.
pub fn validate_layouts(layouts: &[Layout], total: u64) -> Result<(), String> {
    if total == 0 {
        return Ok(());
    }
    let Some(first) = layouts.first() else {
        return Err("no layouts cover the timeline".to_string());
    };
    if first.start_time != 0 {
        return Err(format!("first layout starts at {}", first.start_time));
    }
    for pair in layouts.windows(2) {
        if pair[0].end_time != pair[1].start_time {
            return Err(format!(
                "gap or overlap between {} and {}",
                pair[0].end_time, pair[1].start_time
            ));
        }
    }
    if let Some(last) = layouts.last() {
        if last.end_time != total {
            return Err(format!(
                "last layout ends at {} instead of {total}",
                last.end_time
            ));
        }
    }
    Ok(())
}

/// Re-fit the layout list after a slice edit changed the output
/// duration: clip to the new end, chain starts to ends, extend the last
/// layout, and fold sub-minimum fragments into their neighbour.
pub fn normalize_layouts(scene: &mut Scene) {
    let total = total_output_duration(&scene.screen_slices);
    if total == 0 {
        scene.layouts.clear();
        return;
    }

    let mut repaired: Vec<Layout> = Vec::with_capacity(scene.layouts.len());
    let mut cursor = 0u64;
    for mut layout in scene.layouts.drain(..) {
        if cursor >= total {
            break;
        }
        layout.start_time = cursor;
        layout.end_time = layout.end_time.clamp(cursor, total);
        if layout.end_time <= layout.start_time {
            continue;
        }
        cursor = layout.end_time;
        repaired.push(layout);
    }

    match repaired.last_mut() {
        Some(last) => last.end_time = total,
        None => {
            scene
                .layouts
                .push(Layout::spanning(0, total, LayoutType::ScreenWithCamera));
            return;
        }
    }

    // Fold fragments shorter than the minimum into the layout before
    // them (or after, for a leading fragment).
    let mut merged: Vec<Layout> = Vec::with_capacity(repaired.len());
    for layout in repaired {
        if layout.duration_ms() < MIN_LAYOUT_MS {
            if let Some(prev) = merged.last_mut() {
                prev.end_time = layout.end_time;
                continue;
            }
        }
        merged.push(layout);
    }
    if merged.len() >= 2 && merged[0].duration_ms() < MIN_LAYOUT_MS {
        merged[1].start_time = merged[0].start_time;
        merged.remove(0);
    }

    scene.layouts = merged;
}

/// Human-readable invariant report for a scene, empty when healthy.
pub fn validate_scene(scene: &Scene) -> Vec<String> {
    let mut problems = Vec::new();

    if scene.screen_slices.is_empty() {
        problems.push("screen track has no slices".to_string());
    }
    if scene.screen_slices.len() != scene.camera_slices.len() {
        problems.push(format!(
            "track lengths differ: {} screen vs {} camera",
            scene.screen_slices.len(),
            scene.camera_slices.len()
        ));
    }
    for (track, slices) in [
        ("screen", &scene.screen_slices),
        ("camera", &scene.camera_slices),
    ] {
        for slice in slices {
            if !slice.is_valid() {
                problems.push(format!(
                    "{track} slice {} [{}, {}) at x{} is invalid",
                    slice.id, slice.source_start_ms, slice.source_end_ms, slice.time_scale
                ));
            }
        }
    }

    let total = total_output_duration(&scene.screen_slices);
    if let Err(problem) = validate_layouts(&scene.layouts, total) {
        problems.push(problem);
    }

    problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use recut_project_model::project::Project;

    fn test_scene(duration_ms: u64) -> Scene {
        let project = Project::from_recording("edit", duration_ms);
        (**project.active_scene().unwrap()).clone()
    }

    #[test]
    fn test_split_creates_fresh_ids_on_both_tracks() {
        let mut scene = test_scene(10_000);
        let old_screen_id = scene.screen_slices[0].id;
        let old_camera_id = scene.camera_slices[0].id;

        split_all_tracks_at(&mut scene, 4_000).unwrap();

        assert_eq!(scene.screen_slices.len(), 2);
        assert_eq!(scene.camera_slices.len(), 2);
        assert_eq!(scene.screen_slices[0].source_end_ms, 4_000);
        assert_eq!(scene.screen_slices[1].source_start_ms, 4_000);
        for slice in scene.screen_slices.iter().chain(&scene.camera_slices) {
            assert_ne!(slice.id, old_screen_id);
            assert_ne!(slice.id, old_camera_id);
        }
        assert_eq!(total_output_duration(&scene.screen_slices), 10_000);
        assert_eq!(total_output_duration(&scene.camera_slices), 10_000);
    }

    #[test]
    fn test_split_refused_near_edges() {
        let mut scene = test_scene(10_000);
        assert!(split_all_tracks_at(&mut scene, 50).is_err());
        assert!(split_all_tracks_at(&mut scene, 9_950).is_err());
        assert!(split_all_tracks_at(&mut scene, 0).is_err());
        assert!(split_all_tracks_at(&mut scene, 10_000).is_err());
        // Refusals leave the scene untouched
        assert_eq!(scene.screen_slices.len(), 1);
    }

    #[test]
    fn test_split_accounts_for_time_scale() {
        let mut scene = test_scene(10_000);
        scene.screen_slices[0].time_scale = 2.0;
        scene.camera_slices[0].time_scale = 2.0;

        // Output covers [0, 5000); splitting at 2500 cuts source at 5000
        split_all_tracks_at(&mut scene, 2_500).unwrap();
        assert_eq!(scene.screen_slices[0].source_end_ms, 5_000);
        assert_eq!(scene.camera_slices[1].source_start_ms, 5_000);
    }

    #[test]
    fn test_remove_clip_acts_on_both_tracks() {
        let mut scene = test_scene(10_000);
        split_all_tracks_at(&mut scene, 4_000).unwrap();

        let first_screen_id = scene.screen_slices[0].id;
        remove_clip(&mut scene, first_screen_id).unwrap();

        assert_eq!(scene.screen_slices.len(), 1);
        assert_eq!(scene.camera_slices.len(), 1);
        assert_eq!(scene.screen_slices[0].source_start_ms, 4_000);
        assert_eq!(total_output_duration(&scene.screen_slices), 6_000);
    }

    #[test]
    fn test_remove_clip_by_camera_id() {
        let mut scene = test_scene(10_000);
        split_all_tracks_at(&mut scene, 4_000).unwrap();

        let second_camera_id = scene.camera_slices[1].id;
        remove_clip(&mut scene, second_camera_id).unwrap();
        assert_eq!(scene.screen_slices.len(), 1);
        assert_eq!(scene.screen_slices[0].source_end_ms, 4_000);
    }

    #[test]
    fn test_remove_last_clip_refused() {
        let mut scene = test_scene(10_000);
        let id = scene.screen_slices[0].id;
        let err = remove_clip(&mut scene, id).unwrap_err();
        assert!(matches!(err, EditError::Invariant(_)));
        assert_eq!(scene.screen_slices.len(), 1);
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut scene = test_scene(10_000);
        assert!(matches!(
            remove_clip(&mut scene, Id::new()),
            Err(EditError::NotFound(_))
        ));
    }

    #[test]
    fn test_update_slice_speed_shrinks_layouts() {
        let mut scene = test_scene(10_000);
        let id = scene.screen_slices[0].id;

        let patch = SlicePatch {
            time_scale: Some(2.0),
            ..Default::default()
        };
        update_slice(&mut scene, Track::Screen, id, &patch).unwrap();

        assert_eq!(total_output_duration(&scene.screen_slices), 5_000);
        assert_eq!(scene.layouts.last().unwrap().end_time, 5_000);
        assert!(validate_layouts(&scene.layouts, 5_000).is_ok());
    }

    #[test]
    fn test_update_slice_refuses_invalid_trim() {
        let mut scene = test_scene(10_000);
        let id = scene.screen_slices[0].id;

        let patch = SlicePatch {
            source_end_ms: Some(50),
            ..Default::default()
        };
        let err = update_slice(&mut scene, Track::Screen, id, &patch).unwrap_err();
        assert!(matches!(err, EditError::Invariant(_)));
        assert_eq!(scene.screen_slices[0].source_end_ms, 10_000);
    }

    #[test]
    fn test_update_slice_is_per_track() {
        let mut scene = test_scene(10_000);
        let id = scene.camera_slices[0].id;

        let patch = SlicePatch {
            source_start_ms: Some(500),
            ..Default::default()
        };
        update_slice(&mut scene, Track::Camera, id, &patch).unwrap();

        assert_eq!(scene.camera_slices[0].source_start_ms, 500);
        assert_eq!(scene.screen_slices[0].source_start_ms, 0);
    }

    #[test]
    fn test_reorder_moves_within_one_track() {
        let mut scene = test_scene(10_000);
        split_all_tracks_at(&mut scene, 4_000).unwrap();
        let first = scene.screen_slices[0].id;

        reorder(&mut scene, Track::Screen, 0, 1).unwrap();
        assert_eq!(scene.screen_slices[1].id, first);

        assert!(matches!(
            reorder(&mut scene, Track::Screen, 0, 5),
            Err(EditError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_split_layout_and_update() {
        let mut scene = test_scene(10_000);
        split_layout_at(&mut scene, 4_000).unwrap();
        assert_eq!(scene.layouts.len(), 2);
        assert!(validate_layouts(&scene.layouts, 10_000).is_ok());

        let second = scene.layouts[1].id;
        update_layout(
            &mut scene,
            second,
            &LayoutPatch {
                layout_type: Some(LayoutType::SideBySide),
                start_time: Some(3_000),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(scene.layouts[0].end_time, 3_000);
        assert_eq!(scene.layouts[1].layout_type, LayoutType::SideBySide);
        assert!(validate_layouts(&scene.layouts, 10_000).is_ok());
    }

    #[test]
    fn test_update_layout_refuses_sub_minimum_neighbour() {
        let mut scene = test_scene(10_000);
        split_layout_at(&mut scene, 4_000).unwrap();
        let second = scene.layouts[1].id;

        let err = update_layout(
            &mut scene,
            second,
            &LayoutPatch {
                start_time: Some(50),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, EditError::Invariant(_)));
        assert_eq!(scene.layouts[0].end_time, 4_000);
    }

    #[test]
    fn test_remove_layout_extends_neighbour() {
        let mut scene = test_scene(10_000);
        split_layout_at(&mut scene, 4_000).unwrap();
        let second = scene.layouts[1].id;

        remove_layout(&mut scene, second).unwrap();
        assert_eq!(scene.layouts.len(), 1);
        assert_eq!(scene.layouts[0].end_time, 10_000);
        assert!(validate_layouts(&scene.layouts, 10_000).is_ok());
    }

    #[test]
    fn test_remove_only_layout_refused() {
        let mut scene = test_scene(10_000);
        let only = scene.layouts[0].id;
        assert!(matches!(
            remove_layout(&mut scene, only),
            Err(EditError::Invariant(_))
        ));
    }

    #[test]
    fn test_add_layout_clips_overlaps() {
        let mut scene = test_scene(10_000);
        let mut layout = Layout::spanning(2_000, 6_000, LayoutType::CameraOnly);
        layout.camera_size = 0.5;
        add_layout(&mut scene, layout).unwrap();

        assert_eq!(scene.layouts.len(), 3);
        assert_eq!(scene.layouts[0].end_time, 2_000);
        assert_eq!(scene.layouts[1].layout_type, LayoutType::CameraOnly);
        assert_eq!(scene.layouts[2].start_time, 6_000);
        assert!(validate_layouts(&scene.layouts, 10_000).is_ok());
    }

    #[test]
    fn test_add_layout_refuses_sub_minimum_remainder() {
        let mut scene = test_scene(10_000);
        let layout = Layout::spanning(50, 6_000, LayoutType::CameraOnly);
        assert!(matches!(
            add_layout(&mut scene, layout),
            Err(EditError::Invariant(_))
        ));
        assert_eq!(scene.layouts.len(), 1);
    }

    #[test]
    fn test_normalize_layouts_after_shrink() {
        let mut scene = test_scene(10_000);
        split_layout_at(&mut scene, 9_950).unwrap_err();
        split_layout_at(&mut scene, 8_000).unwrap();

        // Shrinking the timeline below the second layout's start folds it away
        let id = scene.screen_slices[0].id;
        update_slice(
            &mut scene,
            Track::Screen,
            id,
            &SlicePatch {
                source_end_ms: Some(5_000),
                ..Default::default()
            },
        )
        .unwrap();

        assert!(validate_layouts(&scene.layouts, 5_000).is_ok());
    }

    #[test]
    fn test_validate_scene_reports_problems() {
        let mut scene = test_scene(10_000);
        assert!(validate_scene(&scene).is_empty());

        scene.camera_slices.clear();
        let problems = validate_scene(&scene);
        assert!(problems.iter().any(|p| p.contains("track lengths differ")));
    }
}
