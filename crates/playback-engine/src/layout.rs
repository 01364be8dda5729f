//! Layout resolution: output-time lookup and pixel rect computation.

use recut_project_model::geometry::Rect;
use recut_project_model::id::Id;
use recut_project_model::project::{Layout, LayoutType};

/// Inner gap between the two halves of a side-by-side layout.
pub const SIDE_BY_SIDE_GAP_PX: f64 = 8.0;

/// Minimum distance the camera bubble keeps from the viewport edges.
pub const CAMERA_EDGE_PADDING_PX: f64 = 16.0;

/// Resolved composition for one frame: where screen and camera land in
/// the viewport. `None` means the element is not visible.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutRenderInfo {
    pub layout_id: Id,
    pub layout_type: LayoutType,
    pub screen: Option<Rect>,
    pub camera: Option<Rect>,
}

/// The layout covering `t_out`.
///
/// Intervals are half-open; the final layout additionally covers the
/// exact end of the timeline so a clamped seek to the end still
/// resolves.
pub fn find_layout_at(layouts: &[Layout], t_out: u64) -> Option<&Layout> {
    let idx = layouts.partition_point(|l| l.start_time <= t_out);
    if idx == 0 {
        return None;
    }
    let layout = &layouts[idx - 1];
    if t_out < layout.end_time || idx == layouts.len() {
        Some(layout)
    } else {
        None
    }
}

/// Compute screen and camera rects for a layout in a viewport.
///
/// `camera_aspect` is the webcam's native width-over-height; the
/// picture-in-picture bubble derives its height from it.
pub fn resolve_layout(
    layout: &Layout,
    viewport_w: f64,
    viewport_h: f64,
    camera_aspect: f64,
) -> LayoutRenderInfo {
    let full = Rect::new(0.0, 0.0, viewport_w, viewport_h);

    let (screen, camera) = match layout.layout_type {
        LayoutType::ScreenOnly => (Some(full), None),
        LayoutType::CameraOnly => (None, Some(full)),
        LayoutType::SideBySide => {
            let half_w = (viewport_w - SIDE_BY_SIDE_GAP_PX) / 2.0;
            (
                Some(Rect::new(0.0, 0.0, half_w, viewport_h)),
                Some(Rect::new(
                    half_w + SIDE_BY_SIDE_GAP_PX,
                    0.0,
                    half_w,
                    viewport_h,
                )),
            )
        }
        LayoutType::ScreenWithCamera => {
            let w = (layout.camera_size * viewport_w).max(1.0);
            let h = w / camera_aspect.max(f64::EPSILON);
            let cx = layout.camera_position.x * viewport_w;
            let cy = layout.camera_position.y * viewport_h;

            let pad = CAMERA_EDGE_PADDING_PX;
            let x = clamp_low_priority(cx - w / 2.0, pad, viewport_w - pad - w);
            let y = clamp_low_priority(cy - h / 2.0, pad, viewport_h - pad - h);
            (Some(full), Some(Rect::new(x, y, w, h)))
        }
    };

    LayoutRenderInfo {
        layout_id: layout.id,
        layout_type: layout.layout_type,
        screen,
        camera,
    }
}

/// Clamp with the lower bound winning when the range is inverted
/// (a camera bubble wider than the padded viewport pins to the left).
fn clamp_low_priority(value: f64, lo: f64, hi: f64) -> f64 {
    value.min(hi).max(lo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use recut_project_model::geometry::Point2D;

    fn layouts() -> Vec<Layout> {
        vec![
            Layout {
                id: Id::new(),
                start_time: 0,
                end_time: 4_000,
                layout_type: LayoutType::ScreenOnly,
                camera_size: 0.25,
                camera_position: Point2D::new(0.85, 0.85),
            },
            Layout {
                id: Id::new(),
                start_time: 4_000,
                end_time: 10_000,
                layout_type: LayoutType::SideBySide,
                camera_size: 0.25,
                camera_position: Point2D::new(0.85, 0.85),
            },
        ]
    }

    #[test]
    fn test_find_layout_at_boundary() {
        let layouts = layouts();
        assert_eq!(
            find_layout_at(&layouts, 3_999).unwrap().layout_type,
            LayoutType::ScreenOnly
        );
        assert_eq!(
            find_layout_at(&layouts, 4_000).unwrap().layout_type,
            LayoutType::SideBySide
        );
        // The final layout covers the exact timeline end
        assert_eq!(
            find_layout_at(&layouts, 10_000).unwrap().layout_type,
            LayoutType::SideBySide
        );
    }

    #[test]
    fn test_side_by_side_rects() {
        let layouts = layouts();
        let info = resolve_layout(&layouts[1], 1_600.0, 900.0, 16.0 / 9.0);

        let screen = info.screen.unwrap();
        assert_eq!(screen, Rect::new(0.0, 0.0, 796.0, 900.0));

        let camera = info.camera.unwrap();
        assert_eq!(camera, Rect::new(804.0, 0.0, 796.0, 900.0));
    }

    #[test]
    fn test_screen_only_hides_camera() {
        let layouts = layouts();
        let info = resolve_layout(&layouts[0], 1_600.0, 900.0, 16.0 / 9.0);
        assert!(info.camera.is_none());
        assert_eq!(info.screen.unwrap(), Rect::new(0.0, 0.0, 1_600.0, 900.0));
    }

    #[test]
    fn test_camera_only_hides_screen() {
        let mut layout = layouts()[0].clone();
        layout.layout_type = LayoutType::CameraOnly;
        let info = resolve_layout(&layout, 1_600.0, 900.0, 16.0 / 9.0);
        assert!(info.screen.is_none());
        assert_eq!(info.camera.unwrap(), Rect::new(0.0, 0.0, 1_600.0, 900.0));
    }

    #[test]
    fn test_pip_camera_size_and_aspect() {
        let mut layout = layouts()[0].clone();
        layout.layout_type = LayoutType::ScreenWithCamera;
        layout.camera_size = 0.25;
        layout.camera_position = Point2D::new(0.5, 0.5);

        let info = resolve_layout(&layout, 1_600.0, 900.0, 4.0 / 3.0);
        let camera = info.camera.unwrap();
        assert_eq!(camera.w, 400.0);
        assert_eq!(camera.h, 300.0);
        // Centered placement
        assert_eq!(camera.x, 600.0);
        assert_eq!(camera.y, 300.0);
    }

    #[test]
    fn test_pip_camera_clamps_to_padded_interior() {
        let mut layout = layouts()[0].clone();
        layout.layout_type = LayoutType::ScreenWithCamera;
        layout.camera_size = 0.25;
        layout.camera_position = Point2D::new(1.0, 1.0);

        let info = resolve_layout(&layout, 1_600.0, 900.0, 16.0 / 9.0);
        let camera = info.camera.unwrap();
        assert_eq!(camera.x, 1_600.0 - CAMERA_EDGE_PADDING_PX - camera.w);
        assert_eq!(camera.y, 900.0 - CAMERA_EDGE_PADDING_PX - camera.h);
    }

    #[test]
    fn test_find_layout_empty_list() {
        assert!(find_layout_at(&[], 0).is_none());
    }
}
