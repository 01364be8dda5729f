//! Small geometry types shared by the schema and the layout resolver.

use serde::{Deserialize, Serialize};

/// A 2D point. Normalized `[0, 1]` when used for camera placement,
/// pixels when used for raw cursor samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation between two points.
    pub fn lerp(a: &Point2D, b: &Point2D, t: f64) -> Point2D {
        let t = t.clamp(0.0, 1.0);
        Point2D {
            x: a.x + (b.x - a.x) * t,
            y: a.y + (b.y - a.y) * t,
        }
    }
}

/// An axis-aligned rectangle in output pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Centre point of the rectangle.
    pub fn center(&self) -> Point2D {
        Point2D::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(1.0, 2.0);

        assert_eq!(Point2D::lerp(&a, &b, 0.0), a);
        assert_eq!(Point2D::lerp(&a, &b, 1.0), b);

        let mid = Point2D::lerp(&a, &b, 0.5);
        assert!((mid.x - 0.5).abs() < 1e-9);
        assert!((mid.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_lerp_clamps_factor() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(1.0, 1.0);
        assert_eq!(Point2D::lerp(&a, &b, 2.0), b);
        assert_eq!(Point2D::lerp(&a, &b, -1.0), a);
    }

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        let c = rect.center();
        assert!((c.x - 60.0).abs() < 1e-9);
        assert!((c.y - 45.0).abs() < 1e-9);
    }
}
