//! Core geometry types and polygon tests.
//!
//! Everything persisted lives in *normalized image space*: both components
//! in `[0, 1]` relative to the image's own width and height. Screen-space
//! values use the same [`Point`] type but are only ever produced by the
//! [`crate::viewport`] module.

use serde::{Deserialize, Serialize};

use crate::constants::geometry::DEGENERATE_EDGE_EPSILON;
use crate::constants::MIN_POLYGON_VERTICES;

// ============================================================================
// Core Geometry Types
// ============================================================================

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise offset.
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// Width and height, in pixels for canvases and images.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True if either dimension is zero, negative or not finite.
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(f64::from(width), f64::from(height))
    }
}

/// An axis-aligned rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top-left corner X coordinate
    pub x: f64,
    /// Top-left corner Y coordinate
    pub y: f64,
    /// Width of the rectangle
    pub width: f64,
    /// Height of the rectangle
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Map a normalized point to a point inside this rectangle.
    pub fn to_screen(&self, normalized: Point) -> Point {
        Point::new(
            self.x + normalized.x * self.width,
            self.y + normalized.y * self.height,
        )
    }

    /// Exact inverse of [`Rect::to_screen`].
    ///
    /// Returns `None` for a zero-area rectangle, where no inverse exists.
    pub fn to_normalized(&self, screen: Point) -> Option<Point> {
        if self.size().is_empty() {
            return None;
        }
        Some(Point::new(
            (screen.x - self.x) / self.width,
            (screen.y - self.y) / self.height,
        ))
    }
}

// ============================================================================
// Polygon Tests
// ============================================================================

/// Even-odd ray casting test.
///
/// A horizontal ray at `point.y` is cast towards +x and edge crossings are
/// counted. Horizontal edges get a tiny substitute denominator so they never
/// divide by zero; the `(yi > y) != (yj > y)` guard already excludes them.
pub fn point_in_polygon(point: &Point, vertices: &[Point]) -> bool {
    if vertices.len() < MIN_POLYGON_VERTICES {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let vi = &vertices[i];
        let vj = &vertices[j];

        if (vi.y > point.y) != (vj.y > point.y) {
            let mut denominator = vj.y - vi.y;
            if denominator == 0.0 {
                denominator = DEGENERATE_EDGE_EPSILON;
            }
            let x_intersection = (vj.x - vi.x) * (point.y - vi.y) / denominator + vi.x;
            if point.x < x_intersection {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}

/// Arithmetic mean of the vertices.
///
/// This is not the area-weighted centroid; it is only used to place labels.
pub fn centroid(vertices: &[Point]) -> Option<Point> {
    if vertices.is_empty() {
        return None;
    }
    let n = vertices.len() as f64;
    let (sx, sy) = vertices
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sx / n, sy / n))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn unit_square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_square_contains() {
        let square = unit_square();
        assert!(point_in_polygon(&Point::new(0.5, 0.5), &square));
        assert!(!point_in_polygon(&Point::new(1.5, 0.5), &square));
        assert!(!point_in_polygon(&Point::new(0.5, -0.1), &square));
    }

    #[test]
    fn test_concave_polygon() {
        // U shape open at the top
        let u = vec![
            Point::new(0.0, 0.0),
            Point::new(0.3, 0.0),
            Point::new(0.3, 0.7),
            Point::new(0.7, 0.7),
            Point::new(0.7, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        assert!(point_in_polygon(&Point::new(0.1, 0.5), &u));
        assert!(point_in_polygon(&Point::new(0.5, 0.9), &u));
        // Inside the notch
        assert!(!point_in_polygon(&Point::new(0.5, 0.3), &u));
    }

    #[test]
    fn test_horizontal_edges_are_non_crossing() {
        // Triangle with a horizontal base at y = 0.5
        let tri = vec![
            Point::new(0.0, 0.5),
            Point::new(1.0, 0.5),
            Point::new(0.5, 0.0),
        ];
        assert!(point_in_polygon(&Point::new(0.5, 0.25), &tri));
        // Ray runs along the base: no edge counts as crossed
        assert!(!point_in_polygon(&Point::new(0.5, 0.5), &tri));
        assert!(!point_in_polygon(&Point::new(-0.5, 0.5), &tri));
        // Top edge of the square, same story
        assert!(!point_in_polygon(&Point::new(0.5, 1.0), &unit_square()));
    }

    #[test]
    fn test_degenerate_polygons_never_contain() {
        let line = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        assert!(!point_in_polygon(&Point::new(0.5, 0.5), &line));
        assert!(!point_in_polygon(&Point::new(0.5, 0.5), &[]));
    }

    #[test]
    fn test_centroid_is_vertex_mean() {
        let c = centroid(&unit_square()).unwrap();
        assert!((c.x - 0.5).abs() < EPSILON);
        assert!((c.y - 0.5).abs() < EPSILON);

        let tri = [Point::new(0.0, 0.0), Point::new(0.9, 0.0), Point::new(0.0, 0.3)];
        let c = centroid(&tri).unwrap();
        assert!((c.x - 0.3).abs() < EPSILON);
        assert!((c.y - 0.1).abs() < EPSILON);

        assert!(centroid(&[]).is_none());
    }

    #[test]
    fn test_rect_normalized_roundtrip() {
        let rect = Rect::new(12.5, -40.0, 300.0, 150.0);
        for &(x, y) in &[(0.0, 0.0), (1.0, 1.0), (0.25, 0.75), (0.6, 0.1)] {
            let p = Point::new(x, y);
            let back = rect.to_normalized(rect.to_screen(p)).unwrap();
            assert!((back.x - p.x).abs() < EPSILON);
            assert!((back.y - p.y).abs() < EPSILON);
        }
    }

    #[test]
    fn test_zero_area_rect_has_no_inverse() {
        let rect = Rect::new(10.0, 10.0, 0.0, 50.0);
        assert!(rect.to_normalized(Point::new(10.0, 20.0)).is_none());
    }

    #[test]
    fn test_size_is_empty() {
        assert!(Size::new(0.0, 10.0).is_empty());
        assert!(Size::new(f64::NAN, 10.0).is_empty());
        assert!(!Size::new(1.0, 1.0).is_empty());
    }
}
