//! Zoom/pan viewport and the screen ↔ normalized coordinate mapping.
//!
//! The forward transform is expressed as a single screen-space rectangle
//! (see [`Viewport::image_rect`]). Drawing and hit-testing both go through
//! that rectangle, and the backward transform is its exact inverse, so
//! scale and origin are never applied twice.

use crate::constants::zoom;
use crate::geometry::{Point, Rect, Size};

/// Fit an image into a canvas, preserving aspect ratio and centering it.
///
/// The image fills the canvas along its limiting dimension and is
/// letterboxed (or pillarboxed) along the other.
/// Returns `None` if either size is empty.
pub fn fit_image(canvas: Size, image: Size) -> Option<Rect> {
    if canvas.is_empty() || image.is_empty() {
        return None;
    }

    let (width, height) = if image.aspect_ratio() > canvas.aspect_ratio() {
        // Wider than the canvas: full width, bars top and bottom
        (canvas.width, canvas.width / image.aspect_ratio())
    } else {
        (canvas.height * image.aspect_ratio(), canvas.height)
    };

    Some(Rect::new(
        (canvas.width - width) / 2.0,
        (canvas.height - height) / 2.0,
        width,
        height,
    ))
}

/// Represents pan/zoom viewport state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    scale: f64,
    /// Screen-space translation applied before scaling the fitted rectangle.
    origin: Point,
    min_scale: f64,
    max_scale: f64,
}

impl Viewport {
    /// Create an identity viewport with the default zoom limits.
    pub fn new() -> Self {
        Self::with_limits(zoom::MIN, zoom::MAX)
    }

    /// Create an identity viewport with custom zoom limits.
    ///
    /// Limits given in the wrong order are swapped. A limit that is not a
    /// positive finite number falls back to its default.
    pub fn with_limits(min_scale: f64, max_scale: f64) -> Self {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(min_scale) || !usable(max_scale) {
            log::warn!("Invalid zoom limits ({}, {}), using defaults", min_scale, max_scale);
        }
        let min_scale = if usable(min_scale) { min_scale } else { zoom::MIN };
        let max_scale = if usable(max_scale) { max_scale } else { zoom::MAX };
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        Self {
            scale: 1.0_f64.clamp(min_scale, max_scale),
            origin: Point::ORIGIN,
            min_scale,
            max_scale,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn limits(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    /// Screen rectangle currently covered by the image.
    ///
    /// `screen_rect = origin + scale * fitted_rect`. Recompute this on every
    /// draw and every hit test: canvas size, scale and origin change
    /// independently of one another.
    pub fn image_rect(&self, canvas: Size, image: Size) -> Option<Rect> {
        let base = fit_image(canvas, image)?;
        Some(Rect::new(
            self.origin.x + self.scale * base.x,
            self.origin.y + self.scale * base.y,
            self.scale * base.width,
            self.scale * base.height,
        ))
    }

    /// Convert a screen point to normalized image coordinates.
    ///
    /// The result may lie outside `[0, 1]` when the point is off the image.
    pub fn screen_to_normalized(&self, screen: Point, canvas: Size, image: Size) -> Option<Point> {
        self.image_rect(canvas, image)?.to_normalized(screen)
    }

    /// Convert normalized image coordinates to a screen point.
    pub fn normalized_to_screen(&self, normalized: Point, canvas: Size, image: Size) -> Option<Point> {
        Some(self.image_rect(canvas, image)?.to_screen(normalized))
    }

    /// Zoom by `factor`, keeping the screen point `anchor` visually fixed.
    ///
    /// The new scale is clamped to the viewport limits and the origin is
    /// adjusted with the *clamped* ratio, so zooming past a limit leaves the
    /// view untouched instead of drifting. Non-positive or non-finite
    /// factors are ignored.
    pub fn zoom_toward_point(&self, factor: f64, anchor: Point) -> Viewport {
        if !factor.is_finite() || factor <= 0.0 {
            return *self;
        }

        let new_scale = (self.scale * factor).clamp(self.min_scale, self.max_scale);
        let ratio = new_scale / self.scale;

        Viewport {
            scale: new_scale,
            origin: Point::new(
                anchor.x - (anchor.x - self.origin.x) * ratio,
                anchor.y - (anchor.y - self.origin.y) * ratio,
            ),
            ..*self
        }
    }

    /// Apply a pan delta. Panning is unbounded.
    pub fn pan_by(&self, dx: f64, dy: f64) -> Viewport {
        Viewport {
            origin: self.origin.offset(dx, dy),
            ..*self
        }
    }

    /// Back to `scale = 1`, `origin = (0, 0)`, keeping the limits.
    pub fn reset(&self) -> Viewport {
        Self::with_limits(self.min_scale, self.max_scale)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn approx_point(a: Point, b: Point) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
    }

    #[test]
    fn test_identity_viewport() {
        let v = Viewport::new();
        assert_eq!(v.scale(), 1.0);
        assert_eq!(v.origin(), Point::ORIGIN);
    }

    #[test]
    fn test_fit_wide_image_letterboxes() {
        // 2:1 image into a square canvas: full width, bars above and below
        let rect = fit_image(Size::new(800.0, 800.0), Size::new(2000.0, 1000.0)).unwrap();
        assert!(approx_eq(rect.x, 0.0));
        assert!(approx_eq(rect.width, 800.0));
        assert!(approx_eq(rect.height, 400.0));
        assert!(approx_eq(rect.y, 200.0));
    }

    #[test]
    fn test_fit_tall_image_pillarboxes() {
        let rect = fit_image(Size::new(1000.0, 500.0), Size::new(300.0, 600.0)).unwrap();
        assert!(approx_eq(rect.height, 500.0));
        assert!(approx_eq(rect.width, 250.0));
        assert!(approx_eq(rect.x, 375.0));
        assert!(approx_eq(rect.y, 0.0));
    }

    #[test]
    fn test_fit_rejects_empty_sizes() {
        assert!(fit_image(Size::new(0.0, 100.0), Size::new(10.0, 10.0)).is_none());
        assert!(fit_image(Size::new(100.0, 100.0), Size::new(10.0, 0.0)).is_none());
    }

    #[test]
    fn test_image_rect_applies_origin_and_scale() {
        let v = Viewport::new().pan_by(10.0, -20.0);
        let v = Viewport { scale: 2.0, ..v };
        let rect = v
            .image_rect(Size::new(800.0, 800.0), Size::new(2000.0, 1000.0))
            .unwrap();
        assert!(approx_eq(rect.x, 10.0));
        assert!(approx_eq(rect.y, -20.0 + 400.0));
        assert!(approx_eq(rect.width, 1600.0));
        assert!(approx_eq(rect.height, 800.0));
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let canvas = Size::new(1024.0, 768.0);
        let image = Size::new(640.0, 480.0);
        let anchor = Point::new(300.0, 200.0);

        let v = Viewport::new().pan_by(37.0, -12.0);
        let before = v.screen_to_normalized(anchor, canvas, image).unwrap();

        let zoomed = v.zoom_toward_point(1.7, anchor);
        let after = zoomed.screen_to_normalized(anchor, canvas, image).unwrap();

        assert!(approx_eq(zoomed.scale(), 1.7));
        assert!(approx_point(before, after));
    }

    #[test]
    fn test_zoom_in_then_out_restores_state() {
        let anchor = Point::new(123.0, 456.0);
        let v = Viewport::new().pan_by(-40.0, 15.0);
        for &factor in &[1.1, 1.5, 2.0, 0.8] {
            let back = v.zoom_toward_point(factor, anchor).zoom_toward_point(1.0 / factor, anchor);
            assert!(approx_eq(back.scale(), v.scale()));
            assert!(approx_point(back.origin(), v.origin()));
        }
    }

    #[test]
    fn test_zoom_clamps_without_drift() {
        let anchor = Point::new(50.0, 50.0);
        let v = Viewport::new().zoom_toward_point(4.0, anchor);
        assert!(approx_eq(v.scale(), 4.0));

        // 4.0 * 2.0 = 8.0, but max is 5.0
        let clamped = v.zoom_toward_point(2.0, anchor);
        assert!(approx_eq(clamped.scale(), 5.0));

        // Already at the limit: further zoom is a no-op, origin included
        let again = clamped.zoom_toward_point(2.0, Point::new(900.0, 10.0));
        assert_eq!(again, clamped);

        let min = Viewport::new().zoom_toward_point(0.01, anchor);
        assert!(approx_eq(min.scale(), 0.5));
    }

    #[test]
    fn test_zoom_ignores_invalid_factor() {
        let v = Viewport::new().pan_by(3.0, 4.0);
        assert_eq!(v.zoom_toward_point(0.0, Point::ORIGIN), v);
        assert_eq!(v.zoom_toward_point(-2.0, Point::ORIGIN), v);
        assert_eq!(v.zoom_toward_point(f64::NAN, Point::ORIGIN), v);
    }

    #[test]
    fn test_pan_by() {
        let v = Viewport::new().pan_by(10.0, 20.0).pan_by(5.0, -10.0);
        assert_eq!(v.scale(), 1.0);
        assert!(approx_point(v.origin(), Point::new(15.0, 10.0)));
    }

    #[test]
    fn test_reset_keeps_limits() {
        let v = Viewport::with_limits(0.25, 8.0)
            .zoom_toward_point(6.0, Point::new(1.0, 1.0))
            .pan_by(100.0, 100.0)
            .reset();
        assert_eq!(v.scale(), 1.0);
        assert_eq!(v.origin(), Point::ORIGIN);
        assert_eq!(v.limits(), (0.25, 8.0));
    }

    #[test]
    fn test_screen_normalized_roundtrip_under_transform() {
        let canvas = Size::new(900.0, 600.0);
        let image = Size::new(1200.0, 1600.0);
        let views = [
            Viewport::new(),
            Viewport::new().zoom_toward_point(3.3, Point::new(450.0, 300.0)),
            Viewport::new()
                .zoom_toward_point(0.6, Point::new(10.0, 590.0))
                .pan_by(-250.0, 75.5),
        ];

        for v in &views {
            for &(x, y) in &[(0.0, 0.0), (1.0, 1.0), (0.5, 0.5), (0.12, 0.87)] {
                let p = Point::new(x, y);
                let screen = v.normalized_to_screen(p, canvas, image).unwrap();
                let back = v.screen_to_normalized(screen, canvas, image).unwrap();
                assert!(approx_point(back, p), "{:?} -> {:?} -> {:?}", p, screen, back);
            }
        }
    }

    #[test]
    fn test_swapped_limits() {
        assert_eq!(Viewport::with_limits(5.0, 0.5).limits(), (0.5, 5.0));
    }

    #[test]
    fn test_unusable_limits_fall_back_to_defaults() {
        assert_eq!(Viewport::with_limits(f64::NAN, 5.0).limits(), (zoom::MIN, 5.0));
        assert_eq!(Viewport::with_limits(0.5, f64::INFINITY).limits(), (0.5, zoom::MAX));
        assert_eq!(Viewport::with_limits(-1.0, f64::NAN).limits(), (zoom::MIN, zoom::MAX));
        assert_eq!(Viewport::with_limits(0.0, 2.0).scale(), 1.0);
    }
}
