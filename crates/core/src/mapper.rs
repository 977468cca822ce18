//! Normalized world space ↔ CSS pixel space.
//!
//! World space is `[0,1]×[0,1]` with Y growing upward; the surface has its
//! origin at the top-left with Y growing downward. Inputs are never clamped:
//! anything outside the unit square simply lands off-surface.

use aviary_protocol::{Point, Viewport};

use crate::model::Vec2;

/// Map a world position to CSS pixels.
pub fn to_screen(world_x: f64, world_y: f64, viewport: &Viewport) -> Point {
    Point::new(
        world_x * viewport.width,
        viewport.height - world_y * viewport.height,
    )
}

/// Inverse of [`to_screen`].
pub fn to_world(px: f64, py: f64, viewport: &Viewport) -> Vec2 {
    Vec2::new(
        px / viewport.width,
        (viewport.height - py) / viewport.height,
    )
}

/// Map a normalized half-extent to CSS pixels. X and Y scale independently,
/// so shapes follow the viewport's aspect ratio.
pub fn map_extent(extent: Vec2, viewport: &Viewport) -> (f64, f64) {
    (extent.x * viewport.width, extent.y * viewport.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vp() -> Viewport {
        Viewport::new(800.0, 600.0, 2.0)
    }

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9
    }

    #[test]
    fn origin_maps_to_bottom_left() {
        assert_eq!(to_screen(0.0, 0.0, &vp()), Point::new(0.0, 600.0));
    }

    #[test]
    fn unit_corner_maps_to_top_right() {
        assert_eq!(to_screen(1.0, 1.0, &vp()), Point::new(800.0, 0.0));
    }

    #[test]
    fn pixel_ratio_does_not_affect_css_coordinates() {
        let hi = Viewport::new(800.0, 600.0, 3.0);
        let lo = Viewport::new(800.0, 600.0, 1.0);
        assert_eq!(to_screen(0.3, 0.7, &hi), to_screen(0.3, 0.7, &lo));
    }

    #[test]
    fn round_trip_recovers_world_coordinates() {
        let viewports = [vp(), Viewport::new(123.0, 457.0, 1.0), Viewport::new(1.0, 1.0, 1.0)];
        for viewport in &viewports {
            for i in 0..=20 {
                for j in 0..=20 {
                    let (x, y) = (f64::from(i) / 20.0, f64::from(j) / 20.0);
                    let p = to_screen(x, y, viewport);
                    let back = to_world(p.x, p.y, viewport);
                    assert!(approx_eq(back.x, x), "x: {x} -> {} -> {}", p.x, back.x);
                    assert!(approx_eq(back.y, y), "y: {y} -> {} -> {}", p.y, back.y);
                }
            }
        }
    }

    #[test]
    fn out_of_range_inputs_are_not_clamped() {
        let p = to_screen(1.5, -0.5, &vp());
        assert_eq!(p, Point::new(1200.0, 900.0));
    }

    #[test]
    fn extents_scale_per_axis() {
        let (w, h) = map_extent(Vec2::new(0.1, 0.2), &vp());
        assert!(approx_eq(w, 80.0));
        assert!(approx_eq(h, 120.0));
    }
}
