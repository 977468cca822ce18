use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

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

    /// Build a rect from its center and half-extents.
    pub fn centered(center: Point, half_w: f64, half_h: f64) -> Self {
        Self {
            x: center.x - half_w,
            y: center.y - half_h,
            w: 2.0 * half_w,
            h: 2.0 * half_h,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Opaque color from byte channels.
    pub const fn rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Byte channels, rounded and clamped.
    pub fn to_u8(self) -> [u8; 3] {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b)]
    }

    /// CSS `rgba(...)` string, as accepted by canvas `fillStyle`/`strokeStyle`.
    pub fn to_css(self) -> String {
        let [r, g, b] = self.to_u8();
        format!("rgba({r}, {g}, {b}, {})", self.a.clamp(0.0, 1.0))
    }

    /// `#rrggbb` hex string (alpha dropped).
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_u8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

/// The drawing surface dimensions in CSS pixels plus the device pixel ratio.
///
/// Draw commands are always expressed in CSS pixels. Hosts allocate a raster
/// buffer of `raster_size()` and pre-scale their context by `dpr`, so callers
/// never multiply by it themselves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl Viewport {
    /// Create a viewport, clamping a missing or sub-unit pixel ratio to 1.
    pub fn new(width: f64, height: f64, dpr: f64) -> Self {
        let dpr = if dpr.is_finite() && dpr >= 1.0 { dpr } else { 1.0 };
        Self { width, height, dpr }
    }

    /// Physical raster buffer dimensions (CSS size × pixel ratio).
    pub fn raster_size(&self) -> (u32, u32) {
        let px = |css: f64| (css * self.dpr).round().max(0.0) as u32;
        (px(self.width), px(self.height))
    }

    /// Whether the surface has a drawable area.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raster_size_scales_by_pixel_ratio() {
        let vp = Viewport::new(800.0, 600.0, 2.0);
        assert_eq!(vp.raster_size(), (1600, 1200));
    }

    #[test]
    fn invalid_pixel_ratio_falls_back_to_one() {
        assert_eq!(Viewport::new(10.0, 10.0, 0.0).dpr, 1.0);
        assert_eq!(Viewport::new(10.0, 10.0, f64::NAN).dpr, 1.0);
        assert_eq!(Viewport::new(10.0, 10.0, 0.5).dpr, 1.0);
    }

    #[test]
    fn centered_rect_spans_both_half_extents() {
        let r = Rect::centered(Point::new(400.0, 300.0), 80.0, 120.0);
        assert_eq!(r, Rect::new(320.0, 180.0, 160.0, 240.0));
        assert_eq!(r.right(), 480.0);
        assert_eq!(r.bottom(), 420.0);
    }

    #[test]
    fn css_and_hex_strings() {
        let c = Color::rgb_u8(11, 141, 11);
        assert_eq!(c.to_hex(), "#0b8d0b");
        assert_eq!(c.to_css(), "rgba(11, 141, 11, 1)");
    }
}
