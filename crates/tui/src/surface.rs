use aviary_core::DrawingSurface;
use aviary_protocol::{DrawCommand, Palette, Point, Rect as SceneRect, StyleToken};
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: &str = "▀";

/// A pixel grid with two pixels per terminal cell (stacked vertically).
///
/// Stroke widths are ignored: at terminal resolution every outline is one
/// pixel wide.
pub struct CellSurface {
    width: usize,
    height: usize,
    pixels: Vec<Option<StyleToken>>,
    palette: Palette,
}

impl CellSurface {
    pub fn new(cols: u16, rows: u16, palette: Palette) -> Self {
        let width = usize::from(cols);
        let height = usize::from(rows) * 2;
        Self {
            width,
            height,
            pixels: vec![None; width * height],
            palette,
        }
    }

    /// Pixel dimensions, which double as the scene's CSS size.
    pub fn pixel_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<StyleToken> {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            None
        }
    }

    fn set(&mut self, x: i64, y: i64, token: StyleToken) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = Some(token);
        }
    }

    /// Pixel index range covered by `[from, to)` along one axis.
    fn span(from: f64, to: f64, limit: usize) -> std::ops::Range<i64> {
        let start = from.round().max(0.0) as i64;
        let end = to.round().min(limit as f64) as i64;
        start..end.max(start)
    }

    fn fill_rect(&mut self, rect: &SceneRect, token: StyleToken) {
        for y in Self::span(rect.y, rect.bottom(), self.height) {
            for x in Self::span(rect.x, rect.right(), self.width) {
                self.set(x, y, token);
            }
        }
    }

    fn stroke_rect(&mut self, rect: &SceneRect, token: StyleToken) {
        let xs = Self::span(rect.x, rect.right(), self.width);
        let ys = Self::span(rect.y, rect.bottom(), self.height);
        let (left, right) = (rect.x.round() as i64, rect.right().round() as i64 - 1);
        let (top, bottom) = (rect.y.round() as i64, rect.bottom().round() as i64 - 1);
        for x in xs {
            self.set(x, top, token);
            self.set(x, bottom, token);
        }
        for y in ys {
            self.set(left, y, token);
            self.set(right, y, token);
        }
    }

    fn circle(&mut self, center: Point, radius: f64, token: StyleToken, outline: bool) {
        let ys = Self::span(center.y - radius, center.y + radius + 1.0, self.height);
        let xs = Self::span(center.x - radius, center.x + radius + 1.0, self.width);
        for y in ys {
            for x in xs.clone() {
                let dx = x as f64 + 0.5 - center.x;
                let dy = y as f64 + 0.5 - center.y;
                let dist = (dx * dx + dy * dy).sqrt();
                let hit = if outline {
                    (dist - radius).abs() <= 0.5
                } else {
                    dist <= radius
                };
                if hit {
                    self.set(x, y, token);
                }
            }
        }
    }

    fn color(&self, token: Option<StyleToken>) -> Color {
        let token = token.unwrap_or(StyleToken::Background);
        let [r, g, b] = self.palette.resolve(token).to_u8();
        Color::Rgb(r, g, b)
    }
}

impl DrawingSurface for CellSurface {
    fn submit(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Clear => self.pixels.fill(None),
            DrawCommand::FillRect { rect, color } => self.fill_rect(rect, *color),
            DrawCommand::StrokeRect { rect, color, .. } => self.stroke_rect(rect, *color),
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => self.circle(*center, *radius, *color, false),
            DrawCommand::StrokeCircle {
                center,
                radius,
                color,
                ..
            } => self.circle(*center, *radius, *color, true),
        }
    }
}

impl Widget for &CellSurface {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = (self.height / 2).min(usize::from(area.height));
        let cols = self.width.min(usize::from(area.width));
        for row in 0..rows {
            for col in 0..cols {
                let top = self.color(self.pixel(col, row * 2));
                let bottom = self.color(self.pixel(col, row * 2 + 1));
                let (x, y) = (area.x + col as u16, area.y + row as u16);
                buf[(x, y)].set_symbol(HALF_BLOCK).set_fg(top).set_bg(bottom);
            }
        }
    }
}
