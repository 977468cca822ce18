use std::f64::consts::TAU;

use aviary_core::{DrawingSurface, ViewportError};
use aviary_protocol::{DrawCommand, Palette, Viewport};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

/// A `<canvas>` 2D context pre-scaled by the device pixel ratio, so every
/// command is issued in CSS pixels.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    viewport: Viewport,
    palette: Palette,
}

impl CanvasSurface {
    /// Size the canvas raster to its CSS box × `devicePixelRatio` and grab
    /// its 2D context.
    pub fn acquire(
        window: &Window,
        document: &Document,
        canvas_id: &str,
        palette: Palette,
    ) -> Result<Self, ViewportError> {
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| ViewportError::MissingElement(canvas_id.to_string()))?
            .dyn_into()
            .map_err(|_| ViewportError::NotACanvas(canvas_id.to_string()))?;

        let viewport = Viewport::new(
            f64::from(canvas.client_width()),
            f64::from(canvas.client_height()),
            window.device_pixel_ratio(),
        );
        if viewport.is_empty() {
            return Err(ViewportError::ZeroSize {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let (raster_w, raster_h) = viewport.raster_size();
        canvas.set_width(raster_w);
        canvas.set_height(raster_h);
        let style = canvas.style();
        // Keep the CSS box where the page layout put it.
        let _ = style.set_property("width", "100%");
        let _ = style.set_property("height", "100%");

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .ok_or_else(|| ViewportError::NoContext(canvas_id.to_string()))?
            .dyn_into()
            .map_err(|_| ViewportError::NoContext(canvas_id.to_string()))?;
        ctx.scale(viewport.dpr, viewport.dpr)
            .map_err(|_| ViewportError::NoContext(canvas_id.to_string()))?;

        Ok(Self {
            ctx,
            viewport,
            palette,
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn circle_path(&self, x: f64, y: f64, radius: f64) -> bool {
        self.ctx.begin_path();
        self.ctx.arc(x, y, radius, 0.0, TAU).is_ok()
    }
}

impl DrawingSurface for CanvasSurface {
    fn submit(&mut self, command: &DrawCommand) {
        let ctx = &self.ctx;
        match command {
            DrawCommand::Clear => {
                ctx.clear_rect(0.0, 0.0, self.viewport.width, self.viewport.height);
            }
            DrawCommand::FillRect { rect, color } => {
                ctx.set_fill_style_str(&self.palette.resolve(*color).to_css());
                ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);
            }
            DrawCommand::StrokeRect { rect, color, width } => {
                ctx.set_line_width(*width);
                ctx.set_stroke_style_str(&self.palette.resolve(*color).to_css());
                ctx.stroke_rect(rect.x, rect.y, rect.w, rect.h);
            }
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => {
                if self.circle_path(center.x, center.y, *radius) {
                    ctx.set_fill_style_str(&self.palette.resolve(*color).to_css());
                    ctx.fill();
                }
            }
            DrawCommand::StrokeCircle {
                center,
                radius,
                color,
                width,
            } => {
                if self.circle_path(center.x, center.y, *radius) {
                    ctx.set_line_width(*width);
                    ctx.set_stroke_style_str(&self.palette.resolve(*color).to_css());
                    ctx.stroke();
                }
            }
        }
    }
}
