//! SVG export: converts one frame of `DrawCommand`s into a standalone SVG string.

use std::fmt::Write as _;

use aviary_protocol::{DrawCommand, Palette, StyleToken, Viewport};

/// Render a frame as an SVG document.
///
/// The document uses CSS-pixel units, so the viewBox matches the viewport's
/// CSS size regardless of the pixel ratio. `Clear` paints the palette
/// background over the whole canvas.
pub fn render_svg(commands: &[DrawCommand], viewport: &Viewport, palette: &Palette) -> String {
    let (width, height) = (viewport.width, viewport.height);
    let mut svg = String::with_capacity(commands.len() * 120 + 200);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}">"#,
    );

    for cmd in commands {
        let _ = match cmd {
            DrawCommand::Clear => write!(
                svg,
                r#"<rect width="{width}" height="{height}" fill="{}"/>"#,
                palette.resolve(StyleToken::Background).to_hex(),
            ),
            DrawCommand::FillRect { rect, color } => write!(
                svg,
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
                rect.x,
                rect.y,
                rect.w,
                rect.h,
                palette.resolve(*color).to_hex(),
            ),
            DrawCommand::StrokeRect { rect, color, width } => write!(
                svg,
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="{width}"/>"#,
                rect.x,
                rect.y,
                rect.w,
                rect.h,
                palette.resolve(*color).to_hex(),
            ),
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => write!(
                svg,
                r#"<circle cx="{}" cy="{}" r="{radius}" fill="{}"/>"#,
                center.x,
                center.y,
                palette.resolve(*color).to_hex(),
            ),
            DrawCommand::StrokeCircle {
                center,
                radius,
                color,
                width,
            } => write!(
                svg,
                r#"<circle cx="{}" cy="{}" r="{radius}" fill="none" stroke="{}" stroke-width="{width}"/>"#,
                center.x,
                center.y,
                palette.resolve(*color).to_hex(),
            ),
        };
    }

    svg.push_str("</svg>");
    svg
}
