use serde::{Deserialize, Serialize};

use crate::theme::StyleToken;
use crate::types::{Point, Rect};

/// A single, stateless draw instruction in CSS-pixel space.
///
/// The core emits a `Vec<DrawCommand>` for each frame. Surfaces consume
/// this list sequentially — each command carries all the data it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Wipe the whole surface. Always the first command of a frame.
    Clear,

    /// Fill a rectangle.
    FillRect { rect: Rect, color: StyleToken },

    /// Outline a rectangle with a line of the given width.
    StrokeRect {
        rect: Rect,
        color: StyleToken,
        width: f64,
    },

    /// Fill a circle.
    FillCircle {
        center: Point,
        radius: f64,
        color: StyleToken,
    },

    /// Outline a circle.
    StrokeCircle {
        center: Point,
        radius: f64,
        color: StyleToken,
        width: f64,
    },
}

impl DrawCommand {
    /// Whether this command draws a shape (anything but `Clear`).
    pub fn is_shape(&self) -> bool {
        !matches!(self, DrawCommand::Clear)
    }
}
