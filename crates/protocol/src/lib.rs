pub mod commands;
pub mod theme;
pub mod types;

pub use commands::DrawCommand;
pub use theme::{Palette, StyleToken};
pub use types::{Color, Point, Rect, Viewport};
