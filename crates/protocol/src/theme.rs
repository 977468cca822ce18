use serde::{Deserialize, Serialize};

use crate::types::Color;

/// Semantic color tokens resolved by the surface's palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleToken {
    Background,

    // Obstacles
    PipeFill,
    PipeOutline,
    GapOutline,
    PipeMarker,

    // Agents
    BirdFill,
    BirdOutline,
}

/// Maps style tokens to concrete colors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub background: Color,
    pub pipe_fill: Color,
    pub pipe_outline: Color,
    pub gap_outline: Color,
    pub pipe_marker: Color,
    pub bird_fill: Color,
    pub bird_outline: Color,
}

impl Palette {
    pub fn resolve(&self, token: StyleToken) -> Color {
        match token {
            StyleToken::Background => self.background,
            StyleToken::PipeFill => self.pipe_fill,
            StyleToken::PipeOutline => self.pipe_outline,
            StyleToken::GapOutline => self.gap_outline,
            StyleToken::PipeMarker => self.pipe_marker,
            StyleToken::BirdFill => self.bird_fill,
            StyleToken::BirdOutline => self.bird_outline,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::rgb_u8(0x1e, 0x1e, 0x2e),
            pipe_fill: Color::rgb_u8(11, 141, 11),
            pipe_outline: Color::rgb_u8(3, 88, 18),
            gap_outline: Color::rgb_u8(178, 247, 242),
            pipe_marker: Color::rgb_u8(11, 141, 11),
            bird_fill: Color::rgb_u8(153, 255, 255),
            bird_outline: Color::rgb_u8(128, 0, 128),
        }
    }
}
