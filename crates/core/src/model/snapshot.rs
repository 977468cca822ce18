use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;

/// A pair of values in normalized world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A pipe pair: two solid columns with a gap opening between them.
///
/// `position` is the center of the gap, `half_extent` its half-width and
/// half-height, both in normalized world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub position: Vec2,
    pub half_extent: Vec2,
}

impl ObstacleView {
    pub fn new(position: Vec2, half_extent: Vec2) -> Self {
        Self {
            position,
            half_extent,
        }
    }

    /// Check that the entry can be drawn. `index` is only used for reporting.
    pub fn validate(&self, index: usize) -> Result<(), SnapshotError> {
        validate_body("obstacle", index, self.position, self.half_extent)
    }
}

/// A bird, drawn as a box (or disc) around `position`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    pub position: Vec2,
    pub half_extent: Vec2,
}

impl AgentView {
    pub fn new(position: Vec2, half_extent: Vec2) -> Self {
        Self {
            position,
            half_extent,
        }
    }

    pub fn validate(&self, index: usize) -> Result<(), SnapshotError> {
        validate_body("agent", index, self.position, self.half_extent)
    }
}

fn validate_body(
    kind: &'static str,
    index: usize,
    position: Vec2,
    half_extent: Vec2,
) -> Result<(), SnapshotError> {
    if !position.is_finite() {
        return Err(SnapshotError::NonFinite {
            kind,
            index,
            field: "position",
        });
    }
    if !half_extent.is_finite() {
        return Err(SnapshotError::NonFinite {
            kind,
            index,
            field: "half_extent",
        });
    }
    if half_extent.x <= 0.0 || half_extent.y <= 0.0 {
        return Err(SnapshotError::NonPositiveExtent {
            kind,
            index,
            x: half_extent.x,
            y: half_extent.y,
        });
    }
    Ok(())
}

/// Everything the engine wants drawn for one frame.
///
/// Snapshots are owned by the frame that fetched them and dropped after
/// rendering; the engine is free to change its own state between calls.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub obstacles: Vec<ObstacleView>,
    pub agents: Vec<AgentView>,
}
