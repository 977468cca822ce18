use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Engine;
use super::schema::{RawWorld, translate_world};
use crate::error::EngineError;
use crate::model::WorldSnapshot;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("invalid trace JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("trace has no frames")]
    Empty,
}

/// One recorded engine tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceFrame {
    pub ticks: u64,
    /// Whether reaching this frame crossed a generation boundary.
    #[serde(default)]
    pub boundary: bool,
    pub world: RawWorld,
}

#[derive(Debug, Deserialize)]
struct TraceFile {
    frames: Vec<TraceFrame>,
}

/// Replays a recorded run of the engine.
///
/// The trace starts on its first frame. `step` moves to the next frame,
/// wrapping back to the start at the end, and reports that frame's boundary
/// flag. `train` fast-forwards to the next boundary frame.
#[derive(Debug, Clone)]
pub struct TraceEngine {
    frames: Vec<TraceFrame>,
    cursor: usize,
}

impl TraceEngine {
    pub fn new(frames: Vec<TraceFrame>) -> Result<Self, TraceError> {
        if frames.is_empty() {
            return Err(TraceError::Empty);
        }
        Ok(Self { frames, cursor: 0 })
    }

    /// Load a trace from `{ "frames": [...] }` JSON.
    pub fn from_json(data: &[u8]) -> Result<Self, TraceError> {
        let file: TraceFile = serde_json::from_slice(data)?;
        Self::new(file.frames)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Index of the frame currently on display.
    pub fn position(&self) -> usize {
        self.cursor
    }

    fn current(&self) -> &TraceFrame {
        &self.frames[self.cursor]
    }

    fn next_index(&self, from: usize) -> usize {
        (from + 1) % self.frames.len()
    }
}

impl Engine for TraceEngine {
    fn step(&mut self) -> Result<bool, EngineError> {
        self.cursor = self.next_index(self.cursor);
        Ok(self.current().boundary)
    }

    fn train(&mut self) -> Result<bool, EngineError> {
        let mut index = self.cursor;
        for _ in 0..self.frames.len() {
            index = self.next_index(index);
            if self.frames[index].boundary {
                self.cursor = index;
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn ticks(&self) -> Result<u64, EngineError> {
        Ok(self.current().ticks)
    }

    fn world(&self) -> Result<WorldSnapshot, EngineError> {
        Ok(translate_world(&self.current().world).snapshot)
    }
}
