use thiserror::Error;

/// A failure inside the external engine. Not recoverable by the frame loop:
/// the tick is abandoned and the host stops rescheduling.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine.{method}() failed: {reason}")]
    Call {
        method: &'static str,
        reason: String,
    },
    #[error("engine.{method}() returned an unexpected value: {found}")]
    UnexpectedValue {
        method: &'static str,
        found: String,
    },
    #[error("engine world could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    /// An earlier call already faulted; the engine is not called again.
    #[error("engine halted after an earlier fault: {0}")]
    Halted(String),
}

impl EngineError {
    pub fn call(method: &'static str, reason: impl Into<String>) -> Self {
        Self::Call {
            method,
            reason: reason.into(),
        }
    }

    pub fn unexpected(method: &'static str, found: impl Into<String>) -> Self {
        Self::UnexpectedValue {
            method,
            found: found.into(),
        }
    }
}

/// A single obstacle or agent entry that cannot be drawn. The renderer skips
/// it and keeps going with the rest of the frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapshotError {
    #[error("{kind} #{index}: non-finite {field}")]
    NonFinite {
        kind: &'static str,
        index: usize,
        field: &'static str,
    },
    #[error("{kind} #{index}: half-extent must be positive, got ({x}, {y})")]
    NonPositiveExtent {
        kind: &'static str,
        index: usize,
        x: f64,
        y: f64,
    },
    #[error("{kind} #{index}: missing field `{field}`")]
    MissingField {
        kind: &'static str,
        index: usize,
        field: &'static str,
    },
}

/// The drawing surface could not be acquired at startup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewportError {
    #[error("no element with id '{0}'")]
    MissingElement(String),
    #[error("element '{0}' is not a canvas")]
    NotACanvas(String),
    #[error("canvas '{0}' has no 2d context")]
    NoContext(String),
    #[error("drawing surface has zero size ({width}x{height})")]
    ZeroSize { width: f64, height: f64 },
}
