//! The engine's public control surface, as consumed by the frame loop.
//!
//! The engine itself (physics, fitness, evolution) lives elsewhere. Hosts
//! wrap whatever they have (a JS object, a recorded trace) in this trait.

pub mod schema;
pub mod trace;

pub use schema::{RawBody, RawWorld, Translation, decode_world, translate_world};
pub use trace::{TraceEngine, TraceError, TraceFrame};

use crate::error::EngineError;
use crate::model::WorldSnapshot;

pub trait Engine {
    /// Advance one tick. Returns `true` iff this step crossed a generation
    /// boundary.
    fn step(&mut self) -> Result<bool, EngineError>;

    /// Run one full generation synchronously. Returns `true` on success.
    fn train(&mut self) -> Result<bool, EngineError>;

    /// The engine's own cumulative tick count. Its reset policy across
    /// generations is the engine's business; callers display it verbatim.
    fn ticks(&self) -> Result<u64, EngineError>;

    /// A fresh snapshot of everything renderable right now.
    fn world(&self) -> Result<WorldSnapshot, EngineError>;
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn step(&mut self) -> Result<bool, EngineError> {
        (**self).step()
    }

    fn train(&mut self) -> Result<bool, EngineError> {
        (**self).train()
    }

    fn ticks(&self) -> Result<u64, EngineError> {
        (**self).ticks()
    }

    fn world(&self) -> Result<WorldSnapshot, EngineError> {
        (**self).world()
    }
}
