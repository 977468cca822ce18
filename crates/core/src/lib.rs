pub mod engine;
pub mod error;
pub mod frame_loop;
pub mod mapper;
pub mod model;
pub mod style;
pub mod surface;
pub mod svg;
pub mod tracker;
pub mod views;

pub use engine::Engine;
pub use error::{EngineError, SnapshotError, ViewportError};
pub use frame_loop::{FrameLoop, FrameReport};
pub use model::{AgentView, ObstacleView, Vec2, WorldSnapshot};
pub use style::{AgentShape, SceneStyle};
pub use surface::{CommandRecorder, DrawingSurface};
pub use tracker::GenerationTracker;
