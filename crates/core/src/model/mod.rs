pub mod snapshot;

pub use snapshot::{AgentView, ObstacleView, Vec2, WorldSnapshot};
