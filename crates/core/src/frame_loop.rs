use aviary_protocol::Viewport;
use tracing::{error, info, trace};

use crate::engine::Engine;
use crate::error::EngineError;
use crate::style::SceneStyle;
use crate::surface::DrawingSurface;
use crate::tracker::GenerationTracker;
use crate::views::scene;

/// What one frame did, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub ticks: u64,
    pub boundary: bool,
    pub obstacles_drawn: usize,
    pub agents_drawn: usize,
    pub skipped: usize,
}

/// Session state for the visualization: the engine, the generation counter,
/// the surface geometry, and the two status labels.
///
/// Hosts own exactly one of these and call [`FrameLoop::tick`] once per
/// display refresh and [`FrameLoop::train`] whenever the user asks for it.
/// Scheduling the next refresh is the host's job.
///
/// The first engine fault, from either `tick` or `train`, halts the loop:
/// every later call returns [`EngineError::Halted`] without touching the
/// engine.
#[derive(Debug)]
pub struct FrameLoop<E> {
    engine: E,
    tracker: GenerationTracker,
    viewport: Viewport,
    style: SceneStyle,
    ticks_label: String,
    fault: Option<String>,
}

impl<E: Engine> FrameLoop<E> {
    pub fn new(engine: E, viewport: Viewport, style: SceneStyle) -> Self {
        Self {
            engine,
            tracker: GenerationTracker::new(),
            viewport,
            style,
            ticks_label: format_ticks(0),
            fault: None,
        }
    }

    /// Run one frame: step the engine, read its tick count and world, then
    /// record a boundary, refresh the ticks label and draw.
    ///
    /// The surface is cleared by the first command of the rendered scene.
    /// Any engine fault aborts the frame before anything is drawn or counted,
    /// and halts the loop.
    pub fn tick(&mut self, surface: &mut impl DrawingSurface) -> Result<FrameReport, EngineError> {
        self.check_halted()?;
        self.advance(surface).inspect_err(|err| {
            error!(error = %err, "frame aborted");
            self.fault = Some(err.to_string());
        })
    }

    fn advance(&mut self, surface: &mut impl DrawingSurface) -> Result<FrameReport, EngineError> {
        let boundary = self.engine.step()?;
        let ticks = self.engine.ticks()?;
        let snapshot = self.engine.world()?;

        if boundary {
            self.tracker.on_boundary();
        }
        self.ticks_label = format_ticks(ticks);
        let out = scene::render(&snapshot, &self.viewport, &self.style, surface);

        trace!(
            ticks,
            obstacles = out.obstacles_drawn,
            agents = out.agents_drawn,
            skipped = out.skipped,
            "frame"
        );

        Ok(FrameReport {
            ticks,
            boundary,
            obstacles_drawn: out.obstacles_drawn,
            agents_drawn: out.agents_drawn,
            skipped: out.skipped,
        })
    }

    /// Ask the engine to run a whole generation at once. A successful run
    /// counts as one generation boundary.
    pub fn train(&mut self) -> Result<bool, EngineError> {
        self.check_halted()?;
        let completed = self.engine.train().inspect_err(|err| {
            error!(error = %err, "training failed");
            self.fault = Some(err.to_string());
        })?;
        if completed {
            self.tracker.on_boundary();
        }
        info!(completed, generations = self.tracker.count(), "training run");
        Ok(completed)
    }

    /// Replace the surface geometry, e.g. after the host was resized.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Whether an engine fault has stopped the loop.
    pub fn is_halted(&self) -> bool {
        self.fault.is_some()
    }

    fn check_halted(&self) -> Result<(), EngineError> {
        match &self.fault {
            Some(reason) => Err(EngineError::Halted(reason.clone())),
            None => Ok(()),
        }
    }

    pub fn generations(&self) -> u64 {
        self.tracker.count()
    }

    /// `Ticks: {n}` as of the last frame.
    pub fn ticks_label(&self) -> &str {
        &self.ticks_label
    }

    /// `Generations: {n}`.
    pub fn generations_label(&self) -> &str {
        self.tracker.label()
    }
}

pub fn format_ticks(ticks: u64) -> String {
    format!("Ticks: {ticks}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AgentView, Vec2, WorldSnapshot};
    use crate::surface::CommandRecorder;
    use aviary_protocol::DrawCommand;

    #[derive(Default)]
    struct FaultyWorld {
        ticks: u64,
    }

    impl Engine for FaultyWorld {
        fn step(&mut self) -> Result<bool, EngineError> {
            self.ticks += 1;
            Ok(false)
        }

        fn train(&mut self) -> Result<bool, EngineError> {
            Err(EngineError::call("train", "boom"))
        }

        fn ticks(&self) -> Result<u64, EngineError> {
            Ok(self.ticks)
        }

        fn world(&self) -> Result<WorldSnapshot, EngineError> {
            Err(EngineError::unexpected("world", "undefined"))
        }
    }

    struct OneBird;

    impl Engine for OneBird {
        fn step(&mut self) -> Result<bool, EngineError> {
            Ok(false)
        }

        fn train(&mut self) -> Result<bool, EngineError> {
            Ok(false)
        }

        fn ticks(&self) -> Result<u64, EngineError> {
            Ok(3)
        }

        fn world(&self) -> Result<WorldSnapshot, EngineError> {
            Ok(WorldSnapshot {
                obstacles: vec![],
                agents: vec![AgentView::new(Vec2::new(0.5, 0.5), Vec2::new(0.1, 0.1))],
            })
        }
    }

    fn vp() -> Viewport {
        Viewport::new(100.0, 100.0, 1.0)
    }

    #[test]
    fn labels_start_at_zero() {
        let frames = FrameLoop::new(OneBird, vp(), SceneStyle::default());
        assert_eq!(frames.ticks_label(), "Ticks: 0");
        assert_eq!(frames.generations_label(), "Generations: 0");
    }

    #[test]
    fn world_fault_draws_nothing() {
        let mut frames = FrameLoop::new(FaultyWorld::default(), vp(), SceneStyle::default());
        let mut surface = CommandRecorder::new();
        let err = frames.tick(&mut surface).unwrap_err();
        assert!(matches!(err, EngineError::UnexpectedValue { method: "world", .. }));
        assert!(surface.commands().is_empty());
        assert_eq!(frames.ticks_label(), "Ticks: 0");
        assert!(frames.is_halted());

        let err = frames.tick(&mut surface).unwrap_err();
        assert!(matches!(err, EngineError::Halted(_)));
        assert_eq!(frames.engine.ticks, 1);
    }

    #[test]
    fn train_fault_leaves_counter_alone() {
        let mut frames = FrameLoop::new(FaultyWorld::default(), vp(), SceneStyle::default());
        assert!(frames.train().is_err());
        assert_eq!(frames.generations(), 0);
    }

    #[test]
    fn train_fault_halts_later_frames() {
        let mut frames = FrameLoop::new(FaultyWorld::default(), vp(), SceneStyle::default());
        let mut surface = CommandRecorder::new();
        assert!(frames.train().is_err());

        let err = frames.tick(&mut surface).unwrap_err();
        assert!(matches!(err, EngineError::Halted(ref reason) if reason.contains("boom")));
        assert!(surface.commands().is_empty());
        // The engine was never stepped.
        assert_eq!(frames.engine.ticks, 0);
        assert!(matches!(frames.train(), Err(EngineError::Halted(_))));
    }

    #[test]
    fn tick_renders_fresh_world() {
        let mut frames = FrameLoop::new(OneBird, vp(), SceneStyle::default());
        let mut surface = CommandRecorder::new();
        let report = frames.tick(&mut surface).unwrap();
        assert_eq!(report.ticks, 3);
        assert_eq!(report.agents_drawn, 1);
        assert_eq!(surface.commands()[0], DrawCommand::Clear);
        assert_eq!(frames.ticks_label(), "Ticks: 3");
    }

    #[test]
    fn resize_changes_mapping() {
        let mut frames = FrameLoop::new(OneBird, vp(), SceneStyle::default());
        frames.resize(Viewport::new(200.0, 50.0, 2.0));
        let mut surface = CommandRecorder::new();
        frames.tick(&mut surface).unwrap();
        let rect = surface.commands().iter().find_map(|c| match c {
            DrawCommand::FillRect { rect, .. } => Some(*rect),
            _ => None,
        });
        let rect = rect.unwrap();
        assert!((rect.w - 40.0).abs() < 1e-9);
        assert!((rect.h - 10.0).abs() < 1e-9);
    }
}
