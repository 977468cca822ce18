mod renderer;
mod surface;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use aviary_core::engine::TraceEngine;
use aviary_core::{CommandRecorder, FrameLoop, SceneStyle, svg};
use aviary_protocol::{Palette, Viewport};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Replay a recorded flappy-bird evolution run in the terminal.
#[derive(Debug, Parser)]
#[command(name = "aviary", version)]
struct Cli {
    /// Recorded engine trace (`{ "frames": [...] }` JSON).
    trace: PathBuf,

    /// Scene style overrides (JSON).
    #[arg(long)]
    style: Option<PathBuf>,

    /// Target frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Write the first frame as SVG to this path and exit.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// SVG width in CSS pixels.
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// SVG height in CSS pixels.
    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Append logs to this file (the terminal itself is taken by the UI).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let data = std::fs::read(&cli.trace)
        .with_context(|| format!("reading trace {}", cli.trace.display()))?;
    let engine = TraceEngine::from_json(&data)
        .with_context(|| format!("loading trace {}", cli.trace.display()))?;
    info!(frames = engine.len(), "trace loaded");

    let style = match &cli.style {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading style {}", path.display()))?;
            SceneStyle::from_json(&text)
                .with_context(|| format!("parsing style {}", path.display()))?
        }
        None => SceneStyle::default(),
    };

    if let Some(path) = &cli.svg {
        return export_svg(engine, style, &cli, path);
    }

    ensure!(cli.fps > 0, "--fps must be positive");
    let frame_interval = Duration::from_secs(1) / cli.fps;
    // The terminal host resizes the viewport to the grid before the first tick.
    let mut frames = FrameLoop::new(engine, Viewport::new(1.0, 1.0, 1.0), style);
    renderer::run_tui(&mut frames, frame_interval)
}

fn export_svg(engine: TraceEngine, style: SceneStyle, cli: &Cli, path: &Path) -> Result<()> {
    let viewport = Viewport::new(cli.width, cli.height, 1.0);
    ensure!(!viewport.is_empty(), "SVG size must be positive");

    let mut frames = FrameLoop::new(engine, viewport, style);
    let mut recorder = CommandRecorder::new();
    frames.tick(&mut recorder)?;

    let doc = svg::render_svg(recorder.last_frame(), &viewport, &Palette::default());
    std::fs::write(path, doc).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "frame exported");
    Ok(())
}

fn init_tracing(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    match (&cli.log_file, &cli.svg) {
        (Some(path), _) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        // Without the TUI, stderr is free.
        (None, Some(_)) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        (None, None) => {}
    }
    Ok(())
}
