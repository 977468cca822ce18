use std::io::{Stdout, stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use aviary_core::{Engine, FrameLoop};
use aviary_protocol::{Palette, Viewport};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
};
use tracing::info;

use crate::surface::CellSurface;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Run the frame loop in the terminal until the user quits or the engine
/// faults. The terminal is restored either way.
pub fn run_tui<E: Engine>(frames: &mut FrameLoop<E>, frame_interval: Duration) -> Result<()> {
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(out))?;

    let result = frame_loop(&mut terminal, frames, frame_interval);
    let restored = restore(&mut terminal);
    settle(result, restored)
}

/// A frame-loop error wins over a failed restore.
fn settle(result: Result<()>, restored: Result<()>) -> Result<()> {
    result?;
    restored.context("restoring the terminal")
}

/// Undo raw mode and the alternate screen. Every step runs even if an
/// earlier one failed; the first error is returned.
fn restore(terminal: &mut Term) -> Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let cursor = terminal.show_cursor();
    raw?;
    screen?;
    cursor?;
    Ok(())
}

fn frame_loop<E: Engine>(
    terminal: &mut Term,
    frames: &mut FrameLoop<E>,
    frame_interval: Duration,
) -> Result<()> {
    let palette = Palette::default();
    let mut surface: Option<CellSurface> = None;

    loop {
        let started = Instant::now();

        // One header row, the rest is scene.
        let size = terminal.size()?;
        let rows = size.height.saturating_sub(1);
        let stale = surface
            .as_ref()
            .is_none_or(|s| s.pixel_size() != (usize::from(size.width), usize::from(rows) * 2));
        if stale {
            let cells = CellSurface::new(size.width, rows, palette);
            let (w, h) = cells.pixel_size();
            frames.resize(Viewport::new(w as f64, h as f64, 1.0));
            surface = Some(cells);
        }
        let Some(cells) = surface.as_mut() else {
            continue;
        };

        frames
            .tick(cells)
            .context("engine fault, stopping the frame loop")?;

        let header = format!(
            " {} | {} | t train | q quit ",
            frames.ticks_label(),
            frames.generations_label()
        );
        terminal.draw(|frame| {
            let area = frame.area();
            frame.render_widget(
                Paragraph::new(header).style(Style::default().fg(Color::White).bg(Color::DarkGray)),
                Rect::new(0, 0, area.width, 1),
            );
            frame.render_widget(&*cells, Rect::new(0, 1, area.width, area.height.saturating_sub(1)));
        })?;

        // Input is polled for whatever is left of this frame's slot.
        let budget = frame_interval.saturating_sub(started.elapsed());
        if event::poll(budget)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char('t') => {
                    frames.train().context("engine fault while training")?;
                }
                _ => {}
            }
        }
    }

    info!(generations = frames.generations(), "terminal session closed");
    Ok(())
}
