use aviary_protocol::{DrawCommand, Point, Rect, StyleToken, Viewport};
use tracing::debug;

use crate::mapper::{map_extent, to_screen};
use crate::model::{AgentView, ObstacleView, WorldSnapshot};
use crate::style::{AgentShape, SceneStyle};
use crate::surface::DrawingSurface;

/// Per-obstacle command count upper bound: 3 fills + 3 strokes.
const OBSTACLE_COMMANDS: usize = 6;
const AGENT_COMMANDS: usize = 2;

/// Result of laying out one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneOutput {
    pub commands: Vec<DrawCommand>,
    pub obstacles_drawn: usize,
    pub agents_drawn: usize,
    /// Entries that failed validation and were left out.
    pub skipped: usize,
}

/// Lay out a full frame: `Clear`, then every obstacle, then every agent,
/// each group in snapshot order.
///
/// Malformed entries are skipped individually; the rest of the frame is
/// still drawn.
pub fn render_scene(
    snapshot: &WorldSnapshot,
    viewport: &Viewport,
    style: &SceneStyle,
) -> SceneOutput {
    let mut out = SceneOutput {
        commands: Vec::with_capacity(
            1 + snapshot.obstacles.len() * OBSTACLE_COMMANDS
                + snapshot.agents.len() * AGENT_COMMANDS,
        ),
        ..SceneOutput::default()
    };
    out.commands.push(DrawCommand::Clear);

    for (index, obstacle) in snapshot.obstacles.iter().enumerate() {
        match obstacle.validate(index) {
            Ok(()) => {
                push_obstacle(&mut out.commands, obstacle, viewport, style);
                out.obstacles_drawn += 1;
            }
            Err(err) => {
                debug!(error = %err, "skipping malformed obstacle");
                out.skipped += 1;
            }
        }
    }

    for (index, agent) in snapshot.agents.iter().enumerate() {
        match agent.validate(index) {
            Ok(()) => {
                push_agent(&mut out.commands, agent, viewport, style);
                out.agents_drawn += 1;
            }
            Err(err) => {
                debug!(error = %err, "skipping malformed agent");
                out.skipped += 1;
            }
        }
    }

    out
}

/// Lay out a frame and submit it to `surface`.
pub fn render(
    snapshot: &WorldSnapshot,
    viewport: &Viewport,
    style: &SceneStyle,
    surface: &mut impl DrawingSurface,
) -> SceneOutput {
    let out = render_scene(snapshot, viewport, style);
    surface.submit_all(&out.commands);
    out
}

fn push_obstacle(
    commands: &mut Vec<DrawCommand>,
    obstacle: &ObstacleView,
    viewport: &Viewport,
    style: &SceneStyle,
) {
    let center = to_screen(obstacle.position.x, obstacle.position.y, viewport);
    let (ex, ey) = map_extent(obstacle.half_extent, viewport);

    let left = center.x - ex;
    let width = 2.0 * ex;
    let gap_top = center.y - ey;
    let gap_bottom = center.y + ey;

    // Columns run from the gap to the surface edges. A gap that pokes past an
    // edge leaves that column empty.
    let upper = (gap_top > 0.0).then(|| Rect::new(left, 0.0, width, gap_top));
    let lower = (gap_bottom < viewport.height)
        .then(|| Rect::new(left, gap_bottom, width, viewport.height - gap_bottom));

    for rect in upper.iter().chain(lower.iter()) {
        commands.push(DrawCommand::FillRect {
            rect: *rect,
            color: StyleToken::PipeFill,
        });
    }

    let half_marker = style.marker_size / 2.0;
    commands.push(DrawCommand::FillRect {
        rect: Rect::centered(center, half_marker, half_marker),
        color: StyleToken::PipeMarker,
    });

    if style.obstacle_outline {
        for rect in upper.iter().chain(lower.iter()) {
            commands.push(DrawCommand::StrokeRect {
                rect: *rect,
                color: StyleToken::PipeOutline,
                width: style.obstacle_outline_width,
            });
        }
        commands.push(DrawCommand::StrokeRect {
            rect: Rect::centered(center, ex, ey),
            color: StyleToken::GapOutline,
            width: style.gap_outline_width,
        });
    }
}

fn push_agent(
    commands: &mut Vec<DrawCommand>,
    agent: &AgentView,
    viewport: &Viewport,
    style: &SceneStyle,
) {
    let center: Point = to_screen(agent.position.x, agent.position.y, viewport);
    let (ex, ey) = map_extent(agent.half_extent, viewport);

    match style.agent_shape {
        AgentShape::Box => {
            let rect = Rect::centered(center, ex, ey);
            commands.push(DrawCommand::FillRect {
                rect,
                color: StyleToken::BirdFill,
            });
            if style.agent_outline {
                commands.push(DrawCommand::StrokeRect {
                    rect,
                    color: StyleToken::BirdOutline,
                    width: style.agent_outline_width,
                });
            }
        }
        AgentShape::Disc => {
            commands.push(DrawCommand::FillCircle {
                center,
                radius: ex,
                color: StyleToken::BirdFill,
            });
            if style.agent_outline {
                commands.push(DrawCommand::StrokeCircle {
                    center,
                    radius: ex,
                    color: StyleToken::BirdOutline,
                    width: style.agent_outline_width,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Vec2;
    use crate::surface::CommandRecorder;

    fn vp() -> Viewport {
        Viewport::new(800.0, 600.0, 1.0)
    }

    fn fills(cmds: &[DrawCommand], token: StyleToken) -> Vec<Rect> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { rect, color } if *color == token => Some(*rect),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn empty_snapshot_only_clears() {
        let mut surface = CommandRecorder::new();
        let out = render(&WorldSnapshot::default(), &vp(), &SceneStyle::default(), &mut surface);
        assert_eq!(surface.commands(), &[DrawCommand::Clear]);
        assert_eq!(out.obstacles_drawn + out.agents_drawn + out.skipped, 0);
    }

    #[test]
    fn obstacle_columns_reach_surface_edges() {
        let snapshot = WorldSnapshot {
            obstacles: vec![ObstacleView::new(Vec2::new(0.5, 0.5), Vec2::new(0.1, 0.2))],
            agents: vec![],
        };
        let out = render_scene(&snapshot, &vp(), &SceneStyle::default());
        let columns = fills(&out.commands, StyleToken::PipeFill);
        assert_eq!(columns.len(), 2);

        let upper = columns[0];
        assert!((upper.x - 320.0).abs() < 1e-9);
        assert!((upper.right() - 480.0).abs() < 1e-9);
        assert_eq!(upper.y, 0.0);
        assert!((upper.bottom() - 180.0).abs() < 1e-9);

        let lower = columns[1];
        assert!((lower.x - 320.0).abs() < 1e-9);
        assert!((lower.right() - 480.0).abs() < 1e-9);
        assert!((lower.y - 420.0).abs() < 1e-9);
        assert!((lower.bottom() - 600.0).abs() < 1e-9);
    }

    #[test]
    fn marker_is_fixed_size_and_centered() {
        let style = SceneStyle {
            marker_size: 4.0,
            ..SceneStyle::default()
        };
        let snapshot = WorldSnapshot {
            obstacles: vec![ObstacleView::new(Vec2::new(0.25, 0.75), Vec2::new(0.3, 0.1))],
            agents: vec![],
        };
        let out = render_scene(&snapshot, &vp(), &style);
        let markers = fills(&out.commands, StyleToken::PipeMarker);
        assert_eq!(markers, vec![Rect::new(198.0, 148.0, 4.0, 4.0)]);
    }

    #[test]
    fn outlines_can_be_disabled() {
        let style = SceneStyle {
            obstacle_outline: false,
            agent_outline: false,
            ..SceneStyle::default()
        };
        let snapshot = WorldSnapshot {
            obstacles: vec![ObstacleView::new(Vec2::new(0.5, 0.5), Vec2::new(0.1, 0.2))],
            agents: vec![AgentView::new(Vec2::new(0.15, 0.5), Vec2::new(0.015, 0.015))],
        };
        let out = render_scene(&snapshot, &vp(), &style);
        assert!(
            !out.commands
                .iter()
                .any(|c| matches!(c, DrawCommand::StrokeRect { .. } | DrawCommand::StrokeCircle { .. }))
        );
    }

    #[test]
    fn gap_outline_matches_opening() {
        let snapshot = WorldSnapshot {
            obstacles: vec![ObstacleView::new(Vec2::new(0.5, 0.5), Vec2::new(0.1, 0.2))],
            agents: vec![],
        };
        let out = render_scene(&snapshot, &vp(), &SceneStyle::default());
        let gap = out.commands.iter().find_map(|c| match c {
            DrawCommand::StrokeRect {
                rect,
                color: StyleToken::GapOutline,
                ..
            } => Some(*rect),
            _ => None,
        });
        let gap = gap.unwrap();
        assert!((gap.x - 320.0).abs() < 1e-9);
        assert!((gap.y - 180.0).abs() < 1e-9);
        assert!((gap.h - 240.0).abs() < 1e-9);
    }

    #[test]
    fn gap_past_the_top_edge_drops_upper_column() {
        let snapshot = WorldSnapshot {
            obstacles: vec![ObstacleView::new(Vec2::new(0.5, 0.95), Vec2::new(0.1, 0.1))],
            agents: vec![],
        };
        let out = render_scene(&snapshot, &vp(), &SceneStyle::default());
        let columns = fills(&out.commands, StyleToken::PipeFill);
        assert_eq!(columns.len(), 1);
        assert!((columns[0].y - 90.0).abs() < 1e-9);
    }

    #[test]
    fn agents_draw_after_obstacles_in_snapshot_order() {
        let snapshot = WorldSnapshot {
            obstacles: vec![
                ObstacleView::new(Vec2::new(0.3, 0.5), Vec2::new(0.05, 0.1)),
                ObstacleView::new(Vec2::new(0.7, 0.5), Vec2::new(0.05, 0.1)),
            ],
            agents: vec![
                AgentView::new(Vec2::new(0.1, 0.2), Vec2::new(0.01, 0.01)),
                AgentView::new(Vec2::new(0.1, 0.8), Vec2::new(0.01, 0.01)),
            ],
        };
        let out = render_scene(&snapshot, &vp(), &SceneStyle::default());
        assert_eq!(out.commands[0], DrawCommand::Clear);

        let first_bird = out
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::FillRect { color: StyleToken::BirdFill, .. }))
            .unwrap();
        let last_pipe = out
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::FillRect { color: StyleToken::PipeFill, .. }))
            .unwrap();
        assert!(last_pipe < first_bird);

        let birds = fills(&out.commands, StyleToken::BirdFill);
        assert_eq!(birds.len(), 2);
        // First agent is lower on screen (world y 0.2 -> screen y 480).
        assert!(birds[0].y > birds[1].y);
    }

    #[test]
    fn disc_style_uses_circles_for_every_agent() {
        let style = SceneStyle {
            agent_shape: AgentShape::Disc,
            ..SceneStyle::default()
        };
        let snapshot = WorldSnapshot {
            obstacles: vec![],
            agents: vec![
                AgentView::new(Vec2::new(0.5, 0.5), Vec2::new(0.02, 0.03)),
                AgentView::new(Vec2::new(0.6, 0.5), Vec2::new(0.02, 0.03)),
            ],
        };
        let out = render_scene(&snapshot, &vp(), &style);
        assert!(fills(&out.commands, StyleToken::BirdFill).is_empty());
        let circles: Vec<_> = out
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillCircle { center, radius, .. } => Some((*center, *radius)),
                _ => None,
            })
            .collect();
        assert_eq!(circles.len(), 2);
        assert_eq!(circles[0].0, Point::new(400.0, 300.0));
        assert!((circles[0].1 - 16.0).abs() < 1e-9);
    }

    #[test]
    fn malformed_entries_are_skipped_not_fatal() {
        let snapshot = WorldSnapshot {
            obstacles: vec![
                ObstacleView::new(Vec2::new(f64::INFINITY, 0.5), Vec2::new(0.1, 0.1)),
                ObstacleView::new(Vec2::new(0.5, 0.5), Vec2::new(0.1, 0.1)),
            ],
            agents: vec![
                AgentView::new(Vec2::new(0.2, 0.2), Vec2::new(0.01, 0.01)),
                AgentView::new(Vec2::new(0.2, f64::NAN), Vec2::new(0.01, 0.01)),
                AgentView::new(Vec2::new(0.3, 0.3), Vec2::new(-0.01, 0.01)),
            ],
        };
        let out = render_scene(&snapshot, &vp(), &SceneStyle::default());
        assert_eq!(out.obstacles_drawn, 1);
        assert_eq!(out.agents_drawn, 1);
        assert_eq!(out.skipped, 3);
        assert_eq!(fills(&out.commands, StyleToken::BirdFill).len(), 1);
    }

    #[test]
    fn off_screen_shapes_are_still_emitted() {
        let snapshot = WorldSnapshot {
            obstacles: vec![],
            agents: vec![AgentView::new(Vec2::new(1.2, -0.1), Vec2::new(0.01, 0.01))],
        };
        let out = render_scene(&snapshot, &vp(), &SceneStyle::default());
        assert_eq!(out.agents_drawn, 1);
        assert_eq!(out.skipped, 0);
    }
}
