//! Translation from the engine's wire schema to [`WorldSnapshot`].
//!
//! The engine serializes its world as
//! `{ "birds": [{ "x", "y", "offx", "offy", .. }], "pipes": [..] }`.
//! Those names stop here; everything downstream sees obstacles and agents
//! with `position` / `half_extent`.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{EngineError, SnapshotError};
use crate::model::{AgentView, ObstacleView, Vec2, WorldSnapshot};

/// One bird or pipe as the engine reports it. Extra fields (`dy`,
/// `fitness`, ...) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBody {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub offx: Option<f64>,
    #[serde(default)]
    pub offy: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawWorld {
    #[serde(default)]
    pub birds: Vec<RawBody>,
    #[serde(default)]
    pub pipes: Vec<RawBody>,
}

/// A translated snapshot plus the entries that could not be translated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Translation {
    pub snapshot: WorldSnapshot,
    pub dropped: Vec<SnapshotError>,
}

/// Map the engine's schema onto the canonical snapshot, keeping order.
/// Entries missing a coordinate are dropped and reported.
pub fn translate_world(raw: &RawWorld) -> Translation {
    let mut dropped = Vec::new();

    let obstacles = raw
        .pipes
        .iter()
        .enumerate()
        .filter_map(|(index, body)| match body_parts("obstacle", index, body) {
            Ok((position, half_extent)) => Some(ObstacleView::new(position, half_extent)),
            Err(err) => {
                dropped.push(err);
                None
            }
        })
        .collect();

    let agents = raw
        .birds
        .iter()
        .enumerate()
        .filter_map(|(index, body)| match body_parts("agent", index, body) {
            Ok((position, half_extent)) => Some(AgentView::new(position, half_extent)),
            Err(err) => {
                dropped.push(err);
                None
            }
        })
        .collect();

    for err in &dropped {
        warn!(error = %err, "dropping engine entry");
    }

    Translation {
        snapshot: WorldSnapshot { obstacles, agents },
        dropped,
    }
}

/// Decode a JSON world from the engine and translate it.
pub fn decode_world(json: &str) -> Result<Translation, EngineError> {
    let raw: RawWorld = serde_json::from_str(json)?;
    Ok(translate_world(&raw))
}

fn body_parts(
    kind: &'static str,
    index: usize,
    body: &RawBody,
) -> Result<(Vec2, Vec2), SnapshotError> {
    let require = |value: Option<f64>, field: &'static str| {
        value.ok_or(SnapshotError::MissingField { kind, index, field })
    };
    Ok((
        Vec2::new(require(body.x, "x")?, require(body.y, "y")?),
        Vec2::new(require(body.offx, "offx")?, require(body.offy, "offy")?),
    ))
}
