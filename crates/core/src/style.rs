use serde::{Deserialize, Serialize};

/// How agents are drawn. One shape is used for every agent in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentShape {
    /// Rectangle of the agent's half-extents.
    #[default]
    Box,
    /// Circle whose radius is the agent's horizontal half-extent.
    Disc,
}

/// Cosmetic scene settings. Nothing here is derived from world data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneStyle {
    pub agent_shape: AgentShape,
    /// Stroke the solid pipe columns and the gap opening.
    pub obstacle_outline: bool,
    pub agent_outline: bool,
    /// Side length of the debug marker at each gap center, in CSS pixels.
    pub marker_size: f64,
    pub obstacle_outline_width: f64,
    pub gap_outline_width: f64,
    pub agent_outline_width: f64,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            agent_shape: AgentShape::Box,
            obstacle_outline: true,
            agent_outline: true,
            marker_size: 2.0,
            obstacle_outline_width: 10.0,
            gap_outline_width: 3.0,
            agent_outline_width: 3.0,
        }
    }
}

impl SceneStyle {
    /// Parse a style from JSON. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let style = SceneStyle::from_json(r#"{ "agent_shape": "disc" }"#).unwrap();
        assert_eq!(style.agent_shape, AgentShape::Disc);
        assert_eq!(style.marker_size, SceneStyle::default().marker_size);
        assert!(style.obstacle_outline);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(SceneStyle::from_json(r#"{ "agent_colour": "red" }"#).is_err());
    }
}
