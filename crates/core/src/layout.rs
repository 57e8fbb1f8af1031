//! Layout module - declarative puzzle configuration
//!
//! A layout is authored once per puzzle and loaded at setup. It lists the
//! slots with their rule tables, snap targets and blockers (by name), the
//! pieces with their spawn points, and the session settings.
//!
//! ```
//! use tangram_core::layout::LayoutConfig;
//!
//! let layout = LayoutConfig::from_json(r#"{
//!     "slots": [
//!         { "name": "square", "position": [0, 0],
//!           "rules": [{ "piece": "square", "restrict_rotation": true,
//!                       "allow_multiple_rotations": true,
//!                       "allowed_rotations": [0, 90, 180, 270] }] }
//!     ],
//!     "pieces": [{ "kind": "square", "spawn": [4, 4] }]
//! }"#).unwrap().build().unwrap();
//!
//! assert_eq!(layout.board.slots().len(), 1);
//! assert_eq!(layout.settings.rotation_step, 45.0);
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::LayoutError;
use crate::slot::{RotationRule, SlotSpec};
use crate::types::{
    PieceKind, SlotId, Vec2, DEFAULT_ROTATION_STEP_DEG, DEFAULT_SEARCH_RADIUS, RETURN_TO_SPAWN_MS,
};

/// Tunables for the interaction layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Degrees added per rotate gesture
    pub rotation_step: f32,
    /// Radius of the candidate query run on drop
    pub search_radius: f32,
    /// Duration hint for the failed-drop return animation
    pub return_duration_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rotation_step: DEFAULT_ROTATION_STEP_DEG,
            search_radius: DEFAULT_SEARCH_RADIUS,
            return_duration_ms: RETURN_TO_SPAWN_MS,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.search_radius.is_finite() || self.search_radius <= 0.0 {
            return Err(LayoutError::InvalidSearchRadius(self.search_radius));
        }
        if !self.rotation_step.is_finite() || self.rotation_step == 0.0 {
            return Err(LayoutError::InvalidRotationStep(self.rotation_step));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotConfig {
    pub name: String,
    pub position: Vec2,
    #[serde(default)]
    pub snap_target: Option<Vec2>,
    #[serde(default)]
    pub rules: Vec<RotationRule>,
    /// Names of the slots whose occupancy disables this one
    #[serde(default)]
    pub blocked_by: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceConfig {
    pub kind: PieceKind,
    pub spawn: Vec2,
    #[serde(default)]
    pub orientation: f32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub slots: Vec<SlotConfig>,
    #[serde(default)]
    pub pieces: Vec<PieceConfig>,
}

/// A built board together with its settings
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub settings: Settings,
    pub board: Board,
}

impl LayoutConfig {
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate names and numbers, then build the board
    ///
    /// Slots keep their authoring order, which is also the tie-break order
    /// for equally distant drop candidates.
    pub fn build(&self) -> Result<Layout, LayoutError> {
        self.settings.validate()?;

        let mut ids: HashMap<&str, SlotId> = HashMap::with_capacity(self.slots.len());
        for (index, slot) in self.slots.iter().enumerate() {
            if ids.insert(slot.name.as_str(), SlotId(index)).is_some() {
                return Err(LayoutError::DuplicateSlot(slot.name.clone()));
            }
            for rule in &slot.rules {
                if !rule.tolerance.is_finite() || rule.tolerance < 0.0 {
                    return Err(LayoutError::InvalidTolerance {
                        slot: slot.name.clone(),
                        tolerance: rule.tolerance,
                    });
                }
            }
        }

        let mut board = Board::new();
        for slot in &self.slots {
            board.add_slot(SlotSpec {
                name: slot.name.clone(),
                position: slot.position,
                snap_target: slot.snap_target,
                rules: slot.rules.clone(),
                blocking: Vec::new(),
            })?;
        }

        for slot in &self.slots {
            let id = ids[slot.name.as_str()];
            for blocker in &slot.blocked_by {
                if blocker == &slot.name {
                    return Err(LayoutError::SelfBlocking(slot.name.clone()));
                }
                let Some(&blocker_id) = ids.get(blocker.as_str()) else {
                    return Err(LayoutError::UnknownBlocker {
                        slot: slot.name.clone(),
                        blocker: blocker.clone(),
                    });
                };
                board.add_blocking(id, blocker_id)?;
            }
        }

        for piece in &self.pieces {
            board.add_piece(piece.kind, piece.spawn, piece.orientation);
        }

        Ok(Layout {
            settings: self.settings,
            board,
        })
    }
}

/// Read, parse and build a layout file
pub fn load_layout(path: impl AsRef<Path>) -> anyhow::Result<Layout> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading layout {}", path.display()))?;
    let layout = LayoutConfig::from_json(&text)
        .and_then(|config| config.build())
        .with_context(|| format!("building layout {}", path.display()))?;
    log::debug!(
        "loaded layout {} ({} slots, {} pieces)",
        path.display(),
        layout.board.slots().len(),
        layout.board.pieces().len()
    );
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SLOTS: &str = r#"{
        "settings": { "search_radius": 2.5 },
        "slots": [
            { "name": "left", "position": [0, 0], "snap_target": [0.25, 0],
              "blocked_by": ["right"],
              "rules": [{ "piece": "large", "restrict_rotation": true,
                          "required_rotation": 90, "tolerance": 3 }] },
            { "name": "right", "position": [2, 0],
              "rules": [{ "piece": "large_triangle" }] }
        ],
        "pieces": [
            { "kind": "large_triangle", "spawn": [6, 6], "orientation": 450 },
            { "kind": "square", "spawn": [7, 6] }
        ]
    }"#;

    #[test]
    fn test_build_resolves_names_and_defaults() {
        let layout = LayoutConfig::from_json(TWO_SLOTS).unwrap().build().unwrap();
        let board = &layout.board;

        assert_eq!(layout.settings.search_radius, 2.5);
        assert_eq!(layout.settings.rotation_step, DEFAULT_ROTATION_STEP_DEG);

        let left = board.slot_by_name("left").unwrap();
        let right = board.slot_by_name("right").unwrap();
        assert_eq!(board.slot(left).unwrap().blocking(), &[right]);
        assert!(board.slot(right).unwrap().blocking().is_empty());
        assert_eq!(board.slot(left).unwrap().target(), Vec2::new(0.25, 0.0));

        assert_eq!(board.pieces().len(), 2);
        assert_eq!(board.pieces()[0].orientation(), 90.0);
        assert_eq!(board.pieces()[1].orientation(), 0.0);
    }

    #[test]
    fn test_unknown_blocker_is_reported() {
        let json = r#"{ "slots": [ { "name": "a", "position": [0, 0], "blocked_by": ["ghost"] } ] }"#;
        let err = LayoutConfig::from_json(json).unwrap().build().unwrap_err();
        assert!(matches!(err, LayoutError::UnknownBlocker { .. }));
    }

    #[test]
    fn test_self_blocking_is_rejected() {
        let json = r#"{ "slots": [ { "name": "a", "position": [0, 0], "blocked_by": ["a"] } ] }"#;
        let err = LayoutConfig::from_json(json).unwrap().build().unwrap_err();
        assert!(matches!(err, LayoutError::SelfBlocking(name) if name == "a"));
    }

    #[test]
    fn test_duplicate_slot_names_are_rejected() {
        let json = r#"{ "slots": [
            { "name": "a", "position": [0, 0] },
            { "name": "a", "position": [1, 0] }
        ] }"#;
        let err = LayoutConfig::from_json(json).unwrap().build().unwrap_err();
        assert!(matches!(err, LayoutError::DuplicateSlot(name) if name == "a"));
    }

    #[test]
    fn test_negative_tolerance_is_rejected() {
        let json = r#"{ "slots": [ { "name": "a", "position": [0, 0],
            "rules": [{ "piece": "square", "restrict_rotation": true, "tolerance": -1 }] } ] }"#;
        let err = LayoutConfig::from_json(json).unwrap().build().unwrap_err();
        assert!(matches!(err, LayoutError::InvalidTolerance { .. }));
    }

    #[test]
    fn test_bad_settings_are_rejected() {
        let mut config = LayoutConfig::default();
        config.settings.search_radius = 0.0;
        assert!(matches!(
            config.build(),
            Err(LayoutError::InvalidSearchRadius(_))
        ));

        config.settings = Settings {
            rotation_step: 0.0,
            ..Settings::default()
        };
        assert!(matches!(
            config.build(),
            Err(LayoutError::InvalidRotationStep(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = LayoutConfig::from_json("{ \"slots\": 3 }").unwrap_err();
        assert!(matches!(err, LayoutError::Parse(_)));
    }

    #[test]
    fn test_json_roundtrip_keeps_config() {
        let config = LayoutConfig::from_json(TWO_SLOTS).unwrap();
        let again = LayoutConfig::from_json(&config.to_json_pretty().unwrap()).unwrap();
        assert_eq!(config, again);
    }

    #[test]
    fn test_load_layout_missing_file_has_context() {
        let err = load_layout("/definitely/not/here.json").unwrap_err();
        assert!(format!("{err:#}").contains("reading layout"));
    }
}
