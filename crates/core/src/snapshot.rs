use serde::Serialize;

use crate::types::{PieceId, PieceKind, SlotId, Vec2};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotSnapshot {
    pub id: SlotId,
    pub name: String,
    pub occupied: bool,
    pub occupant: Option<PieceId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieceSnapshot {
    pub id: PieceId,
    pub kind: PieceKind,
    pub orientation: f32,
    pub position: Vec2,
    pub slot: Option<SlotId>,
}

/// Read-only view of a board for observers and tests
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BoardSnapshot {
    pub slots: Vec<SlotSnapshot>,
    pub pieces: Vec<PieceSnapshot>,
}

impl BoardSnapshot {
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.occupied).count()
    }

    /// Every piece sits in some slot
    ///
    /// Blocking pairs mean some slots stay empty on a solved board, so this
    /// looks at pieces rather than slots.
    pub fn all_pieces_placed(&self) -> bool {
        !self.pieces.is_empty() && self.pieces.iter().all(|p| p.slot.is_some())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
