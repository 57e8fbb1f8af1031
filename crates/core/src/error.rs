use thiserror::Error;

use crate::types::{PieceId, SlotId};

/// Occupancy bookkeeping out of sync between pieces and slots
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("{slot} is marked occupied but no piece references it")]
    OrphanedSlot { slot: SlotId },

    #[error("{piece} references {slot} which is not marked occupied")]
    UnoccupiedReference { piece: PieceId, slot: SlotId },

    #[error("{slot} is referenced by both {first} and {second}")]
    SharedSlot {
        slot: SlotId,
        first: PieceId,
        second: PieceId,
    },

    #[error("{piece} references unknown {slot}")]
    DanglingReference { piece: PieceId, slot: SlotId },
}

/// Layout authoring mistakes found while building a board
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Layout parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate slot name: {0}")]
    DuplicateSlot(String),

    #[error("Slot {slot} is blocked by unknown slot {blocker}")]
    UnknownBlocker { slot: String, blocker: String },

    #[error("Slot {0} lists itself as blocking")]
    SelfBlocking(String),

    #[error("Slot {slot} has invalid tolerance {tolerance}")]
    InvalidTolerance { slot: String, tolerance: f32 },

    #[error("Invalid search radius: {0}")]
    InvalidSearchRadius(f32),

    #[error("Invalid rotation step: {0}")]
    InvalidRotationStep(f32),

    #[error("Unknown slot: {0}")]
    UnknownSlot(SlotId),
}
