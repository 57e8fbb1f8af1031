use log::{debug, trace};

use crate::core::{Board, History};
use crate::types::{Motion, PieceId, PieceKind, SlotId, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlaceError {
    #[error("unknown {0}")]
    UnknownPiece(PieceId),
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::UnknownPiece(_) => "unknown_piece",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::UnknownPiece(_) => "piece id is not on this board",
        }
    }
}

/// Result of resolving one drop
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropOutcome {
    /// Piece now occupies `slot` and sits at `target`
    Placed { slot: SlotId, target: Vec2 },
    /// No candidate accepted; the piece is unplaced and logically back at `spawn`
    Rejected { spawn: Vec2 },
}

impl DropOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, DropOutcome::Placed { .. })
    }

    pub fn slot(&self) -> Option<SlotId> {
        match *self {
            DropOutcome::Placed { slot, .. } => Some(slot),
            DropOutcome::Rejected { .. } => None,
        }
    }

    /// Positioning instruction for the host
    pub fn motion(&self, piece: PieceId, return_duration_ms: u32) -> Motion {
        match *self {
            DropOutcome::Placed { target, .. } => Motion::SnapTo { piece, target },
            DropOutcome::Rejected { spawn } => Motion::ReturnToSpawn {
                piece,
                spawn,
                duration_ms: return_duration_ms,
            },
        }
    }
}

/// Nearest accepting candidate, measured to each slot's effective target
///
/// Exact distance ties keep the earlier candidate.
pub fn select_slot(
    board: &Board,
    kind: PieceKind,
    orientation: f32,
    position: Vec2,
    candidates: &[SlotId],
) -> Option<SlotId> {
    let mut best: Option<(SlotId, f32)> = None;

    for &id in candidates {
        if !board.can_accept(id, kind, orientation) {
            trace!("{} rejects {} at {:.1}°", id, kind, orientation);
            continue;
        }
        let Some(slot) = board.slot(id) else {
            continue;
        };
        let d = position.distance(slot.target());
        trace!("{} accepts {} at distance {:.3}", id, kind, d);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((id, d)),
        }
    }

    best.map(|(id, _)| id)
}

/// Resolve a drop of `piece` at `position` against `candidates`
///
/// The piece leaves its current slot before any rule is evaluated. On success
/// it is placed in the nearest accepting slot and recorded in `history`. On
/// failure it stays unplaced and its logical position is reset to spawn
/// immediately; the host animates the visual return on its own.
pub fn resolve_drop(
    board: &mut Board,
    history: &mut History,
    piece: PieceId,
    position: Vec2,
    candidates: &[SlotId],
) -> Result<DropOutcome, PlaceError> {
    let (kind, orientation) = match board.piece(piece) {
        Some(p) => (p.kind(), p.orientation()),
        None => return Err(PlaceError::UnknownPiece(piece)),
    };

    board.vacate(piece);
    board.move_piece(piece, position);

    let winner = select_slot(board, kind, orientation, position, candidates);

    if let Some(slot) = winner {
        if let Some(target) = board.place(slot, piece) {
            history.record(piece);
            debug!("drop {} -> {}", piece, slot);
            return Ok(DropOutcome::Placed { slot, target });
        }
    }

    let spawn = board
        .respawn(piece)
        .ok_or(PlaceError::UnknownPiece(piece))?;
    debug!("drop {} rejected ({} candidates)", piece, candidates.len());
    Ok(DropOutcome::Rejected { spawn })
}
