//! History module - single-step undo and full board reset
//!
//! The history remembers only the piece of the last successful placement.
//! It is a plain value owned by whoever drives the board (see the session in
//! the engine crate), so independent boards never share undo state.

use log::{debug, warn};

use crate::board::Board;
use crate::types::{Motion, PieceId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct History {
    last_modified: Option<PieceId>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_modified(&self) -> Option<PieceId> {
        self.last_modified
    }

    pub fn can_undo(&self) -> bool {
        self.last_modified.is_some()
    }

    /// Remember `piece` as the last placed one
    ///
    /// Only call this after a successful placement.
    pub fn record(&mut self, piece: PieceId) {
        self.last_modified = Some(piece);
    }

    pub fn clear(&mut self) {
        self.last_modified = None;
    }

    /// Send the last placed piece back to spawn
    ///
    /// Returns `None` and changes nothing when there is nothing to undo. A
    /// second undo in a row is therefore a no-op.
    pub fn undo(&mut self, board: &mut Board) -> Option<Motion> {
        let piece = self.last_modified.take()?;
        let freed = board.piece(piece)?.occupied_slot();
        let spawn = board.respawn(piece)?;
        debug!("undo {} (freed {:?})", piece, freed);
        Some(Motion::ResetToSpawn { piece, spawn })
    }

    /// Return every piece to spawn and free every slot
    ///
    /// Pieces are vacated and respawned first; afterwards every slot is
    /// force-released as a consistency sweep. Total and idempotent.
    pub fn reset_board(&mut self, board: &mut Board) -> Vec<Motion> {
        let ids: Vec<PieceId> = board.pieces().iter().map(|p| p.id()).collect();
        let mut motions = Vec::with_capacity(ids.len());

        for piece in ids {
            if let Some(spawn) = board.respawn(piece) {
                motions.push(Motion::ResetToSpawn { piece, spawn });
            }
        }

        let stale = board.release_all();
        if stale > 0 {
            warn!("reset found {} slot(s) occupied with no piece", stale);
        }

        self.last_modified = None;
        debug!("board reset ({} pieces)", motions.len());
        motions
    }
}
