//! Session module - one player interacting with one board
//!
//! The session owns the board, the undo history and the settings, and turns
//! discrete input events into state transitions plus [`Motion`]s for the host.
//! Only one piece can be dragged at a time; a second grab is refused rather
//! than interleaved.

use log::debug;

use crate::core::{Board, BoardSnapshot, History, Layout, Settings};
use crate::place::{resolve_drop, DropOutcome, PlaceError};
use crate::types::{BoardAction, Motion, PieceId, SlotId, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("unknown {0}")]
    UnknownPiece(PieceId),
    #[error("{active} is already being dragged")]
    DragInProgress { active: PieceId },
    #[error("no piece is being dragged")]
    NotDragging,
    #[error("{0} is placed and cannot rotate")]
    PiecePlaced(PieceId),
}

impl SessionError {
    pub fn code(self) -> &'static str {
        match self {
            SessionError::UnknownPiece(_) => "unknown_piece",
            SessionError::DragInProgress { .. } => "drag_in_progress",
            SessionError::NotDragging => "not_dragging",
            SessionError::PiecePlaced(_) => "piece_placed",
        }
    }
}

impl From<PlaceError> for SessionError {
    fn from(err: PlaceError) -> Self {
        match err {
            PlaceError::UnknownPiece(id) => SessionError::UnknownPiece(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    piece: PieceId,
    /// Piece position minus pointer position at grab time
    offset: Vec2,
}

#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    history: History,
    settings: Settings,
    drag: Option<Drag>,
}

impl Session {
    pub fn new(board: Board, settings: Settings) -> Self {
        Self {
            board,
            history: History::new(),
            settings,
            drag: None,
        }
    }

    pub fn from_layout(layout: Layout) -> Self {
        Self::new(layout.board, layout.settings)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Piece currently held by the pointer
    pub fn dragging(&self) -> Option<PieceId> {
        self.drag.map(|d| d.piece)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    /// Grab `piece` at `pointer`
    ///
    /// The piece leaves its slot right away, before any new slot is known.
    /// Returns the slot that was freed.
    pub fn begin_drag(
        &mut self,
        piece: PieceId,
        pointer: Vec2,
    ) -> Result<Option<SlotId>, SessionError> {
        if let Some(active) = self.drag {
            return Err(SessionError::DragInProgress {
                active: active.piece,
            });
        }
        let position = self
            .board
            .piece(piece)
            .ok_or(SessionError::UnknownPiece(piece))?
            .position();

        let freed = self.board.vacate(piece);
        self.drag = Some(Drag {
            piece,
            offset: position - pointer,
        });
        debug!("drag start {} (freed {:?})", piece, freed);
        Ok(freed)
    }

    /// Move the held piece with the pointer, keeping the grab offset
    pub fn drag_to(&mut self, pointer: Vec2) -> Result<Motion, SessionError> {
        let drag = self.drag.ok_or(SessionError::NotDragging)?;
        let position = pointer + drag.offset;
        self.board.move_piece(drag.piece, position);
        Ok(Motion::Follow {
            piece: drag.piece,
            position,
        })
    }

    /// Release the held piece where it is and resolve its placement
    ///
    /// Candidates are the slots within the search radius of the piece.
    pub fn drop_piece(&mut self) -> Result<(PieceId, DropOutcome), SessionError> {
        let drag = self.drag.take().ok_or(SessionError::NotDragging)?;
        let position = self
            .board
            .piece(drag.piece)
            .ok_or(SessionError::UnknownPiece(drag.piece))?
            .position();

        let candidates = self
            .board
            .slots_within(position, self.settings.search_radius);
        let outcome = resolve_drop(
            &mut self.board,
            &mut self.history,
            drag.piece,
            position,
            &candidates,
        )?;
        Ok((drag.piece, outcome))
    }

    /// Turn an unplaced piece by the configured step
    ///
    /// Returns the new orientation.
    pub fn rotate(&mut self, piece: PieceId) -> Result<f32, SessionError> {
        let step = self.settings.rotation_step;
        let p = self
            .board
            .piece_mut(piece)
            .ok_or(SessionError::UnknownPiece(piece))?;
        if !p.rotate(step) {
            return Err(SessionError::PiecePlaced(piece));
        }
        Ok(p.orientation())
    }

    /// Undo the last successful placement
    ///
    /// Ends the drag if the undone piece is the one being held.
    pub fn undo(&mut self) -> Option<Motion> {
        let motion = self.history.undo(&mut self.board)?;
        if self.dragging() == Some(motion.piece()) {
            self.drag = None;
        }
        Some(motion)
    }

    /// Send every piece home and free every slot; ends any drag
    pub fn reset(&mut self) -> Vec<Motion> {
        self.drag = None;
        self.history.reset_board(&mut self.board)
    }

    /// Apply one input event
    pub fn apply(&mut self, action: BoardAction) -> Result<Vec<Motion>, SessionError> {
        debug!("apply {}", action.as_str());
        match action {
            BoardAction::BeginDrag { piece, pointer } => {
                self.begin_drag(piece, pointer)?;
                Ok(Vec::new())
            }
            BoardAction::DragTo { pointer } => Ok(vec![self.drag_to(pointer)?]),
            BoardAction::Drop => {
                let (piece, outcome) = self.drop_piece()?;
                Ok(vec![outcome.motion(piece, self.settings.return_duration_ms)])
            }
            BoardAction::Rotate { piece } => {
                self.rotate(piece)?;
                Ok(Vec::new())
            }
            BoardAction::Undo => Ok(self.undo().into_iter().collect()),
            BoardAction::Reset => Ok(self.reset()),
        }
    }
}
