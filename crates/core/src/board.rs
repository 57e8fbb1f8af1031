//! Board module - owns every slot and piece of one puzzle
//!
//! Slots and pieces live in two flat tables indexed by [`SlotId`] and
//! [`PieceId`]. Cross references are plain ids, so neither side owns the
//! other and the board decides lifetimes.
//!
//! All occupancy changes go through [`Board::place`], [`Board::release`],
//! [`Board::vacate`] and [`Board::respawn`]. Each of them keeps
//! `slot.occupied <=> exactly one piece references the slot`, and debug builds
//! re-check that after every transition.

use log::{debug, warn};

use crate::error::{InvariantViolation, LayoutError};
use crate::piece::Piece;
use crate::slot::{Slot, SlotSpec};
use crate::snapshot::{BoardSnapshot, PieceSnapshot, SlotSnapshot};
use crate::types::{PieceId, PieceKind, SlotId, Vec2};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    slots: Vec<Slot>,
    pieces: Vec<Piece>,
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a slot; blocking ids must refer to slots that already exist
    ///
    /// Use [`Board::add_blocking`] for references to slots added later.
    pub fn add_slot(&mut self, spec: SlotSpec) -> Result<SlotId, LayoutError> {
        let id = SlotId(self.slots.len());
        for &blocker in &spec.blocking {
            if blocker == id {
                return Err(LayoutError::SelfBlocking(spec.name.clone()));
            }
            if blocker.index() >= self.slots.len() {
                return Err(LayoutError::UnknownSlot(blocker));
            }
        }
        self.slots.push(Slot::new(id, spec));
        Ok(id)
    }

    /// Declare that `blocker` being occupied disables `slot`
    ///
    /// The relation is directed; declare the reverse separately if needed.
    pub fn add_blocking(&mut self, slot: SlotId, blocker: SlotId) -> Result<(), LayoutError> {
        if blocker.index() >= self.slots.len() {
            return Err(LayoutError::UnknownSlot(blocker));
        }
        let target = self
            .slots
            .get_mut(slot.index())
            .ok_or(LayoutError::UnknownSlot(slot))?;
        if slot == blocker {
            return Err(LayoutError::SelfBlocking(target.name().to_string()));
        }
        target.push_blocking(blocker);
        Ok(())
    }

    /// Add a piece resting at its spawn point
    pub fn add_piece(&mut self, kind: PieceKind, spawn: Vec2, orientation: f32) -> PieceId {
        let id = PieceId(self.pieces.len());
        self.pieces.push(Piece::new(id, kind, spawn, orientation));
        id
    }

    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.slots.get(id.index())
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index())
    }

    /// Mutable piece access for orientation changes
    ///
    /// Occupancy fields stay crate-private, so this cannot break the invariant.
    pub fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.get_mut(id.index())
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn slot_by_name(&self, name: &str) -> Option<SlotId> {
        self.slots.iter().find(|s| s.name() == name).map(Slot::id)
    }

    pub fn is_occupied(&self, id: SlotId) -> bool {
        self.slot(id).is_some_and(Slot::is_occupied)
    }

    /// Piece currently sitting in `slot`, if any
    pub fn occupant(&self, slot: SlotId) -> Option<PieceId> {
        self.pieces
            .iter()
            .find(|p| p.occupied_slot() == Some(slot))
            .map(Piece::id)
    }

    /// Whether `slot` would take a piece of `kind` at `orientation` right now
    ///
    /// Pure with respect to the board: repeated calls without a transition in
    /// between give the same answer. Unknown slots accept nothing.
    pub fn can_accept(&self, slot: SlotId, kind: PieceKind, orientation: f32) -> bool {
        match self.slot(slot) {
            Some(s) => s.can_accept(kind, orientation, |id| self.is_occupied(id)),
            None => false,
        }
    }

    /// [`Board::can_accept`] for an unrotated piece
    pub fn can_accept_upright(&self, slot: SlotId, kind: PieceKind) -> bool {
        self.can_accept(slot, kind, 0.0)
    }

    /// Slots whose position lies within `radius` of `center`, in table order
    pub fn slots_within(&self, center: Vec2, radius: f32) -> Vec<SlotId> {
        self.slots
            .iter()
            .filter(|s| s.position().distance(center) <= radius)
            .map(Slot::id)
            .collect()
    }

    /// Move a piece's logical position (drag feedback)
    pub fn move_piece(&mut self, id: PieceId, position: Vec2) -> bool {
        match self.pieces.get_mut(id.index()) {
            Some(piece) => {
                piece.set_position(position);
                true
            }
            None => false,
        }
    }

    /// Put `piece` into `slot` and snap it to the slot target
    ///
    /// Vacates whatever slot the piece held before. Returns the target
    /// position, or `None` when either id is unknown or the slot is already
    /// taken; nothing changes in that case. Rule checks are the caller's job.
    pub fn place(&mut self, slot: SlotId, piece: PieceId) -> Option<Vec2> {
        let target = {
            let s = self.slot(slot)?;
            self.piece(piece)?;
            if s.is_occupied() {
                warn!("{} refused {}: already occupied", slot, piece);
                return None;
            }
            s.target()
        };

        self.vacate_unchecked(piece);

        self.slots[slot.index()].occupy();
        let p = &mut self.pieces[piece.index()];
        p.set_occupied_slot(Some(slot));
        p.set_position(target);

        debug!("{} ({}) placed in {}", piece, p.kind(), slot);
        self.assert_consistent();
        Some(target)
    }

    /// Free `slot`, clearing the back-reference of the piece in it
    ///
    /// Idempotent: releasing a free slot changes nothing.
    pub fn release(&mut self, slot: SlotId) {
        let Some(s) = self.slots.get_mut(slot.index()) else {
            return;
        };
        if !s.is_occupied() {
            return;
        }
        s.release();
        for piece in &mut self.pieces {
            if piece.occupied_slot() == Some(slot) {
                piece.set_occupied_slot(None);
            }
        }
        debug!("{} released", slot);
        self.assert_consistent();
    }

    /// Take `piece` out of its slot, if it is in one
    ///
    /// Returns the slot that was freed. The piece keeps its position.
    pub fn vacate(&mut self, piece: PieceId) -> Option<SlotId> {
        let freed = self.vacate_unchecked(piece);
        if let Some(slot) = freed {
            debug!("{} vacated {}", piece, slot);
        }
        self.assert_consistent();
        freed
    }

    /// Vacate and move the piece back to its spawn point
    pub fn respawn(&mut self, piece: PieceId) -> Option<Vec2> {
        self.vacate(piece);
        let p = self.pieces.get_mut(piece.index())?;
        p.move_to_spawn();
        Some(p.spawn())
    }

    /// Force every slot free regardless of tracked references
    ///
    /// Returns how many slots were still marked occupied.
    pub fn release_all(&mut self) -> usize {
        let mut stale = 0;
        for slot in &mut self.slots {
            if slot.is_occupied() {
                stale += 1;
                slot.release();
            }
        }
        for piece in &mut self.pieces {
            piece.set_occupied_slot(None);
        }
        stale
    }

    /// Verify that occupancy flags and piece references agree
    pub fn check_invariant(&self) -> Result<(), InvariantViolation> {
        let mut holder: Vec<Option<PieceId>> = vec![None; self.slots.len()];

        for piece in &self.pieces {
            let Some(slot) = piece.occupied_slot() else {
                continue;
            };
            let Some(s) = self.slots.get(slot.index()) else {
                return Err(InvariantViolation::DanglingReference {
                    piece: piece.id(),
                    slot,
                });
            };
            if !s.is_occupied() {
                return Err(InvariantViolation::UnoccupiedReference {
                    piece: piece.id(),
                    slot,
                });
            }
            if let Some(first) = holder[slot.index()] {
                return Err(InvariantViolation::SharedSlot {
                    slot,
                    first,
                    second: piece.id(),
                });
            }
            holder[slot.index()] = Some(piece.id());
        }

        for slot in &self.slots {
            if slot.is_occupied() && holder[slot.id().index()].is_none() {
                return Err(InvariantViolation::OrphanedSlot { slot: slot.id() });
            }
        }

        Ok(())
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            slots: self
                .slots
                .iter()
                .map(|s| SlotSnapshot {
                    id: s.id(),
                    name: s.name().to_string(),
                    occupied: s.is_occupied(),
                    occupant: self.occupant(s.id()),
                })
                .collect(),
            pieces: self
                .pieces
                .iter()
                .map(|p| PieceSnapshot {
                    id: p.id(),
                    kind: p.kind(),
                    orientation: p.orientation(),
                    position: p.position(),
                    slot: p.occupied_slot(),
                })
                .collect(),
        }
    }

    fn vacate_unchecked(&mut self, piece: PieceId) -> Option<SlotId> {
        let p = self.pieces.get_mut(piece.index())?;
        let slot = p.occupied_slot()?;
        p.set_occupied_slot(None);
        if let Some(s) = self.slots.get_mut(slot.index()) {
            s.release();
        }
        Some(slot)
    }

    #[inline]
    fn assert_consistent(&self) {
        debug_assert!(
            self.check_invariant().is_ok(),
            "occupancy invariant violated: {:?}",
            self.check_invariant()
        );
    }
}
