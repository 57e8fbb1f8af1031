//! Piece module - a movable Tangram piece
//!
//! A piece has a fixed kind and spawn point, a mutable orientation, a logical
//! position, and a back-reference to the slot it occupies. The slot reference
//! is only written by [`Board`](crate::Board) transitions so the occupancy
//! invariant has a single writer.

use crate::types::{normalize_degrees, PieceId, PieceKind, SlotId, Vec2};

#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    id: PieceId,
    kind: PieceKind,
    orientation: f32,
    position: Vec2,
    spawn: Vec2,
    occupied_slot: Option<SlotId>,
}

impl Piece {
    pub(crate) fn new(id: PieceId, kind: PieceKind, spawn: Vec2, orientation: f32) -> Self {
        Self {
            id,
            kind,
            orientation: normalize_degrees(orientation),
            position: spawn,
            spawn,
            occupied_slot: None,
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Orientation in degrees, always in `[0, 360)`
    pub fn orientation(&self) -> f32 {
        self.orientation
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    pub fn occupied_slot(&self) -> Option<SlotId> {
        self.occupied_slot
    }

    pub fn is_placed(&self) -> bool {
        self.occupied_slot.is_some()
    }

    /// Rotate by `step` degrees, wrapping modulo 360
    ///
    /// Returns false and leaves the orientation untouched when the piece sits
    /// in a slot: placed pieces cannot be turned in place.
    pub fn rotate(&mut self, step: f32) -> bool {
        if self.occupied_slot.is_some() {
            return false;
        }
        self.orientation = normalize_degrees(self.orientation + step);
        true
    }

    /// Set an absolute orientation (host-driven free rotation)
    pub fn set_orientation(&mut self, degrees: f32) -> bool {
        if self.occupied_slot.is_some() {
            return false;
        }
        self.orientation = normalize_degrees(degrees);
        true
    }

    pub(crate) fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub(crate) fn set_occupied_slot(&mut self, slot: Option<SlotId>) {
        self.occupied_slot = slot;
    }

    pub(crate) fn move_to_spawn(&mut self) {
        self.position = self.spawn;
    }
}
