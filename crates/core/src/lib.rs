//! Core placement logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the puzzle and the occupancy bookkeeping.
//! It has **no dependencies** on input devices, rendering, or animation:
//!
//! - **Deterministic**: the same actions on the same layout give the same board
//! - **Single writer**: only [`Board`] transitions and [`History`] touch occupancy
//! - **Fail closed**: a slot with no rules accepts nothing
//!
//! # Module Structure
//!
//! - [`slot`]: acceptance zones, rotation rules, blocking relationships
//! - [`piece`]: piece kind, orientation and slot back-reference
//! - [`board`]: slot/piece tables, place/release transitions, invariant checks
//! - [`history`]: one-step undo and full reset
//! - [`layout`]: JSON layout files and session settings
//! - [`snapshot`]: serializable read-only view of a board
//!
//! # Acceptance Rules
//!
//! A slot accepts a piece when it is free, none of its blocking slots is
//! occupied, and at least one rule for the piece's kind passes. A rule passes
//! when rotation is unrestricted, or the piece orientation is within the
//! rule's tolerance of an allowed angle (circular distance, so 359° is 1° away
//! from 0°).
//!
//! # Example
//!
//! ```
//! use tangram_core::{Board, History, RotationRule, SlotSpec};
//! use tangram_core::types::{PieceKind, Vec2};
//!
//! let mut board = Board::new();
//! let slot = board
//!     .add_slot(SlotSpec::new("square", Vec2::ZERO)
//!         .rule(RotationRule::multiple(PieceKind::Square, [0.0, 90.0, 180.0, 270.0], 5.0)))
//!     .unwrap();
//! let piece = board.add_piece(PieceKind::Square, Vec2::new(3.0, 3.0), 0.0);
//!
//! assert!(board.can_accept(slot, PieceKind::Square, 359.0));
//! assert!(!board.can_accept(slot, PieceKind::Square, 45.0));
//!
//! let mut history = History::new();
//! board.place(slot, piece).unwrap();
//! history.record(piece);
//!
//! history.undo(&mut board);
//! assert!(!board.is_occupied(slot));
//! ```

pub mod board;
pub mod error;
pub mod history;
pub mod layout;
pub mod piece;
pub mod slot;
pub mod snapshot;

pub use tangram_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use error::{InvariantViolation, LayoutError};
pub use history::History;
pub use layout::{load_layout, Layout, LayoutConfig, Settings};
pub use piece::Piece;
pub use slot::{RotationRule, Slot, SlotSpec};
pub use snapshot::{BoardSnapshot, PieceSnapshot, SlotSnapshot};
