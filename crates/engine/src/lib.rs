//! Placement engine - drop resolution and the interactive session
//!
//! - [`place`]: pick the nearest accepting slot among drop candidates and
//!   commit the placement (or send the piece home)
//! - [`session`]: drag, drop, rotate, undo and reset for a single player,
//!   producing [`Motion`](tangram_types::Motion)s for the host to animate
//!
//! # Example
//!
//! ```
//! use tangram_core::{Board, RotationRule, Settings, SlotSpec};
//! use tangram_engine::Session;
//! use tangram_types::{BoardAction, Motion, PieceKind, Vec2};
//!
//! let mut board = Board::new();
//! board
//!     .add_slot(SlotSpec::new("square", Vec2::ZERO)
//!         .rule(RotationRule::fixed(PieceKind::Square, 0.0, 5.0)))
//!     .unwrap();
//! let piece = board.add_piece(PieceKind::Square, Vec2::new(4.0, 0.0), 0.0);
//!
//! let mut session = Session::new(board, Settings::default());
//! session.apply(BoardAction::BeginDrag { piece, pointer: Vec2::new(4.0, 0.0) }).unwrap();
//! session.apply(BoardAction::DragTo { pointer: Vec2::new(0.2, 0.0) }).unwrap();
//! let motions = session.apply(BoardAction::Drop).unwrap();
//!
//! assert_eq!(motions, vec![Motion::SnapTo { piece, target: Vec2::ZERO }]);
//! ```

pub mod place;
pub mod session;

pub use tangram_core as core;
pub use tangram_types as types;

pub use place::{resolve_drop, select_slot, DropOutcome, PlaceError};
pub use session::{Session, SessionError};
