//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behaviour beyond small helpers, making them
//! usable from the rules core, the session controller, and any host layer that
//! renders or animates pieces.
//!
//! # Angles
//!
//! Orientations are `f32` degrees. A piece orientation is always kept in
//! `[0, 360)`; rule angles may be authored in any range because comparisons go
//! through [`circular_distance`], which accounts for wraparound.
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_ROTATION_TOLERANCE_DEG` | 5 | Angular slack of a rotation rule |
//! | `DEFAULT_ROTATION_STEP_DEG` | 45 | Angle added by one rotate gesture |
//! | `DEFAULT_SEARCH_RADIUS` | 1.0 | Radius of the drop candidate query |
//! | `RETURN_TO_SPAWN_MS` | 300 | Duration hint for the return animation |
//!
//! # Examples
//!
//! ```
//! use tangram_types::{circular_distance, normalize_degrees, PieceKind, Vec2};
//!
//! assert_eq!(PieceKind::from_str("Square"), Some(PieceKind::Square));
//! assert_eq!(normalize_degrees(-45.0), 315.0);
//! assert_eq!(circular_distance(359.0, 0.0), 1.0);
//! assert_eq!(Vec2::new(0.0, 0.0).distance(Vec2::new(3.0, 4.0)), 5.0);
//! ```

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// One full turn in degrees
pub const FULL_TURN_DEG: f32 = 360.0;

/// Default rotation tolerance of a slot rule (5°)
pub const DEFAULT_ROTATION_TOLERANCE_DEG: f32 = 5.0;

/// Default angle added by one rotate gesture (45°)
pub const DEFAULT_ROTATION_STEP_DEG: f32 = 45.0;

/// Default radius of the candidate query run on drop
pub const DEFAULT_SEARCH_RADIUS: f32 = 1.0;

/// Duration hint handed to the animation layer for a failed drop (300ms)
pub const RETURN_TO_SPAWN_MS: u32 = 300;


/// The five Tangram piece kinds
///
/// A standard set holds two large triangles, one medium triangle, two small
/// triangles, one square and one parallelogram. Slots match on the kind only,
/// so the two triangles of the same size are interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceKind {
    #[serde(alias = "small")]
    SmallTriangle,
    #[serde(alias = "medium")]
    MediumTriangle,
    #[serde(alias = "large")]
    LargeTriangle,
    Square,
    #[serde(alias = "para")]
    Parallelogram,
}

impl PieceKind {
    pub const ALL: [PieceKind; 5] = [
        PieceKind::SmallTriangle,
        PieceKind::MediumTriangle,
        PieceKind::LargeTriangle,
        PieceKind::Square,
        PieceKind::Parallelogram,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// Accepts the snake_case names and the short aliases
    /// `small`, `medium`, `large` and `para`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tangram_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("small_triangle"), Some(PieceKind::SmallTriangle));
    /// assert_eq!(PieceKind::from_str("Medium"), Some(PieceKind::MediumTriangle));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "small_triangle" | "small" => Some(PieceKind::SmallTriangle),
            "medium_triangle" | "medium" => Some(PieceKind::MediumTriangle),
            "large_triangle" | "large" => Some(PieceKind::LargeTriangle),
            "square" => Some(PieceKind::Square),
            "parallelogram" | "para" => Some(PieceKind::Parallelogram),
            _ => None,
        }
    }

    /// Convert to snake_case string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::SmallTriangle => "small_triangle",
            PieceKind::MediumTriangle => "medium_triangle",
            PieceKind::LargeTriangle => "large_triangle",
            PieceKind::Square => "square",
            PieceKind::Parallelogram => "parallelogram",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Index of a piece in its board's piece table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub usize);

/// Index of a slot in its board's slot table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(pub usize);

impl PieceId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl SlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "piece#{}", self.0)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot#{}", self.0)
    }
}

/// A 2D world position
///
/// Serialized as a `[x, y]` pair so layout files stay compact.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`
    pub fn distance(self, other: Vec2) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl From<[f32; 2]> for Vec2 {
    fn from(v: [f32; 2]) -> Self {
        Vec2::new(v[0], v[1])
    }
}

impl From<Vec2> for [f32; 2] {
    fn from(v: Vec2) -> Self {
        [v.x, v.y]
    }
}

/// Wrap an angle into `[0, 360)`
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(FULL_TURN_DEG);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= FULL_TURN_DEG {
        0.0
    } else {
        wrapped
    }
}

/// Shortest signed difference from `current` to `target`, in `(-180, 180]`
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let delta = normalize_degrees(target - current);
    if delta > 180.0 {
        delta - FULL_TURN_DEG
    } else {
        delta
    }
}

/// Minimal angular distance between two orientations, in `[0, 180]`
pub fn circular_distance(a: f32, b: f32) -> f32 {
    delta_angle(a, b).abs()
}

/// Positioning instruction handed to the host layer
///
/// The core never animates. It updates its own logical state first and then
/// tells the host where the piece belongs now.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "motion", rename_all = "snake_case")]
pub enum Motion {
    /// Piece follows the pointer while dragged
    Follow { piece: PieceId, position: Vec2 },
    /// Piece snaps onto a slot target
    SnapTo { piece: PieceId, target: Vec2 },
    /// Failed drop: interpolate back to spawn over `duration_ms`
    ReturnToSpawn {
        piece: PieceId,
        spawn: Vec2,
        duration_ms: u32,
    },
    /// Undo/reset: jump to spawn now, cancelling any running interpolation
    ResetToSpawn { piece: PieceId, spawn: Vec2 },
}

impl Motion {
    pub fn piece(&self) -> PieceId {
        match *self {
            Motion::Follow { piece, .. }
            | Motion::SnapTo { piece, .. }
            | Motion::ReturnToSpawn { piece, .. }
            | Motion::ResetToSpawn { piece, .. } => piece,
        }
    }

    /// Final position the piece ends up at
    pub fn destination(&self) -> Vec2 {
        match *self {
            Motion::Follow { position, .. } => position,
            Motion::SnapTo { target, .. } => target,
            Motion::ReturnToSpawn { spawn, .. } | Motion::ResetToSpawn { spawn, .. } => spawn,
        }
    }
}

/// Discrete input events a host feeds into a session
///
/// Pointer positions are already converted to world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum BoardAction {
    /// Grab a piece; vacates its slot immediately
    BeginDrag { piece: PieceId, pointer: Vec2 },
    /// Move the grabbed piece with the pointer
    DragTo { pointer: Vec2 },
    /// Release the grabbed piece and resolve placement
    Drop,
    /// Rotate an unplaced piece by the configured step
    Rotate { piece: PieceId },
    /// Undo the last successful placement
    Undo,
    /// Return every piece to spawn and free every slot
    Reset,
}

impl BoardAction {
    /// Convert to snake_case name for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardAction::BeginDrag { .. } => "begin_drag",
            BoardAction::DragTo { .. } => "drag_to",
            BoardAction::Drop => "drop",
            BoardAction::Rotate { .. } => "rotate",
            BoardAction::Undo => "undo",
            BoardAction::Reset => "reset",
        }
    }
}
