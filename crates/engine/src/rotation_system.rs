//! Abstract interface for rotation systems.

use std::sync::Arc;

use tetrion_core::{PieceState, PieceType, Rotation, WallKickData};

/// A 4x4 occupancy mask. Bit `y * 4 + x` is the cell at column `x`, row
/// `y` of the box, with `y = 0` the bottom row.
pub type ShapeMask = u16;

/// A rotation ruleset: shape tables, wall-kick tables, and spawn geometry.
///
/// Implementations carry no mutable state observable by clients, so a
/// system can be shared freely between a game state and its pieces; the
/// registry hands out fresh handles via [`RotationSystem::clone_system`].
pub trait RotationSystem: Send + Sync {
    fn name(&self) -> &str;

    /// Shape of `piece` in `rotation`.
    fn shape(&self, piece: PieceType, rotation: Rotation) -> ShapeMask;

    /// Kick tests for a clockwise rotation out of `from`.
    fn clockwise_wall_kicks(&self, piece: PieceType, from: Rotation) -> WallKickData;

    /// Kick tests for a counter-clockwise rotation out of `from`.
    fn counter_clockwise_wall_kicks(&self, piece: PieceType, from: Rotation) -> WallKickData;

    /// Kick tests for a half-turn out of `from`.
    fn rotate_180_wall_kicks(&self, piece: PieceType, from: Rotation) -> WallKickData;

    /// Spawn state for `piece` on a board of the given dimensions.
    fn initial_state(&self, piece: PieceType, board_width: i32, board_height: i32) -> PieceState;

    /// Whether half-turn rotations are part of the ruleset.
    fn supports_180(&self) -> bool;

    /// A fresh shared instance of this system.
    fn clone_system(&self) -> Arc<dyn RotationSystem>;
}
