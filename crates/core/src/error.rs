//! Error kinds shared across the workspace.
//!
//! Recoverable outcomes (blocked moves, failed spawns, refused holds) are
//! reported through `bool` returns with the state left untouched; the
//! variants here cover programming errors such as invalid constructor
//! arguments and lookups with bad keys.

use crate::board::{MAX_BOARD_HEIGHT, MAX_BOARD_WIDTH, MIN_BOARD_DIMENSION};

#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Board construction with a width or height outside the supported range.
    #[error(
        "board dimensions {width}x{height} unsupported (width {MIN_BOARD_DIMENSION}..={MAX_BOARD_WIDTH}, height {MIN_BOARD_DIMENSION}..={MAX_BOARD_HEIGHT})"
    )]
    InvalidDimensions { width: i32, height: i32 },

    /// A piece was spawned on a game state with no rotation system bound.
    #[error("no rotation system is bound")]
    MissingRotationSystem,

    /// A wall-kick index was attached to a translation or drop move.
    #[error("wall kick index is only valid on rotation moves")]
    WallKickOnNonRotation,

    /// A wall-kick lookup past the end of a kick table.
    #[error("wall kick index {index} out of range for a table of {count} tests")]
    WallKickIndexOutOfRange { index: usize, count: usize },

    /// A letter outside the `I, J, L, O, S, T, Z` set.
    #[error("no tetromino is written '{0}'")]
    InvalidPieceType(char),
}
