//! Tetrion core crate - fundamental types for the Tetris engine.

mod board;
mod error;
mod moves;
mod piece;

pub use board::{Board, MAX_BOARD_HEIGHT, MAX_BOARD_WIDTH, MIN_BOARD_DIMENSION};
pub use error::Error;
pub use moves::{KickOffset, Move, MoveKind, WallKickData, MAX_WALL_KICK_TESTS};
pub use piece::{PieceState, PieceType, Position, Rotation};
