//! Collision checks between a piece and the board.
//!
//! A placement is valid when every cell is inside the side walls, at or
//! above the floor, and over empty board cells. The field is open at the
//! top: cells at `y >= height` read as empty, so a freshly spawned piece
//! may overhang the top edge of a short board.

use tetrion_core::{Board, Position};

use crate::piece::Piece;

/// Whether the piece fits at its current position.
pub fn fits(board: &Board, piece: &Piece) -> bool {
    fits_at(board, piece, piece.state().position)
}

/// Whether the piece would fit with its bottom-left corner at `position`.
pub fn fits_at(board: &Board, piece: &Piece, position: Position) -> bool {
    piece.filled_cells().iter().all(|cell| {
        let x = position.x + cell.x;
        let y = position.y + cell.y;
        x >= 0 && x < board.width() && y >= 0 && !board.is_filled(x, y)
    })
}

/// Whether the piece is resting: moving one cell down would collide.
pub fn is_landed(board: &Board, piece: &Piece) -> bool {
    let position = piece.state().position;
    !fits_at(board, piece, Position::new(position.x, position.y - 1))
}

/// The lowest position reachable by dropping the piece straight down from
/// its current state.
pub fn drop_position(board: &Board, piece: &Piece) -> Position {
    let mut position = piece.state().position;
    if piece.filled_cells().is_empty() {
        return position;
    }
    loop {
        let below = Position::new(position.x, position.y - 1);
        if !fits_at(board, piece, below) {
            return position;
        }
        position = below;
    }
}
