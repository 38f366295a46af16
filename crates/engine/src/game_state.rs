//! Game state: board, falling piece, hold slot, next queue, and the
//! rule-bound move application that ties them together.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use tetrion_core::{Board, Error, KickOffset, Move, MoveKind, PieceType, Rotation};

use crate::collision;
use crate::piece::Piece;
use crate::rotation_system::RotationSystem;

/// The complete state of one game.
///
/// Recoverable outcomes (blocked moves, collided spawns, refused holds)
/// come back as `false` with the state untouched; `spawn_piece` and
/// `spawn_next_piece` additionally error when no rotation system is bound.
/// Not safe for concurrent mutation - callers serialise access.
#[derive(Clone)]
pub struct GameState {
    board: Board,
    current_piece: Option<Piece>,
    held_piece: Option<PieceType>,
    hold_used: bool,
    next_pieces: VecDeque<PieceType>,
    lines_cleared: u32,
    game_over: bool,
    rotation_system: Option<Arc<dyn RotationSystem>>,
}

impl GameState {
    /// A game with no rotation system bound yet; spawning requires one.
    pub fn new(width: i32, height: i32) -> Result<Self, Error> {
        Ok(Self {
            board: Board::new(width, height)?,
            current_piece: None,
            held_piece: None,
            hold_used: false,
            next_pieces: VecDeque::new(),
            lines_cleared: 0,
            game_over: false,
            rotation_system: None,
        })
    }

    pub fn with_rotation_system(
        width: i32,
        height: i32,
        rotation_system: Arc<dyn RotationSystem>,
    ) -> Result<Self, Error> {
        let mut state = Self::new(width, height)?;
        state.rotation_system = Some(rotation_system);
        Ok(state)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn current_piece(&self) -> Option<&Piece> {
        self.current_piece.as_ref()
    }

    pub fn current_piece_mut(&mut self) -> Option<&mut Piece> {
        self.current_piece.as_mut()
    }

    pub fn held_piece(&self) -> Option<PieceType> {
        self.held_piece
    }

    pub fn set_held_piece(&mut self, piece: Option<PieceType>) {
        self.held_piece = piece;
    }

    pub fn is_hold_used(&self) -> bool {
        self.hold_used
    }

    pub fn set_hold_used(&mut self, used: bool) {
        self.hold_used = used;
    }

    pub fn next_pieces(&self) -> &VecDeque<PieceType> {
        &self.next_pieces
    }

    pub fn next_pieces_mut(&mut self) -> &mut VecDeque<PieceType> {
        &mut self.next_pieces
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn set_lines_cleared(&mut self, lines: u32) {
        self.lines_cleared = lines;
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn set_game_over(&mut self, game_over: bool) {
        self.game_over = game_over;
    }

    pub fn rotation_system(&self) -> Option<Arc<dyn RotationSystem>> {
        self.rotation_system.clone()
    }

    pub fn set_rotation_system(&mut self, rotation_system: Arc<dyn RotationSystem>) {
        if let Some(piece) = self.current_piece.as_mut() {
            piece.set_rotation_system(rotation_system.clone());
        }
        self.rotation_system = Some(rotation_system);
    }

    /// Apply a move to the current piece. The candidate state is validated
    /// against the board before it is committed; on failure the piece is
    /// untouched and the result is `false`.
    ///
    /// Rotation moves carrying a wall-kick index look the offset up in the
    /// table for the rotation *before* the turn. The engine does not
    /// iterate kick tests itself - callers try indices in order and keep
    /// the first that validates.
    pub fn apply_move(&mut self, mv: Move) -> bool {
        if self.game_over {
            return false;
        }
        if mv.kind() == MoveKind::Hold {
            return self.hold_current_piece();
        }
        let Some(piece) = self.current_piece.as_ref() else {
            return false;
        };

        let mut state = piece.state();
        match mv.kind() {
            MoveKind::Left => state.position.x -= 1,
            MoveKind::Right => state.position.x += 1,
            MoveKind::Down | MoveKind::SoftDrop => state.position.y -= 1,
            MoveKind::Up => state.position.y += 1,
            MoveKind::HardDrop => {
                state.position = collision::drop_position(&self.board, piece);
            }
            MoveKind::RotateClockwise | MoveKind::RotateCounterClockwise | MoveKind::Rotate180 => {
                let from = state.rotation;
                state.rotation = match mv.kind() {
                    MoveKind::RotateClockwise => from.cw(),
                    MoveKind::RotateCounterClockwise => from.ccw(),
                    _ => from.flip(),
                };
                if let Some(offset) = self.kick_offset(mv, state.piece, from) {
                    state.position.x += offset.dx;
                    state.position.y += offset.dy;
                }
            }
            MoveKind::Hold => return false,
        }

        let mut candidate = piece.clone();
        candidate.set_state(state);
        if !collision::fits(&self.board, &candidate) {
            return false;
        }
        self.current_piece = Some(candidate);
        true
    }

    fn kick_offset(&self, mv: Move, piece: PieceType, from: Rotation) -> Option<KickOffset> {
        let index = mv.wall_kick_index()?;
        let rotation_system = self.rotation_system.as_ref()?;
        let table = match mv.kind() {
            MoveKind::RotateClockwise => rotation_system.clockwise_wall_kicks(piece, from),
            MoveKind::RotateCounterClockwise => {
                rotation_system.counter_clockwise_wall_kicks(piece, from)
            }
            MoveKind::Rotate180 => rotation_system.rotate_180_wall_kicks(piece, from),
            _ => return None,
        };
        // An index past the end of the table applies no offset.
        table.offset(index).ok()
    }

    /// Stamp the current piece into the board, clear any filled rows, and
    /// return how many were cleared. Frees the hold for the next turn.
    pub fn lock_current_piece(&mut self) -> u32 {
        let Some(piece) = self.current_piece.take() else {
            return 0;
        };
        for cell in piece.absolute_filled_cells() {
            self.board.fill_cell(cell.x, cell.y);
        }
        let cleared = self.board.clear_filled_rows();
        self.lines_cleared += cleared;
        self.hold_used = false;
        cleared
    }

    /// Spawn `piece` at the rotation system's initial state. A colliding
    /// spawn installs the piece, marks the game over, and returns
    /// `Ok(false)`.
    pub fn spawn_piece(&mut self, piece: PieceType) -> Result<bool, Error> {
        let rotation_system = self
            .rotation_system
            .clone()
            .ok_or(Error::MissingRotationSystem)?;
        let state =
            rotation_system.initial_state(piece, self.board.width(), self.board.height());
        let spawned = Piece::new(state, rotation_system);

        let placeable = collision::fits(&self.board, &spawned);
        self.current_piece = Some(spawned);
        if !placeable {
            self.game_over = true;
        }
        Ok(placeable)
    }

    /// Pop the head of the next queue and spawn it. `Ok(false)` when the
    /// queue is empty.
    pub fn spawn_next_piece(&mut self) -> Result<bool, Error> {
        let Some(next) = self.next_pieces.pop_front() else {
            return Ok(false);
        };
        self.spawn_piece(next)
    }

    /// Stash the current piece, once per turn. Spawns the previously held
    /// piece, or the head of the queue when nothing is held yet. On any
    /// failure the hold slot is restored and the result is `false`.
    pub fn hold_current_piece(&mut self) -> bool {
        if self.hold_used {
            return false;
        }
        let Some(current) = self.current_piece.as_ref() else {
            return false;
        };
        let current_type = current.state().piece;

        match self.held_piece {
            Some(held) => {
                self.held_piece = Some(current_type);
                if !matches!(self.spawn_piece(held), Ok(true)) {
                    self.held_piece = Some(held);
                    return false;
                }
            }
            None => {
                self.held_piece = Some(current_type);
                if !matches!(self.spawn_next_piece(), Ok(true)) {
                    self.held_piece = None;
                    return false;
                }
            }
        }

        self.hold_used = true;
        true
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Game state:")?;
        writeln!(f, "  Board: {}x{}", self.board.width(), self.board.height())?;
        match &self.current_piece {
            Some(piece) => writeln!(f, "  Current piece: {}", piece.state().piece.as_char())?,
            None => writeln!(f, "  Current piece: None")?,
        }
        match self.held_piece {
            Some(piece) => writeln!(f, "  Held piece: {}", piece.as_char())?,
            None => writeln!(f, "  Held piece: None")?,
        }
        writeln!(f, "  Hold used: {}", if self.hold_used { "yes" } else { "no" })?;
        write!(f, "  Next pieces:")?;
        for piece in &self.next_pieces {
            write!(f, " {}", piece.as_char())?;
        }
        writeln!(f)?;
        writeln!(f, "  Lines cleared: {}", self.lines_cleared)?;
        writeln!(f, "  Game over: {}", if self.game_over { "yes" } else { "no" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Srs;
    use tetrion_core::Position;

    fn game() -> GameState {
        GameState::with_rotation_system(10, 20, Arc::new(Srs)).unwrap()
    }

    #[test]
    fn test_spawn_requires_rotation_system() {
        let mut bare = GameState::new(10, 20).unwrap();
        assert_eq!(bare.spawn_piece(PieceType::T), Err(Error::MissingRotationSystem));
        assert!(bare.current_piece().is_none());
        assert!(!bare.is_game_over());
    }

    #[test]
    fn test_spawn_on_empty_board() {
        let mut g = game();
        assert_eq!(g.spawn_piece(PieceType::T), Ok(true));
        let piece = g.current_piece().unwrap();
        assert_eq!(piece.state().position, Position::new(3, 19));
        assert_eq!(piece.state().rotation, Rotation::R0);
        assert!(!g.is_game_over());
    }

    #[test]
    fn test_blocked_spawn_is_game_over() {
        let mut g = game();
        // Wall off the spawn rows.
        for y in 18..20 {
            g.board_mut().fill_row(y);
        }
        assert_eq!(g.spawn_piece(PieceType::T), Ok(false));
        assert!(g.is_game_over());
        // A dead game refuses every move.
        assert!(!g.apply_move(Move::new(MoveKind::Left)));
    }

    #[test]
    fn test_translations() {
        let mut g = game();
        g.spawn_piece(PieceType::T).unwrap();
        assert!(g.apply_move(Move::new(MoveKind::Left)));
        assert!(g.apply_move(Move::new(MoveKind::Down)));
        assert!(g.apply_move(Move::new(MoveKind::Up)));
        assert!(g.apply_move(Move::new(MoveKind::Right)));
        assert_eq!(
            g.current_piece().unwrap().state().position,
            Position::new(3, 19)
        );
    }

    #[test]
    fn test_blocked_move_leaves_piece_untouched() {
        let mut g = game();
        g.spawn_piece(PieceType::T).unwrap();
        for _ in 0..3 {
            g.apply_move(Move::new(MoveKind::Left));
        }
        let before = g.current_piece().unwrap().state();
        assert_eq!(before.position, Position::new(0, 19));
        assert!(!g.apply_move(Move::new(MoveKind::Left)));
        assert_eq!(g.current_piece().unwrap().state(), before);
    }

    #[test]
    fn test_hard_drop_and_lock() {
        let mut g = game();
        g.spawn_piece(PieceType::O).unwrap();
        assert_eq!(
            g.current_piece().unwrap().state().position,
            Position::new(3, 19)
        );
        assert!(g.apply_move(Move::new(MoveKind::Right)));
        assert!(g.apply_move(Move::new(MoveKind::HardDrop)));
        assert_eq!(
            g.current_piece().unwrap().state().position,
            Position::new(4, 0)
        );
        assert_eq!(g.lock_current_piece(), 0);
        assert_eq!(g.board().filled_cell_count(), 4);
        assert!(g.current_piece().is_none());
    }

    #[test]
    fn test_lock_counts_cleared_lines() {
        let mut g = game();
        // Leave a two-wide well at columns 4 and 5 on row 0.
        for x in 0..10 {
            if x != 4 && x != 5 {
                g.board_mut().fill_cell(x, 0);
            }
        }
        g.spawn_piece(PieceType::O).unwrap();
        assert!(g.apply_move(Move::new(MoveKind::Right)));
        assert!(g.apply_move(Move::new(MoveKind::HardDrop)));
        assert_eq!(g.lock_current_piece(), 1);
        assert_eq!(g.lines_cleared(), 1);
        // The O's upper half survives on row 0.
        assert!(g.board().is_filled(4, 0));
        assert!(g.board().is_filled(5, 0));
        assert_eq!(g.board().filled_cell_count(), 2);
    }

    #[test]
    fn test_soft_drop_is_one_down() {
        let mut g = game();
        g.spawn_piece(PieceType::T).unwrap();
        assert!(g.apply_move(Move::new(MoveKind::SoftDrop)));
        assert_eq!(
            g.current_piece().unwrap().state().position,
            Position::new(3, 18)
        );
    }

    #[test]
    fn test_hold_swaps_with_queue_then_slot() {
        let mut g = game();
        g.next_pieces_mut()
            .extend([PieceType::I, PieceType::S, PieceType::Z]);
        g.spawn_next_piece().unwrap();
        assert_eq!(g.current_piece().unwrap().state().piece, PieceType::I);

        // First hold stores I and spawns S from the queue.
        assert!(g.hold_current_piece());
        assert_eq!(g.held_piece(), Some(PieceType::I));
        assert_eq!(g.current_piece().unwrap().state().piece, PieceType::S);
        assert!(g.is_hold_used());

        // Second hold this turn is refused.
        assert!(!g.apply_move(Move::new(MoveKind::Hold)));

        // Locking frees the hold again; the next hold swaps the slot.
        g.apply_move(Move::new(MoveKind::HardDrop));
        g.lock_current_piece();
        g.spawn_next_piece().unwrap();
        assert_eq!(g.current_piece().unwrap().state().piece, PieceType::Z);
        assert!(g.hold_current_piece());
        assert_eq!(g.held_piece(), Some(PieceType::Z));
        assert_eq!(g.current_piece().unwrap().state().piece, PieceType::I);
    }

    #[test]
    fn test_hold_with_empty_queue_restores_slot() {
        let mut g = game();
        g.spawn_piece(PieceType::T).unwrap();
        assert!(!g.hold_current_piece());
        assert_eq!(g.held_piece(), None);
        assert!(!g.is_hold_used());
        assert_eq!(g.current_piece().unwrap().state().piece, PieceType::T);
    }

    #[test]
    fn test_display_dump() {
        let mut g = game();
        g.next_pieces_mut().extend([PieceType::L, PieceType::J]);
        g.spawn_piece(PieceType::T).unwrap();
        let dump = g.to_string();
        // Informational only - just check it mentions the interesting bits.
        assert!(dump.contains("10x20"));
        assert!(dump.contains('T'));
        assert!(dump.contains("Lines cleared: 0"));
    }
}
