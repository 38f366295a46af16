//! Abstract interface for placement search algorithms.

use tetrion_core::Move;
use tetrion_engine::{GameState, Piece};

use crate::config::Config;
use crate::tspin::TSpinType;

/// A reachable resting place for a piece, with the move path that produces
/// it from the search root.
#[derive(Clone, Debug)]
pub struct LandingPosition {
    /// The piece in its landed state.
    pub piece: Piece,
    /// Moves from the search root to this landing, in play order.
    pub path: Vec<Move>,
    pub t_spin: TSpinType,
    /// Rows a lock here would clear; populated by searches that evaluate it.
    pub lines_cleared: Option<u32>,
    pub valid: bool,
}

impl LandingPosition {
    pub fn new(piece: Piece) -> Self {
        Self {
            piece,
            path: Vec::new(),
            t_spin: TSpinType::None,
            lines_cleared: None,
            valid: true,
        }
    }

    pub fn is_t_spin(&self) -> bool {
        self.t_spin != TSpinType::None
    }
}

/// A search over the graph of reachable `(piece, position, rotation)`
/// states. Implementations are pure: they never mutate the game state they
/// are handed.
pub trait SearchAlgorithm: Send + Sync {
    fn name(&self) -> &str;

    fn config(&self) -> Config;

    fn set_config(&mut self, config: Config);

    /// Every reachable landing position for `piece`, searching at most
    /// `max_depth` moves deep (0 for unlimited).
    fn find_landing_positions(
        &self,
        game_state: &GameState,
        piece: &Piece,
        max_depth: usize,
    ) -> Vec<LandingPosition>;

    /// A shortest move sequence taking `start` to `target`, empty when the
    /// target is unreachable.
    fn find_path(&self, game_state: &GameState, start: &Piece, target: &Piece) -> Vec<Move>;

    /// Whether `piece` can rest at its current state on the board.
    fn can_place_piece(&self, game_state: &GameState, piece: &Piece) -> bool;
}
