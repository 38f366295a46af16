//! Three-corner T-spin classification and the T-spin hunting search.

use serde::{Deserialize, Serialize};
use tracing::trace;

use tetrion_core::{Board, Move, PieceType, Rotation};
use tetrion_engine::{GameState, Piece};

use crate::algorithm::{LandingPosition, SearchAlgorithm};
use crate::config::{Config, TSpinConfig};
use crate::path_search::PathSearch;

/// T-spin class of a landing: 0 none, 1 regular, 2 mini.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum TSpinType {
    #[default]
    None,
    Regular,
    Mini,
}

/// Classify a landed piece with the three-corner rule.
///
/// Only T pieces reached by a final rotation qualify. The four diagonal
/// neighbours of the piece position count as occupied when filled or
/// outside the board; three occupied corners make a regular T-spin, and
/// exactly two make a mini when they are the rotation's front pair.
pub(crate) fn classify(board: &Board, piece: &Piece, last_move_was_rotation: bool) -> TSpinType {
    let state = piece.state();
    if state.piece != PieceType::T || !last_move_was_rotation {
        return TSpinType::None;
    }

    let pivot = state.position;
    let occupied = |dx: i32, dy: i32| -> bool {
        let x = pivot.x + dx;
        let y = pivot.y + dy;
        if x < 0 || x >= board.width() || y < 0 || y >= board.height() {
            return true;
        }
        board.is_filled(x, y)
    };

    let top_left = occupied(-1, 1);
    let top_right = occupied(1, 1);
    let bottom_left = occupied(-1, -1);
    let bottom_right = occupied(1, -1);
    let corners = [top_left, top_right, bottom_left, bottom_right]
        .into_iter()
        .filter(|&filled| filled)
        .count();

    if corners >= 3 {
        return TSpinType::Regular;
    }
    if corners == 2 {
        let front = match state.rotation {
            Rotation::R0 => top_left && top_right,
            Rotation::R90 => top_right && bottom_right,
            Rotation::R180 => bottom_left && bottom_right,
            Rotation::R270 => top_left && bottom_left,
        };
        if front {
            return TSpinType::Mini;
        }
    }
    TSpinType::None
}

/// Rows a lock at this placement would clear.
fn lines_cleared_by(board: &Board, piece: &Piece) -> u32 {
    let mut board = board.clone();
    for cell in piece.absolute_filled_cells() {
        board.fill_cell(cell.x, cell.y);
    }
    board.clear_filled_rows()
}

/// Placement search specialised for T-spin hunting.
///
/// Enumeration is delegated to [`PathSearch`]; this layer re-classifies
/// each landing under its own flags, annotates the lines a lock would
/// clear, and optionally sorts T-spins to the front.
#[derive(Clone, Debug)]
pub struct TSpinSearch {
    config: TSpinConfig,
    path_search: PathSearch,
}

impl Default for TSpinSearch {
    fn default() -> Self {
        Self::new(TSpinConfig::default())
    }
}

impl TSpinSearch {
    pub fn new(config: TSpinConfig) -> Self {
        Self {
            path_search: PathSearch::new(config.search),
            config,
        }
    }

    pub fn t_spin_config(&self) -> TSpinConfig {
        self.config
    }

    pub fn set_t_spin_config(&mut self, config: TSpinConfig) {
        self.path_search.set_config(config.search);
        self.config = config;
    }

    /// Classify `piece` as it stands, treating `last_move` as the move that
    /// put it there.
    pub fn detect_t_spin(&self, game_state: &GameState, piece: &Piece, last_move: Move) -> TSpinType {
        let rotated_in = last_move.is_rotation() || !self.config.require_last_rotation;
        self.demote(classify(game_state.board(), piece, rotated_in))
    }

    fn demote(&self, spin: TSpinType) -> TSpinType {
        if spin == TSpinType::Mini && !self.config.allow_mini_t_spins {
            TSpinType::None
        } else {
            spin
        }
    }
}

impl SearchAlgorithm for TSpinSearch {
    fn name(&self) -> &str {
        "TSpinSearch"
    }

    fn config(&self) -> Config {
        self.config.search
    }

    fn set_config(&mut self, config: Config) {
        self.config.search = config;
        self.path_search.set_config(config);
    }

    fn find_landing_positions(
        &self,
        game_state: &GameState,
        piece: &Piece,
        max_depth: usize,
    ) -> Vec<LandingPosition> {
        let mut landings = self
            .path_search
            .find_landing_positions(game_state, piece, max_depth);

        for landing in &mut landings {
            let rotated_in = !self.config.require_last_rotation
                || landing.path.last().is_some_and(|mv| mv.is_rotation());
            landing.t_spin = self.demote(classify(game_state.board(), &landing.piece, rotated_in));
            landing.lines_cleared = Some(lines_cleared_by(game_state.board(), &landing.piece));
        }

        if self.config.prioritize_t_spins {
            landings.sort_by_key(|landing| match landing.t_spin {
                TSpinType::Regular => 0,
                TSpinType::Mini => 1,
                TSpinType::None => 2,
            });
        }

        let spins = landings.iter().filter(|landing| landing.is_t_spin()).count();
        trace!(landings = landings.len(), spins, "t-spin search complete");
        landings
    }

    fn find_path(&self, game_state: &GameState, start: &Piece, target: &Piece) -> Vec<Move> {
        self.path_search.find_path(game_state, start, target)
    }

    fn can_place_piece(&self, game_state: &GameState, piece: &Piece) -> bool {
        self.path_search.can_place_piece(game_state, piece)
    }
}
