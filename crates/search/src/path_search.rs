//! Breadth-first search over reachable piece states.
//!
//! The frontier explores the configured move alphabet from every state,
//! keyed by the full `PieceState`, so the first path found to a state is a
//! shortest one. Rotations are applied *pure* here - the search never
//! consults wall-kick tables, which keeps its reachable set a proper
//! subset of what a kick-aware player could do.

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use tetrion_core::{Move, MoveKind, PieceState};
use tetrion_engine::{drop_position, fits, is_landed, GameState, Piece};

use crate::algorithm::{LandingPosition, SearchAlgorithm};
use crate::config::Config;
use crate::tspin;

/// Search-tree node. Nodes live in an arena vector and refer to their
/// parent by index; path reconstruction walks those links back to the root.
struct SearchNode {
    piece: Piece,
    last_move: Move,
    parent: Option<usize>,
    depth: usize,
}

/// The root carries a sentinel move that is never emitted into paths.
const ROOT_MOVE: Move = Move::new(MoveKind::Down);

#[derive(Clone, Debug, Default)]
pub struct PathSearch {
    config: Config,
}

impl PathSearch {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn move_alphabet(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(7);
        moves.push(Move::new(MoveKind::Left));
        moves.push(Move::new(MoveKind::Right));
        if self.config.allow_soft_drop {
            moves.push(Move::new(MoveKind::Down));
        }
        if self.config.allow_hard_drop {
            moves.push(Move::new(MoveKind::HardDrop));
        }
        moves.push(Move::new(MoveKind::RotateClockwise));
        moves.push(Move::new(MoveKind::RotateCounterClockwise));
        if self.config.allow_rotate_180 {
            moves.push(Move::new(MoveKind::Rotate180));
        }
        moves
    }

    /// Apply `mv` to a copy of `piece` without touching the game state.
    /// Returns `None` when the move is unsupported here or the result does
    /// not fit on the board.
    fn apply_search_move(&self, game_state: &GameState, piece: &Piece, mv: Move) -> Option<Piece> {
        let mut state = piece.state();
        match mv.kind() {
            MoveKind::Left => state.position.x -= 1,
            MoveKind::Right => state.position.x += 1,
            MoveKind::Down | MoveKind::SoftDrop => state.position.y -= 1,
            MoveKind::Up => state.position.y += 1,
            MoveKind::RotateClockwise => state.rotation = state.rotation.cw(),
            MoveKind::RotateCounterClockwise => state.rotation = state.rotation.ccw(),
            MoveKind::Rotate180 => state.rotation = state.rotation.flip(),
            MoveKind::HardDrop => state.position = drop_position(game_state.board(), piece),
            MoveKind::Hold => return None,
        }

        let mut next = piece.clone();
        next.set_state(state);
        if self.config.is_20g {
            let collapsed = drop_position(game_state.board(), &next);
            if collapsed != next.state().position {
                let mut state = next.state();
                state.position = collapsed;
                next.set_state(state);
            }
        }
        fits(game_state.board(), &next).then_some(next)
    }

    fn expand(
        &self,
        game_state: &GameState,
        arena: &mut Vec<SearchNode>,
        queue: &mut VecDeque<usize>,
        visited: &mut HashSet<PieceState>,
        index: usize,
    ) {
        for mv in self.move_alphabet() {
            let Some(piece) = self.apply_search_move(game_state, &arena[index].piece, mv) else {
                continue;
            };
            if visited.insert(piece.state()) {
                let depth = arena[index].depth + 1;
                arena.push(SearchNode {
                    piece,
                    last_move: mv,
                    parent: Some(index),
                    depth,
                });
                queue.push_back(arena.len() - 1);
            }
        }
    }
}

fn reconstruct_path(arena: &[SearchNode], mut index: usize) -> Vec<Move> {
    let mut path = Vec::new();
    while let Some(parent) = arena[index].parent {
        path.push(arena[index].last_move);
        index = parent;
    }
    path.reverse();
    path
}

impl SearchAlgorithm for PathSearch {
    fn name(&self) -> &str {
        "PathSearch"
    }

    fn config(&self) -> Config {
        self.config
    }

    fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    fn find_landing_positions(
        &self,
        game_state: &GameState,
        piece: &Piece,
        max_depth: usize,
    ) -> Vec<LandingPosition> {
        let mut landings = Vec::new();
        let mut arena = vec![SearchNode {
            piece: piece.clone(),
            last_move: ROOT_MOVE,
            parent: None,
            depth: 0,
        }];
        let mut visited = HashSet::from([piece.state()]);
        let mut queue = VecDeque::from([0]);

        while let Some(index) = queue.pop_front() {
            if is_landed(game_state.board(), &arena[index].piece) {
                let node = &arena[index];
                let rotated_in = node.parent.is_some() && node.last_move.is_rotation();
                if !self.config.last_rotation_only || rotated_in {
                    landings.push(LandingPosition {
                        piece: node.piece.clone(),
                        path: reconstruct_path(&arena, index),
                        t_spin: tspin::classify(game_state.board(), &node.piece, rotated_in),
                        lines_cleared: None,
                        valid: true,
                    });
                }
            }

            // Depth-capped nodes still record their landing above; they
            // just stop producing successors.
            if max_depth > 0 && arena[index].depth >= max_depth {
                continue;
            }
            self.expand(game_state, &mut arena, &mut queue, &mut visited, index);
        }

        debug!(
            nodes = arena.len(),
            landings = landings.len(),
            "landing search complete"
        );
        landings
    }

    fn find_path(&self, game_state: &GameState, start: &Piece, target: &Piece) -> Vec<Move> {
        let target_state = target.state();
        let mut arena = vec![SearchNode {
            piece: start.clone(),
            last_move: ROOT_MOVE,
            parent: None,
            depth: 0,
        }];
        let mut visited = HashSet::from([start.state()]);
        let mut queue = VecDeque::from([0]);

        while let Some(index) = queue.pop_front() {
            if arena[index].piece.state() == target_state {
                let path = reconstruct_path(&arena, index);
                debug!(nodes = arena.len(), moves = path.len(), "path found");
                return path;
            }
            self.expand(game_state, &mut arena, &mut queue, &mut visited, index);
        }

        debug!(nodes = arena.len(), "target unreachable");
        Vec::new()
    }

    fn can_place_piece(&self, game_state: &GameState, piece: &Piece) -> bool {
        fits(game_state.board(), piece)
    }
}
