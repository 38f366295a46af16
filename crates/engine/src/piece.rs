//! A falling tetromino bound to a rotation system.

use std::fmt;
use std::sync::Arc;

use arrayvec::ArrayVec;
use tetrion_core::{PieceState, Position};

use crate::rotation_system::RotationSystem;

/// Side length of the shape box.
const SHAPE_BOX: i32 = 4;

/// A piece and the shape metadata derived from its current state: the
/// filled cells tightened to their bounding box, the box dimensions, and a
/// per-column profile.
///
/// The cells are relative to the piece's bottom-left corner; the piece's
/// position anchors that corner on the board. A piece never reads the
/// board - collision checking is the caller's job (see [`crate::fits`]).
#[derive(Clone)]
pub struct Piece {
    state: PieceState,
    rotation_system: Arc<dyn RotationSystem>,
    cells: ArrayVec<Position, 16>,
    width: i32,
    height: i32,
    column_heights: [i32; SHAPE_BOX as usize],
    column_bottoms: [i32; SHAPE_BOX as usize],
}

impl Piece {
    pub fn new(state: PieceState, rotation_system: Arc<dyn RotationSystem>) -> Self {
        let mut piece = Self {
            state,
            rotation_system,
            cells: ArrayVec::new(),
            width: 0,
            height: 0,
            column_heights: [0; SHAPE_BOX as usize],
            column_bottoms: [SHAPE_BOX; SHAPE_BOX as usize],
        };
        piece.refresh();
        piece
    }

    pub fn state(&self) -> PieceState {
        self.state
    }

    pub fn set_state(&mut self, state: PieceState) {
        self.state = state;
        self.refresh();
    }

    pub fn rotation_system(&self) -> &Arc<dyn RotationSystem> {
        &self.rotation_system
    }

    pub fn set_rotation_system(&mut self, rotation_system: Arc<dyn RotationSystem>) {
        self.rotation_system = rotation_system;
        self.refresh();
    }

    /// Width of the tight bounding box.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height of the tight bounding box.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Top of the filled cells per shape column, 0 for empty columns.
    pub fn column_heights(&self) -> &[i32; SHAPE_BOX as usize] {
        &self.column_heights
    }

    /// Bottom of the filled cells per shape column, [`SHAPE_BOX`] for empty
    /// columns.
    pub fn column_bottoms(&self) -> &[i32; SHAPE_BOX as usize] {
        &self.column_bottoms
    }

    /// The filled cells relative to the piece's bottom-left corner, in
    /// bottom-up, left-to-right order.
    pub fn filled_cells(&self) -> &[Position] {
        &self.cells
    }

    /// The filled cells translated by the piece's position.
    pub fn absolute_filled_cells(&self) -> impl Iterator<Item = Position> + '_ {
        let position = self.state.position;
        self.cells.iter().map(move |&cell| cell + position)
    }

    fn refresh(&mut self) {
        let mask = self
            .rotation_system
            .shape(self.state.piece, self.state.rotation);

        self.cells.clear();
        self.width = 0;
        self.height = 0;
        self.column_heights = [0; SHAPE_BOX as usize];
        self.column_bottoms = [SHAPE_BOX; SHAPE_BOX as usize];

        let mut min_x = SHAPE_BOX;
        let mut min_y = SHAPE_BOX;
        for y in 0..SHAPE_BOX {
            for x in 0..SHAPE_BOX {
                if mask >> (y * SHAPE_BOX + x) & 1 == 1 {
                    min_x = min_x.min(x);
                    min_y = min_y.min(y);
                }
            }
        }
        if min_x == SHAPE_BOX {
            return;
        }

        for y in 0..SHAPE_BOX {
            for x in 0..SHAPE_BOX {
                if mask >> (y * SHAPE_BOX + x) & 1 == 1 {
                    let cell = Position::new(x - min_x, y - min_y);
                    self.cells.push(cell);
                    self.width = self.width.max(cell.x + 1);
                    self.height = self.height.max(cell.y + 1);
                    let column = cell.x as usize;
                    self.column_heights[column] = self.column_heights[column].max(cell.y + 1);
                    self.column_bottoms[column] = self.column_bottoms[column].min(cell.y);
                }
            }
        }
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Piece")
            .field("state", &self.state)
            .field("rotation_system", &self.rotation_system.name())
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
