//! Super Rotation System: shape tables, wall-kick tables, spawn geometry.
//!
//! Kick data follows the standard SRS reference
//! (<https://harddrop.com/wiki/SRS>): J/L/S/T/Z share one clockwise and one
//! counter-clockwise table, I has its own pair, O kicks are the identity
//! test only. Half-turns have no kicks in standard SRS.

use std::sync::Arc;

use tetrion_core::{KickOffset, PieceState, PieceType, Position, Rotation, WallKickData};

use crate::rotation_system::{RotationSystem, ShapeMask};

/// Build a shape mask from four cell coordinates of the 4x4 box, `y` up.
const fn mask(cells: [(u16, u16); 4]) -> ShapeMask {
    let mut bits = 0;
    let mut i = 0;
    while i < 4 {
        bits |= 1u16 << (cells[i].1 * 4 + cells[i].0);
        i += 1;
    }
    bits
}

/// Shape masks indexed by `[PieceType::index()][Rotation::index()]`.
///
/// Cells are listed as `(x, y)` with `y = 0` the bottom row of the box, so
/// each shape reads bottom-up. At `R0` the flat side of every piece faces
/// up (the T spawns with its nub pointing down); `R90` is one clockwise
/// step from there.
const SHAPES: [[ShapeMask; 4]; 7] = [
    // I
    [
        mask([(0, 1), (1, 1), (2, 1), (3, 1)]),
        mask([(2, 0), (2, 1), (2, 2), (2, 3)]),
        mask([(0, 2), (1, 2), (2, 2), (3, 2)]),
        mask([(1, 0), (1, 1), (1, 2), (1, 3)]),
    ],
    // J
    [
        mask([(0, 1), (0, 2), (1, 2), (2, 2)]),
        mask([(1, 1), (2, 1), (1, 2), (1, 3)]),
        mask([(0, 2), (1, 2), (2, 2), (2, 3)]),
        mask([(1, 1), (1, 2), (0, 3), (1, 3)]),
    ],
    // L
    [
        mask([(2, 1), (0, 2), (1, 2), (2, 2)]),
        mask([(1, 1), (1, 2), (1, 3), (2, 3)]),
        mask([(0, 2), (1, 2), (2, 2), (0, 3)]),
        mask([(0, 1), (1, 1), (1, 2), (1, 3)]),
    ],
    // O (identical in every rotation)
    [
        mask([(1, 1), (2, 1), (1, 2), (2, 2)]),
        mask([(1, 1), (2, 1), (1, 2), (2, 2)]),
        mask([(1, 1), (2, 1), (1, 2), (2, 2)]),
        mask([(1, 1), (2, 1), (1, 2), (2, 2)]),
    ],
    // S
    [
        mask([(1, 1), (2, 1), (0, 2), (1, 2)]),
        mask([(1, 1), (1, 2), (2, 2), (2, 3)]),
        mask([(1, 2), (2, 2), (0, 3), (1, 3)]),
        mask([(0, 1), (0, 2), (1, 2), (1, 3)]),
    ],
    // T
    [
        mask([(1, 1), (0, 2), (1, 2), (2, 2)]),
        mask([(1, 1), (1, 2), (2, 2), (1, 3)]),
        mask([(0, 2), (1, 2), (2, 2), (1, 3)]),
        mask([(1, 1), (0, 2), (1, 2), (1, 3)]),
    ],
    // Z
    [
        mask([(0, 1), (1, 1), (1, 2), (2, 2)]),
        mask([(2, 1), (1, 2), (2, 2), (1, 3)]),
        mask([(0, 2), (1, 2), (1, 3), (2, 3)]),
        mask([(1, 1), (0, 2), (1, 2), (0, 3)]),
    ],
];

const fn kick(dx: i32, dy: i32) -> KickOffset {
    KickOffset::new(dx, dy)
}

/// J/L/S/T/Z clockwise kicks, indexed by the rotation before the turn.
const JLSTZ_CW_KICKS: [[KickOffset; 5]; 4] = [
    [kick(0, 0), kick(-1, 0), kick(-1, 1), kick(0, -2), kick(-1, -2)],
    [kick(0, 0), kick(1, 0), kick(1, -1), kick(0, 2), kick(1, 2)],
    [kick(0, 0), kick(1, 0), kick(1, 1), kick(0, -2), kick(1, -2)],
    [kick(0, 0), kick(-1, 0), kick(-1, -1), kick(0, 2), kick(-1, 2)],
];

/// J/L/S/T/Z counter-clockwise kicks, indexed by the rotation before the
/// turn.
const JLSTZ_CCW_KICKS: [[KickOffset; 5]; 4] = [
    [kick(0, 0), kick(1, 0), kick(1, 1), kick(0, -2), kick(1, -2)],
    [kick(0, 0), kick(1, 0), kick(1, -1), kick(0, 2), kick(1, 2)],
    [kick(0, 0), kick(-1, 0), kick(-1, 1), kick(0, -2), kick(-1, -2)],
    [kick(0, 0), kick(-1, 0), kick(-1, -1), kick(0, 2), kick(-1, 2)],
];

/// I-piece clockwise kicks.
const I_CW_KICKS: [[KickOffset; 5]; 4] = [
    [kick(0, 0), kick(-2, 0), kick(1, 0), kick(-2, -1), kick(1, 2)],
    [kick(0, 0), kick(-1, 0), kick(2, 0), kick(-1, 2), kick(2, -1)],
    [kick(0, 0), kick(2, 0), kick(-1, 0), kick(2, 1), kick(-1, -2)],
    [kick(0, 0), kick(1, 0), kick(-2, 0), kick(1, -2), kick(-2, 1)],
];

/// I-piece counter-clockwise kicks.
const I_CCW_KICKS: [[KickOffset; 5]; 4] = [
    [kick(0, 0), kick(-1, 0), kick(2, 0), kick(-1, 2), kick(2, -1)],
    [kick(0, 0), kick(2, 0), kick(-1, 0), kick(2, 1), kick(-1, -2)],
    [kick(0, 0), kick(1, 0), kick(-2, 0), kick(1, -2), kick(-2, 1)],
    [kick(0, 0), kick(-2, 0), kick(1, 0), kick(-2, -1), kick(1, 2)],
];

/// O pieces and half-turns only ever test the unkicked placement.
const IDENTITY_KICKS: [KickOffset; 1] = [kick(0, 0)];

/// The Super Rotation System.
#[derive(Clone, Copy, Debug, Default)]
pub struct Srs;

impl RotationSystem for Srs {
    fn name(&self) -> &str {
        "SRS"
    }

    fn shape(&self, piece: PieceType, rotation: Rotation) -> ShapeMask {
        SHAPES[piece.index()][rotation.index()]
    }

    fn clockwise_wall_kicks(&self, piece: PieceType, from: Rotation) -> WallKickData {
        match piece {
            PieceType::I => WallKickData::new(&I_CW_KICKS[from.index()]),
            PieceType::O => WallKickData::new(&IDENTITY_KICKS),
            _ => WallKickData::new(&JLSTZ_CW_KICKS[from.index()]),
        }
    }

    fn counter_clockwise_wall_kicks(&self, piece: PieceType, from: Rotation) -> WallKickData {
        match piece {
            PieceType::I => WallKickData::new(&I_CCW_KICKS[from.index()]),
            PieceType::O => WallKickData::new(&IDENTITY_KICKS),
            _ => WallKickData::new(&JLSTZ_CCW_KICKS[from.index()]),
        }
    }

    fn rotate_180_wall_kicks(&self, _piece: PieceType, _from: Rotation) -> WallKickData {
        WallKickData::new(&IDENTITY_KICKS)
    }

    /// Pieces spawn horizontally centred, with the bottom of the shape box
    /// at row 21 or the top of shorter boards.
    fn initial_state(&self, piece: PieceType, board_width: i32, board_height: i32) -> PieceState {
        let x = (board_width - 4) / 2;
        let y = 21.min(board_height - 1);
        PieceState::new(piece, Position::new(x, y), Rotation::R0)
    }

    fn supports_180(&self) -> bool {
        false
    }

    fn clone_system(&self) -> Arc<dyn RotationSystem> {
        Arc::new(Srs)
    }
}
