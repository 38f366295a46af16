//! Piece type, rotation state, and board position primitives.

use serde::{Deserialize, Serialize};

use crate::Error;

/// The seven tetrominoes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum PieceType {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceType {
    pub const ALL: [PieceType; 7] = [
        PieceType::I,
        PieceType::J,
        PieceType::L,
        PieceType::O,
        PieceType::S,
        PieceType::T,
        PieceType::Z,
    ];

    /// Table index, following the order of [`PieceType::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_char(self) -> char {
        match self {
            PieceType::I => 'I',
            PieceType::J => 'J',
            PieceType::L => 'L',
            PieceType::O => 'O',
            PieceType::S => 'S',
            PieceType::T => 'T',
            PieceType::Z => 'Z',
        }
    }
}

impl TryFrom<char> for PieceType {
    type Error = Error;

    fn try_from(letter: char) -> Result<Self, Error> {
        match letter {
            'I' => Ok(PieceType::I),
            'J' => Ok(PieceType::J),
            'L' => Ok(PieceType::L),
            'O' => Ok(PieceType::O),
            'S' => Ok(PieceType::S),
            'T' => Ok(PieceType::T),
            'Z' => Ok(PieceType::Z),
            other => Err(Error::InvalidPieceType(other)),
        }
    }
}

/// Rotation state of a piece. Arithmetic is modulo 4: clockwise is +1,
/// counter-clockwise +3, half-turn +2.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn cw(self) -> Self {
        match self {
            Self::R0 => Self::R90,
            Self::R90 => Self::R180,
            Self::R180 => Self::R270,
            Self::R270 => Self::R0,
        }
    }

    pub const fn ccw(self) -> Self {
        match self {
            Self::R0 => Self::R270,
            Self::R270 => Self::R180,
            Self::R180 => Self::R90,
            Self::R90 => Self::R0,
        }
    }

    pub const fn flip(self) -> Self {
        match self {
            Self::R0 => Self::R180,
            Self::R90 => Self::R270,
            Self::R180 => Self::R0,
            Self::R270 => Self::R90,
        }
    }
}

/// A board coordinate. `(0, 0)` is the bottom-left corner; `+x` is right
/// and `+y` is up.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Position {
    type Output = Position;

    fn add(self, other: Position) -> Position {
        Position::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::AddAssign for Position {
    fn add_assign(&mut self, other: Position) {
        self.x += other.x;
        self.y += other.y;
    }
}

/// The full state of a falling piece. Used as the visited-set key in the
/// placement search, so equality and hashing cover all three components.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct PieceState {
    pub piece: PieceType,
    pub position: Position,
    pub rotation: Rotation,
}

impl PieceState {
    pub const fn new(piece: PieceType, position: Position, rotation: Rotation) -> Self {
        Self {
            piece,
            position,
            rotation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_cw_cycle() {
        assert_eq!(Rotation::R0.cw(), Rotation::R90);
        assert_eq!(Rotation::R90.cw(), Rotation::R180);
        assert_eq!(Rotation::R180.cw(), Rotation::R270);
        assert_eq!(Rotation::R270.cw(), Rotation::R0);
    }

    #[test]
    fn test_rotation_ccw_cycle() {
        assert_eq!(Rotation::R0.ccw(), Rotation::R270);
        assert_eq!(Rotation::R270.ccw(), Rotation::R180);
    }

    #[test]
    fn test_rotation_round_trips() {
        for r in Rotation::ALL {
            assert_eq!(r.flip().flip(), r);
            assert_eq!(r.cw().ccw(), r);
            assert_eq!(r.ccw().cw(), r);
            assert_eq!(r.cw().cw(), r.flip());
        }
    }

    #[test]
    fn test_piece_letters() {
        for piece in PieceType::ALL {
            assert_eq!(PieceType::try_from(piece.as_char()), Ok(piece));
        }
        assert_eq!(
            PieceType::try_from('X'),
            Err(Error::InvalidPieceType('X'))
        );
    }

    #[test]
    fn test_position_add() {
        let p = Position::new(3, 19) + Position::new(-2, 1);
        assert_eq!(p, Position::new(1, 20));
    }

    #[test]
    fn test_state_equality_covers_all_fields() {
        let a = PieceState::new(PieceType::T, Position::new(3, 19), Rotation::R0);
        let mut b = a;
        assert_eq!(a, b);
        b.rotation = Rotation::R90;
        assert_ne!(a, b);
    }
}
