//! Move and wall-kick definitions.

use serde::{Deserialize, Serialize};

use crate::Error;

/// Maximum number of tests a wall-kick table may hold.
pub const MAX_WALL_KICK_TESTS: usize = 16;

/// A single wall-kick translation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct KickOffset {
    pub dx: i32,
    pub dy: i32,
}

impl KickOffset {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

/// An ordered list of wall-kick tests for one `(piece, from-rotation)`
/// transition. Kick tables are rule constants, published once by the
/// rotation system and shared by reference.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct WallKickData {
    offsets: &'static [KickOffset],
}

impl WallKickData {
    pub fn new(offsets: &'static [KickOffset]) -> Self {
        debug_assert!(offsets.len() <= MAX_WALL_KICK_TESTS);
        Self { offsets }
    }

    pub fn test_count(&self) -> usize {
        self.offsets.len()
    }

    /// The offset at `index`, failing when the index is past the end of the
    /// table.
    pub fn offset(&self, index: usize) -> Result<KickOffset, Error> {
        self.offsets
            .get(index)
            .copied()
            .ok_or(Error::WallKickIndexOutOfRange {
                index,
                count: self.offsets.len(),
            })
    }

    pub fn offsets(&self) -> &[KickOffset] {
        self.offsets
    }
}

/// The kinds of move a caller can apply to the current piece.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Left,
    Right,
    Down,
    /// Upward translation, kept for tests and replay tooling.
    Up,
    RotateClockwise,
    RotateCounterClockwise,
    Rotate180,
    HardDrop,
    SoftDrop,
    Hold,
}

impl MoveKind {
    pub const fn is_rotation(self) -> bool {
        matches!(
            self,
            MoveKind::RotateClockwise | MoveKind::RotateCounterClockwise | MoveKind::Rotate180
        )
    }

    pub const fn is_translation(self) -> bool {
        matches!(
            self,
            MoveKind::Left
                | MoveKind::Right
                | MoveKind::Down
                | MoveKind::Up
                | MoveKind::HardDrop
                | MoveKind::SoftDrop
        )
    }
}

/// A move, optionally carrying the wall-kick test to apply alongside a
/// rotation. The engine does not iterate kick tables itself; callers try
/// indices in table order and keep the first that yields a valid state.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Move {
    kind: MoveKind,
    wall_kick_index: Option<usize>,
}

impl Move {
    pub const fn new(kind: MoveKind) -> Self {
        Self {
            kind,
            wall_kick_index: None,
        }
    }

    /// A rotation paired with a wall-kick test index. Fails on translation
    /// and drop moves.
    pub fn with_wall_kick(kind: MoveKind, index: usize) -> Result<Self, Error> {
        if !kind.is_rotation() {
            return Err(Error::WallKickOnNonRotation);
        }
        Ok(Self {
            kind,
            wall_kick_index: Some(index),
        })
    }

    pub const fn kind(self) -> MoveKind {
        self.kind
    }

    pub const fn wall_kick_index(self) -> Option<usize> {
        self.wall_kick_index
    }

    pub const fn is_rotation(self) -> bool {
        self.kind.is_rotation()
    }

    pub const fn is_translation(self) -> bool {
        self.kind.is_translation()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self.kind {
            MoveKind::Left => "Left",
            MoveKind::Right => "Right",
            MoveKind::Down => "Down",
            MoveKind::Up => "Up",
            MoveKind::RotateClockwise => "RotateClockwise",
            MoveKind::RotateCounterClockwise => "RotateCounterClockwise",
            MoveKind::Rotate180 => "Rotate180",
            MoveKind::HardDrop => "HardDrop",
            MoveKind::SoftDrop => "SoftDrop",
            MoveKind::Hold => "Hold",
        };
        match self.wall_kick_index {
            Some(index) => write!(f, "{name}(WK:{index})"),
            None => write!(f, "{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KICKS: [KickOffset; 3] = [
        KickOffset::new(0, 0),
        KickOffset::new(-1, 0),
        KickOffset::new(-1, 1),
    ];

    #[test]
    fn test_kick_lookup() {
        let data = WallKickData::new(&KICKS);
        assert_eq!(data.test_count(), 3);
        assert_eq!(data.offset(0), Ok(KickOffset::new(0, 0)));
        assert_eq!(data.offset(2), Ok(KickOffset::new(-1, 1)));
        assert_eq!(
            data.offset(3),
            Err(Error::WallKickIndexOutOfRange { index: 3, count: 3 })
        );
    }

    #[test]
    fn test_wall_kick_only_on_rotations() {
        assert!(Move::with_wall_kick(MoveKind::RotateClockwise, 1).is_ok());
        assert!(Move::with_wall_kick(MoveKind::Rotate180, 0).is_ok());
        assert_eq!(
            Move::with_wall_kick(MoveKind::Left, 0),
            Err(Error::WallKickOnNonRotation)
        );
        assert_eq!(
            Move::with_wall_kick(MoveKind::HardDrop, 2),
            Err(Error::WallKickOnNonRotation)
        );
    }

    #[test]
    fn test_kind_classification() {
        assert!(MoveKind::RotateCounterClockwise.is_rotation());
        assert!(!MoveKind::RotateCounterClockwise.is_translation());
        assert!(MoveKind::SoftDrop.is_translation());
        assert!(!MoveKind::Hold.is_translation());
        assert!(!MoveKind::Hold.is_rotation());
    }

    #[test]
    fn test_display() {
        assert_eq!(Move::new(MoveKind::HardDrop).to_string(), "HardDrop");
        let kicked = Move::with_wall_kick(MoveKind::RotateClockwise, 2).unwrap();
        assert_eq!(kicked.to_string(), "RotateClockwise(WK:2)");
    }
}
