//! tetrion-engine - rotation systems, piece geometry, and game state.
//!
//! The engine is a pure, synchronous state transformer: a [`GameState`]
//! owns a board and the falling piece, executes [`tetrion_core::Move`]s
//! with wall-kick arbitration, and locks pieces into the board. Rotation
//! rules are pluggable behind the [`RotationSystem`] trait; [`Srs`] is the
//! built-in implementation, reachable by name through the registry.

mod collision;
mod game_state;
mod piece;
mod registry;
mod rotation_system;
mod srs;

pub use collision::{drop_position, fits, fits_at, is_landed};
pub use game_state::GameState;
pub use piece::Piece;
pub use registry::{create_rotation_system, register_rotation_system, registered_system_names};
pub use rotation_system::{RotationSystem, ShapeMask};
pub use srs::Srs;
