//! Search configuration.

use serde::{Deserialize, Serialize};

/// Options controlling the move alphabet of the placement search.
///
/// `Left`, `Right`, and both quarter-turns are always explored; the flags
/// add the optional moves on top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Explore half-turn rotations.
    pub allow_rotate_180: bool,
    /// Explore hard drops.
    pub allow_hard_drop: bool,
    /// Explore single-step downward moves.
    pub allow_soft_drop: bool,
    /// Collapse every successor to its drop position, as under 20G gravity.
    pub is_20g: bool,
    /// Only record landings whose final move is a rotation.
    pub last_rotation_only: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allow_rotate_180: false,
            allow_hard_drop: true,
            allow_soft_drop: true,
            is_20g: false,
            last_rotation_only: false,
        }
    }
}

/// Extended options for [`crate::TSpinSearch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TSpinConfig {
    pub search: Config,
    /// Classify a landing as a T-spin only when its final move rotated.
    pub require_last_rotation: bool,
    /// Keep mini T-spins; when off they are demoted to `None`.
    pub allow_mini_t_spins: bool,
    /// Sort T-spin landings ahead of plain placements.
    pub prioritize_t_spins: bool,
}

impl Default for TSpinConfig {
    fn default() -> Self {
        Self {
            search: Config::default(),
            require_last_rotation: true,
            allow_mini_t_spins: true,
            prioritize_t_spins: true,
        }
    }
}
