//! tetrion-search - breadth-first placement search and T-spin detection.
//!
//! [`PathSearch`] enumerates every landing position a piece can reach from
//! its current state and reconstructs the move path to each; [`TSpinSearch`]
//! layers T-spin hunting on top. Both are reachable by name through the
//! search-algorithm registry.

mod algorithm;
mod config;
mod path_search;
mod registry;
mod tspin;

pub use algorithm::{LandingPosition, SearchAlgorithm};
pub use config::{Config, TSpinConfig};
pub use path_search::PathSearch;
pub use registry::{
    create_search_algorithm, register_search_algorithm, registered_algorithm_names,
};
pub use tspin::{TSpinSearch, TSpinType};
