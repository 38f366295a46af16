//! Process-wide search-algorithm registry.
//!
//! Factories are registered under a name and produce fresh, independently
//! configurable instances. Initialisation is lazy and idempotent, with
//! `"PathSearch"` and `"TSpinSearch"` registered out of the box.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, OnceLock};

use crate::algorithm::SearchAlgorithm;
use crate::path_search::PathSearch;
use crate::tspin::TSpinSearch;

type Factory = fn() -> Box<dyn SearchAlgorithm>;

static SEARCH_ALGORITHMS: OnceLock<Mutex<HashMap<String, Factory>>> = OnceLock::new();

fn registry() -> MutexGuard<'static, HashMap<String, Factory>> {
    SEARCH_ALGORITHMS
        .get_or_init(|| {
            let mut algorithms: HashMap<String, Factory> = HashMap::new();
            algorithms.insert("PathSearch".to_string(), || {
                Box::new(PathSearch::default()) as Box<dyn SearchAlgorithm>
            });
            algorithms.insert("TSpinSearch".to_string(), || {
                Box::new(TSpinSearch::default()) as Box<dyn SearchAlgorithm>
            });
            Mutex::new(algorithms)
        })
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Register a search-algorithm factory under `name`. A later registration
/// under the same name replaces the earlier one.
pub fn register_search_algorithm(name: &str, factory: fn() -> Box<dyn SearchAlgorithm>) {
    registry().insert(name.to_string(), factory);
}

/// A fresh instance of the named algorithm, or `None` when the name is
/// unknown. Names are exact-match and case-sensitive.
pub fn create_search_algorithm(name: &str) -> Option<Box<dyn SearchAlgorithm>> {
    registry().get(name).map(|factory| factory())
}

/// The registered names, sorted.
pub fn registered_algorithm_names() -> Vec<String> {
    let mut names: Vec<String> = registry().keys().cloned().collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_in_algorithms() {
        let path = create_search_algorithm("PathSearch").expect("PathSearch registered");
        assert_eq!(path.name(), "PathSearch");
        assert!(path.config().allow_hard_drop);

        let t_spin = create_search_algorithm("TSpinSearch").expect("TSpinSearch registered");
        assert_eq!(t_spin.name(), "TSpinSearch");
    }

    #[test]
    fn test_unknown_names() {
        assert!(create_search_algorithm("pathsearch").is_none());
        assert!(create_search_algorithm("BeamSearch").is_none());
    }

    #[test]
    fn test_instances_are_independent() {
        let mut a = create_search_algorithm("PathSearch").unwrap();
        let b = create_search_algorithm("PathSearch").unwrap();
        let mut config = a.config();
        config.allow_hard_drop = false;
        a.set_config(config);
        assert!(b.config().allow_hard_drop);
    }

    #[test]
    fn test_names_are_sorted() {
        let names = registered_algorithm_names();
        assert!(names.contains(&"PathSearch".to_string()));
        assert!(names.contains(&"TSpinSearch".to_string()));
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
