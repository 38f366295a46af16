//! Process-wide rotation-system registry.
//!
//! Prototypes are registered under a name; lookups hand out a fresh shared
//! instance via [`RotationSystem::clone_system`]. Initialisation is lazy
//! and idempotent, with `"SRS"` registered out of the box.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use crate::rotation_system::RotationSystem;
use crate::srs::Srs;

type Registry = HashMap<String, Arc<dyn RotationSystem>>;

static ROTATION_SYSTEMS: OnceLock<Mutex<Registry>> = OnceLock::new();

fn registry() -> MutexGuard<'static, Registry> {
    ROTATION_SYSTEMS
        .get_or_init(|| {
            let mut systems: Registry = HashMap::new();
            let srs: Arc<dyn RotationSystem> = Arc::new(Srs);
            systems.insert(srs.name().to_string(), srs);
            Mutex::new(systems)
        })
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Register a rotation-system prototype under `name`. A later registration
/// under the same name replaces the earlier one.
pub fn register_rotation_system(name: &str, prototype: Arc<dyn RotationSystem>) {
    registry().insert(name.to_string(), prototype);
}

/// A fresh shared instance of the named system, or `None` when the name is
/// unknown. Names are exact-match and case-sensitive.
pub fn create_rotation_system(name: &str) -> Option<Arc<dyn RotationSystem>> {
    registry().get(name).map(|prototype| prototype.clone_system())
}

/// The registered names, sorted.
pub fn registered_system_names() -> Vec<String> {
    let mut names: Vec<String> = registry().keys().cloned().collect();
    names.sort();
    names
}
