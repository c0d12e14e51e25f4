//! Registry for state hook systems.
//!
//! Hooks are registered under string keys and looked up when a state
//! transition runs them via their [`bevy_ecs::system::SystemId`].

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemId;
use log::warn;
use rustc_hash::FxHashMap;

/// Map of string names to system IDs.
#[derive(Resource, Default)]
pub struct SystemsStore {
    pub map: FxHashMap<String, SystemId>,
}

impl SystemsStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a system ID under a human-readable name.
    pub fn insert(&mut self, name: impl Into<String>, id: SystemId) {
        self.map.insert(name.into(), id);
    }

    /// Retrieve a system ID by name, if present.
    pub fn get(&self, name: impl AsRef<str>) -> Option<&SystemId> {
        self.map.get(name.as_ref())
    }

    /// Queue the system registered as `name`. Returns `false` if unknown.
    pub fn run(&self, name: &str, commands: &mut Commands) -> bool {
        match self.get(name) {
            Some(id) => {
                commands.run_system(*id);
                true
            }
            None => {
                warn!("No system registered as '{}'", name);
                false
            }
        }
    }
}
