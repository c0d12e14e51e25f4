//! Shared random number generator.
//!
//! Every random draw in the arcade (reaction waits, pong serves, apple
//! placement) goes through this single resource so a seeded generator makes
//! a whole session reproducible.

use bevy_ecs::prelude::Resource;

/// Seedable generator shared by all game sessions.
#[derive(Resource, Debug, Clone)]
pub struct ArcadeRng(pub fastrand::Rng);

impl Default for ArcadeRng {
    fn default() -> Self {
        Self::new()
    }
}

impl ArcadeRng {
    /// Generator seeded from system entropy.
    pub fn new() -> Self {
        Self(fastrand::Rng::new())
    }

    /// Deterministic generator.
    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }
}
