//! Core plugin: shared resources and global settings.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::common::tunables::Tunables;

/// The one RNG every combat draw (targeting, spread, crits, spawn angles)
/// comes from. Seeded from `Tunables::rng_seed`, so a run is reproducible.
#[derive(Resource, Debug, Clone)]
pub struct CombatRng(pub ChaCha8Rng);

impl CombatRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

/// Tunables inserted before this runs are kept.
pub fn plugin(app: &mut App) {
    app.init_resource::<Tunables>();
    let seed = app.world().resource::<Tunables>().rng_seed;
    app.insert_resource(CombatRng::seeded(seed));
    info!("combat rng seeded with {seed}");
}

#[cfg(test)]
mod tests;
