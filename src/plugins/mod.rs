//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::projectiles::ProjectilesPlugin;

pub mod core;
pub mod enemies;
pub mod physics;
pub mod player;
pub mod projectiles;
pub mod weapons;

/// Frame order of the combat pipeline (all in `Update`).
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatSet {
    /// Snapshot targets, tick weapons, write spawn requests.
    Fire,
    /// Pop pooled projectiles for the requests.
    Allocate,
    /// Move projectiles and deliver hits.
    Advance,
    /// React to deaths.
    Resolve,
    /// Return spent projectiles to their pools.
    Commit,
}

/// Register gameplay plugins. Works headless.
///
/// Order matters: `core` provides `Tunables`, the projectiles plugin provides
/// the pool the weapons plugin registers keys into.
pub fn register_gameplay(app: &mut App) {
    app.configure_sets(
        Update,
        (
            CombatSet::Fire,
            CombatSet::Allocate,
            CombatSet::Advance,
            CombatSet::Resolve,
            CombatSet::Commit,
        )
            .chain(),
    );

    core::plugin(app);
    physics::plugin(app);
    app.add_plugins(ProjectilesPlugin);
    weapons::plugin(app);
    player::plugin(app);
    enemies::plugin(app);
}
