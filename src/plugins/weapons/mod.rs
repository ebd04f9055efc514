//! Weapons plugin: static defs, per-weapon fire scheduling, targeting and
//! hit payloads.
//!
//! ```text
//!   WeaponCatalog ──Arc<WeaponDef>──> WeaponLoadout (component, per owner)
//!                                        │ tick_all(dt)
//!                                        v
//!                                  WeaponController::tick
//!                                        │ per owed volley:
//!                                        │   TargetingSolver::solve → directions
//!                                        │   HitPayload::roll      → one payload
//!                                        v
//!                          ProjectileSpawner (SpawnProjectileRequest messages)
//! ```
//!
//! Everything in `def`, `curve`, `controller`, `targeting`, `payload` and
//! `effects` is plain Rust with injected collaborators; only `systems` touches
//! the ECS.

pub mod catalog;
pub mod controller;
pub mod curve;
pub mod def;
pub mod effects;
pub mod error;
pub mod loadout;
pub mod payload;
pub mod systems;
pub mod targeting;

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::projectiles::collision::refresh_target_field;
use crate::plugins::projectiles::pool::ProjectilePool;
use crate::plugins::CombatSet;

/// Needs `ProjectilePool` (projectiles plugin) to exist already. A catalog or
/// effect registry inserted before this runs is kept.
pub fn plugin(app: &mut App) {
    app.init_resource::<effects::EffectRegistry>();
    if !app.world().contains_resource::<catalog::WeaponCatalog>() {
        app.insert_resource(catalog::WeaponCatalog::builtin());
    }

    let keys: Vec<_> = app
        .world()
        .resource::<catalog::WeaponCatalog>()
        .projectile_keys()
        .cloned()
        .collect();
    let mut pool = app.world_mut().resource_mut::<ProjectilePool>();
    for key in keys {
        pool.register_key(key);
    }

    app.add_message::<systems::SetWeaponLevel>();
    app.add_systems(
        Update,
        (systems::apply_level_changes, systems::tick_weapons)
            .chain()
            .after(refresh_target_field)
            .in_set(CombatSet::Fire)
            .run_if(in_state(GameState::InGame)),
    );
}
