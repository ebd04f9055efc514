//! Projectiles plugin: **message-based producer → consumer** spawning, keyed
//! pooling and swept hit resolution.
//!
//! # Philosophy: invariants first
//! Correctness checks live at the boundaries (weapon registration, pool
//! registration, `Projectile::init`) so the hot paths (allocation, advance,
//! return commit) stay straight-line. Pool invariant violations are bugs and
//! fail fast with `expect()`.
//!
//! # Data flow (one frame, `GameState::InGame` only)
//! ```text
//!   Update schedule (variable dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (A) CombatSet::Fire                                                       │
//!│      - refresh_target_field: live hurtboxes → TargetField                  │
//!│      - tick_weapons: WeaponLoadout::tick_all                               │
//!│      - writes: SpawnProjectileRequest messages                             │
//!│                                                                            │
//!│  (B) CombatSet::Allocate: allocate_projectiles_from_pool                   │
//!│      - reads: SpawnProjectileRequest messages                              │
//!│      - mutates: ProjectilePool free lists (single writer)                  │
//!│      - Projectile::init, Transform, Visibility                             │
//!│                                                                            │
//!│  (C) CombatSet::Advance: advance_projectiles                               │
//!│      - reads: TargetField (sweep), EffectRegistry                          │
//!│      - mutates: Projectile, target Health (via Damageable)                 │
//!│      - writes: ProjectileHit messages                                      │
//!│                                                                            │
//!│  (D) CombatSet::Resolve: death marking, recall_projectiles                 │
//!│      - Active → Despawning for projectiles of dead owners                  │
//!│                                                                            │
//!│  (E) CombatSet::Commit: return_to_pool_commit                              │
//!│      - Despawning → Inactive, push back onto the key's free list           │
//!└────────────────────────────────────────────────────────────────────────────┘
//!
//! Feedback loop:
//!   commit pushes ProjectileEntity back into its free list
//!   allocator pops ProjectileEntity from the free list
//! ```
//!
//! # Where do we still branch?
//! - Capacity: a free list can be empty → allocator drops the request.
//! - Targets: a swept target may have died earlier this frame → skipped.
//! Everything else is treated as an invariant violation.

pub mod collision;
pub mod components;
pub mod messages;
pub mod pool;

pub mod allocator;
pub mod commit;
pub mod motion;

use bevy::prelude::*;

use crate::common::{state::GameState, tunables::Tunables};
use crate::plugins::CombatSet;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        let (capacity, radius) = app
            .world()
            .get_resource::<Tunables>()
            .map_or((256, 0.15), |t| (t.pool_capacity_per_key, t.projectile_radius));

        // Keys are registered later by the weapons plugin; pre-spawn on Startup.
        app.insert_resource(pool::ProjectilePool::new(capacity, radius))
            .init_resource::<collision::TargetField>()
            .add_systems(Startup, pool::init_projectile_pool);

        app.add_message::<messages::SpawnProjectileRequest>()
            .add_message::<messages::ProjectileHit>();

        app.add_systems(
            Update,
            (
                collision::refresh_target_field.in_set(CombatSet::Fire),
                allocator::allocate_projectiles_from_pool.in_set(CombatSet::Allocate),
                motion::advance_projectiles.in_set(CombatSet::Advance),
                motion::recall_projectiles.in_set(CombatSet::Resolve),
                commit::return_to_pool_commit.in_set(CombatSet::Commit),
            )
                .run_if(in_state(GameState::InGame)),
        );
    }
}
