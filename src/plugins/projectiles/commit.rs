//! Return commit: recycle projectiles back into their pool.
//!
//! This system is the "owner" of the *Inactive invariants*.
//!
//! Invariant: Inactive projectiles are hidden, carry no payload or owner, and
//! sit in exactly one free list (their key's).

use bevy::prelude::*;

use super::components::{PooledProjectile, Projectile, ProjectileEntity, ProjectileState};
use super::pool::ProjectilePool;

pub fn return_to_pool_commit(
    mut pool: ResMut<ProjectilePool>,
    mut q: Query<(Entity, &mut Projectile, &mut Visibility), With<PooledProjectile>>,
) {
    for (e, mut projectile, mut vis) in &mut q {
        if projectile.state() != ProjectileState::Despawning {
            continue;
        }

        projectile.deactivate();
        *vis = Visibility::Hidden;

        pool.push_free(projectile.key(), ProjectileEntity(e));
    }
}
