//! Spawn consumer: activate projectiles from the pool.
//!
//! # Fail-fast invariants
//! - Free lists contain only valid pooled projectile entities.
//! - Therefore, a pooled entity must match the projectile query.
//!
//! If this is violated, we `expect()` and crash loudly.

use bevy::prelude::*;

use super::components::{PooledProjectile, Projectile, ProjectileEntity};
use super::messages::SpawnProjectileRequest;
use super::pool::{ProjectilePool, PROJECTILE_Z};

pub fn allocate_projectiles_from_pool(
    mut pool: ResMut<ProjectilePool>,
    mut reader: MessageReader<SpawnProjectileRequest>,
    mut q: Query<(&mut Projectile, &mut Transform, &mut Visibility), With<PooledProjectile>>,
) {
    for req in reader.read() {
        let Some(ProjectileEntity(e)) = pool.pop_free(&req.key) else {
            // Capacity decision, not a correctness failure.
            debug!("projectile pool `{}` exhausted; request dropped", req.key);
            continue;
        };

        let (mut projectile, mut tf, mut vis) = q
            .get_mut(e)
            .expect("ProjectilePool contained an entity missing pooled projectile components");

        projectile.init(req.position, req.owner, &req.launch);
        tf.translation = req.position.extend(PROJECTILE_Z);
        *vis = Visibility::Visible;
    }
}
