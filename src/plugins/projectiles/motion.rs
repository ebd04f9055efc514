//! Per-frame projectile step and early recall.

use bevy::prelude::*;

use crate::plugins::weapons::effects::EffectRegistry;
use crate::plugins::weapons::payload::deliver_hit;

use super::collision::{Hurtbox, TargetField};
use super::components::{
    Dead, Health, HealthTarget, PooledProjectile, Projectile, ProjectileStep,
};
use super::messages::ProjectileHit;
use super::pool::PROJECTILE_Z;

/// Advance every active projectile once and deliver its hit, if any.
///
/// Sweeps run against the frame's `TargetField`; delivery re-checks the live
/// `Health`, so a target killed earlier this frame is skipped.
pub fn advance_projectiles(
    time: Res<Time>,
    field: Res<TargetField>,
    effects: Res<EffectRegistry>,
    mut hits: MessageWriter<ProjectileHit>,
    mut q_projectiles: Query<(Entity, &mut Projectile, &mut Transform), With<PooledProjectile>>,
    mut q_targets: Query<
        (&mut Health, &Transform),
        (With<Hurtbox>, Without<Dead>, Without<PooledProjectile>),
    >,
) {
    let dt = time.delta_secs();

    for (e, mut projectile, mut tf) in &mut q_projectiles {
        if !projectile.is_active() {
            continue;
        }

        let step = projectile.advance(dt, &*field, |target, hit| {
            let Ok((mut health, target_tf)) = q_targets.get_mut(target) else {
                return false;
            };
            if !health.is_alive() {
                return false;
            }

            let mut damageable = HealthTarget {
                health: &mut *health,
                position: target_tf.translation.truncate(),
            };
            deliver_hit(&mut damageable, hit, &effects);

            hits.write(ProjectileHit {
                projectile: e,
                target,
                damage: hit.damage,
                is_crit: hit.is_crit,
                point: hit.point,
            });
            true
        });

        tf.translation = projectile.position().extend(PROJECTILE_Z);

        if let ProjectileStep::Despawned { reason, .. } = step {
            trace!("projectile {e} despawning: {reason:?}");
        }
    }
}

/// Despawn every in-flight projectile whose owner just died.
pub fn recall_projectiles(
    q_dead: Query<Entity, Added<Dead>>,
    mut q_projectiles: Query<&mut Projectile, With<PooledProjectile>>,
    mut dead: Local<Vec<Entity>>,
) {
    dead.clear();
    dead.extend(q_dead.iter());
    if dead.is_empty() {
        return;
    }

    let mut recalled = 0usize;
    for mut projectile in &mut q_projectiles {
        let owned_by_dead = projectile.owner().is_some_and(|owner| dead.contains(&owner));
        if owned_by_dead && projectile.despawn() {
            recalled += 1;
        }
    }
    if recalled > 0 {
        debug!("recalled {recalled} projectiles from {} dead owners", dead.len());
    }
}
