//! Keyed projectile pool.
//!
//! Every projectile key owns a free list of pre-spawned, inactive entities.
//! Keys are registered at plugin build time (from the weapon catalog) so
//! registration-time validation can ask `has_key` before anything has spawned.
//! `init_projectile_pool` then fills each list on `Startup`.
//!
//! Nothing is ever despawned: an exhausted list makes the allocator drop the
//! request (capacity decision), and spent projectiles come back through
//! `commit`.

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use crate::plugins::weapons::def::ProjectileKey;

use super::components::{PooledProjectile, Projectile, ProjectileEntity};
use super::messages::SpawnProjectileRequest;

/// Depth for pooled projectiles (above host bodies).
pub const PROJECTILE_Z: f32 = 2.0;

#[derive(Resource, Debug)]
pub struct ProjectilePool {
    free: HashMap<ProjectileKey, Vec<ProjectileEntity>>,
    pub capacity_per_key: usize,
    /// Swept-circle radius given to every pooled instance.
    pub radius: f32,
}

impl ProjectilePool {
    pub fn new(capacity_per_key: usize, radius: f32) -> Self {
        Self {
            free: HashMap::default(),
            capacity_per_key,
            radius,
        }
    }

    /// Register `key`; a no-op if it already has a list.
    pub fn register_key(&mut self, key: ProjectileKey) {
        let cap = self.capacity_per_key;
        self.free.entry(key).or_insert_with(|| Vec::with_capacity(cap));
    }

    #[inline]
    pub fn has_key(&self, key: &ProjectileKey) -> bool {
        self.free.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &ProjectileKey> {
        self.free.keys()
    }

    #[inline]
    pub fn pop_free(&mut self, key: &ProjectileKey) -> Option<ProjectileEntity> {
        self.free.get_mut(key)?.pop()
    }

    /// Return an entity to `key`'s list. Unknown keys are a pool invariant
    /// violation.
    #[inline]
    pub fn push_free(&mut self, key: &ProjectileKey, e: ProjectileEntity) {
        self.free
            .get_mut(key)
            .expect("pooled projectile carries a key the pool never registered")
            .push(e);
    }

    pub fn free_count(&self, key: &ProjectileKey) -> usize {
        self.free.get(key).map_or(0, Vec::len)
    }
}

/// Pre-spawn `capacity_per_key` inactive projectiles for every registered key.
pub fn init_projectile_pool(mut commands: Commands, mut pool: ResMut<ProjectilePool>) {
    let cap = pool.capacity_per_key;
    let radius = pool.radius;

    for (key, free) in pool.free.iter_mut() {
        free.clear();
        free.reserve(cap);
        for _ in 0..cap {
            let e = commands
                .spawn((
                    Name::new(format!("Projectile({key}, pooled)")),
                    PooledProjectile,
                    Projectile::pooled(key.clone(), radius),
                    Transform::from_xyz(0.0, 0.0, PROJECTILE_Z),
                    Visibility::Hidden,
                ))
                .id();
            free.push(ProjectileEntity(e));
        }
        debug!("projectile pool `{key}`: {cap} instances");
    }
}

/// The pool's spawn side as seen by a weapon controller.
///
/// The ECS implementation only enqueues intent; the allocator is the single
/// writer that pops free lists.
pub trait ProjectileSpawner {
    fn spawn(&mut self, request: SpawnProjectileRequest);
}

impl ProjectileSpawner for MessageWriter<'_, SpawnProjectileRequest> {
    fn spawn(&mut self, request: SpawnProjectileRequest) {
        self.write(request);
    }
}

/// Collects requests; used by pure controller tests and batch callers.
impl ProjectileSpawner for Vec<SpawnProjectileRequest> {
    fn spawn(&mut self, request: SpawnProjectileRequest) {
        self.push(request);
    }
}
