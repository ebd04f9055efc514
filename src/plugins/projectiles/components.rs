use bevy::prelude::*;

use crate::plugins::weapons::def::ProjectileKey;
use crate::plugins::weapons::payload::{Damageable, HitContext, HitPayload};

use super::collision::SweepQuery;
use super::messages::ProjectileLaunch;

#[derive(Component)]
pub struct PooledProjectile;

/// A pooled projectile entity handle (what the free lists store).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectileEntity(pub Entity);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectileState {
    #[default]
    Inactive,
    Active,
    /// Done for this shot; the commit system returns it to its free list.
    Despawning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DespawnReason {
    Expired,
    PierceExhausted,
}

/// Outcome of one `Projectile::advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileStep {
    /// Not active; nothing happened.
    Idle,
    Moved { hit: Option<Entity> },
    Despawned { reason: DespawnReason, hit: Option<Entity> },
}

/// Kinematic and combat state of one pooled projectile.
///
/// Positions live here rather than in `Transform` so the step is a pure
/// function of (state, dt, targets); the motion system mirrors `position` into
/// the transform afterwards.
#[derive(Component, Debug, Clone)]
pub struct Projectile {
    state: ProjectileState,
    key: ProjectileKey,
    owner: Option<Entity>,
    payload: HitPayload,
    direction: Vec2,
    speed: f32,
    lifetime: f32,
    /// Goes negative once the last allowed hit has been delivered.
    remaining_pierce: i32,
    age: f32,
    position: Vec2,
    last_position: Vec2,
    radius: f32,
    /// Owner plus every entity already hit this shot.
    ignored: Vec<Entity>,
}

impl Projectile {
    /// A fresh, inactive instance for the `key` pool.
    pub fn pooled(key: ProjectileKey, radius: f32) -> Self {
        Self {
            state: ProjectileState::Inactive,
            key,
            owner: None,
            payload: HitPayload::default(),
            direction: Vec2::Y,
            speed: 0.0,
            lifetime: 0.0,
            remaining_pierce: 0,
            age: 0.0,
            position: Vec2::ZERO,
            last_position: Vec2::ZERO,
            radius,
            ignored: Vec::new(),
        }
    }

    /// Start a new shot from `position`.
    pub fn init(&mut self, position: Vec2, owner: Option<Entity>, launch: &ProjectileLaunch) {
        self.direction = launch.direction.try_normalize().unwrap_or_else(|| {
            warn!(
                "projectile `{}` launched with direction {:?}; using +Y",
                self.key, launch.direction
            );
            Vec2::Y
        });
        self.state = ProjectileState::Active;
        self.owner = owner;
        self.payload = launch.payload.clone();
        self.speed = launch.speed;
        self.lifetime = launch.lifetime;
        self.remaining_pierce = i32::try_from(launch.pierce).unwrap_or(i32::MAX);
        self.age = 0.0;
        self.position = position;
        self.last_position = position;
        self.ignored.clear();
        self.ignored.extend(owner);
    }

    /// One frame: age, expire, sweep, deliver at most one hit, move.
    ///
    /// `deliver` returns `false` when the target can no longer take the hit
    /// (already dead, no damageable capability); the sweep then skips it and
    /// looks further along the same segment.
    pub fn advance<Q, F>(&mut self, dt: f32, targets: &Q, mut deliver: F) -> ProjectileStep
    where
        Q: SweepQuery + ?Sized,
        F: FnMut(Entity, &HitContext) -> bool,
    {
        if self.state != ProjectileState::Active {
            return ProjectileStep::Idle;
        }

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.age += dt;
        if self.age >= self.lifetime {
            self.state = ProjectileState::Despawning;
            return ProjectileStep::Despawned {
                reason: DespawnReason::Expired,
                hit: None,
            };
        }

        let next = self.position + self.direction * self.speed * dt;
        let mut hit = None;
        while let Some(contact) = targets.sweep(self.last_position, next, self.radius, &self.ignored) {
            self.ignored.push(contact.entity);
            if deliver(contact.entity, &self.payload.context(contact.point)) {
                self.remaining_pierce -= 1;
                hit = Some(contact.entity);
                break;
            }
        }

        self.position = next;
        self.last_position = next;

        if self.remaining_pierce < 0 {
            self.state = ProjectileState::Despawning;
            return ProjectileStep::Despawned {
                reason: DespawnReason::PierceExhausted,
                hit,
            };
        }
        ProjectileStep::Moved { hit }
    }

    /// Explicit early despawn (owner death). No-op unless active.
    pub fn despawn(&mut self) -> bool {
        if self.state != ProjectileState::Active {
            return false;
        }
        self.state = ProjectileState::Despawning;
        true
    }

    /// Back to `Inactive`; only the commit system calls this.
    pub fn deactivate(&mut self) {
        self.state = ProjectileState::Inactive;
        self.owner = None;
        self.payload = HitPayload::default();
        self.speed = 0.0;
        self.ignored.clear();
    }

    #[inline]
    pub fn state(&self) -> ProjectileState {
        self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == ProjectileState::Active
    }

    #[inline]
    pub fn key(&self) -> &ProjectileKey {
        &self.key
    }

    #[inline]
    pub fn owner(&self) -> Option<Entity> {
        self.owner
    }

    #[inline]
    pub fn payload(&self) -> &HitPayload {
        &self.payload
    }

    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn remaining_pierce(&self) -> i32 {
        self.remaining_pierce
    }

    #[inline]
    pub fn age(&self) -> f32 {
        self.age
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn last_position(&self) -> Vec2 {
        self.last_position
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    /// Ignored once dead.
    pub fn take_damage(&mut self, amount: f32) {
        if self.is_alive() {
            self.current = (self.current - amount.max(0.0)).max(0.0);
        }
    }

    pub fn heal(&mut self, amount: f32) {
        if self.is_alive() {
            self.current = (self.current + amount.max(0.0)).min(self.max);
        }
    }
}

/// Health reached zero; despawned at the end of the frame.
#[derive(Component, Debug, Default)]
pub struct Dead;

/// `Health` seen through the damageable capability.
pub struct HealthTarget<'a> {
    pub health: &'a mut Health,
    pub position: Vec2,
}

impl Damageable for HealthTarget<'_> {
    fn apply_hit(&mut self, hit: &HitContext) {
        self.health.take_damage(hit.damage);
    }

    fn position(&self) -> Vec2 {
        self.position
    }
}
