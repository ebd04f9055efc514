//! Buffered projectile messages.
//!
//! Producers (weapon controllers) create *intent*; the allocator applies it
//! (pool pop + component writes). Projectiles publish `ProjectileHit` for
//! anything downstream that wants to react to a delivered hit.
//!
//! This is a producer → queue → consumer pipeline.

use bevy::prelude::*;

use crate::plugins::weapons::def::ProjectileKey;
use crate::plugins::weapons::payload::HitPayload;

/// Per-shot parameters handed to `Projectile::init`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileLaunch {
    /// Expected unit length; `init` normalizes anything else.
    pub direction: Vec2,
    pub payload: HitPayload,
    pub speed: f32,
    pub lifetime: f32,
    pub pierce: u32,
}

#[derive(Message, Debug, Clone, PartialEq)]
pub struct SpawnProjectileRequest {
    pub key: ProjectileKey,
    pub owner: Option<Entity>,
    pub position: Vec2,
    pub launch: ProjectileLaunch,
}

/// One delivered hit.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct ProjectileHit {
    pub projectile: Entity,
    pub target: Entity,
    pub damage: f32,
    pub is_crit: bool,
    pub point: Vec2,
}
