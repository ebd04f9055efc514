//! Hit payloads and the damageable capability.

use std::sync::Arc;

use bevy::prelude::*;
use rand::Rng;

use super::def::WeaponDef;
use super::effects::{EffectRegistry, StatusEffectDef};

/// Anything that can receive a projectile hit.
///
/// Implementors never expose their health representation; the combat core only
/// hands them a `HitContext` and asks where they are.
pub trait Damageable {
    fn apply_hit(&mut self, hit: &HitContext);
    fn position(&self) -> Vec2;
}

/// Damage snapshot taken once per volley.
///
/// Projectiles own a clone, so levelling the weapon (or swapping its def)
/// after firing does not change shots already in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct HitPayload {
    pub damage: f32,
    pub is_crit: bool,
    pub effects: Arc<[StatusEffectDef]>,
}

impl Default for HitPayload {
    fn default() -> Self {
        Self {
            damage: 0.0,
            is_crit: false,
            effects: Arc::from(Vec::new()),
        }
    }
}

impl HitPayload {
    /// Damage at `level`, one crit roll, effects shared from the def.
    ///
    /// The uniform draw is skipped entirely when crits are disabled.
    pub fn roll<R: Rng + ?Sized>(def: &WeaponDef, level: u32, rng: &mut R) -> Self {
        let mut damage = def.damage_at(level);
        let is_crit = def.crit_enabled && rng.r#gen::<f32>() < def.crit_chance;
        if is_crit {
            damage *= def.crit_multiplier;
        }

        Self {
            damage,
            is_crit,
            effects: Arc::clone(&def.on_hit_effects),
        }
    }

    pub fn context(&self, point: Vec2) -> HitContext {
        HitContext {
            damage: self.damage,
            is_crit: self.is_crit,
            effects: Arc::clone(&self.effects),
            point,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HitContext {
    pub damage: f32,
    pub is_crit: bool,
    pub effects: Arc<[StatusEffectDef]>,
    /// Contact point on the target's surface.
    pub point: Vec2,
}

/// Apply `hit` to `target`, then dispatch each on-hit effect once.
///
/// Effect potency is the delivered damage (crit included).
pub fn deliver_hit(target: &mut dyn Damageable, hit: &HitContext, effects: &EffectRegistry) {
    target.apply_hit(hit);
    for effect in hit.effects.iter() {
        if !effects.apply(effect, target, hit.damage) {
            debug!("no handler for status effect `{}`; skipped", effect.id);
        }
    }
}
