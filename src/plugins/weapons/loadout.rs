//! Equipped weapons of one entity, plus the `(weapon id, level)` record a save
//! system may persist.
//!
//! Registration is the only place a weapon def is checked against the
//! runtime (pool keys, effect handlers). A rejected def is logged once and
//! returned as `InvalidConfiguration`; it never reaches `tick_all`.

use std::sync::Arc;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::plugins::projectiles::pool::ProjectilePool;

use super::catalog::WeaponCatalog;
use super::controller::{FireContext, WeaponController};
use super::def::{WeaponDef, WeaponId};
use super::effects::EffectRegistry;
use super::error::InvalidConfiguration;
use super::targeting::REFERENCE_AXIS;

/// Direction the entity faces; the fallback for `Nearest` and the aim for
/// `ForwardVector`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Facing(pub Vec2);

impl Default for Facing {
    fn default() -> Self {
        Self(REFERENCE_AXIS)
    }
}

/// What a weapon def is checked against when it is equipped.
#[derive(Clone, Copy)]
pub struct RegistrationContext<'a> {
    pub pool: &'a ProjectilePool,
    pub effects: &'a EffectRegistry,
    pub volley_cap: u32,
}

impl RegistrationContext<'_> {
    pub fn check(&self, def: &WeaponDef) -> Result<(), InvalidConfiguration> {
        def.validate()?;
        if !self.pool.has_key(&def.projectile) {
            return Err(InvalidConfiguration::UnregisteredProjectileKey {
                weapon: def.id.to_string(),
                key: def.projectile.to_string(),
            });
        }
        if let Some(effect) = def.on_hit_effects.iter().find(|e| !self.effects.contains(&e.id)) {
            return Err(InvalidConfiguration::UnknownEffect {
                weapon: def.id.to_string(),
                effect: effect.id.to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Component, Debug, Clone, Default)]
pub struct WeaponLoadout {
    weapons: Vec<WeaponController>,
}

impl WeaponLoadout {
    /// Equip `def` at `level` (clamped to at least 1).
    pub fn add_weapon(
        &mut self,
        def: Arc<WeaponDef>,
        level: u32,
        ctx: &RegistrationContext<'_>,
    ) -> Result<(), InvalidConfiguration> {
        if let Err(err) = ctx.check(&def) {
            error!("weapon rejected at registration: {err}");
            return Err(err);
        }

        let mut controller = WeaponController::new(def).with_volley_cap(ctx.volley_cap);
        controller.set_level(level);
        debug!(
            "equipped `{}` at level {}",
            controller.def().id,
            controller.level()
        );
        self.weapons.push(controller);
        Ok(())
    }

    /// Unequip every controller for `weapon_id`. Returns how many were removed.
    pub fn remove_weapon(&mut self, weapon_id: &str) -> usize {
        let before = self.weapons.len();
        self.weapons.retain(|c| c.def().id.as_str() != weapon_id);
        before - self.weapons.len()
    }

    /// Set the level of every controller for `weapon_id`. Returns how many
    /// were updated.
    pub fn set_level(&mut self, weapon_id: &str, level: u32) -> usize {
        let mut updated = 0;
        for controller in self.weapons.iter_mut().filter(|c| c.def().id.as_str() == weapon_id) {
            controller.set_level(level);
            updated += 1;
        }
        updated
    }

    /// Tick every equipped weapon in order. Returns the total volleys fired.
    pub fn tick_all(&mut self, dt: f32, ctx: &mut FireContext<'_>) -> u32 {
        self.weapons.iter_mut().map(|c| c.tick(dt, ctx)).sum()
    }

    #[inline]
    pub fn weapons(&self) -> &[WeaponController] {
        &self.weapons
    }

    pub fn get(&self, weapon_id: &str) -> Option<&WeaponController> {
        self.weapons.iter().find(|c| c.def().id.as_str() == weapon_id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    /// Persistable view: ids and levels only. Accumulators are not saved.
    pub fn snapshot(&self) -> LoadoutRecord {
        LoadoutRecord {
            weapons: self
                .weapons
                .iter()
                .map(|c| WeaponLevel {
                    weapon_id: c.def().id.clone(),
                    level: c.level(),
                })
                .collect(),
        }
    }

    /// Rebuild a loadout from `record`. All or nothing: the first unknown id
    /// or rejected def fails the whole restore.
    pub fn restore(
        record: &LoadoutRecord,
        catalog: &WeaponCatalog,
        ctx: &RegistrationContext<'_>,
    ) -> Result<Self, InvalidConfiguration> {
        let mut loadout = Self::default();
        for entry in &record.weapons {
            let def = catalog.get(entry.weapon_id.as_str()).ok_or_else(|| {
                let err = InvalidConfiguration::UnknownWeapon(entry.weapon_id.to_string());
                error!("loadout restore failed: {err}");
                err
            })?;
            loadout.add_weapon(Arc::clone(def), entry.level, ctx)?;
        }
        Ok(loadout)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponLevel {
    pub weapon_id: WeaponId,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadoutRecord {
    pub weapons: Vec<WeaponLevel>,
}

impl LoadoutRecord {
    pub fn single(weapon_id: impl Into<WeaponId>, level: u32) -> Self {
        Self {
            weapons: vec![WeaponLevel {
                weapon_id: weapon_id.into(),
                level,
            }],
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json_str(json: &str) -> Result<Self, InvalidConfiguration> {
        Ok(serde_json::from_str(json)?)
    }
}
