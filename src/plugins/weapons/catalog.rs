//! Weapon catalog: every known `WeaponDef`, by id.

use std::sync::Arc;

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use super::def::{ProjectileKey, TargetingMode, WeaponDef, WeaponId};
use super::error::InvalidConfiguration;

#[derive(Resource, Debug, Clone, Default)]
pub struct WeaponCatalog {
    defs: HashMap<WeaponId, Arc<WeaponDef>>,
}

impl WeaponCatalog {
    /// Validate and index `defs`. Ids must be unique.
    pub fn from_defs(defs: impl IntoIterator<Item = WeaponDef>) -> Result<Self, InvalidConfiguration> {
        let mut catalog = Self::default();
        for def in defs {
            def.validate()?;
            if catalog.defs.contains_key(&def.id) {
                return Err(InvalidConfiguration::DuplicateWeapon(def.id.to_string()));
            }
            catalog.defs.insert(def.id.clone(), Arc::new(def));
        }
        Ok(catalog)
    }

    /// Parse a JSON array of weapon defs.
    pub fn from_json_str(json: &str) -> Result<Self, InvalidConfiguration> {
        let defs: Vec<WeaponDef> = serde_json::from_str(json)?;
        Self::from_defs(defs)
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<&Arc<WeaponDef>> {
        self.defs.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<WeaponDef>> {
        self.defs.values()
    }

    /// Every projectile key some def fires.
    pub fn projectile_keys(&self) -> impl Iterator<Item = &ProjectileKey> {
        self.defs.values().map(|d| &d.projectile)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Stock weapons.
    pub fn builtin() -> Self {
        let defs = [
            WeaponDef {
                id: "revolver".into(),
                projectile: "bullet".into(),
                ..default()
            },
            WeaponDef {
                id: "scattergun".into(),
                projectile: "bullet".into(),
                base_damage: 4.0,
                shots_per_second: 0.8,
                projectiles_per_shot: 5,
                spread_degrees: 12.0,
                projectile_speed: 14.0,
                lifetime: 0.8,
                range: 8.0,
                ..default()
            },
            WeaponDef {
                id: "bola".into(),
                projectile: "bola".into(),
                base_damage: 6.0,
                shots_per_second: 0.5,
                projectile_speed: 6.0,
                lifetime: 1.5,
                pierce: 2,
                targeting: TargetingMode::OrbitSelf,
                ..default()
            },
        ];

        let mut catalog = Self::default();
        for def in defs {
            catalog.defs.insert(def.id.clone(), Arc::new(def));
        }
        catalog
    }
}
