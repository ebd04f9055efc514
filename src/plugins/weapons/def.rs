//! Static weapon descriptors.
//!
//! A `WeaponDef` is plain immutable data. It is loaded once (JSON or code),
//! wrapped in an `Arc`, and shared read-only by every controller that equips
//! it. Nothing mutates a def at runtime.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::curve::LevelCurve;
use super::effects::StatusEffectDef;
use super::error::InvalidConfiguration;

/// Widest accepted spread half-angle; anything wider is a full circle.
pub const MAX_SPREAD_DEGREES: f32 = 180.0;

/// Stable weapon identifier (what a save record stores).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct WeaponId(Arc<str>);

impl WeaponId {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WeaponId {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl Borrow<str> for WeaponId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WeaponId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which pool a weapon's projectiles come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ProjectileKey(Arc<str>);

impl ProjectileKey {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ProjectileKey {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl fmt::Display for ProjectileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TargetingMode {
    #[default]
    Nearest,
    Random,
    ForwardVector,
    OrbitSelf,
    #[serde(rename = "AOE")]
    Aoe,
}

/// Authoring hint for presentation. The scheduler fires every mode on a fixed
/// interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FireMode {
    Auto,
    Burst,
    #[default]
    Interval,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponDef {
    pub id: WeaponId,
    pub projectile: ProjectileKey,

    pub base_damage: f32,
    pub shots_per_second: f32,
    pub projectiles_per_shot: u32,
    /// Half-angle of the random cone around each direction, `0..=180`.
    pub spread_degrees: f32,
    pub projectile_speed: f32,
    pub lifetime: f32,
    /// Extra targets a projectile may pass through. `0` = stop at first hit.
    pub pierce: u32,

    pub targeting: TargetingMode,
    pub range: f32,
    pub fire_mode: FireMode,

    pub crit_enabled: bool,
    pub crit_chance: f32,
    pub crit_multiplier: f32,
    pub on_hit_effects: Arc<[StatusEffectDef]>,

    pub damage_by_level: LevelCurve,
    pub aspd_by_level: LevelCurve,
}

impl Default for WeaponDef {
    fn default() -> Self {
        Self {
            id: WeaponId::default(),
            projectile: ProjectileKey::default(),
            base_damage: 10.0,
            shots_per_second: 2.0,
            projectiles_per_shot: 1,
            spread_degrees: 0.0,
            projectile_speed: 12.0,
            lifetime: 3.0,
            pierce: 0,
            targeting: TargetingMode::Nearest,
            range: 12.0,
            fire_mode: FireMode::Interval,
            crit_enabled: true,
            crit_chance: 0.1,
            crit_multiplier: 2.0,
            on_hit_effects: Arc::from(Vec::new()),
            damage_by_level: LevelCurve::linear(1.0, 1.0, 8.0, 2.0),
            aspd_by_level: LevelCurve::linear(1.0, 1.0, 8.0, 1.6),
        }
    }
}

impl WeaponDef {
    /// Floor for the effective fire rate. Zero, negative or NaN rates clamp
    /// here instead of producing an unbounded interval.
    pub const MIN_SHOTS_PER_SECOND: f32 = 0.01;

    /// Effective shots per second at `level`, clamped to the minimum rate.
    pub fn fire_rate(&self, level: u32) -> f32 {
        (self.shots_per_second * self.aspd_by_level.evaluate(level)).max(Self::MIN_SHOTS_PER_SECOND)
    }

    /// Seconds between volleys at `level`.
    #[inline]
    pub fn fire_interval(&self, level: u32) -> f32 {
        1.0 / self.fire_rate(level)
    }

    /// Non-crit damage at `level`.
    #[inline]
    pub fn damage_at(&self, level: u32) -> f32 {
        self.base_damage * self.damage_by_level.evaluate(level)
    }

    pub fn from_json_str(json: &str) -> Result<Self, InvalidConfiguration> {
        let def: Self = serde_json::from_str(json)?;
        def.validate()?;
        Ok(def)
    }

    /// Structural checks that do not depend on the runtime (pools, effect
    /// handlers). See `RegistrationContext` for the rest.
    pub fn validate(&self) -> Result<(), InvalidConfiguration> {
        if self.id.as_str().is_empty() {
            return Err(InvalidConfiguration::MissingWeaponId);
        }
        if self.projectile.is_empty() {
            return Err(InvalidConfiguration::MissingProjectileKey {
                weapon: self.id.to_string(),
            });
        }

        let stat = |field: &'static str, value: f32, ok: bool| {
            if ok && value.is_finite() {
                Ok(())
            } else {
                Err(InvalidConfiguration::InvalidStat {
                    weapon: self.id.to_string(),
                    field,
                    value,
                })
            }
        };
        stat("base_damage", self.base_damage, self.base_damage >= 0.0)?;
        stat(
            "spread_degrees",
            self.spread_degrees,
            (0.0..=MAX_SPREAD_DEGREES).contains(&self.spread_degrees),
        )?;
        stat("projectile_speed", self.projectile_speed, self.projectile_speed >= 0.0)?;
        stat("lifetime", self.lifetime, self.lifetime > 0.0)?;
        stat("range", self.range, self.range >= 0.0)?;
        stat("crit_chance", self.crit_chance, (0.0..=1.0).contains(&self.crit_chance))?;
        stat("crit_multiplier", self.crit_multiplier, self.crit_multiplier >= 0.0)?;

        for (curve, name) in [
            (&self.damage_by_level, "damage_by_level"),
            (&self.aspd_by_level, "aspd_by_level"),
        ] {
            if curve.is_empty() {
                return Err(InvalidConfiguration::EmptyCurve {
                    weapon: self.id.to_string(),
                    curve: name,
                });
            }
        }

        Ok(())
    }
}
