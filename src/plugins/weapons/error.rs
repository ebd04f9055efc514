//! Configuration errors.
//!
//! These are raised once, when a weapon def is loaded or registered with a
//! loadout. A rejected weapon never reaches the tick loop, so nothing here is
//! ever reported per frame.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvalidConfiguration {
    #[error("weapon def has an empty id")]
    MissingWeaponId,

    #[error("weapon `{weapon}` has no projectile key")]
    MissingProjectileKey { weapon: String },

    #[error("weapon `{weapon}` uses projectile key `{key}`, which has no pool")]
    UnregisteredProjectileKey { weapon: String, key: String },

    #[error("weapon `{weapon}`: `{field}` = {value} is out of range")]
    InvalidStat {
        weapon: String,
        field: &'static str,
        value: f32,
    },

    #[error("weapon `{weapon}`: `{curve}` has no keys")]
    EmptyCurve { weapon: String, curve: &'static str },

    #[error("weapon `{weapon}`: on-hit effect `{effect}` has no registered handler")]
    UnknownEffect { weapon: String, effect: String },

    #[error("weapon `{0}` is not in the catalog")]
    UnknownWeapon(String),

    #[error("weapon `{0}` is defined more than once")]
    DuplicateWeapon(String),

    #[error("malformed weapon data: {0}")]
    Malformed(#[from] serde_json::Error),
}
