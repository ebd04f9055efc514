//! Tunable gameplay constants.
//!
//! Distances are world units (meters). Times are seconds.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    /// Avian length unit; world units are already meters.
    pub length_unit: f32,

    /// Seed for [`CombatRng`](crate::plugins::core::CombatRng).
    pub rng_seed: u64,

    /// Radius of the swept sphere used by every projectile.
    pub projectile_radius: f32,
    /// Number of directions produced by `TargetingMode::OrbitSelf`.
    pub orbit_directions: u32,
    /// Upper bound on catch-up volleys one weapon may fire in a single tick.
    pub max_volleys_per_tick: u32,
    /// Pre-spawned instances per registered projectile key.
    pub pool_capacity_per_key: usize,

    pub player_health: f32,

    pub enemy_speed: f32,
    pub enemy_health: f32,
    pub enemy_radius: f32,
    /// Enemies stop chasing once this close to the player's centre.
    pub enemy_close_distance: f32,
    /// Damage dealt to the player each time an enemy starts touching it.
    pub enemy_contact_damage: f32,
    /// Enemy director: interval at t=0, interval after `spawn_ramp_secs`, ramp length.
    pub spawn_interval_start: f32,
    pub spawn_interval_end: f32,
    pub spawn_ramp_secs: f32,
    pub spawn_radius: f32,
    pub spawn_enabled: bool,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            length_unit: 1.0,
            rng_seed: 42,
            projectile_radius: 0.15,
            orbit_directions: 4,
            max_volleys_per_tick: 16,
            pool_capacity_per_key: 256,
            player_health: 3.0,
            enemy_speed: 2.0,
            enemy_health: 3.0,
            enemy_radius: 0.5,
            enemy_close_distance: 0.6,
            enemy_contact_damage: 999.0,
            spawn_interval_start: 2.5,
            spawn_interval_end: 0.4,
            spawn_ramp_secs: 600.0,
            spawn_radius: 12.0,
            spawn_enabled: true,
        }
    }
}
