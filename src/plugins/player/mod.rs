//! Player plugin.
//!
//! The player is a kinematic body that owns a `WeaponLoadout`. Whatever moves
//! it (input lives outside this crate) sets `LinearVelocity`; `Facing` follows
//! the last non-zero velocity so forward-firing weapons aim where it walks.
//!
//! The player has `Health` but no `Hurtbox`: enemies hurt it by contact, and
//! its own projectiles never consider it a target.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::projectiles::components::Health;
use crate::plugins::projectiles::pool::ProjectilePool;
use crate::plugins::weapons::catalog::WeaponCatalog;
use crate::plugins::weapons::effects::EffectRegistry;
use crate::plugins::weapons::loadout::{Facing, LoadoutRecord, RegistrationContext, WeaponLoadout};

#[derive(Component)]
pub struct Player;

/// Loadout the player spawns with.
#[derive(Resource, Debug, Clone)]
pub struct StartingLoadout(pub LoadoutRecord);

impl Default for StartingLoadout {
    fn default() -> Self {
        Self(LoadoutRecord::single("revolver", 1))
    }
}

pub const PLAYER_RADIUS: f32 = 0.5;

pub fn plugin(app: &mut App) {
    app.init_resource::<StartingLoadout>()
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(Update, face_velocity.run_if(in_state(GameState::InGame)));
}

fn spawn(
    mut commands: Commands,
    q_player: Query<(), With<Player>>,
    starting: Res<StartingLoadout>,
    catalog: Res<WeaponCatalog>,
    pool: Res<ProjectilePool>,
    effects: Res<EffectRegistry>,
    tunables: Res<Tunables>,
) {
    // OnEnter(InGame) also runs when resuming from Paused.
    if !q_player.is_empty() {
        return;
    }

    let ctx = RegistrationContext {
        pool: &pool,
        effects: &effects,
        volley_cap: tunables.max_volleys_per_tick,
    };
    let loadout = WeaponLoadout::restore(&starting.0, &catalog, &ctx).unwrap_or_else(|err| {
        warn!("starting loadout rejected ({err}); player spawns unarmed");
        WeaponLoadout::default()
    });

    let layers = CollisionLayers::new(Layer::Player, [Layer::Enemy]);

    commands.spawn((
        Name::new("Player"),
        Player,
        Transform::from_xyz(0.0, 0.0, 1.0),
        Health::new(tunables.player_health),
        RigidBody::Kinematic,
        Collider::circle(PLAYER_RADIUS),
        layers,
        LinearVelocity::ZERO,
        Facing::default(),
        loadout,
    ));
}

fn face_velocity(mut q_player: Query<(&LinearVelocity, &mut Facing), With<Player>>) {
    for (vel, mut facing) in &mut q_player {
        if let Some(dir) = vel.0.try_normalize() {
            facing.0 = dir;
        }
    }
}

#[cfg(test)]
mod tests;
