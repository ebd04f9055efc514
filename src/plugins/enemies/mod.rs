//! Enemies plugin: a spawn director, chasing bodies, and death handling.
//!
//! ---------------------------
//! HOW THIS IS DESIGNED (ECS)
//! ---------------------------
//! 1) FACTS live in components/resources:
//!    - `Health` + `Hurtbox` make an enemy a damageable target.
//!    - `EnemyDirector` holds the spawn clock.
//!    - `Touching` marks an enemy that is currently in contact with the player.
//!
//! 2) RULES mutate facts in predictable places:
//!    - projectiles (elsewhere) lower `Health` through the damageable capability.
//!    - an enemy lowers the player's `Health` once per contact.
//!    - this module turns zero health into `Dead` (player included) and later
//!      despawns dead enemies. A dead player stays in the world; its
//!      projectiles are recalled by the projectiles plugin.
//!
//! - We never despawn in the middle of the combat pipeline. Death is a marker
//!   (`Dead`) inserted in `CombatSet::Resolve`; despawn happens in PostUpdate,
//!   after every system that may still hold the entity id has run.
//!
//! ---------------------------
//! SPAWN RAMP
//! ---------------------------
//! The interval between spawns moves linearly from `spawn_interval_start` to
//! `spawn_interval_end` over `spawn_ramp_secs` of in-game time, then stays at
//! the end value. Enemies appear on a circle of `spawn_radius` around the
//! player at a uniformly random angle.

use std::f32::consts::TAU;

use avian2d::prelude::*;
use bevy::prelude::*;
use rand::Rng;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::core::CombatRng;
use crate::plugins::player::{Player, PLAYER_RADIUS};
use crate::plugins::projectiles::collision::Hurtbox;
use crate::plugins::projectiles::components::{Dead, Health};
use crate::plugins::projectiles::motion::recall_projectiles;
use crate::plugins::CombatSet;

#[derive(Component)]
pub struct Enemy;

/// Present while the enemy overlaps the player.
#[derive(Component)]
pub struct Touching;

#[derive(Resource, Debug, Default, Clone)]
pub struct EnemyDirector {
    /// In-game seconds since the director started.
    pub elapsed: f32,
    /// Seconds until the next spawn.
    pub cooldown: f32,
    pub spawned: u32,
}

/// Spawn interval after `elapsed` seconds.
pub fn spawn_interval(tunables: &Tunables, elapsed: f32) -> f32 {
    let t = if tunables.spawn_ramp_secs > 0.0 {
        (elapsed / tunables.spawn_ramp_secs).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let start = tunables.spawn_interval_start;
    start + (tunables.spawn_interval_end - start) * t
}

pub fn plugin(app: &mut App) {
    app.init_resource::<EnemyDirector>();

    app.add_systems(
        Update,
        (direct_spawns, chase_player, contact_damage)
            .chain()
            .before(CombatSet::Fire)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        Update,
        mark_dead
            .in_set(CombatSet::Resolve)
            .before(recall_projectiles)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        PostUpdate,
        despawn_dead_enemies.run_if(in_state(GameState::InGame)),
    );
}

pub fn spawn_enemy(commands: &mut Commands, position: Vec2, tunables: &Tunables) -> Entity {
    let layers = CollisionLayers::new(Layer::Enemy, [Layer::Player, Layer::Enemy]);

    commands
        .spawn((
            Name::new("Enemy"),
            Enemy,
            Transform::from_translation(position.extend(1.0)),
            Health::new(tunables.enemy_health),
            Hurtbox {
                radius: tunables.enemy_radius,
            },
            RigidBody::Kinematic,
            Collider::circle(tunables.enemy_radius),
            layers,
            LinearVelocity::ZERO,
        ))
        .id()
}

fn direct_spawns(
    mut commands: Commands,
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut director: ResMut<EnemyDirector>,
    mut rng: ResMut<CombatRng>,
    q_player: Query<&Transform, With<Player>>,
) {
    if !tunables.spawn_enabled {
        return;
    }

    let dt = time.delta_secs();
    director.elapsed += dt;
    director.cooldown -= dt;
    if director.cooldown > 0.0 {
        return;
    }

    let Ok(player_tf) = q_player.single() else {
        return;
    };

    let angle = rng.0.gen_range(0.0..TAU);
    let position = player_tf.translation.truncate() + Vec2::from_angle(angle) * tunables.spawn_radius;
    spawn_enemy(&mut commands, position, &tunables);

    director.spawned += 1;
    director.cooldown = spawn_interval(&tunables, director.elapsed);
    debug!(
        "enemy #{} spawned; next in {:.2}s",
        director.spawned, director.cooldown
    );
}

fn chase_player(
    tunables: Res<Tunables>,
    q_player: Query<&Transform, With<Player>>,
    mut q_enemies: Query<(&Transform, &mut LinearVelocity), (With<Enemy>, Without<Dead>)>,
) {
    let Ok(player_tf) = q_player.single() else {
        return;
    };
    let target = player_tf.translation.truncate();

    for (tf, mut vel) in &mut q_enemies {
        let to_player = target - tf.translation.truncate();
        if to_player.length() <= tunables.enemy_close_distance {
            vel.0 = Vec2::ZERO;
            continue;
        }
        vel.0 = to_player.normalize_or_zero() * tunables.enemy_speed;
    }
}

/// An enemy that starts overlapping a living player deals contact damage once;
/// it must separate before it can hurt again.
fn contact_damage(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut q_player: Query<(&Transform, &mut Health), (With<Player>, Without<Dead>)>,
    q_enemies: Query<(Entity, &Transform, Has<Touching>), (With<Enemy>, Without<Dead>)>,
) {
    let Ok((player_tf, mut health)) = q_player.single_mut() else {
        return;
    };
    let player_pos = player_tf.translation.truncate();
    let reach = tunables.enemy_radius + PLAYER_RADIUS;

    for (e, tf, touching) in &q_enemies {
        let overlapping = tf.translation.truncate().distance(player_pos) <= reach;
        match (overlapping, touching) {
            (true, false) => {
                commands.entity(e).insert(Touching);
                if health.is_alive() {
                    health.take_damage(tunables.enemy_contact_damage);
                    debug!("{e} hit the player; {} hp left", health.current);
                }
            }
            (false, true) => {
                commands.entity(e).remove::<Touching>();
            }
            _ => {}
        }
    }
}

/// Zero health → `Dead`. Dead bodies stop moving.
fn mark_dead(
    mut commands: Commands,
    mut q: Query<(Entity, &Health, Option<&mut LinearVelocity>), (Changed<Health>, Without<Dead>)>,
) {
    for (e, health, vel) in &mut q {
        if health.is_alive() {
            continue;
        }
        if let Some(mut vel) = vel {
            vel.0 = Vec2::ZERO;
        }
        commands.entity(e).insert(Dead);
        debug!("{e} died");
    }
}

fn despawn_dead_enemies(mut commands: Commands, q: Query<Entity, (With<Enemy>, With<Dead>)>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}

#[cfg(test)]
mod tests;
