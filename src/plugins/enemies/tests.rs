//! Unit tests for the enemies module.
//!
//! Submodule tests so they can reach the private systems.

use std::time::Duration;

use avian2d::prelude::*;
use bevy::prelude::*;

use super::*;
use crate::common::test_utils::run_system_once;

fn time_with_delta(dt: f32) -> Time {
    let mut t = Time::<()>::default();
    t.advance_by(Duration::from_secs_f32(dt));
    t
}

fn director_world(dt: f32) -> World {
    let mut world = World::new();
    world.insert_resource(time_with_delta(dt));
    world.insert_resource(Tunables::default());
    world.insert_resource(CombatRng::seeded(1));
    world.init_resource::<EnemyDirector>();
    world
}

#[test]
fn spawn_interval_ramps_then_holds() {
    let t = Tunables::default();
    assert_eq!(spawn_interval(&t, 0.0), 2.5);
    assert!((spawn_interval(&t, 300.0) - 1.45).abs() < 1e-5);
    assert!((spawn_interval(&t, 600.0) - 0.4).abs() < 1e-6);
    assert!((spawn_interval(&t, 5000.0) - 0.4).abs() < 1e-6);

    let instant = Tunables {
        spawn_ramp_secs: 0.0,
        ..default()
    };
    assert_eq!(spawn_interval(&instant, 0.0), instant.spawn_interval_end);
}

#[test]
fn director_spawns_on_circle_around_player() {
    let mut world = director_world(0.1);
    world.spawn((Player, Transform::from_xyz(3.0, -2.0, 1.0)));

    run_system_once(&mut world, direct_spawns);

    let mut q = world.query_filtered::<(&Transform, &Health, &Hurtbox), With<Enemy>>();
    let spawned: Vec<_> = q.iter(&world).collect();
    assert_eq!(spawned.len(), 1);

    let (tf, health, hurtbox) = spawned[0];
    let distance = tf.translation.truncate().distance(Vec2::new(3.0, -2.0));
    assert!((distance - 12.0).abs() < 1e-4);
    assert_eq!(health.current, 3.0);
    assert_eq!(hurtbox.radius, 0.5);

    let director = world.resource::<EnemyDirector>();
    assert_eq!(director.spawned, 1);
    assert!((director.cooldown - spawn_interval(&Tunables::default(), 0.1)).abs() < 1e-6);
}

#[test]
fn director_waits_for_cooldown_and_player() {
    let mut world = director_world(0.1);

    // No player yet: the clock runs but nothing spawns.
    run_system_once(&mut world, direct_spawns);
    assert_eq!(world.resource::<EnemyDirector>().spawned, 0);

    world.spawn((Player, Transform::default()));
    run_system_once(&mut world, direct_spawns);
    run_system_once(&mut world, direct_spawns);
    assert_eq!(world.resource::<EnemyDirector>().spawned, 1);
    assert!((world.resource::<EnemyDirector>().elapsed - 0.3).abs() < 1e-5);
}

#[test]
fn director_respects_spawn_switch() {
    let mut world = director_world(1.0);
    world.insert_resource(Tunables {
        spawn_enabled: false,
        ..default()
    });
    world.spawn((Player, Transform::default()));

    run_system_once(&mut world, direct_spawns);
    assert_eq!(world.query::<&Enemy>().iter(&world).count(), 0);
}

#[test]
fn enemies_chase_player_until_dead() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.spawn((Player, Transform::from_xyz(0.0, 10.0, 1.0)));
    let chaser = world
        .spawn((Enemy, Transform::default(), LinearVelocity::ZERO))
        .id();
    let corpse = world
        .spawn((Enemy, Transform::default(), LinearVelocity::ZERO, Dead))
        .id();

    run_system_once(&mut world, chase_player);

    assert_eq!(world.get::<LinearVelocity>(chaser).unwrap().0, Vec2::new(0.0, 2.0));
    assert_eq!(world.get::<LinearVelocity>(corpse).unwrap().0, Vec2::ZERO);
}

#[test]
fn zero_health_marks_dead_and_stops() {
    let mut world = World::new();
    let dying = world
        .spawn((Enemy, Health { current: 0.0, max: 3.0 }, LinearVelocity(Vec2::X)))
        .id();
    let healthy = world.spawn((Enemy, Health::new(3.0))).id();

    run_system_once(&mut world, mark_dead);

    assert!(world.get::<Dead>(dying).is_some());
    assert_eq!(world.get::<LinearVelocity>(dying).unwrap().0, Vec2::ZERO);
    assert!(world.get::<Dead>(healthy).is_none());
}

#[test]
fn dead_enemies_are_despawned() {
    let mut world = World::new();
    let dead = world.spawn((Enemy, Dead)).id();
    let alive = world.spawn(Enemy).id();

    run_system_once(&mut world, despawn_dead_enemies);

    assert!(world.get_entity(dead).is_err());
    assert!(world.get_entity(alive).is_ok());
}

#[test]
fn enemies_stop_at_close_distance() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.spawn((Player, Transform::default()));
    let close = world
        .spawn((Enemy, Transform::from_xyz(0.5, 0.0, 1.0), LinearVelocity(Vec2::X)))
        .id();
    let approaching = world
        .spawn((Enemy, Transform::from_xyz(4.0, 0.0, 1.0), LinearVelocity::ZERO))
        .id();

    run_system_once(&mut world, chase_player);

    assert_eq!(world.get::<LinearVelocity>(close).unwrap().0, Vec2::ZERO);
    assert_eq!(world.get::<LinearVelocity>(approaching).unwrap().0, Vec2::new(-2.0, 0.0));
}

fn contact_world(contact_damage: f32) -> (World, Entity) {
    let mut world = World::new();
    world.insert_resource(Tunables {
        enemy_contact_damage: contact_damage,
        ..default()
    });
    let player = world
        .spawn((Player, Transform::default(), Health::new(3.0)))
        .id();
    (world, player)
}

#[test]
fn contact_damages_player_once_per_touch() {
    let (mut world, player) = contact_world(1.0);
    let enemy = world.spawn((Enemy, Transform::from_xyz(0.8, 0.0, 1.0))).id();
    world.spawn((Enemy, Transform::from_xyz(5.0, 0.0, 1.0)));

    run_system_once(&mut world, contact_damage);
    assert_eq!(world.get::<Health>(player).unwrap().current, 2.0);
    assert!(world.get::<Touching>(enemy).is_some());

    // Still overlapping: no further damage.
    run_system_once(&mut world, contact_damage);
    assert_eq!(world.get::<Health>(player).unwrap().current, 2.0);

    // Separate, then touch again.
    world.get_mut::<Transform>(enemy).unwrap().translation.x = 3.0;
    run_system_once(&mut world, contact_damage);
    assert!(world.get::<Touching>(enemy).is_none());

    world.get_mut::<Transform>(enemy).unwrap().translation.x = -0.9;
    run_system_once(&mut world, contact_damage);
    assert_eq!(world.get::<Health>(player).unwrap().current, 1.0);
}

#[test]
fn contact_kills_player_and_marks_it_dead() {
    let (mut world, player) = contact_world(999.0);
    world.spawn((Enemy, Transform::from_xyz(0.0, 0.5, 1.0)));

    run_system_once(&mut world, contact_damage);
    assert!(!world.get::<Health>(player).unwrap().is_alive());

    run_system_once(&mut world, mark_dead);
    assert!(world.get::<Dead>(player).is_some());
}

#[test]
fn dead_enemies_and_dead_players_deal_no_contact_damage() {
    let (mut world, player) = contact_world(1.0);
    world.spawn((Enemy, Transform::default(), Dead));

    run_system_once(&mut world, contact_damage);
    assert_eq!(world.get::<Health>(player).unwrap().current, 3.0);

    world.entity_mut(player).insert(Dead);
    world.spawn((Enemy, Transform::default()));
    run_system_once(&mut world, contact_damage);
    assert_eq!(world.get::<Health>(player).unwrap().current, 3.0);
}
