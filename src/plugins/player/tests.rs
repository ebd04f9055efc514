use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::projectiles::collision::Hurtbox;
use crate::plugins::projectiles::components::Health;
use crate::plugins::projectiles::pool::ProjectilePool;
use crate::plugins::weapons::catalog::WeaponCatalog;
use crate::plugins::weapons::effects::EffectRegistry;
use crate::plugins::weapons::loadout::{Facing, LoadoutRecord, WeaponLoadout};

use super::{Player, StartingLoadout};

fn spawn_world(starting: LoadoutRecord) -> World {
    let mut world = World::new();
    let mut pool = ProjectilePool::new(4, 0.15);
    let catalog = WeaponCatalog::builtin();
    for key in catalog.projectile_keys() {
        pool.register_key(key.clone());
    }
    world.insert_resource(pool);
    world.insert_resource(catalog);
    world.insert_resource(StartingLoadout(starting));
    world.init_resource::<EffectRegistry>();
    world.insert_resource(Tunables::default());
    world
}

#[test]
fn spawn_creates_armed_player_once() {
    let mut world = spawn_world(LoadoutRecord::single("revolver", 2));
    run_system_once(&mut world, super::spawn);
    run_system_once(&mut world, super::spawn);

    let mut q = world.query::<(&Player, &WeaponLoadout, &Facing)>();
    assert_eq!(q.iter(&world).count(), 1);
    let (_, loadout, facing) = q.iter(&world).next().unwrap();
    assert_eq!(loadout.get("revolver").unwrap().level(), 2);
    assert_eq!(facing.0, Vec2::Y);

    // Damageable by contact, never a projectile target.
    let mut q = world.query_filtered::<(&Health, Has<Hurtbox>), With<Player>>();
    let (health, has_hurtbox) = q.single(&world).unwrap();
    assert_eq!(health.current, Tunables::default().player_health);
    assert!(!has_hurtbox);
}

#[test]
fn rejected_starting_loadout_spawns_unarmed() {
    let mut world = spawn_world(LoadoutRecord::single("harpoon", 1));
    run_system_once(&mut world, super::spawn);

    let loadout = world.query::<&WeaponLoadout>().iter(&world).next().unwrap();
    assert!(loadout.is_empty());
}

#[test]
fn facing_follows_velocity_and_holds_when_still() {
    let mut world = World::new();
    let player = world
        .spawn((Player, LinearVelocity(Vec2::new(0.0, -3.0)), Facing::default()))
        .id();

    run_system_once(&mut world, super::face_velocity);
    assert_eq!(world.get::<Facing>(player).unwrap().0, Vec2::NEG_Y);

    world.get_mut::<LinearVelocity>(player).unwrap().0 = Vec2::ZERO;
    run_system_once(&mut world, super::face_velocity);
    assert_eq!(world.get::<Facing>(player).unwrap().0, Vec2::NEG_Y);
}
