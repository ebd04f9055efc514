use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::core::CombatRng;
use crate::plugins::projectiles::collision::TargetField;
use crate::plugins::projectiles::components::Dead;
use crate::plugins::projectiles::messages::SpawnProjectileRequest;

use super::controller::FireContext;
use super::def::WeaponId;
use super::loadout::{Facing, WeaponLoadout};
use super::targeting::{Shooter, TargetingSolver};

/// Request to change the level of one weapon on one owner.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct SetWeaponLevel {
    pub owner: Entity,
    pub weapon_id: WeaponId,
    pub level: u32,
}

pub fn apply_level_changes(
    mut reader: MessageReader<SetWeaponLevel>,
    mut q_loadouts: Query<&mut WeaponLoadout>,
) {
    for req in reader.read() {
        let Ok(mut loadout) = q_loadouts.get_mut(req.owner) else {
            debug!("level change for {} ignored: no loadout", req.owner);
            continue;
        };
        if loadout.set_level(req.weapon_id.as_str(), req.level) == 0 {
            debug!("level change ignored: `{}` not equipped on {}", req.weapon_id, req.owner);
        }
    }
}

/// Tick every living owner's loadout once.
pub fn tick_weapons(
    time: Res<Time>,
    tunables: Res<Tunables>,
    field: Res<TargetField>,
    mut rng: ResMut<CombatRng>,
    mut spawner: MessageWriter<SpawnProjectileRequest>,
    mut q_owners: Query<(Entity, &Transform, &Facing, &mut WeaponLoadout), Without<Dead>>,
) {
    let dt = time.delta_secs();
    let solver = TargetingSolver::new(tunables.orbit_directions);

    for (owner, tf, facing, mut loadout) in &mut q_owners {
        let mut ctx = FireContext {
            owner: Some(owner),
            shooter: Shooter {
                position: tf.translation.truncate(),
                facing: facing.0,
            },
            targets: &*field,
            spawner: &mut spawner,
            rng: &mut rng.0,
            solver,
        };
        loadout.tick_all(dt, &mut ctx);
    }
}
