use bevy::prelude::*;
use rand::RngCore;

use crate::common::tunables::Tunables;
use crate::plugins::core::{self, CombatRng};

#[test]
fn inserts_resources() {
    let mut app = App::new();
    core::plugin(&mut app);
    assert!(app.world().get_resource::<Tunables>().is_some());
    assert!(app.world().get_resource::<CombatRng>().is_some());
}

#[test]
fn keeps_preinserted_tunables_and_seeds_from_them() {
    let mut app = App::new();
    app.insert_resource(Tunables {
        rng_seed: 7,
        ..default()
    });
    core::plugin(&mut app);

    assert_eq!(app.world().resource::<Tunables>().rng_seed, 7);
    let mut expected = CombatRng::seeded(7);
    let mut rng = app.world_mut().resource_mut::<CombatRng>();
    assert_eq!(rng.0.next_u64(), expected.0.next_u64());
}
