//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `cowpoke_combat::game::configure_headless` to install gameplay plugins.
//!
//! Time is stepped manually so every `app.update()` advances exactly `dt`.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use cowpoke_combat::common::tunables::Tunables;

pub const DT: f32 = 1.0 / 60.0;

pub fn app_headless() -> App {
    app_with_tunables(Tunables::default())
}

/// Headless app with the given tunables and a fixed frame time of `DT`.
pub fn app_with_tunables(tunables: Tunables) -> App {
    let mut app = App::new();

    // Add AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(DT)));
    app.insert_resource(tunables);

    cowpoke_combat::game::configure_headless(&mut app);
    // `App::run` normally does this; tests drive `update()` directly, so
    // finish plugin setup here (Avian registers resources in `finish`).
    app.finish();
    app.cleanup();
    app
}

/// Tunables for scripted scenarios: no director spawns.
pub fn quiet_tunables() -> Tunables {
    Tunables {
        spawn_enabled: false,
        ..default()
    }
}

pub fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}
