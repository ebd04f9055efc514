//! Game composition root.
//!
//! Provides two public configuration functions:
//! - `configure_full`: headless runner loop + logging + game plugins.
//! - `configure_headless`: game plugins only, for integration tests that bring
//!   their own `MinimalPlugins`.
//!
//! Nothing here opens a window; presentation layers (rendering, audio, input)
//! sit on top of this crate and read its components and `ProjectileHit`
//! messages.

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::asset::AssetPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;

use crate::common::state::GameState;
use crate::plugins;

/// Simulation rate of the standalone runner.
pub const TICK_HZ: f64 = 60.0;

pub fn run() {
    App::new().add_plugins(configure_full).run();
}

/// Full configuration for a standalone simulation.
pub fn configure_full(app: &mut App) {
    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / TICK_HZ,
        ))),
        LogPlugin::default(),
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));

    configure_game(app);
}

/// Headless configuration for integration tests.
///
/// Notes:
/// - Do NOT add a runner; tests drive `app.update()` themselves.
pub fn configure_headless(app: &mut App) {
    configure_game(app);
}

/// Configuration shared by both apps.
fn configure_game(app: &mut App) {
    app.init_state::<GameState>();
    plugins::register_gameplay(app);
}
