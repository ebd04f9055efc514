//! Global state machine.
//!
//! Combat systems run only in `InGame`. `Paused` stops every weapon tick and
//! projectile step without touching their state, so resuming continues from
//! the exact accumulator/age values that were current when the pause began.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
    Paused,
}
