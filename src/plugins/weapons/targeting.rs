//! Targeting: which way does a volley go?
//!
//! `TargetingSolver::solve` is a pure function of the shooter pose, the def,
//! a target registry and an injected RNG. It always returns at least one unit
//! direction; "no target" is an ordinary outcome that falls back to facing.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::{Rng, RngCore};

use super::def::{TargetingMode, WeaponDef, MAX_SPREAD_DEGREES};

/// World-space reference axis ("forward" of the arena).
pub const REFERENCE_AXIS: Vec2 = Vec2::Y;

/// Position and facing of whoever is firing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shooter {
    pub position: Vec2,
    pub facing: Vec2,
}

impl Shooter {
    /// Facing as a unit vector; a degenerate facing becomes the reference axis.
    #[inline]
    pub fn forward(&self) -> Vec2 {
        self.facing.try_normalize().unwrap_or(REFERENCE_AXIS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetRef {
    pub entity: Entity,
    pub position: Vec2,
}

/// Nearest-target lookup.
pub trait TargetRegistry {
    fn nearest_within(&self, position: Vec2, range: f32) -> Option<TargetRef>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetingSolver {
    /// `k` for `OrbitSelf`; at least 1.
    pub orbit_directions: u32,
}

impl Default for TargetingSolver {
    fn default() -> Self {
        Self {
            orbit_directions: Self::DEFAULT_ORBIT_DIRECTIONS,
        }
    }
}

impl TargetingSolver {
    pub const DEFAULT_ORBIT_DIRECTIONS: u32 = 4;

    pub fn new(orbit_directions: u32) -> Self {
        Self {
            orbit_directions: orbit_directions.max(1),
        }
    }

    pub fn solve(
        &self,
        shooter: Shooter,
        def: &WeaponDef,
        targets: &dyn TargetRegistry,
        rng: &mut dyn RngCore,
    ) -> Vec<Vec2> {
        match def.targeting {
            TargetingMode::ForwardVector => vec![shooter.forward()],
            TargetingMode::Random => vec![Vec2::from_angle(rng.gen_range(0.0..TAU))],
            TargetingMode::OrbitSelf => orbit_directions(self.orbit_directions).collect(),
            // The area itself belongs to the projectile/effect; direction is a placeholder.
            TargetingMode::Aoe => vec![REFERENCE_AXIS],
            TargetingMode::Nearest => vec![toward_nearest(shooter, def.range, targets)],
        }
    }
}

fn toward_nearest(shooter: Shooter, range: f32, targets: &dyn TargetRegistry) -> Vec2 {
    targets
        .nearest_within(shooter.position, range)
        .and_then(|target| (target.position - shooter.position).try_normalize())
        .unwrap_or_else(|| shooter.forward())
}

/// `k` unit vectors evenly spaced around the shooter, starting at the
/// reference axis. Their sum is zero for `k >= 2`.
pub fn orbit_directions(k: u32) -> impl Iterator<Item = Vec2> {
    let k = k.max(1);
    let step = TAU / k as f32;
    (0..k).map(move |i| Vec2::from_angle(i as f32 * step).rotate(REFERENCE_AXIS))
}

/// Rotate `direction` by a uniform random angle in `[-spread, +spread]` degrees.
///
/// Spread is capped at [`MAX_SPREAD_DEGREES`]; NaN counts as no spread.
pub fn apply_spread(direction: Vec2, spread_degrees: f32, rng: &mut dyn RngCore) -> Vec2 {
    if spread_degrees.is_nan() || spread_degrees == 0.0 {
        return direction;
    }
    let spread = spread_degrees.abs().min(MAX_SPREAD_DEGREES);
    let angle = rng.gen_range(-spread..=spread).to_radians();
    Vec2::from_angle(angle).rotate(direction)
}
