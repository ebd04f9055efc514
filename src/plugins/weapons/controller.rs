//! Per-weapon fire scheduler.
//!
//! # Catch-up scheduling
//! Every tick adds `dt` to an accumulator and fires one volley per whole
//! interval owed. Long-run fire rate therefore matches the configured rate no
//! matter how uneven the frame times are.
//!
//! A single tick fires at most `max_volleys_per_tick` volleys. Owed volleys
//! beyond the cap are dropped (the accumulator keeps only its phase within the
//! current interval), so a host hitch of several seconds produces a bounded
//! burst instead of an unbounded one.
//!
//! Post-tick invariant: `0 <= accumulator < interval`.

use std::sync::Arc;

use bevy::prelude::*;
use rand::RngCore;

use crate::plugins::projectiles::messages::{ProjectileLaunch, SpawnProjectileRequest};
use crate::plugins::projectiles::pool::ProjectileSpawner;

use super::def::WeaponDef;
use super::payload::HitPayload;
use super::targeting::{apply_spread, Shooter, TargetRegistry, TargetingSolver};

/// Everything a tick may read or write outside the controller itself.
pub struct FireContext<'a> {
    /// Entity that owns the weapon; its projectiles never hit it.
    pub owner: Option<Entity>,
    pub shooter: Shooter,
    pub targets: &'a dyn TargetRegistry,
    pub spawner: &'a mut dyn ProjectileSpawner,
    pub rng: &'a mut dyn RngCore,
    pub solver: TargetingSolver,
}

#[derive(Debug, Clone)]
pub struct WeaponController {
    def: Arc<WeaponDef>,
    level: u32,
    accumulator: f32,
    max_volleys_per_tick: u32,
}

impl WeaponController {
    pub const DEFAULT_MAX_VOLLEYS_PER_TICK: u32 = 16;

    pub fn new(def: Arc<WeaponDef>) -> Self {
        Self {
            def,
            level: 1,
            accumulator: 0.0,
            max_volleys_per_tick: Self::DEFAULT_MAX_VOLLEYS_PER_TICK,
        }
    }

    pub fn with_volley_cap(mut self, cap: u32) -> Self {
        self.max_volleys_per_tick = cap.max(1);
        self
    }

    #[inline]
    pub fn def(&self) -> &Arc<WeaponDef> {
        &self.def
    }

    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[inline]
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Levels start at 1; anything lower is clamped.
    pub fn set_level(&mut self, level: u32) {
        self.level = level.max(1);
    }

    #[inline]
    pub fn interval(&self) -> f32 {
        self.def.fire_interval(self.level)
    }

    /// Advance by `dt` seconds and fire every volley owed. Returns the number
    /// of volleys fired.
    ///
    /// Negative or non-finite `dt` counts as zero.
    pub fn tick(&mut self, dt: f32, ctx: &mut FireContext<'_>) -> u32 {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let interval = self.interval().max(f32::EPSILON);
        self.accumulator += dt;
        if !self.accumulator.is_finite() {
            self.accumulator = 0.0;
        }

        let mut fired = 0;
        while self.accumulator >= interval {
            if fired == self.max_volleys_per_tick {
                let dropped = (self.accumulator / interval) as u64;
                self.accumulator %= interval;
                warn!(
                    "weapon `{}` owed {dropped} more volleys after {fired} this tick; dropped",
                    self.def.id
                );
                break;
            }
            self.accumulator -= interval;
            self.fire_volley(ctx);
            fired += 1;
        }

        fired
    }

    /// One scheduled firing event: directions, one shared payload, then
    /// `projectiles_per_shot` spawns per direction with independent spread.
    fn fire_volley(&self, ctx: &mut FireContext<'_>) {
        let def = &*self.def;
        let directions = ctx.solver.solve(ctx.shooter, def, ctx.targets, &mut *ctx.rng);
        let payload = HitPayload::roll(def, self.level, &mut *ctx.rng);

        for direction in directions {
            for _ in 0..def.projectiles_per_shot {
                let direction = apply_spread(direction, def.spread_degrees, &mut *ctx.rng);
                ctx.spawner.spawn(SpawnProjectileRequest {
                    key: def.projectile.clone(),
                    owner: ctx.owner,
                    position: ctx.shooter.position,
                    launch: ProjectileLaunch {
                        direction,
                        payload: payload.clone(),
                        speed: def.projectile_speed,
                        lifetime: def.lifetime,
                        pierce: def.pierce,
                    },
                });
            }
        }
    }
}
