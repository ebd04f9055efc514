//! Swept circle-vs-circle collision.
//!
//! Projectiles do not use physics contact events. Each step sweeps the
//! projectile's circle along the full segment `last_position → next` and asks
//! for the earliest target it touches. A target thinner than one frame of
//! travel is still found because the test is analytic over the segment, not a
//! point sample at the end of it.
//!
//! # Snapshot
//! `TargetField` is a per-frame copy of every hurtbox (entity, centre, radius).
//! It is rebuilt once per frame before weapons fire and is the only thing the
//! targeting and sweep code reads, which keeps both pure and testable without
//! a `World`.

use bevy::prelude::*;

use crate::plugins::weapons::targeting::{TargetRef, TargetRegistry};

use super::components::{Dead, Health};

/// Circular hit area of a damageable entity.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Hurtbox {
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    pub entity: Entity,
    /// Fraction of the segment at first contact, in `[0, 1]`.
    pub time: f32,
    /// Contact point on the target's surface.
    pub point: Vec2,
}

/// Earliest-contact query along a segment.
pub trait SweepQuery {
    fn sweep(&self, from: Vec2, to: Vec2, radius: f32, ignore: &[Entity]) -> Option<SweepHit>;
}

/// Time of first contact between a circle of `radius` moving `from → to` and a
/// static circle at `center`.
///
/// Returns `Some(0.0)` when the circles already overlap at `from`.
pub fn sweep_circle(from: Vec2, to: Vec2, radius: f32, center: Vec2, target_radius: f32) -> Option<f32> {
    let reach = radius + target_radius;
    let offset = from - center;
    let c = offset.length_squared() - reach * reach;
    if c <= 0.0 {
        return Some(0.0);
    }

    let d = to - from;
    let a = d.length_squared();
    if a <= f32::EPSILON {
        return None;
    }

    let b = offset.dot(d);
    let disc = b * b - a * c;
    if disc < 0.0 {
        return None;
    }

    let t = (-b - disc.sqrt()) / a;
    (0.0..=1.0).contains(&t).then_some(t)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetEntry {
    pub entity: Entity,
    pub position: Vec2,
    pub radius: f32,
}

/// Frame snapshot of damageable targets.
#[derive(Resource, Debug, Default, Clone)]
pub struct TargetField {
    entries: Vec<TargetEntry>,
}

impl TargetField {
    pub fn new(entries: impl IntoIterator<Item = TargetEntry>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    pub fn push(&mut self, entity: Entity, position: Vec2, radius: f32) {
        self.entries.push(TargetEntry { entity, position, radius });
    }

    #[inline]
    pub fn entries(&self) -> &[TargetEntry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TargetRegistry for TargetField {
    fn nearest_within(&self, position: Vec2, range: f32) -> Option<TargetRef> {
        let range_sq = range * range;
        self.entries
            .iter()
            .map(|e| (e, e.position.distance_squared(position)))
            .filter(|(_, d2)| *d2 <= range_sq)
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(e, _)| TargetRef {
                entity: e.entity,
                position: e.position,
            })
    }
}

impl SweepQuery for TargetField {
    fn sweep(&self, from: Vec2, to: Vec2, radius: f32, ignore: &[Entity]) -> Option<SweepHit> {
        let (entry, time) = self
            .entries
            .iter()
            .filter(|e| !ignore.contains(&e.entity))
            .filter_map(|e| sweep_circle(from, to, radius, e.position, e.radius).map(|t| (e, t)))
            .min_by(|(_, a), (_, b)| a.total_cmp(b))?;

        let at = from.lerp(to, time);
        let point = entry.position + (at - entry.position).normalize_or_zero() * entry.radius;
        Some(SweepHit {
            entity: entry.entity,
            time,
            point,
        })
    }
}

/// Rebuild the snapshot from every live hurtbox.
pub fn refresh_target_field(
    mut field: ResMut<TargetField>,
    q: Query<(Entity, &Transform, &Hurtbox, &Health), Without<Dead>>,
) {
    field.clear();
    for (e, tf, hurtbox, health) in &q {
        if health.is_alive() {
            field.push(e, tf.translation.truncate(), hurtbox.radius);
        }
    }
}
