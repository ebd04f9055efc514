//! On-hit status effect dispatch.
//!
//! Effects are data (`StatusEffectDef`) plus a handler looked up by id in the
//! `EffectRegistry`. Concrete effects (burn, freeze, ...) live outside this
//! crate and plug in with `EffectRegistry::register`.

use std::fmt;
use std::sync::Arc;

use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::payload::Damageable;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectId(Arc<str>);

impl EffectId {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EffectId {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffectDef {
    pub id: EffectId,
    pub duration: f32,
}

/// Handler for one effect id. The handler owns whatever stacking/duration
/// state the effect needs; dispatch only calls `apply` once per hit.
pub trait StatusEffect: Send + Sync + 'static {
    fn apply(&self, def: &StatusEffectDef, target: &mut dyn Damageable, potency: f32);
}

impl<F> StatusEffect for F
where
    F: Fn(&StatusEffectDef, &mut dyn Damageable, f32) + Send + Sync + 'static,
{
    fn apply(&self, def: &StatusEffectDef, target: &mut dyn Damageable, potency: f32) {
        self(def, target, potency)
    }
}

#[derive(Resource, Default)]
pub struct EffectRegistry {
    handlers: HashMap<EffectId, Box<dyn StatusEffect>>,
}

impl EffectRegistry {
    /// Register (or replace) the handler for `id`.
    pub fn register(&mut self, id: impl Into<EffectId>, handler: impl StatusEffect) {
        let id = id.into();
        if self.handlers.insert(id.clone(), Box::new(handler)).is_some() {
            debug!("status effect `{id}` handler replaced");
        }
    }

    #[inline]
    pub fn contains(&self, id: &EffectId) -> bool {
        self.handlers.contains_key(id)
    }

    /// Returns `false` when no handler is registered for `def.id`.
    pub fn apply(&self, def: &StatusEffectDef, target: &mut dyn Damageable, potency: f32) -> bool {
        let Some(handler) = self.handlers.get(&def.id) else {
            return false;
        };
        handler.apply(def, target, potency);
        true
    }
}

impl fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}
