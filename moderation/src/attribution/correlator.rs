//! Damage Correlator: merges hurt-event and hook amounts per attacker
//!
//! The pre-damage hook runs before armor is applied and may report a raw
//! value; the `player_hurt` event carries the health the engine actually
//! removed. The hurt event is written into a per-attacker cache and the hook
//! reads it back through [`DamageCorrelator::resolve_friendly_fire_hit`].
//!
//! Pending records are never consumed or expired. A later hook call from the
//! same attacker can reuse an older amount.

use crate::host::SteamId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Most recent hurt-event reading for one attacker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingHit {
    pub amount: f32,
    pub attacker_name: String,
}

/// Authoritative amount and display name for one hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedHit {
    pub attacker: SteamId,
    pub amount: f32,
    pub attacker_name: String,
}

#[derive(Debug, Clone, Default)]
pub struct DamageCorrelator {
    pending: HashMap<SteamId, PendingHit>,
}

impl DamageCorrelator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record or overwrite the pending hit for `attacker`.
    pub fn observe_hurt_event(
        &mut self,
        attacker: SteamId,
        raw_damage: f32,
        attacker_name: impl Into<String>,
    ) {
        self.pending.insert(
            attacker,
            PendingHit {
                amount: raw_damage,
                attacker_name: attacker_name.into(),
            },
        );
    }

    /// Resolve the damage and name to attribute for a hook call.
    pub fn resolve_friendly_fire_hit(
        &self,
        attacker: SteamId,
        hook_damage: f32,
        hook_attacker_name: &str,
    ) -> ResolvedHit {
        let (amount, attacker_name) = match self.pending.get(&attacker) {
            Some(pending) => merge(pending, hook_damage, hook_attacker_name),
            None => (hook_damage, hook_attacker_name.to_string()),
        };
        ResolvedHit {
            attacker,
            amount,
            attacker_name,
        }
    }

    pub fn pending(&self, attacker: SteamId) -> Option<&PendingHit> {
        self.pending.get(&attacker)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

/// Positive pending amount wins over the hook; non-blank pending name wins
/// over the hook's name.
fn merge(pending: &PendingHit, hook_damage: f32, hook_name: &str) -> (f32, String) {
    let amount = if pending.amount > 0.0 {
        pending.amount
    } else {
        hook_damage
    };
    let name = if pending.attacker_name.trim().is_empty() {
        hook_name.to_string()
    } else {
        pending.attacker_name.clone()
    };
    (amount, name)
}
