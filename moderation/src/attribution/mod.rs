//! Attribution: deciding who gets blamed for how much
//!
//! ```text
//! player_hurt ──▶ DamageCorrelator::observe_hurt_event ──┐
//!                                                          │ pending (per attacker)
//! TakeDamage hook ──▶ gate::check_hit ──▶ resolve_friendly_fire_hit ──▶ ResolvedHit
//! ```

pub mod correlator;
pub mod gate;

pub use correlator::{DamageCorrelator, PendingHit, ResolvedHit};
pub use gate::{check_hit, EligibleHit};
