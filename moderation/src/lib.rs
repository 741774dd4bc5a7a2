//! Friendly Fire Moderation
//!
//! Real-time team-damage moderation for a multiplayer shooter server:
//! - Correlates the pre-damage hook with the `player_hurt` event per attacker
//! - Accumulates attributed team damage for the session
//! - Walks a three-step punishment ladder (warn, kick, ban) as thresholds are
//!   crossed, resetting after the last step
//!
//! # Usage
//!
//! ```ignore
//! use ff_moderation::{FriendlyFireConfig, FriendlyFireService};
//!
//! let config = FriendlyFireConfig::load("advanced_friendlyfire.json")?;
//! let mut service = FriendlyFireService::new(config, server_console)?;
//! service.load();
//!
//! // From the engine callbacks:
//! service.on_player_hurt(Some(&hurt_event));
//! service.on_take_damage(Some(&victim), Some(&damage_info));
//! ```

#![allow(clippy::uninlined_format_args)]

pub mod attribution;
pub mod config;
pub mod console_safety;
pub mod dispatch;
pub mod error;
pub mod escalation;
pub mod events;
pub mod host;
pub mod service;

pub use attribution::{DamageCorrelator, PendingHit, ResolvedHit};
pub use config::{ConfigError, FriendlyFireConfig, PunishmentAction};
pub use error::{HitRejection, MissingParty};
pub use escalation::{
    AttackerStanding, EscalationDecision, LadderStep, PunishmentEscalator, PunishmentLevel,
    PunishmentRecord, TeamDamageLedger,
};
pub use events::{EventBus, EventHistory, ModerationEvent};
pub use host::{
    ActionDispatcher, DispatchedAction, Entity, PlayerController, PlayerHurtEvent,
    RecordingDispatcher, SteamId, TakeDamageInfo,
};
pub use service::{AttributedHit, FriendlyFireService, HitOutcome};
