//! Event types emitted by the moderation service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HitRejection;
use crate::escalation::{LadderStep, PunishmentLevel};
use crate::host::SteamId;

/// Everything the service reports about hits and punishments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModerationEvent {
    /// A hook call was not counted
    HitRejected {
        rejection: HitRejection,
        timestamp: DateTime<Utc>,
    },

    /// Team damage was added to an attacker's ledger
    DamageAttributed {
        attacker: SteamId,
        victim: SteamId,
        inflictor: String,
        amount: f32,
        total: f32,
        timestamp: DateTime<Utc>,
    },

    /// A ladder step fired
    PunishmentIssued {
        attacker: SteamId,
        attacker_name: String,
        step: LadderStep,
        total: f32,
        command: Option<String>,
        timestamp: DateTime<Utc>,
    },

    /// A threshold was crossed while punishments are disabled
    PunishmentSuppressed {
        attacker: SteamId,
        step: LadderStep,
        total: f32,
        timestamp: DateTime<Utc>,
    },

    /// Ledger and level returned to zero after the last step
    StandingReset {
        attacker: SteamId,
        previous_level: PunishmentLevel,
        timestamp: DateTime<Utc>,
    },

    /// Policy was replaced while the session kept running
    ConfigReloaded {
        enabled: bool,
        punishments_enabled: bool,
        timestamp: DateTime<Utc>,
    },

    /// All per-attacker state was dropped
    SessionReset { timestamp: DateTime<Utc> },
}

impl ModerationEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::HitRejected { .. } => "hit_rejected",
            Self::DamageAttributed { .. } => "damage_attributed",
            Self::PunishmentIssued { .. } => "punishment_issued",
            Self::PunishmentSuppressed { .. } => "punishment_suppressed",
            Self::StandingReset { .. } => "standing_reset",
            Self::ConfigReloaded { .. } => "config_reloaded",
            Self::SessionReset { .. } => "session_reset",
        }
    }

    /// Get the attacker this event concerns, if any
    pub fn attacker(&self) -> Option<SteamId> {
        match self {
            Self::DamageAttributed { attacker, .. }
            | Self::PunishmentIssued { attacker, .. }
            | Self::PunishmentSuppressed { attacker, .. }
            | Self::StandingReset { attacker, .. } => Some(*attacker),
            Self::HitRejected { .. } | Self::ConfigReloaded { .. } | Self::SessionReset { .. } => {
                None
            }
        }
    }

    /// Get the event timestamp
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::HitRejected { timestamp, .. }
            | Self::DamageAttributed { timestamp, .. }
            | Self::PunishmentIssued { timestamp, .. }
            | Self::PunishmentSuppressed { timestamp, .. }
            | Self::StandingReset { timestamp, .. }
            | Self::ConfigReloaded { timestamp, .. }
            | Self::SessionReset { timestamp } => *timestamp,
        }
    }
}
