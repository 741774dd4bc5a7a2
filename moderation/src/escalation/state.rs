//! Punishment State: ladder steps, per-attacker levels, issued records

use crate::host::SteamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A rung of the punishment ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LadderStep {
    /// Default: warn and slay
    First,
    /// Default: kick
    Second,
    /// Default: 30 minute ban; resets the attacker's standing
    Third,
}

impl LadderStep {
    pub const ALL: [LadderStep; 3] = [Self::First, Self::Second, Self::Third];

    /// 1-based position on the ladder
    pub fn number(&self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
        }
    }

    /// Zero-based index into `FriendlyFireConfig::actions()`
    pub fn index(&self) -> usize {
        self.number() as usize - 1
    }
}

impl std::fmt::Display for LadderStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/3", self.number())
    }
}

/// Highest ladder step already issued to an attacker.
///
/// Level 3 is never stored: reaching it resets the attacker to `Clean`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunishmentLevel {
    #[default]
    Clean,
    First,
    Second,
}

impl PunishmentLevel {
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Clean => 0,
            Self::First => 1,
            Self::Second => 2,
        }
    }

    /// Level reached after `step` fires
    pub fn after(step: LadderStep) -> Self {
        match step {
            LadderStep::First => Self::First,
            LadderStep::Second => Self::Second,
            LadderStep::Third => Self::Clean,
        }
    }
}

impl std::fmt::Display for PunishmentLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

#[derive(Debug, Clone, Default)]
pub struct LevelTracker {
    levels: HashMap<SteamId, PunishmentLevel>,
}

impl LevelTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, attacker: SteamId) -> PunishmentLevel {
        self.levels.get(&attacker).copied().unwrap_or_default()
    }

    pub fn set(&mut self, attacker: SteamId, level: PunishmentLevel) {
        self.levels.insert(attacker, level);
    }

    pub fn clear(&mut self) {
        self.levels.clear();
    }
}

/// What the attacker has accumulated so far
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackerStanding {
    pub steam_id: SteamId,
    pub total_damage: f32,
    pub level: PunishmentLevel,
}

/// A punishment that was actually issued
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunishmentRecord {
    pub attacker: SteamId,
    pub attacker_name: String,
    pub step: LadderStep,
    /// Ledger total at the moment the step fired, before any reset
    pub total_damage: f32,
    /// Console line dispatched, if the template produced one
    pub command: Option<String>,
    pub issued_at: DateTime<Utc>,
}
