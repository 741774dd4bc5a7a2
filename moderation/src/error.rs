//! Reasons a damage call is not counted
//!
//! None of these reach the player or the engine. A rejected hit simply
//! means no damage was attributed and no action fired.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which participant of a hit could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingParty {
    Victim,
    VictimController,
    DamageInfo,
    Attacker,
    AttackerController,
}

impl std::fmt::Display for MissingParty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Victim => write!(f, "victim"),
            Self::VictimController => write!(f, "victim controller"),
            Self::DamageInfo => write!(f, "damage info"),
            Self::Attacker => write!(f, "attacker"),
            Self::AttackerController => write!(f, "attacker controller"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum HitRejection {
    #[error("friendly fire moderation is disabled")]
    FeatureDisabled,

    #[error("missing {party}")]
    MissingEntity { party: MissingParty },

    #[error("victim entity is '{designer_name}', not a player")]
    VictimNotPlayer { designer_name: String },

    #[error("attacker team {attacker_team} differs from victim team {victim_team}")]
    CrossTeam { attacker_team: u8, victim_team: u8 },

    #[error("attacker damaged themselves")]
    SelfDamage,

    #[error("inflictor '{designer_name}' is not in the allow-list")]
    InflictorNotAllowed { designer_name: String },
}

impl HitRejection {
    pub fn missing(party: MissingParty) -> Self {
        Self::MissingEntity { party }
    }

    /// Short machine-readable tag for logs and events
    pub fn code(&self) -> &'static str {
        match self {
            Self::FeatureDisabled => "feature_disabled",
            Self::MissingEntity { .. } => "missing_entity",
            Self::VictimNotPlayer { .. } => "victim_not_player",
            Self::CrossTeam { .. } => "cross_team",
            Self::SelfDamage => "self_damage",
            Self::InflictorNotAllowed { .. } => "inflictor_not_allowed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_party() {
        let err = HitRejection::missing(MissingParty::AttackerController);
        assert_eq!(err.to_string(), "missing attacker controller");
        assert_eq!(err.code(), "missing_entity");
    }

    #[test]
    fn test_serializes_with_reason_tag() {
        let json = serde_json::to_value(HitRejection::CrossTeam {
            attacker_team: 2,
            victim_team: 3,
        })
        .unwrap();
        assert_eq!(json["reason"], "cross_team");
        assert_eq!(json["victim_team"], 3);
    }
}
