//! Gatekeeping for the pre-damage hook
//!
//! Checks run in this order and the first failure wins: victim present and a
//! player pawn, attacker present, both controllers resolvable, same team,
//! different identity, inflictor allow-listed. The feature-enabled check
//! lives in the service so that the hurt observer shares it.

use crate::config::FriendlyFireConfig;
use crate::error::{HitRejection, MissingParty};
use crate::host::{Entity, PlayerController, TakeDamageInfo};

/// A hook call that passed every check
#[derive(Debug, Clone, PartialEq)]
pub struct EligibleHit<'a> {
    pub attacker: &'a PlayerController,
    pub victim: &'a PlayerController,
    pub inflictor: &'a str,
    pub hook_damage: f32,
}

pub fn check_hit<'a>(
    config: &FriendlyFireConfig,
    victim: Option<&'a Entity>,
    info: Option<&'a TakeDamageInfo>,
) -> Result<EligibleHit<'a>, HitRejection> {
    let victim_entity = victim.ok_or(HitRejection::missing(MissingParty::Victim))?;
    let info = info.ok_or(HitRejection::missing(MissingParty::DamageInfo))?;

    if !victim_entity.is_player() {
        return Err(HitRejection::VictimNotPlayer {
            designer_name: victim_entity.designer_name.clone(),
        });
    }

    let attacker_entity = info
        .attacker
        .as_ref()
        .ok_or(HitRejection::missing(MissingParty::Attacker))?;

    let victim = victim_entity
        .controller
        .as_ref()
        .ok_or(HitRejection::missing(MissingParty::VictimController))?;
    let attacker = attacker_entity
        .controller
        .as_ref()
        .ok_or(HitRejection::missing(MissingParty::AttackerController))?;

    if attacker.team != victim.team {
        return Err(HitRejection::CrossTeam {
            attacker_team: attacker.team,
            victim_team: victim.team,
        });
    }
    if attacker.steam_id == victim.steam_id {
        return Err(HitRejection::SelfDamage);
    }

    let inflictor = info
        .inflictor
        .as_ref()
        .map(|e| e.designer_name.as_str())
        .unwrap_or("");
    if !config.is_allowed_inflictor(inflictor) {
        return Err(HitRejection::InflictorNotAllowed {
            designer_name: inflictor.to_string(),
        });
    }

    Ok(EligibleHit {
        attacker,
        victim,
        inflictor,
        hook_damage: info.damage,
    })
}
