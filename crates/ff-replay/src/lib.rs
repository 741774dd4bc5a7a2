//! Scenario replay host
//!
//! Stands in for the game server: reads a JSON Lines scenario of engine
//! callbacks, feeds them to [`FriendlyFireService`], and collects what would
//! have been printed or executed on the server.
//!
//! # Scenario format
//!
//! One JSON object per line. Blank lines and lines starting with `#` are
//! skipped.
//!
//! ```text
//! {"type":"player_hurt","event":{"attacker":{"steam_id":1,"team":2,"name":"a"},"victim":{"steam_id":2,"team":2,"name":"b"},"dmg_health":40}}
//! {"type":"take_damage","victim":{"designer_name":"player","controller":{"steam_id":2,"team":2,"name":"b"}},"info":{"attacker":{"designer_name":"player","controller":{"steam_id":1,"team":2,"name":"a"}},"inflictor":{"designer_name":"inferno"},"damage":55}}
//! {"type":"reset_session"}
//! ```

use anyhow::{Context, Result};
use ff_moderation::{
    ActionDispatcher, AttackerStanding, DispatchedAction, Entity, FriendlyFireConfig,
    FriendlyFireService, HitOutcome, PlayerController, PlayerHurtEvent, PunishmentRecord,
    TakeDamageInfo,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// One engine callback in a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    PlayerHurt {
        #[serde(default)]
        event: Option<PlayerHurtEvent>,
    },
    TakeDamage {
        #[serde(default)]
        victim: Option<Entity>,
        #[serde(default)]
        info: Option<TakeDamageInfo>,
    },
    ResetSession,
}

/// Parse a JSON Lines scenario. Errors carry the 1-based line number.
pub fn parse_scenario(raw: &str) -> Result<Vec<ScenarioStep>> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| {
            serde_json::from_str(line).with_context(|| format!("Invalid scenario line {}", i + 1))
        })
        .collect()
}

pub fn load_scenario(path: impl AsRef<Path>) -> Result<Vec<ScenarioStep>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario {}", path.display()))?;
    parse_scenario(&raw)
}

/// Dispatcher that logs what the server would do and keeps a transcript
#[derive(Debug, Default)]
pub struct ConsoleDispatcher {
    pub transcript: Vec<DispatchedAction>,
}

impl ActionDispatcher for ConsoleDispatcher {
    fn execute_command(&mut self, command: &str) {
        info!(target: "server_console", "{}", command);
        self.transcript.push(DispatchedAction::Command {
            line: command.to_string(),
        });
    }

    fn print_to_chat(&mut self, player: &PlayerController, message: &str) {
        info!(target: "server_chat", player = %player.name, "{}", message);
        self.transcript.push(DispatchedAction::Chat {
            steam_id: player.steam_id,
            message: message.to_string(),
        });
    }

    fn print_to_center_alert(&mut self, player: &PlayerController, message: &str) {
        info!(target: "server_alert", player = %player.name, "{}", message);
        self.transcript.push(DispatchedAction::CenterAlert {
            steam_id: player.steam_id,
            message: message.to_string(),
        });
    }
}

/// Summary of a replay run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayReport {
    pub steps: usize,
    pub hits_counted: usize,
    pub hits_rejected: usize,
    pub punishments: Vec<PunishmentRecord>,
    pub standings: Vec<AttackerStanding>,
    pub transcript: Vec<DispatchedAction>,
}

impl ReplayReport {
    pub fn commands(&self) -> Vec<&str> {
        self.transcript
            .iter()
            .filter_map(|a| match a {
                DispatchedAction::Command { line } => Some(line.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Replay `steps` through a fresh service built from `config`.
pub fn run_scenario(
    config: FriendlyFireConfig,
    steps: &[ScenarioStep],
    apply_cvars: bool,
) -> Result<ReplayReport> {
    let mut service = FriendlyFireService::new(config, ConsoleDispatcher::default())
        .context("Invalid moderation config")?;
    if apply_cvars {
        service.load();
    }

    let mut hits_counted = 0;
    let mut hits_rejected = 0;
    // Punishment records are cleared by a session reset; keep them all here
    let mut punishments = Vec::new();

    for step in steps {
        match step {
            ScenarioStep::PlayerHurt { event } => {
                service.on_player_hurt(event.as_ref());
            }
            ScenarioStep::TakeDamage { victim, info } => {
                match service.on_take_damage(victim.as_ref(), info.as_ref()) {
                    HitOutcome::Counted(_) => hits_counted += 1,
                    HitOutcome::Rejected { .. } => hits_rejected += 1,
                }
            }
            ScenarioStep::ResetSession => {
                punishments.extend_from_slice(service.punishments());
                service.reset_session();
            }
        }
    }
    punishments.extend_from_slice(service.punishments());

    let standings = service.standings();
    let transcript = service.unload().transcript;

    Ok(ReplayReport {
        steps: steps.len(),
        hits_counted,
        hits_rejected,
        punishments,
        standings,
        transcript,
    })
}

/// Load the config, applying `FF_*` environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<FriendlyFireConfig> {
    let mut config = match path {
        Some(path) => FriendlyFireConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => {
            warn!("No config given, using built-in defaults");
            FriendlyFireConfig::default()
        }
    };
    config.apply_env_overrides();
    config.validate().context("Config invalid after environment overrides")?;
    Ok(config)
}
