//! Friendly Fire Service: owns all per-session moderation state
//!
//! One instance is built when the plugin loads and dropped when it unloads.
//! The host forwards two callbacks:
//!
//! - [`FriendlyFireService::on_player_hurt`] for every `player_hurt` event
//! - [`FriendlyFireService::on_take_damage`] for every pre-damage hook call
//!
//! Both run synchronously on the game thread and always let the engine
//! continue; moderation never blocks or alters the damage itself.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::attribution::{check_hit, DamageCorrelator};
use crate::config::{ConfigError, FriendlyFireConfig};
use crate::dispatch;
use crate::error::HitRejection;
use crate::escalation::{
    AttackerStanding, LadderStep, LevelTracker, PunishmentEscalator, PunishmentLevel,
    PunishmentRecord, TeamDamageLedger,
};
use crate::events::{EventBus, EventHistory, ModerationEvent};
use crate::host::{ActionDispatcher, Entity, PlayerHurtEvent, SteamId, TakeDamageInfo};

/// A hit that made it into the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributedHit {
    pub attacker: SteamId,
    pub attacker_name: String,
    pub amount: f32,
    /// Ledger total after this hit, before any reset
    pub total: f32,
    /// Step that fired, if any
    pub fired: Option<LadderStep>,
    /// Step that would have fired with punishments enabled
    pub suppressed: Option<LadderStep>,
    /// Level held after this hit
    pub level: PunishmentLevel,
}

/// Result of one pre-damage hook call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum HitOutcome {
    Rejected { rejection: HitRejection },
    Counted(AttributedHit),
}

impl HitOutcome {
    pub fn is_counted(&self) -> bool {
        matches!(self, Self::Counted(_))
    }

    pub fn fired(&self) -> Option<LadderStep> {
        match self {
            Self::Counted(hit) => hit.fired,
            Self::Rejected { .. } => None,
        }
    }

    pub fn rejection(&self) -> Option<&HitRejection> {
        match self {
            Self::Rejected { rejection } => Some(rejection),
            Self::Counted(_) => None,
        }
    }
}

pub struct FriendlyFireService<D: ActionDispatcher> {
    config: FriendlyFireConfig,
    escalator: PunishmentEscalator,
    correlator: DamageCorrelator,
    ledger: TeamDamageLedger,
    levels: LevelTracker,
    punishments: Vec<PunishmentRecord>,
    history: EventHistory,
    bus: EventBus,
    dispatcher: D,
}

impl<D: ActionDispatcher> FriendlyFireService<D> {
    /// Build a service for a validated policy.
    pub fn new(config: FriendlyFireConfig, dispatcher: D) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            escalator: PunishmentEscalator::from_config(&config),
            config,
            correlator: DamageCorrelator::new(),
            ledger: TeamDamageLedger::new(),
            levels: LevelTracker::new(),
            punishments: Vec::new(),
            history: EventHistory::default(),
            bus: EventBus::new(),
            dispatcher,
        })
    }

    /// Apply the friendly-fire server cvars. Call once after construction.
    pub fn load(&mut self) {
        let commands = self.config.startup_commands();
        for command in commands {
            self.dispatcher.execute_command(command);
        }
        info!(
            enabled = self.config.enabled,
            punishments = self.config.punishments_enabled,
            cvars = commands.len(),
            "Friendly fire moderation loaded"
        );
    }

    /// Drop all session state and hand back the dispatcher.
    pub fn unload(mut self) -> D {
        self.reset_session();
        info!("Friendly fire moderation unloaded");
        self.dispatcher
    }

    /// Replace the policy. Ledger, levels and pending hits are kept.
    ///
    /// An invalid policy is rejected and the running one stays in force.
    pub fn reload_config(&mut self, config: FriendlyFireConfig) -> Result<(), ConfigError> {
        if let Err(e) = config.validate() {
            warn!(error = %e, "Rejected config reload, keeping current policy");
            return Err(e);
        }
        self.escalator = PunishmentEscalator::from_config(&config);
        info!(
            enabled = config.enabled,
            punishments = config.punishments_enabled,
            "Friendly fire config reloaded"
        );
        self.emit(
            ModerationEvent::ConfigReloaded {
                enabled: config.enabled,
                punishments_enabled: config.punishments_enabled,
                timestamp: Utc::now(),
            },
            true,
        );
        self.config = config;
        Ok(())
    }

    /// Forget every attacker, e.g. on map change.
    pub fn reset_session(&mut self) {
        self.correlator.clear();
        self.ledger.clear();
        self.levels.clear();
        self.punishments.clear();
        self.emit(
            ModerationEvent::SessionReset {
                timestamp: Utc::now(),
            },
            true,
        );
    }

    /// Post-damage observer: remember the health the engine actually removed.
    ///
    /// Returns whether a pending hit was recorded.
    pub fn on_player_hurt(&mut self, event: Option<&PlayerHurtEvent>) -> bool {
        let Some(event) = event else {
            warn!("player_hurt event is missing, skipping");
            return false;
        };
        if !self.config.enabled {
            return false;
        }
        let (Some(attacker), Some(victim)) = (event.attacker.as_ref(), event.victim.as_ref())
        else {
            return false;
        };
        if attacker.steam_id == victim.steam_id {
            return false;
        }

        self.correlator
            .observe_hurt_event(attacker.steam_id, event.dmg_health, attacker.name.clone());
        true
    }

    /// Pre-damage hook: attribute team damage and advance the ladder.
    pub fn on_take_damage(
        &mut self,
        victim: Option<&Entity>,
        info: Option<&TakeDamageInfo>,
    ) -> HitOutcome {
        if !self.config.enabled {
            return HitOutcome::Rejected {
                rejection: HitRejection::FeatureDisabled,
            };
        }

        let hit = match check_hit(&self.config, victim, info) {
            Ok(hit) => hit,
            Err(rejection) => {
                debug!(reason = rejection.code(), "Hit not attributed: {}", rejection);
                self.emit(
                    ModerationEvent::HitRejected {
                        rejection: rejection.clone(),
                        timestamp: Utc::now(),
                    },
                    false,
                );
                return HitOutcome::Rejected { rejection };
            }
        };
        let attacker = hit.attacker.clone();
        let victim_id = hit.victim.steam_id;
        let inflictor = hit.inflictor.to_string();

        self.dispatcher
            .print_to_center_alert(&attacker, &self.config.center_alert);

        let resolved = self.correlator.resolve_friendly_fire_hit(
            attacker.steam_id,
            hit.hook_damage,
            &attacker.name,
        );
        let total = self.ledger.add_damage(attacker.steam_id, resolved.amount);
        let amount = resolved.amount.max(0.0);
        debug!(
            attacker = %attacker.steam_id,
            victim = %victim_id,
            inflictor = %inflictor,
            amount,
            total,
            "Team damage attributed"
        );
        self.emit(
            ModerationEvent::DamageAttributed {
                attacker: attacker.steam_id,
                victim: victim_id,
                inflictor,
                amount,
                total,
                timestamp: Utc::now(),
            },
            true,
        );

        let level = self.levels.get(attacker.steam_id);
        let decision = self.escalator.decide(total, level);
        let mut outcome = AttributedHit {
            attacker: attacker.steam_id,
            attacker_name: resolved.attacker_name.clone(),
            amount,
            total,
            fired: None,
            suppressed: None,
            level,
        };

        let Some(step) = decision.step else {
            return HitOutcome::Counted(outcome);
        };

        if !self.config.punishments_enabled {
            debug!(attacker = %attacker.steam_id, %step, total, "Punishment suppressed");
            self.emit(
                ModerationEvent::PunishmentSuppressed {
                    attacker: attacker.steam_id,
                    step,
                    total,
                    timestamp: Utc::now(),
                },
                true,
            );
            outcome.suppressed = Some(step);
            return HitOutcome::Counted(outcome);
        }

        let actions = self.config.actions();
        let command = dispatch::fire(
            &mut self.dispatcher,
            &actions[step.index()],
            &attacker,
            &resolved.attacker_name,
        );
        info!(
            attacker = %attacker.steam_id,
            name = %resolved.attacker_name,
            %step,
            total,
            "Friendly fire punishment issued"
        );

        self.punishments.push(PunishmentRecord {
            attacker: attacker.steam_id,
            attacker_name: resolved.attacker_name.clone(),
            step,
            total_damage: total,
            command: command.clone(),
            issued_at: Utc::now(),
        });
        self.emit(
            ModerationEvent::PunishmentIssued {
                attacker: attacker.steam_id,
                attacker_name: resolved.attacker_name,
                step,
                total,
                command,
                timestamp: Utc::now(),
            },
            true,
        );

        self.levels.set(attacker.steam_id, decision.next_level);
        if decision.reset_ledger {
            self.ledger.reset(attacker.steam_id);
            self.emit(
                ModerationEvent::StandingReset {
                    attacker: attacker.steam_id,
                    previous_level: level,
                    timestamp: Utc::now(),
                },
                true,
            );
        }

        outcome.fired = Some(step);
        outcome.level = decision.next_level;
        HitOutcome::Counted(outcome)
    }

    pub fn standing(&self, attacker: SteamId) -> AttackerStanding {
        AttackerStanding {
            steam_id: attacker,
            total_damage: self.ledger.total(attacker),
            level: self.levels.get(attacker),
        }
    }

    /// Standings for every attacker with a ledger entry, by SteamId
    pub fn standings(&self) -> Vec<AttackerStanding> {
        let mut ids: Vec<SteamId> = self.ledger.attackers().collect();
        ids.sort();
        ids.into_iter().map(|id| self.standing(id)).collect()
    }

    pub fn punishments(&self) -> &[PunishmentRecord] {
        &self.punishments
    }

    pub fn history(&self) -> &EventHistory {
        &self.history
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ModerationEvent> {
        self.bus.subscribe()
    }

    pub fn config(&self) -> &FriendlyFireConfig {
        &self.config
    }

    pub fn correlator(&self) -> &DamageCorrelator {
        &self.correlator
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut D {
        &mut self.dispatcher
    }

    fn emit(&mut self, event: ModerationEvent, retain: bool) {
        if retain {
            self.history.push(event.clone());
        }
        self.bus.publish(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{PlayerController, RecordingDispatcher};

    fn service() -> FriendlyFireService<RecordingDispatcher> {
        FriendlyFireService::new(FriendlyFireConfig::default(), RecordingDispatcher::new())
            .unwrap()
    }

    fn player(id: u64, team: u8) -> PlayerController {
        PlayerController::new(id, team, format!("player{id}"))
    }

    fn grenade(attacker: &PlayerController, damage: f32) -> TakeDamageInfo {
        TakeDamageInfo {
            attacker: Some(Entity::player(attacker.clone())),
            inflictor: Some(Entity::named("hegrenade_projectile")),
            damage,
        }
    }

    #[test]
    fn test_load_applies_cvars() {
        let mut s = service();
        s.load();
        assert_eq!(s.dispatcher().commands().len(), 5);
        assert_eq!(s.dispatcher().commands()[0], "mp_friendlyfire 1");
    }

    #[test]
    fn test_load_disabled_applies_nothing() {
        let config = FriendlyFireConfig {
            enabled: false,
            ..Default::default()
        };
        let mut s = FriendlyFireService::new(config, RecordingDispatcher::new()).unwrap();
        s.load();
        assert!(s.dispatcher().actions.is_empty());
    }

    #[test]
    fn test_counted_hit_alerts_attacker() {
        let mut s = service();
        let a = player(1, 2);
        let victim = Entity::player(player(2, 2));
        let outcome = s.on_take_damage(Some(&victim), Some(&grenade(&a, 30.0)));

        assert!(outcome.is_counted());
        assert_eq!(s.dispatcher().alert_count(), 1);
        assert_eq!(s.standing(a.steam_id).total_damage, 30.0);
    }

    #[test]
    fn test_missing_hook_params_are_rejected() {
        let mut s = service();
        let outcome = s.on_take_damage(None, None);
        assert!(matches!(
            outcome.rejection(),
            Some(HitRejection::MissingEntity { .. })
        ));
        assert!(s.dispatcher().actions.is_empty());
    }

    #[test]
    fn test_missing_hurt_event_is_skipped() {
        let mut s = service();
        assert!(!s.on_player_hurt(None));
        assert!(s.correlator().is_empty());
    }

    #[test]
    fn test_self_hurt_event_not_recorded() {
        let mut s = service();
        let a = player(1, 2);
        let event = PlayerHurtEvent {
            attacker: Some(a.clone()),
            victim: Some(a),
            dmg_health: 50.0,
        };
        assert!(!s.on_player_hurt(Some(&event)));
        assert!(s.correlator().is_empty());
    }

    #[test]
    fn test_rejections_not_retained_in_history() {
        let mut s = service();
        let a = player(1, 2);
        let enemy = Entity::player(player(2, 3));
        s.on_take_damage(Some(&enemy), Some(&grenade(&a, 30.0)));
        assert!(s.history().is_empty());
    }

    #[test]
    fn test_new_rejects_invalid_thresholds() {
        let config = FriendlyFireConfig {
            warn1: 0,
            warn2: 0,
            warn3: 0,
            ..Default::default()
        };
        assert!(matches!(
            FriendlyFireService::new(config, RecordingDispatcher::new()),
            Err(ConfigError::NonPositiveThreshold { index: 1, .. })
        ));
    }

    #[test]
    fn test_invalid_reload_keeps_running_policy() {
        let mut s = service();
        s.load();
        s.dispatcher_mut().clear();
        let a = player(1, 2);
        let victim = Entity::player(player(2, 2));

        let zeroed = FriendlyFireConfig {
            warn1: 0,
            warn2: 0,
            warn3: 0,
            ..Default::default()
        };
        assert!(s.reload_config(zeroed).is_err());
        assert_eq!(s.config().warn3, 300);
        assert!(s.history().of_type("config_reloaded").is_empty());

        let outcome = s.on_take_damage(Some(&victim), Some(&grenade(&a, 0.0)));
        assert_eq!(outcome.fired(), None);
        assert!(s.dispatcher().commands().is_empty());
    }

    #[test]
    fn test_unload_returns_dispatcher() {
        let mut s = service();
        s.load();
        let d = s.unload();
        assert_eq!(d.commands().len(), 5);
    }
}
