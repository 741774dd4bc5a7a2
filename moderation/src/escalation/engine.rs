//! Punishment Escalator: deterministic ladder decisions
//!
//! Given the attacker's updated ledger total and current level, picks at most
//! one step to fire. Thresholds are checked from the top down, so a single
//! large hit that jumps past several thresholds fires only the highest step
//! not yet issued. No side effects happen here; the service applies the
//! decision.

use crate::config::FriendlyFireConfig;
use crate::escalation::state::{LadderStep, PunishmentLevel};
use serde::{Deserialize, Serialize};

/// Outcome of evaluating one attributed hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationDecision {
    /// Step to fire, if one was newly crossed
    pub step: Option<LadderStep>,
    /// Level the attacker should hold afterwards
    pub next_level: PunishmentLevel,
    /// Whether the ledger total must return to zero
    pub reset_ledger: bool,
}

impl EscalationDecision {
    fn hold(level: PunishmentLevel) -> Self {
        Self {
            step: None,
            next_level: level,
            reset_ledger: false,
        }
    }

    fn fire(step: LadderStep) -> Self {
        Self {
            step: Some(step),
            next_level: PunishmentLevel::after(step),
            reset_ledger: step == LadderStep::Third,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PunishmentEscalator {
    /// Ascending thresholds for steps 1, 2, 3
    thresholds: [f32; 3],
}

impl PunishmentEscalator {
    pub fn new(warn1: f32, warn2: f32, warn3: f32) -> Self {
        Self {
            thresholds: [warn1, warn2, warn3],
        }
    }

    pub fn from_config(config: &FriendlyFireConfig) -> Self {
        Self {
            thresholds: config.actions().map(|action| action.threshold as f32),
        }
    }

    pub fn threshold(&self, step: LadderStep) -> f32 {
        self.thresholds[step.index()]
    }

    pub fn decide(&self, total: f32, level: PunishmentLevel) -> EscalationDecision {
        LadderStep::ALL
            .iter()
            .rev()
            .find(|step| total >= self.threshold(**step) && level.as_u8() < step.number())
            .map(|step| EscalationDecision::fire(*step))
            .unwrap_or_else(|| EscalationDecision::hold(level))
    }
}

impl Default for PunishmentEscalator {
    fn default() -> Self {
        Self::from_config(&FriendlyFireConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escalator() -> PunishmentEscalator {
        PunishmentEscalator::new(100.0, 200.0, 300.0)
    }

    #[test]
    fn test_below_first_threshold_holds() {
        let d = escalator().decide(99.9, PunishmentLevel::Clean);
        assert_eq!(d.step, None);
        assert_eq!(d.next_level, PunishmentLevel::Clean);
        assert!(!d.reset_ledger);
    }

    #[test]
    fn test_first_threshold_fires_first_step() {
        let d = escalator().decide(100.0, PunishmentLevel::Clean);
        assert_eq!(d.step, Some(LadderStep::First));
        assert_eq!(d.next_level, PunishmentLevel::First);
    }

    #[test]
    fn test_already_issued_level_not_refired() {
        let d = escalator().decide(150.0, PunishmentLevel::First);
        assert_eq!(d.step, None);
        assert_eq!(d.next_level, PunishmentLevel::First);
    }

    #[test]
    fn test_jump_fires_highest_step_only() {
        let d = escalator().decide(250.0, PunishmentLevel::Clean);
        assert_eq!(d.step, Some(LadderStep::Second));
        assert_eq!(d.next_level, PunishmentLevel::Second);

        let d = escalator().decide(350.0, PunishmentLevel::Clean);
        assert_eq!(d.step, Some(LadderStep::Third));
        assert_eq!(d.next_level, PunishmentLevel::Clean);
        assert!(d.reset_ledger);
    }

    #[test]
    fn test_third_step_fires_from_any_stored_level() {
        for level in [
            PunishmentLevel::Clean,
            PunishmentLevel::First,
            PunishmentLevel::Second,
        ] {
            let d = escalator().decide(300.0, level);
            assert_eq!(d.step, Some(LadderStep::Third));
        }
    }

    #[test]
    fn test_equal_thresholds_prefer_higher_step() {
        let e = PunishmentEscalator::new(100.0, 100.0, 300.0);
        assert_eq!(
            e.decide(100.0, PunishmentLevel::Clean).step,
            Some(LadderStep::Second)
        );
    }

    #[test]
    fn test_from_config_uses_hp_thresholds() {
        let config = FriendlyFireConfig {
            warn1: 10,
            warn2: 20,
            warn3: 30,
            ..Default::default()
        };
        let e = PunishmentEscalator::from_config(&config);
        assert_eq!(e.threshold(LadderStep::Second), 20.0);
        assert_eq!(PunishmentEscalator::default().threshold(LadderStep::Third), 300.0);
    }
}
