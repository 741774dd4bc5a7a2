//! Team Damage Ledger: running total of attributed team damage

use crate::host::SteamId;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct TeamDamageLedger {
    totals: HashMap<SteamId, f32>,
}

impl TeamDamageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `max(amount, 0)` to the attacker's total and return the new total.
    ///
    /// NaN counts as zero.
    pub fn add_damage(&mut self, attacker: SteamId, amount: f32) -> f32 {
        let amount = if amount > 0.0 { amount } else { 0.0 };
        let total = self.totals.entry(attacker).or_insert(0.0);
        *total += amount;
        *total
    }

    pub fn reset(&mut self, attacker: SteamId) {
        self.totals.insert(attacker, 0.0);
    }

    pub fn total(&self, attacker: SteamId) -> f32 {
        self.totals.get(&attacker).copied().unwrap_or(0.0)
    }

    pub fn attackers(&self) -> impl Iterator<Item = SteamId> + '_ {
        self.totals.keys().copied()
    }

    pub fn clear(&mut self) {
        self.totals.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: SteamId = SteamId(1);
    const B: SteamId = SteamId(2);

    #[test]
    fn test_accumulates_per_attacker() {
        let mut ledger = TeamDamageLedger::new();
        assert_eq!(ledger.add_damage(A, 50.0), 50.0);
        assert_eq!(ledger.add_damage(A, 60.0), 110.0);
        assert_eq!(ledger.add_damage(B, 5.0), 5.0);
        assert_eq!(ledger.total(A), 110.0);
    }

    #[test]
    fn test_negative_and_nan_add_nothing() {
        let mut ledger = TeamDamageLedger::new();
        ledger.add_damage(A, 20.0);
        assert_eq!(ledger.add_damage(A, -15.0), 20.0);
        assert_eq!(ledger.add_damage(A, f32::NAN), 20.0);
        assert_eq!(ledger.add_damage(A, 0.0), 20.0);
    }

    #[test]
    fn test_zero_hit_creates_entry() {
        let mut ledger = TeamDamageLedger::new();
        assert_eq!(ledger.add_damage(A, 0.0), 0.0);
        assert_eq!(ledger.attackers().count(), 1);
    }

    #[test]
    fn test_reset_zeroes_single_attacker() {
        let mut ledger = TeamDamageLedger::new();
        ledger.add_damage(A, 300.0);
        ledger.add_damage(B, 40.0);
        ledger.reset(A);
        assert_eq!(ledger.total(A), 0.0);
        assert_eq!(ledger.total(B), 40.0);
        assert_eq!(ledger.add_damage(A, 10.0), 10.0);
    }
}
