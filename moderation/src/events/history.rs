//! Bounded in-memory event history
//!
//! Lives only as long as the service; nothing is written to disk.

use std::collections::VecDeque;

use super::types::ModerationEvent;
use crate::host::SteamId;

/// Default number of events retained
pub const DEFAULT_HISTORY_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub struct EventHistory {
    events: VecDeque<ModerationEvent>,
    capacity: usize,
}

impl EventHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity: capacity.max(1),
        }
    }

    /// Append, evicting the oldest event when full
    pub fn push(&mut self, event: ModerationEvent) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModerationEvent> {
        self.events.iter()
    }

    /// Events concerning one attacker, oldest first
    pub fn for_attacker(&self, attacker: SteamId) -> Vec<&ModerationEvent> {
        self.events
            .iter()
            .filter(|e| e.attacker() == Some(attacker))
            .collect()
    }

    /// Events of a given type, oldest first
    pub fn of_type(&self, event_type: &str) -> Vec<&ModerationEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for EventHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escalation::PunishmentLevel;
    use chrono::Utc;

    fn reset(id: u64) -> ModerationEvent {
        ModerationEvent::StandingReset {
            attacker: SteamId(id),
            previous_level: PunishmentLevel::Second,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_evicts_oldest_when_full() {
        let mut history = EventHistory::new(2);
        history.push(reset(1));
        history.push(reset(2));
        history.push(reset(3));
        let ids: Vec<_> = history.iter().filter_map(|e| e.attacker()).collect();
        assert_eq!(ids, vec![SteamId(2), SteamId(3)]);
    }

    #[test]
    fn test_filters() {
        let mut history = EventHistory::default();
        history.push(reset(1));
        history.push(ModerationEvent::SessionReset {
            timestamp: Utc::now(),
        });
        history.push(reset(1));
        assert_eq!(history.for_attacker(SteamId(1)).len(), 2);
        assert_eq!(history.of_type("session_reset").len(), 1);
        assert_eq!(history.len(), 3);
    }
}
