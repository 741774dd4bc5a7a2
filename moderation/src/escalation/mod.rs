//! Escalation: per-attacker team damage and the punishment ladder
//!
//! # Punishment Ladder
//!
//! ```text
//! Clean (0)
//!     │  total >= warn1  → step 1 (warn + slay)
//!     ▼
//! First (1)
//!     │  total >= warn2  → step 2 (kick)
//!     ▼
//! Second (2)
//!     │  total >= warn3  → step 3 (ban), ledger and level reset
//!     ▼
//! Clean (0)
//! ```
//!
//! Thresholds are checked highest first and at most one step fires per hit.

pub mod engine;
pub mod ledger;
pub mod state;

pub use engine::{EscalationDecision, PunishmentEscalator};
pub use ledger::TeamDamageLedger;
pub use state::{AttackerStanding, LadderStep, LevelTracker, PunishmentLevel, PunishmentRecord};
