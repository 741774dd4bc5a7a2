//! Moderation events
//!
//! The service publishes every decision it takes. Events go two ways:
//!
//! 1. **Event Bus** (`bus.rs`): Tokio broadcast channel for live subscribers
//!    (admin notifications, audit sinks).
//!
//! 2. **Event History** (`history.rs`): bounded in-memory record for the
//!    current session.
//!
//! # Usage
//!
//! ```ignore
//! use ff_moderation::events::drain;
//!
//! let mut rx = service.subscribe();
//! service.on_take_damage(Some(&victim), Some(&info));
//! for event in drain(&mut rx) {
//!     println!("{}", event.event_type());
//! }
//! ```

pub mod bus;
pub mod history;
pub mod types;

pub use bus::{drain, EventBus};
pub use history::{EventHistory, DEFAULT_HISTORY_CAPACITY};
pub use types::ModerationEvent;
