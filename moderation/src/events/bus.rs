//! Event bus for moderation events
//!
//! Wraps a Tokio broadcast channel. Publishing is synchronous and never
//! blocks, so the bus works from the game thread without a runtime.
//! Subscribers that fall behind lose the oldest events.

use tokio::sync::broadcast;
use tracing::debug;

use super::types::ModerationEvent;

/// Channel capacity for broadcast
const CHANNEL_CAPACITY: usize = 256;

pub struct EventBus {
    sender: broadcast::Sender<ModerationEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event to all subscribers.
    ///
    /// Returns the number of subscribers that received it.
    pub fn publish(&self, event: ModerationEvent) -> usize {
        let event_type = event.event_type();
        match self.sender.send(event) {
            Ok(count) => {
                debug!(event_type, receivers = count, "Event published");
                count
            }
            // No receivers is fine
            Err(_) => 0,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ModerationEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Drain everything currently queued on a receiver without waiting.
///
/// Lagged events are skipped; a closed channel ends the drain.
pub fn drain(receiver: &mut broadcast::Receiver<ModerationEvent>) -> Vec<ModerationEvent> {
    let mut out = Vec::new();
    loop {
        match receiver.try_recv() {
            Ok(event) => out.push(event),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                debug!(skipped, "Subscriber lagged behind event bus");
            }
            Err(broadcast::error::TryRecvError::Empty)
            | Err(broadcast::error::TryRecvError::Closed) => break,
        }
    }
    out
}
