//! Broadcast event bus.
//!
//! Delivery is best-effort: slow subscribers may observe `Lagged` and should
//! re-query state, which is always authoritative.

use tokio::sync::broadcast;

use game_core::{EntityId, GameEvent, Point};

/// Events published by the runtime.
///
/// Core engine events are forwarded verbatim; the timer-driven variants only
/// exist at the runtime layer because the core has no clock.
#[derive(Clone, Debug, PartialEq)]
pub enum RuntimeEvent {
    /// An engine-produced outcome (log line, combat transition, ...).
    Game(GameEvent),

    /// A walk animation ran out of path or was cancelled.
    WalkFinished { entity: EntityId },

    /// A door was clicked; the presentation layer opens its context menu and
    /// drives the outcome through `door_action`.
    DoorSelected { object_id: String, pos: Point },

    /// A visual effect reached the end of its lifetime and was removed.
    EffectExpired { id: u64 },
}

/// Cloneable broadcast bus for [`RuntimeEvent`]s.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<RuntimeEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: RuntimeEvent) {
        if self.tx.send(event).is_err() {
            // No subscribers - normal during startup and teardown.
            tracing::trace!("event published with no subscribers");
        }
    }

    /// Forward a batch of engine events.
    pub fn publish_game_events(&self, events: Vec<GameEvent>) {
        for event in events {
            self.publish(RuntimeEvent::Game(event));
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RuntimeEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(100)
    }
}
