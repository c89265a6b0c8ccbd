//! Observable outcomes emitted by engine actions.
//!
//! Every engine entry point returns the events it produced alongside mutating
//! the state. The runtime forwards them on its broadcast bus; the
//! presentation layer renders from them (HUD log lines, impact flashes,
//! death screens) without inspecting state diffs.

use crate::state::{EffectKind, EntityId, Point, Turn};

/// A single observable outcome of an engine action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    /// Free-text HUD log line. Also appended to `GameState::logs`.
    Log(String),

    /// Visual effect trigger at a tile.
    EffectTriggered {
        id: u64,
        kind: EffectKind,
        pos: Point,
    },

    /// Mode switched to combat.
    CombatStarted,

    /// Last living enemy fell; mode switched back to wander.
    CombatEnded,

    /// Turn hand-off within combat.
    TurnChanged(Turn),

    /// A non-player entity dropped to zero HP and left the roster.
    EntityDied(EntityId),

    /// The player dropped to zero HP. Terminal; the entity stays in the
    /// roster.
    PlayerDied,

    /// An entity stepped onto a new tile.
    Moved { entity: EntityId, to: Point },

    /// The player gained a level and has allocation points to spend.
    LevelUp { level: u32, skill_points: u32 },
}

/// Accumulates events produced while an engine action runs.
#[derive(Debug, Default)]
pub struct EventSink {
    events: Vec<GameEvent>,
}

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn into_events(self) -> Vec<GameEvent> {
        self.events
    }
}
