//! Action execution pipeline.
//!
//! [`GameEngine`] is the authoritative reducer for [`GameState`]: every
//! mutation — movement, combat, turn hand-offs, inventory, doors — flows
//! through one of its methods as an atomic, serialized transformation.
//!
//! Two failure channels, deliberately distinct:
//! - Game-rule rejections (out of range, not enough AP, too heavy) are not
//!   errors. The state is left untouched, a HUD log line is emitted, and the
//!   method returns `Ok`.
//! - Programmer errors (an id that does not resolve) indicate a broken
//!   invariant upstream and surface as [`EngineError`].

mod combat;
mod interact;
mod inventory;
mod movement;
mod turns;

pub use movement::MovePlan;

use crate::config::GameConfig;
use crate::events::{EventSink, GameEvent};
use crate::rng::RngOracle;
use crate::state::{EffectKind, EntityId, GameState, ItemId, Point};

/// Errors surfaced when an engine action references state that does not
/// exist. These are contract violations, not game outcomes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("entity '{0}' not found")]
    UnknownEntity(EntityId),

    #[error("map object '{0}' not found")]
    UnknownObject(String),

    #[error("world item '{0}' not found")]
    UnknownWorldItem(String),

    #[error("entity '{entity}' does not carry item '{item}'")]
    ItemNotCarried { entity: EntityId, item: ItemId },
}

/// Authoritative reducer over a borrowed [`GameState`].
///
/// The engine is cheap to construct; the runtime builds one per command
/// against the single state value it owns.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
    config: &'a GameConfig,
    rng: &'a dyn RngOracle,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState, config: &'a GameConfig, rng: &'a dyn RngOracle) -> Self {
        Self { state, config, rng }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    // ========================================================================
    // Shared helpers
    // ========================================================================

    /// Emits a HUD log line to both the state buffer and the event sink.
    fn log(&mut self, sink: &mut EventSink, message: impl Into<String>) {
        let message = message.into();
        self.state.push_log(message.clone());
        sink.push(GameEvent::Log(message));
    }

    /// Records a visual effect and mirrors it on the sink.
    fn effect(&mut self, sink: &mut EventSink, kind: EffectKind, pos: Point) {
        let id = self.state.push_effect(kind, pos);
        sink.push(GameEvent::EffectTriggered { id, kind, pos });
    }

    fn require_entity(&self, id: &EntityId) -> Result<(), EngineError> {
        if self.state.entity(id).is_some() {
            Ok(())
        } else {
            Err(EngineError::UnknownEntity(id.clone()))
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Shared fixtures for engine tests.

    use crate::state::{
        Entity, EntityId, EntityKind, Equipment, GameState, Inventory, Point, Progression,
    };

    pub fn player_at(pos: Point) -> Entity {
        Entity {
            id: EntityId::player(),
            kind: EntityKind::Player,
            name: "Vault Dweller".into(),
            pos,
            facing: None,
            is_moving: false,
            hp: 100,
            max_hp: 100,
            ap: 10,
            max_ap: 10,
            ac: 5,
            progression: Some(Progression::new()),
            exp_value: None,
            detection_range: None,
            equipment: Equipment::default(),
            inventory: Some(Inventory::new(150.0)),
        }
    }

    pub fn enemy_at(id: &str, pos: Point) -> Entity {
        Entity {
            id: id.into(),
            kind: EntityKind::Enemy,
            name: "Radroach".into(),
            pos,
            facing: None,
            is_moving: false,
            hp: 40,
            max_hp: 40,
            ap: 8,
            max_ap: 8,
            ac: 2,
            progression: None,
            exp_value: Some(120),
            detection_range: Some(5),
            equipment: Equipment::default(),
            inventory: None,
        }
    }

    pub fn state_with(entities: Vec<Entity>) -> GameState {
        let mut state = GameState::with_seed(7);
        state.entities = entities;
        state
    }
}
