//! Authoritative game state representation.
//!
//! This module owns the data structures describing entities, items, doors,
//! and turn bookkeeping. The runtime clones or queries this state but mutates
//! it exclusively through [`crate::engine::GameEngine`].
mod common;
mod entity;
mod inventory;
mod item;
mod object;

use std::collections::{HashSet, VecDeque};

pub use common::{EffectKind, EntityId, Facing, Point};
pub use entity::{Entity, EntityKind, Equipment, Progression};
pub use inventory::Inventory;
pub use item::{ChemEffect, DamageRange, Item, ItemId, ItemKind, ItemStack};
pub use object::{DoorAction, MapObject, WorldItem};

use crate::config::GameConfig;

/// Whose turn it is while in combat mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum Turn {
    Player,
    Enemy,
}

/// Top-level simulation mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    /// Real-time exploration; movement is free.
    Wander,
    /// Turn-based; AP gates movement and attacks.
    Combat,
}

/// A transient visual effect record (impact flash, miss marker).
///
/// The runtime schedules removal after `duration_ms`; the core only records
/// that the effect happened.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub id: u64,
    pub kind: EffectKind,
    pub pos: Point,
    pub duration_ms: u64,
}

/// Canonical snapshot of the simulation state.
///
/// Aggregate root: every mutation flows through the engine as an atomic,
/// serialized transformation. There is exactly one entity with the player id
/// and it is never removed from the roster, even at zero HP.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// RNG seed fixed at session start; combined with `action_nonce` to
    /// derive per-roll seeds.
    pub game_seed: u64,
    /// Sequential action counter, incremented by every engine action that
    /// consumes randomness.
    pub action_nonce: u64,

    pub entities: Vec<Entity>,
    /// Static obstacle cells.
    pub walls: HashSet<Point>,
    pub objects: Vec<MapObject>,
    pub world_items: Vec<WorldItem>,

    pub turn: Turn,
    pub mode: Mode,

    // UI-facing fields written by the core as observable side effects.
    /// HUD log lines, newest first, capped at [`GameConfig::MAX_LOGS`].
    pub logs: VecDeque<String>,
    pub selected_tile: Option<Point>,
    pub path_preview: Vec<Point>,
    pub effects: Vec<Effect>,
    pub shake_intensity: u32,

    next_effect_id: u64,
}

impl GameState {
    /// Creates an empty wander-mode state with the given seed.
    pub fn with_seed(game_seed: u64) -> Self {
        Self {
            game_seed,
            action_nonce: 0,
            entities: Vec::new(),
            walls: HashSet::new(),
            objects: Vec::new(),
            world_items: Vec::new(),
            turn: Turn::Player,
            mode: Mode::Wander,
            logs: VecDeque::new(),
            selected_tile: None,
            path_preview: Vec::new(),
            effects: Vec::new(),
            shake_intensity: 0,
            next_effect_id: 0,
        }
    }

    // ========================================================================
    // Entity access
    // ========================================================================

    pub fn entity(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| &e.id == id)
    }

    pub fn entity_mut(&mut self, id: &EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| &e.id == id)
    }

    /// The player entity. The roster invariant guarantees its presence; a
    /// missing player is a broken invariant, hence the panic.
    pub fn player(&self) -> &Entity {
        self.entities
            .iter()
            .find(|e| e.is_player())
            .expect("roster always contains the player")
    }

    pub fn player_mut(&mut self) -> &mut Entity {
        self.entities
            .iter_mut()
            .find(|e| e.is_player())
            .expect("roster always contains the player")
    }

    /// Living enemy-kind entities.
    pub fn living_enemies(&self) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(|e| e.kind == EntityKind::Enemy && e.is_alive())
    }

    pub fn has_living_enemies(&self) -> bool {
        self.living_enemies().next().is_some()
    }

    /// Entity occupying `pos`, if any.
    pub fn entity_at(&self, pos: Point) -> Option<&Entity> {
        self.entities.iter().find(|e| e.pos == pos)
    }

    /// Door at `pos`, if any.
    pub fn object_at(&self, pos: Point) -> Option<&MapObject> {
        self.objects.iter().find(|o| o.pos == pos)
    }

    /// World item at `pos`, if any.
    pub fn world_item_at(&self, pos: Point) -> Option<&WorldItem> {
        self.world_items.iter().find(|w| w.pos == pos)
    }

    // ========================================================================
    // Derived views
    // ========================================================================

    /// Current obstacle set: walls plus every closed door's cell.
    ///
    /// Recomputed on every call; door state changes can never leave a stale
    /// cached set behind.
    pub fn obstacles(&self) -> HashSet<Point> {
        let mut cells = self.walls.clone();
        cells.extend(
            self.objects
                .iter()
                .filter(|o| o.blocks_movement())
                .map(|o| o.pos),
        );
        cells
    }

    // ========================================================================
    // Side-channel bookkeeping
    // ========================================================================

    /// Prepends a HUD log line, evicting the oldest past the cap.
    pub fn push_log(&mut self, message: impl Into<String>) {
        self.logs.push_front(message.into());
        self.logs.truncate(GameConfig::MAX_LOGS);
    }

    /// Records a visual effect and bumps shake intensity accordingly.
    pub fn push_effect(&mut self, kind: EffectKind, pos: Point) -> u64 {
        let id = self.next_effect_id;
        self.next_effect_id += 1;
        self.effects.push(Effect {
            id,
            kind,
            pos,
            duration_ms: 500,
        });
        self.shake_intensity = match kind {
            EffectKind::Impact => 10,
            EffectKind::Miss => 3,
        };
        id
    }

    pub fn remove_effect(&mut self, id: u64) {
        self.effects.retain(|e| e.id != id);
    }

    /// Consumes and returns the next action nonce for seed derivation.
    pub fn next_nonce(&mut self) -> u64 {
        let nonce = self.action_nonce;
        self.action_nonce += 1;
        nonce
    }
}
