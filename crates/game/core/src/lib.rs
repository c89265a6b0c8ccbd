//! Deterministic simulation rules shared across clients.
//!
//! `game-core` defines the canonical rules (pathfinding, combat math, turn
//! flow, inventory, progression) and exposes pure APIs that can be reused by
//! the runtime and offline tools alike. All state mutation flows through
//! [`engine::GameEngine`]; randomness enters only through the seeded
//! [`rng::RngOracle`] so identical inputs always replay to identical states.
pub mod combat;
pub mod config;
pub mod engine;
pub mod events;
pub mod iso;
pub mod path;
pub mod progression;
pub mod rng;
pub mod state;

pub use combat::{damage_roll, hit_chance};
pub use config::GameConfig;
pub use engine::{EngineError, GameEngine, MovePlan};
pub use events::GameEvent;
pub use iso::{grid_to_screen, screen_to_grid, ScreenPoint};
pub use path::find_path;
pub use progression::{award_exp, BonusKind, ExpAward, LevelUpAllocation};
pub use rng::{compute_seed, PcgRng, RngOracle};
pub use state::{
    ChemEffect, DamageRange, DoorAction, Effect, EffectKind, Entity, EntityId, EntityKind,
    Equipment, Facing, GameState, Inventory, Item, ItemId, ItemKind, ItemStack, MapObject, Mode,
    Point, Progression, Turn, WorldItem,
};
