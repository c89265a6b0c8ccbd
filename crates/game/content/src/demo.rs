//! Bundled demo content.
//!
//! The catalog and scenario ship compiled into the binary so the runtime can
//! start without any files on disk. They use the same RON formats as the
//! file-based loaders.

use game_core::{GameConfig, GameState};

use crate::loaders::{ItemCatalog, ItemLoader, LoadResult, Scenario, ScenarioLoader};

const ITEMS_RON: &str = include_str!("../data/items.ron");
const SCENARIO_RON: &str = include_str!("../data/scenario.ron");

/// The demo item catalog.
pub fn item_catalog() -> LoadResult<ItemCatalog> {
    ItemLoader::from_str(ITEMS_RON)
}

/// The demo scenario definition.
pub fn scenario() -> LoadResult<Scenario> {
    ScenarioLoader::from_str(SCENARIO_RON)
}

/// A ready-to-play initial state for the demo scenario.
pub fn initial_state(config: &GameConfig, seed: u64) -> LoadResult<GameState> {
    scenario()?.create_initial_state(&item_catalog()?, config, seed)
}
