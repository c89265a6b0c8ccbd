//! Scenario loader: entity placement and world setup.
//!
//! Scenarios reference items by catalog id; the item catalog must be loaded
//! first. Keeping placement separate from the catalog lets the same items
//! back different maps.

use std::path::Path;

use game_core::{
    Entity, EntityKind, Equipment, GameConfig, GameState, Inventory, MapObject, Point,
    Progression, WorldItem,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{ItemCatalog, LoadResult, read_file};

/// Entity placement as written in scenario RON files.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EntitySpec {
    pub id: String,
    pub kind: EntityKind,
    pub name: String,
    pub pos: Point,
    pub hp: u32,
    pub max_hp: u32,
    pub ap: u32,
    pub max_ap: u32,
    pub ac: i32,
    #[serde(default)]
    pub detection_range: Option<i32>,
    #[serde(default)]
    pub exp_value: Option<u64>,
    /// Starting inventory as (catalog id, quantity) pairs.
    #[serde(default)]
    pub items: Vec<(String, u32)>,
}

/// Door or other interactive object placement.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectSpec {
    pub id: String,
    pub pos: Point,
    pub is_open: bool,
    pub is_locked: bool,
    pub name: String,
}

/// An item lying on the ground, referencing the catalog by id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldItemSpec {
    pub id: String,
    pub pos: Point,
    pub item: String,
}

/// Scenario configuration for game initialization.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    pub entities: Vec<EntitySpec>,
    #[serde(default)]
    pub walls: Vec<Point>,
    #[serde(default)]
    pub objects: Vec<ObjectSpec>,
    #[serde(default)]
    pub world_items: Vec<WorldItemSpec>,
    /// Log lines shown on entry, oldest first.
    #[serde(default)]
    pub opening_logs: Vec<String>,
}

impl Scenario {
    /// Initializes a [`GameState`] from this scenario.
    ///
    /// Item references are resolved against `catalog`; a dangling id is a
    /// load error. Exactly one placement must be the player.
    pub fn create_initial_state(
        &self,
        catalog: &ItemCatalog,
        config: &GameConfig,
        seed: u64,
    ) -> LoadResult<GameState> {
        let players = self
            .entities
            .iter()
            .filter(|e| e.kind == EntityKind::Player)
            .count();
        if players != 1 {
            anyhow::bail!("scenario must place exactly one player, found {players}");
        }

        let mut state = GameState::with_seed(seed);

        for spec in &self.entities {
            let is_player = spec.kind == EntityKind::Player;
            let mut inventory = if is_player || !spec.items.is_empty() {
                Some(Inventory::new(config.default_max_weight))
            } else {
                None
            };
            if let Some(inventory) = inventory.as_mut() {
                for (item_id, quantity) in &spec.items {
                    let item = catalog.item(item_id).ok_or_else(|| {
                        anyhow::anyhow!(
                            "entity '{}' references unknown item '{item_id}'",
                            spec.id
                        )
                    })?;
                    inventory.add(item.clone(), *quantity);
                }
            }

            state.entities.push(Entity {
                id: spec.id.as_str().into(),
                kind: spec.kind,
                name: spec.name.clone(),
                pos: spec.pos,
                facing: None,
                is_moving: false,
                hp: spec.hp,
                max_hp: spec.max_hp,
                ap: spec.ap,
                max_ap: spec.max_ap,
                ac: spec.ac,
                progression: is_player.then(Progression::new),
                exp_value: spec.exp_value,
                detection_range: spec.detection_range,
                equipment: Equipment::default(),
                inventory,
            });
        }

        state.walls.extend(self.walls.iter().copied());

        for spec in &self.objects {
            state.objects.push(MapObject {
                id: spec.id.clone(),
                pos: spec.pos,
                is_open: spec.is_open,
                is_locked: spec.is_locked,
                name: spec.name.clone(),
            });
        }

        for spec in &self.world_items {
            let item = catalog.item(&spec.item).ok_or_else(|| {
                anyhow::anyhow!(
                    "world item '{}' references unknown item '{}'",
                    spec.id,
                    spec.item
                )
            })?;
            state.world_items.push(WorldItem {
                id: spec.id.clone(),
                pos: spec.pos,
                item: item.clone(),
            });
        }

        // The log buffer is newest-first; pushing oldest-first preserves the
        // authored order on screen.
        for line in &self.opening_logs {
            state.push_log(line.clone());
        }

        Ok(state)
    }
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a scenario from a RON file.
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::from_str(&content)
    }

    /// Parse a scenario from RON text.
    pub fn from_str(content: &str) -> LoadResult<Scenario> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::ItemLoader;

    fn catalog() -> ItemCatalog {
        ItemLoader::from_str(
            r#"(items: [(
                id: "stimpak",
                name: "Stimpak",
                category: Chem,
                weight: 0.1,
                value: 100,
                effect: Some("heal:30"),
            )])"#,
        )
        .unwrap()
    }

    fn scenario_text() -> &'static str {
        r#"(
            entities: [
                (
                    id: "player",
                    kind: Player,
                    name: "Vault Dweller",
                    pos: (x: 2, y: 2),
                    hp: 100, max_hp: 100,
                    ap: 10, max_ap: 10,
                    ac: 5,
                    items: [("stimpak", 1)],
                ),
                (
                    id: "enemy-1",
                    kind: Enemy,
                    name: "Radroach",
                    pos: (x: 12, y: 12),
                    hp: 40, max_hp: 40,
                    ap: 8, max_ap: 8,
                    ac: 2,
                    detection_range: Some(5),
                    exp_value: Some(120),
                ),
            ],
            walls: [(x: 4, y: 4), (x: 4, y: 5)],
            objects: [(
                id: "door-1",
                pos: (x: 10, y: 7),
                is_open: false,
                is_locked: true,
                name: "Wooden Door",
            )],
            world_items: [(id: "world-item-1", pos: (x: 8, y: 8), item: "stimpak")],
            opening_logs: ["Welcome.", "Wander mode active."],
        )"#
    }

    #[test]
    fn scenario_builds_a_complete_initial_state() {
        let scenario = ScenarioLoader::from_str(scenario_text()).unwrap();
        let state = scenario
            .create_initial_state(&catalog(), &GameConfig::default(), 42)
            .unwrap();

        assert_eq!(state.entities.len(), 2);
        let player = state.player();
        assert!(player.progression.is_some());
        assert!(
            player
                .inventory
                .as_ref()
                .unwrap()
                .contains(&"stimpak".into())
        );
        assert!(state.walls.contains(&Point::new(4, 4)));
        assert!(state.objects[0].is_locked);
        assert_eq!(state.world_items[0].item.id, "stimpak".into());
        // Newest-first buffer shows the last authored line on top.
        assert_eq!(state.logs.front().unwrap(), "Wander mode active.");
    }

    #[test]
    fn dangling_item_reference_fails_to_load() {
        let scenario = ScenarioLoader::from_str(
            r#"(
                entities: [(
                    id: "player",
                    kind: Player,
                    name: "Vault Dweller",
                    pos: (x: 0, y: 0),
                    hp: 100, max_hp: 100, ap: 10, max_ap: 10, ac: 5,
                    items: [("nuka-cola", 1)],
                )],
            )"#,
        )
        .unwrap();
        let result = scenario.create_initial_state(&catalog(), &GameConfig::default(), 42);
        assert!(result.is_err());
    }

    #[test]
    fn a_scenario_without_a_player_is_rejected() {
        let scenario = ScenarioLoader::from_str(
            r#"(
                entities: [(
                    id: "enemy-1",
                    kind: Enemy,
                    name: "Radroach",
                    pos: (x: 0, y: 0),
                    hp: 40, max_hp: 40, ap: 8, max_ap: 8, ac: 2,
                )],
            )"#,
        )
        .unwrap();
        let result = scenario.create_initial_state(&catalog(), &GameConfig::default(), 42);
        assert!(result.is_err());
    }
}
