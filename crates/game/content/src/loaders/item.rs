//! Item catalog loader.
//!
//! Catalog files describe items in a flat, category-tagged form with a
//! textual effect descriptor (`"heal:30"`). Parsing resolves each entry into
//! a typed [`Item`] once, at load time.

use std::path::Path;

use game_core::{ChemEffect, DamageRange, Item, ItemKind};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item category tag used by catalog files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemCategory {
    Weapon,
    Armor,
    Chem,
    Quest,
    Misc,
}

/// Flat item entry as written in catalog RON files.
///
/// Which optional fields are required depends on `category`; violations are
/// load errors, never runtime surprises.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItemSpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: ItemCategory,
    pub weight: f32,
    pub value: u32,
    #[serde(default)]
    pub damage: Option<(u32, u32)>,
    #[serde(default)]
    pub ap_cost: Option<u32>,
    #[serde(default)]
    pub ac_bonus: Option<i32>,
    #[serde(default)]
    pub effect: Option<String>,
    #[serde(default)]
    pub stackable: Option<bool>,
}

impl ItemSpec {
    /// Resolves the flat spec into a typed definition.
    fn into_definition(self) -> LoadResult<ItemDefinition> {
        let kind = match self.category {
            ItemCategory::Weapon => {
                let (min, max) = self.damage.ok_or_else(|| {
                    anyhow::anyhow!("weapon '{}' is missing a damage range", self.id)
                })?;
                let ap_cost = self
                    .ap_cost
                    .ok_or_else(|| anyhow::anyhow!("weapon '{}' is missing ap_cost", self.id))?;
                ItemKind::Weapon {
                    damage: DamageRange::new(min, max),
                    ap_cost,
                }
            }
            ItemCategory::Armor => {
                let ac_bonus = self
                    .ac_bonus
                    .ok_or_else(|| anyhow::anyhow!("armor '{}' is missing ac_bonus", self.id))?;
                ItemKind::Armor { ac_bonus }
            }
            ItemCategory::Chem => {
                let effect = self
                    .effect
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("chem '{}' is missing an effect", self.id))?;
                ItemKind::Chem(parse_effect(&self.id, effect)?)
            }
            ItemCategory::Quest => ItemKind::Quest,
            ItemCategory::Misc => ItemKind::Misc,
        };

        // Chems stack by default; everything else does not.
        let stackable = self
            .stackable
            .unwrap_or(matches!(self.category, ItemCategory::Chem));

        Ok(ItemDefinition {
            item: Item {
                id: self.id.as_str().into(),
                name: self.name,
                kind,
                weight: self.weight,
                value: self.value,
                stackable,
            },
            description: self.description,
        })
    }
}

/// Parses an effect descriptor such as `"heal:30"`.
fn parse_effect(item_id: &str, descriptor: &str) -> LoadResult<ChemEffect> {
    let (verb, amount) = descriptor.split_once(':').ok_or_else(|| {
        anyhow::anyhow!("chem '{item_id}' has malformed effect '{descriptor}'")
    })?;
    let amount: u32 = amount.parse().map_err(|_| {
        anyhow::anyhow!("chem '{item_id}' has non-numeric effect amount '{amount}'")
    })?;
    match verb {
        "heal" => Ok(ChemEffect::Heal(amount)),
        other => Err(anyhow::anyhow!(
            "chem '{item_id}' has unknown effect verb '{other}'"
        )),
    }
}

/// A resolved catalog entry: the playable item plus flavor text the
/// simulation never reads.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemDefinition {
    pub item: Item,
    pub description: String,
}

/// Item catalog structure for RON files.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct ItemCatalogRon {
    items: Vec<ItemSpec>,
}

/// Resolved item catalog, keyed by item id.
#[derive(Clone, Debug, Default)]
pub struct ItemCatalog {
    definitions: Vec<ItemDefinition>,
}

impl ItemCatalog {
    pub fn get(&self, id: &str) -> Option<&ItemDefinition> {
        self.definitions.iter().find(|d| d.item.id.as_str() == id)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.get(id).map(|d| &d.item)
    }

    pub fn definitions(&self) -> &[ItemDefinition] {
        &self.definitions
    }
}

/// Loader for item catalogs from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load an item catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        Self::from_str(&content)
    }

    /// Parse an item catalog from RON text.
    pub fn from_str(content: &str) -> LoadResult<ItemCatalog> {
        let catalog: ItemCatalogRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let mut definitions = Vec::with_capacity(catalog.items.len());
        for spec in catalog.items {
            let definition = spec.into_definition()?;
            if definitions
                .iter()
                .any(|d: &ItemDefinition| d.item.id == definition.item.id)
            {
                anyhow::bail!("duplicate item id '{}'", definition.item.id);
            }
            definitions.push(definition);
        }
        Ok(ItemCatalog { definitions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chem_effect_descriptor_is_parsed_at_load_time() {
        let catalog = ItemLoader::from_str(
            r#"(items: [(
                id: "stimpak",
                name: "Stimpak",
                description: "A healing syringe that restores HP.",
                category: Chem,
                weight: 0.1,
                value: 100,
                effect: Some("heal:30"),
            )])"#,
        )
        .unwrap();
        let stimpak = catalog.item("stimpak").unwrap();
        assert_eq!(stimpak.kind, ItemKind::Chem(ChemEffect::Heal(30)));
        assert!(stimpak.stackable);
    }

    #[test]
    fn weapon_without_damage_fails_to_load() {
        let result = ItemLoader::from_str(
            r#"(items: [(
                id: "broken",
                name: "Broken",
                category: Weapon,
                weight: 1.0,
                value: 1,
            )])"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_effect_verb_fails_to_load() {
        let result = ItemLoader::from_str(
            r#"(items: [(
                id: "mystery",
                name: "Mystery",
                category: Chem,
                weight: 0.1,
                value: 1,
                effect: Some("explode:5"),
            )])"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn duplicate_ids_fail_to_load() {
        let result = ItemLoader::from_str(
            r#"(items: [
                (id: "rock", name: "Rock", category: Misc, weight: 1.0, value: 0),
                (id: "rock", name: "Rock", category: Misc, weight: 1.0, value: 0),
            ])"#,
        );
        assert!(result.is_err());
    }
}
