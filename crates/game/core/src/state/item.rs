//! Item value objects.
//!
//! Items are immutable definitions cloned into inventories and world drops;
//! equality for stacking purposes is by [`ItemId`] alone.

use std::fmt;

/// Stable item identifier from the content catalog (`"stimpak"`, ...).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Inclusive damage range rolled on a successful hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRange {
    pub min: u32,
    pub max: u32,
}

impl DamageRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// Typed consumable effect, decided at data-load time.
///
/// Content files carry descriptors like `"heal:30"`; the loader parses them
/// once so the core never string-matches at use time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChemEffect {
    /// Restore up to `amount` HP, capped at `max_hp`.
    Heal(u32),
}

/// Item category with category-specific data.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    /// Equippable weapon.
    Weapon { damage: DamageRange, ap_cost: u32 },

    /// Equippable armor; `ac_bonus` folds into the wearer's live AC.
    Armor { ac_bonus: i32 },

    /// Consumable chem.
    Chem(ChemEffect),

    /// Plot-critical item; cannot be dropped.
    Quest,

    /// Everything else.
    Misc,
}

impl ItemKind {
    pub fn category_name(&self) -> &'static str {
        match self {
            ItemKind::Weapon { .. } => "weapon",
            ItemKind::Armor { .. } => "armor",
            ItemKind::Chem(_) => "chem",
            ItemKind::Quest => "quest",
            ItemKind::Misc => "misc",
        }
    }
}

/// Immutable item definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    /// Carry weight per unit. Fractional weights exist (a stimpak is 0.1).
    pub weight: f32,
    /// Barter value in caps.
    pub value: u32,
    /// Whether same-id copies merge into one inventory stack.
    pub stackable: bool,
}

impl Item {
    pub fn is_weapon(&self) -> bool {
        matches!(self.kind, ItemKind::Weapon { .. })
    }

    pub fn is_armor(&self) -> bool {
        matches!(self.kind, ItemKind::Armor { .. })
    }

    pub fn is_quest(&self) -> bool {
        matches!(self.kind, ItemKind::Quest)
    }

    /// Armor bonus, zero for anything that is not armor.
    pub fn ac_bonus(&self) -> i32 {
        match self.kind {
            ItemKind::Armor { ac_bonus } => ac_bonus,
            _ => 0,
        }
    }
}

/// A counted stack of one item inside an inventory.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStack {
    pub item: Item,
    pub quantity: u32,
}

impl ItemStack {
    pub fn new(item: Item) -> Self {
        Self { item, quantity: 1 }
    }

    pub fn with_quantity(item: Item, quantity: u32) -> Self {
        Self { item, quantity }
    }

    /// Total carry weight of the stack.
    pub fn weight(&self) -> f32 {
        self.item.weight * self.quantity as f32
    }
}
