//! Combatants and actors.

use super::common::{EntityId, Facing, Point};
use super::inventory::Inventory;
use super::item::Item;
use crate::config::GameConfig;

/// Broad actor classification driving turn ownership and AI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum EntityKind {
    Player,
    Enemy,
    Npc,
}

/// Experience and level bookkeeping, tracked for the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Progression {
    pub level: u32,
    pub exp: u64,
    /// Exp total required for the next level: `level * (level + 1) * 500`.
    pub next_level_exp: u64,
    /// Unspent allocation points from level-ups.
    pub skill_points: u32,
}

impl Progression {
    pub fn new() -> Self {
        Self {
            level: 1,
            exp: 0,
            next_level_exp: Self::threshold(1),
            skill_points: 0,
        }
    }

    /// Exp total required to advance past `level`.
    pub fn threshold(level: u32) -> u64 {
        level as u64 * (level as u64 + 1) * GameConfig::EXP_CURVE_FACTOR
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

/// At most one weapon and one armor piece per entity.
///
/// Armor's `ac_bonus` is folded into the wearer's live `ac` on equip and must
/// be reversed exactly on unequip, otherwise repeated cycles would drift the
/// stat.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
}

/// A combatant or actor in the world.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub name: String,
    pub pos: Point,
    pub facing: Option<Facing>,
    /// True while a walk animation is in flight (presentation hint).
    pub is_moving: bool,

    pub hp: u32,
    pub max_hp: u32,
    pub ap: u32,
    pub max_ap: u32,
    /// Armor class; reduces opponents' hit chance.
    pub ac: i32,

    pub progression: Option<Progression>,
    /// XP granted to the killer when this entity dies.
    pub exp_value: Option<u64>,
    /// Manhattan radius at which this enemy notices the player in wander
    /// mode. `None` falls back to the configured default.
    pub detection_range: Option<i32>,

    pub equipment: Equipment,
    pub inventory: Option<Inventory>,
}

impl Entity {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_player(&self) -> bool {
        self.kind == EntityKind::Player
    }

    /// Applies damage, flooring HP at zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// Heals up to `amount`, capped at `max_hp`. Returns the HP restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = (self.hp + amount).min(self.max_hp);
        self.hp - before
    }

    pub fn spend_ap(&mut self, cost: u32) {
        debug_assert!(self.ap >= cost, "AP affordability checked before spend");
        self.ap = self.ap.saturating_sub(cost);
    }

    pub fn restore_ap(&mut self) {
        self.ap = self.max_ap;
    }

    /// Weapon parameters for an attack: equipped weapon, or unarmed defaults.
    pub fn attack_profile(&self) -> (u32, u32, u32) {
        match &self.equipment.weapon {
            Some(weapon) => match weapon.kind {
                super::item::ItemKind::Weapon { damage, ap_cost } => {
                    (ap_cost, damage.min, damage.max)
                }
                // An equipped non-weapon is a broken invariant upstream;
                // treat it as unarmed rather than panicking mid-combat.
                _ => Self::unarmed_profile(),
            },
            None => Self::unarmed_profile(),
        }
    }

    fn unarmed_profile() -> (u32, u32, u32) {
        let (min, max) = GameConfig::UNARMED_DAMAGE;
        (GameConfig::UNARMED_AP_COST, min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progression_thresholds_follow_the_curve() {
        assert_eq!(Progression::threshold(1), 1000);
        assert_eq!(Progression::threshold(2), 3000);
        assert_eq!(Progression::threshold(3), 6000);
    }

    #[test]
    fn damage_floors_at_zero_and_heal_caps_at_max() {
        let mut entity = Entity {
            id: EntityId::player(),
            kind: EntityKind::Player,
            name: "Vault Dweller".into(),
            pos: Point::ORIGIN,
            facing: None,
            is_moving: false,
            hp: 10,
            max_hp: 100,
            ap: 10,
            max_ap: 10,
            ac: 5,
            progression: Some(Progression::new()),
            exp_value: None,
            detection_range: None,
            equipment: Equipment::default(),
            inventory: None,
        };

        entity.take_damage(50);
        assert_eq!(entity.hp, 0);
        assert!(!entity.is_alive());

        entity.hp = 95;
        assert_eq!(entity.heal(30), 5);
        assert_eq!(entity.hp, 100);
    }
}
