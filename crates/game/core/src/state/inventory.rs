//! Per-entity item storage.

use super::item::{Item, ItemId, ItemStack};

/// Inventory owned exclusively by one entity.
///
/// Insertion order is irrelevant. The weight invariant
/// `sum(weight * quantity) <= max_weight` is enforced at pickup time, not
/// retroactively: lowering `max_weight` never ejects items.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    pub stacks: Vec<ItemStack>,
    pub max_weight: f32,
}

impl Inventory {
    pub fn new(max_weight: f32) -> Self {
        Self {
            stacks: Vec::new(),
            max_weight,
        }
    }

    /// Total carried weight across all stacks.
    pub fn total_weight(&self) -> f32 {
        self.stacks.iter().map(ItemStack::weight).sum()
    }

    /// Whether `quantity` more units of `item` would fit under the cap.
    pub fn can_carry(&self, item: &Item, quantity: u32) -> bool {
        self.total_weight() + item.weight * quantity as f32 <= self.max_weight
    }

    pub fn stack(&self, id: &ItemId) -> Option<&ItemStack> {
        self.stacks.iter().find(|s| &s.item.id == id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.stack(id).is_some()
    }

    /// Adds an item, merging into an existing same-id stack when stackable.
    ///
    /// Capacity is the caller's concern (`can_carry`); this method never
    /// rejects.
    pub fn add(&mut self, item: Item, quantity: u32) {
        if item.stackable {
            if let Some(stack) = self.stacks.iter_mut().find(|s| s.item.id == item.id) {
                stack.quantity += quantity;
                return;
            }
        }
        self.stacks.push(ItemStack::with_quantity(item, quantity));
    }

    /// Removes one unit of `id`, dropping the stack when it empties.
    ///
    /// Non-stackable entries are removed outright. Returns the item
    /// definition, or `None` when the id is not carried.
    pub fn remove_one(&mut self, id: &ItemId) -> Option<Item> {
        let index = self.stacks.iter().position(|s| &s.item.id == id)?;
        let stack = &mut self.stacks[index];
        let item = stack.item.clone();
        if stack.item.stackable && stack.quantity > 1 {
            stack.quantity -= 1;
        } else {
            self.stacks.remove(index);
        }
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::item::{ChemEffect, ItemKind};

    fn stimpak() -> Item {
        Item {
            id: "stimpak".into(),
            name: "Stimpak".into(),
            kind: ItemKind::Chem(ChemEffect::Heal(30)),
            weight: 0.1,
            value: 100,
            stackable: true,
        }
    }

    fn pistol() -> Item {
        Item {
            id: "10mm-pistol".into(),
            name: "10mm Pistol".into(),
            kind: ItemKind::Weapon {
                damage: crate::state::item::DamageRange::new(5, 12),
                ap_cost: 5,
            },
            weight: 3.0,
            value: 250,
            stackable: false,
        }
    }

    #[test]
    fn stackable_items_merge_by_id() {
        let mut inv = Inventory::new(150.0);
        inv.add(stimpak(), 1);
        inv.add(stimpak(), 2);
        assert_eq!(inv.stacks.len(), 1);
        assert_eq!(inv.stack(&"stimpak".into()).unwrap().quantity, 3);
    }

    #[test]
    fn non_stackable_items_get_separate_entries() {
        let mut inv = Inventory::new(150.0);
        inv.add(pistol(), 1);
        inv.add(pistol(), 1);
        assert_eq!(inv.stacks.len(), 2);
    }

    #[test]
    fn remove_one_decrements_then_drops_the_stack() {
        let mut inv = Inventory::new(150.0);
        inv.add(stimpak(), 2);
        assert!(inv.remove_one(&"stimpak".into()).is_some());
        assert_eq!(inv.stack(&"stimpak".into()).unwrap().quantity, 1);
        assert!(inv.remove_one(&"stimpak".into()).is_some());
        assert!(!inv.contains(&"stimpak".into()));
        assert!(inv.remove_one(&"stimpak".into()).is_none());
    }

    #[test]
    fn weight_cap_accounts_for_stack_quantities() {
        let mut inv = Inventory::new(1.0);
        inv.add(stimpak(), 9);
        assert!(inv.can_carry(&stimpak(), 1));
        assert!(!inv.can_carry(&pistol(), 1));
    }
}
