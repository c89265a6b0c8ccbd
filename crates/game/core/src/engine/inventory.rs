//! Pickup, equip, use, and drop.
//!
//! Every rejection here is a game-rule outcome: the state stays untouched
//! and the reason lands in the HUD log. Only unresolvable ids are errors.

use super::{EngineError, GameEngine};
use crate::config::GameConfig;
use crate::events::{EventSink, GameEvent};
use crate::state::{ChemEffect, EntityId, Inventory, ItemId, ItemKind, WorldItem};

impl GameEngine<'_> {
    /// Picks a world item up off the ground.
    ///
    /// The actor must stand within the Euclidean pickup radius and have the
    /// carry capacity for the whole stack; otherwise the attempt is rejected
    /// with a log line and nothing changes.
    pub fn pick_up(
        &mut self,
        actor_id: &EntityId,
        world_item_id: &str,
    ) -> Result<Vec<GameEvent>, EngineError> {
        let mut sink = EventSink::new();
        self.require_entity(actor_id)?;
        let world_item = self
            .state
            .world_items
            .iter()
            .find(|w| w.id == world_item_id)
            .cloned()
            .ok_or_else(|| EngineError::UnknownWorldItem(world_item_id.to_owned()))?;

        let actor_pos = self.state.entity(actor_id).expect("checked above").pos;
        if actor_pos.euclidean_distance(world_item.pos) > GameConfig::PICKUP_RADIUS {
            self.log(&mut sink, "Too far away to pick up.");
            return Ok(sink.into_events());
        }

        let default_max_weight = self.config.default_max_weight;
        let actor = self.state.entity_mut(actor_id).expect("checked above");
        let inventory = actor
            .inventory
            .get_or_insert_with(|| Inventory::new(default_max_weight));

        if !inventory.can_carry(&world_item.item, 1) {
            self.log(&mut sink, "Too heavy to pick up.");
            return Ok(sink.into_events());
        }

        let name = world_item.item.name.clone();
        inventory.add(world_item.item.clone(), 1);
        self.state.world_items.retain(|w| w.id != world_item.id);
        self.log(&mut sink, format!("Picked up {name}."));
        Ok(sink.into_events())
    }

    /// Equips or unequips a carried weapon or armor piece.
    ///
    /// Toggling the already-equipped id clears the slot; equipping over an
    /// occupied slot replaces it. Armor bonuses are reversed before a
    /// replacement's bonus applies, so equip/unequip sequences never drift
    /// the live AC.
    pub fn equip(
        &mut self,
        actor_id: &EntityId,
        item_id: &ItemId,
    ) -> Result<Vec<GameEvent>, EngineError> {
        let mut sink = EventSink::new();
        let item = self.carried_item(actor_id, item_id)?;

        match item.kind {
            ItemKind::Weapon { .. } => {
                let actor = self.state.entity_mut(actor_id).expect("resolved above");
                let already = actor
                    .equipment
                    .weapon
                    .as_ref()
                    .is_some_and(|w| w.id == item.id);
                if already {
                    actor.equipment.weapon = None;
                    let name = item.name.clone();
                    self.log(&mut sink, format!("Unequipped {name}."));
                } else {
                    actor.equipment.weapon = Some(item.clone());
                    let name = item.name.clone();
                    self.log(&mut sink, format!("Equipped {name}."));
                }
            }
            ItemKind::Armor { ac_bonus } => {
                let actor = self.state.entity_mut(actor_id).expect("resolved above");
                let already = actor
                    .equipment
                    .armor
                    .as_ref()
                    .is_some_and(|a| a.id == item.id);
                if already {
                    actor.equipment.armor = None;
                    actor.ac -= ac_bonus;
                    let name = item.name.clone();
                    self.log(&mut sink, format!("Unequipped {name}."));
                } else {
                    if let Some(old) = actor.equipment.armor.take() {
                        actor.ac -= old.ac_bonus();
                    }
                    actor.ac += ac_bonus;
                    actor.equipment.armor = Some(item.clone());
                    let name = item.name.clone();
                    self.log(&mut sink, format!("Equipped {name}."));
                }
            }
            _ => {
                self.log(&mut sink, format!("You can't equip {}.", item.name));
            }
        }
        Ok(sink.into_events())
    }

    /// Consumes a chem from the actor's inventory.
    pub fn use_item(
        &mut self,
        actor_id: &EntityId,
        item_id: &ItemId,
    ) -> Result<Vec<GameEvent>, EngineError> {
        let mut sink = EventSink::new();
        let item = self.carried_item(actor_id, item_id)?;

        let ItemKind::Chem(effect) = item.kind else {
            self.log(&mut sink, format!("You can't use {}.", item.name));
            return Ok(sink.into_events());
        };

        let actor = self.state.entity_mut(actor_id).expect("resolved above");
        match effect {
            ChemEffect::Heal(amount) => {
                actor.heal(amount);
                let name = item.name.clone();
                actor
                    .inventory
                    .as_mut()
                    .expect("carried_item proved the inventory exists")
                    .remove_one(item_id);
                self.log(&mut sink, format!("Used {name}. Restored {amount} HP."));
            }
        }
        Ok(sink.into_events())
    }

    /// Drops one unit of a carried item at the actor's feet.
    ///
    /// Quest items are explicitly refused. A dropped equipped item leaves
    /// its equipment slot too, reversing any armor bonus.
    pub fn drop_item(
        &mut self,
        actor_id: &EntityId,
        item_id: &ItemId,
    ) -> Result<Vec<GameEvent>, EngineError> {
        let mut sink = EventSink::new();
        let item = self.carried_item(actor_id, item_id)?;

        if item.is_quest() {
            self.log(&mut sink, format!("{} cannot be dropped.", item.name));
            return Ok(sink.into_events());
        }

        let drop_serial = self.state.next_nonce();
        let actor = self.state.entity_mut(actor_id).expect("resolved above");
        let drop_pos = actor.pos;

        if actor
            .equipment
            .weapon
            .as_ref()
            .is_some_and(|w| &w.id == item_id)
        {
            actor.equipment.weapon = None;
        }
        if actor
            .equipment
            .armor
            .as_ref()
            .is_some_and(|a| &a.id == item_id)
        {
            actor.ac -= item.ac_bonus();
            actor.equipment.armor = None;
        }

        let dropped = actor
            .inventory
            .as_mut()
            .expect("carried_item proved the inventory exists")
            .remove_one(item_id)
            .expect("carried_item proved the stack exists");

        let name = dropped.name.clone();
        self.state.world_items.push(WorldItem {
            id: format!("drop-{drop_serial}"),
            pos: drop_pos,
            item: dropped,
        });
        self.log(&mut sink, format!("Dropped {name}."));
        Ok(sink.into_events())
    }

    /// Resolves an item the actor actually carries, as a clone.
    fn carried_item(
        &self,
        actor_id: &EntityId,
        item_id: &ItemId,
    ) -> Result<crate::state::Item, EngineError> {
        let actor = self
            .state
            .entity(actor_id)
            .ok_or_else(|| EngineError::UnknownEntity(actor_id.clone()))?;
        actor
            .inventory
            .as_ref()
            .and_then(|inv| inv.stack(item_id))
            .map(|stack| stack.item.clone())
            .ok_or_else(|| EngineError::ItemNotCarried {
                entity: actor_id.clone(),
                item: item_id.clone(),
            })
    }
}
