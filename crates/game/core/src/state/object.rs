//! Interactable map objects and world-dropped items.

use super::common::Point;
use super::item::Item;

/// A door placed on the grid.
///
/// A closed door is an obstacle regardless of lock state; the lock only gates
/// the toggle action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapObject {
    pub id: String,
    pub pos: Point,
    pub is_open: bool,
    pub is_locked: bool,
    pub name: String,
}

impl MapObject {
    /// Whether this object currently blocks movement.
    pub fn blocks_movement(&self) -> bool {
        !self.is_open
    }
}

/// Player-initiated door interactions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DoorAction {
    /// Open or close. Refused while locked-and-closed.
    Toggle,
    /// Lock or unlock. Refused while open.
    Lock,
    /// Attempt to clear the lock; fixed success chance.
    Picklock,
}

/// An item instance sitting on a tile, picked up by proximity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldItem {
    pub id: String,
    pub pos: Point,
    pub item: Item,
}
