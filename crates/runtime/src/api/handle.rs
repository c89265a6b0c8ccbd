//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides the channel plumbing and offers async helpers
//! mirroring the player-facing verbs: click, hover, end turn, interact,
//! inventory management, and state queries.

use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::progression::BonusKind;
use game_core::{DoorAction, GameState, ItemId, Point};

use super::errors::{Result, RuntimeError};
use crate::events::{EventBus, RuntimeEvent};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime.
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Clicks a tile: picks up, engages, attacks, or walks depending on what
    /// occupies it. Game-rule rejections surface as log events, not errors.
    pub async fn click_tile(&self, pos: Point) -> Result<()> {
        self.request(|reply| Command::ClickTile { pos, reply }).await
    }

    /// Updates the hover preview. `None` clears it. Fire-and-forget.
    pub async fn hover(&self, pos: Option<Point>) -> Result<()> {
        self.command_tx
            .send(Command::Hover { pos })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }

    /// Ends the player's combat turn; the enemy turn resolves after the
    /// configured think delay.
    pub async fn end_turn(&self) -> Result<()> {
        self.request(|reply| Command::EndTurn { reply }).await
    }

    /// Applies a door action to a map object.
    pub async fn door_action(&self, object_id: impl Into<String>, action: DoorAction) -> Result<()> {
        let object_id = object_id.into();
        self.request(|reply| Command::DoorAction {
            object_id,
            action,
            reply,
        })
        .await
    }

    /// Picks up a ground item by id.
    pub async fn pick_up(&self, world_item_id: impl Into<String>) -> Result<()> {
        let world_item_id = world_item_id.into();
        self.request(|reply| Command::PickUp {
            world_item_id,
            reply,
        })
        .await
    }

    /// Equips or unequips a carried item.
    pub async fn equip(&self, item_id: ItemId) -> Result<()> {
        self.request(|reply| Command::Equip { item_id, reply }).await
    }

    /// Consumes a carried chem.
    pub async fn use_item(&self, item_id: ItemId) -> Result<()> {
        self.request(|reply| Command::UseItem { item_id, reply })
            .await
    }

    /// Drops one unit of a carried item at the player's feet.
    pub async fn drop_item(&self, item_id: ItemId) -> Result<()> {
        self.request(|reply| Command::DropItem { item_id, reply })
            .await
    }

    /// Spends level-up points and applies the bonuses atomically.
    pub async fn confirm_level_up(&self, bonuses: Vec<BonusKind>) -> Result<()> {
        self.request(|reply| Command::ConfirmLevelUp { bonuses, reply })
            .await
    }

    /// Query the current game state (read-only snapshot).
    pub async fn query_state(&self) -> Result<GameState> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::QueryState { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to runtime events.
    pub fn subscribe_events(&self) -> broadcast::Receiver<RuntimeEvent> {
        self.event_bus.subscribe()
    }

    /// Get a reference to the event bus for advanced usage.
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    async fn request(
        &self,
        make: impl FnOnce(oneshot::Sender<Result<()>>) -> Command,
    ) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(make(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }
}
