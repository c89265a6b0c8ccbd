//! Simulation worker that owns the authoritative [`game_core::GameState`].
//!
//! Receives commands from [`RuntimeHandle`](crate::api::RuntimeHandle),
//! executes them through [`game_core::GameEngine`], and publishes the
//! resulting events on the bus. All timed behavior (walk pacing, the enemy
//! think delay, effect expiry, shake decay) is realized as deferred commands
//! the worker sends to itself; generation tags make superseded timers no-ops
//! instead of racing the current state.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error};

use game_core::progression::{BonusKind, LevelUpAllocation};
use game_core::{
    DoorAction, EntityId, EntityKind, GameConfig, GameEngine, GameEvent, GameState, ItemId, Mode,
    PcgRng, Point, Turn,
};

use crate::api::Result;
use crate::events::{EventBus, RuntimeEvent};

/// Delays for the worker's self-scheduled timers.
#[derive(Clone, Copy, Debug)]
pub struct TimerSettings {
    /// Pause between walk-animation tiles.
    pub walk_step: Duration,
    /// Pause between the player's end-turn and the enemy turn resolving.
    pub enemy_think_delay: Duration,
    /// Pause between screen-shake decrements.
    pub shake_decay_interval: Duration,
}

/// Commands that can be sent to the simulation worker.
pub enum Command {
    /// A tile was clicked: pick up, engage, attack, or walk, in that
    /// priority order.
    ClickTile {
        pos: Point,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Hover moved; refresh the path preview (or clear it on `None`).
    Hover { pos: Option<Point> },
    /// End the player's combat turn.
    EndTurn {
        reply: oneshot::Sender<Result<()>>,
    },
    /// Toggle, lock, or picklock a door.
    DoorAction {
        object_id: String,
        action: DoorAction,
        reply: oneshot::Sender<Result<()>>,
    },
    PickUp {
        world_item_id: String,
        reply: oneshot::Sender<Result<()>>,
    },
    Equip {
        item_id: ItemId,
        reply: oneshot::Sender<Result<()>>,
    },
    UseItem {
        item_id: ItemId,
        reply: oneshot::Sender<Result<()>>,
    },
    DropItem {
        item_id: ItemId,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Spend level-up points and apply them atomically.
    ConfirmLevelUp {
        bonuses: Vec<BonusKind>,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Query the current game state (read-only snapshot).
    QueryState { reply: oneshot::Sender<GameState> },
    /// Stop the worker loop.
    Shutdown,

    // Internal timer commands. Stale generations are dropped silently.
    WalkTick { generation: u64 },
    EnemyTurn { generation: u64 },
    EffectDecay { id: u64 },
    ShakeDecay,
}

/// Background task that processes gameplay commands.
///
/// The worker is the single writer of the game state; every mutation runs to
/// completion before the next command is read, so clients always observe
/// whole transitions.
pub struct SimulationWorker {
    state: GameState,
    config: GameConfig,
    timers: TimerSettings,
    rng: PcgRng,
    command_rx: mpsc::Receiver<Command>,
    self_tx: mpsc::Sender<Command>,
    event_bus: EventBus,

    pending_path: VecDeque<Point>,
    walk_generation: u64,
    enemy_generation: u64,
    shake_timer_armed: bool,
}

impl SimulationWorker {
    pub fn new(
        state: GameState,
        config: GameConfig,
        timers: TimerSettings,
        command_rx: mpsc::Receiver<Command>,
        self_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
    ) -> Self {
        tracing::info!(
            entities = state.entities.len(),
            seed = state.game_seed,
            "simulation worker initialized"
        );
        Self {
            state,
            config,
            timers,
            rng: PcgRng,
            command_rx,
            self_tx,
            event_bus,
            pending_path: VecDeque::new(),
            walk_generation: 0,
            enemy_generation: 0,
            shake_timer_armed: false,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            if !self.handle_command(cmd) {
                break;
            }
        }
        debug!("simulation worker stopped");
    }

    /// Processes one command. Returns `false` when the loop should stop.
    fn handle_command(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::ClickTile { pos, reply } => {
                let result = self.click_tile(pos);
                if reply.send(result).is_err() {
                    debug!("ClickTile reply channel closed (caller dropped)");
                }
            }
            Command::Hover { pos } => {
                GameEngine::new(&mut self.state, &self.config, &self.rng).preview_path(pos);
            }
            Command::EndTurn { reply } => {
                let result = self.end_turn();
                if reply.send(result).is_err() {
                    debug!("EndTurn reply channel closed (caller dropped)");
                }
            }
            Command::DoorAction {
                object_id,
                action,
                reply,
            } => {
                let result = self.door_action(&object_id, action);
                if reply.send(result).is_err() {
                    debug!("DoorAction reply channel closed (caller dropped)");
                }
            }
            Command::PickUp {
                world_item_id,
                reply,
            } => {
                let result = self.pick_up(&world_item_id);
                if reply.send(result).is_err() {
                    debug!("PickUp reply channel closed (caller dropped)");
                }
            }
            Command::Equip { item_id, reply } => {
                let result = self.run_engine(|engine| engine.equip(&EntityId::player(), &item_id));
                if reply.send(result).is_err() {
                    debug!("Equip reply channel closed (caller dropped)");
                }
            }
            Command::UseItem { item_id, reply } => {
                let result =
                    self.run_engine(|engine| engine.use_item(&EntityId::player(), &item_id));
                if reply.send(result).is_err() {
                    debug!("UseItem reply channel closed (caller dropped)");
                }
            }
            Command::DropItem { item_id, reply } => {
                let result =
                    self.run_engine(|engine| engine.drop_item(&EntityId::player(), &item_id));
                if reply.send(result).is_err() {
                    debug!("DropItem reply channel closed (caller dropped)");
                }
            }
            Command::ConfirmLevelUp { bonuses, reply } => {
                self.confirm_level_up(&bonuses);
                if reply.send(Ok(())).is_err() {
                    debug!("ConfirmLevelUp reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
            Command::Shutdown => return false,

            Command::WalkTick { generation } => self.walk_tick(generation),
            Command::EnemyTurn { generation } => self.enemy_turn(generation),
            Command::EffectDecay { id } => {
                self.state.remove_effect(id);
                self.event_bus.publish(RuntimeEvent::EffectExpired { id });
            }
            Command::ShakeDecay => self.shake_decay(),
        }
        true
    }

    // ========================================================================
    // Command handlers
    // ========================================================================

    /// Routes a tile click the way the HUD expects: ground items first, then
    /// doors (selection only; doors are driven by [`Command::DoorAction`]),
    /// then enemies, then movement. Clicks are ignored mid-walk.
    fn click_tile(&mut self, pos: Point) -> Result<()> {
        if !self.pending_path.is_empty() {
            return Ok(());
        }

        if let Some(world_item) = self.state.world_item_at(pos) {
            let id = world_item.id.clone();
            return self.pick_up(&id);
        }

        if let Some(object) = self.state.object_at(pos) {
            self.event_bus.publish(RuntimeEvent::DoorSelected {
                object_id: object.id.clone(),
                pos,
            });
            return Ok(());
        }

        let enemy_id = self
            .state
            .entity_at(pos)
            .filter(|e| e.kind == EntityKind::Enemy && e.is_alive())
            .map(|e| e.id.clone());
        if let Some(enemy_id) = enemy_id {
            match self.state.mode {
                Mode::Wander => {
                    // Clicking a hostile in wander mode only engages;
                    // the attack itself costs a combat action.
                    let events =
                        GameEngine::new(&mut self.state, &self.config, &self.rng).start_combat();
                    self.after_events(&events);
                    self.event_bus.publish_game_events(events);
                    return Ok(());
                }
                Mode::Combat => {
                    if self.state.turn != Turn::Player {
                        return Ok(());
                    }
                    return self
                        .run_engine(|engine| engine.resolve_attack(&EntityId::player(), &enemy_id));
                }
            }
        }

        if self.state.mode == Mode::Combat && self.state.turn != Turn::Player {
            return Ok(());
        }
        let plan = GameEngine::new(&mut self.state, &self.config, &self.rng).plan_move(pos)?;
        self.event_bus.publish_game_events(plan.events);
        if !plan.path.is_empty() {
            self.pending_path = plan.path.into();
            self.walk_generation += 1;
            self.schedule(
                Command::WalkTick {
                    generation: self.walk_generation,
                },
                self.timers.walk_step,
            );
        }
        Ok(())
    }

    fn pick_up(&mut self, world_item_id: &str) -> Result<()> {
        let id = world_item_id.to_owned();
        self.run_engine(|engine| engine.pick_up(&EntityId::player(), &id))
    }

    fn door_action(&mut self, object_id: &str, action: DoorAction) -> Result<()> {
        let id = object_id.to_owned();
        self.run_engine(|engine| engine.door_action(&id, action))
    }

    fn end_turn(&mut self) -> Result<()> {
        let events = GameEngine::new(&mut self.state, &self.config, &self.rng).end_player_turn();
        let handed_off = events
            .iter()
            .any(|e| matches!(e, GameEvent::TurnChanged(Turn::Enemy)));
        self.after_events(&events);
        self.event_bus.publish_game_events(events);

        if handed_off {
            self.enemy_generation += 1;
            self.schedule(
                Command::EnemyTurn {
                    generation: self.enemy_generation,
                },
                self.timers.enemy_think_delay,
            );
        }
        Ok(())
    }

    fn confirm_level_up(&mut self, bonuses: &[BonusKind]) {
        let mut allocation = LevelUpAllocation::begin(self.state.player());
        for bonus in bonuses {
            allocation.allocate(*bonus);
        }
        allocation.confirm(self.state.player_mut());
    }

    // ========================================================================
    // Timer handlers
    // ========================================================================

    fn walk_tick(&mut self, generation: u64) {
        if generation != self.walk_generation {
            return;
        }
        let Some(next) = self.pending_path.pop_front() else {
            self.finish_walk();
            return;
        };

        let step = GameEngine::new(&mut self.state, &self.config, &self.rng)
            .apply_step(&EntityId::player(), next);
        let events = match step {
            Ok(events) => events,
            Err(e) => {
                error!(error = %e, "walk step failed");
                self.cancel_walk();
                return;
            }
        };

        let combat_started = events.iter().any(|e| matches!(e, GameEvent::CombatStarted));
        self.after_events(&events);
        self.event_bus.publish_game_events(events);

        if combat_started {
            // An enemy noticed the player; the rest of the wander path is
            // stale.
            self.cancel_walk();
        } else if self.pending_path.is_empty() {
            self.finish_walk();
        } else {
            self.schedule(Command::WalkTick { generation }, self.timers.walk_step);
        }
    }

    fn enemy_turn(&mut self, generation: u64) {
        if generation != self.enemy_generation {
            return;
        }
        match GameEngine::new(&mut self.state, &self.config, &self.rng).advance_enemy_turn() {
            Ok(events) => {
                self.after_events(&events);
                self.event_bus.publish_game_events(events);
            }
            Err(e) => error!(error = %e, "enemy turn failed"),
        }
    }

    fn shake_decay(&mut self) {
        self.shake_timer_armed = false;
        if self.state.shake_intensity > 0 {
            self.state.shake_intensity -= 1;
        }
        if self.state.shake_intensity > 0 {
            self.arm_shake_timer();
        }
    }

    // ========================================================================
    // Shared helpers
    // ========================================================================

    /// Runs one engine action and publishes everything it produced.
    fn run_engine(
        &mut self,
        action: impl FnOnce(&mut GameEngine<'_>) -> std::result::Result<Vec<GameEvent>, game_core::EngineError>,
    ) -> Result<()> {
        let mut engine = GameEngine::new(&mut self.state, &self.config, &self.rng);
        let events = action(&mut engine)?;
        self.after_events(&events);
        self.event_bus.publish_game_events(events);
        Ok(())
    }

    /// Reacts to engine events that require runtime-side bookkeeping.
    fn after_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::CombatStarted => {
                    if !self.pending_path.is_empty() {
                        self.cancel_walk();
                    }
                }
                GameEvent::EffectTriggered { id, .. } => {
                    let lifetime = self
                        .state
                        .effects
                        .iter()
                        .find(|e| e.id == *id)
                        .map(|e| Duration::from_millis(e.duration_ms))
                        .unwrap_or(Duration::from_millis(500));
                    self.schedule(Command::EffectDecay { id: *id }, lifetime);
                    self.arm_shake_timer();
                }
                _ => {}
            }
        }
    }

    fn arm_shake_timer(&mut self) {
        if self.shake_timer_armed || self.state.shake_intensity == 0 {
            return;
        }
        self.shake_timer_armed = true;
        self.schedule(Command::ShakeDecay, self.timers.shake_decay_interval);
    }

    fn cancel_walk(&mut self) {
        self.walk_generation += 1;
        self.pending_path.clear();
        self.finish_walk();
    }

    fn finish_walk(&mut self) {
        let player = EntityId::player();
        if GameEngine::new(&mut self.state, &self.config, &self.rng)
            .finish_walk(&player)
            .is_ok()
        {
            self.event_bus
                .publish(RuntimeEvent::WalkFinished { entity: player });
        }
    }

    /// Sends `cmd` back to this worker after `delay`.
    fn schedule(&self, cmd: Command, delay: Duration) {
        let tx = self.self_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The worker may have shut down in the meantime.
            let _ = tx.send(cmd).await;
        });
    }
}
