//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and hands out cloneable [`RuntimeHandle`]s for clients to drive the game.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use game_core::{GameConfig, GameState};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::workers::{Command, SimulationWorker, TimerSettings};

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Deterministic session seed; `None` draws one at startup.
    pub game_seed: Option<u64>,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Pause between walk-animation tiles.
    pub walk_step: Duration,
    /// Pause before the enemy turn resolves after end-turn.
    pub enemy_think_delay: Duration,
    /// Pause between screen-shake decrements.
    pub shake_decay_interval: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            game_seed: None,
            event_buffer_size: 100,
            command_buffer_size: 32,
            walk_step: Duration::from_millis(250),
            enemy_think_delay: Duration::from_millis(1000),
            shake_decay_interval: Duration::from_millis(50),
        }
    }
}

impl RuntimeConfig {
    fn timers(&self) -> TimerSettings {
        TimerSettings {
            walk_step: self.walk_step,
            enemy_think_delay: self.enemy_think_delay,
            shake_decay_interval: self.shake_decay_interval,
        }
    }
}

/// Main runtime that orchestrates the game simulation.
///
/// The runtime owns the worker; [`RuntimeHandle`] provides a cloneable façade
/// for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    command_tx: mpsc::Sender<Command>,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Starts the runtime over an explicit initial state.
    ///
    /// Must be called within a tokio runtime.
    pub fn start(config: RuntimeConfig, initial_state: GameState) -> Self {
        let (command_tx, command_rx) = mpsc::channel(config.command_buffer_size);
        let event_bus = EventBus::new(config.event_buffer_size);

        let worker = SimulationWorker::new(
            initial_state,
            config.game_config.clone(),
            config.timers(),
            command_rx,
            command_tx.clone(),
            event_bus.clone(),
        );
        let sim_worker_handle = tokio::spawn(worker.run());

        let handle = RuntimeHandle::new(command_tx.clone(), event_bus);
        Self {
            handle,
            command_tx,
            sim_worker_handle,
        }
    }

    /// Starts the runtime on the bundled demo scenario.
    pub fn start_demo(config: RuntimeConfig) -> Result<Self> {
        let seed = config.game_seed.unwrap_or_else(rand::random);
        let state = game_content::demo::initial_state(&config.game_config, seed)
            .map_err(|e| RuntimeError::Content(e.to_string()))?;
        Ok(Self::start(config, state))
    }

    /// Get a cloneable handle to this runtime.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully.
    pub async fn shutdown(self) -> Result<()> {
        // A closed channel means the worker is already gone.
        let _ = self.command_tx.send(Command::Shutdown).await;
        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}
