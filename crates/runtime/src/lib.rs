//! Runtime orchestration for the deterministic game simulation.
//!
//! This crate wires the pure `game-core` engine into an async shell: a single
//! simulation worker owns the authoritative [`game_core::GameState`], clients
//! drive it through a cloneable [`RuntimeHandle`], and observable outcomes
//! stream out over a broadcast [`EventBus`]. Timed behavior that the core
//! deliberately leaves out — walk animation pacing, the enemy think delay,
//! effect expiry, screen-shake decay — lives in the worker's deferred,
//! generation-tagged timers.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and its configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the broadcast event bus
//! - [`telemetry`] sets up tracing for binaries and tests
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;
pub mod telemetry;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{EventBus, RuntimeEvent};
pub use runtime::{Runtime, RuntimeConfig};
