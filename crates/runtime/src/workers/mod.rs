//! Background tasks internal to the runtime.

pub mod simulation;

pub use simulation::{Command, SimulationWorker, TimerSettings};
