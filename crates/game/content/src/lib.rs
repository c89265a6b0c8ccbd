//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and provides loaders for RON/TOML
//! data files:
//! - Item catalogs (data-driven via RON)
//! - Scenarios: entity placement, walls, doors, ground items (via RON)
//! - Game configuration (data-driven via TOML)
//!
//! Loaders parse content descriptors into game-core types up front, so the
//! simulation never interprets strings at play time. The bundled demo
//! scenario in [`demo`] is compiled in and needs no files on disk.

#[cfg(feature = "loaders")]
pub mod demo;
#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ItemCatalog, ItemDefinition, ItemLoader, Scenario, ScenarioLoader,
};
