//! Content loaders for reading game data from files.
//!
//! Each loader converts one file format into game-core values, failing fast
//! with context when a descriptor is malformed.

pub mod config;
pub mod item;
pub mod scenario;

pub use config::ConfigLoader;
pub use item::{ItemCatalog, ItemDefinition, ItemLoader};
pub use scenario::{Scenario, ScenarioLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
