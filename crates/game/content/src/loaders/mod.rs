//! Content loaders for reading game data from files.
//!
//! Catalogs are RON, the tuning config is TOML. Every loader returns the
//! plain definitions; [`ContentFactory`] assembles them into a
//! [`crate::ContentBundle`] and a validated [`crate::ContentRepository`].

pub mod catalogs;
pub mod config;
pub mod enemies;
pub mod factory;
pub mod location_types;
pub mod world;

pub use catalogs::{ItemLoader, SkillLoader};
pub use config::ConfigLoader;
pub use enemies::EnemyLoader;
pub use factory::ContentFactory;
pub use location_types::LocationTypeLoader;
pub use world::{WorldCatalog, WorldLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
