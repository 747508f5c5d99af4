//! Location and combat zone loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{LocationConfig, ZoneDefinition};
use crate::loaders::{LoadResult, read_file};

/// World layout structure for RON files.
///
/// ```ron
/// #![enable(implicit_some)]
/// (
///     start_location: "Village",
///     locations: [(name: "Village", is_unlocked: true)],
///     zones: [(parent: "Village", zone: (name: "Den", enemies: (list: ["Wolf"])))],
/// )
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldCatalog {
    pub start_location: Option<String>,
    pub locations: Vec<LocationConfig>,
    pub zones: Vec<ZoneDefinition>,
}

/// Loader for the world layout from RON files.
pub struct WorldLoader;

impl WorldLoader {
    pub fn load(path: &Path) -> LoadResult<WorldCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<WorldCatalog> {
        let world: WorldCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse world RON: {}", e))?;

        tracing::debug!(
            locations = world.locations.len(),
            zones = world.zones.len(),
            "loaded world layout"
        );
        Ok(world)
    }
}
