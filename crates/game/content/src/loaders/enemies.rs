//! Enemy template loader.

use std::path::Path;

use realm_core::EnemyTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Enemy catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCatalog {
    pub enemies: Vec<EnemyTemplate>,
}

/// Loader for enemy templates from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    /// Load enemy templates from a RON file.
    ///
    /// Stats omitted from an entry take their defaults, so a template only
    /// needs to spell out what sets it apart.
    pub fn load(path: &Path) -> LoadResult<Vec<EnemyTemplate>> {
        let content = read_file(path)?;
        let catalog: EnemyCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON: {}", e))?;

        tracing::debug!(count = catalog.enemies.len(), "loaded enemy templates");
        Ok(catalog.enemies)
    }
}
