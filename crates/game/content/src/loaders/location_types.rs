//! Location type loader.

use std::path::Path;

use realm_core::{GameConfig, LocationType};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationTypeCatalog {
    pub location_types: Vec<LocationType>,
}

pub struct LocationTypeLoader;

impl LocationTypeLoader {
    /// Load hazard kinds from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<LocationType>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Each kind defines between one and three stages.
    pub fn parse(content: &str) -> LoadResult<Vec<LocationType>> {
        let catalog: LocationTypeCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse location type catalog RON: {}", e))?;

        let max = usize::from(GameConfig::MAX_TYPE_STAGE);
        for kind in &catalog.location_types {
            if kind.stages.is_empty() || kind.stages.len() > max {
                anyhow::bail!(
                    "Location type '{}' defines {} stages, expected 1 to {}",
                    kind.name,
                    kind.stages.len(),
                    max
                );
            }
        }

        Ok(catalog.location_types)
    }
}
