//! Content factory for building the repository from data files.

use std::path::{Path, PathBuf};

use realm_core::{EnemyTemplate, GameConfig, LocationType};

use crate::catalog::{ContentBundle, ItemDefinition, SkillDefinition};
use crate::loaders::{
    ConfigLoader, EnemyLoader, ItemLoader, LoadResult, LocationTypeLoader, SkillLoader,
    WorldCatalog, WorldLoader,
};
use crate::repository::ContentRepository;
use crate::verify::verify;

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── skills.ron
/// ├── items.ron
/// ├── enemies.ron
/// ├── location_types.ron
/// └── world.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load tuning constants from `config.toml`, or defaults when absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load skill catalog from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<Vec<SkillDefinition>> {
        SkillLoader::load(&self.data_dir.join("skills.ron"))
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<ItemDefinition>> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Load enemy templates from `enemies.ron`.
    pub fn load_enemies(&self) -> LoadResult<Vec<EnemyTemplate>> {
        EnemyLoader::load(&self.data_dir.join("enemies.ron"))
    }

    /// Load hazard kinds from `location_types.ron`.
    pub fn load_location_types(&self) -> LoadResult<Vec<LocationType>> {
        LocationTypeLoader::load(&self.data_dir.join("location_types.ron"))
    }

    /// Load locations and combat zones from `world.ron`.
    pub fn load_world(&self) -> LoadResult<WorldCatalog> {
        WorldLoader::load(&self.data_dir.join("world.ron"))
    }

    /// Load every catalog without cross-checking them.
    pub fn load_bundle(&self) -> LoadResult<ContentBundle> {
        let world = self.load_world()?;
        Ok(ContentBundle {
            config: self.load_config()?,
            skills: self.load_skills()?,
            items: self.load_items()?,
            enemies: self.load_enemies()?,
            location_types: self.load_location_types()?,
            locations: world.locations,
            zones: world.zones,
            start_location: world.start_location,
        })
    }

    /// Load, verify and build the content repository.
    ///
    /// Fails on the first structural error, or with every dangling reference
    /// listed when verification finds any.
    pub fn build_repository(&self) -> LoadResult<ContentRepository> {
        let bundle = self.load_bundle()?;

        let report = verify(&bundle);
        if !report.is_clean() {
            let details: Vec<String> = report.iter().map(ToString::to_string).collect();
            anyhow::bail!("{}:\n  {}", report, details.join("\n  "));
        }

        let repository = ContentRepository::build(bundle)?;
        tracing::info!(data_dir = %self.data_dir.display(), "content loaded");
        Ok(repository)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn missing_catalog_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentFactory::new(dir.path()).load_skills().unwrap_err();
        assert!(err.to_string().contains("skills.ron"));
    }
}
