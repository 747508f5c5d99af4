//! Utility functions for xtask commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use realm_content::{ContentFactory, ContentRepository};
use realm_runtime::{HeroProfile, RuntimeConfig};

/// Content directory from the flag, else `CONTENT_DATA_DIR`, else the
/// bundled sample data.
pub fn data_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(|| RuntimeConfig::from_env().data_dir)
}

pub fn load_repository(data_dir: &Path) -> Result<ContentRepository> {
    ContentFactory::new(data_dir)
        .build_repository()
        .with_context(|| format!("Failed to load content from {}", data_dir.display()))
}

/// Reads a hero profile from JSON, filling in catalog max levels.
///
/// Without a path the hero starts at level 0 everywhere.
pub fn load_hero(path: Option<&Path>, content: &ContentRepository) -> Result<HeroProfile> {
    let catalog = HeroProfile::from_catalog(content);
    let Some(path) = path else {
        return Ok(catalog);
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read hero file: {}", path.display()))?;
    let mut hero: HeroProfile = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse hero JSON: {}", path.display()))?;

    for (skill, max) in catalog.max_levels {
        hero.max_levels.entry(skill).or_insert(max);
    }
    Ok(hero)
}

/// Session seed from the flag, else `GAME_SEED`, else random.
pub fn seed(flag: Option<u64>) -> u64 {
    match flag {
        Some(seed) => seed,
        None => RuntimeConfig::from_env().resolve_seed(),
    }
}
