//! Game configuration loader.

use std::path::Path;

use realm_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for tuning constants from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`GameConfig::default`].
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if !(0.0..=1.0).contains(&config.max_time_compression) {
            anyhow::bail!(
                "max_time_compression must be within [0, 1], got {}",
                config.max_time_compression
            );
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("max_time_compression = 0.25\n").unwrap();
        assert_eq!(config.max_time_compression, 0.25);
        assert_eq!(
            config.time_compression_skill,
            GameConfig::default().time_compression_skill
        );
    }

    #[test]
    fn rejects_out_of_range_compression() {
        let err = ConfigLoader::parse("max_time_compression = 1.5\n").unwrap_err();
        assert!(err.to_string().contains("max_time_compression"));
    }
}
