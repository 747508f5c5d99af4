//! Runtime configuration read from the process environment.

use std::env;
use std::path::PathBuf;

/// Where content lives and how the session is seeded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Directory holding `config.toml` and the RON catalogs.
    pub data_dir: PathBuf,
    /// Fixed seed for reproducible sessions. `None` draws a random one.
    pub game_seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(Self::DEFAULT_DATA_DIR),
            game_seed: None,
        }
    }
}

impl RuntimeConfig {
    pub const DEFAULT_DATA_DIR: &'static str = "crates/game/content/data";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CONTENT_DATA_DIR` - Content directory (default: `crates/game/content/data`)
    /// - `GAME_SEED` - Session seed (default: random)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = env::var_os("CONTENT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(seed) = read_env::<u64>("GAME_SEED") {
            config.game_seed = Some(seed);
        }

        config
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_seed(mut self, game_seed: u64) -> Self {
        self.game_seed = Some(game_seed);
        self
    }

    /// The configured seed, or a fresh random one.
    pub fn resolve_seed(&self) -> u64 {
        self.game_seed.unwrap_or_else(|| {
            let seed = rand::random::<u64>();
            tracing::info!(seed, "no GAME_SEED configured, drew a random seed");
            seed
        })
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_seed_is_used_verbatim() {
        let config = RuntimeConfig::default().with_seed(42);
        assert_eq!(config.resolve_seed(), 42);
        assert_eq!(config.resolve_seed(), 42);
    }

    #[test]
    fn builders_override_defaults() {
        let config = RuntimeConfig::default().with_data_dir("/tmp/content");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/content"));
        assert_eq!(config.game_seed, None);
    }
}
