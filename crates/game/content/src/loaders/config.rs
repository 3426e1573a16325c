//! Battle configuration loader.

use std::path::Path;

use jrpg_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Fields missing from the file keep their default values.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.hit_chance > 100 || config.crit_chance > 100 || config.flee_chance > 100 {
            anyhow::bail!("Chances are percentages and must not exceed 100");
        }
        if config.initiative_spread == 0 {
            anyhow::bail!("initiative_spread must be at least 1");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_keep_defaults() {
        let config = ConfigLoader::parse("flee_chance = 75\nstarting_gold = 1000\n").unwrap();

        assert_eq!(config.flee_chance, 75);
        assert_eq!(config.starting_gold, 1000);
        assert_eq!(config.hit_chance, GameConfig::DEFAULT_HIT_CHANCE);
        assert_eq!(config.inventory_slots, GameConfig::DEFAULT_INVENTORY_SLOTS);
    }

    #[test]
    fn empty_file_is_the_default_config() {
        assert_eq!(ConfigLoader::parse("").unwrap(), GameConfig::default());
    }

    #[test]
    fn rejects_impossible_odds() {
        assert!(ConfigLoader::parse("crit_chance = 150").is_err());
        assert!(ConfigLoader::parse("initiative_spread = 0").is_err());
    }

    #[test]
    fn load_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "hit_chance = \"often\"").unwrap();

        let err = ConfigLoader::load(&path).unwrap_err().to_string();
        assert!(err.contains("config.toml"), "{err}");
    }
}
