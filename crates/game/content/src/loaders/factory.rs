//! Content factory for loading a data directory.

use std::path::{Path, PathBuf};

use jrpg_core::{GameConfig, Item, Skill};

use crate::loaders::{
    ConfigLoader, Content, EncounterLoader, ItemLoader, LoadResult, PartyLoader, SkillLoader,
};
use crate::specs::{EncounterSpec, PartySpec};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml      (optional)
/// ├── skills.ron
/// ├── items.ron
/// ├── encounters.ron
/// └── party.ron
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

    /// Load battle configuration from `config.toml`, or the defaults when the
    /// file does not exist.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the skill catalog from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<Vec<Skill>> {
        SkillLoader::load(&self.data_dir.join("skills.ron"))
    }

    /// Load the item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<Item>> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Load enemy encounters from `encounters.ron`.
    pub fn load_encounters(&self) -> LoadResult<Vec<EncounterSpec>> {
        EncounterLoader::load(&self.data_dir.join("encounters.ron"))
    }

    /// Load the starting party from `party.ron`.
    pub fn load_party(&self) -> LoadResult<PartySpec> {
        PartyLoader::load(&self.data_dir.join("party.ron"))
    }

    /// Load every catalog and check that the starting party resolves.
    pub fn load(&self) -> LoadResult<Content> {
        let content = Content::new(
            self.load_config()?,
            self.load_skills()?,
            self.load_items()?,
            self.load_encounters()?,
            self.load_party()?,
        );
        content.new_game()?;

        tracing::info!(
            data_dir = %self.data_dir.display(),
            encounters = content.encounter_names().count(),
            "content loaded"
        );
        Ok(content)
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
    fn missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_config().unwrap(), GameConfig::default());
        assert!(factory.load_skills().is_err());
    }
}
