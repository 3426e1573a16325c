//! Encounter catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique, read_file};
use crate::specs::EncounterSpec;

/// Encounter catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterCatalog {
    pub encounters: Vec<EncounterSpec>,
}

/// Loader for enemy encounters from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    /// Load encounter specs from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<EncounterSpec>> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<EncounterSpec>> {
        let catalog: EncounterCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter RON: {}", e))?;

        ensure_unique(
            "encounter",
            catalog.encounters.iter().map(|encounter| encounter.name.as_str()),
        )?;
        for encounter in &catalog.encounters {
            if encounter.enemies.is_empty() {
                anyhow::bail!("Encounter '{}' has no enemies", encounter.name);
            }
            if let Some(enemy) = encounter.enemies.iter().find(|enemy| enemy.level == 0) {
                anyhow::bail!(
                    "Enemy '{}' in encounter '{}' has level 0",
                    enemy.name,
                    encounter.name
                );
            }
        }

        Ok(catalog.encounters)
    }
}
