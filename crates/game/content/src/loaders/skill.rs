//! Skill catalog loader.

use std::path::Path;

use jrpg_core::Skill;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique, read_file};

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<Skill>,
}

/// Loader for the skill catalog from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load the skill catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<Skill>> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<Skill>> {
        let catalog: SkillCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        ensure_unique("skill", catalog.skills.iter().map(|skill| skill.name.as_str()))?;
        if let Some(skill) = catalog
            .skills
            .iter()
            .find(|skill| skill.mp_cost < 0 || skill.power < 0)
        {
            anyhow::bail!("Skill '{}' has a negative cost or power", skill.name);
        }

        Ok(catalog.skills)
    }
}
