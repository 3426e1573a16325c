//! Item catalog loader.

use std::path::Path;

use jrpg_core::{Item, ItemKind};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<Item>,
}

/// Loader for the item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load the item catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<Item>> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<Item>> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        ensure_unique("item", catalog.items.iter().map(|item| item.name.as_str()))?;
        if let Some(item) = catalog
            .items
            .iter()
            .find(|item| matches!(item.kind, ItemKind::Consumable { power, .. } if power < 0))
        {
            anyhow::bail!("Item '{}' has negative power", item.name);
        }

        Ok(catalog.items)
    }
}
