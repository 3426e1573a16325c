//! Content loaders for reading game data from files.
//!
//! Catalogs are RON, the battle configuration is TOML. Every loader returns
//! [`LoadResult`] with the offending path in the error message.

pub mod config;
pub mod content;
pub mod encounter;
pub mod factory;
pub mod item;
pub mod party;
pub mod skill;

pub use config::ConfigLoader;
pub use content::Content;
pub use encounter::{EncounterCatalog, EncounterLoader};
pub use factory::ContentFactory;
pub use item::{ItemCatalog, ItemLoader};
pub use party::PartyLoader;
pub use skill::{SkillCatalog, SkillLoader};

use std::collections::HashSet;
use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Fails on the first name that appears twice.
pub(crate) fn ensure_unique<'a>(
    kind: &str,
    names: impl IntoIterator<Item = &'a str>,
) -> LoadResult<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            anyhow::bail!("Duplicate {} '{}'", kind, name);
        }
    }
    Ok(())
}
