//! Starting party loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::specs::PartySpec;

/// Loader for the new-game party from RON files.
pub struct PartyLoader;

impl PartyLoader {
    /// Load the starting party spec from a RON file.
    ///
    /// Names are not resolved here; see [`crate::Content::new_game`].
    pub fn load(path: &Path) -> LoadResult<PartySpec> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<PartySpec> {
        let spec: PartySpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse party RON: {}", e))?;

        if spec.members.is_empty() {
            anyhow::bail!("Starting party has no members");
        }
        Ok(spec)
    }
}
