//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;

use jrpg_content::EncounterSpec;

/// Settings for one headless session.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Directory holding the RON/TOML content.
    pub content_dir: PathBuf,
    /// Battle RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Encounter fought by the session.
    pub encounter: String,
    /// Safety stop for a battle that never concludes.
    pub max_ticks: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../game/content/data"),
            seed: None,
            encounter: EncounterSpec::DEFAULT_NAME.to_string(),
            max_ticks: 10_000,
        }
    }
}

impl CliConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `JRPG_CONTENT_DIR` - Content data directory (default: the shipped `data/`)
    /// - `JRPG_SEED` - Battle RNG seed (default: random)
    /// - `JRPG_ENCOUNTER` - Encounter name (default: `slime_and_goblin`)
    /// - `JRPG_MAX_TICKS` - Tick limit per battle (default: 10000)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("JRPG_CONTENT_DIR") {
            config.content_dir = PathBuf::from(dir);
        }
        config.seed = read_env::<u64>("JRPG_SEED");
        if let Ok(encounter) = env::var("JRPG_ENCOUNTER") {
            config.encounter = encounter;
        }
        if let Some(ticks) = read_env::<usize>("JRPG_MAX_TICKS") {
            config.max_ticks = ticks.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
