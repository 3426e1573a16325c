//! Headless JRPG client binary.
//!
//! Loads content, builds a new-game party and fights the configured
//! encounter with the autopilot, logging every step to stderr.
//!
//! # Examples
//!
//! ```bash
//! JRPG_SEED=7 JRPG_ENCOUNTER=goblin_pack cargo run -p jrpg-client
//! RUST_LOG=jrpg_core=debug cargo run -p jrpg-client
//! ```

use anyhow::{Context, Result};
use jrpg_client::{
    Autopilot, BattleScene, CliConfig, ExplorationScene, GameState, SceneManager, Session,
};
use jrpg_content::ContentFactory;
use jrpg_core::BattleEngine;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::from_env();
    tracing::info!(content_dir = %config.content_dir.display(), seed = ?config.seed, "starting");

    let content = ContentFactory::new(&config.content_dir)
        .load()
        .with_context(|| format!("loading content from {}", config.content_dir.display()))?;
    content
        .formation(&config.encounter)
        .context("JRPG_ENCOUNTER names an unknown encounter")?;

    let engine = match config.seed {
        Some(seed) => BattleEngine::with_seed(content.config.clone(), seed),
        None => BattleEngine::from_entropy(content.config.clone()),
    };
    let mut session = Session::new(content)?;

    let mut manager = SceneManager::new();
    manager.register(
        GameState::Exploration,
        ExplorationScene::new(config.encounter.clone(), 1),
    );
    manager.register(
        GameState::Battle,
        BattleScene::new(engine, Autopilot::default(), config.max_ticks),
    );
    manager.run(GameState::Exploration, &mut session)?;

    match session.last_outcome {
        Some(outcome) => tracing::info!(%outcome, gold = session.party.gold(), "done"),
        None => tracing::warn!("no battle was fought"),
    }
    Ok(())
}
