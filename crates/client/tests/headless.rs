use std::path::PathBuf;

use jrpg_client::{
    Autopilot, BattleScene, ExplorationScene, GameState, SceneManager, Session,
};
use jrpg_content::{ContentFactory, EncounterSpec};
use jrpg_core::{BattleEngine, BattleOutcome};

fn shipped_session() -> Session {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../game/content/data");
    let content = ContentFactory::new(dir).load().unwrap();
    Session::new(content).unwrap()
}

fn play(seed: u64, encounter: &str, battles: u32) -> Session {
    let mut session = shipped_session();
    let engine = BattleEngine::with_seed(session.content.config.clone(), seed);

    let mut manager = SceneManager::new();
    manager.register(GameState::Exploration, ExplorationScene::new(encounter, battles));
    manager.register(GameState::Battle, BattleScene::new(engine, Autopilot::default(), 10_000));
    manager.run(GameState::Exploration, &mut session).unwrap();
    session
}

#[test]
fn starting_party_beats_the_default_encounter() {
    let session = play(42, EncounterSpec::DEFAULT_NAME, 1);

    assert_eq!(session.last_outcome, Some(BattleOutcome::Victory));
    assert_eq!(session.battles_fought, 1);
    assert_eq!(session.party.gold(), 500 + 5 + 11);
}

#[test]
fn sessions_replay_under_a_seed() {
    let a = play(9, "goblin_pack", 2);
    let b = play(9, "goblin_pack", 2);

    assert_eq!(a.last_outcome, b.last_outcome);
    assert_eq!(a.party, b.party);
    assert_eq!(a.inventory, b.inventory);
}
