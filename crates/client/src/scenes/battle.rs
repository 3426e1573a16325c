//! Adapter running a [`BattleEngine`] as a scene.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use jrpg_content::EncounterSpec;
use jrpg_core::{BattleContext, BattleEngine, PcgRng, RngOracle};

use crate::autopilot::{Autopilot, LowestHealthStrategy, TargetingStrategy};
use crate::narrate::describe;
use crate::scene::{GameState, Scene, SceneSignal};
use crate::session::Session;

pub struct BattleScene<R: RngOracle = PcgRng, S = LowestHealthStrategy> {
    engine: BattleEngine<R>,
    pilot: Autopilot<S>,
    won: Rc<Cell<Option<bool>>>,
    ticks: usize,
    max_ticks: usize,
}

impl<R: RngOracle, S: TargetingStrategy> BattleScene<R, S> {
    pub fn new(mut engine: BattleEngine<R>, pilot: Autopilot<S>, max_ticks: usize) -> Self {
        let won = Rc::new(Cell::new(None));
        let sink = Rc::clone(&won);
        engine.set_on_battle_end(move |result| sink.set(Some(result)));

        Self {
            engine,
            pilot,
            won,
            ticks: 0,
            max_ticks,
        }
    }

    pub fn engine(&self) -> &BattleEngine<R> {
        &self.engine
    }

    /// Result reported by the engine for the last battle.
    pub fn won(&self) -> Option<bool> {
        self.won.get()
    }

    fn narrate(&mut self, session: &Session) {
        let view = self.engine.view(&session.party, &session.inventory);
        for event in self.engine.drain_events() {
            if let Some(line) = describe(&event, &view) {
                tracing::info!(target: "battle", "{line}");
            }
        }
    }
}

impl<R: RngOracle, S: TargetingStrategy> Scene for BattleScene<R, S> {
    fn name(&self) -> &'static str {
        "battle"
    }

    fn on_enter(&mut self, session: &mut Session) -> Result<()> {
        let encounter = session
            .next_encounter
            .take()
            .unwrap_or_else(|| EncounterSpec::DEFAULT_NAME.to_string());
        let formation = session.content.formation(&encounter)?;

        self.won.set(None);
        self.ticks = 0;
        self.engine.set_enemy_formation(formation);
        self.engine.on_enter(&session.party);

        tracing::info!(%encounter, strategy = self.pilot.strategy().name(), "battle begins");
        self.narrate(session);
        Ok(())
    }

    fn on_exit(&mut self, _session: &mut Session) {
        self.engine.on_exit();
    }

    fn update(&mut self, session: &mut Session) -> Result<SceneSignal> {
        self.ticks += 1;
        if self.ticks > self.max_ticks {
            anyhow::bail!(
                "Battle still in {} after {} ticks",
                self.engine.state(),
                self.max_ticks
            );
        }

        let input = self
            .pilot
            .decide(&self.engine.view(&session.party, &session.inventory));
        let mut ctx = BattleContext::new(&mut session.party, &mut session.inventory);
        let outcome = self.engine.update(&mut ctx, &input);
        self.narrate(session);

        let Some(outcome) = outcome else {
            return Ok(SceneSignal::Stay);
        };

        session.last_outcome = Some(outcome);
        session.battles_fought += 1;
        tracing::info!(%outcome, won = ?self.won.get(), ticks = self.ticks, "battle concluded");
        Ok(SceneSignal::Switch(GameState::Exploration))
    }
}
