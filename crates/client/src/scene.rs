//! Scenes and the manager that switches between them.
//!
//! Exactly one scene is active. Switching runs the old scene's exit hook and
//! then the new scene's enter hook, both against the shared [`Session`].

use anyhow::{Context, Result};
use strum::{Display, EnumCount};

use crate::session::Session;

/// Top-level mode of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumCount)]
pub enum GameState {
    Exploration,
    Battle,
}

impl GameState {
    fn slot(self) -> usize {
        self as usize
    }
}

/// What a scene asks the manager to do after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneSignal {
    Stay,
    Switch(GameState),
    Quit,
}

pub trait Scene {
    fn name(&self) -> &'static str;

    fn on_enter(&mut self, session: &mut Session) -> Result<()>;

    fn on_exit(&mut self, session: &mut Session);

    fn update(&mut self, session: &mut Session) -> Result<SceneSignal>;
}

/// Owns one scene per [`GameState`] and drives the active one.
pub struct SceneManager {
    scenes: [Option<Box<dyn Scene>>; GameState::COUNT],
    current: Option<GameState>,
    previous: Option<GameState>,
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneManager {
    pub fn new() -> Self {
        Self {
            scenes: [None, None],
            current: None,
            previous: None,
        }
    }

    /// Registers the scene for `state`, replacing any earlier one.
    pub fn register(&mut self, state: GameState, scene: impl Scene + 'static) {
        self.scenes[state.slot()] = Some(Box::new(scene));
    }

    pub fn current_state(&self) -> Option<GameState> {
        self.current
    }

    pub fn previous_state(&self) -> Option<GameState> {
        self.previous
    }

    /// Leaves the active scene and enters the one registered for `state`.
    pub fn change_state(&mut self, state: GameState, session: &mut Session) -> Result<()> {
        if self.scenes[state.slot()].is_none() {
            anyhow::bail!("No scene registered for {}", state);
        }

        if let Some(current) = self.current {
            if let Some(scene) = self.scenes[current.slot()].as_mut() {
                scene.on_exit(session);
            }
            self.previous = Some(current);
        }

        self.current = Some(state);
        let scene = self.scenes[state.slot()]
            .as_mut()
            .context("scene vanished during a state change")?;
        tracing::debug!(from = ?self.previous, to = %state, scene = scene.name(), "state change");
        scene.on_enter(session)
    }

    /// Ticks the active scene once and applies its signal.
    ///
    /// Returns false once the active scene asks to quit.
    pub fn update(&mut self, session: &mut Session) -> Result<bool> {
        let current = self.current.context("SceneManager has no active scene")?;
        let scene = self.scenes[current.slot()]
            .as_mut()
            .context("active scene is not registered")?;

        match scene.update(session)? {
            SceneSignal::Stay => Ok(true),
            SceneSignal::Switch(next) => {
                self.change_state(next, session)?;
                Ok(true)
            }
            SceneSignal::Quit => {
                scene.on_exit(session);
                tracing::info!(scene = scene.name(), "session finished");
                Ok(false)
            }
        }
    }

    /// Enters `initial` and ticks until a scene quits.
    pub fn run(&mut self, initial: GameState, session: &mut Session) -> Result<()> {
        self.change_state(initial, session)?;
        while self.update(session)? {}
        Ok(())
    }
}
