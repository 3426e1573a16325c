//! The two scenes of a headless session.

mod battle;
mod exploration;

pub use battle::BattleScene;
pub use exploration::ExplorationScene;
