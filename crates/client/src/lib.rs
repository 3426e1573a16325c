//! Headless host for the battle engine.
//!
//! # Architecture
//!
//! ```text
//! SceneManager
//!   ├─→ ExplorationScene (between battles: status, field items, next encounter)
//!   └─→ BattleScene      (BattleEngine driven by an Autopilot)
//!         └─→ Session    (content, party, inventory shared by all scenes)
//! ```
//!
//! Everything the player would see is written to the `tracing` log.

pub mod autopilot;
pub mod config;
pub mod narrate;
pub mod scene;
pub mod scenes;
pub mod session;

pub use autopilot::{Autopilot, FirstTargetStrategy, LowestHealthStrategy, TargetingStrategy};
pub use config::CliConfig;
pub use scene::{GameState, Scene, SceneManager, SceneSignal};
pub use scenes::{BattleScene, ExplorationScene};
pub use session::Session;
