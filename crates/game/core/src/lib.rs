//! Turn-based battle and character progression rules.
//!
//! `jrpg-core` holds the deterministic parts of the game: stat growth and
//! levelling, the skill and item catalog types, the party and enemy
//! rosters, the shared inventory and the battle state machine. It performs
//! no I/O; hosts feed it input through [`engine::InputSource`] and read
//! results from [`engine::BattleView`] and the battle event log.
//!
//! All battle randomness comes from an [`rng::RngOracle`] owned by the
//! [`engine::BattleEngine`], so a seeded engine replays exactly.
pub mod catalog;
pub mod combat;
pub mod config;
pub mod engine;
pub mod error;
pub mod inventory;
pub mod rng;
pub mod roster;
pub mod stats;

pub use catalog::{
    Equipment, EquipmentType, Item, ItemEffect, ItemKind, ItemType, Skill, SkillType, TargetType,
};
pub use combat::{AttackOutcome, calculate_damage, resolve_attack};
pub use config::GameConfig;
pub use engine::{
    BattleActor, BattleCommand, BattleContext, BattleEngine, BattleEvent, BattleKey,
    BattleOutcome, BattleState, BattleView, CombatantRef, FrameInput, InputSource, Side,
};
pub use error::{ErrorSeverity, GameError};
pub use inventory::{Inventory, InventoryError, InventorySlot};
pub use rng::{PcgRng, RngOracle, ScriptedRng};
pub use roster::{
    AiBehavior, CharacterClass, Combatant, Enemy, EnemyFormation, EquipError, ItemUseError,
    Loadout, Party, PartyError, PartyMember,
};
pub use stats::{BaseStats, StatBlock, StatBonuses};
