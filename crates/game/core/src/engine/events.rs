//! Battle log entries.
//!
//! The engine records what happened during each tick; hosts drain the log to
//! drive messages, animations or tests.

use super::state::BattleOutcome;
use super::turns::CombatantRef;
use crate::combat::AttackOutcome;

/// Why a turn resolved without effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkipReason {
    /// The acting combatant died before its action resolved.
    ActorDown,
    /// The single target died before the action resolved.
    TargetDown,
    /// Nobody was left to target.
    NoTarget,
    /// The chosen item was gone from the inventory.
    ItemMissing,
}

/// Why a menu confirm was ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rejection {
    InsufficientMp { skill: String, cost: i32, available: i32 },
    NoSkills,
    NoUsableItems,
    NoTarget,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    BattleStarted {
        enemies: usize,
    },
    RoundStarted {
        actors: usize,
    },
    Attacked {
        actor: CombatantRef,
        target: CombatantRef,
        outcome: AttackOutcome,
    },
    SkillCast {
        actor: CombatantRef,
        skill: String,
        mp_cost: i32,
    },
    SkillDamage {
        target: CombatantRef,
        damage: i32,
    },
    Healed {
        target: CombatantRef,
        amount: i32,
    },
    /// Buff and debuff skills spend MP but have no effect yet.
    SkillNoEffect {
        actor: CombatantRef,
        skill: String,
    },
    ItemUsed {
        actor: CombatantRef,
        target: CombatantRef,
        item: String,
        effective: bool,
    },
    Defended {
        actor: CombatantRef,
    },
    FleeAttempt {
        actor: CombatantRef,
        success: bool,
    },
    TurnSkipped {
        actor: CombatantRef,
        reason: SkipReason,
    },
    SelectionRejected(Rejection),
    BattleEnded {
        outcome: BattleOutcome,
    },
    Rewarded {
        experience: u32,
        gold: u32,
        levels_gained: u32,
    },
}
