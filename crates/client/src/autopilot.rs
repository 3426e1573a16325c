//! Scripted player that presses keys based on the battle view.
//!
//! The autopilot always fights: it walks the command cursor to ATTACK, lets
//! a [`TargetingStrategy`] pick the enemy, and confirms the result screen.

use jrpg_core::engine::CombatantView;
use jrpg_core::{BattleCommand, BattleState, BattleView, CombatantRef, FrameInput, Side};

/// Chooses which legal target the autopilot should confirm.
pub trait TargetingStrategy {
    /// Returns `None` if no valid targets exist.
    fn select_target(&self, view: &BattleView) -> Option<CombatantRef>;

    fn name(&self) -> &'static str;
}

/// Target the combatant with the lowest HP percentage.
///
/// Ties go to the first target in roster order.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowestHealthStrategy;

impl TargetingStrategy for LowestHealthStrategy {
    fn select_target(&self, view: &BattleView) -> Option<CombatantRef> {
        view.targets
            .iter()
            .copied()
            .filter_map(|target| lookup(view, target).map(|c| (target, c)))
            .min_by_key(|(_, combatant)| health_percentage(combatant.hp, combatant.max_hp))
            .map(|(target, _)| target)
    }

    fn name(&self) -> &'static str {
        "Lowest Health"
    }
}

/// Target whatever sits first in the list.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstTargetStrategy;

impl TargetingStrategy for FirstTargetStrategy {
    fn select_target(&self, view: &BattleView) -> Option<CombatantRef> {
        view.targets.first().copied()
    }

    fn name(&self) -> &'static str {
        "First Target"
    }
}

pub struct Autopilot<S = LowestHealthStrategy> {
    strategy: S,
}

impl<S: TargetingStrategy> Autopilot<S> {
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Keys to hold for this frame.
    pub fn decide(&self, view: &BattleView) -> FrameInput {
        match view.state {
            BattleState::PlayerSelect if view.command == BattleCommand::Attack => {
                FrameInput::CONFIRM
            }
            BattleState::PlayerSelect => FrameInput::DOWN,
            // Attack-only: back out of any submenu.
            BattleState::SkillSelect | BattleState::ItemSelect => FrameInput::CANCEL,
            BattleState::TargetSelect => match self.strategy.select_target(view) {
                Some(wanted) if view.highlighted_target() == Some(wanted) => FrameInput::CONFIRM,
                Some(_) => FrameInput::DOWN,
                None => FrameInput::CANCEL,
            },
            state if state.is_terminal() => FrameInput::CONFIRM,
            _ => FrameInput::empty(),
        }
    }
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(LowestHealthStrategy)
    }
}

fn lookup(view: &BattleView, target: CombatantRef) -> Option<&CombatantView> {
    match target.side {
        Side::Party => view.party.get(target.index),
        Side::Enemy => view.enemies.get(target.index),
    }
}

/// HP as a whole percentage of max; an empty pool counts as 0.
fn health_percentage(current: i32, maximum: i32) -> i32 {
    if maximum <= 0 {
        return 0;
    }
    current * 100 / maximum
}
