//! Read-only snapshot of a battle for renderers.

use super::state::{BattleCommand, BattleState};
use super::turns::{BattleActor, CombatantRef};
use super::BattleEngine;
use crate::inventory::Inventory;
use crate::rng::RngOracle;
use crate::roster::{Combatant, Party};

/// Display data of one combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantView {
    pub name: String,
    pub level: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub mp: i32,
    pub max_mp: i32,
    pub alive: bool,
}

impl CombatantView {
    pub fn of(combatant: &impl Combatant) -> Self {
        let stats = combatant.stats();
        Self {
            name: combatant.name().to_string(),
            level: stats.level(),
            hp: stats.hp(),
            max_hp: stats.max_hp(),
            mp: stats.mp(),
            max_mp: stats.max_mp(),
            alive: stats.is_alive(),
        }
    }
}

/// One row of the skill or item submenu.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MenuOption {
    pub label: String,
    /// MP cost for skills, stack quantity for items.
    pub amount: i32,
    pub enabled: bool,
}

/// Everything a renderer needs to draw the current frame.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleView {
    pub state: BattleState,
    pub command: BattleCommand,
    pub skill_cursor: usize,
    pub item_cursor: usize,
    pub target_cursor: usize,
    pub current_actor: Option<BattleActor>,
    pub turn_order: Vec<BattleActor>,
    pub party: Vec<CombatantView>,
    pub enemies: Vec<CombatantView>,
    /// Skills of the acting member while in SKILL_SELECT, items in ITEM_SELECT.
    pub options: Vec<MenuOption>,
    /// Legal targets while in TARGET_SELECT.
    pub targets: Vec<CombatantRef>,
}

impl BattleView {
    /// The combatant under the target cursor, if any.
    pub fn highlighted_target(&self) -> Option<CombatantRef> {
        self.targets.get(self.target_cursor).copied()
    }
}

impl<R: RngOracle> BattleEngine<R> {
    /// Snapshot of the battle as it should be drawn this frame.
    pub fn view(&self, party: &Party, inventory: &Inventory) -> BattleView {
        let options = match self.state {
            BattleState::SkillSelect => self
                .acting_member(party)
                .map(|member| {
                    member
                        .skills()
                        .iter()
                        .map(|skill| MenuOption {
                            label: skill.name.clone(),
                            amount: skill.mp_cost,
                            enabled: member.stats().has_enough_mp(skill.mp_cost),
                        })
                        .collect()
                })
                .unwrap_or_default(),
            BattleState::ItemSelect => inventory
                .battle_usable()
                .into_iter()
                .map(|slot| MenuOption {
                    label: slot.item.name.clone(),
                    amount: slot.quantity as i32,
                    enabled: true,
                })
                .collect(),
            _ => Vec::new(),
        };

        let targets = if self.state == BattleState::TargetSelect {
            self.legal_targets(party)
        } else {
            Vec::new()
        };

        BattleView {
            state: self.state,
            command: self.command,
            skill_cursor: self.skill_cursor,
            item_cursor: self.item_cursor,
            target_cursor: self.target_cursor,
            current_actor: self.turn_order.current(),
            turn_order: self.turn_order.actors().to_vec(),
            party: party.active_members().iter().map(CombatantView::of).collect(),
            enemies: self
                .formation
                .as_ref()
                .map(|formation| formation.enemies().iter().map(CombatantView::of).collect())
                .unwrap_or_default(),
            options,
            targets,
        }
    }
}
