//! EXECUTING_ACTION: applies one captured action.
//!
//! Liveness is checked again right before anything is applied. If the actor
//! or a single target died since the selection was made, the turn is spent
//! without effect (and without paying MP or items).

use super::events::{BattleEvent, SkipReason};
use super::state::BattleState;
use super::turns::{CombatantRef, Side};
use super::{BattleContext, BattleEngine, PendingAction};
use crate::catalog::{Item, ItemEffect, Skill, SkillType, TargetType};
use crate::combat::{AttackOutcome, resolve_attack};
use crate::config::GameConfig;
use crate::rng::RngOracle;
use crate::roster::{Combatant, EnemyFormation, Party, apply_consumable};

impl<R: RngOracle> BattleEngine<R> {
    pub(super) fn execute_action(&mut self, ctx: &mut BattleContext<'_>) {
        let pending = self.pending.take();
        let target = self.target.take();

        let Some(actor) = self.turn_order.current() else {
            tracing::warn!(index = self.turn_order.index(), "no actor to execute for");
            self.state = BattleState::TurnEnd;
            return;
        };
        let actor = actor.combatant();

        let fled = if !self.is_alive(ctx.party, actor) {
            self.skip(actor, SkipReason::ActorDown);
            false
        } else {
            match pending {
                Some(PendingAction::Attack | PendingAction::EnemyAttack) => {
                    self.physical_attack(ctx.party, actor, target);
                    false
                }
                Some(PendingAction::Skill(skill)) => {
                    self.cast_skill(ctx.party, actor, &skill, target);
                    false
                }
                Some(PendingAction::Item(item)) => {
                    self.use_item(ctx, actor, &item, target);
                    false
                }
                Some(PendingAction::Defend) => {
                    // No mitigation yet: defending only spends the turn.
                    self.events.push(BattleEvent::Defended { actor });
                    false
                }
                Some(PendingAction::Run) => self.attempt_flee(actor),
                None => {
                    tracing::warn!(?actor, "executing without a pending action");
                    false
                }
            }
        };

        self.turn_order.advance();
        self.state = if fled {
            BattleState::Fled
        } else {
            BattleState::TurnEnd
        };
    }

    fn physical_attack(
        &mut self,
        party: &mut Party,
        actor: CombatantRef,
        target: Option<CombatantRef>,
    ) {
        let Some(target) = target else {
            self.skip(actor, SkipReason::NoTarget);
            return;
        };

        let result = match self.formation.as_mut() {
            Some(formation) => {
                strike(party, formation, actor, target, &mut self.rng, &self.config)
            }
            None => Err(SkipReason::NoTarget),
        };

        match result {
            Ok(outcome) => {
                tracing::debug!(?actor, ?target, ?outcome, "attack resolved");
                self.events.push(BattleEvent::Attacked {
                    actor,
                    target,
                    outcome,
                });
            }
            Err(reason) => self.skip(actor, reason),
        }
    }

    fn cast_skill(
        &mut self,
        party: &mut Party,
        actor: CombatantRef,
        skill: &Skill,
        target: Option<CombatantRef>,
    ) {
        match skill.kind {
            SkillType::OffensiveMagic => {
                let Some(target) = target.filter(|target| target.side == Side::Enemy) else {
                    self.skip(actor, SkipReason::NoTarget);
                    return;
                };
                if !self.is_alive(party, target) {
                    self.skip(actor, SkipReason::TargetDown);
                    return;
                }

                self.spend_mp(party, actor, skill);
                if let Some(enemy) = self
                    .formation
                    .as_mut()
                    .and_then(|formation| formation.enemy_mut(target.index))
                {
                    enemy.stats_mut().take_damage(skill.power);
                }
                self.events.push(BattleEvent::SkillDamage {
                    target,
                    damage: skill.power,
                });
            }
            SkillType::HealingMagic if skill.is_multi_target() => {
                self.spend_mp(party, actor, skill);
                // Every active member, fallen ones included.
                for index in 0..party.active_count() {
                    self.heal_member(party, index, skill.power);
                }
            }
            SkillType::HealingMagic => {
                let recipient = match skill.target {
                    TargetType::SelfOnly => Some(actor),
                    _ => target.filter(|target| target.side == Side::Party),
                };
                let Some(recipient) = recipient else {
                    self.skip(actor, SkipReason::NoTarget);
                    return;
                };
                if !self.is_alive(party, recipient) {
                    self.skip(actor, SkipReason::TargetDown);
                    return;
                }

                self.spend_mp(party, actor, skill);
                self.heal_member(party, recipient.index, skill.power);
            }
            SkillType::Buff | SkillType::Debuff => {
                self.spend_mp(party, actor, skill);
                self.events.push(BattleEvent::SkillNoEffect {
                    actor,
                    skill: skill.name.clone(),
                });
            }
        }
    }

    fn spend_mp(&mut self, party: &mut Party, actor: CombatantRef, skill: &Skill) {
        if let Some(caster) = party.active_member_mut(actor.index) {
            caster.stats_mut().use_mp(skill.mp_cost);
        }
        tracing::debug!(?actor, skill = %skill.name, mp_cost = skill.mp_cost, "skill cast");
        self.events.push(BattleEvent::SkillCast {
            actor,
            skill: skill.name.clone(),
            mp_cost: skill.mp_cost,
        });
    }

    fn heal_member(&mut self, party: &mut Party, index: usize, power: i32) {
        let Some(member) = party.active_member_mut(index) else {
            return;
        };
        let before = member.stats().hp();
        member.stats_mut().heal(power);
        self.events.push(BattleEvent::Healed {
            target: CombatantRef::party(index),
            amount: member.stats().hp() - before,
        });
    }

    fn use_item(
        &mut self,
        ctx: &mut BattleContext<'_>,
        actor: CombatantRef,
        item: &Item,
        target: Option<CombatantRef>,
    ) {
        let Some(target) = target.filter(|target| target.side == Side::Party) else {
            self.skip(actor, SkipReason::NoTarget);
            return;
        };
        let Some(member) = ctx.party.active_member_mut(target.index) else {
            self.skip(actor, SkipReason::NoTarget);
            return;
        };
        // Revive is the one effect meant for the fallen.
        if item.effect() != ItemEffect::Revive && member.stats().is_dead() {
            self.skip(actor, SkipReason::TargetDown);
            return;
        }

        if let Err(err) = ctx.inventory.remove_item(&item.name, 1) {
            tracing::warn!(item = %item.name, %err, "selected item no longer in inventory");
            self.skip(actor, SkipReason::ItemMissing);
            return;
        }

        let effective = apply_consumable(member.stats_mut(), item);
        tracing::debug!(?actor, ?target, item = %item.name, effective, "item used");
        self.events.push(BattleEvent::ItemUsed {
            actor,
            target,
            item: item.name.clone(),
            effective,
        });
    }

    fn attempt_flee(&mut self, actor: CombatantRef) -> bool {
        let success = self.rng.roll_percent(self.config.flee_chance);
        tracing::debug!(success, "flee attempt");
        self.events.push(BattleEvent::FleeAttempt { actor, success });
        success
    }

    pub(super) fn skip(&mut self, actor: CombatantRef, reason: SkipReason) {
        tracing::debug!(?actor, ?reason, "turn skipped");
        self.events.push(BattleEvent::TurnSkipped { actor, reason });
    }

    fn is_alive(&self, party: &Party, who: CombatantRef) -> bool {
        match who.side {
            Side::Party => party.active_member(who.index).is_some_and(|m| m.is_alive()),
            Side::Enemy => self
                .formation
                .as_ref()
                .and_then(|formation| formation.enemy(who.index))
                .is_some_and(|enemy| enemy.is_alive()),
        }
    }
}

/// Resolves a physical attack between the two rosters.
fn strike(
    party: &mut Party,
    formation: &mut EnemyFormation,
    actor: CombatantRef,
    target: CombatantRef,
    rng: &mut impl RngOracle,
    config: &GameConfig,
) -> Result<AttackOutcome, SkipReason> {
    match (actor.side, target.side) {
        (Side::Party, Side::Enemy) => {
            let attacker = party.active_member(actor.index).ok_or(SkipReason::ActorDown)?;
            let defender = formation.enemy_mut(target.index).ok_or(SkipReason::NoTarget)?;
            if !defender.is_alive() {
                return Err(SkipReason::TargetDown);
            }
            Ok(resolve_attack(attacker.stats(), defender.stats_mut(), rng, config))
        }
        (Side::Enemy, Side::Party) => {
            let attacker = formation.enemy(actor.index).ok_or(SkipReason::ActorDown)?;
            let defender = party.active_member_mut(target.index).ok_or(SkipReason::NoTarget)?;
            if !defender.is_alive() {
                return Err(SkipReason::TargetDown);
            }
            Ok(resolve_attack(attacker.stats(), defender.stats_mut(), rng, config))
        }
        _ => Err(SkipReason::NoTarget),
    }
}
