//! Battle log lines for the terminal.

use jrpg_core::engine::{Rejection, SkipReason};
use jrpg_core::{AttackOutcome, BattleEvent, BattleView, CombatantRef, Side};

fn name_of(view: &BattleView, who: CombatantRef) -> &str {
    let roster = match who.side {
        Side::Party => &view.party,
        Side::Enemy => &view.enemies,
    };
    roster
        .get(who.index)
        .map_or("someone", |combatant| combatant.name.as_str())
}

/// Renders one event as a sentence, using `view` for names.
///
/// Returns `None` for bookkeeping events nobody needs to read.
pub fn describe(event: &BattleEvent, view: &BattleView) -> Option<String> {
    let name = |who| name_of(view, who);
    let line = match event {
        BattleEvent::BattleStarted { enemies } => format!("{enemies} enemies appear!"),
        BattleEvent::RoundStarted { .. } => return None,
        BattleEvent::Attacked {
            actor,
            target,
            outcome,
        } => match outcome {
            AttackOutcome::Miss => format!("{} attacks {} but misses.", name(*actor), name(*target)),
            AttackOutcome::Hit {
                damage,
                critical: true,
            } => format!("Critical! {} hits {} for {damage}.", name(*actor), name(*target)),
            AttackOutcome::Hit { damage, .. } => {
                format!("{} hits {} for {damage}.", name(*actor), name(*target))
            }
        },
        BattleEvent::SkillCast { actor, skill, .. } => format!("{} casts {skill}.", name(*actor)),
        BattleEvent::SkillDamage { target, damage } => {
            format!("{} takes {damage} damage.", name(*target))
        }
        BattleEvent::Healed { target, amount } => {
            format!("{} recovers {amount} HP.", name(*target))
        }
        BattleEvent::SkillNoEffect { skill, .. } => format!("{skill} has no effect."),
        BattleEvent::ItemUsed {
            actor,
            target,
            item,
            effective,
        } => {
            let tail = if *effective { "" } else { " Nothing happens." };
            format!("{} uses {item} on {}.{tail}", name(*actor), name(*target))
        }
        BattleEvent::Defended { actor } => format!("{} defends.", name(*actor)),
        BattleEvent::FleeAttempt { success: true, .. } => "Got away safely!".to_string(),
        BattleEvent::FleeAttempt { success: false, .. } => "Couldn't escape!".to_string(),
        BattleEvent::TurnSkipped { actor, reason } => match reason {
            SkipReason::ActorDown => return None,
            SkipReason::TargetDown => format!("{}'s target is already down.", name(*actor)),
            SkipReason::NoTarget => format!("{} has no one to act on.", name(*actor)),
            SkipReason::ItemMissing => format!("{} fumbles for a missing item.", name(*actor)),
        },
        BattleEvent::SelectionRejected(rejection) => match rejection {
            Rejection::InsufficientMp { skill, cost, available } => {
                format!("Not enough MP for {skill} ({available}/{cost}).")
            }
            Rejection::NoSkills => "No skills available.".to_string(),
            Rejection::NoUsableItems => "No usable items.".to_string(),
            Rejection::NoTarget => "No target.".to_string(),
        },
        BattleEvent::BattleEnded { outcome } => format!("Battle over: {outcome}."),
        BattleEvent::Rewarded {
            experience,
            gold,
            levels_gained,
        } => {
            let mut line = format!("Gained {experience} EXP and {gold} gold.");
            if *levels_gained > 0 {
                line.push_str(&format!(" {levels_gained} level(s) up!"));
            }
            line
        }
    };
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jrpg_core::{
        AiBehavior, BattleEngine, CharacterClass, Enemy, EnemyFormation, GameConfig, Inventory,
        Party, PartyMember,
    };

    fn view() -> BattleView {
        let mut party = Party::new();
        party
            .add_member(PartyMember::new("Aldric", CharacterClass::Warrior, 1))
            .unwrap();
        let mut engine = BattleEngine::with_seed(GameConfig::default(), 1);
        engine.set_enemy_formation(
            EnemyFormation::new().with_enemy(Enemy::new("Slime", 1, AiBehavior::Aggressive)),
        );
        engine.on_enter(&party);
        engine.view(&party, &Inventory::default())
    }

    #[test]
    fn names_come_from_the_view() {
        let line = describe(
            &BattleEvent::Attacked {
                actor: CombatantRef::party(0),
                target: CombatantRef::enemy(0),
                outcome: AttackOutcome::Hit {
                    damage: 6,
                    critical: false,
                },
            },
            &view(),
        );
        assert_eq!(line.as_deref(), Some("Aldric hits Slime for 6."));
    }

    #[test]
    fn bookkeeping_is_silent() {
        assert_eq!(describe(&BattleEvent::RoundStarted { actors: 2 }, &view()), None);
    }

    #[test]
    fn rewards_mention_level_ups() {
        let line = describe(
            &BattleEvent::Rewarded {
                experience: 150,
                gold: 54,
                levels_gained: 1,
            },
            &view(),
        )
        .unwrap();
        assert!(line.ends_with("1 level(s) up!"), "{line}");
    }
}
