//! Initiative-ordered turn scheduling.
//!
//! A round's order is built once from every living combatant and walked
//! front to back. It is never patched: someone who dies mid-round keeps their
//! slot (their turn becomes a no-op) and is simply absent from the next
//! rebuild, and someone revived mid-round waits for the next one.

use strum::Display;

use crate::rng::RngOracle;
use crate::roster::{Combatant, EnemyFormation, Party};

/// Which roster a combatant belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Party,
    Enemy,
}

/// Stable reference to a combatant: roster side plus index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantRef {
    pub side: Side,
    pub index: usize,
}

impl CombatantRef {
    pub const fn party(index: usize) -> Self {
        Self {
            side: Side::Party,
            index,
        }
    }

    pub const fn enemy(index: usize) -> Self {
        Self {
            side: Side::Enemy,
            index,
        }
    }
}

/// One entry of a round's turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleActor {
    pub side: Side,
    pub index: usize,
    pub initiative: i32,
}

impl BattleActor {
    pub fn combatant(&self) -> CombatantRef {
        CombatantRef {
            side: self.side,
            index: self.index,
        }
    }

    pub fn is_party_member(&self) -> bool {
        self.side == Side::Party
    }
}

/// Errors that can occur during turn operations
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("no combatants are alive")]
    NoLivingCombatants,
}

/// The current round's order and the walking index into it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnOrder {
    actors: Vec<BattleActor>,
    index: usize,
}

impl TurnOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the order from every living combatant and resets the index.
    ///
    /// Initiative is effective attack plus a roll in `[0, spread)`. The sort
    /// is stable and descending; ties keep collection order (party first,
    /// then enemies), which callers must not rely on.
    pub fn rebuild(
        &mut self,
        party: &Party,
        formation: Option<&EnemyFormation>,
        rng: &mut impl RngOracle,
        spread: u32,
    ) -> Result<(), TurnError> {
        self.actors.clear();
        self.index = 0;

        let max_roll = spread.saturating_sub(1);
        let mut initiative = |attack: i32| attack + rng.range(0, max_roll) as i32;

        for (index, member) in party.active_members().iter().enumerate() {
            if member.is_alive() {
                self.actors.push(BattleActor {
                    side: Side::Party,
                    index,
                    initiative: initiative(member.stats().attack()),
                });
            }
        }

        let enemies = formation.map(EnemyFormation::enemies).unwrap_or_default();
        for (index, enemy) in enemies.iter().enumerate() {
            if enemy.is_alive() {
                self.actors.push(BattleActor {
                    side: Side::Enemy,
                    index,
                    initiative: initiative(enemy.stats().attack()),
                });
            }
        }

        self.actors.sort_by(|a, b| b.initiative.cmp(&a.initiative));

        tracing::debug!(actors = self.actors.len(), "turn order rebuilt");
        if self.actors.is_empty() {
            return Err(TurnError::NoLivingCombatants);
        }
        Ok(())
    }

    /// Actor at the walking index, if the round is not exhausted.
    pub fn current(&self) -> Option<BattleActor> {
        self.actors.get(self.index).copied()
    }

    pub fn advance(&mut self) {
        self.index += 1;
    }

    pub fn is_exhausted(&self) -> bool {
        self.index >= self.actors.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn actors(&self) -> &[BattleActor] {
        &self.actors
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn clear(&mut self) {
        self.actors.clear();
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{PcgRng, ScriptedRng};
    use crate::roster::{AiBehavior, CharacterClass, Enemy, PartyMember};

    fn party() -> Party {
        let mut party = Party::new();
        party
            .add_member(PartyMember::new("Aldric", CharacterClass::Warrior, 10))
            .unwrap();
        party
            .add_member(PartyMember::new("Lyra", CharacterClass::Mage, 1))
            .unwrap();
        party
    }

    fn formation() -> EnemyFormation {
        EnemyFormation::new()
            .with_enemy(Enemy::new("Slime", 1, AiBehavior::Aggressive))
            .with_enemy(Enemy::new("Goblin", 2, AiBehavior::Balanced))
    }

    #[test]
    fn sorted_descending_by_initiative() {
        let mut order = TurnOrder::new();
        // Aldric 32+0, Lyra 10+9, Slime 10+0, Goblin 12+5
        let mut rng = ScriptedRng::new([0, 9, 0, 5]);
        order.rebuild(&party(), Some(&formation()), &mut rng, 10).unwrap();

        let initiatives: Vec<_> = order.actors().iter().map(|a| a.initiative).collect();
        assert_eq!(initiatives, [32, 19, 17, 10]);
        assert_eq!(order.current().map(|a| a.combatant()), Some(CombatantRef::party(0)));
        assert_eq!(order.actors()[2].combatant(), CombatantRef::enemy(1));
    }

    #[test]
    fn contains_exactly_the_living() {
        let mut party = party();
        party.active_members_mut()[1].stats_mut().take_damage(999);
        let mut formation = formation();
        if let Some(slime) = formation.enemy_mut(0) {
            slime.stats_mut().take_damage(999);
        }

        let mut order = TurnOrder::new();
        let mut rng = PcgRng::seeded(3);
        for _ in 0..20 {
            order.rebuild(&party, Some(&formation), &mut rng, 10).unwrap();
            let mut members: Vec<_> = order.actors().iter().map(|a| a.combatant()).collect();
            members.sort_by_key(|c| (c.side == Side::Enemy, c.index));
            assert_eq!(members, [CombatantRef::party(0), CombatantRef::enemy(1)]);
            assert!(order.actors().windows(2).all(|w| w[0].initiative >= w[1].initiative));
        }
    }

    #[test]
    fn walking_past_the_end_exhausts() {
        let mut order = TurnOrder::new();
        let mut rng = PcgRng::seeded(9);
        order.rebuild(&party(), None, &mut rng, 10).unwrap();
        assert_eq!(order.len(), 2);
        order.advance();
        assert!(!order.is_exhausted());
        order.advance();
        assert!(order.is_exhausted());
        assert!(order.current().is_none());
    }

    #[test]
    fn nobody_alive_is_an_error() {
        let mut order = TurnOrder::new();
        let mut rng = PcgRng::seeded(1);
        assert_eq!(
            order.rebuild(&Party::new(), None, &mut rng, 10),
            Err(TurnError::NoLivingCombatants)
        );
        assert!(order.is_exhausted());
    }
}
