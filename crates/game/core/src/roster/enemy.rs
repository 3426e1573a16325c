//! AI-controlled combatants and the formation they fight in.

use strum::{Display, EnumIter};

use super::Combatant;
use crate::stats::StatBlock;

/// Behaviour tag of an enemy.
///
/// Every variant currently fights the same way: attack a random living party
/// member. The tag is carried as data for content authors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiBehavior {
    #[default]
    Aggressive,
    Balanced,
    Defensive,
    Support,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    name: String,
    stats: StatBlock,
    behavior: AiBehavior,
    gold_reward: u32,
    exp_reward: u32,
}

impl Enemy {
    /// Creates an enemy at `level`; rewards scale with the (clamped) level.
    pub fn new(name: impl Into<String>, level: u32, behavior: AiBehavior) -> Self {
        let stats = StatBlock::new(level);
        let level = stats.level();
        Self {
            name: name.into(),
            stats,
            behavior,
            gold_reward: 5 * level + level / 2,
            exp_reward: 10 * level + level * level,
        }
    }

    pub fn behavior(&self) -> AiBehavior {
        self.behavior
    }

    pub fn gold_reward(&self) -> u32 {
        self.gold_reward
    }

    pub fn exp_reward(&self) -> u32 {
        self.exp_reward
    }
}

impl Combatant for Enemy {
    fn name(&self) -> &str {
        &self.name
    }

    fn stats(&self) -> &StatBlock {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut StatBlock {
        &mut self.stats
    }
}

/// Ordered enemies of one battle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyFormation {
    enemies: Vec<Enemy>,
}

impl EnemyFormation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    pub fn with_enemy(mut self, enemy: Enemy) -> Self {
        self.add_enemy(enemy);
        self
    }

    pub fn remove_dead_enemies(&mut self) {
        self.enemies.retain(|enemy| enemy.is_alive());
    }

    /// True when no enemy is alive; vacuously true for an empty formation.
    pub fn all_enemies_dead(&self) -> bool {
        self.enemies.iter().all(|enemy| enemy.stats().is_dead())
    }

    pub fn alive_count(&self) -> usize {
        self.enemies.iter().filter(|enemy| enemy.is_alive()).count()
    }

    pub fn enemy(&self, index: usize) -> Option<&Enemy> {
        self.enemies.get(index)
    }

    pub fn enemy_mut(&mut self, index: usize) -> Option<&mut Enemy> {
        self.enemies.get_mut(index)
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Indices of living enemies, in formation order.
    pub fn living_indices(&self) -> Vec<usize> {
        self.enemies
            .iter()
            .enumerate()
            .filter(|(_, enemy)| enemy.is_alive())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn total_gold_reward(&self) -> u32 {
        self.enemies.iter().map(Enemy::gold_reward).sum()
    }

    pub fn total_exp_reward(&self) -> u32 {
        self.enemies.iter().map(Enemy::exp_reward).sum()
    }
}

impl FromIterator<Enemy> for EnemyFormation {
    fn from_iter<I: IntoIterator<Item = Enemy>>(iter: I) -> Self {
        Self {
            enemies: iter.into_iter().collect(),
        }
    }
}
