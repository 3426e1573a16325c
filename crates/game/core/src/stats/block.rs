//! Per-combatant numeric state.

use super::bonus::StatBonuses;
use super::growth::{BaseStats, clamp_level, experience_to_next};
use crate::config::GameConfig;

/// Level, experience, resource pools and equipment overlay of one combatant.
///
/// Invariant: `0 <= hp <= max_hp()` and `0 <= mp <= max_mp()` after every
/// public operation, where the maximums already include equipment bonuses.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    level: u32,
    experience: u32,
    hp: i32,
    mp: i32,
    base: BaseStats,
    bonuses: StatBonuses,
}

impl StatBlock {
    /// Creates a stat block at `level` (clamped into `1..=99`) with full HP/MP.
    pub fn new(level: u32) -> Self {
        let level = clamp_level(level);
        let base = BaseStats::for_level(level);
        Self {
            level,
            experience: 0,
            hp: base.max_hp,
            mp: base.max_mp,
            base,
            bonuses: StatBonuses::NONE,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Running experience total (never reset by level-ups).
    pub fn experience(&self) -> u32 {
        self.experience
    }

    /// Experience total at which the next level-up happens.
    pub fn experience_to_next(&self) -> u32 {
        experience_to_next(self.level)
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn mp(&self) -> i32 {
        self.mp
    }

    // ===== effective stats (base + equipment) =====

    pub fn max_hp(&self) -> i32 {
        (self.base.max_hp + self.bonuses.hp).max(0)
    }

    pub fn max_mp(&self) -> i32 {
        (self.base.max_mp + self.bonuses.mp).max(0)
    }

    pub fn attack(&self) -> i32 {
        self.base.attack + self.bonuses.attack
    }

    pub fn defense(&self) -> i32 {
        self.base.defense + self.bonuses.defense
    }

    // ===== base stats (pre-equipment, for UI comparisons) =====

    pub fn base(&self) -> BaseStats {
        self.base
    }

    pub fn base_max_hp(&self) -> i32 {
        self.base.max_hp
    }

    pub fn base_max_mp(&self) -> i32 {
        self.base.max_mp
    }

    pub fn base_attack(&self) -> i32 {
        self.base.attack
    }

    pub fn base_defense(&self) -> i32 {
        self.base.defense
    }

    pub fn bonuses(&self) -> StatBonuses {
        self.bonuses
    }

    // ===== equipment overlay =====

    /// Replaces the equipment overlay; current HP/MP are clamped to the new
    /// maximums but never raised.
    pub fn set_equipment_bonuses(&mut self, bonuses: StatBonuses) {
        self.bonuses = bonuses;
        self.clamp_pools();
    }

    pub fn clear_equipment_bonuses(&mut self) {
        self.set_equipment_bonuses(StatBonuses::NONE);
    }

    // ===== combat =====

    /// Negative amounts are ignored.
    pub fn take_damage(&mut self, damage: i32) {
        self.hp = (self.hp - damage.max(0)).max(0);
    }

    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount.max(0)).min(self.max_hp());
    }

    pub fn use_mp(&mut self, amount: i32) {
        self.mp = (self.mp - amount.max(0)).max(0);
    }

    pub fn restore_mp(&mut self, amount: i32) {
        self.mp = (self.mp + amount.max(0)).min(self.max_mp());
    }

    /// Brings a fallen combatant back with `hp` (at least 1, at most max).
    ///
    /// Returns false, leaving HP untouched, if the combatant is alive.
    pub fn revive(&mut self, hp: i32) -> bool {
        if self.is_alive() {
            return false;
        }
        self.hp = hp.max(1).min(self.max_hp());
        self.is_alive()
    }

    pub fn has_enough_mp(&self, cost: i32) -> bool {
        self.mp >= cost
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_dead(&self) -> bool {
        !self.is_alive()
    }

    // ===== progression =====

    /// Adds experience and performs every level-up it pays for.
    ///
    /// Returns the number of levels gained.
    pub fn gain_experience(&mut self, exp: u32) -> u32 {
        self.experience = self.experience.saturating_add(exp);

        let mut gained = 0;
        while self.experience >= self.experience_to_next() && self.level < GameConfig::MAX_LEVEL {
            if !self.level_up() {
                break;
            }
            gained += 1;
        }
        gained
    }

    /// Advances one level.
    ///
    /// Current HP/MP grow by exactly the increase in maximum, so headroom is
    /// kept rather than refilled. Returns false at the level cap.
    pub fn level_up(&mut self) -> bool {
        if self.level >= GameConfig::MAX_LEVEL {
            return false;
        }

        let old = self.base;
        self.level += 1;
        self.base = BaseStats::for_level(self.level);

        self.hp += self.base.max_hp - old.max_hp;
        self.mp += self.base.max_mp - old.max_mp;
        self.clamp_pools();

        tracing::debug!(level = self.level, hp = self.hp, mp = self.mp, "level up");
        true
    }

    fn clamp_pools(&mut self) {
        self.hp = self.hp.clamp(0, self.max_hp());
        self.mp = self.mp.clamp(0, self.max_mp());
    }
}

impl Default for StatBlock {
    fn default() -> Self {
        Self::new(1)
    }
}
