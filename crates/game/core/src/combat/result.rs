//! Attack outcome types and full attack resolution.

use super::damage::calculate_damage;
use super::hit::{check_critical, check_hit};
use crate::config::GameConfig;
use crate::rng::RngOracle;
use crate::stats::StatBlock;

/// Outcome of a physical attack attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// Attack missed; no damage.
    Miss,
    /// Attack connected.
    Hit { damage: i32, critical: bool },
}

impl AttackOutcome {
    pub fn damage(&self) -> i32 {
        match self {
            Self::Miss => 0,
            Self::Hit { damage, .. } => *damage,
        }
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Hit { critical: true, .. })
    }
}

/// Rolls hit and critical, then applies the damage to `defender`.
///
/// The critical roll is only drawn after a hit, so a miss consumes one roll
/// and a hit consumes two.
pub fn resolve_attack(
    attacker: &StatBlock,
    defender: &mut StatBlock,
    rng: &mut impl RngOracle,
    config: &GameConfig,
) -> AttackOutcome {
    if !check_hit(rng, config) {
        return AttackOutcome::Miss;
    }

    let critical = check_critical(rng, config);
    let damage = calculate_damage(attacker.attack(), defender.defense(), critical, config);
    defender.take_damage(damage);

    AttackOutcome::Hit { damage, critical }
}
