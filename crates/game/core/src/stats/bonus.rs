//! Flat stat bonuses contributed by equipment.
//!
//! Equipment bonuses are kept apart from level-derived base stats so they
//! can be replaced or cleared without touching progression. Bonuses from
//! several slots combine by plain addition.

use core::iter::Sum;
use core::ops::{Add, AddAssign};

/// Additive deltas on top of [`BaseStats`](super::BaseStats).
///
/// # Example
/// ```
/// # use jrpg_core::stats::StatBonuses;
/// let sword = StatBonuses::new(8, 0, 0, 0);
/// let mail = StatBonuses::new(0, 6, 20, 0);
/// let total: StatBonuses = [sword, mail].into_iter().sum();
/// assert_eq!(total, StatBonuses::new(8, 6, 20, 0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatBonuses {
    pub attack: i32,
    pub defense: i32,
    pub hp: i32,
    pub mp: i32,
}

impl StatBonuses {
    pub const NONE: Self = Self {
        attack: 0,
        defense: 0,
        hp: 0,
        mp: 0,
    };

    pub const fn new(attack: i32, defense: i32, hp: i32, mp: i32) -> Self {
        Self {
            attack,
            defense,
            hp,
            mp,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

impl Add for StatBonuses {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            attack: self.attack + rhs.attack,
            defense: self.defense + rhs.defense,
            hp: self.hp + rhs.hp,
            mp: self.mp + rhs.mp,
        }
    }
}

impl AddAssign for StatBonuses {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for StatBonuses {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::NONE, Add::add)
    }
}

impl<'a> Sum<&'a StatBonuses> for StatBonuses {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
