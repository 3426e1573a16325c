//! Level growth formulas.
//!
//! Formulas (level L ≥ 1):
//! - HP_max = 50 + 8 × (L − 1)
//! - MP_max = 20 + 4 × (L − 1)
//! - Attack = 10 + ⌊2.5 × (L − 1)⌋
//! - Defense = 8 + ⌊1.8 × (L − 1)⌋
//! - Experience to next level = ⌊100 × L^1.5⌋
//!
//! Fractional growth rates are evaluated in integer arithmetic so every level
//! produces the exact truncated value.

use crate::config::GameConfig;

const BASE_HP: i32 = 50;
const BASE_MP: i32 = 20;
const BASE_ATTACK: i32 = 10;
const BASE_DEFENSE: i32 = 8;

/// Growth per level, in tenths.
const HP_GROWTH_TENTHS: i32 = 80;
const MP_GROWTH_TENTHS: i32 = 40;
const ATTACK_GROWTH_TENTHS: i32 = 25;
const DEFENSE_GROWTH_TENTHS: i32 = 18;

/// Level-derived stats before any equipment is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub max_hp: i32,
    pub max_mp: i32,
    pub attack: i32,
    pub defense: i32,
}

impl BaseStats {
    /// Compute base stats for a level (clamped into `1..=MAX_LEVEL`).
    pub fn for_level(level: u32) -> Self {
        let steps = clamp_level(level) as i32 - 1;
        Self {
            max_hp: BASE_HP + grow(HP_GROWTH_TENTHS, steps),
            max_mp: BASE_MP + grow(MP_GROWTH_TENTHS, steps),
            attack: BASE_ATTACK + grow(ATTACK_GROWTH_TENTHS, steps),
            defense: BASE_DEFENSE + grow(DEFENSE_GROWTH_TENTHS, steps),
        }
    }
}

/// Experience total required to leave `level`.
///
/// ⌊100 × L^1.5⌋ = ⌊√(10 000 × L³)⌋, computed exactly with an integer root.
pub fn experience_to_next(level: u32) -> u32 {
    let l = clamp_level(level) as u64;
    integer_sqrt(10_000 * l * l * l) as u32
}

pub(crate) fn clamp_level(level: u32) -> u32 {
    level.clamp(1, GameConfig::MAX_LEVEL)
}

#[inline]
fn grow(rate_tenths: i32, steps: i32) -> i32 {
    rate_tenths * steps / 10
}

/// Integer square root (floor), no floating point.
fn integer_sqrt(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut x = n;
    let mut y = x.div_ceil(2);
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}
