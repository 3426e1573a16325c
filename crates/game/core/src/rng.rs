//! RNG oracle for battle rolls.
//!
//! Every random decision in a battle (hit, critical, flee, initiative, enemy
//! target choice) is drawn from one generator owned by the engine. The
//! generator is seeded once when the engine is built, so a battle replays
//! exactly under the same seed and inputs.

use std::collections::VecDeque;

/// Source of uniform random integers.
///
/// Implementations only provide [`RngOracle::next_u32`]; every roll the
/// engine makes goes through [`RngOracle::range`].
pub trait RngOracle {
    /// Generate the next raw 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Generate a random value in range [min, max] inclusive.
    fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = max - min + 1;
        min + (self.next_u32() % span)
    }

    /// Percentage check: true with `chance` percent probability.
    fn roll_percent(&mut self, chance: u32) -> bool {
        self.range(0, 99) < chance
    }

    /// Pick an index into a collection of `len` elements.
    fn pick(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.range(0, len as u32 - 1) as usize)
    }
}

impl<R: RngOracle + ?Sized> RngOracle for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 64-bit LCG state, 32-bit permuted output.
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        // Scramble once so that small consecutive seeds diverge immediately.
        let mut rng = Self {
            state: seed.wrapping_add(Self::INCREMENT),
        };
        rng.next_u32();
        rng
    }

    /// Creates a generator seeded from the system clock.
    pub fn from_entropy() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or(0);
        Self::seeded(nanos)
    }

    /// Advance the PCG state by one step.
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = Self::pcg_step(old);
        Self::pcg_output(old)
    }
}

/// Replays a fixed list of raw values, then falls back to a constant.
///
/// Lets tests force individual rolls: with [`RngOracle::roll_percent`] a raw
/// value of `0` always passes and `99` always fails any chance below 100.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    values: VecDeque<u32>,
    fallback: u32,
}

impl ScriptedRng {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            fallback: 0,
        }
    }

    /// Value returned once the script runs out.
    pub fn with_fallback(mut self, fallback: u32) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn push(&mut self, value: u32) {
        self.values.push_back(value);
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RngOracle for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        self.values.pop_front().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = PcgRng::seeded(42);
        let mut b = PcgRng::seeded(42);
        for _ in 0..32 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn range_stays_inclusive() {
        let mut rng = PcgRng::seeded(7);
        let mut seen = [false; 10];
        for _ in 0..2_000 {
            let v = rng.range(0, 9);
            assert!(v <= 9);
            seen[v as usize] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }

    #[test]
    fn degenerate_range_returns_min() {
        let mut rng = ScriptedRng::new([123]);
        assert_eq!(rng.range(5, 5), 5);
        assert_eq!(rng.remaining(), 1);
    }

    #[test]
    fn scripted_rolls_force_percent_checks() {
        let mut rng = ScriptedRng::new([0, 99]);
        assert!(rng.roll_percent(90));
        assert!(!rng.roll_percent(90));
    }

    #[test]
    fn pick_on_empty_is_none() {
        let mut rng = PcgRng::seeded(1);
        assert_eq!(rng.pick(0), None);
        assert!(rng.pick(3).is_some_and(|i| i < 3));
    }
}
