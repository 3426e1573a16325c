//! Hit and critical checks.

use crate::config::GameConfig;
use crate::rng::RngOracle;

/// Rolls whether a physical attack connects.
pub fn check_hit(rng: &mut impl RngOracle, config: &GameConfig) -> bool {
    rng.roll_percent(config.hit_chance)
}

/// Rolls whether a connecting attack is critical.
pub fn check_critical(rng: &mut impl RngOracle, config: &GameConfig) -> bool {
    rng.roll_percent(config.crit_chance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    #[test]
    fn default_odds_boundaries() {
        let config = GameConfig::default();
        // roll_percent passes when range(0, 99) < chance.
        let mut rng = ScriptedRng::new([89, 90, 9, 10]);
        assert!(check_hit(&mut rng, &config));
        assert!(!check_hit(&mut rng, &config));
        assert!(check_critical(&mut rng, &config));
        assert!(!check_critical(&mut rng, &config));
    }
}
