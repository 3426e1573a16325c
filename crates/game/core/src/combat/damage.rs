//! Physical damage formula.

use crate::config::GameConfig;

/// Calculate physical damage.
///
/// # Formula
///
/// ```text
/// damage = max(minimum, attack - defense / 2)
///
/// if critical:
///     damage *= crit_multiplier
/// ```
///
/// Defense is halved with integer division before subtraction.
pub fn calculate_damage(attack: i32, defense: i32, is_critical: bool, config: &GameConfig) -> i32 {
    let mut damage = (attack - defense / 2).max(config.minimum_damage);

    if is_critical {
        damage *= config.crit_multiplier;
    }

    damage
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_formula() {
        let config = GameConfig::default();
        assert_eq!(calculate_damage(10, 8, false, &config), 6);
        assert_eq!(calculate_damage(32, 8, false, &config), 28);
        assert_eq!(calculate_damage(10, 9, false, &config), 6);
    }

    #[test]
    fn floor_is_one() {
        let config = GameConfig::default();
        assert_eq!(calculate_damage(1, 50, false, &config), 1);
        assert_eq!(calculate_damage(1, 50, true, &config), 2);
    }

    #[test]
    fn critical_doubles_after_formula() {
        let config = GameConfig::default();
        for (attack, defense) in [(10, 8), (32, 8), (55, 40), (3, 3)] {
            assert_eq!(
                calculate_damage(attack, defense, true, &config),
                2 * calculate_damage(attack, defense, false, &config)
            );
        }
    }
}
