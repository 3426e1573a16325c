//! Battle state machine states and menu commands.

use strum::{Display, EnumCount, EnumIter, FromRepr};

/// Where the battle is in its turn cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BattleState {
    #[default]
    TurnStart,
    PlayerSelect,
    SkillSelect,
    ItemSelect,
    TargetSelect,
    EnemySelect,
    ExecutingAction,
    TurnEnd,
    Victory,
    Defeat,
    Fled,
}

impl BattleState {
    /// Terminal states wait for a confirm and then end the battle.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat | Self::Fled)
    }

    /// States in which the engine reads player input.
    pub const fn awaits_player(self) -> bool {
        matches!(
            self,
            Self::PlayerSelect | Self::SkillSelect | Self::ItemSelect | Self::TargetSelect
        ) || self.is_terminal()
    }

    pub const fn outcome(self) -> Option<BattleOutcome> {
        match self {
            Self::Victory => Some(BattleOutcome::Victory),
            Self::Defeat => Some(BattleOutcome::Defeat),
            Self::Fled => Some(BattleOutcome::Fled),
            _ => None,
        }
    }
}

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    Victory,
    Defeat,
    Fled,
}

impl BattleOutcome {
    /// Flag passed to the battle-end callback: fleeing counts as a win.
    pub const fn won(self) -> bool {
        matches!(self, Self::Victory | Self::Fled)
    }
}

/// Top-level battle menu entries, in menu order.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumCount, EnumIter, FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum BattleCommand {
    #[default]
    Attack,
    Magic,
    Item,
    Defend,
    Run,
}

impl BattleCommand {
    /// Next entry, wrapping from the last back to the first.
    pub fn next(self) -> Self {
        Self::from_repr((self as u8 + 1) % Self::COUNT as u8).unwrap_or_default()
    }

    /// Previous entry, wrapping from the first to the last.
    pub fn prev(self) -> Self {
        let count = Self::COUNT as u8;
        Self::from_repr((self as u8 + count - 1) % count).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn commands_wrap_both_ways() {
        assert_eq!(BattleCommand::Run.next(), BattleCommand::Attack);
        assert_eq!(BattleCommand::Attack.prev(), BattleCommand::Run);
        for command in BattleCommand::iter() {
            assert_eq!(command.next().prev(), command);
        }
    }

    #[test]
    fn five_downs_return_to_start() {
        let mut command = BattleCommand::Magic;
        for _ in 0..BattleCommand::COUNT {
            command = command.next();
        }
        assert_eq!(command, BattleCommand::Magic);
    }

    #[test]
    fn terminal_states_map_to_outcomes() {
        let terminal: Vec<_> = BattleState::iter().filter(|s| s.is_terminal()).collect();
        assert_eq!(terminal.len(), 3);
        assert!(terminal.iter().all(|s| s.outcome().is_some()));
        assert!(BattleOutcome::Fled.won());
        assert!(!BattleOutcome::Defeat.won());
        assert_eq!(BattleState::PlayerSelect.to_string(), "PLAYER_SELECT");
    }
}
