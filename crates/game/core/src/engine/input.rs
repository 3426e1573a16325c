//! Polled, press-this-frame input.

use bitflags::bitflags;
use strum::{Display, EnumIter};

/// Navigation keys the battle menus understand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum BattleKey {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Cancel,
}

/// Answers whether a key went down during the current frame.
///
/// Held keys must not repeat: the engine treats every `true` as a fresh
/// press.
pub trait InputSource {
    fn pressed(&self, key: BattleKey) -> bool;
}

impl<T: InputSource + ?Sized> InputSource for &T {
    fn pressed(&self, key: BattleKey) -> bool {
        (**self).pressed(key)
    }
}

bitflags! {
    /// Keys pressed during one frame.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct FrameInput: u8 {
        const UP      = 1 << 0;
        const DOWN    = 1 << 1;
        const LEFT    = 1 << 2;
        const RIGHT   = 1 << 3;
        const CONFIRM = 1 << 4;
        const CANCEL  = 1 << 5;
    }
}

impl FrameInput {
    pub const fn from_key(key: BattleKey) -> Self {
        match key {
            BattleKey::Up => Self::UP,
            BattleKey::Down => Self::DOWN,
            BattleKey::Left => Self::LEFT,
            BattleKey::Right => Self::RIGHT,
            BattleKey::Confirm => Self::CONFIRM,
            BattleKey::Cancel => Self::CANCEL,
        }
    }
}

impl From<BattleKey> for FrameInput {
    fn from(key: BattleKey) -> Self {
        Self::from_key(key)
    }
}

impl InputSource for FrameInput {
    fn pressed(&self, key: BattleKey) -> bool {
        self.contains(Self::from_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn each_key_maps_to_its_own_bit() {
        for key in BattleKey::iter() {
            let input = FrameInput::from(key);
            for other in BattleKey::iter() {
                assert_eq!(input.pressed(other), key == other, "{key} vs {other}");
            }
        }
    }

    #[test]
    fn combined_presses() {
        let input = FrameInput::DOWN | FrameInput::CONFIRM;
        assert!(input.pressed(BattleKey::Down));
        assert!(input.pressed(BattleKey::Confirm));
        assert!(!FrameInput::empty().pressed(BattleKey::Confirm));
    }
}
