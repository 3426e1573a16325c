//! Combatant roster: the persistent party and per-battle enemy formations.
//!
//! Party members and enemies are distinct types that share the
//! [`Combatant`] view, which is all the battle engine needs for turn order,
//! targeting and damage resolution.

pub mod enemy;
pub mod equip;
pub mod field;
pub mod loadout;
pub mod member;
pub mod party;

pub use enemy::{AiBehavior, Enemy, EnemyFormation};
pub use equip::{EquipError, compatible_equipment, equip_from_inventory, unequip_to_inventory};
pub use field::{ItemUseError, apply_consumable, use_in_field};
pub use loadout::Loadout;
pub use member::{CharacterClass, PartyMember};
pub use party::{Party, PartyError};

use crate::stats::StatBlock;

/// Anything that can stand in a battle.
pub trait Combatant {
    fn name(&self) -> &str;

    fn stats(&self) -> &StatBlock;

    fn stats_mut(&mut self) -> &mut StatBlock;

    fn is_alive(&self) -> bool {
        self.stats().is_alive()
    }
}
