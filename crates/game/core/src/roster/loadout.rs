//! Equipment slots of a party member.
//!
//! A loadout holds at most one item per [`EquipmentType`]. The stat overlay a
//! member receives is always recomputed from the three slots, never patched
//! incrementally.

use crate::catalog::{EquipmentType, Item};
use crate::stats::StatBonuses;

/// Weapon, armor and accessory slots.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loadout {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
    pub accessory: Option<Item>,
}

impl Loadout {
    /// Creates an empty loadout.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn slot(&self, slot: EquipmentType) -> Option<&Item> {
        match slot {
            EquipmentType::Weapon => self.weapon.as_ref(),
            EquipmentType::Armor => self.armor.as_ref(),
            EquipmentType::Accessory => self.accessory.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: EquipmentType) -> &mut Option<Item> {
        match slot {
            EquipmentType::Weapon => &mut self.weapon,
            EquipmentType::Armor => &mut self.armor,
            EquipmentType::Accessory => &mut self.accessory,
        }
    }

    /// Places `item` into `slot`, returning whatever was there before.
    ///
    /// The caller has already checked that `item` is equipment for `slot`.
    pub(crate) fn replace(&mut self, slot: EquipmentType, item: Item) -> Option<Item> {
        self.slot_mut(slot).replace(item)
    }

    /// Empties `slot`, returning its item if any was equipped.
    pub fn take(&mut self, slot: EquipmentType) -> Option<Item> {
        self.slot_mut(slot).take()
    }

    /// Sum of the bonuses of every occupied slot.
    pub fn bonuses(&self) -> StatBonuses {
        [&self.weapon, &self.armor, &self.accessory]
            .into_iter()
            .flatten()
            .filter_map(Item::as_equipment)
            .map(|equipment| equipment.bonuses)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.weapon.is_none() && self.armor.is_none() && self.accessory.is_none()
    }
}
