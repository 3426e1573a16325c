//! Inventoriable goods: consumables, key items, materials and equipment.
//!
//! All goods share name, description and prices; what differs is the
//! [`ItemKind`] payload. Equipment is one of those kinds rather than a
//! separate type, so inventory code asks `item.as_equipment()` instead of
//! guessing at the concrete type.

use strum::{Display, EnumIter};

use crate::stats::StatBonuses;

/// Discriminant of [`ItemKind`], for filtering and display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemType {
    Consumable,
    KeyItem,
    Material,
    Equipment,
}

/// Effect of a consumable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    RestoreHp,
    RestoreMp,
    /// Restores HP and MP by the same power.
    RestoreBoth,
    /// Brings a fallen ally back at half of their maximum HP.
    Revive,
    #[default]
    None,
}

/// Equipment slot an item occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipmentType {
    Weapon,
    Armor,
    Accessory,
}

/// Stat payload of an equippable item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    pub slot: EquipmentType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonuses: StatBonuses,
}

impl Equipment {
    pub const fn new(slot: EquipmentType, bonuses: StatBonuses) -> Self {
        Self { slot, bonuses }
    }
}

/// Kind-specific data of an item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    Consumable { effect: ItemEffect, power: i32 },
    KeyItem,
    Material,
    Equipment(Equipment),
}

/// Immutable description of a good that can sit in an inventory.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub kind: ItemKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub buy_price: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sell_price: u32,
}

impl Item {
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            buy_price: 0,
            sell_price: 0,
        }
    }

    pub fn consumable(name: impl Into<String>, effect: ItemEffect, power: i32) -> Self {
        Self::new(name, "", ItemKind::Consumable { effect, power })
    }

    pub fn equipment(name: impl Into<String>, slot: EquipmentType, bonuses: StatBonuses) -> Self {
        Self::new(name, "", ItemKind::Equipment(Equipment::new(slot, bonuses)))
    }

    pub fn with_prices(mut self, buy_price: u32, sell_price: u32) -> Self {
        self.buy_price = buy_price;
        self.sell_price = sell_price;
        self
    }

    pub fn item_type(&self) -> ItemType {
        match self.kind {
            ItemKind::Consumable { .. } => ItemType::Consumable,
            ItemKind::KeyItem => ItemType::KeyItem,
            ItemKind::Material => ItemType::Material,
            ItemKind::Equipment(_) => ItemType::Equipment,
        }
    }

    /// Consumable effect; [`ItemEffect::None`] for every other kind.
    pub fn effect(&self) -> ItemEffect {
        match self.kind {
            ItemKind::Consumable { effect, .. } => effect,
            _ => ItemEffect::None,
        }
    }

    pub fn effect_power(&self) -> i32 {
        match self.kind {
            ItemKind::Consumable { power, .. } => power,
            _ => 0,
        }
    }

    pub fn as_equipment(&self) -> Option<&Equipment> {
        match &self.kind {
            ItemKind::Equipment(equipment) => Some(equipment),
            _ => None,
        }
    }

    pub fn is_equipment(&self) -> bool {
        self.as_equipment().is_some()
    }

    pub fn is_usable_in_battle(&self) -> bool {
        self.item_type() == ItemType::Consumable && self.effect() != ItemEffect::None
    }

    /// Only plain restoratives work outside battle.
    pub fn is_usable_in_field(&self) -> bool {
        self.item_type() == ItemType::Consumable
            && matches!(
                self.effect(),
                ItemEffect::RestoreHp | ItemEffect::RestoreMp | ItemEffect::RestoreBoth
            )
    }
}
