//! Stack-based item storage shared by the party.
//!
//! Stacks are unique by item name and iterate in name order, so slot indices
//! shown by a menu stay stable while quantities change.

use std::collections::BTreeMap;

use crate::catalog::{EquipmentType, Item};
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};

/// Errors raised by inventory mutations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("quantity must be positive")]
    InvalidQuantity,

    #[error("inventory is full ({max_slots} slots)")]
    Full { max_slots: usize },

    #[error("stack of {name:?} is already at {max}")]
    StackFull { name: String, max: u32 },

    #[error("no item named {name:?}")]
    NotFound { name: String },

    #[error("no stack at slot {index}")]
    SlotOutOfRange { index: usize },

    #[error("only {available} of {name:?} held, {requested} requested")]
    InsufficientQuantity {
        name: String,
        available: u32,
        requested: u32,
    },
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Full { .. } | Self::StackFull { .. } | Self::InsufficientQuantity { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::InvalidQuantity | Self::NotFound { .. } | Self::SlotOutOfRange { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidQuantity => "INVENTORY_INVALID_QUANTITY",
            Self::Full { .. } => "INVENTORY_FULL",
            Self::StackFull { .. } => "INVENTORY_STACK_FULL",
            Self::NotFound { .. } => "INVENTORY_NOT_FOUND",
            Self::SlotOutOfRange { .. } => "INVENTORY_SLOT_OUT_OF_RANGE",
            Self::InsufficientQuantity { .. } => "INVENTORY_INSUFFICIENT_QUANTITY",
        }
    }
}

/// Inventory slot containing an item and its quantity.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventorySlot {
    pub item: Item,
    pub quantity: u32,
}

impl InventorySlot {
    pub fn new(item: Item, quantity: u32) -> Self {
        Self { item, quantity }
    }
}

/// Fixed-capacity collection of item stacks.
///
/// Invariants: at most `max_slots` stacks; every stack holds
/// `1..=MAX_STACK` units; a stack that reaches zero is removed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    stacks: BTreeMap<String, InventorySlot>,
    max_slots: usize,
}

impl Inventory {
    pub fn new(max_slots: usize) -> Self {
        Self {
            stacks: BTreeMap::new(),
            max_slots,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.inventory_slots)
    }

    /// Adds units of `item`, capping the stack at 99.
    ///
    /// Returns how many units were actually stored; units above the cap are
    /// dropped. A stack that is already full stores nothing and is an error.
    pub fn add_item(&mut self, item: &Item, quantity: u32) -> Result<u32, InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::InvalidQuantity);
        }

        if let Some(slot) = self.stacks.get_mut(&item.name) {
            if slot.quantity >= GameConfig::MAX_STACK {
                return Err(InventoryError::StackFull {
                    name: item.name.clone(),
                    max: GameConfig::MAX_STACK,
                });
            }
            let before = slot.quantity;
            slot.quantity = (before + quantity.min(GameConfig::MAX_STACK)).min(GameConfig::MAX_STACK);
            return Ok(slot.quantity - before);
        }

        if self.is_full() {
            return Err(InventoryError::Full {
                max_slots: self.max_slots,
            });
        }

        let stored = quantity.min(GameConfig::MAX_STACK);
        self.stacks
            .insert(item.name.clone(), InventorySlot::new(item.clone(), stored));
        Ok(stored)
    }

    /// Removes units by item name; all-or-nothing.
    pub fn remove_item(&mut self, name: &str, quantity: u32) -> Result<(), InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::InvalidQuantity);
        }

        let slot = self
            .stacks
            .get_mut(name)
            .ok_or_else(|| InventoryError::NotFound {
                name: name.to_string(),
            })?;

        if slot.quantity < quantity {
            return Err(InventoryError::InsufficientQuantity {
                name: name.to_string(),
                available: slot.quantity,
                requested: quantity,
            });
        }

        slot.quantity -= quantity;
        if slot.quantity == 0 {
            self.stacks.remove(name);
        }
        Ok(())
    }

    /// Removes units from the stack at a snapshot index.
    pub fn remove_at(&mut self, index: usize, quantity: u32) -> Result<(), InventoryError> {
        let name = self
            .slot(index)
            .map(|slot| slot.item.name.clone())
            .ok_or(InventoryError::SlotOutOfRange { index })?;
        self.remove_item(&name, quantity)
    }

    pub fn has_item(&self, name: &str) -> bool {
        self.stacks.contains_key(name)
    }

    pub fn count(&self, name: &str) -> u32 {
        self.stacks.get(name).map_or(0, |slot| slot.quantity)
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.stacks.get(name).map(|slot| &slot.item)
    }

    pub fn slot(&self, index: usize) -> Option<&InventorySlot> {
        self.stacks.values().nth(index)
    }

    /// Stacks in name order.
    pub fn slots(&self) -> impl Iterator<Item = &InventorySlot> {
        self.stacks.values()
    }

    /// Owned `(item, quantity)` list for menus and shops.
    pub fn snapshot(&self) -> Vec<(Item, u32)> {
        self.stacks
            .values()
            .map(|slot| (slot.item.clone(), slot.quantity))
            .collect()
    }

    /// Stacks the battle item menu may offer.
    pub fn battle_usable(&self) -> Vec<&InventorySlot> {
        self.stacks
            .values()
            .filter(|slot| slot.item.is_usable_in_battle())
            .collect()
    }

    /// Equipment stacks that fit `slot`.
    pub fn equipment_for(&self, slot: EquipmentType) -> Vec<&InventorySlot> {
        self.stacks
            .values()
            .filter(|stack| {
                stack
                    .item
                    .as_equipment()
                    .is_some_and(|equipment| equipment.slot == slot)
            })
            .collect()
    }

    pub fn used_slots(&self) -> usize {
        self.stacks.len()
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    pub fn is_full(&self) -> bool {
        self.used_slots() >= self.max_slots
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(GameConfig::DEFAULT_INVENTORY_SLOTS)
    }
}
