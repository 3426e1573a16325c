//! Moving equipment between the shared inventory and a member's slots.
//!
//! Exactly one unit moves per call. When a slot is already occupied the old
//! item goes back to the inventory; if that is impossible the whole swap is
//! undone.

use super::member::PartyMember;
use super::Combatant;
use crate::catalog::{EquipmentType, Item};
use crate::error::{ErrorSeverity, GameError};
use crate::inventory::{Inventory, InventoryError, InventorySlot};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EquipError {
    #[error("{name:?} is not equipment")]
    NotEquipment { name: String },

    #[error("nothing equipped in the {slot} slot")]
    SlotEmpty { slot: EquipmentType },

    #[error("{name:?} could not be put back after a failed equip")]
    RollbackFailed {
        name: String,
        #[source]
        source: InventoryError,
    },

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

impl GameError for EquipError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotEquipment { .. } | Self::SlotEmpty { .. } => ErrorSeverity::Validation,
            Self::RollbackFailed { .. } => ErrorSeverity::Internal,
            Self::Inventory(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotEquipment { .. } => "EQUIP_NOT_EQUIPMENT",
            Self::SlotEmpty { .. } => "EQUIP_SLOT_EMPTY",
            Self::RollbackFailed { .. } => "EQUIP_ROLLBACK_FAILED",
            Self::Inventory(err) => err.error_code(),
        }
    }
}

/// Equips one unit of `item_name` from `inventory`.
///
/// Returns the name of the item that was displaced back into the inventory.
pub fn equip_from_inventory(
    member: &mut PartyMember,
    inventory: &mut Inventory,
    item_name: &str,
) -> Result<Option<String>, EquipError> {
    let item = inventory
        .get(item_name)
        .cloned()
        .ok_or_else(|| InventoryError::NotFound {
            name: item_name.to_string(),
        })?;
    if !item.is_equipment() {
        return Err(EquipError::NotEquipment { name: item.name });
    }

    inventory.remove_item(item_name, 1)?;

    let previous = match member.equip(item) {
        Ok(previous) => previous,
        Err(item) => {
            restore(inventory, &item)?;
            return Err(EquipError::NotEquipment { name: item.name });
        }
    };

    let Some(previous) = previous else {
        return Ok(None);
    };

    if let Err(err) = inventory.add_item(&previous, 1) {
        // Put everything back the way it was.
        if let Ok(Some(current)) = member.equip(previous) {
            restore(inventory, &current)?;
        }
        return Err(err.into());
    }

    tracing::debug!(
        member = member.name(),
        item = item_name,
        replaced = %previous.name,
        "equipped"
    );
    Ok(Some(previous.name))
}

/// Returns the item in `slot` to `inventory`.
pub fn unequip_to_inventory(
    member: &mut PartyMember,
    inventory: &mut Inventory,
    slot: EquipmentType,
) -> Result<Item, EquipError> {
    let item = member
        .equipped(slot)
        .cloned()
        .ok_or(EquipError::SlotEmpty { slot })?;

    // The slot is only cleared once the inventory has taken the unit.
    inventory.add_item(&item, 1)?;
    member.unequip(slot);

    tracing::debug!(member = member.name(), item = %item.name, %slot, "unequipped");
    Ok(item)
}

/// Inventory stacks a member could put in `slot`.
pub fn compatible_equipment(inventory: &Inventory, slot: EquipmentType) -> Vec<&InventorySlot> {
    inventory.equipment_for(slot)
}

fn restore(inventory: &mut Inventory, item: &Item) -> Result<(), EquipError> {
    inventory.add_item(item, 1).map(|_| ()).map_err(|source| {
        let err = EquipError::RollbackFailed {
            name: item.name.clone(),
            source,
        };
        crate::error::log_rejection("equipment rollback", &err);
        err
    })
}
