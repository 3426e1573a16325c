//! Consumable effects and out-of-battle item use.

use super::party::Party;
use super::Combatant;
use crate::catalog::{Item, ItemEffect};
use crate::error::{ErrorSeverity, GameError};
use crate::inventory::{Inventory, InventoryError};
use crate::stats::StatBlock;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ItemUseError {
    #[error("{name:?} cannot be used outside battle")]
    NotUsableInField { name: String },

    #[error("no active member at index {index}")]
    InvalidTarget { index: usize },

    #[error("member at index {index} has fallen")]
    TargetDown { index: usize },

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

impl GameError for ItemUseError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotUsableInField { .. }
            | Self::InvalidTarget { .. }
            | Self::TargetDown { .. } => ErrorSeverity::Validation,
            Self::Inventory(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotUsableInField { .. } => "ITEM_NOT_USABLE_IN_FIELD",
            Self::InvalidTarget { .. } => "ITEM_INVALID_TARGET",
            Self::TargetDown { .. } => "ITEM_TARGET_DOWN",
            Self::Inventory(err) => err.error_code(),
        }
    }
}

/// Applies a consumable's effect to `stats`.
///
/// RestoreBoth uses the same power for both pools. Revive only works on a
/// fallen target and brings it back at half of its effective max HP.
/// Returns whether anything could have changed; the unit is spent either way.
pub fn apply_consumable(stats: &mut StatBlock, item: &Item) -> bool {
    let power = item.effect_power();
    match item.effect() {
        ItemEffect::RestoreHp => stats.heal(power),
        ItemEffect::RestoreMp => stats.restore_mp(power),
        ItemEffect::RestoreBoth => {
            stats.heal(power);
            stats.restore_mp(power);
        }
        ItemEffect::Revive => {
            let hp = stats.max_hp() / 2;
            return stats.revive(hp);
        }
        ItemEffect::None => return false,
    }
    true
}

/// Uses one unit of `item_name` on the active member at `target`.
pub fn use_in_field(
    party: &mut Party,
    inventory: &mut Inventory,
    item_name: &str,
    target: usize,
) -> Result<(), ItemUseError> {
    let item = inventory
        .get(item_name)
        .cloned()
        .ok_or_else(|| InventoryError::NotFound {
            name: item_name.to_string(),
        })?;
    if !item.is_usable_in_field() {
        return Err(ItemUseError::NotUsableInField { name: item.name });
    }

    let member = party
        .active_member_mut(target)
        .ok_or(ItemUseError::InvalidTarget { index: target })?;
    if member.stats().is_dead() {
        return Err(ItemUseError::TargetDown { index: target });
    }

    inventory.remove_item(item_name, 1)?;
    apply_consumable(member.stats_mut(), &item);

    tracing::debug!(item = item_name, target = member.name(), "field item used");
    Ok(())
}
