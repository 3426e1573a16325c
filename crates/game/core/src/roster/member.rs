//! Player-controlled combatants.

use strum::{Display, EnumIter};

use super::loadout::Loadout;
use super::Combatant;
use crate::catalog::{EquipmentType, Item, Skill};
use crate::stats::StatBlock;

/// Character class of a party member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterClass {
    Warrior,
    Mage,
    Cleric,
    Thief,
}

/// A recruitable character: stats, equipment and known skills.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartyMember {
    name: String,
    class: CharacterClass,
    stats: StatBlock,
    loadout: Loadout,
    skills: Vec<Skill>,
}

impl PartyMember {
    pub fn new(name: impl Into<String>, class: CharacterClass, level: u32) -> Self {
        Self {
            name: name.into(),
            class,
            stats: StatBlock::new(level),
            loadout: Loadout::empty(),
            skills: Vec::new(),
        }
    }

    pub fn class(&self) -> CharacterClass {
        self.class
    }

    pub fn loadout(&self) -> &Loadout {
        &self.loadout
    }

    pub fn equipped(&self, slot: EquipmentType) -> Option<&Item> {
        self.loadout.slot(slot)
    }

    /// Puts an equipment item in the slot it belongs to.
    ///
    /// Returns the displaced item, or gives `item` back unchanged in `Err` if
    /// it is not equipment.
    pub fn equip(&mut self, item: Item) -> Result<Option<Item>, Item> {
        let Some(slot) = item.as_equipment().map(|equipment| equipment.slot) else {
            return Err(item);
        };
        let previous = self.loadout.replace(slot, item);
        self.recalculate_equipment_bonuses();
        Ok(previous)
    }

    pub fn unequip(&mut self, slot: EquipmentType) -> Option<Item> {
        let removed = self.loadout.take(slot);
        if removed.is_some() {
            self.recalculate_equipment_bonuses();
        }
        removed
    }

    fn recalculate_equipment_bonuses(&mut self) {
        self.stats.set_equipment_bonuses(self.loadout.bonuses());
    }

    /// Adds a skill unless one with the same name is already known.
    pub fn learn_skill(&mut self, skill: Skill) -> bool {
        if self.has_skill(&skill.name) {
            return false;
        }
        self.skills.push(skill);
        true
    }

    pub fn has_skill(&self, name: &str) -> bool {
        self.skills.iter().any(|skill| skill.name == name)
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }
}

impl Combatant for PartyMember {
    fn name(&self) -> &str {
        &self.name
    }

    fn stats(&self) -> &StatBlock {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut StatBlock {
        &mut self.stats
    }
}
