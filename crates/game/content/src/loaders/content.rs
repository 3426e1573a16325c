//! Loaded content, indexed by name.

use std::collections::BTreeMap;

use jrpg_core::{EnemyFormation, GameConfig, Inventory, Item, Party, PartyMember, Skill};

use crate::loaders::LoadResult;
use crate::specs::{EncounterSpec, MemberSpec, PartySpec};

/// Every catalog a session needs, with names resolved to definitions.
#[derive(Clone, Debug, Default)]
pub struct Content {
    pub config: GameConfig,
    skills: BTreeMap<String, Skill>,
    items: BTreeMap<String, Item>,
    encounters: BTreeMap<String, EncounterSpec>,
    party: PartySpec,
}

impl Content {
    pub fn new(
        config: GameConfig,
        skills: Vec<Skill>,
        items: Vec<Item>,
        encounters: Vec<EncounterSpec>,
        party: PartySpec,
    ) -> Self {
        Self {
            config,
            skills: skills.into_iter().map(|s| (s.name.clone(), s)).collect(),
            items: items.into_iter().map(|i| (i.name.clone(), i)).collect(),
            encounters: encounters
                .into_iter()
                .map(|e| (e.name.clone(), e))
                .collect(),
            party,
        }
    }

    pub fn skill(&self, name: &str) -> Option<&Skill> {
        self.skills.get(name)
    }

    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.get(name)
    }

    pub fn encounter(&self, name: &str) -> Option<&EncounterSpec> {
        self.encounters.get(name)
    }

    pub fn encounter_names(&self) -> impl Iterator<Item = &str> {
        self.encounters.keys().map(String::as_str)
    }

    pub fn party_spec(&self) -> &PartySpec {
        &self.party
    }

    /// A fresh formation for the named encounter.
    ///
    /// The built-in default encounter is always available under
    /// [`EncounterSpec::DEFAULT_NAME`], unless content overrides it.
    pub fn formation(&self, name: &str) -> LoadResult<EnemyFormation> {
        match self.encounters.get(name) {
            Some(spec) => Ok(spec.build()),
            None if name == EncounterSpec::DEFAULT_NAME => {
                Ok(EncounterSpec::default_encounter().build())
            }
            None => anyhow::bail!("Unknown encounter '{}'", name),
        }
    }

    /// Builds the new-game party and inventory.
    ///
    /// Skills and equipment are resolved by name; starting equipment is
    /// worn, not placed in the inventory.
    pub fn new_game(&self) -> LoadResult<(Party, Inventory)> {
        let mut party = Party::with_gold(self.party.gold.unwrap_or(self.config.starting_gold));
        for spec in &self.party.members {
            let member = self.build_member(spec)?;
            party
                .add_member(member)
                .map_err(|e| anyhow::anyhow!("Cannot add '{}' to the party: {}", spec.name, e))?;
        }

        let mut inventory = Inventory::from_config(&self.config);
        for (name, quantity) in &self.party.inventory {
            let item = self
                .item(name)
                .ok_or_else(|| anyhow::anyhow!("Unknown starting item '{}'", name))?;
            let stored = inventory.add_item(item, *quantity)?;
            if stored < *quantity {
                tracing::warn!(item = %name, requested = *quantity, stored, "starting stack capped");
            }
        }

        tracing::info!(
            members = party.total_count(),
            gold = party.gold(),
            stacks = inventory.used_slots(),
            "new game"
        );
        Ok((party, inventory))
    }

    fn build_member(&self, spec: &MemberSpec) -> LoadResult<PartyMember> {
        let mut member = PartyMember::new(spec.name.clone(), spec.class, spec.level);

        for name in &spec.skills {
            let skill = self.skill(name).ok_or_else(|| {
                anyhow::anyhow!("Unknown skill '{}' for member '{}'", name, spec.name)
            })?;
            member.learn_skill(skill.clone());
        }

        for name in &spec.equipment {
            let item = self.item(name).ok_or_else(|| {
                anyhow::anyhow!("Unknown equipment '{}' for member '{}'", name, spec.name)
            })?;
            let replaced = member
                .equip(item.clone())
                .map_err(|item| anyhow::anyhow!("'{}' is not equipment", item.name))?;
            if let Some(replaced) = replaced {
                anyhow::bail!(
                    "Member '{}' equips both '{}' and '{}' in one slot",
                    spec.name,
                    replaced.name,
                    name
                );
            }
        }

        Ok(member)
    }
}
