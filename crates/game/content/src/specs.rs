//! Declarative descriptions of encounters and the starting party.
//!
//! Specs hold names rather than resolved catalog entries, so they can be
//! written by hand in data files and checked when a session is built.

use jrpg_core::{AiBehavior, CharacterClass, Enemy, EnemyFormation};

/// One enemy slot of an encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySpec {
    pub name: String,
    pub level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub behavior: AiBehavior,
}

impl EnemySpec {
    pub fn new(name: impl Into<String>, level: u32, behavior: AiBehavior) -> Self {
        Self {
            name: name.into(),
            level,
            behavior,
        }
    }

    pub fn build(&self) -> Enemy {
        Enemy::new(self.name.clone(), self.level, self.behavior)
    }
}

/// A named group of enemies fought together.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterSpec {
    pub name: String,
    pub enemies: Vec<EnemySpec>,
}

impl EncounterSpec {
    pub const DEFAULT_NAME: &'static str = "slime_and_goblin";

    /// The encounter used when no content selects one: a level 1 Slime and a
    /// level 2 Goblin.
    pub fn default_encounter() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            enemies: vec![
                EnemySpec::new("Slime", 1, AiBehavior::Aggressive),
                EnemySpec::new("Goblin", 2, AiBehavior::Balanced),
            ],
        }
    }

    /// Builds a formation at full health. Every call yields new enemies.
    pub fn build(&self) -> EnemyFormation {
        self.enemies.iter().map(EnemySpec::build).collect()
    }
}

#[cfg(feature = "serde")]
fn first_level() -> u32 {
    1
}

/// A party member as written in content.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberSpec {
    pub name: String,
    pub class: CharacterClass,
    #[cfg_attr(feature = "serde", serde(default = "first_level"))]
    pub level: u32,
    /// Skill names, resolved against the skill catalog.
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<String>,
    /// Equipment item names, resolved against the item catalog.
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: Vec<String>,
}

/// The party and inventory a new game starts with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartySpec {
    /// Overrides the configured starting gold.
    #[cfg_attr(feature = "serde", serde(default))]
    pub gold: Option<u32>,
    pub members: Vec<MemberSpec>,
    /// `(item name, quantity)` pairs.
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory: Vec<(String, u32)>,
}
