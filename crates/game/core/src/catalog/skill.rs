//! Skill descriptors.

use strum::{Display, EnumIter};

/// What a skill does when it resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillType {
    /// Damaging spell.
    OffensiveMagic,
    /// HP restoration.
    HealingMagic,
    /// Stat increase. Declared for content; resolves without effect.
    Buff,
    /// Stat decrease. Declared for content; resolves without effect.
    Debuff,
}

/// Who a skill may be aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetType {
    SingleEnemy,
    AllEnemies,
    SingleAlly,
    AllAllies,
    #[strum(serialize = "Self")]
    SelfOnly,
}

/// Immutable description of a usable skill.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub kind: SkillType,
    pub target: TargetType,
    pub mp_cost: i32,
    /// Damage or healing amount.
    pub power: i32,
}

impl Skill {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: SkillType,
        target: TargetType,
        mp_cost: i32,
        power: i32,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            target,
            mp_cost,
            power,
        }
    }

    pub fn is_offensive(&self) -> bool {
        self.kind == SkillType::OffensiveMagic
    }

    pub fn is_healing(&self) -> bool {
        self.kind == SkillType::HealingMagic
    }

    pub fn targets_enemy(&self) -> bool {
        matches!(self.target, TargetType::SingleEnemy | TargetType::AllEnemies)
    }

    pub fn targets_ally(&self) -> bool {
        matches!(
            self.target,
            TargetType::SingleAlly | TargetType::AllAllies | TargetType::SelfOnly
        )
    }

    pub fn is_multi_target(&self) -> bool {
        matches!(self.target, TargetType::AllEnemies | TargetType::AllAllies)
    }
}
