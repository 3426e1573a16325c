//! Static descriptors consumed by the roster, inventory and battle engine.

pub mod item;
pub mod skill;

pub use item::{Equipment, EquipmentType, Item, ItemEffect, ItemKind, ItemType};
pub use skill::{Skill, SkillType, TargetType};
