//! Data-driven content for the battle engine.
//!
//! This crate describes the content a game session starts from and provides
//! loaders for the RON/TOML files it ships in `data/`:
//! - Skill catalog (RON)
//! - Item catalog: consumables, equipment, key items and materials (RON)
//! - Enemy encounters (RON)
//! - Starting party and inventory (RON)
//! - Battle configuration (TOML)
//!
//! Encounters are stored as specs and turned into a fresh
//! [`jrpg_core::EnemyFormation`] every time a battle starts.

pub mod specs;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use specs::{EncounterSpec, EnemySpec, MemberSpec, PartySpec};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, Content, ContentFactory, EncounterLoader, ItemLoader, LoadResult, PartyLoader,
    SkillLoader,
};
