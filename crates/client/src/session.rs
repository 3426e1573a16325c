//! World state shared by every scene.

use anyhow::Result;
use jrpg_content::Content;
use jrpg_core::{BattleOutcome, Inventory, Party};

/// The persistent game: loaded content, the party and its inventory.
pub struct Session {
    pub content: Content,
    pub party: Party,
    pub inventory: Inventory,
    /// Encounter the next battle should use.
    pub next_encounter: Option<String>,
    pub last_outcome: Option<BattleOutcome>,
    pub battles_fought: u32,
}

impl Session {
    /// Starts a new game from `content`.
    pub fn new(content: Content) -> Result<Self> {
        let (party, inventory) = content.new_game()?;
        Ok(Self {
            content,
            party,
            inventory,
            next_encounter: None,
            last_outcome: None,
            battles_fought: 0,
        })
    }
}
