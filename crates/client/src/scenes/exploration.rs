//! Headless stand-in for walking the overworld.
//!
//! Between battles the party drinks restoratives on anyone below half HP,
//! then the next configured encounter starts.

use anyhow::Result;
use jrpg_core::roster::use_in_field;
use jrpg_core::{Combatant, ItemEffect};

use crate::scene::{GameState, Scene, SceneSignal};
use crate::session::Session;

pub struct ExplorationScene {
    encounter: String,
    battles_left: u32,
}

impl ExplorationScene {
    pub fn new(encounter: impl Into<String>, battles: u32) -> Self {
        Self {
            encounter: encounter.into(),
            battles_left: battles,
        }
    }

    pub fn battles_left(&self) -> u32 {
        self.battles_left
    }
}

impl Scene for ExplorationScene {
    fn name(&self) -> &'static str {
        "exploration"
    }

    fn on_enter(&mut self, session: &mut Session) -> Result<()> {
        if let Some(outcome) = session.last_outcome {
            tracing::info!(%outcome, battles = session.battles_fought, "back on the map");
        }
        for member in session.party.active_members() {
            let stats = member.stats();
            tracing::info!(
                member = member.name(),
                class = %member.class(),
                level = stats.level(),
                hp = stats.hp(),
                max_hp = stats.max_hp(),
                mp = stats.mp(),
                exp = stats.experience(),
                "party"
            );
        }
        tracing::info!(gold = session.party.gold(), stacks = session.inventory.used_slots(), "wallet");

        patch_up(session);
        Ok(())
    }

    fn on_exit(&mut self, _session: &mut Session) {}

    fn update(&mut self, session: &mut Session) -> Result<SceneSignal> {
        if self.battles_left == 0 || !session.party.has_alive_members() {
            return Ok(SceneSignal::Quit);
        }

        self.battles_left -= 1;
        session.next_encounter = Some(self.encounter.clone());
        tracing::info!(encounter = %self.encounter, "encounter!");
        Ok(SceneSignal::Switch(GameState::Battle))
    }
}

/// Uses HP restoratives on living members below half HP.
fn patch_up(session: &mut Session) {
    for index in session.party.living_indices() {
        loop {
            let Some(member) = session.party.active_member(index) else {
                break;
            };
            if member.stats().hp() * 2 >= member.stats().max_hp() {
                break;
            }

            let Some(potion) = session
                .inventory
                .slots()
                .find(|slot| {
                    slot.item.is_usable_in_field()
                        && matches!(
                            slot.item.effect(),
                            ItemEffect::RestoreHp | ItemEffect::RestoreBoth
                        )
                })
                .map(|slot| slot.item.name.clone())
            else {
                return;
            };

            if let Err(err) = use_in_field(&mut session.party, &mut session.inventory, &potion, index)
            {
                tracing::warn!(%err, item = %potion, "could not use item");
                break;
            }
            tracing::info!(item = %potion, index, "used between battles");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jrpg_content::{Content, MemberSpec, PartySpec};
    use jrpg_core::{CharacterClass, GameConfig, Item};

    fn session() -> Session {
        let party = PartySpec {
            members: vec![MemberSpec {
                name: "Aldric".into(),
                class: CharacterClass::Warrior,
                level: 1,
                skills: Vec::new(),
                equipment: Vec::new(),
            }],
            inventory: vec![("Potion".into(), 2)],
            ..PartySpec::default()
        };
        let items = vec![Item::consumable("Potion", ItemEffect::RestoreHp, 10)];
        Session::new(Content::new(GameConfig::default(), Vec::new(), items, Vec::new(), party))
            .unwrap()
    }

    #[test]
    fn sends_the_party_into_each_battle_then_quits() {
        let mut session = session();
        let mut scene = ExplorationScene::new("ogre", 2);

        for _ in 0..2 {
            assert_eq!(
                scene.update(&mut session).unwrap(),
                SceneSignal::Switch(GameState::Battle)
            );
            assert_eq!(session.next_encounter.take().as_deref(), Some("ogre"));
        }
        assert_eq!(scene.update(&mut session).unwrap(), SceneSignal::Quit);
    }

    #[test]
    fn wounded_members_drink_until_healthy_or_dry() {
        let mut session = session();
        if let Some(member) = session.party.active_member_mut(0) {
            member.stats_mut().take_damage(40);
        }

        ExplorationScene::new("ogre", 1).on_enter(&mut session).unwrap();

        // 10 -> 20 -> 30, and the second potion gets it past half.
        assert_eq!(session.party.active_members()[0].stats().hp(), 30);
        assert!(!session.inventory.has_item("Potion"));
    }

    #[test]
    fn a_wiped_party_goes_home() {
        let mut session = session();
        if let Some(member) = session.party.active_member_mut(0) {
            member.stats_mut().take_damage(999);
        }

        let mut scene = ExplorationScene::new("ogre", 3);
        assert_eq!(scene.update(&mut session).unwrap(), SceneSignal::Quit);
    }
}
