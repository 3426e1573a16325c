use std::cell::RefCell;
use std::rc::Rc;

use jrpg_core::engine::{Rejection, SkipReason};
use jrpg_core::{
    AiBehavior, AttackOutcome, BattleCommand, BattleContext, BattleEngine, BattleEvent,
    BattleOutcome, BattleState, CharacterClass, Combatant, CombatantRef, Enemy, EnemyFormation,
    FrameInput, GameConfig, Inventory, Item, ItemEffect, ItemKind, Party, PartyMember, RngOracle,
    ScriptedRng, Skill, SkillType, TargetType,
};
use jrpg_core::{EquipmentType, StatBonuses};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct Harness<R: RngOracle> {
    engine: BattleEngine<R>,
    party: Party,
    inventory: Inventory,
    ended: Rc<RefCell<Vec<bool>>>,
}

impl<R: RngOracle> Harness<R> {
    fn start(rng: R, party: Party, formation: EnemyFormation, inventory: Inventory) -> Self {
        init_tracing();
        let mut engine = BattleEngine::new(GameConfig::default(), rng);
        let ended = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&ended);
        engine.set_on_battle_end(move |won| sink.borrow_mut().push(won));
        engine.set_enemy_formation(formation);
        engine.on_enter(&party);
        Self {
            engine,
            party,
            inventory,
            ended,
        }
    }

    fn tick(&mut self, input: FrameInput) -> Option<BattleOutcome> {
        let mut ctx = BattleContext::new(&mut self.party, &mut self.inventory);
        self.engine.update(&mut ctx, &input)
    }

    fn idle(&mut self) -> Option<BattleOutcome> {
        self.tick(FrameInput::empty())
    }

    /// Holds confirm every frame until the battle concludes.
    fn confirm_until_end(&mut self, max_ticks: usize) -> BattleOutcome {
        for _ in 0..max_ticks {
            if let Some(outcome) = self.tick(FrameInput::CONFIRM) {
                return outcome;
            }
        }
        panic!("battle still in {} after {max_ticks} ticks", self.engine.state());
    }

    fn state(&self) -> BattleState {
        self.engine.state()
    }

    fn enemy_hp(&self, index: usize) -> i32 {
        self.engine
            .formation()
            .and_then(|formation| formation.enemy(index))
            .map(|enemy| enemy.stats().hp())
            .unwrap_or_default()
    }

    fn member(&self, index: usize) -> &PartyMember {
        &self.party.active_members()[index]
    }
}

fn party_of(members: impl IntoIterator<Item = PartyMember>) -> Party {
    let mut party = Party::new();
    for member in members {
        party.add_member(member).unwrap();
    }
    party
}

fn warrior(level: u32) -> PartyMember {
    PartyMember::new("Aldric", CharacterClass::Warrior, level)
}

fn slime() -> Enemy {
    Enemy::new("Slime", 1, AiBehavior::Aggressive)
}

fn goblin() -> Enemy {
    Enemy::new("Goblin", 2, AiBehavior::Balanced)
}

fn formation_of(enemies: impl IntoIterator<Item = Enemy>) -> EnemyFormation {
    enemies.into_iter().collect()
}

#[test]
fn level_ten_warrior_hits_level_one_enemy_for_28() {
    // initiative 0/0, hit roll passes, crit roll fails
    let rng = ScriptedRng::new([0, 0, 0, 99]);
    let mut h = Harness::start(rng, party_of([warrior(10)]), formation_of([slime()]), Inventory::default());

    h.idle();
    assert_eq!(h.state(), BattleState::PlayerSelect);
    assert_eq!(h.engine.command(), BattleCommand::Attack);
    h.tick(FrameInput::CONFIRM);
    assert_eq!(h.state(), BattleState::TargetSelect);
    h.tick(FrameInput::CONFIRM);
    assert_eq!(h.state(), BattleState::ExecutingAction);
    h.idle();
    assert_eq!(h.state(), BattleState::TurnEnd);

    assert_eq!(h.enemy_hp(0), 22);
    assert!(h.engine.events().contains(&BattleEvent::Attacked {
        actor: CombatantRef::party(0),
        target: CombatantRef::enemy(0),
        outcome: AttackOutcome::Hit {
            damage: 28,
            critical: false
        },
    }));
}

#[test]
fn scripted_battle_ends_in_victory_and_pays_out_once() {
    let rng = ScriptedRng::new([
        0, 0, // round 1 initiative
        0, 99, // warrior hits for 28
        99, // slime misses
        0, 0, // round 2 initiative
        0, 99, // warrior finishes the slime
    ]);
    let mut h = Harness::start(rng, party_of([warrior(10)]), formation_of([slime()]), Inventory::default());

    assert_eq!(h.confirm_until_end(50), BattleOutcome::Victory);
    assert_eq!(*h.ended.borrow(), [true]);

    let stats = h.member(0).stats();
    assert_eq!(stats.experience(), 11);
    assert_eq!(stats.hp(), stats.max_hp());
    assert_eq!(h.party.gold(), 505);
    assert!(h.engine.formation().is_none());
    assert!(h.engine.events().contains(&BattleEvent::Rewarded {
        experience: 11,
        gold: 5,
        levels_gained: 0
    }));

    // Further confirms do nothing.
    assert_eq!(h.tick(FrameInput::CONFIRM), None);
    assert_eq!(h.ended.borrow().len(), 1);
    assert_eq!(h.member(0).stats().experience(), 11);
}

#[test]
fn terminal_state_waits_for_confirm() {
    let mut h = Harness::start(ScriptedRng::default(), party_of([warrior(10)]), EnemyFormation::new(), Inventory::default());

    // Defend: Attack -> Run -> Defend
    h.idle();
    h.tick(FrameInput::UP);
    h.tick(FrameInput::UP | FrameInput::CONFIRM);
    assert_eq!(h.state(), BattleState::ExecutingAction);
    h.idle();
    assert!(h.engine.events().contains(&BattleEvent::Defended {
        actor: CombatantRef::party(0)
    }));
    h.idle();
    // An empty formation counts as beaten.
    assert_eq!(h.state(), BattleState::Victory);

    for _ in 0..5 {
        assert_eq!(h.idle(), None);
        assert_eq!(h.state(), BattleState::Victory);
    }
    assert!(h.ended.borrow().is_empty());
    assert_eq!(h.tick(FrameInput::CONFIRM), Some(BattleOutcome::Victory));
}

#[test]
fn defeat_reports_false_and_awards_nothing() {
    // Every roll is 0: all hits land and crit.
    let rng = ScriptedRng::default();
    let ogre = Enemy::new("Ogre", 20, AiBehavior::Aggressive);
    let mut h = Harness::start(rng, party_of([warrior(1)]), formation_of([ogre]), Inventory::default());

    assert_eq!(h.confirm_until_end(20), BattleOutcome::Defeat);
    assert_eq!(*h.ended.borrow(), [false]);
    assert!(h.member(0).stats().is_dead());
    assert_eq!(h.member(0).stats().experience(), 0);
    assert_eq!(h.party.gold(), 500);
    assert!(h.engine.formation().is_none());
}

#[test]
fn empty_active_party_is_never_defeated() {
    let mut h = Harness::start(
        jrpg_core::PcgRng::seeded(5),
        Party::new(),
        formation_of([slime()]),
        Inventory::default(),
    );

    for _ in 0..200 {
        h.tick(FrameInput::CONFIRM);
        assert!(!h.state().is_terminal(), "reached {}", h.state());
    }
    assert!(h.engine.events().iter().any(|event| matches!(
        event,
        BattleEvent::TurnSkipped {
            reason: SkipReason::NoTarget,
            ..
        }
    )));
}

#[test]
fn run_succeeds_about_half_the_time() {
    init_tracing();
    let mut engine = BattleEngine::with_seed(GameConfig::default(), 0xBA77_1E);
    let mut party = party_of([warrior(10)]);
    let mut inventory = Inventory::default();

    let trials = 2_000;
    let mut fled = 0;
    for _ in 0..trials {
        engine.set_enemy_formation(formation_of([slime()]));
        engine.on_enter(&party);

        let mut ctx = BattleContext::new(&mut party, &mut inventory);
        engine.update(&mut ctx, &FrameInput::empty());
        // The warrior's initiative (32+) always beats the slime's (at most 19).
        assert_eq!(engine.state(), BattleState::PlayerSelect);
        engine.update(&mut ctx, &(FrameInput::UP | FrameInput::CONFIRM));
        assert_eq!(engine.state(), BattleState::ExecutingAction);
        engine.update(&mut ctx, &FrameInput::empty());

        match engine.state() {
            BattleState::Fled => {
                fled += 1;
                // Fleeing skips the victory/defeat checks entirely.
                assert!(engine.formation().is_some_and(|f| !f.all_enemies_dead()));
            }
            BattleState::TurnEnd => {}
            other => panic!("unexpected state after RUN: {other}"),
        }
        engine.on_exit();
    }

    let ratio = f64::from(fled) / f64::from(trials);
    assert!((0.45..=0.55).contains(&ratio), "flee ratio {ratio}");
}

#[test]
fn successful_flee_still_awards_experience() {
    // three initiative rolls, then a flee roll of 0
    let rng = ScriptedRng::new([0, 0, 0, 0]);
    let mut h = Harness::start(rng, party_of([warrior(10)]), formation_of([slime(), goblin()]), Inventory::default());

    h.idle();
    h.tick(FrameInput::UP | FrameInput::CONFIRM);
    h.idle();
    assert_eq!(h.state(), BattleState::Fled);
    assert_eq!(h.tick(FrameInput::CONFIRM), Some(BattleOutcome::Fled));

    assert_eq!(*h.ended.borrow(), [true]);
    assert_eq!(h.member(0).stats().experience(), 35);
    assert_eq!(h.party.gold(), 516);
}

#[test]
fn action_on_target_killed_since_selection_is_a_no_op() {
    let rng = ScriptedRng::default();
    let mut h = Harness::start(rng, party_of([warrior(10)]), formation_of([slime(), goblin()]), Inventory::default());

    h.idle();
    h.tick(FrameInput::CONFIRM);
    h.tick(FrameInput::CONFIRM);
    assert_eq!(h.engine.selected_target(), Some(CombatantRef::enemy(0)));

    if let Some(enemy) = h.engine.formation_mut().and_then(|f| f.enemy_mut(0)) {
        enemy.stats_mut().take_damage(999);
    }
    h.idle();

    assert_eq!(h.state(), BattleState::TurnEnd);
    assert_eq!(h.enemy_hp(1), 58);
    assert!(h.engine.events().contains(&BattleEvent::TurnSkipped {
        actor: CombatantRef::party(0),
        reason: SkipReason::TargetDown,
    }));
}

#[test]
fn target_cursor_wraps_and_cancel_returns_to_commands() {
    let rng = ScriptedRng::default();
    let mut h = Harness::start(rng, party_of([warrior(10)]), formation_of([slime(), goblin()]), Inventory::default());

    h.idle();
    h.tick(FrameInput::CONFIRM);
    let view = h.engine.view(&h.party, &h.inventory);
    assert_eq!(view.targets, [CombatantRef::enemy(0), CombatantRef::enemy(1)]);

    h.tick(FrameInput::LEFT);
    let view = h.engine.view(&h.party, &h.inventory);
    assert_eq!(view.highlighted_target(), Some(CombatantRef::enemy(1)));
    h.tick(FrameInput::RIGHT);
    let view = h.engine.view(&h.party, &h.inventory);
    assert_eq!(view.highlighted_target(), Some(CombatantRef::enemy(0)));

    h.tick(FrameInput::CANCEL);
    assert_eq!(h.state(), BattleState::PlayerSelect);
    assert!(h.engine.pending_action().is_none());
}

fn fire() -> Skill {
    Skill::new("Fire", "", SkillType::OffensiveMagic, TargetType::SingleEnemy, 5, 25)
}

fn meteor() -> Skill {
    Skill::new("Meteor", "", SkillType::OffensiveMagic, TargetType::AllEnemies, 99, 200)
}

#[test]
fn skill_menu_rejects_unaffordable_and_casts_exact_power() {
    let mut mage = PartyMember::new("Lyra", CharacterClass::Mage, 1);
    mage.learn_skill(fire());
    mage.learn_skill(meteor());
    // mage 10+9 beats slime 10+0
    let rng = ScriptedRng::new([9, 0]);
    let mut h = Harness::start(rng, party_of([mage]), formation_of([slime()]), Inventory::default());

    h.idle();
    h.tick(FrameInput::DOWN | FrameInput::CONFIRM);
    assert_eq!(h.state(), BattleState::SkillSelect);
    let view = h.engine.view(&h.party, &h.inventory);
    let enabled: Vec<_> = view.options.iter().map(|o| o.enabled).collect();
    assert_eq!(enabled, [true, false]);

    h.tick(FrameInput::DOWN | FrameInput::CONFIRM);
    assert_eq!(h.state(), BattleState::SkillSelect);
    assert!(h.engine.events().contains(&BattleEvent::SelectionRejected(
        Rejection::InsufficientMp {
            skill: "Meteor".into(),
            cost: 99,
            available: 20
        }
    )));

    h.tick(FrameInput::UP | FrameInput::CONFIRM);
    assert_eq!(h.state(), BattleState::TargetSelect);
    h.tick(FrameInput::CANCEL);
    assert_eq!(h.state(), BattleState::SkillSelect);
    assert!(h.engine.pending_action().is_none());

    h.tick(FrameInput::CONFIRM);
    h.tick(FrameInput::CONFIRM);
    assert_eq!(h.state(), BattleState::ExecutingAction);
    h.idle();

    assert_eq!(h.enemy_hp(0), 25);
    assert_eq!(h.member(0).stats().mp(), 15);
}

#[test]
fn empty_skill_list_falls_back_to_commands() {
    let rng = ScriptedRng::default();
    let mut h = Harness::start(rng, party_of([warrior(10)]), formation_of([slime()]), Inventory::default());

    h.idle();
    h.tick(FrameInput::DOWN | FrameInput::CONFIRM);
    assert_eq!(h.state(), BattleState::SkillSelect);
    h.idle();
    assert_eq!(h.state(), BattleState::PlayerSelect);
    assert!(h
        .engine
        .events()
        .contains(&BattleEvent::SelectionRejected(Rejection::NoSkills)));
}

#[test]
fn group_heal_spends_mp_once_and_reaches_the_fallen() {
    let mut cleric = PartyMember::new("Mira", CharacterClass::Cleric, 1);
    cleric.learn_skill(Skill::new(
        "Heal All",
        "",
        SkillType::HealingMagic,
        TargetType::AllAllies,
        12,
        20,
    ));
    cleric.stats_mut().take_damage(5);
    let mut fighter = warrior(1);
    fighter.stats_mut().take_damage(30);
    let mut thief = PartyMember::new("Vex", CharacterClass::Thief, 1);
    thief.stats_mut().take_damage(999);

    // cleric 19, fighter 10, slime 10; the fallen thief gets no roll
    let rng = ScriptedRng::new([9, 0, 0]);
    let mut h = Harness::start(rng, party_of([cleric, fighter, thief]), formation_of([slime()]), Inventory::default());

    h.idle();
    assert_eq!(h.engine.current_actor().map(|a| a.combatant()), Some(CombatantRef::party(0)));
    h.tick(FrameInput::DOWN | FrameInput::CONFIRM);
    h.tick(FrameInput::CONFIRM);
    assert_eq!(h.engine.view(&h.party, &h.inventory).targets.len(), 3);
    h.tick(FrameInput::CONFIRM);
    h.idle();

    assert_eq!(h.member(0).stats().mp(), 8);
    assert_eq!(h.member(0).stats().hp(), 50);
    assert_eq!(h.member(1).stats().hp(), 40);
    assert_eq!(h.member(2).stats().hp(), 20);
    assert!(h.member(2).is_alive());
    assert!(h.engine.events().contains(&BattleEvent::Healed {
        target: CombatantRef::party(2),
        amount: 20
    }));
}

#[test]
fn battle_items_debit_one_unit() {
    let mut inventory = Inventory::default();
    inventory
        .add_item(&Item::consumable("Potion", ItemEffect::RestoreHp, 50), 2)
        .unwrap();
    inventory.add_item(&Item::new("Old Key", "", ItemKind::KeyItem), 1).unwrap();
    inventory
        .add_item(
            &Item::equipment("Sword", EquipmentType::Weapon, StatBonuses::new(8, 0, 0, 0)),
            1,
        )
        .unwrap();

    let mut hurt = warrior(10);
    hurt.stats_mut().take_damage(60);
    let mut h = Harness::start(ScriptedRng::default(), party_of([hurt]), formation_of([slime()]), inventory);

    h.idle();
    h.tick(FrameInput::DOWN);
    h.tick(FrameInput::DOWN | FrameInput::CONFIRM);
    assert_eq!(h.state(), BattleState::ItemSelect);
    let labels: Vec<_> = h
        .engine
        .view(&h.party, &h.inventory)
        .options
        .into_iter()
        .map(|o| o.label)
        .collect();
    assert_eq!(labels, ["Potion"]);

    h.tick(FrameInput::CONFIRM);
    assert_eq!(h.state(), BattleState::TargetSelect);
    h.tick(FrameInput::CONFIRM);
    h.idle();

    assert_eq!(h.member(0).stats().hp(), 112);
    assert_eq!(h.inventory.count("Potion"), 1);
    assert_eq!(h.inventory.count("Old Key"), 1);
}

#[test]
fn cancelling_an_item_target_returns_to_the_item_menu() {
    let mut inventory = Inventory::default();
    inventory
        .add_item(&Item::consumable("Potion", ItemEffect::RestoreHp, 50), 1)
        .unwrap();
    let mut h = Harness::start(ScriptedRng::default(), party_of([warrior(10)]), formation_of([slime()]), inventory);

    h.idle();
    h.tick(FrameInput::DOWN);
    h.tick(FrameInput::DOWN | FrameInput::CONFIRM);
    h.tick(FrameInput::CONFIRM);
    assert_eq!(h.state(), BattleState::TargetSelect);
    assert!(h.engine.pending_action().is_some());

    h.tick(FrameInput::CANCEL);
    assert_eq!(h.state(), BattleState::ItemSelect);
    assert!(h.engine.pending_action().is_none());
    assert_eq!(h.inventory.count("Potion"), 1);

    h.tick(FrameInput::CANCEL);
    assert_eq!(h.state(), BattleState::PlayerSelect);
}

#[test]
fn no_usable_items_falls_back_to_commands() {
    let mut inventory = Inventory::default();
    inventory.add_item(&Item::new("Iron Ore", "", ItemKind::Material), 3).unwrap();
    let mut h = Harness::start(ScriptedRng::default(), party_of([warrior(10)]), formation_of([slime()]), inventory);

    h.idle();
    h.tick(FrameInput::DOWN);
    h.tick(FrameInput::DOWN | FrameInput::CONFIRM);
    h.idle();
    assert_eq!(h.state(), BattleState::PlayerSelect);
    assert!(h
        .engine
        .events()
        .contains(&BattleEvent::SelectionRejected(Rejection::NoUsableItems)));
}

#[test]
fn revive_item_brings_back_a_fallen_ally() {
    let mut inventory = Inventory::default();
    inventory
        .add_item(&Item::consumable("Phoenix Down", ItemEffect::Revive, 0), 1)
        .unwrap();
    let mut fallen = PartyMember::new("Lyra", CharacterClass::Mage, 1);
    fallen.stats_mut().take_damage(999);
    let mut h = Harness::start(ScriptedRng::default(), party_of([warrior(10), fallen]), formation_of([slime()]), inventory);

    h.idle();
    h.tick(FrameInput::DOWN);
    h.tick(FrameInput::DOWN | FrameInput::CONFIRM);
    h.tick(FrameInput::CONFIRM);
    h.tick(FrameInput::RIGHT | FrameInput::CONFIRM);
    assert_eq!(h.engine.selected_target(), Some(CombatantRef::party(1)));
    h.idle();

    assert_eq!(h.member(1).stats().hp(), 25);
    assert!(!h.inventory.has_item("Phoenix Down"));
}

#[test]
fn same_seed_same_battle() {
    fn play(seed: u64) -> (Vec<BattleEvent>, Party) {
        let mut party = party_of([warrior(3), PartyMember::new("Vex", CharacterClass::Thief, 2)]);
        let mut inventory = Inventory::default();
        let mut engine = BattleEngine::with_seed(GameConfig::default(), seed);
        engine.set_enemy_formation(formation_of([slime(), goblin()]));
        engine.on_enter(&party);

        let mut ctx = BattleContext::new(&mut party, &mut inventory);
        for _ in 0..500 {
            if engine.update(&mut ctx, &FrameInput::CONFIRM).is_some() {
                break;
            }
        }
        assert!(engine.is_concluded());
        (engine.drain_events(), party)
    }

    let (events_a, party_a) = play(77);
    let (events_b, party_b) = play(77);
    assert_eq!(events_a, events_b);
    assert_eq!(party_a, party_b);
}

#[test]
fn view_reflects_rosters_and_order() {
    let mut h = Harness::start(
        ScriptedRng::default(),
        party_of([warrior(10), PartyMember::new("Lyra", CharacterClass::Mage, 1)]),
        formation_of([slime(), goblin()]),
        Inventory::default(),
    );

    let view = h.engine.view(&h.party, &h.inventory);
    assert_eq!(view.state, BattleState::TurnStart);
    assert_eq!(view.party.len(), 2);
    assert_eq!(view.enemies.len(), 2);
    assert_eq!(view.turn_order.len(), 4);
    assert_eq!(view.enemies[1].name, "Goblin");
    assert_eq!(view.enemies[1].max_hp, 58);

    h.idle();
    let view = h.engine.view(&h.party, &h.inventory);
    assert_eq!(view.state, BattleState::PlayerSelect);
    assert_eq!(view.current_actor.map(|a| a.combatant()), Some(CombatantRef::party(0)));
}
