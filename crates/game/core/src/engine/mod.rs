//! Battle state machine.
//!
//! [`BattleEngine`] owns everything transient about one battle: the enemy
//! formation, the round's turn order, the player's in-progress menu
//! selection and the RNG. The persistent [`Party`] and [`Inventory`] stay with
//! the host and are lent to the engine for each [`BattleEngine::update`]
//! call through a [`BattleContext`].
//!
//! Each `update` performs at most one state transition. Invalid selections
//! never fail: they are logged, recorded as [`BattleEvent::SelectionRejected`]
//! and leave the engine where it was. The only signal a host must react to is
//! the battle-end callback (or the outcome returned by `update`).

mod events;
mod input;
mod resolve;
mod state;
mod turns;
mod view;

pub use events::{BattleEvent, Rejection, SkipReason};
pub use input::{BattleKey, FrameInput, InputSource};
pub use state::{BattleCommand, BattleOutcome, BattleState};
pub use turns::{BattleActor, CombatantRef, Side, TurnError, TurnOrder};
pub use view::{BattleView, CombatantView, MenuOption};

use crate::catalog::{Item, Skill};
use crate::config::GameConfig;
use crate::inventory::Inventory;
use crate::rng::{PcgRng, RngOracle};
use crate::roster::{Combatant, EnemyFormation, Party, PartyMember};

/// Borrowed persistent state the engine reads and mutates during a tick.
#[derive(Debug)]
pub struct BattleContext<'a> {
    pub party: &'a mut Party,
    pub inventory: &'a mut Inventory,
}

impl<'a> BattleContext<'a> {
    pub fn new(party: &'a mut Party, inventory: &'a mut Inventory) -> Self {
        Self { party, inventory }
    }
}

/// Action captured by the menus (or the AI) and resolved in EXECUTING_ACTION.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingAction {
    Attack,
    Skill(Skill),
    Item(Item),
    Defend,
    Run,
    EnemyAttack,
}

/// Invoked once per battle with `won = true` for victory or a successful
/// flee and `false` for defeat.
pub type BattleEndCallback = Box<dyn FnMut(bool)>;

pub struct BattleEngine<R: RngOracle = PcgRng> {
    config: GameConfig,
    rng: R,
    state: BattleState,
    formation: Option<EnemyFormation>,
    turn_order: TurnOrder,
    command: BattleCommand,
    skill_cursor: usize,
    item_cursor: usize,
    target_cursor: usize,
    pending: Option<PendingAction>,
    target: Option<CombatantRef>,
    on_battle_end: Option<BattleEndCallback>,
    events: Vec<BattleEvent>,
    concluded: bool,
}

impl BattleEngine<PcgRng> {
    /// Engine whose rolls replay exactly for the same seed and inputs.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::new(config, PcgRng::seeded(seed))
    }

    pub fn from_entropy(config: GameConfig) -> Self {
        Self::new(config, PcgRng::from_entropy())
    }
}

impl<R: RngOracle> BattleEngine<R> {
    pub fn new(config: GameConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            state: BattleState::TurnStart,
            formation: None,
            turn_order: TurnOrder::new(),
            command: BattleCommand::Attack,
            skill_cursor: 0,
            item_cursor: 0,
            target_cursor: 0,
            pending: None,
            target: None,
            on_battle_end: None,
            events: Vec::new(),
            concluded: false,
        }
    }

    // ===== host wiring =====

    /// Supplies the enemies for the next battle, replacing any leftover.
    pub fn set_enemy_formation(&mut self, formation: EnemyFormation) {
        self.formation = Some(formation);
    }

    pub fn set_on_battle_end(&mut self, callback: impl FnMut(bool) + 'static) {
        self.on_battle_end = Some(Box::new(callback));
    }

    /// Starts a battle: resets the selection state and builds the first
    /// round's turn order.
    pub fn on_enter(&mut self, party: &Party) {
        self.state = BattleState::TurnStart;
        self.command = BattleCommand::Attack;
        self.skill_cursor = 0;
        self.item_cursor = 0;
        self.target_cursor = 0;
        self.pending = None;
        self.target = None;
        self.concluded = false;

        let enemies = self.formation.as_ref().map_or(0, EnemyFormation::len);
        tracing::info!(enemies, party = party.active_count(), "battle started");
        self.events.push(BattleEvent::BattleStarted { enemies });

        self.rebuild_turn_order(party);
    }

    pub fn on_exit(&mut self) {
        self.turn_order.clear();
        self.pending = None;
        self.target = None;
    }

    // ===== per-frame driver =====

    /// Advances the battle by at most one state transition.
    ///
    /// Returns the outcome on the tick the battle concludes (the confirm in
    /// a terminal state), after rewards and the callback have run.
    pub fn update(
        &mut self,
        ctx: &mut BattleContext<'_>,
        input: &dyn InputSource,
    ) -> Option<BattleOutcome> {
        let before = self.state;

        let concluded = match self.state {
            BattleState::TurnStart => {
                self.start_turn(ctx.party);
                None
            }
            BattleState::PlayerSelect => {
                self.select_command(input);
                None
            }
            BattleState::SkillSelect => {
                self.select_skill(ctx.party, input);
                None
            }
            BattleState::ItemSelect => {
                self.select_item(ctx.inventory, input);
                None
            }
            BattleState::TargetSelect => {
                self.select_target(ctx.party, input);
                None
            }
            BattleState::EnemySelect => {
                self.choose_enemy_action(ctx.party);
                None
            }
            BattleState::ExecutingAction => {
                self.execute_action(ctx);
                None
            }
            BattleState::TurnEnd => {
                self.check_battle_end(ctx.party);
                None
            }
            BattleState::Victory | BattleState::Defeat | BattleState::Fled => {
                self.await_exit(ctx.party, input)
            }
        };

        if self.state != before {
            tracing::debug!(from = %before, to = %self.state, "battle state");
        }
        concluded
    }

    // ===== accessors =====

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn command(&self) -> BattleCommand {
        self.command
    }

    pub fn pending_action(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    pub fn selected_target(&self) -> Option<CombatantRef> {
        self.target
    }

    pub fn current_actor(&self) -> Option<BattleActor> {
        self.turn_order.current()
    }

    pub fn turn_order(&self) -> &TurnOrder {
        &self.turn_order
    }

    pub fn formation(&self) -> Option<&EnemyFormation> {
        self.formation.as_ref()
    }

    pub fn formation_mut(&mut self) -> Option<&mut EnemyFormation> {
        self.formation.as_mut()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// True once the terminal confirm has been handled.
    pub fn is_concluded(&self) -> bool {
        self.concluded
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    // ===== TURN_START =====

    fn rebuild_turn_order(&mut self, party: &Party) {
        match self.turn_order.rebuild(
            party,
            self.formation.as_ref(),
            &mut self.rng,
            self.config.initiative_spread,
        ) {
            Ok(()) => self.events.push(BattleEvent::RoundStarted {
                actors: self.turn_order.len(),
            }),
            Err(err) => tracing::debug!(%err, "empty turn order"),
        }
    }

    fn start_turn(&mut self, party: &Party) {
        if self.turn_order.is_exhausted() {
            self.rebuild_turn_order(party);
        }

        let Some(actor) = self.turn_order.current() else {
            self.state = BattleState::TurnEnd;
            return;
        };

        if actor.is_party_member() {
            self.state = BattleState::PlayerSelect;
            self.command = BattleCommand::Attack;
            self.target_cursor = 0;
        } else {
            self.state = BattleState::EnemySelect;
        }
    }

    // ===== player menus =====

    fn select_command(&mut self, input: &dyn InputSource) {
        if input.pressed(BattleKey::Up) {
            self.command = self.command.prev();
        }
        if input.pressed(BattleKey::Down) {
            self.command = self.command.next();
        }
        if !input.pressed(BattleKey::Confirm) {
            return;
        }

        self.target = None;
        match self.command {
            BattleCommand::Attack => {
                self.pending = Some(PendingAction::Attack);
                self.target_cursor = 0;
                self.state = BattleState::TargetSelect;
            }
            BattleCommand::Magic => {
                self.skill_cursor = 0;
                self.state = BattleState::SkillSelect;
            }
            BattleCommand::Item => {
                self.item_cursor = 0;
                self.state = BattleState::ItemSelect;
            }
            BattleCommand::Defend => {
                self.pending = Some(PendingAction::Defend);
                self.state = BattleState::ExecutingAction;
            }
            BattleCommand::Run => {
                self.pending = Some(PendingAction::Run);
                self.state = BattleState::ExecutingAction;
            }
        }
    }

    fn select_skill(&mut self, party: &Party, input: &dyn InputSource) {
        let Some(member) = self.acting_member(party) else {
            self.reject(Rejection::NoSkills);
            self.state = BattleState::PlayerSelect;
            return;
        };
        let skills = member.skills();
        if skills.is_empty() {
            self.reject(Rejection::NoSkills);
            self.state = BattleState::PlayerSelect;
            return;
        }

        if input.pressed(BattleKey::Cancel) {
            self.state = BattleState::PlayerSelect;
            return;
        }

        self.skill_cursor = cycle(self.skill_cursor, skills.len(), input);
        if !input.pressed(BattleKey::Confirm) {
            return;
        }

        let Some(skill) = skills.get(self.skill_cursor) else {
            return;
        };
        let stats = member.stats();
        if !stats.has_enough_mp(skill.mp_cost) {
            self.reject(Rejection::InsufficientMp {
                skill: skill.name.clone(),
                cost: skill.mp_cost,
                available: stats.mp(),
            });
            return;
        }

        self.pending = Some(PendingAction::Skill(skill.clone()));
        self.target_cursor = 0;
        self.state = BattleState::TargetSelect;
    }

    fn select_item(&mut self, inventory: &Inventory, input: &dyn InputSource) {
        let usable = inventory.battle_usable();
        if usable.is_empty() {
            self.reject(Rejection::NoUsableItems);
            self.state = BattleState::PlayerSelect;
            return;
        }

        if input.pressed(BattleKey::Cancel) {
            self.state = BattleState::PlayerSelect;
            return;
        }

        self.item_cursor = cycle(self.item_cursor, usable.len(), input);
        if !input.pressed(BattleKey::Confirm) {
            return;
        }

        if let Some(slot) = usable.get(self.item_cursor) {
            self.pending = Some(PendingAction::Item(slot.item.clone()));
            self.target_cursor = 0;
            self.state = BattleState::TargetSelect;
        }
    }

    fn select_target(&mut self, party: &Party, input: &dyn InputSource) {
        if input.pressed(BattleKey::Cancel) {
            self.state = match self.pending.take() {
                Some(PendingAction::Skill(_)) => BattleState::SkillSelect,
                Some(PendingAction::Item(_)) => BattleState::ItemSelect,
                _ => BattleState::PlayerSelect,
            };
            return;
        }

        let targets = self.legal_targets(party);
        self.target_cursor = cycle(self.target_cursor, targets.len(), input);
        if !input.pressed(BattleKey::Confirm) {
            return;
        }

        match targets.get(self.target_cursor) {
            Some(&target) => {
                self.target = Some(target);
                self.state = BattleState::ExecutingAction;
            }
            None => self.reject(Rejection::NoTarget),
        }
    }

    /// Targets the pending action may be aimed at, in roster order.
    ///
    /// Attacks and enemy-side skills aim at living enemies. Every other skill
    /// and every item aims at an active party member, fallen ones included.
    fn legal_targets(&self, party: &Party) -> Vec<CombatantRef> {
        let enemies = || -> Vec<CombatantRef> {
            self.formation
                .as_ref()
                .map(EnemyFormation::living_indices)
                .unwrap_or_default()
                .into_iter()
                .map(CombatantRef::enemy)
                .collect()
        };
        let allies = || -> Vec<CombatantRef> {
            (0..party.active_count()).map(CombatantRef::party).collect()
        };

        match &self.pending {
            Some(PendingAction::Attack) => enemies(),
            Some(PendingAction::Skill(skill)) if skill.is_offensive() || skill.targets_enemy() => {
                enemies()
            }
            Some(PendingAction::Skill(_)) | Some(PendingAction::Item(_)) => allies(),
            _ => Vec::new(),
        }
    }

    fn acting_member<'p>(&self, party: &'p Party) -> Option<&'p PartyMember> {
        self.turn_order
            .current()
            .filter(BattleActor::is_party_member)
            .and_then(|actor| party.active_member(actor.index))
    }

    fn reject(&mut self, rejection: Rejection) {
        tracing::debug!(?rejection, state = %self.state, "selection rejected");
        self.events.push(BattleEvent::SelectionRejected(rejection));
    }

    // ===== ENEMY_SELECT =====

    fn choose_enemy_action(&mut self, party: &Party) {
        let Some(actor) = self.turn_order.current() else {
            tracing::warn!(index = self.turn_order.index(), "enemy turn without an actor");
            self.state = BattleState::TurnEnd;
            return;
        };

        let enemy_alive = self
            .formation
            .as_ref()
            .and_then(|formation| formation.enemy(actor.index))
            .is_some_and(|enemy| enemy.is_alive());
        if !enemy_alive {
            self.skip(actor.combatant(), SkipReason::ActorDown);
            self.turn_order.advance();
            self.state = BattleState::TurnEnd;
            return;
        }

        let living = party.living_indices();
        match self.rng.pick(living.len()) {
            Some(pick) => {
                self.target = Some(CombatantRef::party(living[pick]));
                self.pending = Some(PendingAction::EnemyAttack);
                self.command = BattleCommand::Attack;
                self.state = BattleState::ExecutingAction;
            }
            None => {
                self.skip(actor.combatant(), SkipReason::NoTarget);
                self.turn_order.advance();
                self.state = BattleState::TurnEnd;
            }
        }
    }

    // ===== TURN_END and terminal states =====

    fn check_battle_end(&mut self, party: &Party) {
        // An empty formation counts as beaten; an empty party never loses.
        let enemies_dead = self
            .formation
            .as_ref()
            .is_some_and(EnemyFormation::all_enemies_dead);

        self.state = if enemies_dead {
            BattleState::Victory
        } else if party.is_all_dead() {
            BattleState::Defeat
        } else {
            BattleState::TurnStart
        };

        if let Some(outcome) = self.state.outcome() {
            tracing::info!(%outcome, "battle decided");
        }
    }

    fn await_exit(&mut self, party: &mut Party, input: &dyn InputSource) -> Option<BattleOutcome> {
        if self.concluded || !input.pressed(BattleKey::Confirm) {
            return None;
        }
        let outcome = self.state.outcome()?;
        self.concluded = true;

        let formation = self.formation.take().filter(|_| outcome.won());
        if let Some(formation) = formation {
            let experience = formation.total_exp_reward();
            let gold = formation.total_gold_reward();
            let levels_gained = party.gain_experience_all(experience);
            party.add_gold(gold);

            tracing::info!(experience, gold, levels_gained, "rewards granted");
            self.events.push(BattleEvent::Rewarded {
                experience,
                gold,
                levels_gained,
            });
        }

        self.events.push(BattleEvent::BattleEnded { outcome });
        tracing::info!(%outcome, "battle ended");

        if let Some(callback) = self.on_battle_end.as_mut() {
            callback(outcome.won());
        }
        Some(outcome)
    }
}

/// Moves a wrap-around cursor over `len` entries with Up/Left and
/// Down/Right.
fn cycle(cursor: usize, len: usize, input: &dyn InputSource) -> usize {
    if len == 0 {
        return 0;
    }
    let mut cursor = cursor % len;
    if input.pressed(BattleKey::Up) || input.pressed(BattleKey::Left) {
        cursor = (cursor + len - 1) % len;
    }
    if input.pressed(BattleKey::Down) || input.pressed(BattleKey::Right) {
        cursor = (cursor + 1) % len;
    }
    cursor
}
