//! The persistent player roster.

use arrayvec::ArrayVec;

use super::member::PartyMember;
use super::Combatant;
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};

/// Errors raised by roster and gold management.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PartyError {
    #[error("party is full ({active} active, {reserve} reserve)")]
    Full { active: usize, reserve: usize },

    #[error("active roster is full")]
    ActiveFull,

    #[error("reserve roster is full")]
    ReserveFull,

    #[error("no active member at index {index}")]
    InvalidActiveIndex { index: usize },

    #[error("no reserve member at index {index}")]
    InvalidReserveIndex { index: usize },

    #[error("no member at index {index}")]
    InvalidIndex { index: usize },

    #[error("gold amount must be positive")]
    InvalidAmount,

    #[error("need {required} gold, have {available}")]
    InsufficientGold { required: u32, available: u32 },
}

impl GameError for PartyError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Full { .. }
            | Self::ActiveFull
            | Self::ReserveFull
            | Self::InsufficientGold { .. } => ErrorSeverity::Recoverable,
            Self::InvalidActiveIndex { .. }
            | Self::InvalidReserveIndex { .. }
            | Self::InvalidIndex { .. }
            | Self::InvalidAmount => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Full { .. } => "PARTY_FULL",
            Self::ActiveFull => "PARTY_ACTIVE_FULL",
            Self::ReserveFull => "PARTY_RESERVE_FULL",
            Self::InvalidActiveIndex { .. } => "PARTY_INVALID_ACTIVE_INDEX",
            Self::InvalidReserveIndex { .. } => "PARTY_INVALID_RESERVE_INDEX",
            Self::InvalidIndex { .. } => "PARTY_INVALID_INDEX",
            Self::InvalidAmount => "PARTY_INVALID_AMOUNT",
            Self::InsufficientGold { .. } => "PARTY_INSUFFICIENT_GOLD",
        }
    }
}

/// Active members fight; reserve members wait on the bench.
///
/// Indices passed to [`Party::remove_member`] run across the active roster
/// first and then the reserve.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Party {
    active: ArrayVec<PartyMember, { GameConfig::MAX_ACTIVE_MEMBERS }>,
    reserve: ArrayVec<PartyMember, { GameConfig::MAX_RESERVE_MEMBERS }>,
    gold: u32,
}

impl Party {
    pub fn new() -> Self {
        Self::with_gold(GameConfig::DEFAULT_STARTING_GOLD)
    }

    pub fn with_gold(gold: u32) -> Self {
        Self {
            active: ArrayVec::new(),
            reserve: ArrayVec::new(),
            gold,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::with_gold(config.starting_gold)
    }

    // ===== roster management =====

    /// Adds to the active roster, or to the reserve once it is full.
    pub fn add_member(&mut self, member: PartyMember) -> Result<(), PartyError> {
        let member = match self.active.try_push(member) {
            Ok(()) => return Ok(()),
            Err(err) => err.element(),
        };
        self.reserve.try_push(member).map_err(|_| PartyError::Full {
            active: self.active.len(),
            reserve: self.reserve.len(),
        })
    }

    pub fn remove_member(&mut self, index: usize) -> Result<PartyMember, PartyError> {
        let active = self.active.len();
        if index < active {
            return Ok(self.active.remove(index));
        }
        if index - active < self.reserve.len() {
            return Ok(self.reserve.remove(index - active));
        }
        Err(PartyError::InvalidIndex { index })
    }

    /// Swaps two active members (battle order).
    pub fn swap_members(&mut self, first: usize, second: usize) -> Result<(), PartyError> {
        for index in [first, second] {
            if index >= self.active.len() {
                return Err(PartyError::InvalidActiveIndex { index });
            }
        }
        self.active.swap(first, second);
        Ok(())
    }

    pub fn move_to_reserve(&mut self, active_index: usize) -> Result<(), PartyError> {
        if active_index >= self.active.len() {
            return Err(PartyError::InvalidActiveIndex {
                index: active_index,
            });
        }
        if self.reserve.is_full() {
            return Err(PartyError::ReserveFull);
        }
        let member = self.active.remove(active_index);
        self.reserve.push(member);
        Ok(())
    }

    pub fn move_to_active(&mut self, reserve_index: usize) -> Result<(), PartyError> {
        if reserve_index >= self.reserve.len() {
            return Err(PartyError::InvalidReserveIndex {
                index: reserve_index,
            });
        }
        if self.active.is_full() {
            return Err(PartyError::ActiveFull);
        }
        let member = self.reserve.remove(reserve_index);
        self.active.push(member);
        Ok(())
    }

    // ===== access =====

    pub fn active_member(&self, index: usize) -> Option<&PartyMember> {
        self.active.get(index)
    }

    pub fn active_member_mut(&mut self, index: usize) -> Option<&mut PartyMember> {
        self.active.get_mut(index)
    }

    pub fn reserve_member(&self, index: usize) -> Option<&PartyMember> {
        self.reserve.get(index)
    }

    pub fn reserve_member_mut(&mut self, index: usize) -> Option<&mut PartyMember> {
        self.reserve.get_mut(index)
    }

    pub fn active_members(&self) -> &[PartyMember] {
        &self.active
    }

    pub fn active_members_mut(&mut self) -> &mut [PartyMember] {
        &mut self.active
    }

    pub fn reserve_members(&self) -> &[PartyMember] {
        &self.reserve
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn reserve_count(&self) -> usize {
        self.reserve.len()
    }

    pub fn total_count(&self) -> usize {
        self.active.len() + self.reserve.len()
    }

    /// Indices of living active members, in roster order.
    pub fn living_indices(&self) -> Vec<usize> {
        self.active
            .iter()
            .enumerate()
            .filter(|(_, member)| member.is_alive())
            .map(|(index, _)| index)
            .collect()
    }

    /// True when every active member is down.
    ///
    /// An empty active roster is *not* all dead, so a battle with no active
    /// members never ends in defeat.
    pub fn is_all_dead(&self) -> bool {
        !self.active.is_empty() && self.active.iter().all(|member| member.stats().is_dead())
    }

    pub fn has_alive_members(&self) -> bool {
        !self.is_all_dead()
    }

    // ===== group effects (active roster only) =====

    pub fn heal_all(&mut self, amount: i32) {
        for member in &mut self.active {
            member.stats_mut().heal(amount);
        }
    }

    pub fn restore_all_mp(&mut self, amount: i32) {
        for member in &mut self.active {
            member.stats_mut().restore_mp(amount);
        }
    }

    /// Awards `exp` to every active member; returns total levels gained.
    pub fn gain_experience_all(&mut self, exp: u32) -> u32 {
        let mut levels = 0;
        for member in &mut self.active {
            let gained = member.stats_mut().gain_experience(exp);
            if gained > 0 {
                tracing::info!(
                    member = member.name(),
                    level = member.stats().level(),
                    gained,
                    "level up"
                );
            }
            levels += gained;
        }
        levels
    }

    // ===== gold =====

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    pub fn spend_gold(&mut self, amount: u32) -> Result<(), PartyError> {
        if amount == 0 {
            return Err(PartyError::InvalidAmount);
        }
        if amount > self.gold {
            return Err(PartyError::InsufficientGold {
                required: amount,
                available: self.gold,
            });
        }
        self.gold -= amount;
        Ok(())
    }
}

impl Default for Party {
    fn default() -> Self {
        Self::new()
    }
}
