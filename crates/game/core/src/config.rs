/// Game configuration constants and tunable battle parameters.
///
/// Limits that shape data structures are associated constants; the odds and
/// rewards that designers tweak live in fields so a host can load them from a
/// data file.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Chance (percent) that a physical attack connects.
    pub hit_chance: u32,
    /// Chance (percent) that a connecting physical attack is critical.
    pub crit_chance: u32,
    /// Damage multiplier applied on a critical hit.
    pub crit_multiplier: i32,
    /// Floor for physical damage after defense is subtracted.
    pub minimum_damage: i32,
    /// Chance (percent) that RUN succeeds.
    pub flee_chance: u32,
    /// Initiative bonus is a uniform roll in `[0, initiative_spread)`.
    pub initiative_spread: u32,
    /// Gold a freshly created party starts with.
    pub starting_gold: u32,
    /// Distinct stacks a new inventory can hold.
    pub inventory_slots: usize,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_LEVEL: u32 = 99;
    pub const MAX_STACK: u32 = 99;
    pub const MAX_ACTIVE_MEMBERS: usize = 4;
    pub const MAX_RESERVE_MEMBERS: usize = 8;
    pub const MAX_PARTY_SIZE: usize = Self::MAX_ACTIVE_MEMBERS + Self::MAX_RESERVE_MEMBERS;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_HIT_CHANCE: u32 = 90;
    pub const DEFAULT_CRIT_CHANCE: u32 = 10;
    pub const DEFAULT_CRIT_MULTIPLIER: i32 = 2;
    pub const DEFAULT_MINIMUM_DAMAGE: i32 = 1;
    pub const DEFAULT_FLEE_CHANCE: u32 = 50;
    pub const DEFAULT_INITIATIVE_SPREAD: u32 = 10;
    pub const DEFAULT_STARTING_GOLD: u32 = 500;
    pub const DEFAULT_INVENTORY_SLOTS: usize = 64;

    pub fn new() -> Self {
        Self {
            hit_chance: Self::DEFAULT_HIT_CHANCE,
            crit_chance: Self::DEFAULT_CRIT_CHANCE,
            crit_multiplier: Self::DEFAULT_CRIT_MULTIPLIER,
            minimum_damage: Self::DEFAULT_MINIMUM_DAMAGE,
            flee_chance: Self::DEFAULT_FLEE_CHANCE,
            initiative_spread: Self::DEFAULT_INITIATIVE_SPREAD,
            starting_gold: Self::DEFAULT_STARTING_GOLD,
            inventory_slots: Self::DEFAULT_INVENTORY_SLOTS,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
