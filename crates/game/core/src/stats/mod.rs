//! Stat system.
//!
//! ```text
//! [ Level ] ──growth──▶ [ BaseStats ] ──+ StatBonuses──▶ effective stats
//!                                             ▲
//!                               equipment slots (summed)
//! ```
//!
//! ## Principles
//!
//! 1. **SSOT**: level, experience, current HP/MP and the equipment overlay
//!    are stored; maximums and combat stats are derived.
//! 2. **Clamped pools**: current HP/MP never leave `[0, effective max]`.
//! 3. **Deterministic**: integer arithmetic only, no I/O or randomness.

pub mod block;
pub mod bonus;
pub mod growth;

pub use block::StatBlock;
pub use bonus::StatBonuses;
pub use growth::{BaseStats, experience_to_next};
