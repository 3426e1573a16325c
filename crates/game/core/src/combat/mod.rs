//! Combat resolution.
//!
//! Pure formulas plus the one function that rolls and applies a physical
//! attack. Both party attacks and enemy turns go through
//! [`resolve_attack`]; skills bypass it and deal their power directly.

pub mod damage;
pub mod hit;
pub mod result;

pub use damage::calculate_damage;
pub use hit::{check_critical, check_hit};
pub use result::{AttackOutcome, resolve_attack};
