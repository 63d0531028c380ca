//! Turn-based combat: session types and the step function.

pub mod logic;
pub mod types;

pub use logic::step;
pub use types::{CombatAction, CombatEvent, CombatPhase, CombatSession, CombatStep};
