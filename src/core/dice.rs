//! Random outcome resolution.
//!
//! Every random decision in the game goes through a [`Roller`]. Any
//! `rand::Rng` is a roller, so production code passes a thread or seeded RNG
//! and tests pass `rand_chacha::ChaCha8Rng` or a scripted roller.

use super::constants::{CRIT_CHANCE, FLEE_SUCCESS_CHANCE, MONSTER_ENCOUNTER_CHANCE};
use rand::Rng;

/// Source of the two primitive random draws the game needs.
pub trait Roller {
    /// Returns true with the given probability.
    fn chance(&mut self, probability: f64) -> bool;

    /// Uniform integer in `min..=max`. Returns `min` when the range is empty.
    fn uniform(&mut self, min: u32, max: u32) -> u32;
}

impl<R: Rng> Roller for R {
    fn chance(&mut self, probability: f64) -> bool {
        self.gen_bool(probability.clamp(0.0, 1.0))
    }

    fn uniform(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        self.gen_range(min..=max)
    }
}

/// Outcome category when exploring a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterBranch {
    Monster,
    Loot,
}

/// Critical hit roll, shared by player and monster attacks.
pub fn roll_critical(roller: &mut impl Roller) -> bool {
    roller.chance(CRIT_CHANCE)
}

pub fn roll_uniform(roller: &mut impl Roller, min: u32, max: u32) -> u32 {
    roller.uniform(min, max)
}

pub fn roll_encounter_branch(roller: &mut impl Roller) -> EncounterBranch {
    if roller.chance(MONSTER_ENCOUNTER_CHANCE) {
        EncounterBranch::Monster
    } else {
        EncounterBranch::Loot
    }
}

/// Returns true when an escape attempt succeeds.
pub fn roll_flee(roller: &mut impl Roller) -> bool {
    roller.chance(FLEE_SUCCESS_CHANCE)
}

/// Picks one entry uniformly. `None` for an empty list.
pub fn pick<'a, T>(roller: &mut impl Roller, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let index = roller.uniform(0, items.len() as u32 - 1) as usize;
    items.get(index)
}

/// Roller that replays queued outcomes, for tests that need an exact path.
///
/// Exhausted queues fall back to "no" for chances and `min` for uniforms,
/// so a default roller never crits, never finds a monster and never escapes.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedRoller {
    chances: std::collections::VecDeque<bool>,
    uniforms: std::collections::VecDeque<u32>,
}

#[cfg(test)]
impl ScriptedRoller {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_chances(mut self, outcomes: &[bool]) -> Self {
        self.chances.extend(outcomes.iter().copied());
        self
    }

    pub(crate) fn with_uniforms(mut self, values: &[u32]) -> Self {
        self.uniforms.extend(values.iter().copied());
        self
    }
}

#[cfg(test)]
impl Roller for ScriptedRoller {
    fn chance(&mut self, _probability: f64) -> bool {
        self.chances.pop_front().unwrap_or(false)
    }

    fn uniform(&mut self, min: u32, max: u32) -> u32 {
        self.uniforms
            .pop_front()
            .map(|v| v.clamp(min, max.max(min)))
            .unwrap_or(min)
    }
}
