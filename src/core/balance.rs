//! Balance formulas keyed by region difficulty.
//!
//! Every number that scales with difficulty lives here so combat and
//! exploration agree on it.

// =============================================================================
// MONSTER SCALING
// =============================================================================

/// Base monster HP before difficulty scaling.
pub const MONSTER_HP_BASE: u32 = 30;

/// Monster HP gained per difficulty level.
pub const MONSTER_HP_PER_LEVEL: u32 = 20;

/// Base monster attack before difficulty scaling.
pub const MONSTER_ATTACK_BASE: u32 = 3;

/// Monster attack gained per difficulty level.
pub const MONSTER_ATTACK_PER_LEVEL: u32 = 2;

// =============================================================================
// REWARDS
// =============================================================================

/// Base XP for winning a fight.
pub const VICTORY_XP_BASE: u32 = 10;

/// Additional victory XP per difficulty level.
pub const VICTORY_XP_PER_LEVEL: u32 = 5;

/// Upper bound of the random part of victory gold (inclusive).
pub const VICTORY_GOLD_RANDOM_MAX: u32 = 10;

/// Upper bound of the random part of exploration gold (inclusive).
pub const LOOT_GOLD_RANDOM_MAX: u32 = 5;

/// Gold per difficulty level, shared by victory and loot rewards.
pub const GOLD_PER_LEVEL: u32 = 5;

pub fn monster_max_hp(difficulty: u32) -> u32 {
    MONSTER_HP_BASE + difficulty * MONSTER_HP_PER_LEVEL
}

pub fn monster_attack(difficulty: u32) -> u32 {
    MONSTER_ATTACK_BASE + difficulty * MONSTER_ATTACK_PER_LEVEL
}

pub fn victory_xp(difficulty: u32) -> u32 {
    VICTORY_XP_BASE + difficulty * VICTORY_XP_PER_LEVEL
}

/// Victory gold given an already-rolled random part in `0..=VICTORY_GOLD_RANDOM_MAX`.
pub fn victory_gold(difficulty: u32, roll: u32) -> u32 {
    roll + difficulty * GOLD_PER_LEVEL
}

/// Exploration gold given an already-rolled random part in `0..=LOOT_GOLD_RANDOM_MAX`.
pub fn loot_gold(difficulty: u32, roll: u32) -> u32 {
    roll + difficulty * GOLD_PER_LEVEL
}

/// XP needed to leave `level`. Level 0 is treated as level 1.
pub fn xp_threshold(level: u32) -> u32 {
    level.max(1).saturating_mul(super::constants::XP_PER_LEVEL)
}
