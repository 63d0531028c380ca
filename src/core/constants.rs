// Map
pub const GRID_SIZE: usize = 5;

// Starting player stats
pub const STARTING_HP: u32 = 100;
pub const STARTING_ATTACK: u32 = 10;
pub const STARTING_ENERGY: u32 = 10;
pub const STARTING_GOLD: u32 = 20;

// Energy
pub const MOVE_ENERGY_COST: u32 = 1;
pub const EXPLORE_ENERGY_COST: u32 = 1;
pub const ENERGY_RESTORE_INTERVAL_SECONDS: i64 = 30 * 60;
pub const ENERGY_RESTORE_AMOUNT: u32 = 1;

// Leveling
pub const XP_PER_LEVEL: u32 = 10;
pub const LEVEL_UP_MAX_HP_GAIN: u32 = 10;
pub const LEVEL_UP_ATTACK_GAIN: u32 = 2;

// Probabilities
pub const CRIT_CHANCE: f64 = 0.2;
pub const CRIT_MULTIPLIER: u32 = 2;
pub const MONSTER_ENCOUNTER_CHANCE: f64 = 0.7;
pub const FLEE_SUCCESS_CHANCE: f64 = 0.5;

// Consumables
pub const HEALTH_POTION_HEAL: u32 = 50;
pub const DAMAGE_BOOSTER_BONUS: u32 = 5;
pub const ENERGY_POTION_RESTORE: u32 = 5;

// Limits a loaded save must respect
pub const MAX_LEVEL: u32 = 10_000;
pub const MAX_STAT: u32 = 1_000_000;
/// 9999-12-31T23:59:59Z
pub const MAX_TIMESTAMP_SECONDS: i64 = 253_402_300_799;

// Timing and saves
pub const TICK_INTERVAL_MS: u64 = 1000;
pub const SAVE_KEY: &str = "gameState";
pub const SAVE_SCHEMA_VERSION: u32 = 1;
