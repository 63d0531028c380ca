//! Leveling and time-based energy restoration.

use super::balance::xp_threshold;
use super::constants::{
    ENERGY_RESTORE_AMOUNT, ENERGY_RESTORE_INTERVAL_SECONDS, LEVEL_UP_ATTACK_GAIN,
    LEVEL_UP_MAX_HP_GAIN,
};
use super::game_state::GameState;
use crate::character::player::Player;

/// Notification for one level gained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub new_level: u32,
    pub max_hp: u32,
    pub attack: u32,
}

/// Spends xp on as many levels as it covers.
///
/// Each level costs `level × 10` xp, grants +10 max HP (with a full heal)
/// and +2 attack. Returns one [`LevelUp`] per level gained, empty when xp is
/// below the threshold.
pub fn check_level_up(player: &mut Player) -> Vec<LevelUp> {
    let mut level_ups = Vec::new();
    loop {
        let threshold = xp_threshold(player.level());
        if player.xp() < threshold {
            break;
        }
        player.apply_level_up(threshold, LEVEL_UP_MAX_HP_GAIN, LEVEL_UP_ATTACK_GAIN);
        log::info!(
            "{} reached level {} (max hp {}, attack {})",
            player.name(),
            player.level(),
            player.max_hp(),
            player.attack()
        );
        level_ups.push(LevelUp {
            new_level: player.level(),
            max_hp: player.max_hp(),
            attack: player.attack(),
        });
    }
    level_ups
}

/// Restores energy for every whole restore interval since the last restore.
///
/// The timestamp moves forward by whole intervals only, so a partial interval
/// keeps counting toward the next point. Does nothing when energy is full or
/// no whole interval has passed. Returns the energy restored.
pub fn restore_energy_by_elapsed_time(state: &mut GameState, now: i64) -> u32 {
    let player = &state.player;
    if player.energy() >= player.max_energy() {
        return 0;
    }

    let elapsed = now.saturating_sub(state.last_energy_restore_time);
    if elapsed < ENERGY_RESTORE_INTERVAL_SECONDS {
        return 0;
    }

    let increments = elapsed / ENERGY_RESTORE_INTERVAL_SECONDS;
    let gained = state
        .player
        .adjust_energy(increments.saturating_mul(ENERGY_RESTORE_AMOUNT as i64));
    state.last_energy_restore_time = state
        .last_energy_restore_time
        .saturating_add(increments * ENERGY_RESTORE_INTERVAL_SECONDS);

    log::debug!(
        "restored {} energy over {} interval(s)",
        gained,
        increments
    );
    gained as u32
}
