//! Movement, exploration encounters and shop transactions.
//!
//! These operate on [`GameState`] directly and never touch combat; the
//! [`Game`](super::game_logic::Game) facade decides when they are allowed.

use super::balance::{loot_gold, LOOT_GOLD_RANDOM_MAX};
use super::constants::{
    ENERGY_POTION_RESTORE, EXPLORE_ENERGY_COST, HEALTH_POTION_HEAL, MOVE_ENERGY_COST,
};
use super::dice::{pick, roll_encounter_branch, roll_uniform, EncounterBranch, Roller};
use super::error::GameError;
use super::game_state::GameState;
use crate::character::inventory::ItemKind;
use crate::character::shop::shop_item;
use crate::combat::types::CombatSession;
use crate::world::map::{Direction, Position};
use crate::world::regions::RegionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { to: Position, region: RegionKind },
    /// The grid edge was in the way; nothing changed.
    Blocked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExploreOutcome {
    FoundGold { amount: u32 },
    Encounter(CombatSession),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Purchase {
    pub kind: ItemKind,
    pub price: u32,
    pub gold_left: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemUse {
    Healed { amount: u32, hp: u32 },
    Energized { amount: u32, energy: u32 },
}

fn ensure_energy(state: &GameState, cost: u32) -> Result<(), GameError> {
    if state.player.energy() < cost {
        return Err(GameError::InsufficientEnergy);
    }
    Ok(())
}

/// Deducts energy already checked by [`ensure_energy`].
///
/// Spending from a full bar restarts the restore window at `now`, so time
/// spent at full energy does not bank restores.
fn spend_energy(state: &mut GameState, cost: u32, now: i64) {
    if state.player.energy() >= state.player.max_energy() {
        state.last_energy_restore_time = now;
    }
    state.player.adjust_energy(-(cost as i64));
}

/// Moves one tile. Costs one energy unless the edge blocks the move.
pub fn move_player(
    state: &mut GameState,
    direction: Direction,
    now: i64,
) -> Result<MoveOutcome, GameError> {
    // Checked before the edge so a move at zero energy always fails
    ensure_energy(state, MOVE_ENERGY_COST)?;
    let Some(to) = state.player.position().step(direction, state.map.size()) else {
        return Ok(MoveOutcome::Blocked);
    };
    let Some(region) = state.map.region_at(to) else {
        return Ok(MoveOutcome::Blocked);
    };

    spend_energy(state, MOVE_ENERGY_COST, now);
    state.player.set_position(to);
    log::debug!("moved {:?} to ({}, {}) {:?}", direction, to.x, to.y, region);
    Ok(MoveOutcome::Moved { to, region })
}

/// Searches the current tile: either gold or a monster.
pub fn explore(
    state: &mut GameState,
    now: i64,
    roller: &mut impl Roller,
) -> Result<ExploreOutcome, GameError> {
    ensure_energy(state, EXPLORE_ENERGY_COST)?;
    spend_energy(state, EXPLORE_ENERGY_COST, now);
    let region = state.current_region();

    match roll_encounter_branch(roller) {
        EncounterBranch::Monster => {
            let name = pick(roller, region.monsters).copied().unwrap_or("Monster");
            log::debug!("encounter: {} in {}", name, region.name);
            Ok(ExploreOutcome::Encounter(CombatSession::new(
                name.to_string(),
                region.difficulty,
                state.player.attack(),
            )))
        }
        EncounterBranch::Loot => {
            let amount = loot_gold(
                region.difficulty,
                roll_uniform(roller, 0, LOOT_GOLD_RANDOM_MAX),
            );
            state.player.adjust_gold(amount as i64);
            log::debug!("found {} gold in {}", amount, region.name);
            Ok(ExploreOutcome::FoundGold { amount })
        }
    }
}

/// Buys one item from the shop on the current tile.
pub fn buy(state: &mut GameState, kind: ItemKind) -> Result<Purchase, GameError> {
    if !state.current_region().has_shop {
        return Err(GameError::NoShopHere);
    }
    let price = shop_item(kind).price;
    let gold = state.player.gold();
    if gold < price {
        return Err(GameError::InsufficientGold { price, gold });
    }

    state.player.adjust_gold(-(price as i64));
    state.player.add_inventory(kind, 1);
    Ok(Purchase {
        kind,
        price,
        gold_left: state.player.gold(),
    })
}

/// Uses a consumable outside of combat. Damage boosters only work in a fight.
pub fn use_item(state: &mut GameState, kind: ItemKind) -> Result<ItemUse, GameError> {
    if kind == ItemKind::DamageBooster {
        return Err(GameError::NotInCombat);
    }
    state.player.consume_inventory(kind)?;

    let player = &mut state.player;
    Ok(match kind {
        ItemKind::EnergyPotion => {
            let amount = player.adjust_energy(ENERGY_POTION_RESTORE as i64) as u32;
            ItemUse::Energized {
                amount,
                energy: player.energy(),
            }
        }
        _ => {
            let amount = player.adjust_hp(HEALTH_POTION_HEAL as i64) as u32;
            ItemUse::Healed {
                amount,
                hp: player.hp(),
            }
        }
    })
}
