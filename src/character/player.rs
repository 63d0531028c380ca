//! The player entity and its clamped mutators.
//!
//! Fields are private: everything outside this module reads through getters
//! and writes through the mutators below, which keep every invariant
//! (`hp <= max_hp`, `energy <= max_energy`, nothing negative).

use super::inventory::{Inventory, ItemKind};
use crate::core::constants::{
    MAX_LEVEL, MAX_STAT, STARTING_ATTACK, STARTING_ENERGY, STARTING_GOLD, STARTING_HP,
};
use crate::core::error::GameError;
use crate::world::map::Position;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    name: String,
    hp: u32,
    max_hp: u32,
    attack: u32,
    energy: u32,
    max_energy: u32,
    level: u32,
    xp: u32,
    gold: u32,
    #[serde(default)]
    inventory: Inventory,
    #[serde(default)]
    position: Position,
}

/// Applies a signed delta to `value`, clamped to `0..=max`.
/// Returns the change actually applied.
fn clamped_adjust(value: &mut u32, delta: i64, max: u32) -> i64 {
    let before = *value as i64;
    let after = before.saturating_add(delta).clamp(0, max as i64);
    *value = after as u32;
    after - before
}

impl Player {
    pub fn new(name: String) -> Self {
        Self {
            name,
            hp: STARTING_HP,
            max_hp: STARTING_HP,
            attack: STARTING_ATTACK,
            energy: STARTING_ENERGY,
            max_energy: STARTING_ENERGY,
            level: 1,
            xp: 0,
            gold: STARTING_GOLD,
            inventory: Inventory::new(),
            position: Position::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn attack(&self) -> u32 {
        self.attack
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    pub fn max_energy(&self) -> u32 {
        self.max_energy
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn xp(&self) -> u32 {
        self.xp
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn adjust_hp(&mut self, delta: i64) -> i64 {
        clamped_adjust(&mut self.hp, delta, self.max_hp)
    }

    pub fn adjust_energy(&mut self, delta: i64) -> i64 {
        clamped_adjust(&mut self.energy, delta, self.max_energy)
    }

    pub fn adjust_gold(&mut self, delta: i64) -> i64 {
        clamped_adjust(&mut self.gold, delta, u32::MAX)
    }

    pub fn add_xp(&mut self, amount: u32) {
        self.xp = self.xp.saturating_add(amount);
    }

    pub fn consume_inventory(&mut self, kind: ItemKind) -> Result<(), GameError> {
        if self.inventory.take_one(kind) {
            Ok(())
        } else {
            Err(GameError::InsufficientItem(kind))
        }
    }

    pub fn add_inventory(&mut self, kind: ItemKind, count: u32) {
        self.inventory.add(kind, count);
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Spends `threshold` xp and applies one level's stat gains, fully healing.
    /// Callers check `xp >= threshold` first.
    pub(crate) fn apply_level_up(&mut self, threshold: u32, hp_gain: u32, attack_gain: u32) {
        self.xp = self.xp.saturating_sub(threshold);
        self.level = self.level.saturating_add(1);
        self.max_hp = self.max_hp.saturating_add(hp_gain);
        self.hp = self.max_hp;
        self.attack = self.attack.saturating_add(attack_gain);
    }

    /// Checks the invariants a loaded save must satisfy.
    pub fn validate(&self, grid_size: usize) -> Result<(), String> {
        if self.hp > self.max_hp {
            return Err(format!("hp {} exceeds max {}", self.hp, self.max_hp));
        }
        if self.energy > self.max_energy {
            return Err(format!(
                "energy {} exceeds max {}",
                self.energy, self.max_energy
            ));
        }
        if self.level == 0 || self.level > MAX_LEVEL {
            return Err(format!("level {} outside 1..={}", self.level, MAX_LEVEL));
        }
        for (stat, value) in [
            ("maxHp", self.max_hp),
            ("maxEnergy", self.max_energy),
            ("attack", self.attack),
        ] {
            if value > MAX_STAT {
                return Err(format!("{} {} exceeds {}", stat, value, MAX_STAT));
            }
        }
        if self.position.x >= grid_size || self.position.y >= grid_size {
            return Err(format!(
                "position ({}, {}) outside {}x{} grid",
                self.position.x, self.position.y, grid_size, grid_size
            ));
        }
        Ok(())
    }
}
