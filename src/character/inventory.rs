//! Consumable item kinds and per-kind counts.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const NUM_ITEM_KINDS: usize = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    HealthPotion,
    DamageBooster,
    EnergyPotion,
}

impl ItemKind {
    pub fn all() -> [ItemKind; NUM_ITEM_KINDS] {
        [
            ItemKind::HealthPotion,
            ItemKind::DamageBooster,
            ItemKind::EnergyPotion,
        ]
    }

    /// Stable key used by the save format and command parsing.
    pub fn key(&self) -> &'static str {
        match self {
            ItemKind::HealthPotion => "healthPotion",
            ItemKind::DamageBooster => "damageBooster",
            ItemKind::EnergyPotion => "energyPotion",
        }
    }

    /// Parses a command-line item name; accepts the save key or a short alias.
    pub fn parse(input: &str) -> Option<ItemKind> {
        match input.trim().to_ascii_lowercase().as_str() {
            "healthpotion" | "health" | "potion" | "hp" => Some(ItemKind::HealthPotion),
            "damagebooster" | "booster" | "boost" | "damage" => Some(ItemKind::DamageBooster),
            "energypotion" | "energy" => Some(ItemKind::EnergyPotion),
            _ => None,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemKind::HealthPotion => "Health Potion",
            ItemKind::DamageBooster => "Damage Booster",
            ItemKind::EnergyPotion => "Energy Potion",
        };
        f.write_str(name)
    }
}

/// Consumable counts, one slot per [`ItemKind`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    #[serde(default)]
    health_potion: u32,
    #[serde(default)]
    damage_booster: u32,
    #[serde(default)]
    energy_potion: u32,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: ItemKind) -> u32 {
        match kind {
            ItemKind::HealthPotion => self.health_potion,
            ItemKind::DamageBooster => self.damage_booster,
            ItemKind::EnergyPotion => self.energy_potion,
        }
    }

    fn slot_mut(&mut self, kind: ItemKind) -> &mut u32 {
        match kind {
            ItemKind::HealthPotion => &mut self.health_potion,
            ItemKind::DamageBooster => &mut self.damage_booster,
            ItemKind::EnergyPotion => &mut self.energy_potion,
        }
    }

    pub fn add(&mut self, kind: ItemKind, count: u32) {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_add(count);
    }

    /// Removes one item. Returns false and leaves the count alone when empty.
    pub fn take_one(&mut self, kind: ItemKind) -> bool {
        let slot = self.slot_mut(kind);
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    pub fn is_empty(&self) -> bool {
        ItemKind::all().iter().all(|k| self.count(*k) == 0)
    }
}
