use crate::core::balance::{monster_attack, monster_max_hp};
use crate::core::progression::LevelUp;

/// One fight against one monster. Lives only while the fight does and is
/// never saved.
///
/// Between actions the session always waits on the player's turn; the
/// monster's reply is resolved inside the same step as the player's attack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatSession {
    pub monster_name: String,
    pub monster_max_hp: u32,
    pub monster_hp: u32,
    pub monster_attack: u32,
    /// Region difficulty the monster was spawned at; drives rewards.
    pub difficulty: u32,
    /// Player attack for this fight only, raised by damage boosters.
    pub attack_power: u32,
}

impl CombatSession {
    /// Starts a fight using region-derived monster stats and the player's
    /// current attack as the session attack power.
    pub fn new(monster_name: String, difficulty: u32, player_attack: u32) -> Self {
        let max_hp = monster_max_hp(difficulty);
        Self {
            monster_name,
            monster_max_hp: max_hp,
            monster_hp: max_hp,
            monster_attack: monster_attack(difficulty),
            difficulty,
            attack_power: player_attack,
        }
    }

    pub fn monster_alive(&self) -> bool {
        self.monster_hp > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatAction {
    Attack,
    UseHealthPotion,
    UseDamageBooster,
    Flee,
}

impl CombatAction {
    pub fn parse(input: &str) -> Option<CombatAction> {
        match input.trim().to_ascii_lowercase().as_str() {
            "a" | "attack" => Some(CombatAction::Attack),
            "p" | "potion" | "heal" => Some(CombatAction::UseHealthPotion),
            "b" | "boost" | "booster" => Some(CombatAction::UseDamageBooster),
            "f" | "flee" | "run" => Some(CombatAction::Flee),
            _ => None,
        }
    }
}

/// Something that happened during a combat step, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatEvent {
    PlayerAttack {
        damage: u32,
        was_crit: bool,
        monster_hp: u32,
    },
    MonsterAttack {
        damage: u32,
        was_crit: bool,
        player_hp: u32,
    },
    HealthPotionUsed {
        healed: u32,
        player_hp: u32,
    },
    DamageBoosterUsed {
        attack_power: u32,
    },
    FleeFailed {
        damage: u32,
        player_hp: u32,
    },
    Fled,
    MonsterDefeated {
        xp_gained: u32,
        gold_gained: u32,
    },
    LevelUp(LevelUp),
    PlayerDefeated,
}

/// Where the fight stands after a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatPhase {
    Ongoing(CombatSession),
    Victory,
    Defeat,
    Fled,
}

impl CombatPhase {
    pub fn is_over(&self) -> bool {
        !matches!(self, CombatPhase::Ongoing(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatStep {
    pub phase: CombatPhase,
    pub events: Vec<CombatEvent>,
}
