//! Combat resolution: one player action in, the next phase and events out.

use super::types::{CombatAction, CombatEvent, CombatPhase, CombatSession, CombatStep};
use crate::character::inventory::ItemKind;
use crate::character::player::Player;
use crate::core::balance::{victory_gold, victory_xp, VICTORY_GOLD_RANDOM_MAX};
use crate::core::constants::{CRIT_MULTIPLIER, DAMAGE_BOOSTER_BONUS, HEALTH_POTION_HEAL};
use crate::core::dice::{roll_critical, roll_flee, roll_uniform, Roller};
use crate::core::error::GameError;
use crate::core::progression::check_level_up;

/// Damage for one hit, doubled on a critical.
pub fn hit_damage(attack: u32, was_crit: bool) -> u32 {
    if was_crit {
        attack.saturating_mul(CRIT_MULTIPLIER)
    } else {
        attack
    }
}

/// Resolves one player action against the current session.
///
/// The session is taken by reference and the next one is returned inside
/// [`CombatPhase::Ongoing`], so a failed action (no item left) leaves the
/// caller's session untouched. The player is mutated in place: HP, items,
/// and on victory xp, gold and levels.
pub fn step(
    session: &CombatSession,
    action: CombatAction,
    player: &mut Player,
    roller: &mut impl Roller,
) -> Result<CombatStep, GameError> {
    let mut next = session.clone();
    let mut events = Vec::new();

    let phase = match action {
        CombatAction::Attack => {
            let was_crit = roll_critical(roller);
            let damage = hit_damage(next.attack_power, was_crit);
            next.monster_hp = next.monster_hp.saturating_sub(damage);
            events.push(CombatEvent::PlayerAttack {
                damage,
                was_crit,
                monster_hp: next.monster_hp,
            });

            if !next.monster_alive() {
                award_victory(&next, player, roller, &mut events);
                CombatPhase::Victory
            } else {
                monster_turn(next, player, roller, &mut events)
            }
        }
        CombatAction::UseHealthPotion => {
            player.consume_inventory(ItemKind::HealthPotion)?;
            let healed = player.adjust_hp(HEALTH_POTION_HEAL as i64);
            events.push(CombatEvent::HealthPotionUsed {
                healed: healed as u32,
                player_hp: player.hp(),
            });
            CombatPhase::Ongoing(next)
        }
        CombatAction::UseDamageBooster => {
            player.consume_inventory(ItemKind::DamageBooster)?;
            next.attack_power = next.attack_power.saturating_add(DAMAGE_BOOSTER_BONUS);
            events.push(CombatEvent::DamageBoosterUsed {
                attack_power: next.attack_power,
            });
            CombatPhase::Ongoing(next)
        }
        CombatAction::Flee => {
            if roll_flee(roller) {
                events.push(CombatEvent::Fled);
                CombatPhase::Fled
            } else {
                let damage = roll_uniform(roller, 1, next.monster_attack.max(1));
                player.adjust_hp(-(damage as i64));
                events.push(CombatEvent::FleeFailed {
                    damage,
                    player_hp: player.hp(),
                });
                if player.is_alive() {
                    CombatPhase::Ongoing(next)
                } else {
                    events.push(CombatEvent::PlayerDefeated);
                    CombatPhase::Defeat
                }
            }
        }
    };

    log::debug!("combat {:?} -> {:?}", action, phase);
    Ok(CombatStep { phase, events })
}

/// The monster's retaliation after a player attack it survived.
fn monster_turn(
    session: CombatSession,
    player: &mut Player,
    roller: &mut impl Roller,
    events: &mut Vec<CombatEvent>,
) -> CombatPhase {
    let was_crit = roll_critical(roller);
    let damage = hit_damage(session.monster_attack, was_crit);
    player.adjust_hp(-(damage as i64));
    events.push(CombatEvent::MonsterAttack {
        damage,
        was_crit,
        player_hp: player.hp(),
    });

    if player.is_alive() {
        CombatPhase::Ongoing(session)
    } else {
        events.push(CombatEvent::PlayerDefeated);
        CombatPhase::Defeat
    }
}

fn award_victory(
    session: &CombatSession,
    player: &mut Player,
    roller: &mut impl Roller,
    events: &mut Vec<CombatEvent>,
) {
    let xp_gained = victory_xp(session.difficulty);
    let gold_gained = victory_gold(
        session.difficulty,
        roll_uniform(roller, 0, VICTORY_GOLD_RANDOM_MAX),
    );
    player.add_xp(xp_gained);
    player.adjust_gold(gold_gained as i64);
    events.push(CombatEvent::MonsterDefeated {
        xp_gained,
        gold_gained,
    });
    events.extend(check_level_up(player).into_iter().map(CombatEvent::LevelUp));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dice::ScriptedRoller;
    use crate::core::progression::LevelUp;

    fn rat(player_attack: u32) -> CombatSession {
        CombatSession::new("Rat".to_string(), 1, player_attack)
    }

    #[test]
    fn test_five_plain_attacks_kill_fifty_hp_monster() {
        let mut player = Player::new("Hero".to_string());
        let mut roller = ScriptedRoller::new();
        let mut session = rat(player.attack());
        assert_eq!(session.monster_hp, 50);

        for round in 1..=4 {
            let result = step(&session, CombatAction::Attack, &mut player, &mut roller).unwrap();
            session = match result.phase {
                CombatPhase::Ongoing(s) => s,
                other => panic!("fight ended early in round {}: {:?}", round, other),
            };
            assert_eq!(session.monster_hp, 50 - 10 * round);
        }

        let result = step(&session, CombatAction::Attack, &mut player, &mut roller).unwrap();
        assert_eq!(result.phase, CombatPhase::Victory);
        // Four monster replies at 5 damage each
        assert_eq!(player.hp(), 80);
    }

    #[test]
    fn test_critical_doubles_damage() {
        let mut player = Player::new("Hero".to_string());
        let mut roller = ScriptedRoller::new().with_chances(&[true, false]);
        let session = rat(player.attack());

        let result = step(&session, CombatAction::Attack, &mut player, &mut roller).unwrap();

        assert_eq!(
            result.events[0],
            CombatEvent::PlayerAttack {
                damage: 20,
                was_crit: true,
                monster_hp: 30
            }
        );
    }

    #[test]
    fn test_monster_critical_hits_player_twice_as_hard() {
        let mut player = Player::new("Hero".to_string());
        let mut roller = ScriptedRoller::new().with_chances(&[false, true]);
        let session = rat(player.attack());

        step(&session, CombatAction::Attack, &mut player, &mut roller).unwrap();

        assert_eq!(player.hp(), 90);
    }

    #[test]
    fn test_victory_awards_xp_gold_and_levels() {
        let mut player = Player::new("Hero".to_string());
        let mut roller = ScriptedRoller::new().with_uniforms(&[4]);
        let mut session = rat(player.attack());
        session.monster_hp = 5;

        let result = step(&session, CombatAction::Attack, &mut player, &mut roller).unwrap();

        assert_eq!(result.phase, CombatPhase::Victory);
        assert!(result.events.contains(&CombatEvent::MonsterDefeated {
            xp_gained: 15,
            gold_gained: 9
        }));
        // 15 xp at level 1 crosses the 10 xp threshold
        assert_eq!(player.level(), 2);
        assert_eq!(player.xp(), 5);
        assert_eq!(player.gold(), 29);
        assert!(matches!(
            result.events.last(),
            Some(CombatEvent::LevelUp(LevelUp { new_level: 2, .. }))
        ));
    }

    #[test]
    fn test_defeat_when_monster_reply_kills() {
        let mut player = Player::new("Hero".to_string());
        player.adjust_hp(-96);
        let mut roller = ScriptedRoller::new();
        let session = rat(player.attack());

        let result = step(&session, CombatAction::Attack, &mut player, &mut roller).unwrap();

        assert_eq!(result.phase, CombatPhase::Defeat);
        assert_eq!(player.hp(), 0);
        assert_eq!(result.events.last(), Some(&CombatEvent::PlayerDefeated));
    }

    #[test]
    fn test_health_potion_heals_without_monster_turn() {
        let mut player = Player::new("Hero".to_string());
        player.adjust_hp(-70);
        player.add_inventory(ItemKind::HealthPotion, 1);
        let mut roller = ScriptedRoller::new();
        let session = rat(player.attack());

        let result = step(&session, CombatAction::UseHealthPotion, &mut player, &mut roller)
            .unwrap();

        assert_eq!(player.hp(), 80);
        assert_eq!(result.phase, CombatPhase::Ongoing(session));
        assert_eq!(result.events.len(), 1);
    }

    #[test]
    fn test_health_potion_heal_is_clamped() {
        let mut player = Player::new("Hero".to_string());
        player.adjust_hp(-10);
        player.add_inventory(ItemKind::HealthPotion, 1);
        let session = rat(player.attack());

        let result = step(
            &session,
            CombatAction::UseHealthPotion,
            &mut player,
            &mut ScriptedRoller::new(),
        )
        .unwrap();

        assert_eq!(player.hp(), 100);
        assert_eq!(
            result.events[0],
            CombatEvent::HealthPotionUsed {
                healed: 10,
                player_hp: 100
            }
        );
    }

    #[test]
    fn test_item_actions_fail_without_items() {
        let mut player = Player::new("Hero".to_string());
        let session = rat(player.attack());
        let mut roller = ScriptedRoller::new();

        assert_eq!(
            step(&session, CombatAction::UseHealthPotion, &mut player, &mut roller),
            Err(GameError::InsufficientItem(ItemKind::HealthPotion))
        );
        assert_eq!(
            step(&session, CombatAction::UseDamageBooster, &mut player, &mut roller),
            Err(GameError::InsufficientItem(ItemKind::DamageBooster))
        );
    }

    #[test]
    fn test_damage_booster_raises_session_attack_only() {
        let mut player = Player::new("Hero".to_string());
        player.add_inventory(ItemKind::DamageBooster, 1);
        let session = rat(player.attack());
        let mut roller = ScriptedRoller::new();

        let result = step(&session, CombatAction::UseDamageBooster, &mut player, &mut roller)
            .unwrap();
        let boosted = match result.phase {
            CombatPhase::Ongoing(s) => s,
            other => panic!("unexpected phase {:?}", other),
        };

        assert_eq!(boosted.attack_power, 15);
        assert_eq!(player.attack(), 10);

        let result = step(&boosted, CombatAction::Attack, &mut player, &mut roller).unwrap();
        assert_eq!(
            result.events[0],
            CombatEvent::PlayerAttack {
                damage: 15,
                was_crit: false,
                monster_hp: 35
            }
        );
    }

    #[test]
    fn test_damage_booster_saturates_attack_power() {
        let mut player = Player::new("Hero".to_string());
        player.add_inventory(ItemKind::DamageBooster, 1);
        let mut session = rat(player.attack());
        session.attack_power = u32::MAX - 1;

        let result = step(
            &session,
            CombatAction::UseDamageBooster,
            &mut player,
            &mut ScriptedRoller::new(),
        )
        .unwrap();

        assert_eq!(
            result.events,
            vec![CombatEvent::DamageBoosterUsed {
                attack_power: u32::MAX
            }]
        );
    }

    #[test]
    fn test_flee_success() {
        let mut player = Player::new("Hero".to_string());
        let mut roller = ScriptedRoller::new().with_chances(&[true]);
        let session = rat(player.attack());

        let result = step(&session, CombatAction::Flee, &mut player, &mut roller).unwrap();

        assert_eq!(result.phase, CombatPhase::Fled);
        assert_eq!(player.hp(), 100);
    }

    #[test]
    fn test_flee_failure_takes_bounded_damage() {
        let mut player = Player::new("Hero".to_string());
        let mut roller = ScriptedRoller::new().with_uniforms(&[3]);
        let session = rat(player.attack());

        let result = step(&session, CombatAction::Flee, &mut player, &mut roller).unwrap();

        assert_eq!(result.phase, CombatPhase::Ongoing(session));
        assert_eq!(player.hp(), 97);
    }

    #[test]
    fn test_failed_flee_can_defeat() {
        let mut player = Player::new("Hero".to_string());
        player.adjust_hp(-99);
        let mut roller = ScriptedRoller::new().with_uniforms(&[5]);
        let session = rat(player.attack());

        let result = step(&session, CombatAction::Flee, &mut player, &mut roller).unwrap();

        assert_eq!(result.phase, CombatPhase::Defeat);
    }
}
