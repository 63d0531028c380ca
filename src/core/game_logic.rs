//! The game facade: one owner for state, the active fight and pending saves.
//!
//! Every operation runs to completion and, when it changed anything, queues
//! a [`SaveSnapshot`] of the state as it stood right then. The driver drains
//! it with [`Game::take_pending_save`] and writes it asynchronously.

use super::dice::Roller;
use super::error::GameError;
use super::exploration::{self, ExploreOutcome, ItemUse, MoveOutcome, Purchase};
use super::game_state::GameState;
use super::progression::restore_energy_by_elapsed_time;
use crate::character::inventory::ItemKind;
use crate::combat::logic::step;
use crate::combat::types::{CombatAction, CombatPhase, CombatSession, CombatStep};
use crate::persistence::save::SaveSnapshot;
use crate::world::map::Direction;

/// Who the host says is playing. Only used to name a brand-new player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostIdentity {
    pub id: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    NewGame,
    Resumed,
    /// A game was already running; the identity was ignored.
    AlreadyConnected,
}

/// Runs the game for one player.
///
/// Starts out waiting for an identity; every action fails with
/// [`GameError::MissingIdentity`] until [`Game::connect`] succeeds.
#[derive(Debug, Default)]
pub struct Game {
    state: Option<GameState>,
    combat: Option<CombatSession>,
    pending_save: Option<SaveSnapshot>,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters the game, resuming `saved` if there is one.
    ///
    /// The identity only names a new player; a resumed save keeps its name,
    /// and connecting again once playing changes nothing.
    pub fn connect(
        &mut self,
        identity: Option<&HostIdentity>,
        saved: Option<GameState>,
        now: i64,
        roller: &mut impl Roller,
    ) -> Result<ConnectOutcome, GameError> {
        if self.state.is_some() {
            return Ok(ConnectOutcome::AlreadyConnected);
        }
        let identity = identity.ok_or(GameError::MissingIdentity)?;

        let outcome = match saved {
            Some(state) => {
                log::info!("resuming game for {}", state.player.name());
                self.state = Some(state);
                ConnectOutcome::Resumed
            }
            None => {
                log::info!(
                    "starting new game for {} ({})",
                    identity.display_name,
                    identity.id
                );
                self.state = Some(GameState::new(
                    identity.display_name.clone(),
                    now,
                    roller,
                ));
                ConnectOutcome::NewGame
            }
        };

        // Time away counts toward energy
        self.tick(now)?;
        self.autosave();
        Ok(outcome)
    }

    pub fn is_waiting_for_identity(&self) -> bool {
        self.state.is_none()
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn combat(&self) -> Option<&CombatSession> {
        self.combat.as_ref()
    }

    pub fn in_combat(&self) -> bool {
        self.combat.is_some()
    }

    /// The snapshot queued by the last state change, if any.
    pub fn take_pending_save(&mut self) -> Option<SaveSnapshot> {
        self.pending_save.take()
    }

    fn playing(&mut self) -> Result<&mut GameState, GameError> {
        self.state.as_mut().ok_or(GameError::MissingIdentity)
    }

    fn out_of_combat(&mut self) -> Result<&mut GameState, GameError> {
        if self.combat.is_some() {
            return Err(GameError::InCombat);
        }
        self.playing()
    }

    fn autosave(&mut self) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        match SaveSnapshot::capture(state) {
            Ok(snapshot) => self.pending_save = Some(snapshot),
            Err(e) => log::warn!("could not snapshot game state: {}", e),
        }
    }

    /// Periodic refresh: applies elapsed-time energy restoration.
    /// Returns the energy restored.
    pub fn tick(&mut self, now: i64) -> Result<u32, GameError> {
        let restored = restore_energy_by_elapsed_time(self.playing()?, now);
        if restored > 0 {
            self.autosave();
        }
        Ok(restored)
    }

    pub fn move_player(&mut self, direction: Direction, now: i64) -> Result<MoveOutcome, GameError> {
        self.out_of_combat()?;
        self.tick(now)?;
        let outcome = exploration::move_player(self.playing()?, direction, now)?;
        if outcome != MoveOutcome::Blocked {
            self.autosave();
        }
        Ok(outcome)
    }

    pub fn explore(&mut self, now: i64, roller: &mut impl Roller) -> Result<ExploreOutcome, GameError> {
        self.out_of_combat()?;
        self.tick(now)?;
        let outcome = exploration::explore(self.playing()?, now, roller)?;
        if let ExploreOutcome::Encounter(session) = &outcome {
            self.combat = Some(session.clone());
        }
        self.autosave();
        Ok(outcome)
    }

    pub fn buy(&mut self, kind: ItemKind) -> Result<Purchase, GameError> {
        let purchase = exploration::buy(self.out_of_combat()?, kind)?;
        self.autosave();
        Ok(purchase)
    }

    /// Uses an item outside of combat. In a fight, use [`Game::combat_action`].
    pub fn use_item(&mut self, kind: ItemKind) -> Result<ItemUse, GameError> {
        let used = exploration::use_item(self.out_of_combat()?, kind)?;
        self.autosave();
        Ok(used)
    }

    /// Resolves one combat action.
    ///
    /// On defeat the game restarts from scratch for the same player name
    /// with a new map, as if connecting for the first time.
    pub fn combat_action(
        &mut self,
        action: CombatAction,
        now: i64,
        roller: &mut impl Roller,
    ) -> Result<CombatStep, GameError> {
        let session = self.combat.as_ref().ok_or(GameError::NotInCombat)?;
        let state = self.state.as_mut().ok_or(GameError::MissingIdentity)?;
        let result = step(session, action, &mut state.player, roller)?;

        match &result.phase {
            CombatPhase::Ongoing(next) => self.combat = Some(next.clone()),
            CombatPhase::Victory | CombatPhase::Fled => self.combat = None,
            CombatPhase::Defeat => {
                self.combat = None;
                let name = state.player.name().to_string();
                log::info!("{} was defeated; starting over", name);
                *state = GameState::new(name, now, roller);
            }
        }
        self.autosave();
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dice::ScriptedRoller;
    use crate::persistence::save::decode_save;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const NOW: i64 = 1_700_000_000;

    fn identity(name: &str) -> HostIdentity {
        HostIdentity {
            id: "42".to_string(),
            display_name: name.to_string(),
        }
    }

    fn connected() -> Game {
        let mut game = Game::new();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        game.connect(Some(&identity("Hero")), None, NOW, &mut rng)
            .unwrap();
        game.take_pending_save();
        game
    }

    /// A game already in a fight against a difficulty-1 monster.
    fn in_fight() -> Game {
        let mut game = connected();
        // Village monsters: chance -> monster, uniform -> first name
        let mut roller = ScriptedRoller::new().with_chances(&[true]);
        game.explore(NOW, &mut roller).unwrap();
        game.take_pending_save();
        game
    }

    #[test]
    fn test_actions_blocked_without_identity() {
        let mut game = Game::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(game.is_waiting_for_identity());
        assert_eq!(
            game.connect(None, None, NOW, &mut rng),
            Err(GameError::MissingIdentity)
        );
        assert_eq!(
            game.move_player(Direction::East, NOW),
            Err(GameError::MissingIdentity)
        );
        assert_eq!(game.explore(NOW, &mut rng), Err(GameError::MissingIdentity));
        assert_eq!(game.buy(ItemKind::HealthPotion), Err(GameError::MissingIdentity));
        assert!(game.take_pending_save().is_none());
    }

    #[test]
    fn test_connect_new_game_names_player_and_saves() {
        let mut game = Game::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let outcome = game
            .connect(Some(&identity("Alice")), None, NOW, &mut rng)
            .unwrap();
        assert_eq!(outcome, ConnectOutcome::NewGame);
        assert_eq!(game.state().map(|s| s.player.name()), Some("Alice"));

        let snapshot = game.take_pending_save().expect("new game should be saved");
        assert_eq!(decode_save(snapshot.as_str()).unwrap().player.name(), "Alice");
    }

    #[test]
    fn test_reconnect_never_renames() {
        let mut game = connected();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let outcome = game
            .connect(Some(&identity("Mallory")), None, NOW, &mut rng)
            .unwrap();
        assert_eq!(outcome, ConnectOutcome::AlreadyConnected);
        assert_eq!(game.state().map(|s| s.player.name()), Some("Hero"));
    }

    #[test]
    fn test_resume_keeps_saved_name_and_restores_offline_energy() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut saved = GameState::new("Saved Hero".to_string(), NOW - 3 * 1800, &mut rng);
        saved.player.adjust_energy(-5);

        let mut game = Game::new();
        let outcome = game
            .connect(Some(&identity("Renamed")), Some(saved), NOW, &mut rng)
            .unwrap();

        assert_eq!(outcome, ConnectOutcome::Resumed);
        let state = game.state().unwrap();
        assert_eq!(state.player.name(), "Saved Hero");
        assert_eq!(state.player.energy(), 8);
    }

    #[test]
    fn test_move_queues_save_but_blocked_move_does_not() {
        let mut game = connected();
        assert_eq!(
            game.move_player(Direction::North, NOW),
            Ok(MoveOutcome::Blocked)
        );
        assert!(game.take_pending_save().is_none());

        game.move_player(Direction::South, NOW).unwrap();
        assert!(game.take_pending_save().is_some());
    }

    #[test]
    fn test_failed_buy_does_not_save() {
        let mut game = connected();
        assert!(game.buy(ItemKind::DamageBooster).is_err());
        assert!(game.take_pending_save().is_none());
    }

    #[test]
    fn test_explore_monster_enters_combat_and_blocks_travel() {
        let mut game = in_fight();
        assert!(game.in_combat());
        assert_eq!(game.combat().map(|c| c.monster_name.as_str()), Some("Rat"));
        assert_eq!(game.move_player(Direction::East, NOW), Err(GameError::InCombat));
        assert_eq!(game.buy(ItemKind::HealthPotion), Err(GameError::InCombat));
        assert_eq!(
            game.use_item(ItemKind::HealthPotion),
            Err(GameError::InCombat)
        );
    }

    #[test]
    fn test_combat_action_requires_fight() {
        let mut game = connected();
        assert_eq!(
            game.combat_action(CombatAction::Attack, NOW, &mut ScriptedRoller::new()),
            Err(GameError::NotInCombat)
        );
    }

    #[test]
    fn test_fight_to_victory_clears_session() {
        let mut game = in_fight();
        let mut roller = ScriptedRoller::new();
        let mut steps = 0;
        while game.in_combat() {
            let result = game.combat_action(CombatAction::Attack, NOW, &mut roller).unwrap();
            steps += 1;
            assert!(game.take_pending_save().is_some());
            if result.phase == CombatPhase::Victory {
                break;
            }
        }
        assert_eq!(steps, 5);
        assert!(!game.in_combat());
        let player = &game.state().unwrap().player;
        assert_eq!(player.level(), 2);
        assert_eq!(player.gold(), 25);
    }

    #[test]
    fn test_booster_expires_with_fight() {
        let mut game = connected();
        {
            let state = game.playing().unwrap();
            state.player.add_inventory(ItemKind::DamageBooster, 1);
        }
        let mut roller = ScriptedRoller::new().with_chances(&[true]);
        game.explore(NOW, &mut roller).unwrap();

        game.combat_action(CombatAction::UseDamageBooster, NOW, &mut roller)
            .unwrap();
        assert_eq!(game.combat().map(|c| c.attack_power), Some(15));

        // Escape, then meet a new monster at base attack
        let mut roller = ScriptedRoller::new().with_chances(&[true, true]);
        game.combat_action(CombatAction::Flee, NOW, &mut roller).unwrap();
        assert!(!game.in_combat());
        game.explore(NOW, &mut roller).unwrap();
        assert_eq!(game.combat().map(|c| c.attack_power), Some(10));
        assert_eq!(game.state().unwrap().player.attack(), 10);
    }

    #[test]
    fn test_defeat_resets_game_keeping_name() {
        let mut game = in_fight();
        {
            let state = game.playing().unwrap();
            state.player.adjust_hp(-99);
            state.player.adjust_gold(100);
        }

        let result = game
            .combat_action(CombatAction::Attack, NOW + 60, &mut ScriptedRoller::new())
            .unwrap();

        assert_eq!(result.phase, CombatPhase::Defeat);
        assert!(!game.in_combat());
        let state = game.state().unwrap();
        assert_eq!(state.player.name(), "Hero");
        assert_eq!(state.player.hp(), 100);
        assert_eq!(state.player.gold(), 20);
        assert_eq!(state.last_energy_restore_time, NOW + 60);
        assert!(game.take_pending_save().is_some());
    }

    #[test]
    fn test_tick_restores_and_saves_only_when_changed() {
        let mut game = connected();
        assert_eq!(game.tick(NOW + 10), Ok(0));
        assert!(game.take_pending_save().is_none());

        game.move_player(Direction::East, NOW).unwrap();
        game.take_pending_save();
        assert_eq!(game.tick(NOW + 1800), Ok(1));
        assert!(game.take_pending_save().is_some());
    }
}
