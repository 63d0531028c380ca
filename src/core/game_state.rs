use crate::character::player::Player;
use crate::core::constants::MAX_TIMESTAMP_SECONDS;
use crate::core::dice::Roller;
use crate::world::map::WorldMap;
use crate::world::regions::{get_region, Region, RegionKind};
use serde::{Deserialize, Serialize};

/// Everything that survives between sessions. Saved and restored as one unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub player: Player,
    pub map: WorldMap,
    /// Unix seconds marking the start of the current energy restore window.
    pub last_energy_restore_time: i64,
}

impl GameState {
    /// Creates a new game with a freshly rolled map.
    pub fn new(player_name: String, current_time: i64, roller: &mut impl Roller) -> Self {
        Self {
            player: Player::new(player_name),
            map: WorldMap::generate(roller),
            last_energy_restore_time: current_time,
        }
    }

    /// Region under the player.
    ///
    /// The position is always on the map: new games start on the village
    /// tile, moves never leave the grid and loaded saves pass [`validate`].
    ///
    /// [`validate`]: GameState::validate
    pub fn current_region(&self) -> &'static Region {
        let kind = self.map.region_at(self.player.position());
        debug_assert!(kind.is_some(), "player position is off the map");
        get_region(kind.unwrap_or(RegionKind::Village))
    }

    /// Checks the invariants a loaded save must satisfy.
    pub fn validate(&self) -> Result<(), String> {
        if !self.map.is_square() {
            return Err("map is not a square grid".to_string());
        }
        if !(0..=MAX_TIMESTAMP_SECONDS).contains(&self.last_energy_restore_time) {
            return Err(format!(
                "energy restore time {} out of range",
                self.last_energy_restore_time
            ));
        }
        self.player.validate(self.map.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_new_game_state_has_valid_initial_values() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let state = GameState::new("Test Hero".to_string(), 1000, &mut rng);
        assert_eq!(state.player.name(), "Test Hero");
        assert_eq!(state.last_energy_restore_time, 1000);
        assert!(state.validate().is_ok());
        assert_eq!(state.current_region().kind, RegionKind::Village);
    }

    #[test]
    fn test_validate_rejects_out_of_range_timestamps() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut state = GameState::new("Clock".to_string(), 0, &mut rng);
        assert!(state.validate().is_ok());

        for bad in [-1, i64::MIN, MAX_TIMESTAMP_SECONDS + 1, i64::MAX] {
            state.last_energy_restore_time = bad;
            assert!(state.validate().is_err(), "timestamp {} accepted", bad);
        }
        state.last_energy_restore_time = MAX_TIMESTAMP_SECONDS;
        assert!(state.validate().is_ok());
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "off the map")]
    fn test_current_region_off_map_is_a_bug() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut state = GameState::new("Lost".to_string(), 0, &mut rng);
        state.map = WorldMap::from_tiles(vec![vec![RegionKind::Village]]);
        state.player.set_position(crate::world::map::Position::new(3, 3));
        state.current_region();
    }

    #[test]
    fn test_json_round_trip_is_lossless() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut state = GameState::new("Round Trip".to_string(), 42, &mut rng);
        state.player.adjust_hp(-37);
        state.player.add_xp(7);

        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }
}
