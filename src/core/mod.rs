//! Core game state and logic.

pub mod balance;
pub mod constants;
pub mod dice;
pub mod error;
pub mod exploration;
pub mod game_logic;
pub mod game_state;
pub mod progression;

pub use error::GameError;
pub use game_logic::{ConnectOutcome, Game, HostIdentity};
pub use game_state::GameState;
