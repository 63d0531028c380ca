//! Gameplay error kinds.

use crate::character::inventory::ItemKind;
use thiserror::Error;

/// Recoverable gameplay failures, surfaced to the player as a message.
///
/// None of these mutate state: an operation that returns an error leaves
/// the game exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("You are too tired. Rest to regain energy.")]
    InsufficientEnergy,

    #[error("Not enough gold: costs {price}, you have {gold}.")]
    InsufficientGold { price: u32, gold: u32 },

    #[error("You have no {0} left.")]
    InsufficientItem(ItemKind),

    #[error("There is no shop here.")]
    NoShopHere,

    #[error("You cannot do that during combat.")]
    InCombat,

    #[error("You are not in combat.")]
    NotInCombat,

    #[error("Waiting for a player identity.")]
    MissingIdentity,
}
