//! Gridquest - turn-based grid exploration and combat.
//!
//! The library holds the whole game engine; the binary is a thin text
//! driver around [`Game`].

pub mod build_info;
pub mod character;
pub mod combat;
pub mod config;
pub mod core;
pub mod persistence;
pub mod world;

pub use crate::core::constants::*;
pub use crate::core::{ConnectOutcome, Game, GameError, GameState, HostIdentity};
