use super::store::{CloudStore, StoreError};
use crate::character::player::Player;
use crate::core::constants::{SAVE_KEY, SAVE_SCHEMA_VERSION};
use crate::core::game_state::GameState;
use crate::world::map::WorldMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("corrupt save: {0}")]
    Corrupt(String),

    #[error("unsupported save version {0}")]
    UnsupportedVersion(u64),

    #[error("save checksum verification failed")]
    ChecksumMismatch,

    #[error("save violates game invariants: {0}")]
    Invalid(String),
}

/// Versioned save document.
///
/// ```json
/// { "version": 1, "checksum": "<sha256 hex of state>", "state": { ... } }
/// ```
///
/// The checksum covers the compact JSON of `state` as produced by
/// `serde_json::Value`, so it is stable across load and save.
#[derive(Debug, Serialize, Deserialize)]
struct SaveDocument {
    version: u64,
    checksum: String,
    state: serde_json::Value,
}

/// Unversioned documents written before the schema carried a version.
/// Timestamps were milliseconds.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacySave {
    player: Player,
    map: WorldMap,
    #[serde(alias = "lastEnergyRestore")]
    last_energy_restore_time: i64,
}

fn checksum_hex(payload: &str) -> String {
    Sha256::digest(payload.as_bytes())
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Serialized state captured at the moment a save was requested.
///
/// Later mutations of the game never leak into a snapshot already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSnapshot(String);

impl SaveSnapshot {
    pub fn capture(state: &GameState) -> Result<Self, PersistenceError> {
        let value = serde_json::to_value(state)?;
        let payload = serde_json::to_string(&value)?;
        let document = SaveDocument {
            version: SAVE_SCHEMA_VERSION as u64,
            checksum: checksum_hex(&payload),
            state: value,
        };
        Ok(Self(serde_json::to_string(&document)?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Parses a stored document, migrating legacy saves.
pub fn decode_save(text: &str) -> Result<GameState, PersistenceError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| PersistenceError::Corrupt(e.to_string()))?;

    let state = match value.get("version") {
        Some(version) => {
            let version = version
                .as_u64()
                .ok_or_else(|| PersistenceError::Corrupt("version is not a number".to_string()))?;
            if version != SAVE_SCHEMA_VERSION as u64 {
                return Err(PersistenceError::UnsupportedVersion(version));
            }
            let document: SaveDocument = serde_json::from_value(value)
                .map_err(|e| PersistenceError::Corrupt(e.to_string()))?;
            let payload = serde_json::to_string(&document.state)?;
            if checksum_hex(&payload) != document.checksum {
                return Err(PersistenceError::ChecksumMismatch);
            }
            serde_json::from_value::<GameState>(document.state)
                .map_err(|e| PersistenceError::Corrupt(e.to_string()))?
        }
        None => {
            let legacy: LegacySave = serde_json::from_value(value)
                .map_err(|e| PersistenceError::Corrupt(e.to_string()))?;
            log::info!("migrating unversioned save to version {}", SAVE_SCHEMA_VERSION);
            GameState {
                player: legacy.player,
                map: legacy.map,
                last_energy_restore_time: legacy.last_energy_restore_time / 1000,
            }
        }
    };

    state.validate().map_err(PersistenceError::Invalid)?;
    Ok(state)
}

/// Saves and loads the game under one fixed key of a [`CloudStore`].
pub struct PersistenceGateway<S> {
    store: S,
    key: String,
}

impl<S: CloudStore> PersistenceGateway<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, SAVE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Writes a snapshot taken earlier.
    pub async fn write(&self, snapshot: SaveSnapshot) -> Result<(), PersistenceError> {
        self.store.set(&self.key, snapshot.into_string()).await?;
        Ok(())
    }

    /// Snapshots `state` immediately, then writes it.
    pub async fn save(&self, state: &GameState) -> Result<(), PersistenceError> {
        let snapshot = SaveSnapshot::capture(state)?;
        self.write(snapshot).await
    }

    /// `Ok(None)` means there is no save yet: start a new game.
    pub async fn load(&self) -> Result<Option<GameState>, PersistenceError> {
        match self.store.get(&self.key).await? {
            Some(text) => decode_save(&text).map(Some),
            None => Ok(None),
        }
    }

    /// Like [`load`](Self::load), but a broken or unreachable save is logged
    /// and treated as absent so the player gets a fresh game.
    pub async fn load_or_fresh(&self) -> Option<GameState> {
        match self.load().await {
            Ok(state) => state,
            Err(e) => {
                log::warn!("could not load save, starting fresh: {}", e);
                None
            }
        }
    }
}
