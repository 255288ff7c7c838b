//! Saved-game shape of the bridge state.
//!
//! ```json
//! { "bridgeUsed": false, "players": [ { "index": 0, "castles": 3, "bridges": 2 } ] }
//! ```
//!
//! JSON is the interchange form; `to_bytes`/`from_bytes` give a compact
//! bincode encoding of the same record.

use serde::{Deserialize, Serialize};

use super::resources::Supply;
use crate::core::{BridgeError, PlayerId};

/// Saved supply of one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub index: u32,
    pub castles: u8,
    pub bridges: u8,
}

impl PlayerSnapshot {
    #[must_use]
    pub fn new(player: PlayerId, supply: Supply) -> Self {
        Self {
            index: u32::from(player.0),
            castles: supply.castles,
            bridges: supply.bridges,
        }
    }

    #[must_use]
    pub fn supply(&self) -> Supply {
        Supply {
            bridges: self.bridges,
            castles: self.castles,
        }
    }
}

/// Saved bridge state of a game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeSnapshot {
    pub bridge_used: bool,
    #[serde(default)]
    pub players: Vec<PlayerSnapshot>,
}

impl BridgeSnapshot {
    pub fn to_json(&self) -> Result<String, BridgeError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, BridgeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, BridgeError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BridgeError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
