//! Error taxonomy for the bridge rules.
//!
//! Every variant reports a broken caller contract. Well-behaved hosts that
//! consult the validators before mutating never see them. All checks run
//! before any state changes, so an `Err` never leaves partial updates.

use thiserror::Error;

use super::player::PlayerId;
use crate::board::{Axis, Position};

/// Finite per-player resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Bridge,
    Castle,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Bridge => f.write_str("bridges"),
            Resource::Castle => f.write_str("castles"),
        }
    }
}

/// Errors returned by `BridgeRules` and its parts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BridgeError {
    #[error("{0} was never registered for bridges and castles")]
    NotInitialized(PlayerId),

    #[error("{player} has no {resource} left")]
    ResourceExhausted { player: PlayerId, resource: Resource },

    #[error("cannot deploy {axis} bridge on {position}")]
    IllegalPlacement { position: Position, axis: Axis },

    #[error("no tile at {0}")]
    NoTile(Position),

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("snapshot refers to unknown player index {0}")]
    UnknownPlayerIndex(u32),

    #[error("snapshot codec failed: {0}")]
    Codec(String),
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::Codec(err.to_string())
    }
}

impl From<bincode::Error> for BridgeError {
    fn from(err: bincode::Error) -> Self {
        BridgeError::Codec(err.to_string())
    }
}
