//! Core types shared by the bridge rules: players, configuration, errors.

pub mod config;
pub mod error;
pub mod player;

pub use config::BridgesConfig;
pub use error::{BridgeError, Resource};
pub use player::PlayerId;
