//! Bridge rule configuration.
//!
//! Hosts configure the rules at game setup. The defaults reproduce the
//! standard expansion: three bridges and three castles each in games of
//! up to four players, two each with five or more, and bridges landing on
//! road (`R`) edges.

use serde::{Deserialize, Serialize};

use crate::board::Edge;

/// Configuration for `BridgeRules`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgesConfig {
    /// Bridges and castles per player in smaller games.
    pub small_game_supply: u8,

    /// Bridges and castles per player once `large_game_threshold` is reached.
    pub large_game_supply: u8,

    /// Player count at which `large_game_supply` applies.
    pub large_game_threshold: usize,

    /// Edge label a neighbor must show for a bridge to land on it.
    pub landing_edge: Edge,
}

impl Default for BridgesConfig {
    fn default() -> Self {
        Self {
            small_game_supply: 3,
            large_game_supply: 2,
            large_game_threshold: 5,
            landing_edge: Edge::Road,
        }
    }
}

impl BridgesConfig {
    /// Create the standard configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starting bridge/castle count for each player in a game of
    /// `player_count` players.
    #[must_use]
    pub fn supply_for(&self, player_count: usize) -> u8 {
        if player_count < self.large_game_threshold {
            self.small_game_supply
        } else {
            self.large_game_supply
        }
    }

    /// Set the small-game supply.
    #[must_use]
    pub fn with_small_game_supply(mut self, supply: u8) -> Self {
        self.small_game_supply = supply;
        self
    }

    /// Set the large-game supply.
    #[must_use]
    pub fn with_large_game_supply(mut self, supply: u8) -> Self {
        self.large_game_supply = supply;
        self
    }

    /// Set the player count at which the large-game supply applies.
    #[must_use]
    pub fn with_large_game_threshold(mut self, threshold: usize) -> Self {
        self.large_game_threshold = threshold;
        self
    }

    /// Set the landing edge label.
    #[must_use]
    pub fn with_landing_edge(mut self, edge: Edge) -> Self {
        self.landing_edge = edge;
        self
    }
}
