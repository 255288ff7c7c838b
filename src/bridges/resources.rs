//! Per-player bridge and castle supply.
//!
//! Counts live in a persistent `im::HashMap`, so cloning a tracker for a
//! speculative branch is O(1) and the branches never observe each other's
//! decrements.

use im::HashMap as ImHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{BridgeError, BridgesConfig, PlayerId, Resource};

/// Remaining pieces for one player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Supply {
    pub bridges: u8,
    pub castles: u8,
}

impl Supply {
    /// Same count of bridges and castles.
    #[must_use]
    pub const fn uniform(count: u8) -> Self {
        Self {
            bridges: count,
            castles: count,
        }
    }

    fn slot_mut(&mut self, resource: Resource) -> &mut u8 {
        match resource {
            Resource::Bridge => &mut self.bridges,
            Resource::Castle => &mut self.castles,
        }
    }
}

/// Bridge and castle counts keyed by player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceTracker {
    supplies: ImHashMap<PlayerId, Supply>,
}

impl ResourceTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a player with the starting supply for `player_count` players.
    ///
    /// Re-registering a player resets their supply.
    pub fn init_player(&mut self, config: &BridgesConfig, player: PlayerId, player_count: usize) {
        let supply = Supply::uniform(config.supply_for(player_count));
        tracing::trace!(%player, player_count, count = supply.bridges, "initialized supply");
        self.supplies.insert(player, supply);
    }

    /// Full supply of a player.
    pub fn supply(&self, player: PlayerId) -> Result<Supply, BridgeError> {
        self.supplies
            .get(&player)
            .copied()
            .ok_or(BridgeError::NotInitialized(player))
    }

    /// Remaining bridges.
    pub fn bridges(&self, player: PlayerId) -> Result<u8, BridgeError> {
        self.supply(player).map(|s| s.bridges)
    }

    /// Remaining castles.
    pub fn castles(&self, player: PlayerId) -> Result<u8, BridgeError> {
        self.supply(player).map(|s| s.castles)
    }

    /// Take one bridge; returns the new count.
    pub fn decrement_bridges(&mut self, player: PlayerId) -> Result<u8, BridgeError> {
        self.decrement(player, Resource::Bridge)
    }

    /// Take one castle; returns the new count.
    pub fn decrement_castles(&mut self, player: PlayerId) -> Result<u8, BridgeError> {
        self.decrement(player, Resource::Castle)
    }

    fn decrement(&mut self, player: PlayerId, resource: Resource) -> Result<u8, BridgeError> {
        let supply = self
            .supplies
            .get_mut(&player)
            .ok_or(BridgeError::NotInitialized(player))?;
        let slot = supply.slot_mut(resource);
        if *slot == 0 {
            return Err(BridgeError::ResourceExhausted { player, resource });
        }
        *slot -= 1;
        Ok(*slot)
    }

    /// Overwrite a player's supply (snapshot restore).
    pub(crate) fn set_supply(&mut self, player: PlayerId, supply: Supply) {
        self.supplies.insert(player, supply);
    }

    /// Registered players with their supply, in player order.
    #[must_use]
    pub fn entries(&self) -> Vec<(PlayerId, Supply)> {
        let mut entries: Vec<_> = self.supplies.iter().map(|(p, s)| (*p, *s)).collect();
        entries.sort_by_key(|(p, _)| *p);
        entries
    }
}
