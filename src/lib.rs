//! # tile-bridges
//!
//! Bridge rules for tile-laying board games: when a bridge may be built,
//! when a tile may be placed over a mismatched edge because a bridge
//! fixes it, and how many bridges and castles each player has left.
//!
//! ## Design Principles
//!
//! 1. **Board-Agnostic**: The rules read and write tiles through the
//!    `TileBoard` trait and never own the board.
//!
//! 2. **Reproducible**: Neighbors are always scanned N, E, S, W and offers
//!    iterate in position order, so the same board yields the same moves.
//!
//! 3. **Cheap Forks**: Supply lives in `im` persistent maps; `copy()` is
//!    O(1) and forks never share mutable state.
//!
//! 4. **Checks Before Mutation**: Every fallible operation validates first,
//!    so an error never leaves partial state behind.
//!
//! ## Modules
//!
//! - `core`: Players, configuration, errors
//! - `board`: Positions, directions, axes, tiles, tile catalog
//! - `bridges`: Validation, offers, supply, snapshots, `BridgeRules`

pub mod board;
pub mod bridges;
pub mod core;

// Re-export commonly used types
pub use crate::core::{BridgeError, BridgesConfig, PlayerId, Resource};

pub use crate::board::{
    Axis, AxisSet, Board, Direction, Edge, Position, Tile, TileBoard, TileCatalog,
    TileDefinition, TileTrigger,
};

pub use crate::bridges::{
    BridgeAction, BridgeEvent, BridgeRules, BridgeSnapshot, EventSink, PlacementValidator,
    PlayerSnapshot, ResourceTracker, Supply,
};
