//! Board access for the bridge rules.
//!
//! The rules only need three things from a board: look up a tile, mutate a
//! tile to record a bridge, and list the placed neighbors of a position.
//! `TileBoard` captures that seam; `Board` is a hash-map backed
//! implementation used by tests, benches, and simple hosts.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::location::{Direction, Position};
use super::tile::Tile;

/// Placed neighbors of a position, keyed by direction from that position.
///
/// Always in `Direction::ALL` order; empty cells are omitted.
pub type Neighbors<'a> = SmallVec<[(Direction, &'a Tile); 4]>;

/// Read/write access to placed tiles.
pub trait TileBoard {
    /// Tile at `position`, if one is placed.
    fn tile(&self, position: Position) -> Option<&Tile>;

    /// Mutable tile at `position`, if one is placed.
    fn tile_mut(&mut self, position: Position) -> Option<&mut Tile>;

    /// Placed tiles adjacent to `position`.
    ///
    /// Default implementation scans N, E, S, W. Implementations that
    /// override this must keep that order; mandatory bridge resolution
    /// depends on it.
    fn adjacent_tiles(&self, position: Position) -> Neighbors<'_> {
        Direction::ALL
            .into_iter()
            .filter_map(|d| self.tile(position.neighbor(d)).map(|t| (d, t)))
            .collect()
    }
}

/// Tiles keyed by position.
#[derive(Clone, Debug, Default)]
pub struct Board {
    tiles: FxHashMap<Position, Tile>,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a tile on the board, returning whatever was there before.
    pub fn place(&mut self, position: Position, tile: Tile) -> Option<Tile> {
        self.tiles.insert(position, tile)
    }

    /// Put a tile on the board (builder pattern).
    #[must_use]
    pub fn with_tile(mut self, position: Position, tile: Tile) -> Self {
        self.place(position, tile);
        self
    }

    /// Remove a tile.
    pub fn remove(&mut self, position: Position) -> Option<Tile> {
        self.tiles.remove(&position)
    }

    /// Number of placed tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

impl TileBoard for Board {
    fn tile(&self, position: Position) -> Option<&Tile> {
        self.tiles.get(&position)
    }

    fn tile_mut(&mut self, position: Position) -> Option<&mut Tile> {
        self.tiles.get_mut(&position)
    }
}
