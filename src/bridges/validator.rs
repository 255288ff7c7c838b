//! Bridge legality checks.
//!
//! All checks walk the placed neighbors of a position in the fixed order
//! N, E, S, W and compare the tile's edge in direction `d` with the
//! neighbor's edge in direction `d.rev()`.
//!
//! ## Rules
//!
//! - A bridge on axis `A` needs every neighbor reached along `A` to show the
//!   landing edge toward the bridged tile.
//! - A tile may be placed over a mismatch if a bridge on the tile itself
//!   covers every mismatched side, or if exactly one mismatching neighbor
//!   can take a bridge instead.

use crate::board::{Axis, Edge, Position, Tile, TileBoard};
use crate::core::BridgesConfig;

/// Read-only legality checks against a board.
#[derive(Debug)]
pub struct PlacementValidator<'b, B: ?Sized> {
    board: &'b B,
    landing: Edge,
}

impl<B: ?Sized> Clone for PlacementValidator<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: ?Sized> Copy for PlacementValidator<'_, B> {}

impl<'b, B: TileBoard + ?Sized> PlacementValidator<'b, B> {
    /// Create a validator over `board`.
    #[must_use]
    pub fn new(board: &'b B, config: &BridgesConfig) -> Self {
        Self {
            board,
            landing: config.landing_edge,
        }
    }

    /// The board being checked.
    #[must_use]
    pub fn board(&self) -> &'b B {
        self.board
    }

    /// Can `tile` at `position` physically carry a bridge on `axis`?
    ///
    /// `tile` may or may not be on the board yet; only the neighbors around
    /// `position` are consulted.
    #[must_use]
    pub fn can_build_bridge(&self, tile: &Tile, position: Position, axis: Axis) -> bool {
        if !tile.is_bridge_allowed(axis) {
            return false;
        }
        self.board
            .adjacent_tiles(position)
            .iter()
            .filter(|(dir, _)| dir.intersects(axis))
            .all(|(dir, adjacent)| adjacent.edge(dir.rev()) == self.landing)
    }

    /// Can `tile` be placed at `position` with a bridge of its own on `axis`
    /// covering any mismatch?
    ///
    /// Sides on the axis must face a landing edge; all other sides must
    /// match normally.
    #[must_use]
    pub fn can_place_with_bridge(&self, tile: &Tile, position: Position, axis: Axis) -> bool {
        if !tile.is_bridge_allowed(axis) {
            return false;
        }
        self.board
            .adjacent_tiles(position)
            .iter()
            .all(|(dir, adjacent)| {
                let adjacent_side = adjacent.edge(dir.rev());
                if dir.intersects(axis) {
                    adjacent_side == self.landing
                } else {
                    adjacent_side == tile.edge(*dir)
                }
            })
    }

    /// Can `tile` be placed at `position` if exactly one mismatching
    /// neighbor receives a bridge?
    ///
    /// Zero mismatches means no bridge is involved and returns `false`.
    #[must_use]
    pub fn can_place_with_adjacent_bridge(&self, tile: &Tile, position: Position) -> bool {
        let mut bridge_needed = false;
        for (dir, adjacent) in self.board.adjacent_tiles(position) {
            let tile_side = tile.edge(dir);
            if tile_side == adjacent.edge(dir.rev()) {
                continue;
            }
            if bridge_needed || tile_side != self.landing {
                return false;
            }
            let adjacent_pos = position.neighbor(dir);
            if !self.can_build_bridge(adjacent, adjacent_pos, dir.bridge_axis()) {
                return false;
            }
            bridge_needed = true;
        }
        bridge_needed
    }

    /// Any bridge-assisted placement of `tile` at `position`.
    ///
    /// Supply checks are the caller's concern.
    #[must_use]
    pub fn can_place_with_any_bridge(&self, tile: &Tile, position: Position) -> bool {
        Axis::ALL
            .into_iter()
            .any(|axis| self.can_place_with_bridge(tile, position, axis))
            || self.can_place_with_adjacent_bridge(tile, position)
    }

    /// Does `tile` at `position` match every placed neighbor?
    #[must_use]
    pub fn matches_all_neighbors(&self, tile: &Tile, position: Position) -> bool {
        self.board
            .adjacent_tiles(position)
            .iter()
            .all(|(dir, adjacent)| tile.edge(*dir) == adjacent.edge(dir.rev()))
    }
}
