//! Bridge action offers.
//!
//! A `BridgeAction` lists every site where the active player may build a
//! bridge right now: a position and the axes available there. Offers are
//! rebuilt on demand and never persisted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::validator::PlacementValidator;
use crate::board::{Axis, AxisSet, Position, Tile, TileBoard};
use crate::core::BridgeError;

/// Legal bridge sites, keyed by position.
///
/// Positions iterate in ascending order so offers are reproducible.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeAction {
    sites: BTreeMap<Position, AxisSet>,
}

impl BridgeAction {
    /// Create an empty offer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a site.
    pub fn add(&mut self, position: Position, axis: Axis) {
        self.sites.entry(position).or_default().insert(axis);
    }

    /// Add a site (builder pattern).
    #[must_use]
    pub fn with_site(mut self, position: Position, axis: Axis) -> Self {
        self.add(position, axis);
        self
    }

    /// Does the offer include `axis` at `position`?
    #[must_use]
    pub fn contains(&self, position: Position, axis: Axis) -> bool {
        self.axes_at(position).contains(axis)
    }

    /// Axes offered at `position` (empty if none).
    #[must_use]
    pub fn axes_at(&self, position: Position) -> AxisSet {
        self.sites.get(&position).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Number of (position, axis) pairs on offer.
    #[must_use]
    pub fn site_count(&self) -> usize {
        self.sites.values().map(|axes| axes.iter().count()).sum()
    }

    /// Iterate positions with their axes.
    pub fn iter(&self) -> impl Iterator<Item = (Position, AxisSet)> + '_ {
        self.sites.iter().map(|(p, a)| (*p, *a))
    }

    /// Iterate individual (position, axis) pairs.
    pub fn sites(&self) -> impl Iterator<Item = (Position, Axis)> + '_ {
        self.iter().flat_map(|(p, axes)| axes.iter().map(move |a| (p, a)))
    }
}

fn offer_if_buildable<B: TileBoard + ?Sized>(
    validator: &PlacementValidator<'_, B>,
    action: &mut BridgeAction,
    tile: &Tile,
    position: Position,
    axis: Axis,
) -> bool {
    let ok = validator.can_build_bridge(tile, position, axis);
    if ok {
        action.add(position, axis);
    }
    ok
}

/// Every bridge the active tile at `position` or one of its neighbors
/// could take.
///
/// The active tile is checked on both axes. Each neighbor is checked only
/// on the axis pointing back at the active tile.
pub fn enumerate_bridge_actions<B: TileBoard + ?Sized>(
    validator: &PlacementValidator<'_, B>,
    position: Position,
) -> Result<BridgeAction, BridgeError> {
    let board = validator.board();
    let tile = board.tile(position).ok_or(BridgeError::NoTile(position))?;

    let mut action = BridgeAction::new();
    for axis in Axis::ALL {
        offer_if_buildable(validator, &mut action, tile, position, axis);
    }
    for (dir, adjacent) in board.adjacent_tiles(position) {
        offer_if_buildable(
            validator,
            &mut action,
            adjacent,
            position.neighbor(dir),
            dir.bridge_axis(),
        );
    }

    tracing::trace!(%position, sites = action.site_count(), "enumerated bridge sites");
    Ok(action)
}

/// The bridge that must resolve the mismatch of the tile just committed
/// at `position`.
///
/// Stops at the first mismatched side (N, E, S, W order): tries the
/// committed tile, then the neighbor, on that side's axis. Returns
/// `Ok(None)` if neither can carry the bridge and `InvariantViolation` if
/// the tile has no mismatch at all.
pub fn find_mandatory_bridge<B: TileBoard + ?Sized>(
    validator: &PlacementValidator<'_, B>,
    position: Position,
) -> Result<Option<BridgeAction>, BridgeError> {
    let board = validator.board();
    let tile = board.tile(position).ok_or(BridgeError::NoTile(position))?;

    let mismatch = board
        .adjacent_tiles(position)
        .into_iter()
        .find(|(dir, adjacent)| tile.edge(*dir) != adjacent.edge(dir.rev()));

    let Some((dir, adjacent)) = mismatch else {
        return Err(BridgeError::InvariantViolation(format!(
            "mandatory bridge requested but {position} matches all neighbors"
        )));
    };

    let axis = dir.bridge_axis();
    let mut action = BridgeAction::new();
    if offer_if_buildable(validator, &mut action, tile, position, axis)
        || offer_if_buildable(validator, &mut action, adjacent, position.neighbor(dir), axis)
    {
        return Ok(Some(action));
    }
    Ok(None)
}
