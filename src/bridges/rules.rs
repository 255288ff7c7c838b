//! The bridge rules as a game component.
//!
//! `BridgeRules` owns the per-game bridge state: each player's supply and
//! whether a bridge was already built this turn. The board is never owned;
//! each call receives it, so a fork made with `copy` can be paired with
//! whatever board the caller likes.
//!
//! ## Turn Flow
//!
//! 1. `turn_clean_up` at every turn boundary
//! 2. `is_special_placement_allowed` while checking tile placements
//! 3. `prepare_actions` / `prepare_mandatory_action` to offer bridges
//! 4. `deploy_bridge` or `commit_bridge` once a site is chosen

use tracing::instrument;

use super::actions::{enumerate_bridge_actions, find_mandatory_bridge, BridgeAction};
use super::events::{BridgeEvent, EventSink};
use super::resources::{ResourceTracker, Supply};
use super::snapshot::{BridgeSnapshot, PlayerSnapshot};
use super::validator::PlacementValidator;
use crate::board::{Axis, Position, Tile, TileBoard};
use crate::core::{BridgeError, BridgesConfig, PlayerId, Resource};

/// Bridge and castle state for one game.
///
/// ## Example
///
/// ```
/// use tile_bridges::board::{Axis, AxisSet, Board, Position, Tile};
/// use tile_bridges::bridges::{BridgeAction, BridgeEvent, BridgeRules};
/// use tile_bridges::core::PlayerId;
///
/// let mut rules = BridgeRules::default();
/// rules.init_players(2);
///
/// let origin = Position::new(0, 0);
/// let mut board = Board::new()
///     .with_tile(origin, Tile::from_codes("U", "FRFR").unwrap().with_bridge_axes(AxisSet::BOTH));
///
/// let mut offers: Vec<BridgeAction> = Vec::new();
/// rules.prepare_actions(&mut offers, &board, PlayerId::new(0), origin).unwrap();
/// assert!(offers[0].contains(origin, Axis::Vertical));
///
/// let mut events: Vec<BridgeEvent> = Vec::new();
/// rules.commit_bridge(&mut board, &mut events, PlayerId::new(0), origin, Axis::Vertical).unwrap();
/// assert_eq!(rules.player_bridges(PlayerId::new(0)), Ok(2));
/// assert!(rules.bridge_used());
/// assert!(matches!(events[0], BridgeEvent::BridgeDeployed { .. }));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BridgeRules {
    config: BridgesConfig,
    resources: ResourceTracker,
    bridge_used: bool,
}

impl BridgeRules {
    /// Create rules with the given configuration and no players.
    #[must_use]
    pub fn new(config: BridgesConfig) -> Self {
        Self {
            config,
            resources: ResourceTracker::new(),
            bridge_used: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &BridgesConfig {
        &self.config
    }

    #[must_use]
    pub fn resources(&self) -> &ResourceTracker {
        &self.resources
    }

    /// Has a bridge been built this turn?
    #[must_use]
    pub fn bridge_used(&self) -> bool {
        self.bridge_used
    }

    /// Legality checks over `board` using this game's configuration.
    #[must_use]
    pub fn validator<'b, B: TileBoard + ?Sized>(&self, board: &'b B) -> PlacementValidator<'b, B> {
        PlacementValidator::new(board, &self.config)
    }

    // === Setup ===

    /// Register one player in a game of `player_count` players.
    pub fn init_player(&mut self, player: PlayerId, player_count: usize) {
        self.resources.init_player(&self.config, player, player_count);
    }

    /// Register players `0..player_count`.
    pub fn init_players(&mut self, player_count: usize) {
        for player in PlayerId::all(player_count) {
            self.init_player(player, player_count);
        }
    }

    // === Turn ===

    /// Turn boundary: bridges may be built again.
    pub fn turn_clean_up(&mut self) {
        self.bridge_used = false;
    }

    /// Offer a bridge action to `active_player` if one is available.
    ///
    /// Nothing is offered once a bridge was built this turn, when the
    /// player is out of bridges, or when no site is legal. Returns whether
    /// an offer was appended.
    pub fn prepare_actions<B, O>(
        &self,
        offers: &mut O,
        board: &B,
        active_player: PlayerId,
        active_tile: Position,
    ) -> Result<bool, BridgeError>
    where
        B: TileBoard + ?Sized,
        O: Extend<BridgeAction>,
    {
        if self.bridge_used || self.resources.bridges(active_player)? == 0 {
            return Ok(false);
        }
        let action = enumerate_bridge_actions(&self.validator(board), active_tile)?;
        if action.is_empty() {
            return Ok(false);
        }
        offers.extend(std::iter::once(action));
        Ok(true)
    }

    /// The single bridge that must fix the mismatch left by the tile just
    /// committed at `active_tile`.
    pub fn prepare_mandatory_action<B: TileBoard + ?Sized>(
        &self,
        board: &B,
        active_tile: Position,
    ) -> Result<Option<BridgeAction>, BridgeError> {
        find_mandatory_bridge(&self.validator(board), active_tile)
    }

    /// May `player` place `tile` at `position` over a mismatch by using a
    /// bridge?
    ///
    /// Requires at least one bridge in supply and either a bridge on the
    /// tile itself (either axis) or exactly one bridge on a neighbor.
    pub fn is_special_placement_allowed<B: TileBoard + ?Sized>(
        &self,
        board: &B,
        player: PlayerId,
        tile: &Tile,
        position: Position,
    ) -> Result<bool, BridgeError> {
        if self.resources.bridges(player)? == 0 {
            return Ok(false);
        }
        Ok(self.validator(board).can_place_with_any_bridge(tile, position))
    }

    // === Supply ===

    pub fn player_bridges(&self, player: PlayerId) -> Result<u8, BridgeError> {
        self.resources.bridges(player)
    }

    pub fn player_castles(&self, player: PlayerId) -> Result<u8, BridgeError> {
        self.resources.castles(player)
    }

    pub fn decrease_bridges(&mut self, player: PlayerId) -> Result<u8, BridgeError> {
        self.resources.decrement_bridges(player)
    }

    pub fn decrease_castles(&mut self, player: PlayerId) -> Result<u8, BridgeError> {
        self.resources.decrement_castles(player)
    }

    // === Mutation ===

    /// Build a bridge on the tile at `position`.
    ///
    /// Only the tile's own permission is rechecked here; neighbor
    /// legality is settled when the site is offered. Does not touch the
    /// supply (see `commit_bridge`).
    #[instrument(level = "debug", skip(self, board, events))]
    pub fn deploy_bridge<B, E>(
        &mut self,
        board: &mut B,
        events: &mut E,
        position: Position,
        axis: Axis,
    ) -> Result<(), BridgeError>
    where
        B: TileBoard + ?Sized,
        E: EventSink + ?Sized,
    {
        let tile = board.tile_mut(position).ok_or(BridgeError::NoTile(position))?;
        if !tile.is_bridge_allowed(axis) {
            tracing::warn!(%position, %axis, "rejected bridge deployment");
            return Err(BridgeError::IllegalPlacement { position, axis });
        }

        self.bridge_used = true;
        tile.place_bridge(axis);
        tracing::debug!(%position, %axis, "bridge deployed");
        events.notify(BridgeEvent::BridgeDeployed { position, axis });
        Ok(())
    }

    /// Build a bridge for `player` and take it from their supply.
    ///
    /// Supply and tile permission are both checked before anything
    /// changes. Returns the bridges left.
    #[instrument(level = "debug", skip(self, board, events))]
    pub fn commit_bridge<B, E>(
        &mut self,
        board: &mut B,
        events: &mut E,
        player: PlayerId,
        position: Position,
        axis: Axis,
    ) -> Result<u8, BridgeError>
    where
        B: TileBoard + ?Sized,
        E: EventSink + ?Sized,
    {
        if self.resources.bridges(player)? == 0 {
            return Err(BridgeError::ResourceExhausted {
                player,
                resource: Resource::Bridge,
            });
        }
        self.deploy_bridge(board, events, position, axis)?;
        let remaining = self.resources.decrement_bridges(player)?;
        events.notify(BridgeEvent::BridgeSpent { player, remaining });
        Ok(remaining)
    }

    // === Forking ===

    /// An independent copy for speculative play.
    ///
    /// Supply maps are persistent structures, so this is O(1); later
    /// changes to either copy are invisible to the other.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    // === Persistence ===

    /// Capture the used flag and every registered player's supply.
    #[must_use]
    pub fn save_snapshot(&self) -> BridgeSnapshot {
        BridgeSnapshot {
            bridge_used: self.bridge_used,
            players: self
                .resources
                .entries()
                .into_iter()
                .map(|(player, supply)| PlayerSnapshot::new(player, supply))
                .collect(),
        }
    }

    /// Restore state saved with `save_snapshot`.
    ///
    /// Snapshot indices are resolved against `roster`; players the
    /// snapshot doesn't mention keep their current supply. Nothing changes
    /// if any index is unknown.
    pub fn load_snapshot(
        &mut self,
        snapshot: &BridgeSnapshot,
        roster: &[PlayerId],
    ) -> Result<(), BridgeError> {
        let resolved = snapshot
            .players
            .iter()
            .map(|entry| {
                roster
                    .iter()
                    .find(|p| u32::from(p.0) == entry.index)
                    .map(|p| (*p, entry.supply()))
                    .ok_or(BridgeError::UnknownPlayerIndex(entry.index))
            })
            .collect::<Result<Vec<(PlayerId, Supply)>, _>>()?;

        self.bridge_used = snapshot.bridge_used;
        for (player, supply) in resolved {
            self.resources.set_supply(player, supply);
        }
        tracing::debug!(players = snapshot.players.len(), "restored bridge snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{AxisSet, Board, Direction};

    const ORIGIN: Position = Position::new(0, 0);

    fn tile(codes: &str, axes: AxisSet) -> Tile {
        Tile::from_codes("T", codes).unwrap().with_bridge_axes(axes)
    }

    fn rules(player_count: usize) -> BridgeRules {
        let mut rules = BridgeRules::default();
        rules.init_players(player_count);
        rules
    }

    #[test]
    fn test_rules_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BridgeRules>();
    }

    #[test]
    fn test_init_players() {
        let r = rules(5);
        for p in PlayerId::all(5) {
            assert_eq!(r.player_bridges(p), Ok(2));
            assert_eq!(r.player_castles(p), Ok(2));
        }
    }

    #[test]
    fn test_deploy_marks_used_and_builds() {
        let mut r = rules(2);
        let mut board = Board::new().with_tile(ORIGIN, tile("FFFF", AxisSet::BOTH));
        let mut events: Vec<BridgeEvent> = Vec::new();

        r.deploy_bridge(&mut board, &mut events, ORIGIN, Axis::Horizontal).unwrap();

        assert!(r.bridge_used());
        let t = board.tile(ORIGIN).unwrap();
        assert!(t.has_bridge(Axis::Horizontal));
        assert!(!t.has_bridge(Axis::Vertical));
        assert_eq!(
            events,
            vec![BridgeEvent::BridgeDeployed {
                position: ORIGIN,
                axis: Axis::Horizontal
            }]
        );
        // Supply untouched by a bare deploy.
        assert_eq!(r.player_bridges(PlayerId::new(0)), Ok(3));
    }

    #[test]
    fn test_deploy_forbidden_axis() {
        let mut r = rules(2);
        let mut board =
            Board::new().with_tile(ORIGIN, tile("FFFF", AxisSet::only(Axis::Vertical)));
        let mut events: Vec<BridgeEvent> = Vec::new();

        let err = r
            .deploy_bridge(&mut board, &mut events, ORIGIN, Axis::Horizontal)
            .unwrap_err();

        assert_eq!(
            err,
            BridgeError::IllegalPlacement {
                position: ORIGIN,
                axis: Axis::Horizontal
            }
        );
        assert!(!r.bridge_used());
        assert!(events.is_empty());
    }

    #[test]
    fn test_deploy_twice_on_same_slot() {
        let mut r = rules(2);
        let mut board = Board::new().with_tile(ORIGIN, tile("FFFF", AxisSet::BOTH));
        let mut events: Vec<BridgeEvent> = Vec::new();

        r.deploy_bridge(&mut board, &mut events, ORIGIN, Axis::Vertical).unwrap();
        assert!(matches!(
            r.deploy_bridge(&mut board, &mut events, ORIGIN, Axis::Vertical),
            Err(BridgeError::IllegalPlacement { .. })
        ));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_deploy_missing_tile() {
        let mut r = rules(2);
        let mut board = Board::new();
        let mut events: Vec<BridgeEvent> = Vec::new();
        assert_eq!(
            r.deploy_bridge(&mut board, &mut events, ORIGIN, Axis::Vertical),
            Err(BridgeError::NoTile(ORIGIN))
        );
    }

    #[test]
    fn test_commit_spends_bridge() {
        let mut r = rules(2);
        let player = PlayerId::new(1);
        let mut board = Board::new().with_tile(ORIGIN, tile("FFFF", AxisSet::BOTH));
        let mut events: Vec<BridgeEvent> = Vec::new();

        assert_eq!(
            r.commit_bridge(&mut board, &mut events, player, ORIGIN, Axis::Vertical),
            Ok(2)
        );
        assert_eq!(r.player_bridges(player), Ok(2));
        assert_eq!(
            events.last(),
            Some(&BridgeEvent::BridgeSpent { player, remaining: 2 })
        );
    }

    #[test]
    fn test_commit_without_supply_changes_nothing() {
        let mut r = rules(2);
        let player = PlayerId::new(0);
        for _ in 0..3 {
            r.decrease_bridges(player).unwrap();
        }
        let mut board = Board::new().with_tile(ORIGIN, tile("FFFF", AxisSet::BOTH));
        let mut events: Vec<BridgeEvent> = Vec::new();

        let err = r
            .commit_bridge(&mut board, &mut events, player, ORIGIN, Axis::Vertical)
            .unwrap_err();

        assert!(matches!(err, BridgeError::ResourceExhausted { .. }));
        assert!(!board.tile(ORIGIN).unwrap().has_bridge(Axis::Vertical));
        assert!(!r.bridge_used());
        assert!(events.is_empty());
    }

    #[test]
    fn test_commit_illegal_keeps_supply() {
        let mut r = rules(2);
        let player = PlayerId::new(0);
        let mut board = Board::new().with_tile(ORIGIN, tile("FFFF", AxisSet::EMPTY));
        let mut events: Vec<BridgeEvent> = Vec::new();

        assert!(r
            .commit_bridge(&mut board, &mut events, player, ORIGIN, Axis::Vertical)
            .is_err());
        assert_eq!(r.player_bridges(player), Ok(3));
    }

    #[test]
    fn test_prepare_actions_respects_used_flag() {
        let mut r = rules(2);
        let player = PlayerId::new(0);
        let mut board = Board::new().with_tile(ORIGIN, tile("FFFF", AxisSet::BOTH));
        let mut offers: Vec<BridgeAction> = Vec::new();

        assert_eq!(r.prepare_actions(&mut offers, &board, player, ORIGIN), Ok(true));
        assert_eq!(offers.len(), 1);

        let mut events: Vec<BridgeEvent> = Vec::new();
        r.deploy_bridge(&mut board, &mut events, ORIGIN, Axis::Vertical).unwrap();
        assert_eq!(r.prepare_actions(&mut offers, &board, player, ORIGIN), Ok(false));

        r.turn_clean_up();
        assert_eq!(r.prepare_actions(&mut offers, &board, player, ORIGIN), Ok(true));
        assert_eq!(offers.len(), 2);
        assert!(!offers[1].contains(ORIGIN, Axis::Vertical));
        assert!(offers[1].contains(ORIGIN, Axis::Horizontal));
    }

    #[test]
    fn test_prepare_actions_no_supply() {
        let mut r = rules(2);
        let player = PlayerId::new(0);
        for _ in 0..3 {
            r.decrease_bridges(player).unwrap();
        }
        let board = Board::new().with_tile(ORIGIN, tile("FFFF", AxisSet::BOTH));
        let mut offers: Vec<BridgeAction> = Vec::new();
        assert_eq!(r.prepare_actions(&mut offers, &board, player, ORIGIN), Ok(false));
        assert!(offers.is_empty());
    }

    #[test]
    fn test_prepare_actions_empty_offer() {
        let r = rules(2);
        let board = Board::new().with_tile(ORIGIN, tile("FFFF", AxisSet::EMPTY));
        let mut offers: Vec<BridgeAction> = Vec::new();
        assert_eq!(
            r.prepare_actions(&mut offers, &board, PlayerId::new(1), ORIGIN),
            Ok(false)
        );
    }

    #[test]
    fn test_special_placement_needs_supply() {
        let mut r = rules(2);
        let player = PlayerId::new(0);
        let board = Board::new().with_tile(
            ORIGIN.neighbor(Direction::North),
            tile("FFRF", AxisSet::EMPTY),
        );
        let incoming = tile("FFFF", AxisSet::BOTH);

        assert_eq!(r.is_special_placement_allowed(&board, player, &incoming, ORIGIN), Ok(true));

        for _ in 0..3 {
            r.decrease_bridges(player).unwrap();
        }
        assert_eq!(r.is_special_placement_allowed(&board, player, &incoming, ORIGIN), Ok(false));
    }

    #[test]
    fn test_special_placement_unknown_player() {
        let r = rules(2);
        let board = Board::new();
        let stranger = PlayerId::new(9);
        assert_eq!(
            r.is_special_placement_allowed(&board, stranger, &tile("FFFF", AxisSet::BOTH), ORIGIN),
            Err(BridgeError::NotInitialized(stranger))
        );
    }

    #[test]
    fn test_copy_is_independent() {
        let mut original = rules(3);
        original.decrease_castles(PlayerId::new(2)).unwrap();
        let mut fork = original.copy();
        assert_eq!(fork, original);

        fork.decrease_castles(PlayerId::new(2)).unwrap();
        fork.turn_clean_up();

        assert_eq!(original.player_castles(PlayerId::new(2)), Ok(2));
        assert_eq!(fork.player_castles(PlayerId::new(2)), Ok(1));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut r = rules(3);
        r.decrease_bridges(PlayerId::new(1)).unwrap();
        r.decrease_castles(PlayerId::new(2)).unwrap();
        let mut board = Board::new().with_tile(ORIGIN, tile("FFFF", AxisSet::BOTH));
        let mut events: Vec<BridgeEvent> = Vec::new();
        r.deploy_bridge(&mut board, &mut events, ORIGIN, Axis::Vertical).unwrap();

        let snapshot = r.save_snapshot();
        let mut restored = rules(3);
        let roster: Vec<_> = PlayerId::all(3).collect();
        restored.load_snapshot(&snapshot, &roster).unwrap();

        assert_eq!(restored, r);
    }

    #[test]
    fn test_snapshot_partial_keeps_others() {
        let mut r = rules(2);
        let snapshot = BridgeSnapshot {
            bridge_used: true,
            players: vec![PlayerSnapshot {
                index: 1,
                castles: 0,
                bridges: 1,
            }],
        };
        let roster: Vec<_> = PlayerId::all(2).collect();
        r.load_snapshot(&snapshot, &roster).unwrap();

        assert!(r.bridge_used());
        assert_eq!(r.player_bridges(PlayerId::new(1)), Ok(1));
        assert_eq!(r.player_castles(PlayerId::new(1)), Ok(0));
        assert_eq!(r.player_bridges(PlayerId::new(0)), Ok(3));
    }

    #[test]
    fn test_snapshot_unknown_index_is_atomic() {
        let mut r = rules(2);
        let snapshot = BridgeSnapshot {
            bridge_used: true,
            players: vec![
                PlayerSnapshot { index: 0, castles: 0, bridges: 0 },
                PlayerSnapshot { index: 7, castles: 0, bridges: 0 },
            ],
        };
        let roster: Vec<_> = PlayerId::all(2).collect();

        assert_eq!(
            r.load_snapshot(&snapshot, &roster),
            Err(BridgeError::UnknownPlayerIndex(7))
        );
        assert!(!r.bridge_used());
        assert_eq!(r.player_bridges(PlayerId::new(0)), Ok(3));
    }
}
