//! Property tests for the bridge rules.
//!
//! Random boards are built around the origin: up to four neighbors with
//! random edges and bridge slots.

use proptest::prelude::*;

use tile_bridges::board::{Axis, AxisSet, Board, Direction, Edge, Position, Tile, TileBoard};
use tile_bridges::bridges::{BridgeEvent, BridgeRules, BridgeSnapshot};
use tile_bridges::core::{BridgeError, PlayerId};

const ORIGIN: Position = Position::new(0, 0);

fn edge() -> impl Strategy<Value = Edge> {
    prop_oneof![
        Just(Edge::Road),
        Just(Edge::City),
        Just(Edge::Field),
        Just(Edge::River),
    ]
}

fn axes() -> impl Strategy<Value = AxisSet> {
    prop_oneof![
        Just(AxisSet::EMPTY),
        Just(AxisSet::only(Axis::Vertical)),
        Just(AxisSet::only(Axis::Horizontal)),
        Just(AxisSet::BOTH),
    ]
}

fn axis() -> impl Strategy<Value = Axis> {
    prop_oneof![Just(Axis::Vertical), Just(Axis::Horizontal)]
}

fn tile() -> impl Strategy<Value = Tile> {
    (prop::array::uniform4(edge()), axes())
        .prop_map(|(edges, axes)| Tile::new("P", edges).with_bridge_axes(axes))
}

/// Origin left empty; each side optionally occupied.
fn neighborhood() -> impl Strategy<Value = Board> {
    prop::array::uniform4(prop::option::of(tile())).prop_map(|slots| {
        let mut board = Board::new();
        for (dir, slot) in Direction::ALL.into_iter().zip(slots) {
            if let Some(t) = slot {
                board.place(ORIGIN.neighbor(dir), t);
            }
        }
        board
    })
}

fn rules(player_count: usize) -> BridgeRules {
    let mut rules = BridgeRules::default();
    rules.init_players(player_count);
    rules
}

proptest! {
    #[test]
    fn prop_initial_supply(player_count in 1usize..=12) {
        let r = rules(player_count);
        let expected = if player_count < 5 { 3 } else { 2 };
        for p in PlayerId::all(player_count) {
            prop_assert_eq!(r.player_bridges(p), Ok(expected));
            prop_assert_eq!(r.player_castles(p), Ok(expected));
        }
    }

    #[test]
    fn prop_decrement_is_floor_bounded(player_count in 1usize..=8, k in 0u8..=3) {
        let mut r = rules(player_count);
        let p = PlayerId::new(0);
        let n = r.player_bridges(p).unwrap();
        let k = k.min(n);

        for _ in 0..k {
            r.decrease_bridges(p).unwrap();
        }
        prop_assert_eq!(r.player_bridges(p), Ok(n - k));

        for _ in k..n {
            r.decrease_bridges(p).unwrap();
        }
        let exhausted = matches!(
            r.decrease_bridges(p),
            Err(BridgeError::ResourceExhausted { .. })
        );
        prop_assert!(exhausted);
        prop_assert_eq!(r.player_bridges(p), Ok(0));
    }

    #[test]
    fn prop_forbidden_axis_never_buildable(
        board in neighborhood(),
        edges in prop::array::uniform4(edge()),
        axis in axis(),
    ) {
        let r = rules(2);
        let candidate = Tile::new("C", edges).with_bridge_axes(AxisSet::only(axis.orthogonal()));
        let v = r.validator(&board);
        prop_assert!(!v.can_build_bridge(&candidate, ORIGIN, axis));
        prop_assert!(!v.can_place_with_bridge(&candidate, ORIGIN, axis));
    }

    #[test]
    fn prop_no_neighbors_on_axis_is_buildable(board in neighborhood(), axis in axis()) {
        let mut board = board;
        for dir in axis.directions() {
            board.remove(ORIGIN.neighbor(dir));
        }
        let r = rules(2);
        let candidate = Tile::new("C", [Edge::Field; 4]).with_bridge_axes(AxisSet::BOTH);
        prop_assert!(r.validator(&board).can_build_bridge(&candidate, ORIGIN, axis));
    }

    #[test]
    fn prop_matching_tile_needs_no_adjacent_bridge(board in neighborhood()) {
        // Give the candidate exactly the edges its neighbors show.
        let mut edges = [Edge::Field; 4];
        for (dir, adjacent) in board.adjacent_tiles(ORIGIN) {
            edges[dir.index()] = adjacent.edge(dir.rev());
        }
        let candidate = Tile::new("C", edges);
        let r = rules(2);
        let v = r.validator(&board);
        prop_assert!(v.matches_all_neighbors(&candidate, ORIGIN));
        prop_assert!(!v.can_place_with_adjacent_bridge(&candidate, ORIGIN));
    }

    #[test]
    fn prop_deploy_then_query(t in tile(), axis in axis()) {
        prop_assume!(t.is_bridge_allowed(axis));
        let mut board = Board::new().with_tile(ORIGIN, t);
        let mut r = rules(2);
        let mut events: Vec<BridgeEvent> = Vec::new();

        r.deploy_bridge(&mut board, &mut events, ORIGIN, axis).unwrap();

        let placed = board.tile(ORIGIN).unwrap();
        prop_assert!(placed.has_bridge(axis));
        prop_assert!(!placed.has_bridge(axis.orthogonal()));
        prop_assert!(r.bridge_used());
    }

    #[test]
    fn prop_snapshot_round_trip(
        player_count in 1usize..=6,
        spent in prop::collection::vec((0u8..6, any::<bool>()), 0..10),
        used in any::<bool>(),
    ) {
        let mut r = rules(player_count);
        for (index, castle) in spent {
            let p = PlayerId::new(index % player_count as u8);
            // Exhaustion is fine here; only successful decrements count.
            let _ = if castle { r.decrease_castles(p) } else { r.decrease_bridges(p) };
        }
        if used {
            let mut board = Board::new().with_tile(
                ORIGIN,
                Tile::new("C", [Edge::Road; 4]).with_bridge_axes(AxisSet::BOTH),
            );
            let mut events: Vec<BridgeEvent> = Vec::new();
            r.deploy_bridge(&mut board, &mut events, ORIGIN, Axis::Vertical).unwrap();
        }

        let roster: Vec<_> = PlayerId::all(player_count).collect();

        let json = r.save_snapshot().to_json().unwrap();
        let mut from_json = rules(player_count);
        from_json.load_snapshot(&BridgeSnapshot::from_json(&json).unwrap(), &roster).unwrap();
        prop_assert_eq!(&from_json, &r);

        let bytes = r.save_snapshot().to_bytes().unwrap();
        let mut from_bytes = rules(player_count);
        from_bytes.load_snapshot(&BridgeSnapshot::from_bytes(&bytes).unwrap(), &roster).unwrap();
        prop_assert_eq!(&from_bytes, &r);
    }
}
