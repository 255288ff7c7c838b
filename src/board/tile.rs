//! Tiles: edge labels, bridge slots, and triggers.
//!
//! A placed tile exposes one `Edge` per compass direction and two bridge
//! slots, one per `Axis`. Each slot has a permission fixed by the tile
//! definition and a built flag that only ever goes from unbuilt to built.

use serde::{Deserialize, Serialize};

use super::location::{Axis, Direction};

/// Terrain label on one side of a tile.
///
/// Labels are compared for equality only. `Road` (code `R`) is the label a
/// bridge must land on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    /// `R`
    Road,
    /// `C`
    City,
    /// `F`
    Field,
    /// `W`
    River,
}

impl Edge {
    /// Parse a single-character edge code.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'R' => Some(Edge::Road),
            'C' => Some(Edge::City),
            'F' => Some(Edge::Field),
            'W' => Some(Edge::River),
            _ => None,
        }
    }

    /// The single-character code of this label.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Edge::Road => 'R',
            Edge::City => 'C',
            Edge::Field => 'F',
            Edge::River => 'W',
        }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A set of bridge axes (at most two members).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisSet(u8);

impl AxisSet {
    /// The empty set.
    pub const EMPTY: AxisSet = AxisSet(0);
    /// Both axes.
    pub const BOTH: AxisSet = AxisSet(0b11);

    /// A set holding a single axis.
    #[must_use]
    pub const fn only(axis: Axis) -> Self {
        Self(1 << axis.index())
    }

    #[must_use]
    pub const fn contains(self, axis: Axis) -> bool {
        self.0 & (1 << axis.index()) != 0
    }

    /// Add an axis; returns `true` if it was not already present.
    pub fn insert(&mut self, axis: Axis) -> bool {
        let had = self.contains(axis);
        self.0 |= 1 << axis.index();
        !had
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in `Axis::ALL` order.
    pub fn iter(self) -> impl Iterator<Item = Axis> {
        Axis::ALL.into_iter().filter(move |a| self.contains(*a))
    }

    /// Swap vertical and horizontal membership.
    #[must_use]
    pub const fn transposed(self) -> Self {
        Self(((self.0 & 0b01) << 1) | ((self.0 & 0b10) >> 1))
    }
}

impl FromIterator<Axis> for AxisSet {
    fn from_iter<I: IntoIterator<Item = Axis>>(iter: I) -> Self {
        let mut set = AxisSet::EMPTY;
        for axis in iter {
            set.insert(axis);
        }
        set
    }
}

/// Special behaviour a tile triggers when it is drawn or placed.
///
/// Resolved from the tile definition when the catalog is loaded; the
/// bridge rules only read it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileTrigger {
    /// Drawing this tile opens a bazaar auction.
    Bazaar,
}

/// A tile with its edges already oriented for the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Definition identifier (e.g. `"L"`).
    pub id: String,

    /// Edge labels indexed by `Direction::index`.
    edges: [Edge; 4],

    /// Axes the tile's feature layout can carry a bridge on.
    bridge_axes: AxisSet,

    /// Axes that already hold a bridge. Append-only.
    bridges_built: AxisSet,

    trigger: Option<TileTrigger>,
}

impl Tile {
    /// Create a tile from its edges (N, E, S, W) with no bridge slots.
    pub fn new(id: impl Into<String>, edges: [Edge; 4]) -> Self {
        Self {
            id: id.into(),
            edges,
            bridge_axes: AxisSet::EMPTY,
            bridges_built: AxisSet::EMPTY,
            trigger: None,
        }
    }

    /// Parse edges from a four-character code string such as `"CRFR"`.
    ///
    /// ```
    /// use tile_bridges::board::{Direction, Edge, Tile};
    ///
    /// let tile = Tile::from_codes("D", "CRFR").unwrap();
    /// assert_eq!(tile.edge(Direction::North), Edge::City);
    /// assert_eq!(tile.edge(Direction::West), Edge::Road);
    /// ```
    #[must_use]
    pub fn from_codes(id: impl Into<String>, codes: &str) -> Option<Self> {
        let edges = parse_edges(codes)?;
        Some(Self::new(id, edges))
    }

    /// Permit bridges on the given axes (builder pattern).
    #[must_use]
    pub fn with_bridge_axes(mut self, axes: AxisSet) -> Self {
        self.bridge_axes = axes;
        self
    }

    /// Set the trigger (builder pattern).
    #[must_use]
    pub fn with_trigger(mut self, trigger: TileTrigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    /// Edge label facing `direction`.
    #[must_use]
    pub fn edge(&self, direction: Direction) -> Edge {
        self.edges[direction.index()]
    }

    #[must_use]
    pub fn trigger(&self) -> Option<TileTrigger> {
        self.trigger
    }

    /// Axes the definition permits, built or not.
    #[must_use]
    pub fn bridge_axes(&self) -> AxisSet {
        self.bridge_axes
    }

    /// Can a bridge still be put on this tile along `axis`?
    ///
    /// False if the feature layout forbids the axis or a bridge already
    /// occupies that slot.
    #[must_use]
    pub fn is_bridge_allowed(&self, axis: Axis) -> bool {
        self.bridge_axes.contains(axis) && !self.bridges_built.contains(axis)
    }

    /// Is there a bridge on `axis`?
    #[must_use]
    pub fn has_bridge(&self, axis: Axis) -> bool {
        self.bridges_built.contains(axis)
    }

    /// Record a bridge on `axis`.
    ///
    /// Returns `false` if the slot was already built. Permission is the
    /// caller's concern.
    pub fn place_bridge(&mut self, axis: Axis) -> bool {
        self.bridges_built.insert(axis)
    }

    /// The tile turned clockwise by `quarter_turns` steps of 90°.
    ///
    /// Odd turns swap the vertical and horizontal bridge slots.
    #[must_use]
    pub fn rotated(&self, quarter_turns: u8) -> Self {
        let turns = quarter_turns % 4;
        let mut edges = self.edges;
        for d in Direction::ALL {
            edges[d.rotate_cw(turns).index()] = self.edge(d);
        }
        let (bridge_axes, bridges_built) = if turns % 2 == 1 {
            (self.bridge_axes.transposed(), self.bridges_built.transposed())
        } else {
            (self.bridge_axes, self.bridges_built)
        };
        Self {
            id: self.id.clone(),
            edges,
            bridge_axes,
            bridges_built,
            trigger: self.trigger,
        }
    }

    /// All four orientations with their quarter-turn count, unrotated first.
    pub fn rotations(&self) -> impl Iterator<Item = (u8, Tile)> + '_ {
        (0..4).map(move |turns| (turns, self.rotated(turns)))
    }
}

pub(crate) fn parse_edges(codes: &str) -> Option<[Edge; 4]> {
    let mut chars = codes.chars();
    let mut edges = [Edge::Field; 4];
    for slot in &mut edges {
        *slot = Edge::from_code(chars.next()?)?;
    }
    if chars.next().is_some() {
        return None;
    }
    Some(edges)
}
