//! Board coordinates, compass directions, and bridge axes.
//!
//! ## Coordinates
//!
//! `Position` is a plain `(x, y)` grid cell. North is `y - 1`, south is
//! `y + 1`, east is `x + 1`, west is `x - 1`.
//!
//! ## Bridge Axes
//!
//! A bridge spans a tile along one of two axes:
//! - `Axis::Vertical` connects the north and south edges
//! - `Axis::Horizontal` connects the east and west edges
//!
//! Every cardinal direction lies on exactly one axis, which is the axis a
//! bridge must use to reconcile a mismatch on that side.

use serde::{Deserialize, Serialize};

/// A grid cell on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent cell in `direction`.
    ///
    /// ```
    /// use tile_bridges::board::{Direction, Position};
    ///
    /// let origin = Position::new(0, 0);
    /// assert_eq!(origin.neighbor(Direction::North), Position::new(0, -1));
    /// assert_eq!(origin.neighbor(Direction::East), Position::new(1, 0));
    /// ```
    #[must_use]
    pub const fn neighbor(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},{}]", self.x, self.y)
    }
}

/// One of the four compass edges of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions, in the fixed order used for every neighbor scan.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// The opposite direction.
    ///
    /// The edge of a neighbor that faces a tile through `d` is the
    /// neighbor's `d.rev()` edge.
    #[must_use]
    pub const fn rev(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// The bridge axis this direction lies on.
    ///
    /// North/South map to `Vertical`, East/West to `Horizontal`.
    #[must_use]
    pub const fn bridge_axis(self) -> Axis {
        match self {
            Direction::North | Direction::South => Axis::Vertical,
            Direction::East | Direction::West => Axis::Horizontal,
        }
    }

    /// Does this direction lie along `axis`?
    #[must_use]
    pub fn intersects(self, axis: Axis) -> bool {
        self.bridge_axis() == axis
    }

    /// Edge index: N=0, E=1, S=2, W=3 (clockwise).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// Rotate clockwise by `quarter_turns` steps of 90°.
    #[must_use]
    pub const fn rotate_cw(self, quarter_turns: u8) -> Self {
        Direction::ALL[(self.index() + quarter_turns as usize) % 4]
    }

    const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = match self {
            Direction::North => "N",
            Direction::East => "E",
            Direction::South => "S",
            Direction::West => "W",
        };
        f.write_str(c)
    }
}

/// Orientation of a bridge across a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Spans the north and south edges.
    Vertical,
    /// Spans the east and west edges.
    Horizontal,
}

impl Axis {
    /// Both axes, vertical first.
    pub const ALL: [Axis; 2] = [Axis::Vertical, Axis::Horizontal];

    /// The two directions the axis connects.
    #[must_use]
    pub const fn directions(self) -> [Direction; 2] {
        match self {
            Axis::Vertical => [Direction::North, Direction::South],
            Axis::Horizontal => [Direction::East, Direction::West],
        }
    }

    /// The perpendicular axis.
    #[must_use]
    pub const fn orthogonal(self) -> Self {
        match self {
            Axis::Vertical => Axis::Horizontal,
            Axis::Horizontal => Axis::Vertical,
        }
    }

    /// Slot index on a tile: vertical=0, horizontal=1.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Axis::Vertical => 0,
            Axis::Horizontal => 1,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Vertical => f.write_str("NS"),
            Axis::Horizontal => f.write_str("WE"),
        }
    }
}
