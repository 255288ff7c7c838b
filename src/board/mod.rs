//! Board vocabulary: positions, directions, bridge axes, tiles.
//!
//! The bridge rules consume a board through the `TileBoard` trait. `Board`
//! and `TileCatalog` are ready-made implementations for hosts that don't
//! bring their own.

pub mod catalog;
pub mod grid;
pub mod location;
pub mod tile;

pub use catalog::{CatalogError, TileCatalog, TileDefinition};
pub use grid::{Board, Neighbors, TileBoard};
pub use location::{Axis, Direction, Position};
pub use tile::{AxisSet, Edge, Tile, TileTrigger};
