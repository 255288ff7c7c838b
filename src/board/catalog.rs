//! Declarative tile definitions.
//!
//! Tile sets are described as JSON. Everything the bridge rules need is
//! resolved here, once, into typed values: edge codes become `Edge`s,
//! bridge slots become an `AxisSet`, and the `bazaar` marker becomes a
//! `TileTrigger`.
//!
//! ## Format
//!
//! ```json
//! [
//!   { "id": "U", "edges": "FRFR", "bridges": ["vertical"] },
//!   { "id": "BZ", "edges": "CFFF", "bazaar": true, "count": 2 }
//! ]
//! ```
//!
//! `bridges`, `bazaar` and `count` are optional (defaults: none, false, 1).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::location::Axis;
use super::tile::{parse_edges, AxisSet, Edge, Tile, TileTrigger};

/// Errors raised while loading a tile catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("tile '{id}' has invalid edges '{edges}' (expected four of R, C, F, W)")]
    InvalidEdges { id: String, edges: String },

    #[error("tile '{0}' defined more than once")]
    DuplicateId(String),
}

/// On-disk shape of a tile definition.
#[derive(Debug, Deserialize)]
struct RawTileDefinition {
    id: String,
    edges: String,
    #[serde(default)]
    bridges: Vec<Axis>,
    #[serde(default)]
    bazaar: bool,
    #[serde(default = "default_count")]
    count: u32,
}

fn default_count() -> u32 {
    1
}

/// A resolved tile definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileDefinition {
    pub id: String,
    /// Unrotated edges, N, E, S, W.
    pub edges: [Edge; 4],
    /// Axes the feature layout can carry a bridge on.
    pub bridge_axes: AxisSet,
    pub trigger: Option<TileTrigger>,
    /// Copies of this tile in the set.
    pub count: u32,
}

impl TileDefinition {
    /// A fresh, unrotated tile of this kind.
    #[must_use]
    pub fn to_tile(&self) -> Tile {
        let tile = Tile::new(self.id.clone(), self.edges).with_bridge_axes(self.bridge_axes);
        match self.trigger {
            Some(trigger) => tile.with_trigger(trigger),
            None => tile,
        }
    }
}

impl TryFrom<RawTileDefinition> for TileDefinition {
    type Error = CatalogError;

    fn try_from(raw: RawTileDefinition) -> Result<Self, Self::Error> {
        let edges = parse_edges(&raw.edges).ok_or_else(|| CatalogError::InvalidEdges {
            id: raw.id.clone(),
            edges: raw.edges.clone(),
        })?;

        Ok(Self {
            id: raw.id,
            edges,
            bridge_axes: raw.bridges.into_iter().collect(),
            trigger: raw.bazaar.then_some(TileTrigger::Bazaar),
            count: raw.count,
        })
    }
}

/// Tile definitions in load order, with lookup by id.
///
/// ## Example
///
/// ```
/// use tile_bridges::board::{Axis, TileCatalog, TileTrigger};
///
/// let catalog = TileCatalog::from_json(r#"[
///     { "id": "U", "edges": "FRFR", "bridges": ["vertical"] },
///     { "id": "BZ", "edges": "CFFF", "bazaar": true }
/// ]"#).unwrap();
///
/// let u = catalog.get("U").unwrap().to_tile();
/// assert!(u.is_bridge_allowed(Axis::Vertical));
/// assert_eq!(catalog.get("BZ").unwrap().trigger, Some(TileTrigger::Bazaar));
/// ```
#[derive(Clone, Debug, Default)]
pub struct TileCatalog {
    definitions: Vec<TileDefinition>,
    by_id: FxHashMap<String, usize>,
}

impl TileCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON array of tile definitions.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawTileDefinition> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for entry in raw {
            catalog.register(TileDefinition::try_from(entry)?)?;
        }
        tracing::debug!(tiles = catalog.len(), "loaded tile catalog");
        Ok(catalog)
    }

    /// Add a definition. Ids must be unique.
    pub fn register(&mut self, definition: TileDefinition) -> Result<(), CatalogError> {
        if self.by_id.contains_key(&definition.id) {
            return Err(CatalogError::DuplicateId(definition.id));
        }
        self.by_id.insert(definition.id.clone(), self.definitions.len());
        self.definitions.push(definition);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TileDefinition> {
        self.by_id.get(id).map(|&i| &self.definitions[i])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// One tile per copy, in load order.
    #[must_use]
    pub fn tile_bag(&self) -> Vec<Tile> {
        self.definitions
            .iter()
            .flat_map(|d| (0..d.count).map(move |_| d.to_tile()))
            .collect()
    }
}
