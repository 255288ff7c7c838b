//! Bridge placement rules.
//!
//! ## Key Components
//!
//! - [`PlacementValidator`]: legality of building a bridge, and of placing
//!   a tile over a mismatch with a bridge's help
//! - [`BridgeAction`]: the set of sites offered to the active player
//! - [`ResourceTracker`]: per-player bridges and castles
//! - [`BridgeRules`]: the per-game component tying these together
//! - [`BridgeSnapshot`]: saved-game record
//!
//! ## Legality in Brief
//!
//! A bridge on a tile spans two opposite edges. Wherever a placed neighbor
//! touches one of those edges, the neighbor must show the landing edge
//! (road, `R`). A tile whose edges would not match its neighbors may still
//! be placed if a bridge fixes the mismatch, either on the new tile or on
//! exactly one neighbor. At most one bridge per turn.

pub mod actions;
pub mod events;
pub mod resources;
pub mod rules;
pub mod snapshot;
pub mod validator;

pub use actions::{enumerate_bridge_actions, find_mandatory_bridge, BridgeAction};
pub use events::{BridgeEvent, EventSink};
pub use resources::{ResourceTracker, Supply};
pub use rules::BridgeRules;
pub use snapshot::{BridgeSnapshot, PlayerSnapshot};
pub use validator::PlacementValidator;
