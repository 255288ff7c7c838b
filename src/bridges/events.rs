//! Notifications fired by the bridge rules.
//!
//! The host decides how events are delivered. `EventSink` is the seam;
//! `Vec<BridgeEvent>` implements it for hosts that just collect and drain.

use serde::{Deserialize, Serialize};

use crate::board::{Axis, Position};
use crate::core::PlayerId;

/// Something the bridge rules changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BridgeEvent {
    /// A bridge now spans the tile at `position` along `axis`.
    BridgeDeployed { position: Position, axis: Axis },

    /// A player's bridge supply went down by one.
    BridgeSpent { player: PlayerId, remaining: u8 },
}

impl BridgeEvent {
    /// The position involved, if any.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match self {
            BridgeEvent::BridgeDeployed { position, .. } => Some(*position),
            BridgeEvent::BridgeSpent { .. } => None,
        }
    }
}

/// Receives bridge events as they happen.
pub trait EventSink {
    fn notify(&mut self, event: BridgeEvent);
}

impl EventSink for Vec<BridgeEvent> {
    fn notify(&mut self, event: BridgeEvent) {
        self.push(event);
    }
}
