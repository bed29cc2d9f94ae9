//! Bookkeeping for teleporter pads the agent has stepped on.

use std::collections::{BTreeMap, BTreeSet};

use scout_core::Coord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Departure {
    from: Coord,
    endpoint: Coord,
}

/// Remembers which pads were used and where they lead.
#[derive(Clone, Debug, Default)]
pub(crate) struct TeleportLedger {
    pending: Option<Departure>,
    used: BTreeSet<Coord>,
    links: BTreeMap<Coord, Coord>,
}

impl TeleportLedger {
    pub(crate) fn depart(&mut self, from: Coord, endpoint: Coord) {
        self.pending = Some(Departure { from, endpoint });
    }

    /// Resolves the pending departure against the position reported this turn.
    pub(crate) fn settle(&mut self, position: Coord) {
        let Some(departure) = self.pending.take() else {
            return;
        };

        if position == departure.from {
            tracing::trace!(endpoint = ?departure.endpoint, "teleport step was rejected");
            return;
        }

        let _ = self.used.insert(departure.endpoint);
        if position == departure.endpoint {
            tracing::debug!(endpoint = ?departure.endpoint, "teleporter did not fire");
            return;
        }

        let _ = self.used.insert(position);
        let _ = self.links.insert(departure.endpoint, position);
        let _ = self.links.insert(position, departure.endpoint);
        tracing::debug!(entry = ?departure.endpoint, exit = ?position, "teleporter linked");
    }

    pub(crate) fn is_used(&self, coord: Coord) -> bool {
        self.used.contains(&coord)
    }

    pub(crate) fn partner(&self, coord: Coord) -> Option<Coord> {
        self.links.get(&coord).copied()
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
