//! Attractiveness field built by multi-source relaxation over the known map.

use std::collections::VecDeque;

use scout_core::{Capabilities, Coord, Material};

use crate::{
    grid::{BoundedGrid, Bounds},
    teleport::TeleportLedger,
    tile::TileKnowledge,
    weights,
};

const UNASSIGNED: u32 = 0;

/// Dense weight-plus-distance scores covering the explored rectangle.
///
/// The field is rebuilt from scratch for every planning call. A value of `0`
/// marks tiles no source reached, [`weights::POISON`] marks the planning
/// origin. Coordinates outside the rectangle read as [`weights::FRONTIER`]
/// because nothing is known about them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueField {
    bounds: Bounds,
    values: Vec<u32>,
}

impl ValueField {
    /// Relaxes every source of the grid outward, poisoning `origin`.
    ///
    /// Returns `None` when the grid is empty or when no tile, the origin
    /// included, qualifies as a source.
    pub(crate) fn relax(
        grid: &BoundedGrid,
        origin: Coord,
        capabilities: &Capabilities,
        teleports: &TeleportLedger,
    ) -> Option<Self> {
        let bounds = grid.bounds();
        if bounds.is_empty() {
            return None;
        }

        let mut field = Self {
            bounds,
            values: vec![UNASSIGNED; bounds.area()],
        };
        if let Some(index) = bounds.index(origin) {
            field.values[index] = weights::POISON;
        }

        let mut queue = VecDeque::new();
        let mut origin_is_source = false;
        for tile in grid.tiles() {
            let Some(weight) = source_weight(grid, tile, capabilities, teleports) else {
                continue;
            };

            if tile.coord() == origin {
                origin_is_source = true;
                continue;
            }

            if let Some(index) = bounds.index(tile.coord()) {
                field.values[index] = weight;
                queue.push_back(tile.coord());
            }
        }

        if queue.is_empty() && !origin_is_source {
            return None;
        }
        let source_count = queue.len();

        while let Some(coord) = queue.pop_front() {
            let Some(current_index) = bounds.index(coord) else {
                continue;
            };
            let current = field.values[current_index];
            if current == UNASSIGNED {
                continue;
            }

            let next = current.saturating_add(1);
            for neighbor in relaxation_neighbors(coord, teleports) {
                let Some(neighbor_index) = bounds.index(neighbor) else {
                    continue;
                };

                let existing = field.values[neighbor_index];
                if existing == weights::POISON {
                    continue;
                }
                if existing != UNASSIGNED && existing <= next {
                    continue;
                }
                if !is_enterable(&grid.tile_at(neighbor), capabilities) {
                    continue;
                }

                field.values[neighbor_index] = next;
                queue.push_back(neighbor);
            }
        }

        tracing::trace!(
            sources = source_count,
            width = bounds.width(),
            height = bounds.height(),
            "value field relaxed"
        );

        Some(field)
    }

    /// Rectangle covered by the field.
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Score stored for the coordinate.
    #[must_use]
    pub fn value_at(&self, coord: Coord) -> u32 {
        self.bounds
            .index(coord)
            .and_then(|index| self.values.get(index).copied())
            .unwrap_or(weights::FRONTIER)
    }

    /// Walks downhill from `origin` until no neighbour improves on the current score.
    ///
    /// Each step moves to the orthogonal neighbour with the smallest positive
    /// score strictly below the current one. Ties resolve north, east, south,
    /// west. The origin itself counts as poisoned.
    pub(crate) fn descend(&self, origin: Coord) -> Vec<Coord> {
        let mut path = Vec::new();
        let mut current = origin;
        let mut current_value = weights::POISON;

        loop {
            let best = current
                .neighbors()
                .into_iter()
                .map(|neighbor| (neighbor, self.value_at(neighbor)))
                .filter(|&(_, value)| value != UNASSIGNED && value < current_value)
                .min_by_key(|&(_, value)| value);

            let Some((next, value)) = best else {
                break;
            };
            path.push(next);
            current = next;
            current_value = value;
        }

        path
    }
}

/// Weight the tile contributes as a relaxation source, if any.
fn source_weight(
    grid: &BoundedGrid,
    tile: &TileKnowledge,
    capabilities: &Capabilities,
    teleports: &TeleportLedger,
) -> Option<u32> {
    if let Some(item) = tile.item() {
        return Some(weights::item(item));
    }

    if tile.has_boulder() && capabilities.has_laser_charge() {
        return Some(weights::BOULDER);
    }

    // Edge tiles only count as frontier when the agent could stand on them.
    if tile.is_undefined()
        || (grid.is_on_boundary(tile.coord()) && is_enterable(tile, capabilities))
    {
        return Some(weights::FRONTIER);
    }

    if tile.material() == Material::Teleporter && !teleports.is_used(tile.coord()) {
        return Some(weights::TELEPORTER);
    }

    None
}

/// Reports whether relaxation may propagate onto the tile.
pub(crate) fn is_enterable(tile: &TileKnowledge, capabilities: &Capabilities) -> bool {
    !tile.is_undefined()
        && tile.material().is_passable_with(capabilities)
        && tile.occupant().is_none()
}

fn relaxation_neighbors(coord: Coord, teleports: &TeleportLedger) -> impl Iterator<Item = Coord> {
    let [north, east, south, west] = coord.neighbors();
    [
        Some(north),
        Some(east),
        Some(south),
        Some(west),
        teleports.partner(coord),
    ]
    .into_iter()
    .flatten()
}
