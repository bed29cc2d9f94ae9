#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Incremental map knowledge and attractiveness planning for the Scout explorer.
//!
//! The [`AttractivenessMap`] absorbs the agent's vision each turn, growing its
//! [`BoundedGrid`] in any direction without losing what it already knows. When
//! asked for a plan it seeds every valuable or unexplored tile with a weight
//! from [`weights`], relaxes those sources outward into a [`ValueField`], and
//! descends the field from the agent's position to pick the next tile to stand
//! on.

mod field;
mod grid;
mod teleport;
mod tile;
pub mod weights;

use scout_core::{Capabilities, Coord, KeyColor, Material, Observation};

pub use field::ValueField;
pub use grid::{BoundedGrid, Bounds};
pub use tile::TileKnowledge;

use teleport::TeleportLedger;

/// Known world plus the planner that ranks where to go next.
#[derive(Clone, Debug, Default)]
pub struct AttractivenessMap {
    grid: BoundedGrid,
    teleports: TeleportLedger,
}

impl AttractivenessMap {
    /// Creates a map that knows nothing yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rectangle of explored space.
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        self.grid.bounds()
    }

    /// Knowledge about the provided coordinate.
    #[must_use]
    pub fn tile_at(&self, coord: Coord) -> TileKnowledge {
        self.grid.tile_at(coord)
    }

    /// Folds the agent's current vision into the map, growing it as required.
    pub fn absorb(&mut self, observations: &[Observation]) {
        self.grid.absorb(observations);
    }

    /// Builds the value field for `origin` and the greedy descent path from it.
    ///
    /// Returns `None` when nothing is known yet or when no tile qualifies as a
    /// source.
    #[must_use]
    pub fn plan(&self, origin: Coord, capabilities: &Capabilities) -> Option<Plan> {
        let field = ValueField::relax(&self.grid, origin, capabilities, &self.teleports)?;
        let path = field.descend(origin);

        tracing::trace!(
            origin = ?origin,
            next = ?path.first(),
            path_len = path.len(),
            "plan computed"
        );

        Some(Plan {
            origin,
            field,
            path,
        })
    }

    /// Best tile to move toward next, if any target or frontier is reachable.
    #[must_use]
    pub fn plan_next_tile(&self, origin: Coord, capabilities: &Capabilities) -> Option<Coord> {
        self.plan(origin, capabilities)
            .and_then(|plan| plan.next_tile())
    }

    /// Reports whether a laser charge would clear the boulder on `target`.
    #[must_use]
    pub fn can_shoot_boulder(&self, target: Coord, capabilities: &Capabilities) -> bool {
        capabilities.has_laser_charge() && self.grid.tile_at(target).has_boulder()
    }

    /// Colour of the held key that unlocks the gate on `target`, if any.
    #[must_use]
    pub fn key_for_gate(&self, target: Coord, capabilities: &Capabilities) -> Option<KeyColor> {
        match self.grid.tile_at(target).material() {
            Material::Gate(color) if capabilities.holds_key(color) => Some(color),
            _ => None,
        }
    }

    /// Reports whether stepping onto `target` would trigger a teleporter.
    #[must_use]
    pub fn can_use_teleporter(&self, target: Coord) -> bool {
        self.grid.tile_at(target).material() == Material::Teleporter
    }

    /// Records that the agent is stepping from `from` onto the teleporter `endpoint`.
    pub fn use_teleporter(&mut self, from: Coord, endpoint: Coord) {
        self.teleports.depart(from, endpoint);
    }

    /// Resolves a pending teleport against the position the runtime reports.
    ///
    /// Landing somewhere other than the departure tile or the pad itself links
    /// the pad with the landing tile, so later plans can route through it.
    pub fn settle_teleport(&mut self, position: Coord) {
        self.teleports.settle(position);
    }

    /// Reports whether a teleport was triggered and not yet settled.
    #[must_use]
    pub fn has_pending_teleport(&self) -> bool {
        self.teleports.is_pending()
    }

    /// Tile a used teleporter pad is known to lead to.
    #[must_use]
    pub fn teleport_partner(&self, coord: Coord) -> Option<Coord> {
        self.teleports.partner(coord)
    }
}

/// Result of one planning call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    origin: Coord,
    field: ValueField,
    path: Vec<Coord>,
}

impl Plan {
    /// Coordinate the plan was computed from.
    #[must_use]
    pub const fn origin(&self) -> Coord {
        self.origin
    }

    /// Immediate next tile of the descent, if the descent moved at all.
    #[must_use]
    pub fn next_tile(&self) -> Option<Coord> {
        self.path.first().copied()
    }

    /// Full greedy descent from the origin.
    #[must_use]
    pub fn path(&self) -> &[Coord] {
        &self.path
    }

    /// Value field the descent walked.
    #[must_use]
    pub const fn field(&self) -> &ValueField {
        &self.field
    }

    /// Score of the coordinate in the plan's field.
    #[must_use]
    pub fn value_at(&self, coord: Coord) -> u32 {
        self.field.value_at(coord)
    }
}
