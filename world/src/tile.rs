//! Knowledge record describing a single grid tile.

use scout_core::{Coord, Item, Material, Observation, Occupant};

/// Everything the map knows about one tile.
///
/// The position never changes once the record exists. The remaining fields
/// mirror the most recent observation of that coordinate. A tile whose
/// material is [`Material::Undefined`] never carries an item or occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileKnowledge {
    coord: Coord,
    material: Material,
    occupant: Option<Occupant>,
    item: Option<Item>,
}

impl TileKnowledge {
    /// Creates a record for a coordinate that was never observed.
    #[must_use]
    pub const fn unknown(coord: Coord) -> Self {
        Self {
            coord,
            material: Material::Undefined,
            occupant: None,
            item: None,
        }
    }

    /// Coordinate described by the record.
    #[must_use]
    pub const fn coord(&self) -> Coord {
        self.coord
    }

    /// Terrain last observed on the tile.
    #[must_use]
    pub const fn material(&self) -> Material {
        self.material
    }

    /// Entity last observed on the tile.
    #[must_use]
    pub const fn occupant(&self) -> Option<Occupant> {
        self.occupant
    }

    /// Pickup last observed on the tile.
    #[must_use]
    pub const fn item(&self) -> Option<Item> {
        self.item
    }

    /// Reports whether the tile was never observed.
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        self.material == Material::Undefined
    }

    /// Reports whether a boulder blocks the tile.
    #[must_use]
    pub fn has_boulder(&self) -> bool {
        self.occupant == Some(Occupant::Boulder)
    }

    /// Overwrites the mutable fields with the provided observation.
    pub(crate) fn update(&mut self, observation: &Observation) {
        self.material = observation.material;
        if observation.material == Material::Undefined {
            self.occupant = None;
            self.item = None;
        } else {
            self.occupant = observation.occupant;
            self.item = observation.item;
        }
    }
}
