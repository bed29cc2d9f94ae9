#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Scout explorer.
//!
//! This crate defines the vocabulary that connects the runtime adapter, the
//! incremental map, and the pure decision systems. The runtime reports a
//! [`Pose`], a batch of [`Observation`] values and the agent's
//! [`Capabilities`] once per turn; the systems answer with exactly one
//! [`Action`] and optionally an [`Event`] describing a side effect the map must
//! remember.

use serde::{Deserialize, Serialize};

/// Location of a single grid tile expressed in world coordinates.
///
/// The grid uses screen orientation: `y` grows toward the south.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    x: i32,
    y: i32,
}

impl Coord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal component of the coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical component of the coordinate.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the coordinate displaced by the provided offsets.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Returns the orthogonally adjacent coordinate in the provided direction.
    #[must_use]
    pub const fn neighbor(self, facing: Facing) -> Self {
        let (dx, dy) = facing.delta();
        self.offset(dx, dy)
    }

    /// Orthogonal neighbours in canonical north, east, south, west order.
    #[must_use]
    pub fn neighbors(self) -> [Coord; 4] {
        Facing::CARDINALS.map(|facing| self.neighbor(facing))
    }

    /// Computes the Manhattan distance between two coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Computes the Chebyshev (king move) distance between two coordinates.
    #[must_use]
    pub fn chebyshev_distance(self, other: Coord) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

/// Cardinal orientations an agent can face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Toward decreasing `y`.
    North,
    /// Toward increasing `x`.
    East,
    /// Toward increasing `y`.
    South,
    /// Toward decreasing `x`.
    West,
}

impl Facing {
    /// Canonical iteration order, also used to break ties between neighbours.
    pub const CARDINALS: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    /// Unit offset pointing in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Facing obtained by rotating one step counter-clockwise.
    #[must_use]
    pub const fn left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::East => Self::North,
            Self::South => Self::East,
            Self::West => Self::South,
        }
    }

    /// Facing obtained by rotating one step clockwise.
    #[must_use]
    pub const fn right(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// Facing pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Direction leading from `from` to an orthogonally adjacent `to`.
    ///
    /// Returns `None` for identical, diagonal or distant coordinates.
    #[must_use]
    pub fn between(from: Coord, to: Coord) -> Option<Self> {
        let dx = to.x() - from.x();
        let dy = to.y() - from.y();
        Self::CARDINALS
            .into_iter()
            .find(|facing| facing.delta() == (dx, dy))
    }
}

/// Colours shared by keys and the gates they unlock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyColor {
    /// Red key or gate.
    Red,
    /// Green key or gate.
    Green,
    /// Blue key or gate.
    Blue,
    /// Yellow key or gate.
    Yellow,
}

impl KeyColor {
    /// Every key colour in declaration order.
    pub const ALL: [KeyColor; 4] = [
        KeyColor::Red,
        KeyColor::Green,
        KeyColor::Blue,
        KeyColor::Yellow,
    ];

    const fn bit(self) -> u8 {
        match self {
            Self::Red => 0b0001,
            Self::Green => 0b0010,
            Self::Blue => 0b0100,
            Self::Yellow => 0b1000,
        }
    }
}

/// Terrain kinds a tile can consist of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    /// The tile was never observed.
    Undefined,
    /// Observed void outside the playable world.
    Void,
    /// Walkable grass.
    Grass,
    /// Walkable sand.
    Sand,
    /// Walkable dirt.
    Dirt,
    /// Impassable water.
    Water,
    /// Impassable rock.
    Rock,
    /// Walkable teleporter pad that moves the agent to its partner pad.
    Teleporter,
    /// Locked gate that opens with the key of the matching colour.
    Gate(KeyColor),
}

impl Material {
    /// Reports whether an agent without any key may stand on the material.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        matches!(self, Self::Grass | Self::Sand | Self::Dirt | Self::Teleporter)
    }

    /// Reports whether an agent holding `capabilities` may stand on the material.
    #[must_use]
    pub fn is_passable_with(self, capabilities: &Capabilities) -> bool {
        match self {
            Self::Gate(color) => capabilities.holds_key(color),
            other => other.is_passable(),
        }
    }
}

/// Static pickups that can rest on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    /// Restores energy; a minor collectible.
    Cookie,
    /// The most valuable collectible in the world.
    Star,
    /// Opens gates of the matching colour.
    Key(KeyColor),
    /// Ammunition that lets the agent destroy a boulder.
    LaserCharge,
}

/// Mobile entities that can block a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupant {
    /// Obstacle that a laser charge removes.
    Boulder,
    /// Another agent.
    Robot,
}

/// Everything the runtime reports about one visible tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Observation {
    /// Coordinate of the observed tile.
    pub coord: Coord,
    /// Terrain currently present on the tile.
    pub material: Material,
    /// Entity currently standing on the tile, if any.
    pub occupant: Option<Occupant>,
    /// Pickup resting on the tile, if any.
    pub item: Option<Item>,
}

impl Observation {
    /// Creates an observation of an empty tile with the provided material.
    #[must_use]
    pub const fn bare(coord: Coord, material: Material) -> Self {
        Self {
            coord,
            material,
            occupant: None,
            item: None,
        }
    }

    /// Returns the observation with the provided item placed on it.
    #[must_use]
    pub const fn with_item(mut self, item: Item) -> Self {
        self.item = Some(item);
        self
    }

    /// Returns the observation with the provided occupant standing on it.
    #[must_use]
    pub const fn with_occupant(mut self, occupant: Occupant) -> Self {
        self.occupant = Some(occupant);
        self
    }
}

/// Location and orientation of the agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pose {
    /// Tile the agent stands on.
    pub position: Coord,
    /// Direction the agent faces.
    pub facing: Facing,
}

impl Pose {
    /// Creates a new pose.
    #[must_use]
    pub const fn new(position: Coord, facing: Facing) -> Self {
        Self { position, facing }
    }

    /// Tile directly in front of the agent.
    #[must_use]
    pub const fn ahead(&self) -> Coord {
        self.position.neighbor(self.facing)
    }
}

/// Holdable tools that gate obstacle and gate interactions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capabilities {
    laser_charge: bool,
    keys: u8,
}

impl Capabilities {
    /// Capabilities of an agent holding nothing.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            laser_charge: false,
            keys: 0,
        }
    }

    /// Returns the capabilities with a laser charge available.
    #[must_use]
    pub const fn with_laser_charge(mut self) -> Self {
        self.laser_charge = true;
        self
    }

    /// Returns the capabilities with a key of the provided colour available.
    #[must_use]
    pub const fn with_key(mut self, color: KeyColor) -> Self {
        self.keys |= color.bit();
        self
    }

    /// Reports whether a laser charge is available.
    #[must_use]
    pub const fn has_laser_charge(&self) -> bool {
        self.laser_charge
    }

    /// Reports whether a key of the provided colour is available.
    #[must_use]
    pub const fn holds_key(&self, color: KeyColor) -> bool {
        self.keys & color.bit() != 0
    }

    /// Iterator over the colours of every held key.
    pub fn keys(&self) -> impl Iterator<Item = KeyColor> + '_ {
        KeyColor::ALL
            .into_iter()
            .filter(move |color| self.holds_key(*color))
    }
}

/// Inventory items the agent can activate on the tile ahead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UsableItem {
    /// Fires a laser charge at the boulder ahead.
    LaserCharge,
    /// Unlocks the gate ahead with the key of the provided colour.
    Key(KeyColor),
}

/// Primitive actions the agent submits once per turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Picks up the item beneath the agent.
    PickUp,
    /// Rotates one step counter-clockwise.
    TurnLeft,
    /// Rotates one step clockwise.
    TurnRight,
    /// Steps onto the tile ahead.
    MoveForward,
    /// Activates an inventory item on the tile ahead.
    UseItem(UsableItem),
    /// Does nothing this turn.
    NoOp,
}

/// Side effects emitted alongside an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// The agent is about to step onto a teleporter pad.
    TeleportTriggered {
        /// Tile the agent leaves.
        from: Coord,
        /// Teleporter pad the agent steps onto.
        endpoint: Coord,
    },
}

#[cfg(test)]
mod tests {
    use super::{Capabilities, Coord, Facing, Item, KeyColor, Material, Observation, Occupant};

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = Coord::new(1, -1);
        let destination = Coord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 7);
        assert_eq!(destination.manhattan_distance(origin), 7);
        assert_eq!(origin.chebyshev_distance(destination), 4);
    }

    #[test]
    fn neighbors_follow_canonical_order() {
        let origin = Coord::new(0, 0);
        assert_eq!(
            origin.neighbors(),
            [
                Coord::new(0, -1),
                Coord::new(1, 0),
                Coord::new(0, 1),
                Coord::new(-1, 0),
            ]
        );
    }

    #[test]
    fn rotations_are_inverse() {
        for facing in Facing::CARDINALS {
            assert_eq!(facing.left().right(), facing);
            assert_eq!(facing.right().right(), facing.opposite());
            assert_eq!(facing.left().left(), facing.opposite());
        }
    }

    #[test]
    fn between_rejects_non_adjacent_pairs() {
        let origin = Coord::new(2, 2);
        assert_eq!(Facing::between(origin, Coord::new(2, 1)), Some(Facing::North));
        assert_eq!(Facing::between(origin, Coord::new(1, 2)), Some(Facing::West));
        assert_eq!(Facing::between(origin, origin), None);
        assert_eq!(Facing::between(origin, Coord::new(3, 3)), None);
        assert_eq!(Facing::between(origin, Coord::new(4, 2)), None);
    }

    #[test]
    fn gates_require_matching_key() {
        let gate = Material::Gate(KeyColor::Blue);
        assert!(!gate.is_passable());
        assert!(!gate.is_passable_with(&Capabilities::none().with_key(KeyColor::Red)));
        assert!(gate.is_passable_with(&Capabilities::none().with_key(KeyColor::Blue)));
    }

    #[test]
    fn capabilities_track_each_key_independently() {
        let capabilities = Capabilities::none()
            .with_key(KeyColor::Green)
            .with_key(KeyColor::Yellow);

        assert!(!capabilities.has_laser_charge());
        assert_eq!(
            capabilities.keys().collect::<Vec<_>>(),
            vec![KeyColor::Green, KeyColor::Yellow]
        );
        assert!(capabilities.with_laser_charge().has_laser_charge());
    }

    #[test]
    fn observation_batch_round_trips_through_bincode() {
        let batch = vec![
            Observation::bare(Coord::new(-3, 7), Material::Gate(KeyColor::Red)),
            Observation::bare(Coord::new(0, 0), Material::Grass).with_item(Item::Key(KeyColor::Red)),
            Observation::bare(Coord::new(1, 0), Material::Sand).with_occupant(Occupant::Boulder),
        ];

        let bytes = bincode::serialize(&batch).expect("serialize");
        let restored: Vec<Observation> = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, batch);
    }
}
