//! Dense tile storage that grows as the explored rectangle widens.

use scout_core::{Coord, Observation};

use crate::tile::TileKnowledge;

/// Half-open rectangle `[min_x, max_x) × [min_y, max_y)` of explored space.
///
/// A rectangle with zero width or height is empty and contains nothing. Bounds
/// are kept in `i64` so the exclusive upper edge of a tile at `i32::MAX` is
/// still representable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bounds {
    min_x: i64,
    min_y: i64,
    max_x: i64,
    max_y: i64,
}

impl Bounds {
    /// Rectangle containing no coordinates.
    pub const EMPTY: Bounds = Bounds {
        min_x: 0,
        min_y: 0,
        max_x: 0,
        max_y: 0,
    };

    /// Smallest rectangle containing the single provided coordinate.
    #[must_use]
    pub const fn around(coord: Coord) -> Self {
        let x = coord.x() as i64;
        let y = coord.y() as i64;
        Self {
            min_x: x,
            min_y: y,
            max_x: x + 1,
            max_y: y + 1,
        }
    }

    /// Inclusive lower horizontal bound.
    #[must_use]
    pub const fn min_x(&self) -> i64 {
        self.min_x
    }

    /// Inclusive lower vertical bound.
    #[must_use]
    pub const fn min_y(&self) -> i64 {
        self.min_y
    }

    /// Exclusive upper horizontal bound.
    #[must_use]
    pub const fn max_x(&self) -> i64 {
        self.max_x
    }

    /// Exclusive upper vertical bound.
    #[must_use]
    pub const fn max_y(&self) -> i64 {
        self.max_y
    }

    /// Number of columns covered by the rectangle.
    #[must_use]
    pub const fn width(&self) -> u64 {
        self.max_x.abs_diff(self.min_x)
    }

    /// Number of rows covered by the rectangle.
    #[must_use]
    pub const fn height(&self) -> u64 {
        self.max_y.abs_diff(self.min_y)
    }

    /// Number of coordinates covered by the rectangle.
    #[must_use]
    pub fn area(&self) -> usize {
        let area = self.width().saturating_mul(self.height());
        usize::try_from(area).unwrap_or(usize::MAX)
    }

    /// Reports whether the rectangle covers no coordinates.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Reports whether the coordinate lies inside the rectangle.
    #[must_use]
    pub const fn contains(&self, coord: Coord) -> bool {
        let x = coord.x() as i64;
        let y = coord.y() as i64;
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }

    /// Reports whether every coordinate of `other` lies inside the rectangle.
    #[must_use]
    pub const fn contains_bounds(&self, other: &Bounds) -> bool {
        if other.is_empty() {
            return true;
        }
        if self.is_empty() {
            return false;
        }
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    /// Reports whether the coordinate lies on the outermost row or column.
    #[must_use]
    pub const fn is_on_edge(&self, coord: Coord) -> bool {
        let x = coord.x() as i64;
        let y = coord.y() as i64;
        self.contains(coord)
            && (x == self.min_x || x == self.max_x - 1 || y == self.min_y || y == self.max_y - 1)
    }

    /// Smallest rectangle containing both this rectangle and the coordinate.
    #[must_use]
    pub fn including(self, coord: Coord) -> Self {
        let single = Self::around(coord);
        if self.is_empty() {
            return single;
        }

        Self {
            min_x: self.min_x.min(single.min_x),
            min_y: self.min_y.min(single.min_y),
            max_x: self.max_x.max(single.max_x),
            max_y: self.max_y.max(single.max_y),
        }
    }

    /// Iterator over every covered coordinate in row-major order.
    pub fn coords(self) -> impl Iterator<Item = Coord> {
        let columns = self.min_x..self.max_x;
        (self.min_y..self.max_y).flat_map(move |y| {
            columns.clone().filter_map(move |x| {
                let x = i32::try_from(x).ok()?;
                let y = i32::try_from(y).ok()?;
                Some(Coord::new(x, y))
            })
        })
    }

    /// Row-major offset of the coordinate, if it lies inside the rectangle.
    pub(crate) fn index(&self, coord: Coord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }

        let column = usize::try_from(i64::from(coord.x()) - self.min_x).ok()?;
        let row = usize::try_from(i64::from(coord.y()) - self.min_y).ok()?;
        let width = usize::try_from(self.width()).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

/// Dense store of [`TileKnowledge`] covering the explored rectangle.
///
/// Every coordinate inside [`BoundedGrid::bounds`] maps to exactly one stored
/// record. Coordinates outside answer with a freshly synthesized unknown tile
/// that is not stored. The rectangle only ever grows.
#[derive(Clone, Debug, Default)]
pub struct BoundedGrid {
    bounds: Bounds,
    tiles: Vec<TileKnowledge>,
}

impl BoundedGrid {
    /// Creates an empty grid covering no coordinates.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rectangle currently covered by the grid.
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of stored tiles.
    #[must_use]
    pub fn area(&self) -> usize {
        self.tiles.len()
    }

    /// Reports whether the grid stores no tiles yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Knowledge about the provided coordinate.
    ///
    /// Coordinates outside the explored rectangle yield an unknown placeholder.
    #[must_use]
    pub fn tile_at(&self, coord: Coord) -> TileKnowledge {
        self.get(coord)
            .copied()
            .unwrap_or_else(|| TileKnowledge::unknown(coord))
    }

    /// Stored record for the coordinate, if it lies inside the explored rectangle.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<&TileKnowledge> {
        self.bounds
            .index(coord)
            .and_then(|index| self.tiles.get(index))
    }

    /// Reports whether the coordinate lies on the outer row or column of the grid.
    #[must_use]
    pub const fn is_on_boundary(&self, coord: Coord) -> bool {
        self.bounds.is_on_edge(coord)
    }

    /// Iterator over every stored tile in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &TileKnowledge> {
        self.tiles.iter()
    }

    /// Folds a batch of observations into the grid.
    ///
    /// The rectangle is widened first, in a single reallocation, so that it
    /// contains every observed coordinate. Each observation then overwrites the
    /// stored record for its coordinate. An empty batch changes nothing.
    pub fn absorb(&mut self, observations: &[Observation]) {
        if observations.is_empty() {
            return;
        }

        let required = observations
            .iter()
            .fold(self.bounds, |bounds, observation| bounds.including(observation.coord));
        if required != self.bounds {
            self.grow_to(required);
        }

        for observation in observations {
            if let Some(index) = self.bounds.index(observation.coord) {
                if let Some(tile) = self.tiles.get_mut(index) {
                    tile.update(observation);
                }
            }
        }
    }

    fn grow_to(&mut self, bounds: Bounds) {
        let mut tiles = Vec::with_capacity(bounds.area());
        tiles.extend(bounds.coords().map(|coord| self.tile_at(coord)));

        tracing::debug!(
            from_width = self.bounds.width(),
            from_height = self.bounds.height(),
            to_width = bounds.width(),
            to_height = bounds.height(),
            min_x = bounds.min_x(),
            min_y = bounds.min_y(),
            "grid grew"
        );

        self.tiles = tiles;
        self.bounds = bounds;
    }
}
