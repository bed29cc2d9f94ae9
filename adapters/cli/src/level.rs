//! Sandbox level files: a TOML header plus an ASCII map.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use scout_core::{Coord, Facing, Item, KeyColor, Material, Observation, Occupant, Pose};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading a level file.
#[derive(Debug, Error)]
pub(crate) enum LevelError {
    /// The level file could not be read.
    #[error("failed to read level file {path}: {source}")]
    Io {
        /// Location of the file.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The level file is not valid TOML or misses required keys.
    #[error("failed to parse level toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// The map contains no tiles.
    #[error("level map is empty")]
    EmptyMap,
    /// A row does not have the same width as the first one.
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// The map is wider or taller than coordinates can address.
    #[error("level map of {columns}x{rows} tiles is too large")]
    TooLarge {
        /// Number of columns.
        columns: usize,
        /// Number of rows.
        rows: usize,
    },
    /// The map uses a glyph the sandbox does not understand.
    #[error("unknown glyph {glyph:?} at column {column}, row {row}")]
    UnknownGlyph {
        /// Offending character.
        glyph: char,
        /// Zero-based column.
        column: usize,
        /// Zero-based row.
        row: usize,
    },
    /// The map has no `@` tile.
    #[error("level map has no start tile `@`")]
    MissingStart,
    /// The map has more than one `@` tile.
    #[error("level map has a second start tile at {second:?} (first at {first:?})")]
    DuplicateStart {
        /// First start tile found.
        first: Coord,
        /// Second start tile found.
        second: Coord,
    },
    /// A teleporter digit does not appear exactly twice.
    #[error("teleporter `{label}` appears {count} times, expected exactly 2")]
    UnpairedTeleporter {
        /// Digit labelling the pair.
        label: char,
        /// Number of tiles carrying the digit.
        count: usize,
    },
}

#[derive(Debug, Deserialize)]
struct LevelFile {
    name: String,
    facing: Facing,
    vision_radius: Option<u16>,
    max_turns: Option<u64>,
    rows: Vec<String>,
}

/// Fully parsed sandbox level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Level {
    /// Human readable level name.
    pub(crate) name: String,
    /// Number of columns.
    pub(crate) width: i32,
    /// Number of rows.
    pub(crate) height: i32,
    /// Row-major tile contents, top-left at `(0, 0)`.
    pub(crate) tiles: Vec<Observation>,
    /// Where and how the agent starts.
    pub(crate) start: Pose,
    /// Teleporter pads mapped to their partner pad.
    pub(crate) teleporters: BTreeMap<Coord, Coord>,
    /// Vision radius requested by the level, if any.
    pub(crate) vision_radius: Option<u16>,
    /// Turn limit requested by the level, if any.
    pub(crate) max_turns: Option<u64>,
}

impl Level {
    /// Reads and parses the level stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self, LevelError> {
        let contents = fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses a level from its TOML representation.
    pub(crate) fn from_toml_str(contents: &str) -> Result<Self, LevelError> {
        let file: LevelFile = toml::from_str(contents)?;
        Self::from_file(file)
    }

    fn from_file(file: LevelFile) -> Result<Self, LevelError> {
        let rows: Vec<Vec<char>> = file.rows.iter().map(|row| row.chars().collect()).collect();
        let columns = rows.first().map_or(0, Vec::len);
        if columns == 0 {
            return Err(LevelError::EmptyMap);
        }
        for (row, glyphs) in rows.iter().enumerate() {
            if glyphs.len() != columns {
                return Err(LevelError::RaggedRow {
                    row,
                    expected: columns,
                    found: glyphs.len(),
                });
            }
        }

        let too_large = || LevelError::TooLarge {
            columns,
            rows: rows.len(),
        };
        let width = i32::try_from(columns).map_err(|_| too_large())?;
        let height = i32::try_from(rows.len()).map_err(|_| too_large())?;

        let mut tiles = Vec::with_capacity(columns * rows.len());
        let mut start: Option<Coord> = None;
        let mut pads: BTreeMap<char, Vec<Coord>> = BTreeMap::new();

        for (y, (row, glyphs)) in (0..height).zip(rows.iter().enumerate()) {
            for (x, (column, &glyph)) in (0..width).zip(glyphs.iter().enumerate()) {
                let coord = Coord::new(x, y);
                let Some(observation) = parse_glyph(coord, glyph) else {
                    return Err(LevelError::UnknownGlyph { glyph, column, row });
                };

                if glyph == '@' {
                    if let Some(first) = start {
                        return Err(LevelError::DuplicateStart {
                            first,
                            second: coord,
                        });
                    }
                    start = Some(coord);
                }
                if glyph.is_ascii_digit() {
                    pads.entry(glyph).or_default().push(coord);
                }

                tiles.push(observation);
            }
        }

        let start = start.ok_or(LevelError::MissingStart)?;

        let mut teleporters = BTreeMap::new();
        for (label, coords) in pads {
            let &[first, second] = coords.as_slice() else {
                return Err(LevelError::UnpairedTeleporter {
                    label,
                    count: coords.len(),
                });
            };
            let _ = teleporters.insert(first, second);
            let _ = teleporters.insert(second, first);
        }

        Ok(Self {
            name: file.name,
            width,
            height,
            tiles,
            start: Pose::new(start, file.facing),
            teleporters,
            vision_radius: file.vision_radius,
            max_turns: file.max_turns,
        })
    }

    /// Number of stars placed on the map.
    #[must_use]
    pub(crate) fn star_count(&self) -> usize {
        self.tiles
            .iter()
            .filter(|tile| tile.item == Some(Item::Star))
            .count()
    }
}

fn parse_glyph(coord: Coord, glyph: char) -> Option<Observation> {
    let grass = Observation::bare(coord, Material::Grass);
    let observation = match glyph {
        '.' | '@' => grass,
        ',' => Observation::bare(coord, Material::Sand),
        ':' => Observation::bare(coord, Material::Dirt),
        '~' => Observation::bare(coord, Material::Water),
        '#' => Observation::bare(coord, Material::Rock),
        ' ' => Observation::bare(coord, Material::Void),
        '*' => grass.with_item(Item::Star),
        'c' => grass.with_item(Item::Cookie),
        'l' => grass.with_item(Item::LaserCharge),
        'o' => grass.with_occupant(Occupant::Boulder),
        '0'..='9' => Observation::bare(coord, Material::Teleporter),
        _ => {
            let color = key_color(glyph.to_ascii_lowercase())?;
            if glyph.is_ascii_uppercase() {
                Observation::bare(coord, Material::Gate(color))
            } else {
                grass.with_item(Item::Key(color))
            }
        }
    };
    Some(observation)
}

fn key_color(glyph: char) -> Option<KeyColor> {
    match glyph {
        'r' => Some(KeyColor::Red),
        'g' => Some(KeyColor::Green),
        'b' => Some(KeyColor::Blue),
        'y' => Some(KeyColor::Yellow),
        _ => None,
    }
}
