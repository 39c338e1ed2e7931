//! Human coordinates (`a1`, `g7`) and their mapping onto board points.
//!
//! Columns are letters starting at `a` on the left, rows are digits starting at `1` at the
//! bottom. This is the only module that knows the textual coordinate format; everything else
//! works with [`PointId`]s.

use crate::game::GameError;
use crate::point::PointId;
use crate::variant::{Layout, Variant};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column index of the centre line on ring boards (`d`)
const CENTRE: u8 = 3;

/// Row of the centre line on ring boards
const MIDDLE_ROW: u8 = 4;

/// Columns run `a` to `z`
const COLUMN_LIMIT: u8 = 26;

/// Rows run `1` to `9`
const ROW_LIMIT: u8 = 9;

/// A letter/digit pair, not yet checked against any variant
///
/// Serialized as its text form, so a deserialized coordinate is always one letter and one digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coordinate {
    /// Zero-based column (`a` is 0)
    column: u8,
    /// One-based row
    row: u8,
}

impl Coordinate {
    /// `None` unless the column is a letter and the row a non-zero digit
    pub const fn new(column: u8, row: u8) -> Option<Self> {
        if column < COLUMN_LIMIT && row >= 1 && row <= ROW_LIMIT {
            Some(Self::at(column, row))
        } else {
            None
        }
    }

    /// Caller guarantees both parts are in range
    const fn at(column: u8, row: u8) -> Self {
        Self { column, row }
    }

    pub const fn column(&self) -> u8 {
        self.column
    }

    pub const fn row(&self) -> u8 {
        self.row
    }

    pub fn letter(&self) -> char {
        char::from(b'a' + self.column)
    }

    pub fn digit(&self) -> char {
        char::from(b'0' + self.row)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter(), self.digit())
    }
}

impl FromStr for Coordinate {
    type Err = GameError;

    /// Parse exactly one letter followed by one non-zero digit, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(letter), Some(digit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(GameError::InvalidCoordinate);
        };

        let letter = letter.to_ascii_lowercase();
        if !letter.is_ascii_lowercase() || !('1'..='9').contains(&digit) {
            return Err(GameError::InvalidCoordinate);
        }

        Ok(Self::at(letter as u8 - b'a', digit as u8 - b'0'))
    }
}

impl TryFrom<String> for Coordinate {
    type Error = GameError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

impl From<Coordinate> for String {
    fn from(coord: Coordinate) -> Self {
        coord.to_string()
    }
}

impl Variant {
    /// Check whether a coordinate names a point of this variant
    pub fn is_valid(self, coord: Coordinate) -> bool {
        let config = self.config();
        let (col, row) = (coord.column, coord.row);
        if col >= config.columns || row == 0 || row > config.rows {
            return false;
        }

        match config.layout {
            Layout::Grid => true,
            Layout::Rings => match col {
                0 | 6 => matches!(row, 1 | 4 | 7),
                1 | 5 => matches!(row, 2 | 4 | 6),
                2 | 4 => (3..=5).contains(&row),
                // The centre of the board is not a point
                _ => row != MIDDLE_ROW,
            },
        }
    }

    /// Resolve a coordinate to its point, or `None` if it is not on this board
    pub fn resolve(self, coord: Coordinate) -> Option<PointId> {
        if !self.is_valid(coord) {
            return None;
        }

        let config = self.config();
        let (col, row) = (coord.column, coord.row);
        match config.layout {
            Layout::Grid => Some(PointId::new(config.rows - row, col)),
            Layout::Rings => {
                if row == MIDDLE_ROW {
                    // Left half is a ring's middle-left slot, right half its middle-right
                    return Some(if col < CENTRE {
                        PointId::new(col, 6)
                    } else {
                        PointId::new(config.columns - 1 - col, 2)
                    });
                }

                let ring = match row {
                    1 | 7 => 0,
                    2 | 6 => 1,
                    _ => 2,
                };
                let lower = row < MIDDLE_ROW;
                let slot = match col.cmp(&CENTRE) {
                    std::cmp::Ordering::Less => {
                        if lower {
                            5
                        } else {
                            7
                        }
                    }
                    std::cmp::Ordering::Equal => {
                        if lower {
                            4
                        } else {
                            0
                        }
                    }
                    std::cmp::Ordering::Greater => {
                        if lower {
                            3
                        } else {
                            1
                        }
                    }
                };
                Some(PointId::new(ring, slot))
            }
        }
    }

    /// Canonical coordinate of a point, or `None` if the id is not on this board
    pub fn coordinate(self, id: PointId) -> Option<Coordinate> {
        let config = self.config();
        if id.ring >= config.rings || id.slot >= config.slots_per_ring {
            return None;
        }

        match config.layout {
            Layout::Grid => Some(Coordinate::at(id.slot, config.rows - id.ring)),
            Layout::Rings => {
                let near = id.ring;
                let far = config.columns - 1 - id.ring;
                let bottom = id.ring + 1;
                let top = config.rows - id.ring;
                let (col, row) = match id.slot {
                    0 => (CENTRE, top),
                    1 => (far, top),
                    2 => (far, MIDDLE_ROW),
                    3 => (far, bottom),
                    4 => (CENTRE, bottom),
                    5 => (near, bottom),
                    6 => (near, MIDDLE_ROW),
                    _ => (near, top),
                };
                Some(Coordinate::at(col, row))
            }
        }
    }

    /// Parse coordinate text and resolve it in one step
    pub fn parse_point(self, text: &str) -> Result<PointId, GameError> {
        let coord: Coordinate = text.parse()?;
        self.resolve(coord).ok_or(GameError::InvalidCoordinate)
    }

    /// Every legal coordinate of this variant, row by row from the top
    pub fn coordinates(self) -> impl Iterator<Item = Coordinate> {
        let config = self.config();
        let columns = config.columns;
        (1..=config.rows)
            .rev()
            .flat_map(move |row| (0..columns).map(move |col| Coordinate::at(col, row)))
            .filter(move |coord| self.is_valid(*coord))
    }
}
