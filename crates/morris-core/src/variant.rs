//! Variant selection and the per-variant configuration table.
//!
//! Everything that differs between Three, Nine and Twelve Men's Morris lives in one
//! [`VariantConfig`] value. The board builder, the coordinate mapper and the move parser all
//! consult it instead of branching on the variant themselves.

use crate::point::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Shape of the board graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    /// A plain 3x3 grid (Three Men's Morris)
    Grid,
    /// Three concentric squares joined by spokes
    Rings,
}

/// Static parameters of a variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantConfig {
    /// Display name
    pub name: &'static str,
    /// Program-name style short name (`tmm`, `nmm`, `twmm`)
    pub short_name: &'static str,
    /// Pieces each side places during the opening
    pub pieces_per_side: u8,
    /// Rings (or grid rows) in the arena
    pub rings: u8,
    /// Slots per ring (or grid columns)
    pub slots_per_ring: u8,
    /// Number of coordinate letters, starting at `a`
    pub columns: u8,
    /// Number of coordinate digits, starting at `1`
    pub rows: u8,
    pub layout: Layout,
    /// Directions a piece may slide in
    pub directions: &'static [Direction],
    /// Corners of adjacent rings are joined diagonally
    pub diagonal_spokes: bool,
    /// Whether the game passes through the sliding phase before flying
    pub sliding_phase: bool,
}

const THREE: VariantConfig = VariantConfig {
    name: "Three Men's Morris",
    short_name: "tmm",
    pieces_per_side: 3,
    rings: 3,
    slots_per_ring: 3,
    columns: 3,
    rows: 3,
    layout: Layout::Grid,
    directions: &Direction::CARDINAL,
    diagonal_spokes: false,
    sliding_phase: false,
};

const NINE: VariantConfig = VariantConfig {
    name: "Nine Men's Morris",
    short_name: "nmm",
    pieces_per_side: 9,
    rings: 3,
    slots_per_ring: 8,
    columns: 7,
    rows: 7,
    layout: Layout::Rings,
    directions: &Direction::CARDINAL,
    diagonal_spokes: false,
    sliding_phase: true,
};

const TWELVE: VariantConfig = VariantConfig {
    name: "Twelve Men's Morris",
    short_name: "twmm",
    pieces_per_side: 12,
    rings: 3,
    slots_per_ring: 8,
    columns: 7,
    rows: 7,
    layout: Layout::Rings,
    directions: &Direction::ALL,
    diagonal_spokes: true,
    sliding_phase: true,
};

/// Which game is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Variant {
    Three,
    #[default]
    Nine,
    Twelve,
}

/// Error returned when a variant name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown variant `{0}` (expected three, nine or twelve)")]
pub struct ParseVariantError(String);

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Three, Variant::Nine, Variant::Twelve];

    pub const fn config(self) -> &'static VariantConfig {
        match self {
            Variant::Three => &THREE,
            Variant::Nine => &NINE,
            Variant::Twelve => &TWELVE,
        }
    }

    pub const fn pieces_per_side(self) -> u8 {
        self.config().pieces_per_side
    }

    /// Placements made by both sides before the opening ends
    pub const fn total_placements(self) -> u8 {
        self.pieces_per_side() * 2
    }

    /// Number of points on the board
    pub const fn point_count(self) -> usize {
        let config = self.config();
        config.rings as usize * config.slots_per_ring as usize
    }

    /// Whether pieces may slide in this direction
    pub fn allows(self, direction: Direction) -> bool {
        self.config().directions.contains(&direction)
    }

    /// Pick a variant the way the classic binaries did: `tmm*` plays Three, `twmm*` plays
    /// Twelve, anything else plays Nine.
    pub fn from_program_name(name: &str) -> Variant {
        if name.starts_with(THREE.short_name) {
            Variant::Three
        } else if name.starts_with(TWELVE.short_name) {
            Variant::Twelve
        } else {
            Variant::Nine
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config().name)
    }
}

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "three" | "3" | "tmm" => Ok(Variant::Three),
            "nine" | "9" | "nmm" => Ok(Variant::Nine),
            "twelve" | "12" | "twmm" => Ok(Variant::Twelve),
            _ => Err(ParseVariantError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_allotments() {
        assert_eq!(Variant::Three.total_placements(), 6);
        assert_eq!(Variant::Nine.total_placements(), 18);
        assert_eq!(Variant::Twelve.total_placements(), 24);
    }

    #[test]
    fn test_point_counts() {
        assert_eq!(Variant::Three.point_count(), 9);
        assert_eq!(Variant::Nine.point_count(), 24);
        assert_eq!(Variant::Twelve.point_count(), 24);
    }

    #[test]
    fn test_only_twelve_allows_diagonals() {
        for variant in Variant::ALL {
            for dir in Direction::CARDINAL {
                assert!(variant.allows(dir));
            }
        }
        assert!(!Variant::Nine.allows(Direction::NorthEast));
        assert!(!Variant::Three.allows(Direction::SouthWest));
        assert!(Variant::Twelve.allows(Direction::NorthWest));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("three".parse(), Ok(Variant::Three));
        assert_eq!(" NINE ".parse(), Ok(Variant::Nine));
        assert_eq!("12".parse(), Ok(Variant::Twelve));
        assert_eq!("twmm".parse(), Ok(Variant::Twelve));
        assert!("eleven".parse::<Variant>().is_err());
    }

    #[test]
    fn test_program_name_selection() {
        assert_eq!(Variant::from_program_name("tmm"), Variant::Three);
        assert_eq!(Variant::from_program_name("twmm"), Variant::Twelve);
        assert_eq!(Variant::from_program_name("nmm"), Variant::Nine);
        assert_eq!(Variant::from_program_name("morris"), Variant::Nine);
    }
}
