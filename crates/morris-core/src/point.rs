//! Points, directions and occupancy.
//!
//! This module provides the foundational types for the board graph:
//! - `Player` and `Occupant`: who owns a piece, and what sits on a point
//! - `Direction` and `Axis`: the eight compass links and the four lines they form
//! - `PointId`: the stable (ring, slot) address of a point inside the board arena
//! - `Point`: one node of the graph, holding an occupant and its neighbor links
//!
//! Neighbor links are indices into the board arena rather than references, so the
//! graph can be cyclic without any shared ownership.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two sides. Black always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// Both players in turn order
    pub const ALL: [Player; 2] = [Player::Black, Player::White];

    /// The other side
    pub const fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Index into per-player tables
    pub const fn index(self) -> usize {
        match self {
            Player::Black => 0,
            Player::White => 1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Player::Black => "Black",
            Player::White => "White",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What currently sits on a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Occupant {
    /// Nothing here
    #[default]
    Empty,
    Black,
    White,
}

impl Occupant {
    /// Get the owner of the piece on this point, if any
    pub const fn owner(self) -> Option<Player> {
        match self {
            Occupant::Empty => None,
            Occupant::Black => Some(Player::Black),
            Occupant::White => Some(Player::White),
        }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Occupant::Empty)
    }

    /// Single character used by text renderers (`E`, `B`, `W`)
    pub const fn symbol(self) -> char {
        match self {
            Occupant::Empty => 'E',
            Occupant::Black => 'B',
            Occupant::White => 'W',
        }
    }
}

impl From<Player> for Occupant {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => Occupant::Black,
            Player::White => Occupant::White,
        }
    }
}

/// Direction of a link between two points.
///
/// Opposite directions are adjacent in declaration order (North/South, West/East, ...),
/// so `index ^ 1` is the opposite and `index / 2` is the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    West,
    East,
    NorthEast,
    SouthWest,
    NorthWest,
    SouthEast,
}

impl Direction {
    /// All eight directions, in link-table order
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::NorthWest,
        Direction::SouthEast,
    ];

    /// The four directions every variant uses
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Position of this direction in a point's link table
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn opposite(self) -> Direction {
        Direction::ALL[self.index() ^ 1]
    }

    /// The line this direction runs along
    pub const fn axis(self) -> Axis {
        Axis::ALL[self.index() / 2]
    }

    /// Token used in move text (`n`, `sw`, ...)
    pub const fn token(self) -> &'static str {
        match self {
            Direction::North => "n",
            Direction::South => "s",
            Direction::West => "w",
            Direction::East => "e",
            Direction::NorthEast => "ne",
            Direction::SouthWest => "sw",
            Direction::NorthWest => "nw",
            Direction::SouthEast => "se",
        }
    }

    /// Parse a move-text token. Expects lower case.
    pub fn from_token(token: &str) -> Option<Direction> {
        Direction::ALL.into_iter().find(|dir| dir.token() == token)
    }
}

/// A pair of opposite directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    NorthSouth,
    WestEast,
    NorthEastSouthWest,
    NorthWestSouthEast,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::NorthSouth,
        Axis::WestEast,
        Axis::NorthEastSouthWest,
        Axis::NorthWestSouthEast,
    ];

    /// Both directions along this axis
    pub const fn directions(self) -> [Direction; 2] {
        let first = (self as usize) * 2;
        [Direction::ALL[first], Direction::ALL[first + 1]]
    }
}

/// Address of a point in the board arena.
///
/// On ring boards `ring` counts inwards from the outer square and `slot` runs clockwise
/// from the top middle. On the grid board `ring` is the row from the top and `slot` the
/// column from the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId {
    pub ring: u8,
    pub slot: u8,
}

impl PointId {
    pub const fn new(ring: u8, slot: u8) -> Self {
        Self { ring, slot }
    }
}

/// A single node of the board graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Point {
    occupant: Occupant,
    neighbors: [Option<PointId>; 8],
}

impl Point {
    /// Create an empty, unlinked point
    pub fn new() -> Self {
        Self::default()
    }

    pub fn occupant(&self) -> Occupant {
        self.occupant
    }

    pub(crate) fn set_occupant(&mut self, occupant: Occupant) {
        self.occupant = occupant;
    }

    /// Get the neighbor in a specific direction
    pub fn neighbor(&self, direction: Direction) -> Option<PointId> {
        self.neighbors[direction.index()]
    }

    pub(crate) fn set_neighbor(&mut self, direction: Direction, neighbor: PointId) {
        self.neighbors[direction.index()] = Some(neighbor);
    }

    /// All existing links as (direction, neighbor) pairs
    pub fn neighbors(&self) -> impl Iterator<Item = (Direction, PointId)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| self.neighbor(dir).map(|id| (dir, id)))
    }
}
