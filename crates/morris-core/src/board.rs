//! Board representation and construction.
//!
//! This module contains:
//! - The point arena and its direction-indexed adjacency links
//! - Construction of the grid (Three) and ring (Nine, Twelve) topologies
//! - Occupancy queries used by the rules and the controller
//! - A JSON-friendly snapshot for display collaborators

use crate::point::{Direction, Occupant, Player, Point, PointId};
use crate::variant::{Layout, Variant};
use serde::{Deserialize, Serialize};

/// Links along one ring, as (slot, direction, neighbor slot).
///
/// Slots run clockwise from the top middle: 0 top middle, 1 top right, 2 middle right,
/// 3 bottom right, 4 bottom middle, 5 bottom left, 6 middle left, 7 top left.
const RING_EDGES: [(u8, Direction, u8); 8] = [
    (0, Direction::East, 1),
    (1, Direction::South, 2),
    (2, Direction::South, 3),
    (3, Direction::West, 4),
    (4, Direction::West, 5),
    (5, Direction::North, 6),
    (6, Direction::North, 7),
    (7, Direction::East, 0),
];

/// Midpoint spokes: the direction from an outer ring's slot to the same slot one ring in
const CARDINAL_SPOKES: [(u8, Direction); 4] = [
    (0, Direction::South),
    (2, Direction::West),
    (4, Direction::North),
    (6, Direction::East),
];

/// Corner spokes, Twelve Men's Morris only
const DIAGONAL_SPOKES: [(u8, Direction); 4] = [
    (1, Direction::SouthWest),
    (3, Direction::NorthWest),
    (5, Direction::NorthEast),
    (7, Direction::SouthEast),
];

/// The complete game board: a fixed arena of linked points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    variant: Variant,
    points: Vec<Point>,
}

impl Board {
    /// Build the empty board for a variant
    pub fn new(variant: Variant) -> Self {
        let mut board = Self {
            variant,
            points: vec![Point::new(); variant.point_count()],
        };

        match variant.config().layout {
            Layout::Grid => board.link_grid(),
            Layout::Rings => board.link_rings(),
        }

        debug_assert!(board.is_symmetric(), "asymmetric board for {variant:?}");
        board
    }

    fn link_grid(&mut self) {
        let config = self.variant.config();
        for row in 0..config.rings {
            for col in 0..config.slots_per_ring {
                let here = PointId::new(row, col);
                if col + 1 < config.slots_per_ring {
                    self.link(here, Direction::East, PointId::new(row, col + 1));
                }
                if row + 1 < config.rings {
                    self.link(here, Direction::South, PointId::new(row + 1, col));
                }
            }
        }
    }

    fn link_rings(&mut self) {
        let config = self.variant.config();
        for ring in 0..config.rings {
            for (slot, direction, next) in RING_EDGES {
                self.link(PointId::new(ring, slot), direction, PointId::new(ring, next));
            }
        }

        for outer in 0..config.rings - 1 {
            let inner = outer + 1;
            for (slot, direction) in CARDINAL_SPOKES {
                self.link(PointId::new(outer, slot), direction, PointId::new(inner, slot));
            }
            if config.diagonal_spokes {
                for (slot, direction) in DIAGONAL_SPOKES {
                    self.link(PointId::new(outer, slot), direction, PointId::new(inner, slot));
                }
            }
        }
    }

    /// Record `to` as lying in `direction` from `from`, and the reverse link
    fn link(&mut self, from: PointId, direction: Direction, to: PointId) {
        let (a, b) = (self.index(from), self.index(to));
        self.points[a].set_neighbor(direction, to);
        self.points[b].set_neighbor(direction.opposite(), from);
    }

    fn index(&self, id: PointId) -> usize {
        id.ring as usize * self.variant.config().slots_per_ring as usize + id.slot as usize
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Check whether the id addresses a point of this board
    pub fn contains(&self, id: PointId) -> bool {
        let config = self.variant.config();
        id.ring < config.rings && id.slot < config.slots_per_ring
    }

    pub fn point(&self, id: PointId) -> Option<&Point> {
        if self.contains(id) {
            self.points.get(self.index(id))
        } else {
            None
        }
    }

    /// Occupant of a point; ids off the board read as empty
    pub fn occupant(&self, id: PointId) -> Occupant {
        self.point(id).map_or(Occupant::Empty, Point::occupant)
    }

    pub fn neighbor(&self, id: PointId, direction: Direction) -> Option<PointId> {
        self.point(id).and_then(|p| p.neighbor(direction))
    }

    pub(crate) fn set_occupant(&mut self, id: PointId, occupant: Occupant) {
        let index = self.index(id);
        self.points[index].set_occupant(occupant);
    }

    /// Move whatever sits on `from` to `to`, leaving `from` empty
    pub(crate) fn move_piece(&mut self, from: PointId, to: PointId) {
        let occupant = self.occupant(from);
        self.set_occupant(from, Occupant::Empty);
        self.set_occupant(to, occupant);
    }

    /// All point ids in arena order
    pub fn point_ids(&self) -> impl Iterator<Item = PointId> {
        let config = self.variant.config();
        let slots = config.slots_per_ring;
        (0..config.rings).flat_map(move |ring| (0..slots).map(move |slot| PointId::new(ring, slot)))
    }

    /// Points holding a piece of the given player
    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = PointId> + '_ {
        self.point_ids()
            .filter(move |id| self.occupant(*id).owner() == Some(player))
    }

    pub fn count(&self, player: Player) -> usize {
        self.pieces_of(player).count()
    }

    pub fn empty_points(&self) -> impl Iterator<Item = PointId> + '_ {
        self.point_ids().filter(move |id| self.occupant(*id).is_empty())
    }

    /// Check that every link has a matching reverse link
    pub fn is_symmetric(&self) -> bool {
        self.point_ids().all(|id| {
            self.point(id).is_some_and(|point| {
                point
                    .neighbors()
                    .all(|(dir, other)| self.neighbor(other, dir.opposite()) == Some(id))
            })
        })
    }

    /// Convert to a JSON-friendly representation keyed by coordinate text
    pub fn to_json_friendly(&self) -> BoardJson {
        BoardJson {
            variant: self.variant,
            points: self
                .point_ids()
                .map(|id| PointJson {
                    coordinate: self
                        .variant
                        .coordinate(id)
                        .map(|c| c.to_string())
                        .unwrap_or_default(),
                    ring: id.ring,
                    slot: id.slot,
                    occupant: self.occupant(id),
                    neighbors: self
                        .point(id)
                        .map(|p| p.neighbors().map(|(dir, _)| dir).collect())
                        .unwrap_or_default(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
impl Board {
    /// Board with the given pieces set directly, bypassing the turn order
    pub(crate) fn with_pieces(variant: Variant, black: &[&str], white: &[&str]) -> Self {
        let mut board = Self::new(variant);
        for (texts, occupant) in [(black, Occupant::Black), (white, Occupant::White)] {
            for text in texts {
                board.set_occupant(variant.parse_point(text).unwrap(), occupant);
            }
        }
        board
    }
}

/// JSON-friendly board representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardJson {
    pub variant: Variant,
    pub points: Vec<PointJson>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointJson {
    pub coordinate: String,
    pub ring: u8,
    pub slot: u8,
    pub occupant: Occupant,
    /// Directions with a link, for drawing the board lines
    pub neighbors: Vec<Direction>,
}
