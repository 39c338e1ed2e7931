//! Mill detection.
//!
//! A mill is found by walking outward from a single point along each axis, so the cost
//! depends on the line length rather than on the size of the board.

use crate::board::Board;
use crate::point::{Axis, Direction, Player, PointId};

/// Pieces in a row needed for a mill
pub const MILL_LENGTH: usize = 3;

impl Board {
    /// Check whether the piece on `id` is part of a mill.
    ///
    /// Empty points are never in a mill.
    pub fn forms_alignment(&self, id: PointId) -> bool {
        let Some(owner) = self.occupant(id).owner() else {
            return false;
        };

        Axis::ALL
            .into_iter()
            .any(|axis| self.run_length(id, owner, axis) == MILL_LENGTH)
    }

    /// Check whether every piece of `player` sits in a mill.
    ///
    /// True when the player has no pieces at all.
    pub fn all_in_mills(&self, player: Player) -> bool {
        self.pieces_of(player).all(|id| self.forms_alignment(id))
    }

    /// Contiguous pieces of `owner` along `axis`, counting `id` itself
    fn run_length(&self, id: PointId, owner: Player, axis: Axis) -> usize {
        1 + axis
            .directions()
            .into_iter()
            .map(|dir| self.walk(id, owner, dir))
            .sum::<usize>()
    }

    /// Steps taken from `id` in one direction while the pieces belong to `owner`
    fn walk(&self, id: PointId, owner: Player, direction: Direction) -> usize {
        let mut steps = 0;
        let mut cursor = id;
        while steps < MILL_LENGTH - 1 {
            match self.neighbor(cursor, direction) {
                Some(next) if self.occupant(next).owner() == Some(owner) => {
                    steps += 1;
                    cursor = next;
                }
                _ => break,
            }
        }
        steps
    }
}
