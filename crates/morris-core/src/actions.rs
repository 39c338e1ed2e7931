//! Game actions that players can take.
//!
//! This module defines all possible actions in the game, the move-text syntax that
//! produces them, and the events that result from applying them.

use crate::game::{GameError, GamePhase};
use crate::point::{Direction, Player, PointId};
use crate::variant::Variant;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kind of input the current stage of a turn expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Put a new piece on an empty point: `a1`
    Place,
    /// Move a piece to an adjacent empty point: `a1n`, `g7sw`
    Slide,
    /// Move a piece to any empty point: `a1g7`
    Fly,
    /// Take an opponent piece after forming a mill: `d7`
    Remove,
}

impl MoveKind {
    /// Short description for prompts
    pub fn hint(self) -> &'static str {
        match self {
            MoveKind::Place => "place a piece, e.g. a1",
            MoveKind::Slide => "slide a piece, e.g. a1n",
            MoveKind::Fly => "fly a piece, e.g. a1g7",
            MoveKind::Remove => "remove an opponent piece, e.g. d7",
        }
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveKind::Place => "place",
            MoveKind::Slide => "slide",
            MoveKind::Fly => "fly",
            MoveKind::Remove => "remove",
        };
        f.write_str(name)
    }
}

/// All possible actions a player can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    /// Place a new piece during the opening
    Place(PointId),
    /// Slide a piece along a line to the neighboring point
    Slide { from: PointId, direction: Direction },
    /// Fly a piece to any empty point (only with three pieces left)
    Fly { from: PointId, to: PointId },
    /// Remove an opponent piece after forming a mill
    Remove(PointId),
}

impl GameAction {
    pub fn kind(&self) -> MoveKind {
        match self {
            GameAction::Place(_) => MoveKind::Place,
            GameAction::Slide { .. } => MoveKind::Slide,
            GameAction::Fly { .. } => MoveKind::Fly,
            GameAction::Remove(_) => MoveKind::Remove,
        }
    }

    /// Parse move text of the given kind.
    ///
    /// Coordinates are checked before directions, so `d4x` reports a bad coordinate
    /// on the Nine board rather than a bad direction.
    pub fn parse(input: &str, kind: MoveKind, variant: Variant) -> Result<GameAction, GameError> {
        let text = input.trim().to_ascii_lowercase();

        match kind {
            MoveKind::Place => Ok(GameAction::Place(variant.parse_point(&text)?)),
            MoveKind::Remove => Ok(GameAction::Remove(variant.parse_point(&text)?)),
            MoveKind::Slide => {
                let (coord, token) = split_coordinate(&text)?;
                let from = variant.parse_point(coord)?;
                let direction = Direction::from_token(token)
                    .filter(|dir| variant.allows(*dir))
                    .ok_or(GameError::InvalidDirection)?;
                Ok(GameAction::Slide { from, direction })
            }
            MoveKind::Fly => {
                let (source, destination) = split_coordinate(&text)?;
                let from = variant.parse_point(source)?;
                let to = variant.parse_point(destination)?;
                Ok(GameAction::Fly { from, to })
            }
        }
    }
}

/// Split off the leading two-character coordinate
fn split_coordinate(text: &str) -> Result<(&str, &str), GameError> {
    match (text.get(..2), text.get(2..)) {
        (Some(head), Some(tail)) => Ok((head, tail)),
        _ => Err(GameError::InvalidCoordinate),
    }
}

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A piece was placed during the opening
    PiecePlaced { player: Player, at: PointId },

    /// A piece slid to an adjacent point
    PieceSlid {
        player: Player,
        from: PointId,
        to: PointId,
    },

    /// A piece flew to an arbitrary empty point
    PieceFlew {
        player: Player,
        from: PointId,
        to: PointId,
    },

    /// The piece on `at` completed a mill; `player` must now remove an opponent piece
    MillFormed { player: Player, at: PointId },

    /// `player` removed a piece belonging to `victim`
    PieceRemoved {
        player: Player,
        victim: Player,
        at: PointId,
    },

    /// The game moved to a new phase
    PhaseChanged { phase: GamePhase },

    /// Turn ended
    TurnEnded { player: Player, next_player: Player },

    /// The player to move has no legal move
    PlayerBlocked { player: Player },

    /// The match is over; no winner means a draw
    GameOver { winner: Option<Player> },
}
