//! Move legality.
//!
//! Each check validates one action kind against the board and reports the specific
//! reason it is illegal. None of them mutate anything; `GameState` applies the action
//! once its check passes.

use crate::board::Board;
use crate::game::GameError;
use crate::point::{Direction, Player, PointId};

fn ensure_on_board(board: &Board, id: PointId) -> Result<(), GameError> {
    if board.contains(id) {
        Ok(())
    } else {
        Err(GameError::InvalidCoordinate)
    }
}

fn ensure_own_piece(board: &Board, player: Player, id: PointId) -> Result<(), GameError> {
    ensure_on_board(board, id)?;
    if board.occupant(id).owner() == Some(player) {
        Ok(())
    } else {
        Err(GameError::NotOwnPiece)
    }
}

fn ensure_empty(board: &Board, id: PointId) -> Result<(), GameError> {
    ensure_on_board(board, id)?;
    if board.occupant(id).is_empty() {
        Ok(())
    } else {
        Err(GameError::OccupiedTarget)
    }
}

/// A new piece may go on any empty point
pub fn check_place(board: &Board, at: PointId) -> Result<(), GameError> {
    ensure_empty(board, at)
}

/// Validate a slide and return the destination point
pub fn check_slide(
    board: &Board,
    player: Player,
    from: PointId,
    direction: Direction,
) -> Result<PointId, GameError> {
    ensure_own_piece(board, player, from)?;

    if !board.variant().allows(direction) {
        return Err(GameError::InvalidDirection);
    }

    let to = board
        .neighbor(from, direction)
        .ok_or(GameError::NoSuchNeighbor)?;
    ensure_empty(board, to)?;
    Ok(to)
}

/// A flying piece may land on any empty point
pub fn check_fly(board: &Board, player: Player, from: PointId, to: PointId) -> Result<(), GameError> {
    ensure_own_piece(board, player, from)?;
    ensure_empty(board, to)
}

/// Validate removal of `target` by `remover` after a mill.
///
/// A piece inside a mill is protected while the opponent still has any piece outside one.
pub fn check_removal(board: &Board, remover: Player, target: PointId) -> Result<(), GameError> {
    ensure_on_board(board, target)?;

    match board.occupant(target).owner() {
        None => Err(GameError::EmptyRemovalTarget),
        Some(owner) if owner == remover => Err(GameError::OwnPieceRemoval),
        Some(owner) => {
            if board.forms_alignment(target) && !board.all_in_mills(owner) {
                Err(GameError::ProtectedMillPiece)
            } else {
                Ok(())
            }
        }
    }
}

/// Points `player` may remove right now
pub fn removable_pieces(board: &Board, player: Player) -> Vec<PointId> {
    board
        .pieces_of(player.opponent())
        .filter(|id| check_removal(board, player, *id).is_ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::Variant;

    fn p(text: &str) -> PointId {
        Variant::Nine.parse_point(text).unwrap()
    }

    #[test]
    fn test_place_requires_empty_point() {
        let board = Board::with_pieces(Variant::Nine, &["a1"], &[]);
        assert_eq!(check_place(&board, p("a1")), Err(GameError::OccupiedTarget));
        assert_eq!(check_place(&board, p("a4")), Ok(()));
        assert_eq!(
            check_place(&board, PointId::new(5, 0)),
            Err(GameError::InvalidCoordinate)
        );
    }

    #[test]
    fn test_slide_rules() {
        let board = Board::with_pieces(Variant::Nine, &["a1", "d1"], &["a4"]);

        assert_eq!(
            check_slide(&board, Player::White, p("a1"), Direction::East),
            Err(GameError::NotOwnPiece)
        );
        assert_eq!(
            check_slide(&board, Player::Black, p("g1"), Direction::North),
            Err(GameError::NotOwnPiece)
        );
        assert_eq!(
            check_slide(&board, Player::Black, p("a1"), Direction::South),
            Err(GameError::NoSuchNeighbor)
        );
        assert_eq!(
            check_slide(&board, Player::Black, p("a1"), Direction::North),
            Err(GameError::OccupiedTarget)
        );
        assert_eq!(
            check_slide(&board, Player::Black, p("a1"), Direction::East),
            Err(GameError::OccupiedTarget)
        );
        assert_eq!(
            check_slide(&board, Player::Black, p("d1"), Direction::North),
            Ok(p("d2"))
        );
        assert_eq!(
            check_slide(&board, Player::Black, p("a1"), Direction::NorthEast),
            Err(GameError::InvalidDirection)
        );
    }

    #[test]
    fn test_twelve_diagonal_slide() {
        let board = Board::with_pieces(Variant::Twelve, &["a1"], &[]);
        let a1 = Variant::Twelve.parse_point("a1").unwrap();
        let b2 = Variant::Twelve.parse_point("b2").unwrap();
        assert_eq!(
            check_slide(&board, Player::Black, a1, Direction::NorthEast),
            Ok(b2)
        );
    }

    #[test]
    fn test_fly_rules() {
        let board = Board::with_pieces(Variant::Nine, &["a1"], &["g7"]);
        assert_eq!(check_fly(&board, Player::Black, p("a1"), p("c5")), Ok(()));
        assert_eq!(
            check_fly(&board, Player::Black, p("a1"), p("g7")),
            Err(GameError::OccupiedTarget)
        );
        assert_eq!(
            check_fly(&board, Player::Black, p("a1"), p("a1")),
            Err(GameError::OccupiedTarget)
        );
        assert_eq!(
            check_fly(&board, Player::Black, p("g7"), p("c5")),
            Err(GameError::NotOwnPiece)
        );
    }

    #[test]
    fn test_removal_rules() {
        let board = Board::with_pieces(Variant::Nine, &["a1"], &["a7", "d7", "g7", "b4"]);

        assert_eq!(
            check_removal(&board, Player::Black, p("c3")),
            Err(GameError::EmptyRemovalTarget)
        );
        assert_eq!(
            check_removal(&board, Player::Black, p("a1")),
            Err(GameError::OwnPieceRemoval)
        );
        assert_eq!(
            check_removal(&board, Player::Black, p("d7")),
            Err(GameError::ProtectedMillPiece)
        );
        assert_eq!(check_removal(&board, Player::Black, p("b4")), Ok(()));
        assert_eq!(removable_pieces(&board, Player::Black), vec![p("b4")]);
    }

    #[test]
    fn test_mill_pieces_removable_when_nothing_else_is() {
        let board = Board::with_pieces(Variant::Nine, &["a1"], &["a7", "d7", "g7"]);
        assert_eq!(check_removal(&board, Player::Black, p("d7")), Ok(()));
        assert_eq!(removable_pieces(&board, Player::Black).len(), 3);
    }
}
