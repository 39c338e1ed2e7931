//! Core game state machine.
//!
//! This module contains the main `GameState` struct: piece accounting, the
//! Placement -> Sliding -> Flying phase progression, turn alternation, mill-triggered
//! removals and the end-of-game conditions.

use crate::actions::{GameAction, GameEvent, MoveKind};
use crate::board::{Board, BoardJson};
use crate::point::{Occupant, Player, PointId};
use crate::rules;
use crate::variant::Variant;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// A side reduced to this many pieces may fly
pub const FLYING_PIECE_COUNT: u8 = 3;

/// A side left with this many pieces, counting those still to be placed, loses
pub const LOSING_PIECE_COUNT: u8 = 2;

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Both sides place their starting pieces
    Placement,
    /// Pieces slide to adjacent empty points
    Sliding,
    /// A side with three pieces flies; the other keeps sliding
    Flying,
    /// Game is over. No winner means neither side could move.
    Finished { winner: Option<Player> },
}

impl GamePhase {
    /// Phase number shown on the score panel (1-3)
    pub fn number(&self) -> Option<u8> {
        match self {
            GamePhase::Placement => Some(1),
            GamePhase::Sliding => Some(2),
            GamePhase::Flying => Some(3),
            GamePhase::Finished { .. } => None,
        }
    }
}

/// Errors that can occur when applying actions.
///
/// Every variant is recoverable: the player is told what went wrong and asked again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoordinate,

    #[error("That location is already occupied")]
    OccupiedTarget,

    #[error("Invalid direction")]
    InvalidDirection,

    #[error("Impossible to move in that direction")]
    NoSuchNeighbor,

    #[error("Please move your own piece")]
    NotOwnPiece,

    #[error("You tried clearing an empty position")]
    EmptyRemovalTarget,

    #[error("You tried removing your own piece")]
    OwnPieceRemoval,

    #[error("It is possible to remove a piece not in a mill; do so")]
    ProtectedMillPiece,

    #[error("Not your turn")]
    NotYourTurn,

    #[error("Invalid action for current phase")]
    InvalidPhase,

    #[error("You formed a mill; remove an opponent piece first")]
    RemovalRequired,

    #[error("Game is over")]
    GameOver,
}

/// Piece accounting for one side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Side {
    /// Pieces currently on the board
    pub pieces: u8,
    /// Pieces placed so far during the opening
    pub placed: u8,
}

/// The complete game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    board: Board,
    variant: Variant,
    current_player: Player,
    phase: GamePhase,
    sides: [Side; 2],
    total_placed: u8,
    /// The current player formed a mill and still has to remove a piece
    removal_pending: bool,
}

impl GameState {
    /// Create a new match. Black moves first.
    pub fn new(variant: Variant) -> Self {
        Self {
            board: Board::new(variant),
            variant,
            current_player: Player::Black,
            phase: GamePhase::Placement,
            sides: [Side::default(); 2],
            total_placed: 0,
            removal_pending: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn side(&self, player: Player) -> Side {
        self.sides[player.index()]
    }

    fn side_mut(&mut self, player: Player) -> &mut Side {
        &mut self.sides[player.index()]
    }

    /// Pieces `player` has on the board
    pub fn pieces(&self, player: Player) -> u8 {
        self.side(player).pieces
    }

    /// Placements made by both sides so far
    pub fn total_placed(&self) -> u8 {
        self.total_placed
    }

    /// Opening placements `player` still has to make
    pub fn placements_left(&self, player: Player) -> u8 {
        self.variant
            .pieces_per_side()
            .saturating_sub(self.side(player).placed)
    }

    /// Pieces on the board plus those still to be placed
    pub fn remaining(&self, player: Player) -> u8 {
        self.pieces(player) + self.placements_left(player)
    }

    pub fn removal_pending(&self) -> bool {
        self.removal_pending
    }

    /// Check if the game is finished
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, GamePhase::Finished { .. })
    }

    /// Get the winner if the game is finished with one
    pub fn winner(&self) -> Option<Player> {
        match self.phase {
            GamePhase::Finished { winner } => winner,
            _ => None,
        }
    }

    /// Check if the game ended without a winner
    pub fn is_draw(&self) -> bool {
        self.phase == GamePhase::Finished { winner: None }
    }

    /// Resolve coordinate text against this game's board
    pub fn resolve(&self, text: &str) -> Option<PointId> {
        self.variant.parse_point(text).ok()
    }

    /// The kind of input the current player owes, or `None` once the game is over
    pub fn expected_move(&self) -> Option<MoveKind> {
        if self.removal_pending {
            return Some(MoveKind::Remove);
        }
        self.stage_move(self.current_player)
    }

    /// The move `player` would make on their turn in the current phase
    fn stage_move(&self, player: Player) -> Option<MoveKind> {
        match self.phase {
            GamePhase::Placement => Some(MoveKind::Place),
            GamePhase::Sliding => Some(MoveKind::Slide),
            GamePhase::Flying if self.pieces(player) == FLYING_PIECE_COUNT => Some(MoveKind::Fly),
            GamePhase::Flying => Some(MoveKind::Slide),
            GamePhase::Finished { .. } => None,
        }
    }

    /// Get all currently legal actions for a player
    pub fn legal_actions(&self, player: Player) -> Vec<GameAction> {
        if player != self.current_player {
            return Vec::new();
        }
        match self.expected_move() {
            Some(kind) => self.actions_of_kind(player, kind),
            None => Vec::new(),
        }
    }

    /// Whether `player` could move if it were their turn
    fn can_move(&self, player: Player) -> bool {
        self.stage_move(player)
            .is_some_and(|kind| !self.actions_of_kind(player, kind).is_empty())
    }

    fn actions_of_kind(&self, player: Player, kind: MoveKind) -> Vec<GameAction> {
        let board = &self.board;
        match kind {
            MoveKind::Place => board.empty_points().map(GameAction::Place).collect(),
            MoveKind::Slide => board
                .pieces_of(player)
                .flat_map(|from| {
                    self.variant
                        .config()
                        .directions
                        .iter()
                        .filter(move |dir| rules::check_slide(board, player, from, **dir).is_ok())
                        .map(move |dir| GameAction::Slide {
                            from,
                            direction: *dir,
                        })
                })
                .collect(),
            MoveKind::Fly => board
                .pieces_of(player)
                .flat_map(|from| board.empty_points().map(move |to| GameAction::Fly { from, to }))
                .collect(),
            MoveKind::Remove => rules::removable_pieces(board, player)
                .into_iter()
                .map(GameAction::Remove)
                .collect(),
        }
    }

    /// Parse move text for the current stage and apply it for the current player
    pub fn apply_input(&mut self, input: &str) -> Result<Vec<GameEvent>, GameError> {
        let kind = self.expected_move().ok_or(GameError::GameOver)?;
        let action = GameAction::parse(input, kind, self.variant)?;
        self.apply_action(self.current_player, action)
    }

    /// Apply an action to the game state
    pub fn apply_action(
        &mut self,
        player: Player,
        action: GameAction,
    ) -> Result<Vec<GameEvent>, GameError> {
        let expected = self.expected_move().ok_or(GameError::GameOver)?;
        if player != self.current_player {
            return Err(GameError::NotYourTurn);
        }
        if action.kind() != expected {
            return Err(if expected == MoveKind::Remove {
                GameError::RemovalRequired
            } else {
                GameError::InvalidPhase
            });
        }

        let mut events = Vec::new();

        match action {
            GameAction::Place(at) => {
                rules::check_place(&self.board, at)?;

                self.board.set_occupant(at, player.into());
                let side = self.side_mut(player);
                side.pieces += 1;
                side.placed += 1;
                self.total_placed += 1;
                debug!(%player, ?at, total = self.total_placed, "piece placed");

                events.push(GameEvent::PiecePlaced { player, at });
                self.after_move(player, at, &mut events);
            }

            GameAction::Slide { from, direction } => {
                let to = rules::check_slide(&self.board, player, from, direction)?;

                self.board.move_piece(from, to);
                debug!(%player, ?from, ?to, "piece slid");

                events.push(GameEvent::PieceSlid { player, from, to });
                self.after_move(player, to, &mut events);
            }

            GameAction::Fly { from, to } => {
                rules::check_fly(&self.board, player, from, to)?;

                self.board.move_piece(from, to);
                debug!(%player, ?from, ?to, "piece flew");

                events.push(GameEvent::PieceFlew { player, from, to });
                self.after_move(player, to, &mut events);
            }

            GameAction::Remove(at) => {
                rules::check_removal(&self.board, player, at)?;

                let victim = player.opponent();
                self.board.set_occupant(at, Occupant::Empty);
                self.side_mut(victim).pieces -= 1;
                self.removal_pending = false;
                info!(%player, %victim, ?at, left = self.remaining(victim), "piece removed");

                events.push(GameEvent::PieceRemoved { player, victim, at });
                if self.remaining(victim) <= LOSING_PIECE_COUNT {
                    self.finish(Some(player), &mut events);
                } else {
                    self.end_turn(&mut events);
                }
            }
        }

        Ok(events)
    }

    // ==================== Helper Methods ====================

    /// Either hand the turn over or, after a mill, keep it for the removal
    fn after_move(&mut self, player: Player, at: PointId, events: &mut Vec<GameEvent>) {
        if !self.board.forms_alignment(at) {
            self.end_turn(events);
            return;
        }

        info!(%player, ?at, "mill formed");
        events.push(GameEvent::MillFormed { player, at });

        if rules::removable_pieces(&self.board, player).is_empty() {
            // Nothing on the board to take
            self.end_turn(events);
        } else {
            self.removal_pending = true;
        }
    }

    fn end_turn(&mut self, events: &mut Vec<GameEvent>) {
        match self.phase {
            GamePhase::Placement if self.total_placed >= self.variant.total_placements() => {
                let next = if self.variant.config().sliding_phase && !self.any_side_can_fly() {
                    GamePhase::Sliding
                } else {
                    GamePhase::Flying
                };
                self.change_phase(next, events);
            }
            GamePhase::Sliding if self.any_side_can_fly() => {
                self.change_phase(GamePhase::Flying, events);
            }
            _ => {}
        }

        let player = self.current_player;
        self.current_player = player.opponent();
        events.push(GameEvent::TurnEnded {
            player,
            next_player: self.current_player,
        });

        let next = self.current_player;
        if matches!(self.phase, GamePhase::Sliding | GamePhase::Flying) && !self.can_move(next) {
            info!(player = %next, "no legal move");
            events.push(GameEvent::PlayerBlocked { player: next });

            // A board where neither side can move is drawn
            let winner = self.can_move(player).then_some(player);
            self.finish(winner, events);
        }
    }

    fn any_side_can_fly(&self) -> bool {
        Player::ALL
            .iter()
            .any(|p| self.pieces(*p) == FLYING_PIECE_COUNT)
    }

    fn change_phase(&mut self, phase: GamePhase, events: &mut Vec<GameEvent>) {
        debug!(from = ?self.phase, to = ?phase, "phase changed");
        self.phase = phase;
        events.push(GameEvent::PhaseChanged { phase });
    }

    fn finish(&mut self, winner: Option<Player>, events: &mut Vec<GameEvent>) {
        info!(?winner, "game over");
        self.phase = GamePhase::Finished { winner };
        self.removal_pending = false;
        events.push(GameEvent::GameOver { winner });
    }

    /// Convert to a JSON-friendly snapshot for display collaborators
    pub fn to_json(&self) -> GameStateJson {
        GameStateJson {
            variant: self.variant,
            phase: self.phase,
            current_player: self.current_player,
            expected_move: self.expected_move(),
            black_pieces: self.pieces(Player::Black),
            white_pieces: self.pieces(Player::White),
            total_placed: self.total_placed,
            board: self.board.to_json_friendly(),
        }
    }

    /// The JSON snapshot as a string
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(&self.to_json()).unwrap_or_else(|_| "{}".to_string())
    }
}

/// JSON-friendly view of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStateJson {
    pub variant: Variant,
    pub phase: GamePhase,
    pub current_player: Player,
    pub expected_move: Option<MoveKind>,
    pub black_pieces: u8,
    pub white_pieces: u8,
    pub total_placed: u8,
    pub board: BoardJson,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Direction;
    use pretty_assertions::assert_eq;

    /// Build a mid-game position directly, bypassing the opening
    fn position(
        variant: Variant,
        phase: GamePhase,
        black: &[&str],
        white: &[&str],
    ) -> GameState {
        let mut game = GameState::new(variant);
        for (player, points) in [(Player::Black, black), (Player::White, white)] {
            for text in points {
                let id = variant.parse_point(text).unwrap();
                game.board.set_occupant(id, Occupant::from(player));
            }
            let side = game.side_mut(player);
            side.pieces = points.len() as u8;
            side.placed = if phase == GamePhase::Placement {
                points.len() as u8
            } else {
                variant.pieces_per_side()
            };
        }
        game.total_placed = game.sides.iter().map(|s| s.placed).sum();
        game.phase = phase;
        game
    }

    fn play(game: &mut GameState, moves: &[&str]) {
        for text in moves {
            game.apply_input(text)
                .unwrap_or_else(|e| panic!("move {text} rejected: {e}"));
        }
    }

    fn at(game: &GameState, text: &str) -> PointId {
        game.resolve(text).unwrap()
    }

    #[test]
    fn test_new_game_starts_in_placement() {
        let game = GameState::new(Variant::Nine);
        assert_eq!(game.phase(), GamePhase::Placement);
        assert_eq!(game.current_player(), Player::Black);
        assert_eq!(game.expected_move(), Some(MoveKind::Place));
        assert_eq!(game.legal_actions(Player::Black).len(), 24);
        assert!(game.legal_actions(Player::White).is_empty());
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = GameState::new(Variant::Nine);
        let events = game.apply_input("a1").unwrap();
        assert_eq!(
            events,
            vec![
                GameEvent::PiecePlaced {
                    player: Player::Black,
                    at: at(&game, "a1"),
                },
                GameEvent::TurnEnded {
                    player: Player::Black,
                    next_player: Player::White,
                },
            ]
        );
        assert_eq!(game.current_player(), Player::White);
        assert_eq!(
            game.apply_action(Player::Black, GameAction::Place(at(&game, "a4"))),
            Err(GameError::NotYourTurn)
        );
    }

    #[test]
    fn test_rejected_placement_changes_nothing() {
        let mut game = GameState::new(Variant::Nine);
        play(&mut game, &["a1"]);
        let before = game.clone();

        assert_eq!(game.apply_input("a1"), Err(GameError::OccupiedTarget));
        assert_eq!(game.apply_input("d4"), Err(GameError::InvalidCoordinate));
        assert_eq!(game, before);
    }

    #[test]
    fn test_wrong_action_kind() {
        let mut game = GameState::new(Variant::Nine);
        let a1 = at(&game, "a1");
        assert_eq!(
            game.apply_action(
                Player::Black,
                GameAction::Slide {
                    from: a1,
                    direction: Direction::North,
                }
            ),
            Err(GameError::InvalidPhase)
        );
    }

    #[test]
    fn test_mill_keeps_the_turn_until_removal() {
        let mut game = GameState::new(Variant::Nine);
        play(&mut game, &["d1", "d7", "d2", "g4"]);

        let events = game.apply_input("d3").unwrap();
        assert!(events.contains(&GameEvent::MillFormed {
            player: Player::Black,
            at: at(&game, "d3"),
        }));
        assert!(game.removal_pending());
        assert_eq!(game.current_player(), Player::Black);
        assert_eq!(game.expected_move(), Some(MoveKind::Remove));

        let a1 = at(&game, "a1");
        assert_eq!(
            game.apply_action(Player::Black, GameAction::Place(a1)),
            Err(GameError::RemovalRequired)
        );
        assert_eq!(game.apply_input("a1"), Err(GameError::EmptyRemovalTarget));
        assert_eq!(game.apply_input("d2"), Err(GameError::OwnPieceRemoval));

        game.apply_input("g4").unwrap();
        assert!(!game.removal_pending());
        assert_eq!(game.pieces(Player::White), 1);
        assert_eq!(game.current_player(), Player::White);
    }

    #[test]
    fn test_mill_protection() {
        let mut game = position(
            Variant::Nine,
            GamePhase::Sliding,
            &["a1", "d1", "g4", "b6"],
            &["a7", "d7", "g7", "b4"],
        );
        // g4 -> g1 completes a1-d1-g1
        game.apply_input("g4s").unwrap();
        assert!(game.removal_pending());

        assert_eq!(game.apply_input("d7"), Err(GameError::ProtectedMillPiece));
        game.apply_input("b4").unwrap();
        assert_eq!(game.pieces(Player::White), 3);
    }

    #[test]
    fn test_mill_piece_removable_when_all_protected() {
        let mut game = position(
            Variant::Nine,
            GamePhase::Sliding,
            &["a1", "d1", "g4", "b6"],
            &["a7", "d7", "g7"],
        );
        game.apply_input("g4s").unwrap();
        game.apply_input("d7").unwrap();
        assert_eq!(game.winner(), Some(Player::Black));
    }

    #[test]
    fn test_dropping_to_two_pieces_loses() {
        let mut game = position(
            Variant::Nine,
            GamePhase::Flying,
            &["a1", "d1", "g4", "b6"],
            &["a7", "f4", "c5"],
        );
        game.apply_input("g4s").unwrap();
        let events = game.apply_input("a7").unwrap();

        assert_eq!(game.winner(), Some(Player::Black));
        assert_eq!(
            game.phase(),
            GamePhase::Finished {
                winner: Some(Player::Black),
            }
        );
        assert!(events.contains(&GameEvent::GameOver {
            winner: Some(Player::Black),
        }));
        assert_eq!(game.expected_move(), None);
        assert_eq!(game.apply_input("a1n"), Err(GameError::GameOver));
    }

    #[test]
    fn test_unplaced_pieces_count_towards_remaining() {
        let mut game = position(
            Variant::Nine,
            GamePhase::Placement,
            &["a1", "d1"],
            &["a7", "d7", "b4"],
        );
        play(&mut game, &["g1", "b4"]);

        assert_eq!(game.pieces(Player::White), 2);
        assert_eq!(game.remaining(Player::White), 8);
        assert_eq!(game.winner(), None);
        assert_eq!(game.current_player(), Player::White);
    }

    #[test]
    fn test_sliding_enters_flying_at_three_pieces() {
        let mut game = position(
            Variant::Nine,
            GamePhase::Sliding,
            &["a1", "d1", "g4", "b6"],
            &["a7", "f4", "c5", "e3"],
        );
        let events = game.apply_input("g4s").unwrap();
        assert!(events.contains(&GameEvent::MillFormed {
            player: Player::Black,
            at: at(&game, "g1"),
        }));
        let events = game.apply_input("e3").unwrap();
        assert!(events.contains(&GameEvent::PhaseChanged {
            phase: GamePhase::Flying,
        }));

        // White has three pieces and flies, Black with four still slides
        assert_eq!(game.current_player(), Player::White);
        assert_eq!(game.expected_move(), Some(MoveKind::Fly));
        play(&mut game, &["a7e3"]);
        assert_eq!(game.expected_move(), Some(MoveKind::Slide));
    }

    #[test]
    fn test_fly_to_distant_point() {
        let mut game = position(
            Variant::Nine,
            GamePhase::Flying,
            &["a1", "d1", "b6"],
            &["a7", "d7", "f4", "c5"],
        );
        let a1 = at(&game, "a1");
        let g7 = at(&game, "g7");
        let e3 = at(&game, "e3");
        assert_eq!(
            game.apply_action(Player::Black, GameAction::Fly { from: a1, to: e3 }),
            Ok(vec![
                GameEvent::PieceFlew {
                    player: Player::Black,
                    from: a1,
                    to: e3,
                },
                GameEvent::TurnEnded {
                    player: Player::Black,
                    next_player: Player::White,
                },
            ])
        );
        assert_eq!(game.board().occupant(a1), Occupant::Empty);
        assert_eq!(game.board().occupant(e3), Occupant::Black);

        // White still has four and must slide
        assert_eq!(
            game.apply_action(
                Player::White,
                GameAction::Fly {
                    from: at(&game, "d7"),
                    to: g7,
                }
            ),
            Err(GameError::InvalidPhase)
        );
    }

    #[test]
    fn test_blocked_player_loses() {
        // Every White piece is hemmed in once g4 is taken
        let mut game = position(
            Variant::Nine,
            GamePhase::Sliding,
            &["a4", "d6", "b4", "g1"],
            &["a7", "d7", "g7", "b6"],
        );
        let events = game.apply_input("g1n").unwrap();

        assert!(events.contains(&GameEvent::PlayerBlocked {
            player: Player::White,
        }));
        assert_eq!(game.winner(), Some(Player::Black));
        assert!(game.legal_actions(Player::White).is_empty());
    }

    /// Fills the Twelve board with no mill: colours alternate around every ring and along
    /// every spoke
    const FULL_TWELVE_BOARD: [&str; 24] = [
        "d7", "g7", "g4", "g1", "d1", "a1", "a4", "a7", //
        "f6", "d6", "f2", "f4", "b2", "d2", "b6", "b4", //
        "d5", "e5", "e4", "e3", "d3", "c3", "c4", "c5",
    ];

    #[test]
    fn test_full_board_is_a_draw() {
        let mut game = GameState::new(Variant::Twelve);
        play(&mut game, &FULL_TWELVE_BOARD[..23]);
        assert_eq!(game.phase(), GamePhase::Placement);

        let events = game.apply_input(FULL_TWELVE_BOARD[23]).unwrap();
        assert_eq!(game.board().empty_points().count(), 0);
        assert_eq!(
            &events[events.len() - 2..],
            [
                GameEvent::PlayerBlocked {
                    player: Player::Black,
                },
                GameEvent::GameOver { winner: None },
            ]
        );
        assert!(game.is_draw());
        assert_eq!(game.winner(), None);
        assert_eq!(game.expected_move(), None);
    }

    #[test]
    fn test_three_player_variant_flies_after_placement() {
        let mut game = GameState::new(Variant::Three);
        play(&mut game, &["a1", "b1", "c2", "a2", "b3"]);
        let events = game.apply_input("c1").unwrap();
        assert!(events.contains(&GameEvent::PhaseChanged {
            phase: GamePhase::Flying,
        }));
        assert_eq!(game.phase(), GamePhase::Flying);
        assert_eq!(game.expected_move(), Some(MoveKind::Fly));
    }

    #[test]
    fn test_unreachable_three_pieces_loses_during_placement() {
        let mut game = GameState::new(Variant::Three);
        play(&mut game, &["a1", "a2", "b1", "b2", "c1"]);
        assert!(game.removal_pending());

        let events = game.apply_input("a2").unwrap();
        // White holds one piece with one placement left
        assert_eq!(game.winner(), Some(Player::Black));
        assert!(events.contains(&GameEvent::GameOver {
            winner: Some(Player::Black),
        }));
    }

    #[test]
    fn test_json_snapshot() {
        let mut game = GameState::new(Variant::Nine);
        play(&mut game, &["a1"]);

        let json: serde_json::Value = serde_json::from_str(&game.to_json_string()).unwrap();
        assert_eq!(json["black_pieces"], 1);
        assert_eq!(json["current_player"], "White");
        assert_eq!(json["phase"], "Placement");
        assert_eq!(json["board"]["points"].as_array().unwrap().len(), 24);
    }
}
