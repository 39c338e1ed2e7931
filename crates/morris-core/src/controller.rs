//! Match driver.
//!
//! This module contains:
//! - The `Console` trait a front end implements to show the board and collect moves
//! - `Controller`, which runs matches against a console until the players stop
//!
//! The controller never touches the board itself; every move goes through
//! [`GameState::apply_input`], and every rejection is reported back to the console.

use crate::actions::{GameEvent, MoveKind};
use crate::game::GameState;
use crate::point::Player;
use crate::variant::Variant;
use tracing::{debug, info};

/// Message shown after a mill, before the removal prompt
pub const MILL_MESSAGE: &str = "You've formed a mill, enter opponent piece to remove.";

/// Message shown when neither side can move
pub const DRAW_MESSAGE: &str = "Neither side can move, the game is a draw.";

/// One line of player input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    /// The player asked to leave the match
    Quit,
}

/// Front end for a match: renders state and reads moves
pub trait Console {
    fn render_board(&mut self, game: &GameState);

    /// Phase, piece counts and whose turn it is
    fn render_score(&mut self, game: &GameState);

    fn render_message(&mut self, message: &str);

    /// Read the next move of `player`, who owes a move of kind `kind`
    fn read_move(&mut self, player: Player, kind: MoveKind) -> Input;

    /// Announce the result (`None` for a draw) and ask whether to start another match
    fn play_again(&mut self, winner: Option<Player>) -> bool;
}

/// How a single match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Won(Player),
    /// Neither side could move
    Drawn,
    Quit,
}

impl MatchResult {
    /// Winner of a completed match, `Some(None)` for a draw, `None` after a quit
    pub fn outcome(self) -> Option<Option<Player>> {
        match self {
            MatchResult::Won(winner) => Some(Some(winner)),
            MatchResult::Drawn => Some(None),
            MatchResult::Quit => None,
        }
    }
}

/// Runs matches of one variant against a console
pub struct Controller<C> {
    console: C,
    variant: Variant,
}

impl<C: Console> Controller<C> {
    pub fn new(console: C, variant: Variant) -> Self {
        Self { console, variant }
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Play matches until the console declines a rematch or a player quits.
    ///
    /// Returns the winner of every completed match, `None` for a drawn one.
    pub fn play(&mut self) -> Vec<Option<Player>> {
        let mut results = Vec::new();
        while let Some(winner) = self.run_match().outcome() {
            results.push(winner);
            if !self.console.play_again(winner) {
                break;
            }
        }
        results
    }

    /// Play a single match from the empty board
    pub fn run_match(&mut self) -> MatchResult {
        let mut game = GameState::new(self.variant);
        info!(variant = %self.variant, "match started");

        while let Some(kind) = game.expected_move() {
            self.console.render_board(&game);
            self.console.render_score(&game);

            let player = game.current_player();
            let line = match self.console.read_move(player, kind) {
                Input::Line(line) => line,
                Input::Quit => {
                    info!(%player, "player quit");
                    return MatchResult::Quit;
                }
            };

            match game.apply_input(&line) {
                Ok(events) => {
                    if events
                        .iter()
                        .any(|event| matches!(event, GameEvent::MillFormed { .. }))
                        && game.removal_pending()
                    {
                        self.console.render_message(MILL_MESSAGE);
                    }
                    if let Some(blocked) = events.iter().find_map(|event| match event {
                        GameEvent::PlayerBlocked { player } => Some(*player),
                        _ => None,
                    }) {
                        self.console
                            .render_message(&format!("{blocked} cannot move"));
                    }
                }
                Err(err) => {
                    debug!(%player, input = %line, %err, "move rejected");
                    self.console.render_message(&err.to_string());
                }
            }
        }

        self.console.render_board(&game);
        self.console.render_score(&game);

        if let Some(winner) = game.winner() {
            info!(%winner, "match finished");
            self.console.render_message(&format!("{winner} wins!"));
            MatchResult::Won(winner)
        } else {
            info!("match drawn");
            self.console.render_message(DRAW_MESSAGE);
            MatchResult::Drawn
        }
    }
}
