//! Line-based terminal console.
//!
//! Draws the board as ASCII art from the board graph itself, so every variant renders
//! without a hand-drawn template. Input is read one line at a time.

use morris_core::{Console, Direction, GamePhase, GameState, Input, Layout, MoveKind, Occupant, Player};
use std::io::{BufRead, Write};
use tracing::warn;

const HELP: &str = "\
Moves:
  place    a1       put a piece on a1
  slide    a1n      move the piece on a1 north (n, s, e, w; ne, nw, se, sw on the twelve board)
  fly      a1g7     move the piece on a1 to g7 (only with three pieces left)
  remove   d7       take the opponent piece on d7 after forming a mill
Commands:
  ?        show this help
  q        quit (asks for confirmation)";

/// Console over any line reader and writer
pub struct TerminalConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn emit(&mut self, text: &str) {
        if let Err(err) = writeln!(self.output, "{text}").and_then(|_| self.output.flush()) {
            warn!(%err, "failed to write to terminal");
        }
    }

    fn prompt(&mut self, text: &str) {
        if let Err(err) = write!(self.output, "{text}").and_then(|_| self.output.flush()) {
            warn!(%err, "failed to write to terminal");
        }
    }

    /// Next input line without its line ending, or `None` at end of input
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(err) => {
                warn!(%err, "failed to read from terminal");
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> Console for TerminalConsole<R, W> {
    fn render_board(&mut self, game: &GameState) {
        let art = draw_board(game);
        self.emit(&art);
    }

    fn render_score(&mut self, game: &GameState) {
        let panel = score_panel(game);
        self.emit(&panel);
    }

    fn render_message(&mut self, message: &str) {
        self.emit(message);
    }

    fn read_move(&mut self, player: Player, kind: MoveKind) -> Input {
        loop {
            self.prompt(&format!("{player}, {}: ", kind.hint()));
            let Some(line) = self.read_line() else {
                return Input::Quit;
            };

            match line.as_str() {
                "?" => self.emit(HELP),
                "q" | "Q" => {
                    self.prompt("Press q again to quit: ");
                    match self.read_line().as_deref() {
                        None | Some("q") | Some("Q") => return Input::Quit,
                        Some(_) => continue,
                    }
                }
                _ => return Input::Line(line),
            }
        }
    }

    fn play_again(&mut self, winner: Option<Player>) -> bool {
        let result = match winner {
            Some(winner) => format!("{winner} wins!"),
            None => "Draw!".to_string(),
        };
        self.prompt(&format!("{result} Play again? (y/n) "));
        self.read_line()
            .is_some_and(|answer| answer.to_ascii_lowercase().starts_with('y'))
    }
}

/// Canvas cells between two neighboring coordinates, as (rows, columns)
fn cell_size(layout: Layout) -> (usize, usize) {
    match layout {
        Layout::Grid => (2, 4),
        Layout::Rings => (2, 3),
    }
}

fn occupant_char(occupant: Occupant) -> char {
    match occupant {
        Occupant::Empty => '.',
        occupied => occupied.symbol(),
    }
}

/// Draw the board: points, the lines between them, and the coordinate legend
pub fn draw_board(game: &GameState) -> String {
    let variant = game.variant();
    let config = variant.config();
    let board = game.board();
    let (dy, dx) = cell_size(config.layout);

    let height = (usize::from(config.rows) - 1) * dy + 1;
    let width = (usize::from(config.columns) - 1) * dx + 1;
    let mut canvas = vec![vec![' '; width]; height];

    let position = |id| {
        variant.coordinate(id).map(|coord| {
            (
                (usize::from(config.rows) - usize::from(coord.row())) * dy,
                usize::from(coord.column()) * dx,
            )
        })
    };

    for id in board.point_ids() {
        let Some((y, x)) = position(id) else {
            continue;
        };

        // Only draw each link from one end
        for dir in [Direction::East, Direction::North, Direction::NorthEast, Direction::NorthWest] {
            let Some((ty, tx)) = board.neighbor(id, dir).and_then(position) else {
                continue;
            };
            match dir {
                Direction::East => (x + 1..tx).for_each(|cx| canvas[y][cx] = '-'),
                Direction::North => (ty + 1..y).for_each(|cy| canvas[cy][x] = '|'),
                _ => {
                    let steps = y - ty;
                    for step in 1..steps {
                        let offset = (tx.abs_diff(x) * step + steps / 2) / steps;
                        let cx = if tx > x { x + offset } else { x - offset };
                        canvas[y - step][cx] = if tx > x { '/' } else { '\\' };
                    }
                }
            }
        }
    }

    for id in board.point_ids() {
        if let Some((y, x)) = position(id) {
            canvas[y][x] = occupant_char(board.occupant(id));
        }
    }

    let mut out = String::new();
    for (y, row) in canvas.iter().enumerate() {
        let label = if y % dy == 0 {
            char::from(b'0' + config.rows - (y / dy) as u8)
        } else {
            ' '
        };
        let line: String = row.iter().collect();
        out.push_str(format!("{label}  {line}").trim_end());
        out.push('\n');
    }

    let mut legend = vec![' '; width];
    for column in 0..config.columns {
        legend[usize::from(column) * dx] = char::from(b'a' + column);
    }
    out.push_str("   ");
    out.extend(legend);
    out.trim_end().to_string()
}

/// Variant, phase, piece counts and whose turn it is
pub fn score_panel(game: &GameState) -> String {
    let mut lines = vec![game.variant().to_string()];

    match game.phase() {
        GamePhase::Finished {
            winner: Some(winner),
        } => lines.push(format!("Game over, {winner} wins")),
        GamePhase::Finished { winner: None } => lines.push("Game over, draw".to_string()),
        phase => {
            let number = phase.number().unwrap_or_default();
            lines.push(format!("Phase {number}, {} to move", game.current_player()));
        }
    }

    for player in Player::ALL {
        let mut line = format!("{player}: {} on board", game.pieces(player));
        let left = game.placements_left(player);
        if left > 0 {
            line.push_str(&format!(", {left} to place"));
        }
        lines.push(line);
    }

    lines.join("\n")
}
