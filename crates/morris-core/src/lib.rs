//! Morris - a rules engine for the Men's Morris family of board games
//!
//! This crate provides the core game logic for Three, Nine and Twelve Men's Morris, including:
//! - The board graph: points linked by compass directions, built per variant
//! - Coordinate text (`a1`, `g7`) and move text (`a1n`, `a1g7`) parsing
//! - Mill detection and the move legality rules
//! - Game state machine covering placement, sliding, flying and removals
//! - A controller that runs matches against any front end implementing [`Console`]
//!
//! # Modules
//!
//! - [`point`]: Players, occupants, directions and point addresses
//! - [`variant`]: Per-variant configuration table
//! - [`board`]: Board construction and occupancy queries
//! - [`coord`]: Coordinate mapping between text and points
//! - [`mill`]: Mill detection
//! - [`rules`]: Move validation
//! - [`actions`]: Actions, move-text parsing and events
//! - [`game`]: Game state machine
//! - [`controller`]: Match loop and the console seam

pub mod actions;
pub mod board;
pub mod controller;
pub mod coord;
pub mod game;
pub mod mill;
pub mod point;
pub mod rules;
pub mod variant;

// Re-export commonly used types
pub use actions::{GameAction, GameEvent, MoveKind};
pub use board::{Board, BoardJson, PointJson};
pub use controller::{Console, Controller, Input, MatchResult, DRAW_MESSAGE, MILL_MESSAGE};
pub use coord::Coordinate;
pub use game::{GameError, GamePhase, GameState, GameStateJson, Side};
pub use mill::MILL_LENGTH;
pub use point::{Axis, Direction, Occupant, Player, Point, PointId};
pub use variant::{Layout, ParseVariantError, Variant, VariantConfig};
