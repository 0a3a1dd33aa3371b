#![warn(missing_debug_implementations, missing_docs)]
//! This crate implements a fixed-depth minimax player for misère Nim: a handful of piles, each
//! move removes between `min_removal` and `max_removal` objects from a single pile, and the
//! player forced to take the last object loses.
//!
//! The engine is scored from the computer's point of view. You can plug in any scoring
//! function that turns a [Piles] into an `i32`, or use one of the built-in [Scoring] policies.
//!
//! ```rust
//! use nim_minimax::{GameConfig, Move, MinimaxEngine, Piles};
//!
//! let engine = MinimaxEngine::new(GameConfig::default());
//!
//! // Only one legal move is left, so the engine has to take it
//! let result = engine.minimax(&Piles::from([0, 0, 1]), 3, true);
//!
//! assert_eq!(result.best_move, Some(Move { pile: 2, count: 1 }));
//! assert_eq!(result.score, 100);
//! ```
//!
//! The [TurnController] drives a full game between a human, reached through a
//! [PlayerInterface], and the engine.

mod config;
pub use config::{GameConfig, DEFAULT_PILES, MAX_REMOVAL, MINIMAX_DEPTH, MIN_REMOVAL};

mod error;
pub use error::{ConfigError, InterfaceError, MoveError};

mod instruments;
pub use instruments::{Instruments, NodeCounter, SearchInstruments};

mod moves;
pub use moves::{check_move, legal_moves};

mod piles;
pub use piles::{Move, Piles, Player};

pub mod minimax;
pub use minimax::{EngineOptions, MinMaxReturn, MinimaxEngine, Pruning, SearchResult};

pub mod score;
pub use score::{evaluate, Scorable, Scoring, WIN_SCORE};

pub mod turn;
pub use turn::{GameEvent, GameOverReason, MoveRequest, PlayerInterface, TurnController, TurnState};
