//! Fixed-depth minimax over Nim boards
//!
//! Every node is scored as 'the computer'. When propagating scores up the tree, the search
//! chooses the highest score on the computer's plies and the lowest score on the human's.
//! Moves are tried in [crate::legal_moves] order and a move only replaces the current best on a
//! strict improvement, so among equally scored moves the first generated one wins.
//!
//! ```rust
//! use nim_minimax::{EngineOptions, GameConfig, MinimaxEngine, NodeCounter, Piles, Pruning};
//!
//! let engine = MinimaxEngine::new(GameConfig::default());
//! let counter = NodeCounter::new();
//!
//! let plain = engine.minimax_with_instruments(&Piles::from([5, 5, 5]), 3, true, &counter);
//! assert!(counter.nodes() <= 1 + 9 + 81 + 729);
//!
//! // Alpha-Beta visits fewer nodes but agrees on the result
//! let pruned = engine
//!     .with_options(EngineOptions { pruning: Pruning::AlphaBeta })
//!     .minimax(&Piles::from([5, 5, 5]), 3, true);
//! assert_eq!(plain, pruned);
//! ```

mod engine;
pub use engine::{EngineOptions, MinimaxEngine, Pruning};

mod minimax_return;
pub use minimax_return::MinMaxReturn;

mod search_result;
pub use search_result::SearchResult;
