use std::cmp::Reverse;

use derivative::Derivative;
use itertools::Itertools;
use tracing::{debug, info_span};

use crate::{
    legal_moves, GameConfig, Instruments, Move, NodeCounter, Piles, Player, Scorable, Scoring,
    SearchInstruments,
};

use super::{MinMaxReturn, SearchResult};

#[derive(Derivative, Clone)]
#[derivative(Debug(bound = ""))]
/// This is the struct that wraps a game config and a scoring function and can be used to run
/// minimax
///
/// It also outputs traces using the [tracing] crate.
pub struct MinimaxEngine<ScorableType = Scoring>
where
    ScorableType: Scorable,
{
    config: GameConfig,
    #[derivative(Debug = "ignore")]
    score_function: ScorableType,
    options: EngineOptions,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Optional properties that can be defined for a [MinimaxEngine]
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use nim_minimax::{EngineOptions, Pruning};
///
/// let defaults: EngineOptions = Default::default();
///
/// assert_eq!(defaults.pruning, Pruning::Off);
/// ```
pub struct EngineOptions {
    /// How the tree search cuts branches
    pub pruning: Pruning,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Branch pruning strategies. None of them change the move or score returned for the root.
pub enum Pruning {
    /// Visit every node down to the requested depth
    #[default]
    Off,
    /// Skip branches that can't change the result of the root
    AlphaBeta,
}

enum Expansion {
    Leaf(i32),
    Branch(Vec<Move>),
}

/// Counts nodes for the span while forwarding to the caller's instruments
struct Observed<'i, I> {
    inner: &'i I,
    nodes: NodeCounter,
}

impl<I: SearchInstruments> SearchInstruments for Observed<'_, I> {
    fn observe_node(&self, depth_remaining: usize) {
        self.nodes.observe_node(depth_remaining);
        self.inner.observe_node(depth_remaining);
    }
}

impl MinimaxEngine<Scoring> {
    /// Construct a new `MinimaxEngine` using the [Scoring] policy from the config
    pub fn new(config: GameConfig) -> Self {
        let score_function = config.scoring();

        Self {
            config,
            score_function,
            options: Default::default(),
        }
    }
}

impl<ScorableType> MinimaxEngine<ScorableType>
where
    ScorableType: Scorable,
{
    /// Construct a new `MinimaxEngine` with a custom scoring function
    ///
    /// ```rust
    /// use nim_minimax::{GameConfig, Move, MinimaxEngine, Piles};
    ///
    /// // Every board looks the same, so the first legal move is chosen
    /// let engine = MinimaxEngine::from_scorer(GameConfig::default(), |_: &Piles| 0);
    ///
    /// let result = engine.minimax(&Piles::from([5, 5, 5]), 3, true);
    /// assert_eq!(result.best_move, Some(Move { pile: 0, count: 1 }));
    /// ```
    pub fn from_scorer(config: GameConfig, score_function: ScorableType) -> Self {
        Self {
            config,
            score_function,
            options: Default::default(),
        }
    }

    /// Replace the [EngineOptions]
    pub fn with_options(self, options: EngineOptions) -> Self {
        Self { options, ..self }
    }

    #[allow(missing_docs)]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Search `depth` plies below `piles` and return the best score with the move reaching it
    ///
    /// `maximizing` says whose ply it is at `piles`: true for the computer. This never touches
    /// the caller's board and returns the same result for the same arguments.
    pub fn minimax(&self, piles: &Piles, depth: usize, maximizing: bool) -> SearchResult {
        self.minimax_with_instruments(piles, depth, maximizing, &Instruments {})
    }

    /// Same as [MinimaxEngine::minimax], reporting every visited node to `instruments`
    pub fn minimax_with_instruments<I>(
        &self,
        piles: &Piles,
        depth: usize,
        maximizing: bool,
        instruments: &I,
    ) -> SearchResult
    where
        I: SearchInstruments,
    {
        info_span!(
          "minimax",
          piles = %piles,
          depth,
          maximizing,
          pruning = ?self.options.pruning,
          chosen_score = tracing::field::Empty,
          chosen_move = tracing::field::Empty,
          nodes = tracing::field::Empty,
        )
        .in_scope(|| {
            let observed = Observed {
                inner: instruments,
                nodes: NodeCounter::new(),
            };

            let result = match self.options.pruning {
                Pruning::Off => self.search(piles, depth, maximizing, &observed),
                Pruning::AlphaBeta => {
                    self.alpha_beta(piles, depth, maximizing, i32::MIN, i32::MAX, &observed)
                }
            };

            let current_span = tracing::Span::current();
            current_span.record("chosen_score", result.score);
            current_span.record("chosen_move", format!("{:?}", result.best_move).as_str());
            current_span.record("nodes", observed.nodes.nodes());
            debug!(
                score = result.score,
                nodes = observed.nodes.nodes(),
                "finished minimax"
            );

            result
        })
    }

    /// This runs the minimax algorithm to the specified depth, returning a struct that
    /// contains all the information about the 'tree' we searched.
    ///
    /// The return value is a recursive struct that tells you the score of the current node, and
    /// the score of all its children nodes. Its chosen move and score always match
    /// [MinimaxEngine::minimax] for the same arguments.
    pub fn explore(&self, piles: &Piles, depth: usize, maximizing: bool) -> MinMaxReturn {
        let moves = match self.expand(piles, depth, maximizing) {
            Expansion::Leaf(score) => return MinMaxReturn::Leaf { score },
            Expansion::Branch(moves) => moves,
        };

        let mut options = moves
            .into_iter()
            .map(|m| (m, self.explore(&piles.apply(m), depth - 1, !maximizing)))
            .collect_vec();

        // Stable sorts, so equal scores stay in generation order
        if maximizing {
            options.sort_by_key(|(_, r)| Reverse(r.score()));
        } else {
            options.sort_by_key(|(_, r)| r.score());
        }
        let score = options[0].1.score();

        MinMaxReturn::Node {
            is_maximizing: maximizing,
            options,
            moving_player: Player::from_maximizing(maximizing),
            score,
        }
    }

    fn expand(&self, piles: &Piles, depth: usize, maximizing: bool) -> Expansion {
        let leaf = || {
            Expansion::Leaf(
                self.score_function
                    .score(piles, Player::from_maximizing(maximizing)),
            )
        };

        if depth == 0 || piles.is_terminal() {
            return leaf();
        }

        let moves = legal_moves(piles, &self.config);
        if moves.is_empty() {
            return leaf();
        }

        Expansion::Branch(moves)
    }

    fn search<I: SearchInstruments>(
        &self,
        piles: &Piles,
        depth: usize,
        maximizing: bool,
        instruments: &I,
    ) -> SearchResult {
        instruments.observe_node(depth);

        let moves = match self.expand(piles, depth, maximizing) {
            Expansion::Leaf(score) => return SearchResult::leaf(score),
            Expansion::Branch(moves) => moves,
        };

        let mut best = None;
        for m in moves {
            let score = self
                .search(&piles.apply(m), depth - 1, !maximizing, instruments)
                .score;

            if improves(best, score, maximizing) {
                best = Some((score, m));
            }
        }

        branch_result(best)
    }

    fn alpha_beta<I: SearchInstruments>(
        &self,
        piles: &Piles,
        depth: usize,
        maximizing: bool,
        alpha: i32,
        beta: i32,
        instruments: &I,
    ) -> SearchResult {
        let mut alpha = alpha;
        let mut beta = beta;

        instruments.observe_node(depth);

        let moves = match self.expand(piles, depth, maximizing) {
            Expansion::Leaf(score) => return SearchResult::leaf(score),
            Expansion::Branch(moves) => moves,
        };

        let mut best = None;
        for m in moves {
            let score = self
                .alpha_beta(&piles.apply(m), depth - 1, !maximizing, alpha, beta, instruments)
                .score;

            if improves(best, score, maximizing) {
                best = Some((score, m));
            }

            if maximizing {
                alpha = std::cmp::max(alpha, score);
            } else {
                beta = std::cmp::min(beta, score);
            }

            if alpha >= beta {
                break;
            }
        }

        branch_result(best)
    }
}

/// Only strict improvements count, which keeps the earliest of equally scored moves
fn improves(best: Option<(i32, Move)>, score: i32, maximizing: bool) -> bool {
    match best {
        None => true,
        Some((best_score, _)) if maximizing => score > best_score,
        Some((best_score, _)) => score < best_score,
    }
}

fn branch_result(best: Option<(i32, Move)>) -> SearchResult {
    let (score, m) = best.expect("A branch node always has at least one legal move");

    SearchResult {
        score,
        best_move: Some(m),
    }
}
