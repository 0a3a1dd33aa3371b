use std::io::{self, Write};

use color_eyre::eyre::Result;
use itertools::Itertools;
use nim_minimax::{
    EngineOptions, MinimaxEngine, NodeCounter, Piles, Player, Pruning, SearchResult,
};
use serde::Serialize;
use tracing::info;

use super::GameArgs;

#[derive(clap::Args, Debug)]
pub(crate) struct Solve {
    #[clap(flatten)]
    game: GameArgs,

    /// Search as if the human were to move at this position
    #[clap(long, value_parser)]
    human_to_move: bool,

    /// Use Alpha-Beta pruning. The answer is the same, the search is faster
    #[clap(long, value_parser)]
    prune: bool,

    /// Print the line of play the engine expects and the whole game tree
    #[clap(long, value_parser)]
    tree: bool,

    /// Print the result as JSON
    #[clap(long, value_parser, conflicts_with = "tree")]
    json: bool,
}

#[derive(Serialize, Debug)]
struct SolveOutput<'a> {
    piles: &'a Piles,
    depth: usize,
    to_move: Player,
    #[serde(flatten)]
    result: SearchResult,
    nodes: usize,
}

impl Solve {
    pub(crate) fn run(self) -> Result<()> {
        self.write_to(&mut io::stdout().lock())
    }

    fn write_to(&self, out: &mut impl Write) -> Result<()> {
        let config = self.game.to_config()?;
        let piles = config.piles().clone();
        let depth = config.depth();
        let maximizing = !self.human_to_move;
        let pruning = if self.prune {
            Pruning::AlphaBeta
        } else {
            Pruning::Off
        };

        let engine = MinimaxEngine::new(config).with_options(EngineOptions { pruning });
        let counter = NodeCounter::new();
        let result = engine.minimax_with_instruments(&piles, depth, maximizing, &counter);
        info!(
            piles = %piles,
            depth,
            ?pruning,
            score = result.score,
            nodes = counter.nodes(),
            "solved position"
        );

        if self.json {
            let output = SolveOutput {
                piles: &piles,
                depth,
                to_move: Player::from_maximizing(maximizing),
                result,
                nodes: counter.nodes(),
            };
            serde_json::to_writer_pretty(&mut *out, &output)?;
            writeln!(out)?;

            return Ok(());
        }

        writeln!(out, "Piles: {}", piles)?;
        match result.best_move {
            Some(m) => writeln!(out, "Best move: {}", m)?,
            None => writeln!(out, "Best move: none")?,
        }
        writeln!(out, "Score: {}", result.score)?;
        writeln!(out, "Nodes visited: {}", counter.nodes())?;

        if self.tree {
            let tree = engine.explore(&piles, depth, maximizing);
            let route = tree
                .chosen_route()
                .iter()
                .map(|(player, m)| format!("{} {}", player, m))
                .join(", ");

            writeln!(out, "\nExpected line: {}", route)?;
            if let Some(text) = tree.to_text_tree() {
                writeln!(out, "\n{}", text)?;
            }
        }

        Ok(())
    }
}
