pub mod play;
pub mod solve;

use play::Play;
use solve::Solve;

use clap::{Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use nim_minimax::{
    GameConfig, Piles, Scoring, DEFAULT_PILES, MAX_REMOVAL, MINIMAX_DEPTH, MIN_REMOVAL,
};

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Play a game against the computer in this terminal
    Play(Play),
    /// Print the engine's move for a single position
    Solve(Solve),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Play(p) => p.run()?,
            Command::Solve(s) => s.run()?,
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum ScoringArg {
    /// Minus the objects left, and 100 for an empty board
    Heuristic,
    /// Like heuristic, but an empty board is scored for whoever took the last object
    Misere,
}

impl From<ScoringArg> for Scoring {
    fn from(arg: ScoringArg) -> Self {
        match arg {
            ScoringArg::Heuristic => Scoring::Heuristic,
            ScoringArg::Misere => Scoring::Misere,
        }
    }
}

/// The rules of the game, shared by every command
#[derive(clap::Args, Debug)]
pub(crate) struct GameArgs {
    /// Objects in each pile, comma separated
    #[clap(short, long, value_parser, value_delimiter = ',', default_values_t = DEFAULT_PILES.to_vec())]
    piles: Vec<u32>,

    /// Fewest objects that can be removed in one move
    #[clap(long, value_parser, default_value_t = MIN_REMOVAL)]
    min_removal: u32,

    /// Most objects that can be removed in one move
    #[clap(long, value_parser, default_value_t = MAX_REMOVAL)]
    max_removal: u32,

    /// How many plies the computer looks ahead
    #[clap(short, long, value_parser, default_value_t = MINIMAX_DEPTH)]
    depth: usize,

    /// How the computer scores the positions at the bottom of its search
    #[clap(short, long, value_enum, default_value_t = ScoringArg::Heuristic)]
    scoring: ScoringArg,
}

impl GameArgs {
    pub(crate) fn to_config(&self) -> Result<GameConfig> {
        let config = GameConfig::new(
            Piles::new(self.piles.clone()),
            self.min_removal,
            self.max_removal,
            self.depth,
        )
        .wrap_err("Invalid game settings")?;

        Ok(config.with_scoring(self.scoring.into()))
    }
}
