use std::io;

use color_eyre::eyre::{Result, WrapErr};
use nim_minimax::{Player, TurnController};
use tracing::info;

use crate::console::ConsolePlayer;

use super::GameArgs;

#[derive(clap::Args, Debug)]
pub(crate) struct Play {
    #[clap(flatten)]
    game: GameArgs,

    /// Let the computer make the first move
    #[clap(long, value_parser)]
    computer_first: bool,
}

impl Play {
    pub(crate) fn run(self) -> Result<()> {
        let mut config = self.game.to_config()?;
        if self.computer_first {
            config = config.with_first_player(Player::Computer);
        }

        let mut player = ConsolePlayer::new(io::stdin().lock(), io::stdout());
        player.welcome(&config)?;

        info!(
            piles = %config.piles(),
            depth = config.depth(),
            first_player = %config.first_player(),
            "starting game"
        );

        let mut controller = TurnController::new(config);
        let winner = controller
            .run(&mut player)
            .wrap_err("The game was interrupted")?;

        info!(%winner, "game finished");

        Ok(())
    }
}
