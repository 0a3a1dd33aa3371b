use std::io::{BufRead, Write};

use itertools::Itertools;
use nim_minimax::{
    GameConfig, GameEvent, GameOverReason, InterfaceError, MoveRequest, Piles, Player,
    PlayerInterface,
};

/// Plays the human's side of the game through a text terminal
#[derive(Debug)]
pub(crate) struct ConsolePlayer<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePlayer<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub(crate) fn welcome(&mut self, config: &GameConfig) -> Result<(), InterfaceError> {
        let piles = config.piles();

        writeln!(self.output, "Welcome to Nim!")?;
        if piles.iter().all_equal() {
            writeln!(
                self.output,
                "The game starts with {} piles, each with {} objects.",
                piles.num_piles(),
                piles.iter().next().unwrap_or_default()
            )?;
        } else {
            writeln!(
                self.output,
                "The game starts with {} piles: {}.",
                piles.num_piles(),
                piles
            )?;
        }
        writeln!(
            self.output,
            "Rules: You can remove {} to {} objects from any single pile.",
            config.min_removal(),
            config.max_removal()
        )?;
        writeln!(
            self.output,
            "The player who is forced to take the last object loses."
        )?;
        if config.first_player() == Player::Computer {
            writeln!(self.output, "The computer moves first.")?;
        }

        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<i64, InterfaceError> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InterfaceError::Closed);
        }

        let line = line.trim();
        line.parse()
            .map_err(|_| InterfaceError::NotANumber(line.to_owned()))
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> PlayerInterface for ConsolePlayer<R, W> {
    fn request_move(
        &mut self,
        piles: &Piles,
        config: &GameConfig,
    ) -> Result<MoveRequest, InterfaceError> {
        let pile = self.prompt(&format!(
            "Enter pile number (1 to {}): ",
            piles.num_piles()
        ))?;
        let count = self.prompt(&format!(
            "Enter number of objects to remove ({} to {}): ",
            config.min_removal(),
            config.max_removal()
        ))?;

        Ok(MoveRequest { pile, count })
    }

    fn notify(&mut self, event: GameEvent<'_>) -> Result<(), InterfaceError> {
        match event {
            GameEvent::TurnStarted { player, piles } => {
                writeln!(self.output, "\nCurrent Piles: {}", piles)?;
                match player {
                    Player::Human => writeln!(self.output, "It's your turn.")?,
                    Player::Computer => writeln!(self.output, "It's the computer's turn.")?,
                }
            }
            GameEvent::MoveApplied {
                player: Player::Human,
                played,
                ..
            } => writeln!(
                self.output,
                "You removed {} objects from pile {}.",
                played.count,
                played.pile + 1
            )?,
            GameEvent::MoveApplied {
                player: Player::Computer,
                played,
                ..
            } => writeln!(
                self.output,
                "The computer removed {} objects from pile {}.",
                played.count,
                played.pile + 1
            )?,
            GameEvent::InvalidInput(_) => {
                writeln!(self.output, "Invalid input. Please enter numbers.")?
            }
            GameEvent::IllegalMove(e) => {
                writeln!(self.output, "Invalid move: {}. Please try again.", e)?
            }
            GameEvent::GameOver { winner, reason } => {
                let message = match (reason, winner) {
                    (GameOverReason::LastObjectTaken, Player::Human) => {
                        "The Computer took the last object. You Win!"
                    }
                    (GameOverReason::LastObjectTaken, Player::Computer) => {
                        "You took the last object. The Computer Wins!"
                    }
                    (GameOverReason::NoMovesLeft, Player::Computer) => {
                        "Human has no valid moves. You Lose! The Computer Wins!"
                    }
                    (GameOverReason::NoMovesLeft, Player::Human) => {
                        "Computer has no valid moves. The Computer Loses! You Win!"
                    }
                };
                writeln!(self.output, "{}", message)?;
            }
        }

        Ok(())
    }
}
