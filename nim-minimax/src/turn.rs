//! Alternating turns between a human, reached through a [PlayerInterface], and the
//! [MinimaxEngine]

use derivative::Derivative;
use tracing::{debug, info, info_span};

use crate::{
    check_move, legal_moves, GameConfig, InterfaceError, MinimaxEngine, Move, MoveError, Piles,
    Player, Scorable, Scoring,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Where the game is at
pub enum TurnState {
    /// Waiting for the human's move
    HumanTurn,
    /// The engine moves next
    ComputerTurn,
    /// Nothing left to do
    GameOver {
        #[allow(missing_docs)]
        winner: Player,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Why the game ended
pub enum GameOverReason {
    /// The loser took the last object
    LastObjectTaken,
    /// The loser had no legal move left, only possible when the minimum removal is above 1
    NoMovesLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A move exactly as the player typed it: a 1-indexed pile number and a removal count
pub struct MoveRequest {
    #[allow(missing_docs)]
    pub pile: i64,
    #[allow(missing_docs)]
    pub count: i64,
}

#[derive(Debug, Clone, Copy)]
/// Everything the player interface gets told about
pub enum GameEvent<'a> {
    /// Sent before every attempt at a move, including retries
    TurnStarted {
        #[allow(missing_docs)]
        player: Player,
        #[allow(missing_docs)]
        piles: &'a Piles,
    },
    /// A move was played, `piles` is the board after it
    MoveApplied {
        #[allow(missing_docs)]
        player: Player,
        #[allow(missing_docs)]
        played: Move,
        #[allow(missing_docs)]
        piles: &'a Piles,
    },
    /// The human's input could not be read as numbers
    InvalidInput(&'a InterfaceError),
    /// The human's move broke a rule
    IllegalMove(&'a MoveError),
    #[allow(missing_docs)]
    GameOver {
        winner: Player,
        reason: GameOverReason,
    },
}

/// The outside world's side of a game: where the human's moves come from and where the game's
/// progress goes
pub trait PlayerInterface {
    /// Ask the human for a move. Returning [InterfaceError::NotANumber] retries the turn, any
    /// other error ends the game loop.
    fn request_move(
        &mut self,
        piles: &Piles,
        config: &GameConfig,
    ) -> Result<MoveRequest, InterfaceError>;

    /// Tell the player what happened
    fn notify(&mut self, event: GameEvent<'_>) -> Result<(), InterfaceError>;
}

impl MoveRequest {
    /// Convert to a 0-indexed [Move], checking it against the removal rules
    pub fn resolve(self, piles: &Piles, config: &GameConfig) -> Result<Move, MoveError> {
        let pile = self
            .pile
            .checked_sub(1)
            .and_then(|pile| usize::try_from(pile).ok())
            .filter(|&pile| pile < piles.num_piles())
            .ok_or(MoveError::PileOutOfRange {
                requested: self.pile,
                available: piles.num_piles(),
            })?;

        let count = u32::try_from(self.count)
            .map_err(|_| MoveError::CountOutOfRange {
                requested: self.count,
                min: config.min_removal(),
                max: config.max_removal(),
            })?;

        let m = Move { pile, count };
        check_move(piles, m, config)?;

        Ok(m)
    }
}

#[derive(Derivative)]
#[derivative(Debug(bound = ""))]
/// Owns the board and alternates turns until someone takes the last object
///
/// The side that takes the last object loses. The board only ever changes through moves that
/// passed [check_move] or came out of the engine.
pub struct TurnController<ScorableType = Scoring>
where
    ScorableType: Scorable,
{
    engine: MinimaxEngine<ScorableType>,
    piles: Piles,
    state: TurnState,
}

impl TurnController<Scoring> {
    /// Start a new game from the config's initial board
    pub fn new(config: GameConfig) -> Self {
        Self::with_engine(MinimaxEngine::new(config))
    }
}

impl<ScorableType> TurnController<ScorableType>
where
    ScorableType: Scorable,
{
    /// Start a new game played by the given engine, from its config's initial board
    ///
    /// A board that starts out empty is already over. Nobody took the last object, so the
    /// side that would have moved first wins.
    pub fn with_engine(engine: MinimaxEngine<ScorableType>) -> Self {
        let piles = engine.config().piles().clone();
        let first_player = engine.config().first_player();

        let state = if piles.is_terminal() {
            TurnState::GameOver {
                winner: first_player,
            }
        } else {
            turn_of(first_player)
        };

        Self {
            engine,
            piles,
            state,
        }
    }

    /// The current board
    pub fn piles(&self) -> &Piles {
        &self.piles
    }

    #[allow(missing_docs)]
    pub fn state(&self) -> TurnState {
        self.state
    }

    #[allow(missing_docs)]
    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    /// The winner, once the game is over
    pub fn winner(&self) -> Option<Player> {
        match self.state {
            TurnState::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    /// Play turns until the game is over, returning the winner
    pub fn run<P: PlayerInterface>(&mut self, player: &mut P) -> Result<Player, InterfaceError> {
        info_span!("nim_game", piles = %self.piles).in_scope(|| loop {
            if let TurnState::GameOver { winner } = self.step(player)? {
                return Ok(winner);
            }
        })
    }

    /// Make one transition of the turn state machine and return the new state
    ///
    /// A rejected human move keeps the state at [TurnState::HumanTurn] with the board untouched.
    pub fn step<P: PlayerInterface>(
        &mut self,
        player: &mut P,
    ) -> Result<TurnState, InterfaceError> {
        match self.state {
            TurnState::GameOver { .. } => {}
            TurnState::HumanTurn => self.human_turn(player)?,
            TurnState::ComputerTurn => self.computer_turn(player)?,
        }

        Ok(self.state)
    }

    fn human_turn<P: PlayerInterface>(&mut self, player: &mut P) -> Result<(), InterfaceError> {
        player.notify(GameEvent::TurnStarted {
            player: Player::Human,
            piles: &self.piles,
        })?;

        if legal_moves(&self.piles, self.config()).is_empty() {
            return self.finish(Player::Computer, GameOverReason::NoMovesLeft, player);
        }

        let request = match player.request_move(&self.piles, self.config()) {
            Ok(request) => request,
            Err(e) if e.is_recoverable() => {
                debug!(error = %e, "unreadable move");
                return player.notify(GameEvent::InvalidInput(&e));
            }
            Err(e) => return Err(e),
        };

        match request.resolve(&self.piles, self.config()) {
            Ok(m) => self.play(Player::Human, m, player),
            Err(e) => {
                debug!(pile = request.pile, count = request.count, error = %e, "rejected move");
                player.notify(GameEvent::IllegalMove(&e))
            }
        }
    }

    fn computer_turn<P: PlayerInterface>(&mut self, player: &mut P) -> Result<(), InterfaceError> {
        player.notify(GameEvent::TurnStarted {
            player: Player::Computer,
            piles: &self.piles,
        })?;

        if legal_moves(&self.piles, self.config()).is_empty() {
            return self.finish(Player::Human, GameOverReason::NoMovesLeft, player);
        }

        let result = self
            .engine
            .minimax(&self.piles, self.config().depth(), true);
        let m = result.best_move.unwrap_or_else(|| {
            panic!(
                "Search from {} returned no move although legal moves exist",
                self.piles
            )
        });

        self.play(Player::Computer, m, player)
    }

    fn play<P: PlayerInterface>(
        &mut self,
        mover: Player,
        m: Move,
        player: &mut P,
    ) -> Result<(), InterfaceError> {
        self.piles = self.piles.apply(m);
        info!(player = %mover, played = %m, piles = %self.piles, "move applied");

        player.notify(GameEvent::MoveApplied {
            player: mover,
            played: m,
            piles: &self.piles,
        })?;

        if self.piles.is_terminal() {
            return self.finish(mover.opponent(), GameOverReason::LastObjectTaken, player);
        }

        self.state = turn_of(mover.opponent());
        Ok(())
    }

    fn finish<P: PlayerInterface>(
        &mut self,
        winner: Player,
        reason: GameOverReason,
        player: &mut P,
    ) -> Result<(), InterfaceError> {
        info!(winner = %winner, ?reason, "game over");
        self.state = TurnState::GameOver { winner };

        player.notify(GameEvent::GameOver { winner, reason })
    }
}

fn turn_of(player: Player) -> TurnState {
    match player {
        Player::Human => TurnState::HumanTurn,
        Player::Computer => TurnState::ComputerTurn,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Seen {
        TurnStarted(Player, Piles),
        MoveApplied(Player, Move, Piles),
        InvalidInput,
        IllegalMove(MoveError),
        GameOver(Player, GameOverReason),
    }

    /// Plays scripted moves, then the first legal move once the script runs out
    #[derive(Debug, Default)]
    struct ScriptedPlayer {
        script: VecDeque<Result<MoveRequest, String>>,
        seen: Vec<Seen>,
        fall_back_to_first_legal: bool,
    }

    impl ScriptedPlayer {
        fn new(script: impl IntoIterator<Item = Result<(i64, i64), &'static str>>) -> Self {
            Self {
                script: script
                    .into_iter()
                    .map(|r| {
                        r.map(|(pile, count)| MoveRequest { pile, count })
                            .map_err(str::to_owned)
                    })
                    .collect(),
                ..Default::default()
            }
        }

        fn first_legal() -> Self {
            Self {
                fall_back_to_first_legal: true,
                ..Default::default()
            }
        }
    }

    impl PlayerInterface for ScriptedPlayer {
        fn request_move(
            &mut self,
            piles: &Piles,
            config: &GameConfig,
        ) -> Result<MoveRequest, InterfaceError> {
            match self.script.pop_front() {
                Some(Ok(request)) => Ok(request),
                Some(Err(text)) => Err(InterfaceError::NotANumber(text)),
                None if self.fall_back_to_first_legal => {
                    let m = legal_moves(piles, config)[0];
                    Ok(MoveRequest {
                        pile: m.pile as i64 + 1,
                        count: m.count.into(),
                    })
                }
                None => Err(InterfaceError::Closed),
            }
        }

        fn notify(&mut self, event: GameEvent<'_>) -> Result<(), InterfaceError> {
            self.seen.push(match event {
                GameEvent::TurnStarted { player, piles } => {
                    Seen::TurnStarted(player, piles.clone())
                }
                GameEvent::MoveApplied {
                    player,
                    played,
                    piles,
                } => Seen::MoveApplied(player, played, piles.clone()),
                GameEvent::InvalidInput(_) => Seen::InvalidInput,
                GameEvent::IllegalMove(e) => Seen::IllegalMove(e.clone()),
                GameEvent::GameOver { winner, reason } => Seen::GameOver(winner, reason),
            });
            Ok(())
        }
    }

    fn config(piles: impl Into<Vec<u32>>) -> GameConfig {
        GameConfig::new(Piles::new(piles), 1, 3, 3).unwrap()
    }

    #[test]
    fn test_human_moves_first_by_default() {
        let controller = TurnController::new(GameConfig::default());

        assert_eq!(controller.state(), TurnState::HumanTurn);
        assert_eq!(controller.piles(), &Piles::from([5, 5, 5]));
        assert_eq!(controller.winner(), None);
    }

    #[test]
    fn test_pile_out_of_range_is_rejected() {
        let mut controller = TurnController::new(GameConfig::default());
        let mut player = ScriptedPlayer::new([Ok((4, 1))]);

        let state = controller.step(&mut player).unwrap();

        assert_eq!(state, TurnState::HumanTurn);
        assert_eq!(controller.piles(), &Piles::from([5, 5, 5]));
        assert_eq!(
            player.seen.last(),
            Some(&Seen::IllegalMove(MoveError::PileOutOfRange {
                requested: 4,
                available: 3
            }))
        );
    }

    #[test]
    fn test_count_above_maximum_is_rejected() {
        let mut controller = TurnController::new(GameConfig::default());
        let mut player = ScriptedPlayer::new([Ok((1, 4))]);

        let state = controller.step(&mut player).unwrap();

        assert_eq!(state, TurnState::HumanTurn);
        assert_eq!(controller.piles(), &Piles::from([5, 5, 5]));
        assert_eq!(
            player.seen.last(),
            Some(&Seen::IllegalMove(MoveError::CountOutOfRange {
                requested: 4,
                min: 1,
                max: 3
            }))
        );
    }

    #[test]
    fn test_other_illegal_requests_are_rejected() {
        let mut controller = TurnController::new(config([5, 1, 5]));
        let mut player = ScriptedPlayer::new([
            Ok((0, 1)),
            Ok((-2, 1)),
            Ok((1, 0)),
            Ok((1, -1)),
            Ok((2, 2)),
        ]);

        for _ in 0..5 {
            assert_eq!(controller.step(&mut player).unwrap(), TurnState::HumanTurn);
        }

        assert_eq!(controller.piles(), &Piles::from([5, 1, 5]));
        let rejections = player
            .seen
            .iter()
            .filter(|s| matches!(s, Seen::IllegalMove(_)))
            .count();
        assert_eq!(rejections, 5);
        assert_eq!(
            player.seen.last(),
            Some(&Seen::IllegalMove(MoveError::InsufficientStock {
                pile: 2,
                requested: 2,
                available: 1
            }))
        );
    }

    #[test]
    fn test_unreadable_input_retries_the_turn() {
        let mut controller = TurnController::new(GameConfig::default());
        let mut player = ScriptedPlayer::new([Err("two"), Ok((2, 2))]);

        assert_eq!(controller.step(&mut player).unwrap(), TurnState::HumanTurn);
        assert_eq!(player.seen.last(), Some(&Seen::InvalidInput));

        assert_eq!(controller.step(&mut player).unwrap(), TurnState::ComputerTurn);
        assert_eq!(controller.piles(), &Piles::from([5, 3, 5]));
    }

    #[test]
    fn test_closed_input_ends_the_loop() {
        let mut controller = TurnController::new(GameConfig::default());
        let mut player = ScriptedPlayer::default();

        assert!(matches!(
            controller.run(&mut player),
            Err(InterfaceError::Closed)
        ));
        assert_eq!(controller.state(), TurnState::HumanTurn);
    }

    #[test]
    fn test_computer_plays_the_engine_move() {
        let mut controller = TurnController::new(GameConfig::default());
        let mut player = ScriptedPlayer::new([Ok((1, 1))]);

        controller.step(&mut player).unwrap();
        let before = controller.piles().clone();
        let expected = MinimaxEngine::new(GameConfig::default())
            .minimax(&before, 3, true)
            .best_move
            .unwrap();

        assert_eq!(controller.step(&mut player).unwrap(), TurnState::HumanTurn);
        assert_eq!(controller.piles(), &before.apply(expected));
        assert_eq!(
            player.seen.last(),
            Some(&Seen::MoveApplied(
                Player::Computer,
                expected,
                before.apply(expected)
            ))
        );
    }

    #[test]
    fn test_taking_the_last_object_loses() {
        let mut controller = TurnController::new(config([0, 0, 2]));
        let mut player = ScriptedPlayer::new([Ok((3, 2))]);

        let winner = controller.run(&mut player).unwrap();

        assert_eq!(winner, Player::Computer);
        assert_eq!(controller.piles(), &Piles::from([0, 0, 0]));
        assert_eq!(
            player.seen.last(),
            Some(&Seen::GameOver(
                Player::Computer,
                GameOverReason::LastObjectTaken
            ))
        );
    }

    #[test]
    fn test_computer_forced_to_take_the_last_object() {
        let mut controller = TurnController::new(config([0, 0, 2]));
        let mut player = ScriptedPlayer::new([Ok((3, 1))]);

        assert_eq!(controller.run(&mut player).unwrap(), Player::Human);
        assert_eq!(
            player.seen,
            vec![
                Seen::TurnStarted(Player::Human, Piles::from([0, 0, 2])),
                Seen::MoveApplied(
                    Player::Human,
                    Move { pile: 2, count: 1 },
                    Piles::from([0, 0, 1])
                ),
                Seen::TurnStarted(Player::Computer, Piles::from([0, 0, 1])),
                Seen::MoveApplied(
                    Player::Computer,
                    Move { pile: 2, count: 1 },
                    Piles::from([0, 0, 0])
                ),
                Seen::GameOver(Player::Human, GameOverReason::LastObjectTaken),
            ]
        );
    }

    #[test]
    fn test_full_game_ends_with_the_last_mover_losing() {
        for first in [Player::Human, Player::Computer] {
            for scoring in [Scoring::Heuristic, Scoring::Misere] {
                let config = GameConfig::default()
                    .with_first_player(first)
                    .with_scoring(scoring);
                let mut controller = TurnController::new(config);
                let mut player = ScriptedPlayer::first_legal();

                let winner = controller.run(&mut player).unwrap();

                let last_mover = player
                    .seen
                    .iter()
                    .rev()
                    .find_map(|s| match s {
                        Seen::MoveApplied(p, _, _) => Some(*p),
                        _ => None,
                    })
                    .unwrap();
                assert_eq!(winner, last_mover.opponent());
                assert!(controller.piles().is_terminal());
                assert_eq!(controller.winner(), Some(winner));

                // Every move removed objects and the sides alternated
                let movers = player
                    .seen
                    .iter()
                    .filter_map(|s| match s {
                        Seen::MoveApplied(p, _, _) => Some(*p),
                        _ => None,
                    })
                    .collect::<Vec<_>>();
                assert_eq!(movers[0], first);
                assert!(movers.windows(2).all(|w| w[0] != w[1]));
            }
        }
    }

    #[test]
    fn test_computer_can_move_first() {
        let config = GameConfig::default().with_first_player(Player::Computer);
        let mut controller = TurnController::new(config);
        let mut player = ScriptedPlayer::default();

        assert_eq!(controller.state(), TurnState::ComputerTurn);
        assert_eq!(controller.step(&mut player).unwrap(), TurnState::HumanTurn);
        assert_eq!(controller.piles().total(), 15 - 3);
    }

    #[test]
    fn test_empty_start_is_already_over() {
        let mut controller = TurnController::new(config([0, 0, 0]));
        let mut player = ScriptedPlayer::default();

        assert_eq!(controller.run(&mut player).unwrap(), Player::Human);
        assert!(player.seen.is_empty());
    }

    #[test]
    fn test_no_moves_left_loses() {
        let config = GameConfig::new(Piles::from([3, 1]), 2, 3, 3).unwrap();
        let mut controller = TurnController::new(config);
        let mut player = ScriptedPlayer::new([Ok((1, 2))]);

        // Human takes 2 from the first pile, leaving [1, 1] where nothing can be taken
        let winner = controller.run(&mut player).unwrap();

        assert_eq!(winner, Player::Human);
        assert_eq!(controller.piles(), &Piles::from([1, 1]));
        assert_eq!(
            player.seen.last(),
            Some(&Seen::GameOver(Player::Human, GameOverReason::NoMovesLeft))
        );
    }
}
