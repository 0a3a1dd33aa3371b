//! Static scoring of boards, always from the computer's (the maximizing side's) point of view

use crate::{Piles, Player};

/// Score of an empty board under the built-in scorers
pub const WIN_SCORE: i32 = 100;

/// The classic Nim heuristic
///
/// An empty board scores [WIN_SCORE]. Any other board scores the negated number of objects left,
/// so the computer prefers boards with fewer objects left. This does not know who emptied the
/// board, see [Scoring::Misere] for a scorer that does.
pub fn evaluate(piles: &Piles) -> i32 {
    match piles.total() {
        0 => WIN_SCORE,
        total => -(i32::try_from(total).unwrap_or(i32::MAX)),
    }
}

/// This trait is used to control something that can return a score from a game board
///
/// `to_move` is the side whose ply it is at the scored node. Any `Fn(&Piles) -> i32` is a
/// [Scorable] that ignores it.
pub trait Scorable {
    /// Score the board for the computer
    fn score(&self, piles: &Piles, to_move: Player) -> i32;
}

impl<FnLike: Fn(&Piles) -> i32> Scorable for FnLike {
    fn score(&self, piles: &Piles, _to_move: Player) -> i32 {
        (self)(piles)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// The built-in scoring policies
pub enum Scoring {
    /// [evaluate]: every empty board is a computer win
    #[default]
    Heuristic,
    /// Like [Scoring::Heuristic], but an empty board is only a win if the human took the last
    /// object, i.e. it's the computer's turn. Otherwise it scores `-WIN_SCORE`.
    Misere,
}

impl Scorable for Scoring {
    fn score(&self, piles: &Piles, to_move: Player) -> i32 {
        match self {
            Scoring::Heuristic => evaluate(piles),
            Scoring::Misere if piles.is_terminal() => match to_move {
                Player::Computer => WIN_SCORE,
                Player::Human => -WIN_SCORE,
            },
            Scoring::Misere => evaluate(piles),
        }
    }
}
