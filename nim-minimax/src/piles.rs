use std::fmt;

use itertools::Itertools;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
/// The game board: how many objects are left in each pile
///
/// Piles are only ever emptied, never refilled. Every search branch works on its own copy, so
/// applying a move returns a new [Piles] instead of mutating this one.
pub struct Piles(Vec<u32>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
/// Remove `count` objects from the pile at index `pile`
///
/// `pile` is 0-indexed here. The player facing interfaces use 1-indexed pile numbers, see
/// [crate::MoveRequest].
pub struct Move {
    /// Index of the pile to take from
    pub pile: usize,
    /// How many objects to remove
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
/// The two sides of the game
///
/// The computer is always the maximizing side of the search, the human the minimizing one.
pub enum Player {
    #[allow(missing_docs)]
    Human,
    #[allow(missing_docs)]
    Computer,
}

impl Piles {
    /// Build a board from the per-pile counts
    pub fn new(counts: impl Into<Vec<u32>>) -> Self {
        Self(counts.into())
    }

    /// Number of piles, including empty ones
    pub fn num_piles(&self) -> usize {
        self.0.len()
    }

    /// Objects left in the given pile, `None` if there is no such pile
    pub fn get(&self, pile: usize) -> Option<u32> {
        self.0.get(pile).copied()
    }

    /// Iterate over the pile counts in index order
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    /// True iff every pile is empty
    pub fn is_terminal(&self) -> bool {
        self.0.iter().all(|&count| count == 0)
    }

    /// Total number of objects left on the board
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&count| u64::from(count)).sum()
    }

    /// Returns the board after `m` has been played
    ///
    /// Only moves produced by [crate::legal_moves] (or accepted by [crate::check_move]) may be
    /// applied. Anything else is a bug in the caller, so this panics instead of producing a
    /// negative pile.
    pub fn apply(&self, m: Move) -> Piles {
        let stock = self.get(m.pile).unwrap_or_else(|| {
            panic!(
                "Tried to apply {:?} to {}, which only has {} piles",
                m,
                self,
                self.num_piles()
            )
        });
        assert!(
            m.count > 0 && m.count <= stock,
            "Tried to apply {:?} to {}, but pile {} holds {}",
            m,
            self,
            m.pile + 1,
            stock,
        );

        let mut next = self.clone();
        next.0[m.pile] = stock - m.count;
        next
    }
}

impl From<Vec<u32>> for Piles {
    fn from(counts: Vec<u32>) -> Self {
        Self(counts)
    }
}

impl<const N: usize> From<[u32; N]> for Piles {
    fn from(counts: [u32; N]) -> Self {
        Self(counts.to_vec())
    }
}

impl fmt::Display for Piles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "take {} from pile {}", self.count, self.pile + 1)
    }
}

impl Player {
    /// The other side
    pub fn opponent(self) -> Self {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }

    /// Whether this side maximizes the score in the search
    pub fn is_maximizing(self) -> bool {
        matches!(self, Player::Computer)
    }

    /// The side that moves at a maximizing (or minimizing) ply
    pub fn from_maximizing(maximizing: bool) -> Self {
        if maximizing {
            Player::Computer
        } else {
            Player::Human
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Human => write!(f, "human"),
            Player::Computer => write!(f, "computer"),
        }
    }
}
