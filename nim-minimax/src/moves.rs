use itertools::Itertools;

use crate::{GameConfig, Move, MoveError, Piles};

/// Every legal move from `piles`, by ascending pile index and then ascending count
///
/// The ordering is what the search uses to break ties, so it must stay stable. The result is
/// empty for a terminal board, and also for a board where no pile reaches `min_removal`.
pub fn legal_moves(piles: &Piles, config: &GameConfig) -> Vec<Move> {
    let min = config.min_removal();
    let max = config.max_removal();

    piles
        .iter()
        .enumerate()
        .flat_map(|(pile, stock)| (min..=max.min(stock)).map(move |count| Move { pile, count }))
        .collect_vec()
}

/// Check a move against the removal rules, without applying it
///
/// A move is accepted here iff it appears in [legal_moves].
pub fn check_move(piles: &Piles, m: Move, config: &GameConfig) -> Result<(), MoveError> {
    let available = piles
        .get(m.pile)
        .ok_or(MoveError::PileOutOfRange {
            requested: i64::try_from(m.pile).map_or(i64::MAX, |pile| pile.saturating_add(1)),
            available: piles.num_piles(),
        })?;

    if m.count < config.min_removal() || m.count > config.max_removal() {
        return Err(MoveError::CountOutOfRange {
            requested: m.count.into(),
            min: config.min_removal(),
            max: config.max_removal(),
        });
    }

    if m.count > available {
        return Err(MoveError::InsufficientStock {
            pile: m.pile + 1,
            requested: m.count,
            available,
        });
    }

    Ok(())
}
