use serde::Serialize;

use crate::Move;

use super::MinMaxReturn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// The outcome of one minimax search
pub struct SearchResult {
    /// The score of the node, from the computer's point of view
    pub score: i32,
    /// The move that reaches `score`. `None` iff the node was a leaf: depth 0, an empty board,
    /// or no legal move.
    pub best_move: Option<Move>,
}

impl SearchResult {
    pub(crate) fn leaf(score: i32) -> Self {
        Self {
            score,
            best_move: None,
        }
    }
}

impl From<&MinMaxReturn> for SearchResult {
    fn from(tree: &MinMaxReturn) -> Self {
        Self {
            score: tree.score(),
            best_move: tree.best_move(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{GameConfig, MinimaxEngine, Piles};

    #[test]
    fn test_serializes_the_chosen_move() {
        let result =
            MinimaxEngine::new(GameConfig::default()).minimax(&Piles::from([0, 0, 1]), 3, true);

        assert_eq!(
            serde_json::to_value(result).unwrap(),
            json!({ "score": 100, "best_move": { "pile": 2, "count": 1 } })
        );
    }

    #[test]
    fn test_leaf_serializes_without_a_move() {
        assert_eq!(
            serde_json::to_value(SearchResult::leaf(-15)).unwrap(),
            json!({ "score": -15, "best_move": null })
        );
    }

    #[test]
    fn test_agrees_with_the_tree() {
        let engine = MinimaxEngine::new(GameConfig::default());
        let piles = Piles::from([2, 3, 4]);

        assert_eq!(
            SearchResult::from(&engine.explore(&piles, 3, false)),
            engine.minimax(&piles, 3, false)
        );
    }
}
