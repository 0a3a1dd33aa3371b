use text_trees::StringTreeNode;

use crate::{Move, Player};

#[derive(Debug, Clone, PartialEq, Eq)]
/// This is returned from [crate::MinimaxEngine::explore]
/// It contains all the information we generated about the game tree
pub enum MinMaxReturn {
    /// This is a non-leaf node in the game tree
    /// We have information about all the options we looked at as well as the chosen score
    Node {
        /// Whether this node was a maximizing node or not
        is_maximizing: bool,
        /// A 'recursive' look at all the moves under us
        /// This array is sorted by score, best first for the moving player. Moves with equal
        /// scores keep their generation order, so the first element is always the chosen move
        options: Vec<(Move, Self)>,
        /// Which side was moving at this node
        moving_player: Player,
        /// The chosen score
        /// This should always match the score of the first element in `options`
        score: i32,
    },
    /// Represents a leaf node in the game tree
    /// This happens when the board is empty, no move is legal, or we reach the maximum depth
    Leaf {
        #[allow(missing_docs)]
        score: i32,
    },
}

impl MinMaxReturn {
    /// Returns the score for this node
    pub fn score(&self) -> i32 {
        match self {
            MinMaxReturn::Node { score, .. } => *score,
            MinMaxReturn::Leaf { score } => *score,
        }
    }

    /// Returns the move chosen at this node
    /// If we are a leaf node, this will return None
    pub fn best_move(&self) -> Option<Move> {
        match self {
            MinMaxReturn::Leaf { .. } => None,
            MinMaxReturn::Node { options, .. } => options.first().map(|(m, _)| *m),
        }
    }

    /// Returns all the moves in the 'route' through the game tree that minimax took
    /// This is useful for debugging as it shows each of the moves both sides made during
    /// the search
    pub fn chosen_route(&self) -> Vec<(Player, Move)> {
        match self {
            MinMaxReturn::Leaf { .. } => vec![],
            MinMaxReturn::Node {
                moving_player,
                options,
                ..
            } => {
                if let Some(chosen) = options.first() {
                    let mut tail = chosen.1.chosen_route();
                    tail.insert(0, (*moving_player, chosen.0));
                    tail
                } else {
                    vec![]
                }
            }
        }
    }

    /// Number of nodes in the tree, this one included
    pub fn node_count(&self) -> usize {
        match self {
            MinMaxReturn::Leaf { .. } => 1,
            MinMaxReturn::Node { options, .. } => {
                1 + options.iter().map(|(_, r)| r.node_count()).sum::<usize>()
            }
        }
    }

    /// This returns a visual representation of the game tree that minimax generated
    /// It shows the chosen score, the moving side and the move at each level
    pub fn to_text_tree(&self) -> Option<String> {
        let tree_node = self.to_text_tree_node("root".to_owned())?;
        Some(format!("{}", tree_node))
    }

    fn to_text_tree_node(&self, label: String) -> Option<StringTreeNode> {
        match self {
            MinMaxReturn::Leaf { .. } => None,
            MinMaxReturn::Node {
                moving_player,
                options,
                score,
                ..
            } => {
                let mut node = StringTreeNode::new(format!("{} {}", label, score));
                for (m, result) in options {
                    let child_label = format!("{} {}", moving_player, m);
                    let child = result.to_text_tree_node(child_label.clone()).unwrap_or_else(|| {
                        StringTreeNode::new(format!("{} {}", child_label, result.score()))
                    });
                    node.push_node(child);
                }

                Some(node)
            }
        }
    }
}
