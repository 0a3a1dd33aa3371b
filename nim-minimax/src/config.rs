use crate::{ConfigError, Piles, Player, Scoring};

/// Initial pile sizes
pub const DEFAULT_PILES: [u32; 3] = [5, 5, 5];
/// Fewest objects a single move may remove
pub const MIN_REMOVAL: u32 = 1;
/// Most objects a single move may remove
pub const MAX_REMOVAL: u32 = 3;
/// How many plies the computer looks ahead
pub const MINIMAX_DEPTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Everything that defines one game of Nim
///
/// This is handed to the [crate::MinimaxEngine] and the [crate::TurnController] when they are
/// built and never changes afterwards. The defaults (as implemented by [Default]) are the
/// classic `[5, 5, 5]` game:
///
/// ```
/// use nim_minimax::{GameConfig, Piles, Player, Scoring};
///
/// let defaults = GameConfig::default();
///
/// assert_eq!(defaults.piles(), &Piles::from([5, 5, 5]));
/// assert_eq!((defaults.min_removal(), defaults.max_removal()), (1, 3));
/// assert_eq!(defaults.depth(), 3);
/// assert_eq!(defaults.first_player(), Player::Human);
/// assert_eq!(defaults.scoring(), Scoring::Heuristic);
/// ```
pub struct GameConfig {
    piles: Piles,
    min_removal: u32,
    max_removal: u32,
    depth: usize,
    first_player: Player,
    scoring: Scoring,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            piles: Piles::from(DEFAULT_PILES),
            min_removal: MIN_REMOVAL,
            max_removal: MAX_REMOVAL,
            depth: MINIMAX_DEPTH,
            first_player: Player::Human,
            scoring: Scoring::default(),
        }
    }
}

impl GameConfig {
    /// Build a validated config. The human moves first and the heuristic scoring is used, see
    /// [GameConfig::with_first_player] and [GameConfig::with_scoring] to change those.
    pub fn new(
        piles: Piles,
        min_removal: u32,
        max_removal: u32,
        depth: usize,
    ) -> Result<Self, ConfigError> {
        if piles.num_piles() == 0 {
            return Err(ConfigError::NoPiles);
        }
        if min_removal == 0 {
            return Err(ConfigError::ZeroMinRemoval);
        }
        if min_removal > max_removal {
            return Err(ConfigError::EmptyRemovalRange {
                min: min_removal,
                max: max_removal,
            });
        }
        if depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }

        Ok(Self {
            piles,
            min_removal,
            max_removal,
            depth,
            ..Default::default()
        })
    }

    #[allow(missing_docs)]
    pub fn with_first_player(self, first_player: Player) -> Self {
        Self {
            first_player,
            ..self
        }
    }

    #[allow(missing_docs)]
    pub fn with_scoring(self, scoring: Scoring) -> Self {
        Self { scoring, ..self }
    }

    /// The starting board
    pub fn piles(&self) -> &Piles {
        &self.piles
    }

    #[allow(missing_docs)]
    pub fn min_removal(&self) -> u32 {
        self.min_removal
    }

    #[allow(missing_docs)]
    pub fn max_removal(&self) -> u32 {
        self.max_removal
    }

    /// Search depth used for the computer's moves
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[allow(missing_docs)]
    pub fn first_player(&self) -> Player {
        self.first_player
    }

    #[allow(missing_docs)]
    pub fn scoring(&self) -> Scoring {
        self.scoring
    }
}
