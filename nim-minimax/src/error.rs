use thiserror::Error;

/// Why a [crate::GameConfig] could not be built
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[allow(missing_docs)]
    #[error("the game needs at least one pile")]
    NoPiles,

    #[allow(missing_docs)]
    #[error("the minimum removal must be at least 1")]
    ZeroMinRemoval,

    #[allow(missing_docs)]
    #[error("the minimum removal ({min}) is larger than the maximum removal ({max})")]
    EmptyRemovalRange { min: u32, max: u32 },

    #[allow(missing_docs)]
    #[error("the search depth must be at least 1")]
    ZeroDepth,
}

/// A move that breaks one of the removal rules
///
/// Pile numbers in here are the 1-indexed ones the player typed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[allow(missing_docs)]
    #[error("there is no pile {requested}, pick a pile from 1 to {available}")]
    PileOutOfRange { requested: i64, available: usize },

    #[allow(missing_docs)]
    #[error("you must remove between {min} and {max} objects, not {requested}")]
    CountOutOfRange { requested: i64, min: u32, max: u32 },

    #[allow(missing_docs)]
    #[error("pile {pile} only has {available} objects left, you can't remove {requested}")]
    InsufficientStock {
        pile: usize,
        requested: u32,
        available: u32,
    },
}

/// Failures while talking to a [crate::PlayerInterface]
#[derive(Error, Debug)]
pub enum InterfaceError {
    /// The player typed something that isn't a whole number. The turn is retried.
    #[error("expected a whole number, got {0:?}")]
    NotANumber(String),

    /// The player's input ended before the game did
    #[error("the player interface was closed")]
    Closed,

    #[allow(missing_docs)]
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl InterfaceError {
    /// Whether the turn can simply be retried after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, InterfaceError::NotANumber(_))
    }
}
