//! Configuration errors raised by the engine.
//!
//! Generators and validators never fail; only the inputs that select them do.

use derive_more::{Display, Error};

/// Result alias for engine configuration calls
pub type PuzzleResult<T> = Result<T, PuzzleError>;

/// Errors caused by the calling code passing bad configuration
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum PuzzleError {
    /// Difficulty was not an integer in 1..=5
    #[display("invalid difficulty: {value} (expected an integer from 1 to 5)")]
    InvalidDifficulty {
        value: String,
    },
    /// Puzzle-type tag is not one the registry knows
    #[display("unknown puzzle type: {tag}")]
    UnknownPuzzleType {
        tag: String,
    },
    /// Sequence rule tag could not be parsed
    #[display("invalid sequence rule: {tag}")]
    InvalidRule {
        tag: String,
    },
}

impl PuzzleError {
    pub(crate) fn invalid_difficulty(value: impl ToString) -> Self {
        Self::InvalidDifficulty {
            value: value.to_string(),
        }
    }

    pub(crate) fn unknown_puzzle_type(tag: impl Into<String>) -> Self {
        Self::UnknownPuzzleType { tag: tag.into() }
    }

    pub(crate) fn invalid_rule(tag: impl Into<String>) -> Self {
        Self::InvalidRule { tag: tag.into() }
    }
}
