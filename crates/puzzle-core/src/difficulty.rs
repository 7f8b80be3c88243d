use crate::error::{PuzzleError, PuzzleResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Difficulty level of a puzzle, an ordinal from 1 (easiest) to 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Build a difficulty, rejecting levels outside 1..=5
    pub fn new(level: u8) -> PuzzleResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(PuzzleError::invalid_difficulty(level))
        }
    }

    /// The ordinal level
    pub fn level(self) -> u8 {
        self.0
    }

    /// All levels, easiest first
    pub fn all() -> impl Iterator<Item = Difficulty> {
        (Self::MIN..=Self::MAX).map(Difficulty)
    }

    pub fn easiest() -> Self {
        Self(Self::MIN)
    }

    pub fn hardest() -> Self {
        Self(Self::MAX)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::easiest()
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Difficulty> for u8 {
    fn from(d: Difficulty) -> Self {
        d.0
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = PuzzleError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl TryFrom<i64> for Difficulty {
    type Error = PuzzleError;

    fn try_from(level: i64) -> Result<Self, Self::Error> {
        u8::try_from(level)
            .map_err(|_| PuzzleError::invalid_difficulty(level))
            .and_then(Self::new)
    }
}

impl TryFrom<f64> for Difficulty {
    type Error = PuzzleError;

    /// Accepts only finite whole numbers; NaN and fractions are rejected.
    fn try_from(level: f64) -> Result<Self, Self::Error> {
        if !level.is_finite() || level.fract() != 0.0 {
            return Err(PuzzleError::invalid_difficulty(level));
        }
        if level < f64::from(Self::MIN) || level > f64::from(Self::MAX) {
            return Err(PuzzleError::invalid_difficulty(level));
        }
        Self::new(level as u8)
    }
}

impl FromStr for Difficulty {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level: i64 = s
            .trim()
            .parse()
            .map_err(|_| PuzzleError::invalid_difficulty(s))?;
        Self::try_from(level)
    }
}
