//! Wire types: the puzzle-type tag, generated puzzle data, and player state.

use crate::arithmetic::{CanteenPuzzle, SumTargetPuzzle};
use crate::balance::BalancePuzzle;
use crate::error::{PuzzleError, PuzzleResult};
use crate::grid::Grid;
use crate::latin::{LatinSquarePuzzle, Symbol};
use crate::mirror::{MirrorPuzzle, Rune, SymmetryPuzzle};
use crate::path::{NumberPathPuzzle, PathBoard};
use crate::sequence::SequencePuzzle;
use crate::tribute::TributePuzzle;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Puzzle family tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PuzzleType {
    LatinSquare,
    NumberPath,
    Mirror,
    Symmetry,
    Balance,
    Sequence,
    GuardianTribute,
    SumTarget,
    RefillCanteen,
}

impl PuzzleType {
    pub const ALL: [PuzzleType; 9] = [
        PuzzleType::LatinSquare,
        PuzzleType::NumberPath,
        PuzzleType::Mirror,
        PuzzleType::Symmetry,
        PuzzleType::Balance,
        PuzzleType::Sequence,
        PuzzleType::GuardianTribute,
        PuzzleType::SumTarget,
        PuzzleType::RefillCanteen,
    ];

    /// Wire tag, e.g. `LATIN_SQUARE`
    pub fn tag(self) -> &'static str {
        match self {
            PuzzleType::LatinSquare => "LATIN_SQUARE",
            PuzzleType::NumberPath => "NUMBER_PATH",
            PuzzleType::Mirror => "MIRROR",
            PuzzleType::Symmetry => "SYMMETRY",
            PuzzleType::Balance => "BALANCE",
            PuzzleType::Sequence => "SEQUENCE",
            PuzzleType::GuardianTribute => "GUARDIAN_TRIBUTE",
            PuzzleType::SumTarget => "SUM_TARGET",
            PuzzleType::RefillCanteen => "REFILL_CANTEEN",
        }
    }
}

impl std::fmt::Display for PuzzleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.tag())
    }
}

impl FromStr for PuzzleType {
    type Err = PuzzleError;

    /// Accepts the wire tag in any case, with `-` allowed in place of `_`.
    fn from_str(s: &str) -> PuzzleResult<Self> {
        let normalized = s.trim().replace('-', "_").to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|t| t.tag() == normalized)
            .ok_or_else(|| PuzzleError::unknown_puzzle_type(s))
    }
}

/// Immutable output of a generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "puzzleType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PuzzleData {
    LatinSquare(LatinSquarePuzzle),
    NumberPath(NumberPathPuzzle),
    Mirror(MirrorPuzzle),
    Symmetry(SymmetryPuzzle),
    Balance(BalancePuzzle),
    Sequence(SequencePuzzle),
    GuardianTribute(TributePuzzle),
    SumTarget(SumTargetPuzzle),
    RefillCanteen(CanteenPuzzle),
}

/// The player's moves so far, threaded by the caller into each validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "puzzleType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PuzzleState {
    LatinSquare { grid: Grid<Option<Symbol>> },
    NumberPath { grid: PathBoard },
    Mirror { right: Grid<Rune> },
    Symmetry { right: Grid<bool> },
    Balance { removed: Vec<u32> },
    Sequence { chain: Vec<i64> },
    GuardianTribute { distribution: Vec<u32> },
    SumTarget { selected: Vec<usize> },
    RefillCanteen { selected: Vec<usize> },
}

impl PuzzleData {
    pub fn puzzle_type(&self) -> PuzzleType {
        match self {
            PuzzleData::LatinSquare(_) => PuzzleType::LatinSquare,
            PuzzleData::NumberPath(_) => PuzzleType::NumberPath,
            PuzzleData::Mirror(_) => PuzzleType::Mirror,
            PuzzleData::Symmetry(_) => PuzzleType::Symmetry,
            PuzzleData::Balance(_) => PuzzleType::Balance,
            PuzzleData::Sequence(_) => PuzzleType::Sequence,
            PuzzleData::GuardianTribute(_) => PuzzleType::GuardianTribute,
            PuzzleData::SumTarget(_) => PuzzleType::SumTarget,
            PuzzleData::RefillCanteen(_) => PuzzleType::RefillCanteen,
        }
    }

    /// State the player starts from; also what a reset re-derives
    pub fn initial_state(&self) -> PuzzleState {
        match self {
            PuzzleData::LatinSquare(p) => PuzzleState::LatinSquare {
                grid: p.initial_board(),
            },
            PuzzleData::NumberPath(p) => PuzzleState::NumberPath {
                grid: p.initial_board(),
            },
            PuzzleData::Mirror(p) => PuzzleState::Mirror {
                right: p.initial_right(),
            },
            PuzzleData::Symmetry(p) => PuzzleState::Symmetry {
                right: p.initial_right(),
            },
            PuzzleData::Balance(_) => PuzzleState::Balance {
                removed: Vec::new(),
            },
            PuzzleData::Sequence(_) => PuzzleState::Sequence { chain: Vec::new() },
            PuzzleData::GuardianTribute(p) => PuzzleState::GuardianTribute {
                distribution: vec![0; p.guardians.len()],
            },
            PuzzleData::SumTarget(_) => PuzzleState::SumTarget {
                selected: Vec::new(),
            },
            PuzzleData::RefillCanteen(_) => PuzzleState::RefillCanteen {
                selected: Vec::new(),
            },
        }
    }

    /// A solving state built from the generator's own solution
    pub fn solution_state(&self) -> PuzzleState {
        match self {
            PuzzleData::LatinSquare(p) => PuzzleState::LatinSquare {
                grid: p.solution.map(|&s| Some(s)),
            },
            PuzzleData::NumberPath(p) => PuzzleState::NumberPath {
                grid: p.solution_board(),
            },
            PuzzleData::Mirror(p) => PuzzleState::Mirror {
                right: p.solution_right(),
            },
            PuzzleData::Symmetry(p) => PuzzleState::Symmetry {
                right: p.solution_right(),
            },
            PuzzleData::Balance(p) => PuzzleState::Balance {
                removed: p.solution_removals.clone(),
            },
            PuzzleData::Sequence(p) => PuzzleState::Sequence {
                chain: p.solution.clone(),
            },
            PuzzleData::GuardianTribute(p) => PuzzleState::GuardianTribute {
                distribution: p.solution(),
            },
            PuzzleData::SumTarget(p) => PuzzleState::SumTarget {
                selected: p.solution.clone(),
            },
            PuzzleData::RefillCanteen(p) => PuzzleState::RefillCanteen {
                selected: p.solution.clone(),
            },
        }
    }
}

impl PuzzleState {
    pub fn puzzle_type(&self) -> PuzzleType {
        match self {
            PuzzleState::LatinSquare { .. } => PuzzleType::LatinSquare,
            PuzzleState::NumberPath { .. } => PuzzleType::NumberPath,
            PuzzleState::Mirror { .. } => PuzzleType::Mirror,
            PuzzleState::Symmetry { .. } => PuzzleType::Symmetry,
            PuzzleState::Balance { .. } => PuzzleType::Balance,
            PuzzleState::Sequence { .. } => PuzzleType::Sequence,
            PuzzleState::GuardianTribute { .. } => PuzzleType::GuardianTribute,
            PuzzleState::SumTarget { .. } => PuzzleType::SumTarget,
            PuzzleState::RefillCanteen { .. } => PuzzleType::RefillCanteen,
        }
    }
}
