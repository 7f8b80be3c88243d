//! Static map from puzzle type to its `{generate, validate}` pair.
//!
//! This is the only coupling point with the rest of the game: callers pick a
//! type and a difficulty, render what comes back, and hand the player's state
//! back in for validation.

use crate::error::PuzzleResult;
use crate::puzzle::{PuzzleData, PuzzleState, PuzzleType};
use crate::{arithmetic, balance, latin, mirror, path, sequence, tribute};
use crate::{Difficulty, PuzzleRng};
use rand::RngCore;
use tracing::{debug, instrument};

/// Generator and validator for one puzzle type
#[derive(Clone, Copy)]
pub struct PuzzleEntry {
    pub puzzle_type: PuzzleType,
    pub generate: fn(Difficulty, &mut dyn RngCore) -> PuzzleData,
    /// Never panics; a state of another puzzle type is simply unsolved
    pub validate: fn(&PuzzleState, &PuzzleData) -> bool,
}

static LATIN_SQUARE: PuzzleEntry = PuzzleEntry {
    puzzle_type: PuzzleType::LatinSquare,
    generate: |d, rng| PuzzleData::LatinSquare(latin::generate(d, rng)),
    validate: |state, data| match (state, data) {
        (PuzzleState::LatinSquare { grid }, PuzzleData::LatinSquare(p)) => latin::validate(p, grid),
        _ => false,
    },
};

static NUMBER_PATH: PuzzleEntry = PuzzleEntry {
    puzzle_type: PuzzleType::NumberPath,
    generate: |d, rng| PuzzleData::NumberPath(path::generate(d, rng)),
    validate: |state, data| match (state, data) {
        (PuzzleState::NumberPath { grid }, PuzzleData::NumberPath(p)) => path::validate(p, grid),
        _ => false,
    },
};

static MIRROR: PuzzleEntry = PuzzleEntry {
    puzzle_type: PuzzleType::Mirror,
    generate: |d, rng| PuzzleData::Mirror(mirror::generate_mirror(d, rng)),
    validate: |state, data| match (state, data) {
        (PuzzleState::Mirror { right }, PuzzleData::Mirror(p)) => mirror::validate_mirror(p, right),
        _ => false,
    },
};

static SYMMETRY: PuzzleEntry = PuzzleEntry {
    puzzle_type: PuzzleType::Symmetry,
    generate: |d, rng| PuzzleData::Symmetry(mirror::generate_symmetry(d, rng)),
    validate: |state, data| match (state, data) {
        (PuzzleState::Symmetry { right }, PuzzleData::Symmetry(p)) => {
            mirror::validate_symmetry(p, right)
        }
        _ => false,
    },
};

static BALANCE: PuzzleEntry = PuzzleEntry {
    puzzle_type: PuzzleType::Balance,
    generate: |d, rng| PuzzleData::Balance(balance::generate(d, rng)),
    validate: |state, data| match (state, data) {
        (PuzzleState::Balance { removed }, PuzzleData::Balance(p)) => balance::validate(p, removed),
        _ => false,
    },
};

static SEQUENCE: PuzzleEntry = PuzzleEntry {
    puzzle_type: PuzzleType::Sequence,
    generate: |d, rng| PuzzleData::Sequence(sequence::generate(d, rng)),
    validate: |state, data| match (state, data) {
        (PuzzleState::Sequence { chain }, PuzzleData::Sequence(p)) => sequence::validate(p, chain),
        _ => false,
    },
};

static GUARDIAN_TRIBUTE: PuzzleEntry = PuzzleEntry {
    puzzle_type: PuzzleType::GuardianTribute,
    generate: |d, rng| PuzzleData::GuardianTribute(tribute::generate(d, rng)),
    validate: |state, data| match (state, data) {
        (PuzzleState::GuardianTribute { distribution }, PuzzleData::GuardianTribute(p)) => {
            tribute::validate(p, distribution)
        }
        _ => false,
    },
};

static SUM_TARGET: PuzzleEntry = PuzzleEntry {
    puzzle_type: PuzzleType::SumTarget,
    generate: |d, rng| PuzzleData::SumTarget(arithmetic::generate_sum_target(d, rng)),
    validate: |state, data| match (state, data) {
        (PuzzleState::SumTarget { selected }, PuzzleData::SumTarget(p)) => {
            arithmetic::validate_sum_target(p, selected)
        }
        _ => false,
    },
};

static REFILL_CANTEEN: PuzzleEntry = PuzzleEntry {
    puzzle_type: PuzzleType::RefillCanteen,
    generate: |d, rng| PuzzleData::RefillCanteen(arithmetic::generate_canteen(d, rng)),
    validate: |state, data| match (state, data) {
        (PuzzleState::RefillCanteen { selected }, PuzzleData::RefillCanteen(p)) => {
            arithmetic::validate_canteen(p, selected)
        }
        _ => false,
    },
};

/// Look up the entry for a puzzle type
pub fn entry(puzzle_type: PuzzleType) -> &'static PuzzleEntry {
    match puzzle_type {
        PuzzleType::LatinSquare => &LATIN_SQUARE,
        PuzzleType::NumberPath => &NUMBER_PATH,
        PuzzleType::Mirror => &MIRROR,
        PuzzleType::Symmetry => &SYMMETRY,
        PuzzleType::Balance => &BALANCE,
        PuzzleType::Sequence => &SEQUENCE,
        PuzzleType::GuardianTribute => &GUARDIAN_TRIBUTE,
        PuzzleType::SumTarget => &SUM_TARGET,
        PuzzleType::RefillCanteen => &REFILL_CANTEEN,
    }
}

/// Generate a puzzle using the supplied random source
#[instrument(skip(rng))]
pub fn generate_with(
    puzzle_type: PuzzleType,
    difficulty: Difficulty,
    rng: &mut dyn RngCore,
) -> PuzzleData {
    let data = (entry(puzzle_type).generate)(difficulty, rng);
    debug!(%puzzle_type, %difficulty, "generated puzzle");
    data
}

/// Is `state` a solution of `data`?
pub fn validate(state: &PuzzleState, data: &PuzzleData) -> bool {
    (entry(data.puzzle_type()).validate)(state, data)
}

/// Parse a tag and a raw level, then generate
pub fn generate_tagged(tag: &str, level: i64, rng: &mut dyn RngCore) -> PuzzleResult<PuzzleData> {
    let puzzle_type: PuzzleType = tag.parse()?;
    let difficulty = Difficulty::try_from(level)?;
    Ok(generate_with(puzzle_type, difficulty, rng))
}

/// Puzzle generator owning its random source
pub struct PuzzleGenerator {
    rng: PuzzleRng,
}

impl Default for PuzzleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PuzzleGenerator {
    /// Create a generator seeded from system entropy
    pub fn new() -> Self {
        Self {
            rng: PuzzleRng::new(),
        }
    }

    /// Create a generator with a specific seed for reproducibility
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: PuzzleRng::with_seed(seed),
        }
    }

    pub fn generate(&mut self, puzzle_type: PuzzleType, difficulty: Difficulty) -> PuzzleData {
        generate_with(puzzle_type, difficulty, &mut self.rng)
    }

    pub fn generate_tagged(&mut self, tag: &str, level: i64) -> PuzzleResult<PuzzleData> {
        generate_tagged(tag, level, &mut self.rng)
    }
}
