//! Difficulty policy: maps a [`Difficulty`] to per-puzzle sizing parameters.
//!
//! Every table is monotonic. A higher level never yields a strictly easier
//! configuration for the same puzzle family.

use crate::Difficulty;
use serde::Serialize;

/// Maximum randomized search attempts for the number-path generator
pub const PATH_MAX_ATTEMPTS: usize = 20;

/// Node expansions allowed per path attempt before giving up on it
pub const PATH_MAX_STEPS_PER_ATTEMPT: usize = 5_000;

/// Latin square sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LatinSquareConfig {
    /// Grid order (number of symbols)
    pub size: usize,
    /// Cells left filled as clues
    pub clues: usize,
}

impl LatinSquareConfig {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty.level() {
            1 => Self { size: 3, clues: 5 },
            2 => Self { size: 4, clues: 8 },
            _ => Self { size: 4, clues: 6 },
        }
    }
}

/// Number path sizing
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumberPathConfig {
    pub grid_size: usize,
    pub start_value: i64,
    pub step_value: i64,
    /// Upper bound on the share of cells revealed as clues
    pub clue_ratio: f64,
    /// Also reveal the second path cell so the direction is obvious
    pub reveal_direction: bool,
    pub max_attempts: usize,
}

impl NumberPathConfig {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (grid_size, step_value, clue_ratio) = match difficulty.level() {
            1 => (3, 1, 0.45),
            2 => (4, 1, 0.45),
            3 => (4, 2, 0.40),
            4 => (5, 2, 0.35),
            _ => (5, 3, 0.30),
        };
        Self {
            grid_size,
            start_value: step_value,
            step_value,
            clue_ratio,
            reveal_direction: difficulty.level() <= 2,
            max_attempts: PATH_MAX_ATTEMPTS,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Clue budget: ~`clue_ratio` of the cells, never fewer than the mandatory ones
    pub fn clue_count(&self) -> usize {
        let mandatory = if self.reveal_direction { 3 } else { 2 };
        let share = (self.cell_count() as f64 * self.clue_ratio).round() as usize;
        share.max(mandatory).min(self.cell_count())
    }
}

/// Mirror and symmetry sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MirrorConfig {
    pub grid_size: usize,
    /// Runes a mirror cell cycles through; index 0 is blank
    pub palette_size: u8,
}

impl MirrorConfig {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self {
            grid_size: usize::from(difficulty.level() / 2) + 3,
            palette_size: 3,
        }
    }
}

/// Balance tray sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BalanceConfig {
    /// Removable weights per side that belong to the solution
    pub kept_weights: usize,
    /// Removable weights per side the player must take off
    pub decoys: usize,
    pub min_target: u32,
    pub max_target: u32,
    pub max_decoy: u32,
}

impl BalanceConfig {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let level = u32::from(difficulty.level());
        Self {
            kept_weights: if level <= 2 { 1 } else { 2 },
            decoys: (level as usize + 1) / 2,
            min_target: 4 + 2 * level,
            max_target: 8 + 4 * level,
            max_decoy: 3 + level,
        }
    }
}

/// Sequence chain sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SequenceConfig {
    pub option_count: usize,
    pub chain_length: usize,
    /// Additive step
    pub step: i64,
    /// Geometric rules may be drawn at this level
    pub allow_multiply: bool,
    pub factor: i64,
}

impl SequenceConfig {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let level = difficulty.level();
        let option_count = match level {
            1 => 10,
            2 => 8,
            _ => 6,
        };
        Self {
            option_count,
            chain_length: option_count / 2,
            step: i64::from(level) + 1,
            allow_multiply: level >= 3,
            factor: if level >= 5 { 3 } else { 2 },
        }
    }

    pub fn decoys(&self) -> usize {
        self.option_count - self.chain_length
    }
}

/// Guardian tribute sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TributeConfig {
    pub guardians: usize,
    /// Largest gem count for the anchoring exact guardian
    pub max_anchor: u32,
    pub allow_multiplier: bool,
    pub allow_halve_and_range: bool,
    pub allow_comparison: bool,
}

impl TributeConfig {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let level = difficulty.level();
        Self {
            guardians: match level {
                1 => 2,
                2 | 3 => 3,
                4 => 4,
                _ => 5,
            },
            max_anchor: 3 + u32::from(level),
            allow_multiplier: level >= 2,
            allow_halve_and_range: level >= 3,
            allow_comparison: level >= 4,
        }
    }
}

/// Sizing for the plain arithmetic variants (sum target, canteen refill)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArithmeticConfig {
    pub option_count: usize,
    pub subset_size: usize,
    pub max_value: u32,
}

impl ArithmeticConfig {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let level = difficulty.level();
        Self {
            option_count: 3 + usize::from(level),
            subset_size: 2 + usize::from(level / 2),
            max_value: 5 + 2 * u32::from(level),
        }
    }
}
