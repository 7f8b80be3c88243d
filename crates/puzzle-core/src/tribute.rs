//! Guardian tribute puzzles: share a pool of gems between statues so every
//! statue's constraint holds and the whole pool is used.
//!
//! The generator draws the solution vector first and derives each constraint
//! from it, so every puzzle is solvable by construction. At most one guardian
//! gets a loose constraint (range or comparison); the pool total then pins it
//! down, which keeps the solution unique.

use crate::grid::shuffle;
use crate::policy::TributeConfig;
use crate::Difficulty;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Direction of a comparison constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "<")]
    Less,
}

/// What a guardian demands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Constraint {
    Exact {
        value: u32,
    },
    #[serde(rename_all = "camelCase")]
    Multiplier {
        target_guardian: usize,
        multiplier: u32,
    },
    /// `addend` may be negative
    #[serde(rename_all = "camelCase")]
    Addition {
        target_guardian: usize,
        addend: i64,
    },
    #[serde(rename_all = "camelCase")]
    Halve {
        target_guardian: usize,
    },
    Range {
        min: u32,
        max: u32,
    },
    #[serde(rename_all = "camelCase")]
    Comparison {
        target_guardian: usize,
        operator: Comparison,
    },
}

impl Constraint {
    /// Guardian this constraint refers to, if any
    pub fn target_guardian(&self) -> Option<usize> {
        match *self {
            Constraint::Multiplier { target_guardian, .. }
            | Constraint::Addition { target_guardian, .. }
            | Constraint::Halve { target_guardian }
            | Constraint::Comparison { target_guardian, .. } => Some(target_guardian),
            Constraint::Exact { .. } | Constraint::Range { .. } => None,
        }
    }

    /// Does `value` satisfy the constraint against `distribution`?
    pub fn is_satisfied(&self, value: u32, distribution: &[u32]) -> bool {
        let other = match self.target_guardian() {
            Some(i) => match distribution.get(i) {
                Some(&v) => u64::from(v),
                None => return false,
            },
            None => 0,
        };
        let value = u64::from(value);
        match *self {
            Constraint::Exact { value: expected } => value == u64::from(expected),
            Constraint::Multiplier { multiplier, .. } => value == other * u64::from(multiplier),
            Constraint::Addition { addend, .. } => {
                i128::from(value) == i128::from(other) + i128::from(addend)
            }
            Constraint::Halve { .. } => value * 2 == other,
            Constraint::Range { min, max } => (u64::from(min)..=u64::from(max)).contains(&value),
            Constraint::Comparison { operator, .. } => match operator {
                Comparison::Greater => value > other,
                Comparison::Less => value < other,
            },
        }
    }

    fn is_loose(&self) -> bool {
        matches!(self, Constraint::Range { .. } | Constraint::Comparison { .. })
    }
}

/// A statue and its demand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guardian {
    pub id: usize,
    pub constraint: Constraint,
    /// Gems this guardian receives in the generated solution
    pub solution: u32,
}

/// A generated guardian tribute puzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TributePuzzle {
    pub total_gems: u32,
    pub guardians: Vec<Guardian>,
}

impl TributePuzzle {
    pub fn solution(&self) -> Vec<u32> {
        self.guardians.iter().map(|g| g.solution).collect()
    }
}

/// Outcome of checking a distribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TributeVerdict {
    pub is_valid: bool,
    /// The distribution uses exactly `total_gems`
    pub total_matches: bool,
    /// Indices of guardians whose constraint failed
    pub failed_guardians: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Addition,
    Multiplier,
    Halve,
    Range,
    Comparison,
}

const MAX_DERIVED: u32 = 24;

/// Generate a puzzle
pub fn generate<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> TributePuzzle {
    let config = TributeConfig::for_difficulty(difficulty);

    let mut kinds = vec![Kind::Addition];
    if config.allow_multiplier {
        kinds.push(Kind::Multiplier);
    }
    if config.allow_halve_and_range {
        kinds.extend([Kind::Halve, Kind::Range]);
    }
    if config.allow_comparison {
        kinds.push(Kind::Comparison);
    }

    let anchor = rng.gen_range(1..=config.max_anchor.max(1));
    let mut guardians = vec![Guardian {
        id: 0,
        constraint: Constraint::Exact { value: anchor },
        solution: anchor,
    }];
    let mut loose_used = false;

    for id in 1..config.guardians.max(1) {
        let target = rng.gen_range(0..id);
        let other = guardians[target].solution;
        let mut order = kinds.clone();
        shuffle(rng, &mut order);

        let derived = order
            .into_iter()
            .filter(|k| !(loose_used && matches!(k, Kind::Range | Kind::Comparison)))
            .find_map(|kind| derive(kind, target, other, config.max_anchor, rng))
            .unwrap_or_else(|| addition(target, other, rng));

        loose_used |= derived.0.is_loose();
        guardians.push(Guardian {
            id,
            constraint: derived.0,
            solution: derived.1,
        });
    }

    TributePuzzle {
        total_gems: guardians.iter().map(|g| g.solution).sum(),
        guardians,
    }
}

/// Derive a constraint of `kind` against guardian `target` holding `other` gems
fn derive<R: Rng + ?Sized>(
    kind: Kind,
    target: usize,
    other: u32,
    max_anchor: u32,
    rng: &mut R,
) -> Option<(Constraint, u32)> {
    match kind {
        Kind::Addition => Some(addition(target, other, rng)),
        Kind::Multiplier => {
            let multiplier = rng.gen_range(2..=3);
            let value = other * multiplier;
            (value <= MAX_DERIVED).then_some((
                Constraint::Multiplier {
                    target_guardian: target,
                    multiplier,
                },
                value,
            ))
        }
        Kind::Halve => (other >= 2 && other % 2 == 0).then_some((
            Constraint::Halve {
                target_guardian: target,
            },
            other / 2,
        )),
        Kind::Range => {
            let value = rng.gen_range(1..=max_anchor + 3);
            let spread = rng.gen_range(1..=2);
            Some((
                Constraint::Range {
                    min: value.saturating_sub(spread).max(1),
                    max: value + spread,
                },
                value,
            ))
        }
        Kind::Comparison => {
            let value = rng.gen_range(1..=max_anchor + 3);
            let operator = match value.cmp(&other) {
                std::cmp::Ordering::Greater => Comparison::Greater,
                std::cmp::Ordering::Less => Comparison::Less,
                std::cmp::Ordering::Equal => return None,
            };
            Some((
                Constraint::Comparison {
                    target_guardian: target,
                    operator,
                },
                value,
            ))
        }
    }
}

fn addition<R: Rng + ?Sized>(target: usize, other: u32, rng: &mut R) -> (Constraint, u32) {
    let step = rng.gen_range(1..=3u32);
    let (addend, value) = if rng.gen_bool(0.5) && other > step {
        (-i64::from(step), other - step)
    } else {
        (i64::from(step), other + step)
    };
    (
        Constraint::Addition {
            target_guardian: target,
            addend,
        },
        value,
    )
}

/// Check every constraint against the player's own distribution
pub fn check_distribution(puzzle: &TributePuzzle, distribution: &[u32]) -> TributeVerdict {
    if distribution.len() != puzzle.guardians.len() {
        return TributeVerdict {
            is_valid: false,
            total_matches: false,
            failed_guardians: (0..puzzle.guardians.len()).collect(),
        };
    }
    let failed_guardians: Vec<usize> = puzzle
        .guardians
        .iter()
        .zip(distribution)
        .enumerate()
        .filter(|(_, (g, &value))| !g.constraint.is_satisfied(value, distribution))
        .map(|(i, _)| i)
        .collect();
    let total: u64 = distribution.iter().map(|&v| u64::from(v)).sum();
    let total_matches = total == u64::from(puzzle.total_gems);
    TributeVerdict {
        is_valid: total_matches && failed_guardians.is_empty(),
        total_matches,
        failed_guardians,
    }
}

pub fn validate(puzzle: &TributePuzzle, distribution: &[u32]) -> bool {
    check_distribution(puzzle, distribution).is_valid
}
