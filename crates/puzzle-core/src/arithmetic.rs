//! Plain arithmetic variants: hit a target sum, or top up a canteen.

use crate::grid::sample_indices;
use crate::policy::ArithmeticConfig;
use crate::Difficulty;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Pick options that add up to `target_value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SumTargetPuzzle {
    pub target_value: u32,
    pub options: Vec<u32>,
    /// Option indices of the generated solution
    pub solution: Vec<usize>,
}

/// Pour jugs into a canteen that already holds `initial_level` until it is exactly full
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanteenPuzzle {
    /// Canteen capacity
    pub target_value: u32,
    pub initial_level: u32,
    /// Jug volumes
    pub options: Vec<u32>,
    pub solution: Vec<usize>,
}

fn draw_options<R: Rng + ?Sized>(config: &ArithmeticConfig, rng: &mut R) -> (Vec<u32>, Vec<usize>) {
    let options: Vec<u32> = (0..config.option_count)
        .map(|_| rng.gen_range(1..=config.max_value))
        .collect();
    let mut solution = sample_indices(rng, options.len(), config.subset_size);
    solution.sort_unstable();
    (options, solution)
}

pub fn generate_sum_target<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> SumTargetPuzzle {
    let config = ArithmeticConfig::for_difficulty(difficulty);
    let (options, solution) = draw_options(&config, rng);
    let target_value = solution.iter().map(|&i| options[i]).sum();
    SumTargetPuzzle {
        target_value,
        options,
        solution,
    }
}

pub fn generate_canteen<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> CanteenPuzzle {
    let config = ArithmeticConfig::for_difficulty(difficulty);
    let initial_level = rng.gen_range(1..=(config.max_value / 2).max(1));
    let (options, solution) = draw_options(&config, rng);
    let poured: u32 = solution.iter().map(|&i| options[i]).sum();
    CanteenPuzzle {
        target_value: initial_level + poured,
        initial_level,
        options,
        solution,
    }
}

/// Sum of the selected options; `None` for an empty selection, an index out
/// of range, or the same option picked twice
pub fn selection_sum(options: &[u32], selected: &[usize]) -> Option<u32> {
    if selected.is_empty() {
        return None;
    }
    let mut seen = HashSet::with_capacity(selected.len());
    let mut sum = 0u32;
    for &i in selected {
        if !seen.insert(i) {
            return None;
        }
        sum = sum.checked_add(*options.get(i)?)?;
    }
    Some(sum)
}

pub fn validate_sum_target(puzzle: &SumTargetPuzzle, selected: &[usize]) -> bool {
    selection_sum(&puzzle.options, selected) == Some(puzzle.target_value)
}

pub fn validate_canteen(puzzle: &CanteenPuzzle, selected: &[usize]) -> bool {
    selection_sum(&puzzle.options, selected)
        .and_then(|poured| poured.checked_add(puzzle.initial_level))
        == Some(puzzle.target_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PuzzleRng;

    #[test]
    fn test_generated_solutions_validate() {
        let mut rng = PuzzleRng::with_seed(42);
        for difficulty in Difficulty::all() {
            let config = ArithmeticConfig::for_difficulty(difficulty);
            for _ in 0..20 {
                let sum = generate_sum_target(difficulty, &mut rng);
                assert_eq!(sum.options.len(), config.option_count);
                assert_eq!(sum.solution.len(), config.subset_size);
                assert!(validate_sum_target(&sum, &sum.solution));

                let canteen = generate_canteen(difficulty, &mut rng);
                assert!(canteen.initial_level < canteen.target_value);
                assert!(validate_canteen(&canteen, &canteen.solution));
                assert!(!validate_canteen(&canteen, &[]));
            }
        }
    }

    #[test]
    fn test_selection_rules() {
        let options = [3, 5, 7];
        assert_eq!(selection_sum(&options, &[0, 2]), Some(10));
        assert_eq!(selection_sum(&options, &[0, 0]), None);
        assert_eq!(selection_sum(&options, &[3]), None);
        assert_eq!(selection_sum(&options, &[]), None);
    }

    #[test]
    fn test_wrong_sum_rejected() {
        let puzzle = SumTargetPuzzle {
            target_value: 8,
            options: vec![3, 5, 7],
            solution: vec![0, 1],
        };
        assert!(validate_sum_target(&puzzle, &[1, 0]));
        assert!(!validate_sum_target(&puzzle, &[2]));
        assert!(!validate_sum_target(&puzzle, &[0, 1, 2]));
    }
}
