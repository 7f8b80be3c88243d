//! Sequence chain puzzles: click stars in order to build a progression up to the target.

use crate::error::{PuzzleError, PuzzleResult};
use crate::grid::shuffle;
use crate::policy::SequenceConfig;
use crate::Difficulty;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Step function of a chain, written as a tag such as `ADD_3`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Rule {
    /// `next = last + n`
    Add(i64),
    /// Legacy spelling of `Add`: the multiples of `n`
    MultiplesOf(i64),
    /// `next = last * n`
    Multiply(i64),
}

impl Rule {
    /// Start value the generator pairs with this rule
    pub fn default_start(self) -> i64 {
        match self {
            Rule::Add(n) | Rule::MultiplesOf(n) | Rule::Multiply(n) => n,
        }
    }

    /// The only legal successor of `last`
    pub fn next(self, last: i64) -> Option<i64> {
        match self {
            Rule::Add(n) | Rule::MultiplesOf(n) => last.checked_add(n),
            Rule::Multiply(n) => last.checked_mul(n),
        }
    }

    /// Could `value` appear anywhere on the chain that begins at `start`?
    fn on_progression(self, start: i64, value: i64) -> bool {
        match self {
            Rule::Add(n) | Rule::MultiplesOf(n) => {
                n > 0 && value.checked_sub(start).is_some_and(|gap| gap >= 0 && gap % n == 0)
            }
            Rule::Multiply(n) => {
                let mut v = start;
                while v < value && n > 1 {
                    v = match v.checked_mul(n) {
                        Some(next) => next,
                        None => return false,
                    };
                }
                v == value
            }
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::Add(n) => write!(f, "ADD_{}", n),
            Rule::MultiplesOf(n) => write!(f, "MULTIPLES_OF_{}", n),
            Rule::Multiply(n) => write!(f, "MULTIPLY_{}", n),
        }
    }
}

impl FromStr for Rule {
    type Err = PuzzleError;

    fn from_str(tag: &str) -> PuzzleResult<Self> {
        let (kind, amount) = tag
            .rsplit_once('_')
            .ok_or_else(|| PuzzleError::invalid_rule(tag))?;
        let amount: i64 = amount.parse().map_err(|_| PuzzleError::invalid_rule(tag))?;
        match kind {
            "ADD" => Ok(Rule::Add(amount)),
            "MULTIPLES_OF" => Ok(Rule::MultiplesOf(amount)),
            "MULTIPLY" => Ok(Rule::Multiply(amount)),
            _ => Err(PuzzleError::invalid_rule(tag)),
        }
    }
}

impl TryFrom<String> for Rule {
    type Error = PuzzleError;

    fn try_from(tag: String) -> PuzzleResult<Self> {
        tag.parse()
    }
}

impl From<Rule> for String {
    fn from(rule: Rule) -> Self {
        rule.to_string()
    }
}

/// A generated sequence puzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequencePuzzle {
    pub rule: Rule,
    /// The only value accepted as the first click
    pub start_value: i64,
    pub target_value: i64,
    /// Shuffled stars: the chain plus decoys
    pub options: Vec<i64>,
    /// The intended chain, start first
    pub solution: Vec<i64>,
}

impl SequencePuzzle {
    pub fn accepts(&self, chain: &[i64], candidate: i64) -> bool {
        validate_next_step(self.rule, self.start_value, chain, candidate)
    }
}

/// Generate a puzzle
pub fn generate<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> SequencePuzzle {
    let config = SequenceConfig::for_difficulty(difficulty);
    let rule = if config.allow_multiply && rng.gen_bool(0.5) {
        Rule::Multiply(config.factor)
    } else {
        Rule::Add(config.step)
    };
    build(rule, rule.default_start(), config.chain_length, config.decoys(), rng)
}

/// Lay out a chain of `length` values from `start` plus up to `decoys` off-chain values
pub fn build<R: Rng + ?Sized>(
    rule: Rule,
    start: i64,
    length: usize,
    decoys: usize,
    rng: &mut R,
) -> SequencePuzzle {
    let mut solution = vec![start];
    while solution.len() < length.max(1) {
        let Some(next) = solution.last().and_then(|&last| rule.next(last)) else {
            break;
        };
        solution.push(next);
    }
    let target_value = solution.last().copied().unwrap_or(start);

    let reach = match rule {
        Rule::Multiply(n) => n,
        Rule::Add(n) | Rule::MultiplesOf(n) => 2 * n,
    };
    let mut pool: Vec<i64> = (1..=target_value.saturating_add(reach.max(1)))
        .filter(|&v| !rule.on_progression(start, v))
        .collect();
    shuffle(rng, &mut pool);
    pool.truncate(decoys);

    let mut options: Vec<i64> = solution.iter().copied().chain(pool).collect();
    shuffle(rng, &mut options);

    SequencePuzzle {
        rule,
        start_value: start,
        target_value,
        options,
        solution,
    }
}

/// May `candidate` extend `chain`?
///
/// An empty chain only accepts `start_value`; after that the candidate must
/// be the rule's successor of the last value. Nothing is mutated.
pub fn validate_next_step(rule: Rule, start_value: i64, chain: &[i64], candidate: i64) -> bool {
    match chain.last() {
        None => candidate == start_value,
        Some(&last) => rule.next(last) == Some(candidate),
    }
}

pub fn is_complete(chain: &[i64], target_value: i64) -> bool {
    chain.last().is_some_and(|&last| last >= target_value)
}

/// Replay a finished chain: every click legal, every value an unused option, target reached
pub fn validate(puzzle: &SequencePuzzle, chain: &[i64]) -> bool {
    let mut available = puzzle.options.clone();
    for (i, &value) in chain.iter().enumerate() {
        if !puzzle.accepts(&chain[..i], value) {
            return false;
        }
        match available.iter().position(|&o| o == value) {
            Some(idx) => {
                available.swap_remove(idx);
            }
            None => return false,
        }
    }
    is_complete(chain, puzzle.target_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PuzzleRng;

    #[test]
    fn test_add_rule_steps() {
        let rule = Rule::Add(3);
        assert!(validate_next_step(rule, 1, &[], 1));
        assert!(validate_next_step(rule, 1, &[1], 4));
        assert!(validate_next_step(rule, 1, &[1, 4], 7));
        assert!(!validate_next_step(rule, 1, &[1], 2));
        assert!(!validate_next_step(rule, 1, &[], 3));
    }

    #[test]
    fn test_multiply_rule_steps() {
        let rule = Rule::Multiply(2);
        assert!(validate_next_step(rule, 2, &[2], 4));
        assert!(!validate_next_step(rule, 2, &[2], 6));
    }

    #[test]
    fn test_rule_tags() {
        for tag in ["ADD_3", "MULTIPLES_OF_4", "MULTIPLY_2"] {
            assert_eq!(tag.parse::<Rule>().unwrap().to_string(), tag);
        }
        assert_eq!("MULTIPLES_OF_5".parse::<Rule>().unwrap(), Rule::MultiplesOf(5));
        assert!("ADD_x".parse::<Rule>().is_err());
        assert!("DIVIDE_2".parse::<Rule>().is_err());
        assert!("ADD".parse::<Rule>().is_err());
    }

    #[test]
    fn test_completion() {
        assert!(!is_complete(&[], 10));
        assert!(!is_complete(&[2, 4], 6));
        assert!(is_complete(&[2, 4, 6], 6));
    }

    #[test]
    fn test_generated_chain_present_and_decoys_off_chain() {
        let mut rng = PuzzleRng::with_seed(42);
        for difficulty in Difficulty::all() {
            let config = SequenceConfig::for_difficulty(difficulty);
            for _ in 0..20 {
                let puzzle = generate(difficulty, &mut rng);
                assert_eq!(puzzle.options.len(), config.option_count);
                assert_eq!(puzzle.solution.first(), Some(&puzzle.start_value));
                assert_eq!(puzzle.solution.last(), Some(&puzzle.target_value));
                for value in &puzzle.solution {
                    assert!(puzzle.options.contains(value));
                }
                for decoy in puzzle.options.iter().filter(|v| !puzzle.solution.contains(v)) {
                    for i in 0..puzzle.solution.len() {
                        assert!(!puzzle.accepts(&puzzle.solution[..i], *decoy));
                    }
                }
                assert!(validate(&puzzle, &puzzle.solution));
            }
        }
    }

    #[test]
    fn test_step_grows_with_difficulty() {
        let mut rng = PuzzleRng::with_seed(4);
        let easy = generate(Difficulty::easiest(), &mut rng);
        assert_eq!(easy.rule, Rule::Add(2));
        assert_eq!(easy.start_value, 2);
    }

    #[test]
    fn test_validate_rejects_partial_and_foreign_chains() {
        let puzzle = build(Rule::Add(3), 3, 4, 3, &mut PuzzleRng::with_seed(1));
        assert_eq!(puzzle.solution, vec![3, 6, 9, 12]);
        assert!(!validate(&puzzle, &[]));
        assert!(!validate(&puzzle, &[3, 6, 9]));
        assert!(!validate(&puzzle, &[3, 6, 9, 12, 15]));
        assert!(!validate(&puzzle, &[6, 9, 12]));
    }

    #[test]
    fn test_progression_check_at_extremes() {
        assert!(!Rule::Add(2).on_progression(i64::MIN, i64::MAX));
        assert!(Rule::Add(2).on_progression(-4, 4));
        assert!(!Rule::Add(3).on_progression(5, 2));
        assert!(!validate_next_step(Rule::Add(1), 0, &[i64::MAX], i64::MIN));
    }

    #[test]
    fn test_rule_serializes_as_tag() {
        let json = serde_json::to_string(&Rule::Add(4)).unwrap();
        assert_eq!(json, "\"ADD_4\"");
        let rule: Rule = serde_json::from_str("\"MULTIPLY_3\"").unwrap();
        assert_eq!(rule, Rule::Multiply(3));
    }
}
