//! Balance puzzles: remove weights until both trays weigh the same.

use crate::grid::{sample_indices, shuffle};
use crate::policy::BalanceConfig;
use crate::Difficulty;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One side of the scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Left,
    Right,
}

/// A weight on a tray; heavy weights are the immovable base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weight {
    pub id: u32,
    pub value: u32,
    pub is_heavy: bool,
}

/// A generated balance puzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancePuzzle {
    /// Weight each tray carries once the decoys are gone
    pub target_value: u32,
    pub left_tray: Vec<Weight>,
    pub right_tray: Vec<Weight>,
    /// Ids of the decoy weights; removing exactly these balances the scale
    pub solution_removals: Vec<u32>,
}

impl BalancePuzzle {
    pub fn tray(&self, side: Side) -> &[Weight] {
        match side {
            Side::Left => &self.left_tray,
            Side::Right => &self.right_tray,
        }
    }

    /// Sum of the heavy base weights on `side`
    pub fn initial_weight(&self, side: Side) -> u64 {
        self.tray(side)
            .iter()
            .filter(|w| w.is_heavy)
            .map(|w| u64::from(w.value))
            .sum()
    }

    /// Removable weights on `side`
    pub fn options(&self, side: Side) -> impl Iterator<Item = &Weight> + '_ {
        self.tray(side).iter().filter(|w| !w.is_heavy)
    }

    fn find(&self, id: u32) -> Option<&Weight> {
        self.left_tray
            .iter()
            .chain(self.right_tray.iter())
            .find(|w| w.id == id)
    }
}

/// Generate a puzzle.
///
/// Each side is a heavy base plus removable weights summing to the shared
/// target, padded with decoys the player has to take off.
pub fn generate<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> BalancePuzzle {
    let config = BalanceConfig::for_difficulty(difficulty);
    let target = rng.gen_range(config.min_target..=config.max_target);

    let mut next_id = 1u32;
    let mut solution_removals = Vec::new();
    let mut left_tray = build_tray(&config, target, rng, &mut next_id, &mut solution_removals);
    let mut right_tray = build_tray(&config, target, rng, &mut next_id, &mut solution_removals);

    // Trays that start level would already count as solved.
    let total = |tray: &[Weight]| tray.iter().map(|w| w.value).sum::<u32>();
    if total(&left_tray) == total(&right_tray) {
        let decoy_ids: HashSet<u32> = solution_removals.iter().copied().collect();
        let tray = if rng.gen_bool(0.5) {
            &mut left_tray
        } else {
            &mut right_tray
        };
        if let Some(decoy) = tray.iter_mut().find(|w| decoy_ids.contains(&w.id)) {
            decoy.value += 1;
        }
    }

    solution_removals.sort_unstable();
    BalancePuzzle {
        target_value: target,
        left_tray,
        right_tray,
        solution_removals,
    }
}

fn build_tray<R: Rng + ?Sized>(
    config: &BalanceConfig,
    target: u32,
    rng: &mut R,
    next_id: &mut u32,
    decoy_ids: &mut Vec<u32>,
) -> Vec<Weight> {
    let heavy = rng.gen_range(1..=(target / 2).max(1));
    let mut tray = vec![Weight {
        id: take_id(next_id),
        value: heavy,
        is_heavy: true,
    }];
    for value in split(target - heavy, config.kept_weights, rng) {
        tray.push(Weight {
            id: take_id(next_id),
            value,
            is_heavy: false,
        });
    }
    for _ in 0..config.decoys {
        let id = take_id(next_id);
        decoy_ids.push(id);
        tray.push(Weight {
            id,
            value: rng.gen_range(1..=config.max_decoy.max(1)),
            is_heavy: false,
        });
    }
    shuffle(rng, &mut tray);
    tray
}

fn take_id(next_id: &mut u32) -> u32 {
    let id = *next_id;
    *next_id += 1;
    id
}

/// Split `total` into `parts` positive values (fewer if `total` is too small)
fn split<R: Rng + ?Sized>(total: u32, parts: usize, rng: &mut R) -> Vec<u32> {
    if total == 0 || parts == 0 {
        return Vec::new();
    }
    let parts = parts.min(total as usize);
    let mut cuts: Vec<u32> = sample_indices(rng, total as usize - 1, parts - 1)
        .into_iter()
        .map(|i| i as u32 + 1)
        .collect();
    cuts.sort_unstable();
    let mut values = Vec::with_capacity(parts);
    let mut prev = 0;
    for cut in cuts.into_iter().chain(std::iter::once(total)) {
        values.push(cut - prev);
        prev = cut;
    }
    values
}

/// Sum of what is still on `side` after `removed`, widened so no tray can overflow
pub fn tray_sum(puzzle: &BalancePuzzle, side: Side, removed: &[u32]) -> u64 {
    puzzle
        .tray(side)
        .iter()
        .filter(|w| !removed.contains(&w.id))
        .map(|w| u64::from(w.value))
        .sum()
}

/// Balanced when both trays weigh the same and neither is empty.
///
/// Removing a heavy weight, an unknown id, or the same id twice is invalid.
pub fn validate(puzzle: &BalancePuzzle, removed: &[u32]) -> bool {
    let mut seen = HashSet::with_capacity(removed.len());
    for id in removed {
        match puzzle.find(*id) {
            Some(w) if !w.is_heavy && seen.insert(*id) => {}
            _ => return false,
        }
    }
    let left = tray_sum(puzzle, Side::Left, removed);
    let right = tray_sum(puzzle, Side::Right, removed);
    left == right && left > 0
}
