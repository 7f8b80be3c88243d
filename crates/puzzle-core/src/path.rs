//! Number path puzzles.
//!
//! A Hamiltonian path visits every cell of the grid once; cell `i` along the
//! path carries `start + i * step`. The player fills the gaps one value at a
//! time, guided by the revealed clues.
//!
//! Path search is randomized depth-first backtracking, bounded to
//! [`PATH_MAX_ATTEMPTS`](crate::policy::PATH_MAX_ATTEMPTS) attempts of at most
//! [`PATH_MAX_STEPS_PER_ATTEMPT`] expansions each. When every attempt fails the
//! generator falls back to a boustrophedon ("snake") path, so generation
//! always terminates with a valid path.

use crate::grid::{
    is_adjacent, manhattan, retry, sample_indices, shuffle, Grid, GridCell, Position,
};
use crate::policy::{NumberPathConfig, PATH_MAX_STEPS_PER_ATTEMPT};
use crate::Difficulty;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::ops::Bound;
use tracing::{debug, trace};

/// Player board: `None` is an empty cell
pub type PathBoard = Grid<Option<i64>>;

/// A generated number path puzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberPathPuzzle {
    pub grid_size: usize,
    pub start_value: i64,
    pub step_value: i64,
    /// Value of the last path cell
    pub target_value: i64,
    /// The generated Hamiltonian path, start first
    pub path: Vec<Position>,
    pub fixed: Vec<GridCell<i64>>,
}

impl NumberPathPuzzle {
    /// Label `path` and reveal the cells at `clue_indices`
    pub fn from_path(
        grid_size: usize,
        path: Vec<Position>,
        start_value: i64,
        step_value: i64,
        clue_indices: &[usize],
    ) -> Self {
        let mut fixed: Vec<GridCell<i64>> = clue_indices
            .iter()
            .filter_map(|&i| {
                let pos = *path.get(i)?;
                Some(GridCell::new(pos, value_at(start_value, step_value, i)?))
            })
            .collect();
        fixed.sort_by_key(|c| c.value);
        fixed.dedup_by_key(|c| c.value);
        let last = path.len().saturating_sub(1);
        let target_value = value_at(start_value, step_value, last).unwrap_or(if step_value < 0 {
            i64::MIN
        } else {
            i64::MAX
        });
        Self {
            grid_size,
            start_value,
            step_value,
            target_value,
            path,
            fixed,
        }
    }

    pub fn is_fixed(&self, pos: Position) -> bool {
        self.fixed.iter().any(|c| c.position() == pos)
    }

    /// Board with only the clues filled in
    pub fn initial_board(&self) -> PathBoard {
        let mut board = Grid::filled(self.grid_size, None);
        for cell in &self.fixed {
            board.set(cell.position(), Some(cell.value));
        }
        board
    }

    /// Board with the whole generated path labelled
    pub fn solution_board(&self) -> PathBoard {
        let mut board = Grid::filled(self.grid_size, None);
        for (i, &pos) in self.path.iter().enumerate() {
            board.set(pos, value_at(self.start_value, self.step_value, i));
        }
        board
    }
}

/// Label of path cell `i`; `None` when it does not fit in an `i64`
pub fn value_at(start_value: i64, step_value: i64, i: usize) -> Option<i64> {
    i64::try_from(i)
        .ok()?
        .checked_mul(step_value)?
        .checked_add(start_value)
}

/// Result of clicking a cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The next value was written into the clicked cell
    Placed(PathBoard),
    /// The clicked value and every higher non-fixed value were cleared
    Cleared(PathBoard),
    /// Illegal click; the board is unchanged
    Rejected,
}

/// Generate a puzzle
pub fn generate<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> NumberPathPuzzle {
    let config = NumberPathConfig::for_difficulty(difficulty);
    let path = hamiltonian_path(config.grid_size, config.max_attempts, rng);
    let last = path.len() - 1;

    let mut clues = vec![0, last];
    if config.reveal_direction {
        clues.push(1);
    }
    let extra = config.clue_count().saturating_sub(clues.len());
    let middle: Vec<usize> = (1..last).filter(|i| !clues.contains(i)).collect();
    clues.extend(
        sample_indices(rng, middle.len(), extra)
            .into_iter()
            .map(|i| middle[i]),
    );

    NumberPathPuzzle::from_path(
        config.grid_size,
        path,
        config.start_value,
        config.step_value,
        &clues,
    )
}

/// Find a Hamiltonian path on a `size` x `size` grid.
///
/// Makes at most `max_attempts` randomized searches, then falls back to
/// [`snake_path`].
pub fn hamiltonian_path<R: Rng + ?Sized>(
    size: usize,
    max_attempts: usize,
    rng: &mut R,
) -> Vec<Position> {
    if size == 0 {
        return Vec::new();
    }
    let found = retry(max_attempts, |attempt| {
        let start = Position::new(rng.gen_range(0..size), rng.gen_range(0..size));
        let mut visited = vec![false; size * size];
        visited[start.row * size + start.col] = true;
        let mut path = vec![start];
        let mut budget = PATH_MAX_STEPS_PER_ATTEMPT;
        if extend_path(&mut path, &mut visited, size, rng, &mut budget) {
            trace!(size, attempt, "found hamiltonian path");
            Some(path)
        } else {
            trace!(size, attempt, ?start, "path attempt failed");
            None
        }
    });
    if let Some(path) = found {
        return path;
    }
    debug!(size, max_attempts, "path search exhausted, using snake path");
    snake_path(size)
}

fn extend_path<R: Rng + ?Sized>(
    path: &mut Vec<Position>,
    visited: &mut [bool],
    size: usize,
    rng: &mut R,
    budget: &mut usize,
) -> bool {
    if path.len() == size * size {
        return true;
    }
    if *budget == 0 {
        return false;
    }
    *budget -= 1;

    let Some(&last) = path.last() else {
        return false;
    };
    let mut moves: Vec<Position> = last.neighbors(size).collect();
    shuffle(rng, &mut moves);

    for next in moves {
        let idx = next.row * size + next.col;
        if visited[idx] {
            continue;
        }
        visited[idx] = true;
        path.push(next);
        if extend_path(path, visited, size, rng, budget) {
            return true;
        }
        path.pop();
        visited[idx] = false;
    }
    false
}

/// Row-by-row path alternating direction; always Hamiltonian
pub fn snake_path(size: usize) -> Vec<Position> {
    (0..size)
        .flat_map(|row| {
            let cols: Box<dyn Iterator<Item = usize>> = if row % 2 == 0 {
                Box::new(0..size)
            } else {
                Box::new((0..size).rev())
            };
            cols.map(move |col| Position::new(row, col))
        })
        .collect()
}

/// True when `path` visits every cell exactly once through orthogonal steps
pub fn is_hamiltonian(path: &[Position], size: usize) -> bool {
    let unique: HashSet<&Position> = path.iter().collect();
    path.len() == size * size
        && unique.len() == path.len()
        && path.iter().all(|p| p.in_bounds(size))
        && path.windows(2).all(|w| is_adjacent(w[0], w[1]))
}

/// Placed values and where they sit; the first occurrence wins
fn placed_values(board: &PathBoard) -> BTreeMap<i64, Position> {
    let mut placed = BTreeMap::new();
    for (pos, cell) in board.iter() {
        if let Some(v) = cell {
            placed.entry(*v).or_insert(pos);
        }
    }
    placed
}

/// End of the unbroken run `start, start + step, ...` on the board.
///
/// Clues further along the path do not count until the run reaches them.
pub fn head(puzzle: &NumberPathPuzzle, board: &PathBoard) -> Option<(Position, i64)> {
    head_in(puzzle, &placed_values(board))
}

fn head_in(puzzle: &NumberPathPuzzle, placed: &BTreeMap<i64, Position>) -> Option<(Position, i64)> {
    if puzzle.step_value <= 0 {
        return None;
    }
    let mut value = puzzle.start_value;
    let mut pos = *placed.get(&value)?;
    while let Some(next_value) = value.checked_add(puzzle.step_value) {
        let Some(&next) = placed.get(&next_value) else {
            break;
        };
        value = next_value;
        pos = next;
    }
    Some((pos, value))
}

/// Can the next value legally go into `candidate`?
///
/// The candidate must touch the head, and it must still be able to reach the
/// next value already on the board in exactly the number of steps left. With
/// one step left that is plain adjacency, so a placement can never strand a
/// later clue.
pub fn validate_move(puzzle: &NumberPathPuzzle, board: &PathBoard, candidate: Position) -> bool {
    if !candidate.in_bounds(puzzle.grid_size) || puzzle.step_value <= 0 {
        return false;
    }
    if board.get(candidate) != Some(&None) {
        return false;
    }
    let placed = placed_values(board);
    let Some((head_pos, head_value)) = head_in(puzzle, &placed) else {
        return false;
    };
    let Some(next) = head_value.checked_add(puzzle.step_value) else {
        return false;
    };
    if next > puzzle.target_value || !is_adjacent(head_pos, candidate) {
        return false;
    }

    match placed.range((Bound::Excluded(next), Bound::Unbounded)).next() {
        Some((&bridge_value, &bridge_pos)) => {
            let Some(gap) = bridge_value.checked_sub(next) else {
                return false;
            };
            if gap % puzzle.step_value != 0 {
                return false;
            }
            let steps = (gap / puzzle.step_value) as usize;
            let distance = manhattan(candidate, bridge_pos);
            distance <= steps && (steps - distance) % 2 == 0
        }
        None => true,
    }
}

/// Apply a click: place the next value, undo from a filled cell, or reject
pub fn apply_click(puzzle: &NumberPathPuzzle, board: &PathBoard, pos: Position) -> ClickOutcome {
    match board.get(pos) {
        None => ClickOutcome::Rejected,
        Some(Some(_)) if puzzle.is_fixed(pos) => ClickOutcome::Rejected,
        Some(Some(value)) => {
            let value = *value;
            let mut cleared = board.map(|cell| match cell {
                Some(v) if *v >= value => None,
                other => *other,
            });
            // Clues above the cleared value stay in place.
            for clue in puzzle.fixed.iter().filter(|c| c.value >= value) {
                cleared.set(clue.position(), Some(clue.value));
            }
            ClickOutcome::Cleared(cleared)
        }
        Some(None) => {
            if !validate_move(puzzle, board, pos) {
                return ClickOutcome::Rejected;
            }
            let Some(next) = head(puzzle, board)
                .and_then(|(_, head_value)| head_value.checked_add(puzzle.step_value))
            else {
                return ClickOutcome::Rejected;
            };
            let mut placed = board.clone();
            placed.set(pos, Some(next));
            ClickOutcome::Placed(placed)
        }
    }
}

/// Solved when every cell is filled, clues are intact and consecutive values touch
pub fn validate(puzzle: &NumberPathPuzzle, board: &PathBoard) -> bool {
    let n = puzzle.grid_size;
    if board.size() != n || !board.is_well_formed() {
        return false;
    }
    if board.iter().any(|(_, cell)| cell.is_none()) {
        return false;
    }
    if !puzzle
        .fixed
        .iter()
        .all(|c| board.get(c.position()) == Some(&Some(c.value)))
    {
        return false;
    }

    let placed = placed_values(board);
    let expected = (0..n * n).map(|i| value_at(puzzle.start_value, puzzle.step_value, i));
    if placed.len() != n * n || !placed.keys().map(|&v| Some(v)).eq(expected) {
        return false;
    }
    let order: Vec<Position> = placed.values().copied().collect();
    order.windows(2).all(|w| is_adjacent(w[0], w[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PuzzleRng;

    fn snake_puzzle(clues: &[usize]) -> NumberPathPuzzle {
        NumberPathPuzzle::from_path(3, snake_path(3), 1, 1, clues)
    }

    #[test]
    fn test_generated_paths_are_hamiltonian() {
        let mut rng = PuzzleRng::with_seed(42);
        for difficulty in Difficulty::all() {
            for _ in 0..50 {
                let puzzle = generate(difficulty, &mut rng);
                assert!(is_hamiltonian(&puzzle.path, puzzle.grid_size));
                assert_eq!(puzzle.path.len(), puzzle.grid_size * puzzle.grid_size);
            }
        }
    }

    #[test]
    fn test_snake_path_is_hamiltonian() {
        for size in 1..=6 {
            assert!(is_hamiltonian(&snake_path(size), size));
        }
    }

    #[test]
    fn test_zero_attempts_falls_back_to_snake() {
        let mut rng = PuzzleRng::with_seed(1);
        assert_eq!(hamiltonian_path(4, 0, &mut rng), snake_path(4));
    }

    #[test]
    fn test_clue_selection() {
        let mut rng = PuzzleRng::with_seed(7);
        for difficulty in Difficulty::all() {
            let config = NumberPathConfig::for_difficulty(difficulty);
            let puzzle = generate(difficulty, &mut rng);
            let first = puzzle.path[0];
            let last = *puzzle.path.last().unwrap();
            assert!(puzzle.is_fixed(first));
            assert!(puzzle.is_fixed(last));
            if config.reveal_direction {
                assert!(puzzle.is_fixed(puzzle.path[1]));
            }
            assert_eq!(puzzle.fixed.len(), config.clue_count());
            assert_eq!(
                puzzle.target_value,
                config.start_value + (config.cell_count() as i64 - 1) * config.step_value
            );
        }
    }

    #[test]
    fn test_move_must_touch_head() {
        let puzzle = snake_puzzle(&[0, 8]);
        let board = puzzle.initial_board();
        assert_eq!(head(&puzzle, &board), Some((Position::new(0, 0), 1)));
        assert!(!validate_move(&puzzle, &board, Position::new(1, 1)));
        assert!(validate_move(&puzzle, &board, Position::new(0, 1)));
    }

    #[test]
    fn test_move_must_bridge_to_next_clue() {
        // Value 3 is revealed at (0, 2), so value 2 has to sit next to it.
        let puzzle = snake_puzzle(&[0, 2, 8]);
        let board = puzzle.initial_board();
        assert!(!validate_move(&puzzle, &board, Position::new(1, 0)));
        assert!(validate_move(&puzzle, &board, Position::new(0, 1)));
    }

    #[test]
    fn test_move_must_stay_within_reach() {
        // Column-wise snake on 4x4: value 4 is revealed at (3, 0), two steps past value 2.
        let path: Vec<Position> = snake_path(4)
            .into_iter()
            .map(|p| Position::new(p.col, p.row))
            .collect();
        let puzzle = NumberPathPuzzle::from_path(4, path, 1, 1, &[0, 3, 15]);
        let board = puzzle.initial_board();
        assert!(!validate_move(&puzzle, &board, Position::new(0, 1)));
        assert!(validate_move(&puzzle, &board, Position::new(1, 0)));
    }

    #[test]
    fn test_occupied_and_out_of_bounds_rejected() {
        let puzzle = snake_puzzle(&[0, 1, 8]);
        let board = puzzle.initial_board();
        assert!(!validate_move(&puzzle, &board, Position::new(0, 1)));
        assert!(!validate_move(&puzzle, &board, Position::new(0, 3)));
        assert_eq!(
            apply_click(&puzzle, &board, Position::new(5, 5)),
            ClickOutcome::Rejected
        );
    }

    #[test]
    fn test_head_skips_over_reached_clues() {
        let puzzle = snake_puzzle(&[0, 2, 8]);
        let ClickOutcome::Placed(board) = apply_click(&puzzle, &puzzle.initial_board(), Position::new(0, 1))
        else {
            panic!("placement should succeed");
        };
        assert_eq!(head(&puzzle, &board), Some((Position::new(0, 2), 3)));
    }

    #[test]
    fn test_cascading_undo() {
        let puzzle = snake_puzzle(&[0, 5, 8]);
        let mut board = puzzle.initial_board();
        for pos in [Position::new(0, 1), Position::new(0, 2), Position::new(1, 2)] {
            match apply_click(&puzzle, &board, pos) {
                ClickOutcome::Placed(next) => board = next,
                other => panic!("unexpected {:?}", other),
            }
        }
        assert_eq!(board.get(Position::new(1, 2)), Some(&Some(4)));

        let ClickOutcome::Cleared(undone) = apply_click(&puzzle, &board, Position::new(0, 2)) else {
            panic!("undo should clear");
        };
        assert_eq!(undone.get(Position::new(0, 1)), Some(&Some(2)));
        assert_eq!(undone.get(Position::new(0, 2)), Some(&None));
        assert_eq!(undone.get(Position::new(1, 2)), Some(&None));
        // Clues survive the cascade.
        assert_eq!(undone.get(Position::new(1, 0)), Some(&Some(6)));
        assert_eq!(undone.get(Position::new(2, 2)), Some(&Some(9)));
    }

    #[test]
    fn test_clicking_clue_rejected() {
        let puzzle = snake_puzzle(&[0, 8]);
        let board = puzzle.initial_board();
        assert_eq!(
            apply_click(&puzzle, &board, Position::new(0, 0)),
            ClickOutcome::Rejected
        );
    }

    #[test]
    fn test_playing_generated_path_solves() {
        let mut rng = PuzzleRng::with_seed(99);
        for difficulty in Difficulty::all() {
            let puzzle = generate(difficulty, &mut rng);
            let mut board = puzzle.initial_board();
            assert!(!validate(&puzzle, &board));
            for &pos in &puzzle.path {
                if puzzle.is_fixed(pos) {
                    continue;
                }
                match apply_click(&puzzle, &board, pos) {
                    ClickOutcome::Placed(next) => board = next,
                    other => panic!("path cell {:?} rejected: {:?}", pos, other),
                }
            }
            assert!(validate(&puzzle, &board));
            assert_eq!(board, puzzle.solution_board());
        }
    }

    #[test]
    fn test_alternative_path_accepted() {
        let puzzle = snake_puzzle(&[0, 8]);
        // Column-wise snake with the same endpoints.
        let columns = [
            (0, 0), (1, 0), (2, 0), (2, 1), (1, 1), (0, 1), (0, 2), (1, 2), (2, 2),
        ];
        let mut board = Grid::filled(3, None);
        for (i, &(r, c)) in columns.iter().enumerate() {
            board.set(Position::new(r, c), Some(i as i64 + 1));
        }
        assert!(validate(&puzzle, &board));
    }

    #[test]
    fn test_broken_chain_rejected() {
        let puzzle = snake_puzzle(&[0, 8]);
        let mut board = puzzle.solution_board();
        // Swap 4 and 6, which are not adjacent to their neighbours afterwards.
        board.set(Position::new(1, 2), Some(6));
        board.set(Position::new(1, 0), Some(4));
        assert!(!validate(&puzzle, &board));
    }

    #[test]
    fn test_huge_values_are_unsolved_not_panics() {
        let step = i64::MAX / 2;
        let puzzle = NumberPathPuzzle::from_path(2, snake_path(2), 0, step, &[0]);
        assert_eq!(value_at(0, step, 3), None);

        let mut board = Grid::filled(2, None);
        board.set(Position::new(0, 0), Some(0));
        board.set(Position::new(0, 1), Some(step));
        board.set(Position::new(1, 1), Some(2 * step));
        assert_eq!(head(&puzzle, &board), Some((Position::new(1, 1), 2 * step)));
        assert!(!validate_move(&puzzle, &board, Position::new(1, 0)));
        assert_eq!(
            apply_click(&puzzle, &board, Position::new(1, 0)),
            ClickOutcome::Rejected
        );

        board.set(Position::new(1, 0), Some(i64::MAX));
        assert!(!validate(&puzzle, &board));
        assert_eq!(puzzle.solution_board().get(Position::new(1, 0)), Some(&None));
    }

    #[test]
    fn test_bridge_gap_overflow_rejected() {
        let puzzle = NumberPathPuzzle::from_path(2, snake_path(2), i64::MIN, 1, &[0]);
        let mut board = puzzle.initial_board();
        board.set(Position::new(1, 1), Some(i64::MAX));
        assert!(!validate_move(&puzzle, &board, Position::new(0, 1)));
    }
}
