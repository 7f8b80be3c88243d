//! Mirror and symmetry puzzles: reproduce the left pattern, flipped, on the right.
//!
//! The rune variant cycles each right cell through a small palette; the
//! symmetry variant toggles cells on and off. Both are checked by
//! [`is_mirror`].

use crate::grid::{Grid, Position};
use crate::policy::MirrorConfig;
use crate::Difficulty;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Rune index; 0 is the blank rune every right cell starts on
pub type Rune = u8;

/// Rune mirror puzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MirrorPuzzle {
    pub grid_size: usize,
    pub palette_size: u8,
    pub left: Grid<Rune>,
}

impl MirrorPuzzle {
    pub fn initial_right(&self) -> Grid<Rune> {
        Grid::filled(self.grid_size, 0)
    }

    pub fn solution_right(&self) -> Grid<Rune> {
        mirrored(&self.left)
    }
}

/// On/off symmetry puzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymmetryPuzzle {
    pub grid_size: usize,
    pub left: Grid<bool>,
}

impl SymmetryPuzzle {
    pub fn initial_right(&self) -> Grid<bool> {
        Grid::filled(self.grid_size, false)
    }

    pub fn solution_right(&self) -> Grid<bool> {
        mirrored(&self.left)
    }
}

/// Generate a rune mirror puzzle; every left cell holds a non-blank rune
pub fn generate_mirror<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> MirrorPuzzle {
    let config = MirrorConfig::for_difficulty(difficulty);
    let palette = config.palette_size.max(2);
    let left = Grid::from_fn(config.grid_size, |_| rng.gen_range(1..palette));
    MirrorPuzzle {
        grid_size: config.grid_size,
        palette_size: palette,
        left,
    }
}

/// Generate a symmetry puzzle with at least one active cell
pub fn generate_symmetry<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> SymmetryPuzzle {
    let config = MirrorConfig::for_difficulty(difficulty);
    let n = config.grid_size;
    let mut left = Grid::from_fn(n, |_| rng.gen_bool(0.5));
    if n > 0 && left.iter().all(|(_, active)| !active) {
        let pos = Position::new(rng.gen_range(0..n), rng.gen_range(0..n));
        left.set(pos, true);
    }
    SymmetryPuzzle { grid_size: n, left }
}

/// Horizontal mirror image: `(row, col)` maps to `(row, size - 1 - col)`
pub fn mirrored<T: Clone>(left: &Grid<T>) -> Grid<T> {
    let rows = left
        .rows()
        .iter()
        .map(|row| row.iter().rev().cloned().collect())
        .collect();
    Grid::from_rows(rows)
}

/// True when `right` is exactly the horizontal mirror of `left`
pub fn is_mirror<T: PartialEq>(left: &Grid<T>, right: &Grid<T>) -> bool {
    let n = left.size();
    if right.size() != n || !left.is_well_formed() || !right.is_well_formed() {
        return false;
    }
    left.iter()
        .all(|(pos, value)| right.get(Position::new(pos.row, n - 1 - pos.col)) == Some(value))
}

/// Rune after `rune` when a cell is clicked
pub fn next_rune(rune: Rune, palette_size: u8) -> Rune {
    if palette_size == 0 {
        0
    } else {
        (rune.saturating_add(1)) % palette_size
    }
}

/// Right pattern after clicking `pos` in a rune puzzle
pub fn click_rune(puzzle: &MirrorPuzzle, right: &Grid<Rune>, pos: Position) -> Grid<Rune> {
    let mut next = right.clone();
    if let Some(cell) = next.get_mut(pos) {
        *cell = next_rune(*cell, puzzle.palette_size);
    }
    next
}

/// Right pattern after toggling `pos` in a symmetry puzzle
pub fn toggle(right: &Grid<bool>, pos: Position) -> Grid<bool> {
    let mut next = right.clone();
    if let Some(cell) = next.get_mut(pos) {
        *cell = !*cell;
    }
    next
}

pub fn validate_mirror(puzzle: &MirrorPuzzle, right: &Grid<Rune>) -> bool {
    right.size() == puzzle.grid_size && is_mirror(&puzzle.left, right)
}

pub fn validate_symmetry(puzzle: &SymmetryPuzzle, right: &Grid<bool>) -> bool {
    right.size() == puzzle.grid_size && is_mirror(&puzzle.left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PuzzleRng;

    fn single_active_left() -> SymmetryPuzzle {
        let mut left = Grid::filled(3, false);
        left.set(Position::new(0, 0), true);
        SymmetryPuzzle { grid_size: 3, left }
    }

    #[test]
    fn test_only_mirrored_cell_validates() {
        let puzzle = single_active_left();
        // (x, y) = (0, 0) mirrors to (2, 0): row 0, column 2.
        for pos in Position::all(3) {
            let mut right = Grid::filled(3, false);
            right.set(pos, true);
            assert_eq!(
                validate_symmetry(&puzzle, &right),
                pos == Position::new(0, 2),
                "unexpected result for {:?}",
                pos
            );
        }
        assert!(!validate_symmetry(&puzzle, &puzzle.initial_right()));
    }

    #[test]
    fn test_extra_active_cell_fails() {
        let puzzle = single_active_left();
        let mut right = puzzle.solution_right();
        right.set(Position::new(2, 2), true);
        assert!(!validate_symmetry(&puzzle, &right));
    }

    #[test]
    fn test_generated_puzzles_unsolved_at_start() {
        let mut rng = PuzzleRng::with_seed(42);
        for difficulty in Difficulty::all() {
            for _ in 0..20 {
                let mirror = generate_mirror(difficulty, &mut rng);
                assert_eq!(mirror.grid_size, usize::from(difficulty.level() / 2) + 3);
                assert!(!validate_mirror(&mirror, &mirror.initial_right()));
                assert!(validate_mirror(&mirror, &mirror.solution_right()));
                assert!(mirror.left.iter().all(|(_, &r)| r > 0 && r < mirror.palette_size));

                let symmetry = generate_symmetry(difficulty, &mut rng);
                assert!(!validate_symmetry(&symmetry, &symmetry.initial_right()));
                assert!(validate_symmetry(&symmetry, &symmetry.solution_right()));
            }
        }
    }

    #[test]
    fn test_click_cycles_palette() {
        assert_eq!(next_rune(0, 3), 1);
        assert_eq!(next_rune(1, 3), 2);
        assert_eq!(next_rune(2, 3), 0);

        let puzzle = generate_mirror(Difficulty::easiest(), &mut PuzzleRng::with_seed(2));
        let mut right = puzzle.initial_right();
        let pos = Position::new(1, 1);
        for _ in 0..puzzle.palette_size {
            right = click_rune(&puzzle, &right, pos);
        }
        assert_eq!(right, puzzle.initial_right());
    }

    #[test]
    fn test_toggle_and_wrong_size() {
        let puzzle = single_active_left();
        let right = toggle(&puzzle.initial_right(), Position::new(0, 2));
        assert!(validate_symmetry(&puzzle, &right));
        assert!(!validate_symmetry(&puzzle, &Grid::filled(4, false)));
    }
}
