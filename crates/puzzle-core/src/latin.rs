//! Latin square puzzles: every symbol exactly once per row and per column.

use crate::grid::{sample_indices, Grid, GridCell, Position};
use crate::policy::LatinSquareConfig;
use crate::Difficulty;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::trace;

/// Symbols placed in a Latin square
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Symbol {
    Sun,
    Moon,
    Star,
    Comet,
}

impl Symbol {
    pub const ALL: [Symbol; 4] = [Symbol::Sun, Symbol::Moon, Symbol::Star, Symbol::Comet];

    /// The first `n` symbols (clamped to the available set)
    pub fn palette(n: usize) -> &'static [Symbol] {
        &Self::ALL[..n.min(Self::ALL.len())]
    }
}

/// A generated Latin square puzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatinSquarePuzzle {
    pub size: usize,
    pub symbols: Vec<Symbol>,
    /// Clue cells the player cannot change
    pub fixed: Vec<GridCell<Symbol>>,
    /// The full square the clues were cut from
    pub solution: Grid<Symbol>,
}

impl LatinSquarePuzzle {
    /// Board with only the clues filled in
    pub fn initial_board(&self) -> Grid<Option<Symbol>> {
        let mut board = Grid::filled(self.size, None);
        for cell in &self.fixed {
            board.set(cell.position(), Some(cell.value));
        }
        board
    }

    pub fn is_fixed(&self, pos: Position) -> bool {
        self.fixed.iter().any(|c| c.position() == pos)
    }
}

/// Cyclic Latin square: `L[r][c] = symbol[(r + c) mod n]`
pub fn canonical(size: usize) -> Grid<Symbol> {
    let symbols = Symbol::palette(size);
    let n = symbols.len();
    Grid::from_fn(n, |p| symbols[(p.row + p.col) % n])
}

/// Generate a puzzle.
///
/// Permuting whole rows and whole columns of a Latin square preserves the
/// Latin property, so the shuffled square is valid by construction.
pub fn generate<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> LatinSquarePuzzle {
    let config = LatinSquareConfig::for_difficulty(difficulty);
    let mut square = canonical(config.size);
    let n = square.size();

    for i in (1..n).rev() {
        let j = rng.gen_range(0..=i);
        square.swap_rows(i, j);
    }
    for i in (1..n).rev() {
        let j = rng.gen_range(0..=i);
        square.swap_cols(i, j);
    }

    let mut fixed: Vec<GridCell<Symbol>> = sample_indices(rng, n * n, config.clues)
        .into_iter()
        .filter_map(|i| {
            let pos = Position::new(i / n, i % n);
            square.get(pos).map(|&s| GridCell::new(pos, s))
        })
        .collect();
    fixed.sort_by_key(|c| c.position());

    trace!(size = n, clues = fixed.len(), "generated latin square");
    LatinSquarePuzzle {
        size: n,
        symbols: Symbol::palette(n).to_vec(),
        fixed,
        solution: square,
    }
}

/// True when every row and every column holds `n` distinct symbols and no gaps
pub fn is_latin(board: &Grid<Option<Symbol>>, n: usize) -> bool {
    if board.size() != n || !board.is_well_formed() {
        return false;
    }
    (0..n).all(|i| is_permutation(board.rows()[i].iter(), n) && is_permutation(board.column(i), n))
}

fn is_permutation<'a>(cells: impl Iterator<Item = &'a Option<Symbol>>, n: usize) -> bool {
    let mut seen = HashSet::with_capacity(n);
    for cell in cells {
        match cell {
            Some(s) if seen.insert(*s) => {}
            _ => return false,
        }
    }
    seen.len() == n
}

/// Check a player's board against the puzzle
pub fn validate(puzzle: &LatinSquarePuzzle, board: &Grid<Option<Symbol>>) -> bool {
    let in_palette = board
        .iter()
        .all(|(_, cell)| cell.map_or(true, |s| puzzle.symbols.contains(&s)));
    let clues_kept = puzzle
        .fixed
        .iter()
        .all(|c| board.get(c.position()) == Some(&Some(c.value)));
    in_palette && clues_kept && is_latin(board, puzzle.size)
}
