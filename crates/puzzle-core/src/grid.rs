//! Grid construction primitives shared by the puzzle generators.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A cell coordinate on a square grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// All positions of a `size` x `size` grid in row-major order
    pub fn all(size: usize) -> impl Iterator<Item = Position> {
        (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(row, col)))
    }

    pub fn in_bounds(self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// Orthogonal neighbours that lie inside the grid
    pub fn neighbors(self, size: usize) -> impl Iterator<Item = Position> {
        let Position { row, col } = self;
        [
            row.checked_sub(1).map(|r| Position::new(r, col)),
            Some(Position::new(row + 1, col)),
            col.checked_sub(1).map(|c| Position::new(row, c)),
            Some(Position::new(row, col + 1)),
        ]
        .into_iter()
        .flatten()
        .filter(move |p| p.in_bounds(size))
    }
}

/// True when the two cells share an edge
pub fn is_adjacent(a: Position, b: Position) -> bool {
    manhattan(a, b) == 1
}

pub fn manhattan(a: Position, b: Position) -> usize {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
}

/// A pre-filled clue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell<T> {
    pub row: usize,
    pub col: usize,
    pub value: T,
}

impl<T> GridCell<T> {
    pub fn new(pos: Position, value: T) -> Self {
        Self {
            row: pos.row,
            col: pos.col,
            value,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

/// Square grid stored as rows.
///
/// Grids that arrive from callers may be ragged; every accessor is
/// bounds-checked and [`Grid::is_well_formed`] reports the shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    size: usize,
    cells: Vec<Vec<T>>,
}

impl<T> Grid<T> {
    /// Build a grid by evaluating `f` at every position
    pub fn from_fn(size: usize, mut f: impl FnMut(Position) -> T) -> Self {
        let cells = (0..size)
            .map(|row| (0..size).map(|col| f(Position::new(row, col))).collect())
            .collect();
        Self { size, cells }
    }

    /// Wrap existing rows; the size is taken from the row count
    pub fn from_rows(cells: Vec<Vec<T>>) -> Self {
        Self {
            size: cells.len(),
            cells,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn rows(&self) -> &[Vec<T>] {
        &self.cells
    }

    /// Every row and the row count match the declared size
    pub fn is_well_formed(&self) -> bool {
        self.cells.len() == self.size && self.cells.iter().all(|r| r.len() == self.size)
    }

    pub fn get(&self, pos: Position) -> Option<&T> {
        self.cells.get(pos.row)?.get(pos.col)
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        self.cells.get_mut(pos.row)?.get_mut(pos.col)
    }

    /// Set a cell; returns false if the position is outside the grid
    pub fn set(&mut self, pos: Position, value: T) -> bool {
        match self.get_mut(pos) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Cells of column `col`, top to bottom (short rows are skipped)
    pub fn column(&self, col: usize) -> impl Iterator<Item = &T> + '_ {
        self.cells.iter().filter_map(move |r| r.get(col))
    }

    /// Iterate `(position, value)` pairs in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, r)| {
            r.iter()
                .enumerate()
                .map(move |(col, v)| (Position::new(row, col), v))
        })
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            size: self.size,
            cells: self
                .cells
                .iter()
                .map(|r| r.iter().map(&mut f).collect())
                .collect(),
        }
    }

    pub(crate) fn swap_rows(&mut self, a: usize, b: usize) {
        self.cells.swap(a, b);
    }

    pub(crate) fn swap_cols(&mut self, a: usize, b: usize) {
        for row in &mut self.cells {
            row.swap(a, b);
        }
    }
}

impl<T: Clone> Grid<T> {
    pub fn filled(size: usize, value: T) -> Self {
        Self {
            size,
            cells: vec![vec![value; size]; size],
        }
    }
}

/// First position holding `value`, scanning row-major
pub fn find_value<T: PartialEq>(grid: &Grid<T>, value: &T) -> Option<Position> {
    grid.iter().find(|(_, v)| *v == value).map(|(p, _)| p)
}

/// Shuffle a slice using Fisher-Yates
pub fn shuffle<T, R: Rng + ?Sized>(rng: &mut R, slice: &mut [T]) {
    for i in (1..slice.len()).rev() {
        let j = rng.gen_range(0..=i);
        slice.swap(i, j);
    }
}

/// `count` distinct indices from `0..len`, in random order
pub fn sample_indices<R: Rng + ?Sized>(rng: &mut R, len: usize, count: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    shuffle(rng, &mut indices);
    indices.truncate(count.min(len));
    indices
}

/// Run `attempt` up to `max_attempts` times, returning the first success.
///
/// The closure receives the zero-based attempt number.
pub fn retry<T>(max_attempts: usize, attempt: impl FnMut(usize) -> Option<T>) -> Option<T> {
    (0..max_attempts).find_map(attempt)
}
