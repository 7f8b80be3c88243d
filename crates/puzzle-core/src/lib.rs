//! Procedural generation and validation of logic puzzles.
//!
//! Each puzzle family is a pair of pure functions: a generator that turns a
//! [`Difficulty`] and a random source into an immutable [`PuzzleData`], and a
//! validator that decides whether a player's [`PuzzleState`] solves it. The
//! [`registry`] ties the pairs to their [`PuzzleType`] tags.
//!
//! ```
//! use puzzle_core::{Difficulty, PuzzleGenerator, PuzzleType};
//!
//! let mut generator = PuzzleGenerator::with_seed(42);
//! let data = generator.generate(PuzzleType::Balance, Difficulty::easiest());
//! assert!(puzzle_core::validate(&data.solution_state(), &data));
//! assert!(!puzzle_core::validate(&data.initial_state(), &data));
//! ```

pub mod arithmetic;
pub mod balance;
mod difficulty;
mod error;
pub mod grid;
pub mod latin;
pub mod mirror;
pub mod path;
pub mod policy;
mod puzzle;
pub mod registry;
mod rng;
pub mod sequence;
pub mod tribute;

pub use difficulty::Difficulty;
pub use error::{PuzzleError, PuzzleResult};
pub use grid::{Grid, GridCell, Position};
pub use puzzle::{PuzzleData, PuzzleState, PuzzleType};
pub use registry::{entry, generate_tagged, generate_with, validate, PuzzleEntry, PuzzleGenerator};
pub use rng::PuzzleRng;
