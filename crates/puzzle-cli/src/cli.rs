//! Command-line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Generate and check logic puzzles
#[derive(Parser, Debug)]
#[command(name = "puzzle", version, about)]
pub struct Cli {
    /// Log generator internals to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the supported puzzle types
    Types,

    /// Generate a puzzle and print it as JSON
    Generate {
        /// Puzzle type tag, e.g. LATIN_SQUARE or number-path
        tag: String,

        /// Difficulty level, 1 (easiest) to 5 (hardest)
        #[arg(short, long, default_value_t = 1)]
        difficulty: i64,

        /// Seed for a reproducible puzzle
        #[arg(short, long)]
        seed: Option<u64>,

        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Check a player state against a puzzle
    Validate {
        /// Puzzle JSON file, or `-` for stdin
        #[arg(long)]
        puzzle: PathBuf,

        /// State JSON file, or `-` for stdin
        #[arg(long)]
        state: PathBuf,
    },

    /// Print the generator's solution state for a puzzle
    Solve {
        /// Puzzle JSON file, or `-` for stdin
        #[arg(long)]
        puzzle: PathBuf,

        #[arg(short, long)]
        pretty: bool,
    },
}
