mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use puzzle_core::{PuzzleData, PuzzleGenerator, PuzzleState, PuzzleType};
use serde::{de::DeserializeOwned, Serialize};
use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Types => {
            for puzzle_type in PuzzleType::ALL {
                println!("{}", puzzle_type);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Generate {
            tag,
            difficulty,
            seed,
            pretty,
        } => {
            let mut generator = match seed {
                Some(seed) => PuzzleGenerator::with_seed(seed),
                None => PuzzleGenerator::new(),
            };
            let data = generator
                .generate_tagged(&tag, difficulty)
                .with_context(|| format!("cannot generate {tag} at difficulty {difficulty}"))?;
            info!(puzzle_type = %data.puzzle_type(), difficulty, ?seed, "generated");
            print_json(&data, pretty)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate { puzzle, state } => {
            if is_stdin(&puzzle) && is_stdin(&state) {
                bail!("only one of --puzzle and --state can read from stdin");
            }
            let data: PuzzleData = read_json(&puzzle)?;
            let state: PuzzleState = read_json(&state)?;
            if state.puzzle_type() != data.puzzle_type() {
                debug!(
                    puzzle = %data.puzzle_type(),
                    state = %state.puzzle_type(),
                    "state belongs to another puzzle type"
                );
            }
            if puzzle_core::validate(&state, &data) {
                println!("solved");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("not solved");
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Solve { puzzle, pretty } => {
            let data: PuzzleData = read_json(&puzzle)?;
            print_json(&data.solution_state(), pretty)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = if is_stdin(path) {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
