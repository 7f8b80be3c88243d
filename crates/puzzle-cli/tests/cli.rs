use puzzle_core::{PuzzleData, PuzzleType};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn puzzle() -> Command {
    Command::new(env!("CARGO_BIN_EXE_puzzle"))
}

fn run(args: &[&str]) -> Output {
    puzzle().args(args).output().expect("failed to run puzzle cli")
}

fn run_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = puzzle()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn puzzle cli");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).trim().to_string()
}

fn write(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path_str(&path)
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

fn generate(tag: &str, seed: &str) -> String {
    let out = run(&["generate", tag, "--difficulty", "2", "--seed", seed]);
    assert!(out.status.success());
    stdout(&out)
}

#[test]
fn test_types_lists_every_tag() {
    let out = run(&["types"]);
    assert!(out.status.success());
    let listed: Vec<String> = stdout(&out).lines().map(str::to_string).collect();
    let expected: Vec<String> = PuzzleType::ALL.iter().map(|t| t.tag().to_string()).collect();
    assert_eq!(listed, expected);
}

#[test]
fn test_generate_is_reproducible_with_seed() {
    let a = generate("number-path", "42");
    let b = generate("NUMBER_PATH", "42");
    assert_eq!(a, b);
    let data: PuzzleData = serde_json::from_str(&a).unwrap();
    assert_eq!(data.puzzle_type(), PuzzleType::NumberPath);
}

#[test]
fn test_generate_rejects_bad_input() {
    let out = run(&["generate", "MIRROR", "--difficulty", "9"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("difficulty"));

    let out = run(&["generate", "MAZE"]);
    assert!(!out.status.success());
}

#[test]
fn test_validate_exit_codes() {
    let dir = TempDir::new().unwrap();
    let json = generate("BALANCE", "7");
    let data: PuzzleData = serde_json::from_str(&json).unwrap();
    let puzzle_path = write(&dir, "puzzle.json", &json);

    let solved = serde_json::to_string(&data.solution_state()).unwrap();
    let solved_path = write(&dir, "solved.json", &solved);
    let out = run(&["validate", "--puzzle", &puzzle_path, "--state", &solved_path]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "solved");

    let fresh = serde_json::to_string(&data.initial_state()).unwrap();
    let fresh_path = write(&dir, "fresh.json", &fresh);
    let out = run(&["validate", "--puzzle", &puzzle_path, "--state", &fresh_path]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout(&out), "not solved");
}

#[test]
fn test_solve_output_validates_from_stdin() {
    let dir = TempDir::new().unwrap();
    let json = generate("GUARDIAN_TRIBUTE", "3");
    let puzzle_path = write(&dir, "puzzle.json", &json);

    let out = run_with_stdin(&["solve", "--puzzle", "-"], &json);
    assert!(out.status.success());
    let state = stdout(&out);

    let out = run_with_stdin(&["validate", "--puzzle", &puzzle_path, "--state", "-"], &state);
    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn test_only_one_input_from_stdin() {
    let out = run_with_stdin(&["validate", "--puzzle", "-", "--state", "-"], "{}");
    assert!(!out.status.success());
    assert_ne!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stderr).contains("stdin"));
}

#[test]
fn test_missing_and_malformed_files_fail() {
    let dir = TempDir::new().unwrap();
    let missing = path_str(&dir.path().join("missing.json"));
    let out = run(&["solve", "--puzzle", &missing]);
    assert!(!out.status.success());

    let garbage = write(&dir, "garbage.json", "not json");
    let out = run(&["solve", "--puzzle", &garbage]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid JSON"));
}
