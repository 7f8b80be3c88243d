//! Basic example of using the puzzle engine

use puzzle_core::grid::find_value;
use puzzle_core::path::{self, ClickOutcome};
use puzzle_core::{Difficulty, PuzzleData, PuzzleGenerator, Position, PuzzleType};

fn main() {
    let mut generator = PuzzleGenerator::with_seed(7);

    // One of each, at medium difficulty
    let medium = Difficulty::new(3).unwrap_or_default();
    for puzzle_type in PuzzleType::ALL {
        let data = generator.generate(puzzle_type, medium);
        let solved = puzzle_core::validate(&data.solution_state(), &data);
        println!("{:<17} solution validates: {}", puzzle_type, solved);
    }

    // Play a number path by clicking along the generated route
    println!("\n--- Number path ---\n");
    let data = generator.generate(PuzzleType::NumberPath, Difficulty::easiest());
    let PuzzleData::NumberPath(puzzle) = &data else {
        return;
    };
    println!(
        "{}x{} grid, counting from {} by {} up to {}",
        puzzle.grid_size, puzzle.grid_size, puzzle.start_value, puzzle.step_value, puzzle.target_value
    );

    let mut board = puzzle.initial_board();
    print_board(&board);

    // Clues cannot be clicked
    let corner = Position::new(puzzle.grid_size - 1, puzzle.grid_size - 1);
    let fixed_click = path::apply_click(puzzle, &board, puzzle.path[0]);
    println!("click on the first clue: {:?}", matches!(fixed_click, ClickOutcome::Rejected));

    for &pos in puzzle.path.iter().filter(|&&p| !puzzle.is_fixed(p)) {
        match path::apply_click(puzzle, &board, pos) {
            ClickOutcome::Placed(next) => board = next,
            ClickOutcome::Cleared(next) => board = next,
            ClickOutcome::Rejected => println!("click at ({}, {}) rejected", pos.row, pos.col),
        }
    }

    println!();
    print_board(&board);
    println!("corner holds {:?}", board.get(corner).copied().flatten());
    if let Some(pos) = find_value(&board, &Some(puzzle.target_value)) {
        println!("target {} sits at ({}, {})", puzzle.target_value, pos.row, pos.col);
    }
    println!("solved: {}", path::validate(puzzle, &board));
}

fn print_board(board: &path::PathBoard) {
    for row in board.rows() {
        let line: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                Some(v) => format!("{:>3}", v),
                None => "  .".to_string(),
            })
            .collect();
        println!("{}", line.join(""));
    }
}
