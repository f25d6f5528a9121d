//! Solve a Sudoku puzzle: the bundled easy grid, or one passed as an
//! 81-character string (0 or . for blanks).

use vinculum::problems::{Problem, Sudoku};
use vinculum::solver::{stats::render_result_table, BacktrackingSolver, Solver};

fn main() {
    tracing_subscriber::fmt::init();

    let puzzle = match std::env::args().nth(1) {
        Some(cells) => match Sudoku::parse(&cells) {
            Ok(puzzle) => puzzle,
            Err(error) => {
                eprintln!("error: {}", error);
                std::process::exit(1);
            }
        },
        None => Sudoku::easy(),
    };

    let csp = puzzle.build().expect("9x9 grids always build");
    let result = BacktrackingSolver::new().solve(&csp);

    println!("{}", render_result_table(&result));
    match result.solution() {
        Some(solution) => println!("{}", Sudoku::format_solution(&csp, solution)),
        None => println!("no solution found"),
    }
}
