//! Solve N-Queens from the command line and print the board.

use clap::Parser;
use vinculum::problems::{n_queens, NQueens};
use vinculum::solver::{stats::render_result_table, SolverConfig};

#[derive(Parser)]
#[command(about = "Place N queens on an NxN board with no two attacking")]
struct Args {
    /// Board size.
    n: usize,

    /// Skip AC-3 preprocessing.
    #[arg(long)]
    no_ac3: bool,
}

fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = SolverConfig::default().with_ac3_preprocessing(!args.no_ac3);
    let result = match n_queens::solve(args.n, config) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("error: {}", error);
            std::process::exit(1);
        }
    };

    println!("{}", render_result_table(&result));

    if let Some(solution) = result.solution() {
        let problem = NQueens::new(args.n).expect("validated above");
        if args.n <= 60 {
            println!("{}", problem.format_board(solution));
        }
        println!(
            "placement valid: {}",
            problem.validate_solution(solution)
        );
    } else {
        println!("no solution found");
    }
}
