use crate::{
    constraint::{diagonal::NQueensDiagonal, not_equal::NotEqual},
    error::{Error, Result},
    model::{Assignment, Csp, Domain},
    problems::Problem,
    solver::{
        metrics::SolverMetrics,
        min_conflicts::{is_valid_placement, MinConflictsConfig, MinConflictsQueens},
        BacktrackingSolver, Solver, SolverConfig, SolverResult,
    },
};

/// Board sizes from this threshold up are routed to min-conflicts
/// instead of backtracking.
pub const MIN_CONFLICTS_THRESHOLD: usize = 50;
/// Largest accepted board.
pub const MAX_N: usize = 10_000;

/// N-Queens: place N queens on an N×N board with no two attacking.
///
/// One variable per row (`Q0..`), each holding the queen's column;
/// every row pair gets a [`NotEqual`] (columns) and an
/// [`NQueensDiagonal`] (diagonals).
pub struct NQueens {
    n: usize,
}

impl NQueens {
    pub fn new(n: usize) -> Result<Self> {
        if n < 1 || n > MAX_N {
            return Err(Error::InvalidInput(format!(
                "n must be between 1 and {}, got {}",
                MAX_N, n
            )));
        }
        Ok(Self { n })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Checks a complete assignment row by row: every queen in range,
    /// no shared columns, no shared diagonals.
    pub fn validate_solution(&self, assignment: &Assignment<i64>) -> bool {
        let mut columns = Vec::with_capacity(self.n);
        for row in 0..self.n {
            match assignment.value(row) {
                Some(&col) if col >= 0 && (col as usize) < self.n => columns.push(col as usize),
                _ => return false,
            }
        }
        is_valid_placement(&columns)
    }

    /// ASCII board with one `Q` per row.
    pub fn format_board(&self, assignment: &Assignment<i64>) -> String {
        let mut out = String::with_capacity(self.n * (2 * self.n + 1));
        for row in 0..self.n {
            let queen_col = assignment.value(row).copied();
            for col in 0..self.n {
                out.push(if queen_col == Some(col as i64) { 'Q' } else { '.' });
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }
}

impl Problem<i64> for NQueens {
    fn build(&self) -> Result<Csp<i64>> {
        let mut builder = Csp::builder(format!("{}-Queens", self.n));

        let mut queens = Vec::with_capacity(self.n);
        for row in 0..self.n {
            queens.push(builder.variable(format!("Q{}", row), Domain::range(0, self.n as i64 - 1))?);
        }

        for i in 0..self.n {
            for j in i + 1..self.n {
                builder.constraint(NotEqual::new(queens[i], queens[j]))?;
                builder.constraint(NQueensDiagonal::new(
                    queens[i],
                    queens[j],
                    (j - i) as i64,
                ))?;
            }
        }

        Ok(builder.build())
    }

    fn name(&self) -> String {
        format!("{}-Queens", self.n)
    }

    fn description(&self) -> String {
        format!(
            "Place {} queens on a {0}x{0} chessboard such that no two queens attack each other.",
            self.n
        )
    }
}

/// Solves N-Queens with the routing rule external layers use: small
/// boards go through backtracking, boards of [`MIN_CONFLICTS_THRESHOLD`]
/// rows or more go to min-conflicts with a budget of 50·N iterations.
pub fn solve(n: usize, config: SolverConfig<i64>) -> Result<SolverResult<i64>> {
    let problem = NQueens::new(n)?;

    if n >= MIN_CONFLICTS_THRESHOLD {
        let metrics = SolverMetrics::new();
        let mut local_search = MinConflictsQueens::with_config(n, MinConflictsConfig::for_board(n));
        let outcome = local_search.solve();
        metrics.stop();

        return Ok(match outcome {
            Some(queens) => {
                let mut assignment = Assignment::new(n);
                for (row, &col) in queens.iter().enumerate() {
                    assignment.assign(row, col as i64);
                }
                metrics.increment_solutions_found();
                SolverResult::satisfiable(vec![assignment], metrics.snapshot())
            }
            // Budget exhausted without converging: inconclusive, like a
            // search that ran out of time.
            None => SolverResult::timeout(Vec::new(), metrics.snapshot()),
        });
    }

    let csp = problem.build()?;
    let solver = BacktrackingSolver::with_config(config);
    Ok(solver.solve(&csp))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn default_snapshot_queens(n: usize) -> SolverResult<i64> {
        solve(n, SolverConfig::default()).unwrap()
    }

    #[test]
    fn rejects_out_of_range_sizes() {
        assert!(NQueens::new(0).is_err());
        assert!(NQueens::new(MAX_N + 1).is_err());
        assert!(NQueens::new(1).is_ok());
        assert!(NQueens::new(MAX_N).is_ok());
    }

    #[test]
    fn one_queen_is_trivial() {
        let result = default_snapshot_queens(1);
        assert!(result.is_satisfiable());
        assert_eq!(result.solution().unwrap().value(0), Some(&0));
    }

    #[test]
    fn two_and_three_queens_are_unsatisfiable() {
        assert!(default_snapshot_queens(2).is_unsatisfiable());
        assert!(default_snapshot_queens(3).is_unsatisfiable());
    }

    #[test]
    fn four_queens_yields_a_valid_placement() {
        let _ = tracing_subscriber::fmt::try_init();
        let problem = NQueens::new(4).unwrap();
        let csp = problem.build().unwrap();

        let solver = BacktrackingSolver::new();
        let result = solver.solve(&csp);

        assert!(result.is_satisfiable());
        let solution = result.solution().unwrap();
        assert!(problem.validate_solution(solution));
        assert!(csp.is_solution(solution));
        assert!(result.metrics().nodes_explored >= 4);
    }

    #[test]
    fn eight_queens_has_ninety_two_solutions() {
        let problem = NQueens::new(8).unwrap();
        let csp = problem.build().unwrap();

        let solver =
            BacktrackingSolver::with_config(SolverConfig::default().find_all_solutions());
        let result = solver.solve(&csp);

        assert!(result.is_satisfiable());
        assert_eq!(result.solution_count(), 92);
        for solution in result.solutions() {
            assert!(problem.validate_solution(solution));
        }
    }

    #[test]
    fn large_boards_route_to_min_conflicts() {
        let result = default_snapshot_queens(100);

        assert!(result.is_satisfiable());
        // Local search does not explore backtracking nodes.
        assert_eq!(result.metrics().nodes_explored, 0);

        let problem = NQueens::new(100).unwrap();
        assert!(problem.validate_solution(result.solution().unwrap()));
    }

    #[test]
    fn board_formatting_marks_queens() {
        let problem = NQueens::new(4).unwrap();
        let mut assignment = Assignment::new(4);
        for (row, col) in [(0usize, 1i64), (1, 3), (2, 0), (3, 2)] {
            assignment.assign(row, col);
        }

        let board = problem.format_board(&assignment);
        assert_eq!(board.lines().count(), 4);
        assert_eq!(board.matches('Q').count(), 4);
        assert!(board.starts_with(". Q . . "));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn solved_boards_validate(n in 4usize..9) {
            let problem = NQueens::new(n).unwrap();
            let csp = problem.build().unwrap();
            let result = BacktrackingSolver::new().solve(&csp);

            prop_assert!(result.is_satisfiable());
            prop_assert!(problem.validate_solution(result.solution().unwrap()));
        }
    }
}
