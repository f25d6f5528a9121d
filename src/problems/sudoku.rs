use crate::{
    constraint::all_different::AllDifferent,
    error::{Error, Result},
    model::{Assignment, Csp, Domain},
    problems::Problem,
};

/// Classic 9×9 Sudoku. Cells are variables `C{row}{col}`; blanks get
/// the domain 1..=9, givens a singleton. Rows, columns, and the nine
/// 3×3 boxes each carry an [`AllDifferent`].
pub struct Sudoku {
    grid: [[u8; 9]; 9],
}

impl Sudoku {
    /// Creates a puzzle from a grid with 0 for blanks.
    pub fn new(grid: [[u8; 9]; 9]) -> Result<Self> {
        for row in &grid {
            for &cell in row {
                if cell > 9 {
                    return Err(Error::InvalidInput(format!(
                        "cell value {} outside 0..=9",
                        cell
                    )));
                }
            }
        }
        Ok(Self { grid })
    }

    /// Parses an 81-character puzzle string; `0` or `.` mark blanks,
    /// any other non-digit characters are ignored.
    pub fn parse(puzzle: &str) -> Result<Self> {
        let cells: Vec<u8> = puzzle
            .chars()
            .filter_map(|c| match c {
                '.' => Some(0),
                '0'..='9' => Some(c as u8 - b'0'),
                _ => None,
            })
            .collect();
        if cells.len() != 81 {
            return Err(Error::InvalidInput(format!(
                "puzzle must have 81 cells, found {}",
                cells.len()
            )));
        }

        let mut grid = [[0u8; 9]; 9];
        for (i, &cell) in cells.iter().enumerate() {
            grid[i / 9][i % 9] = cell;
        }
        Ok(Self { grid })
    }

    pub fn grid(&self) -> &[[u8; 9]; 9] {
        &self.grid
    }

    /// The solved value of row `row`, left to right.
    pub fn row_values(csp: &Csp<i64>, assignment: &Assignment<i64>, row: usize) -> Vec<i64> {
        (0..9)
            .map(|col| {
                let variable = csp
                    .variable_by_name(&format!("C{}{}", row, col))
                    .expect("sudoku cell variable");
                *assignment.value(variable.index()).expect("solved cell")
            })
            .collect()
    }

    /// Renders a solved grid with box separators.
    pub fn format_solution(csp: &Csp<i64>, assignment: &Assignment<i64>) -> String {
        let mut out = String::new();
        out.push_str("+-------+-------+-------+\n");
        for row in 0..9 {
            out.push_str("| ");
            for col in 0..9 {
                let variable = csp.variable_by_name(&format!("C{}{}", row, col));
                match variable.and_then(|v| assignment.value(v.index())) {
                    Some(value) => out.push_str(&value.to_string()),
                    None => out.push('.'),
                }
                out.push(' ');
                if col % 3 == 2 {
                    out.push_str("| ");
                }
            }
            out.push('\n');
            if row % 3 == 2 {
                out.push_str("+-------+-------+-------+\n");
            }
        }
        out
    }

    /// The easy bundled puzzle (the one in the README); its unique
    /// completion starts 5 3 4 6 7 8 9 1 2.
    pub fn easy() -> Self {
        Self::parse(concat!(
            "530070000",
            "600195000",
            "098000060",
            "800060003",
            "400803001",
            "700020006",
            "060000280",
            "000419005",
            "000080079",
        ))
        .expect("bundled puzzle is well-formed")
    }

    pub fn medium() -> Self {
        Self::parse(concat!(
            "000000680",
            "030080000",
            "900007253",
            "004000000",
            "200500009",
            "001074080",
            "070001004",
            "500040000",
            "060000017",
        ))
        .expect("bundled puzzle is well-formed")
    }

    pub fn hard() -> Self {
        Self::parse(concat!(
            "800000000",
            "003600000",
            "070090200",
            "050007000",
            "000045700",
            "000100030",
            "001000068",
            "008500010",
            "090000400",
        ))
        .expect("bundled puzzle is well-formed")
    }
}

impl Problem<i64> for Sudoku {
    fn build(&self) -> Result<Csp<i64>> {
        let mut builder = Csp::builder("Sudoku");

        let mut cells = [[0usize; 9]; 9];
        for row in 0..9 {
            for col in 0..9 {
                let domain = match self.grid[row][col] {
                    0 => Domain::range(1, 9),
                    given => Domain::singleton(given as i64),
                };
                cells[row][col] = builder.variable(format!("C{}{}", row, col), domain)?;
            }
        }

        for row in 0..9 {
            let vars = (0..9).map(|col| cells[row][col]).collect();
            builder.constraint(AllDifferent::named(vars, format!("Row{}", row)))?;
        }
        for col in 0..9 {
            let vars = (0..9).map(|row| cells[row][col]).collect();
            builder.constraint(AllDifferent::named(vars, format!("Col{}", col)))?;
        }
        for box_row in 0..3 {
            for box_col in 0..3 {
                let mut vars = Vec::with_capacity(9);
                for r in 0..3 {
                    for c in 0..3 {
                        vars.push(cells[box_row * 3 + r][box_col * 3 + c]);
                    }
                }
                builder.constraint(AllDifferent::named(
                    vars,
                    format!("Box{}{}", box_row, box_col),
                ))?;
            }
        }

        Ok(builder.build())
    }

    fn name(&self) -> String {
        "Sudoku".to_string()
    }

    fn description(&self) -> String {
        "Fill the 9x9 grid so each row, column, and 3x3 box contains 1-9 exactly once.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::{BacktrackingSolver, Solver};

    #[test]
    fn parse_validates_cell_count() {
        assert!(Sudoku::parse("12345").is_err());
        assert!(Sudoku::parse(&"0".repeat(81)).is_ok());

        let dotted = Sudoku::parse(&".".repeat(81)).unwrap();
        assert_eq!(dotted.grid()[0][0], 0);
    }

    #[test]
    fn grid_values_are_range_checked() {
        let mut grid = [[0u8; 9]; 9];
        grid[4][4] = 10;
        assert!(Sudoku::new(grid).is_err());
    }

    #[test]
    fn model_has_81_cells_and_27_groups() {
        let csp = Sudoku::easy().build().unwrap();
        assert_eq!(csp.num_variables(), 81);
        assert_eq!(csp.num_constraints(), 27);

        // Givens become singleton domains.
        assert_eq!(
            csp.variable_by_name("C00").unwrap().initial_domain().values(),
            vec![5]
        );
        assert_eq!(
            csp.variable_by_name("C02").unwrap().initial_domain().size(),
            9
        );
    }

    #[test]
    fn easy_puzzle_solves_to_the_known_grid() {
        let _ = tracing_subscriber::fmt::try_init();
        let csp = Sudoku::easy().build().unwrap();

        let result = BacktrackingSolver::new().solve(&csp);
        assert!(result.is_satisfiable());

        let solution = result.solution().unwrap();
        assert!(csp.is_solution(solution));
        assert_eq!(
            Sudoku::row_values(&csp, solution, 0),
            vec![5, 3, 4, 6, 7, 8, 9, 1, 2]
        );
    }

    #[test]
    fn medium_puzzle_solves() {
        let csp = Sudoku::medium().build().unwrap();
        let result = BacktrackingSolver::new().solve(&csp);

        assert!(result.is_satisfiable());
        assert!(csp.is_solution(result.solution().unwrap()));
    }

    #[test]
    fn hard_puzzle_solves() {
        let csp = Sudoku::hard().build().unwrap();
        let result = BacktrackingSolver::new().solve(&csp);

        assert!(result.is_satisfiable());
        assert!(csp.is_solution(result.solution().unwrap()));
    }

    #[test]
    fn resolving_a_solution_needs_no_backtracks() {
        let csp = Sudoku::easy().build().unwrap();
        let solution = BacktrackingSolver::new()
            .solve(&csp)
            .solution()
            .cloned()
            .unwrap();

        // Feed the completed grid back in as 81 givens.
        let mut grid = [[0u8; 9]; 9];
        for (row, row_cells) in grid.iter_mut().enumerate() {
            for (col, cell) in row_cells.iter_mut().enumerate() {
                *cell = Sudoku::row_values(&csp, &solution, row)[col] as u8;
            }
        }
        let solved_csp = Sudoku::new(grid).unwrap().build().unwrap();
        let result = BacktrackingSolver::new().solve(&solved_csp);

        assert!(result.is_satisfiable());
        assert_eq!(result.metrics().backtracks, 0);
        for row in 0..9 {
            assert_eq!(
                Sudoku::row_values(&solved_csp, result.solution().unwrap(), row),
                Sudoku::row_values(&csp, &solution, row)
            );
        }
    }

    #[test]
    fn formats_a_solved_grid() {
        let csp = Sudoku::easy().build().unwrap();
        let result = BacktrackingSolver::new().solve(&csp);

        let rendered = Sudoku::format_solution(&csp, result.solution().unwrap());
        assert!(rendered.starts_with("+-------+-------+-------+"));
        assert!(rendered.contains("| 5 3 4 | 6 7 8 | 9 1 2 |"));
    }
}
