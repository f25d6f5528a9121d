use prettytable::{Cell, Row, Table};

use crate::{model::Value, solver::result::SolverResult};

/// Renders a solve result as an aligned text table for CLI output.
pub fn render_result_table<V: Value>(result: &SolverResult<V>) -> String {
    let metrics = result.metrics();

    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));
    table.add_row(row("Status", format!("{:?}", result.status())));
    table.add_row(row("Solutions", result.solution_count().to_string()));
    table.add_row(row("Nodes explored", metrics.nodes_explored.to_string()));
    table.add_row(row("Backtracks", metrics.backtracks.to_string()));
    table.add_row(row("Constraint checks", metrics.constraint_checks.to_string()));
    table.add_row(row("Arc revisions", metrics.arc_revisions.to_string()));
    table.add_row(row("Domain reductions", metrics.domain_reductions.to_string()));
    table.add_row(row("Elapsed (ms)", metrics.elapsed_ms.to_string()));
    if let Some(error) = result.error_message() {
        table.add_row(row("Error", error.to_string()));
    }

    table.to_string()
}

fn row(label: &str, value: String) -> Row {
    Row::new(vec![Cell::new(label), Cell::new(&value)])
}
