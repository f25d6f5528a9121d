use crate::{model::Value, solver::metrics::MetricsSnapshot};

/// Observer for solver progress, invoked synchronously on the search
/// thread.
///
/// Implementations must stay cheap on the fast path (queue and return);
/// fan-out to websockets, channels, or logs belongs behind the
/// implementation. All methods default to no-ops so observers override
/// only what they care about.
pub trait SolverEventPublisher<V: Value>: Send + Sync {
    fn on_solve_started(&self, _num_variables: usize, _num_constraints: usize) {}

    fn on_variable_selected(&self, _variable: &str, _domain_size: usize, _depth: usize) {}

    fn on_value_assigned(&self, _variable: &str, _value: &V, _depth: usize) {}

    fn on_backtrack(&self, _variable: &str, _depth: usize) {}

    fn on_solution_found(&self, _solution_number: usize, _metrics: &MetricsSnapshot) {}

    /// Emitted every 1 000 explored nodes.
    fn on_progress(&self, _metrics: &MetricsSnapshot) {}

    fn on_solve_completed(&self, _satisfiable: bool, _metrics: &MetricsSnapshot) {}
}
