//! The solving layer: configuration, metrics, heuristics, and the
//! search engines.

pub mod backtracking;
pub mod config;
pub mod events;
pub mod heuristics;
pub mod metrics;
pub mod min_conflicts;
pub mod result;
pub mod stats;

pub use backtracking::BacktrackingSolver;
pub use config::{Propagator, SolverConfig, ValueHeuristic, VariableHeuristic};
pub use events::SolverEventPublisher;
pub use metrics::{MetricsSnapshot, SolverMetrics};
pub use min_conflicts::{MinConflictsConfig, MinConflictsQueens};
pub use result::{SolverResult, Status};

use crate::model::{Csp, Value};

/// The contract a solver exposes to external layers.
///
/// `solve` blocks until a terminal status; `cancel` may be called from
/// any thread and is observed cooperatively at the solver's check
/// points. A solver instance runs one solve at a time.
pub trait Solver<V: Value> {
    fn solve(&self, csp: &Csp<V>) -> SolverResult<V>;

    /// Requests that an in-flight solve unwind with
    /// [`Status::Cancelled`].
    fn cancel(&self);

    fn is_solving(&self) -> bool;

    fn configuration(&self) -> &SolverConfig<V>;
}
