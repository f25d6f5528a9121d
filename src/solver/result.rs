use crate::{
    model::{Assignment, Value},
    solver::metrics::MetricsSnapshot,
};

/// Terminal status of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// At least one solution was found.
    Satisfiable,
    /// The search space was exhausted without a solution.
    Unsatisfiable,
    /// The deadline passed; any solutions found so far are attached.
    Timeout,
    /// `cancel()` was observed; any solutions found so far are attached.
    Cancelled,
    /// An unexpected failure; see the error message.
    Error,
}

/// What a solve produced: a status, zero or more solutions, and the
/// final metrics snapshot.
#[derive(Debug, Clone)]
pub struct SolverResult<V: Value> {
    status: Status,
    solutions: Vec<Assignment<V>>,
    metrics: MetricsSnapshot,
    error: Option<String>,
}

impl<V: Value> SolverResult<V> {
    pub fn satisfiable(solutions: Vec<Assignment<V>>, metrics: MetricsSnapshot) -> Self {
        Self {
            status: Status::Satisfiable,
            solutions,
            metrics,
            error: None,
        }
    }

    pub fn unsatisfiable(metrics: MetricsSnapshot) -> Self {
        Self {
            status: Status::Unsatisfiable,
            solutions: Vec::new(),
            metrics,
            error: None,
        }
    }

    pub fn timeout(partial_solutions: Vec<Assignment<V>>, metrics: MetricsSnapshot) -> Self {
        Self {
            status: Status::Timeout,
            solutions: partial_solutions,
            metrics,
            error: None,
        }
    }

    pub fn cancelled(partial_solutions: Vec<Assignment<V>>, metrics: MetricsSnapshot) -> Self {
        Self {
            status: Status::Cancelled,
            solutions: partial_solutions,
            metrics,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>, metrics: MetricsSnapshot) -> Self {
        Self {
            status: Status::Error,
            solutions: Vec::new(),
            metrics,
            error: Some(message.into()),
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_satisfiable(&self) -> bool {
        self.status == Status::Satisfiable
    }

    pub fn is_unsatisfiable(&self) -> bool {
        self.status == Status::Unsatisfiable
    }

    pub fn is_timeout(&self) -> bool {
        self.status == Status::Timeout
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == Status::Cancelled
    }

    pub fn is_error(&self) -> bool {
        self.status == Status::Error
    }

    /// The first solution, if any.
    pub fn solution(&self) -> Option<&Assignment<V>> {
        self.solutions.first()
    }

    pub fn solutions(&self) -> &[Assignment<V>] {
        &self.solutions
    }

    pub fn solution_count(&self) -> usize {
        self.solutions.len()
    }

    pub fn metrics(&self) -> &MetricsSnapshot {
        &self.metrics
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl<V: Value> std::fmt::Display for SolverResult<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.status)?;
        if !self.solutions.is_empty() {
            write!(f, ", {} solution(s)", self.solutions.len())?;
        }
        write!(f, ", {}", self.metrics)?;
        if let Some(error) = &self.error {
            write!(f, ", error: {}", error)?;
        }
        Ok(())
    }
}
