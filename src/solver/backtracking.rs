use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use tracing::debug;

use crate::{
    error::Result,
    model::{Assignment, Csp, Domain, Value, VariableId},
    propagation::{Ac3Propagator, PropagationEngine},
    solver::{
        config::SolverConfig,
        events::SolverEventPublisher,
        heuristics::{value::ValueSelector, variable::VariableSelector},
        metrics::SolverMetrics,
        result::SolverResult,
        Solver,
    },
};

/// Depth-first backtracking search with configurable variable/value
/// ordering and constraint propagation.
///
/// Each solve works on its own domains and assignment, so a single
/// `Csp` can be shared by several solver instances running on separate
/// threads. One instance runs one solve at a time; `cancel` flips an
/// instance-local flag the search polls cooperatively.
pub struct BacktrackingSolver<V: Value> {
    config: SolverConfig<V>,
    metrics: SolverMetrics,
    cancelled: AtomicBool,
    solving: AtomicBool,
}

impl<V: Value> BacktrackingSolver<V> {
    pub fn new() -> Self {
        Self::with_config(SolverConfig::default())
    }

    pub fn with_config(config: SolverConfig<V>) -> Self {
        Self {
            config,
            metrics: SolverMetrics::new(),
            cancelled: AtomicBool::new(false),
            solving: AtomicBool::new(false),
        }
    }

    /// Live metrics of the current (or last) solve. A progress observer
    /// may read these from another thread.
    pub fn metrics(&self) -> &SolverMetrics {
        &self.metrics
    }

    fn run(&self, csp: &Csp<V>, deadline: Instant) -> Result<Outcome<V>> {
        let mut domains = csp.working_domains();

        if self.config.ac3_preprocessing {
            let preprocess = Ac3Propagator::new().preprocess(csp, &mut domains);
            self.metrics.add_arc_revisions(preprocess.arc_revisions);
            self.metrics
                .add_domain_reductions(preprocess.domain_reductions);
            if preprocess.contradiction {
                debug!("AC-3 preprocessing proved the problem unsatisfiable");
                return Ok(Outcome::PreprocessContradiction);
            }
        }

        let mut search = Search {
            csp,
            config: &self.config,
            metrics: &self.metrics,
            cancelled: &self.cancelled,
            deadline,
            variable_selector: self.config.make_variable_selector(),
            value_selector: self.config.make_value_selector(),
            propagator: self.config.make_propagator(),
            solutions: Vec::new(),
        };
        search.variable_selector.reset();

        let mut assignment = csp.empty_assignment();
        search.backtrack(&mut assignment, &mut domains, 0)?;
        Ok(Outcome::Finished(search.solutions))
    }
}

impl<V: Value> Default for BacktrackingSolver<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Value> Solver<V> for BacktrackingSolver<V> {
    fn solve(&self, csp: &Csp<V>) -> SolverResult<V> {
        self.cancelled.store(false, Ordering::Relaxed);
        self.solving.store(true, Ordering::Relaxed);
        self.metrics.reset();
        let deadline = Instant::now() + self.config.timeout;

        debug!(csp = %csp, config = ?self.config, "solve started");
        let publisher = self.config.event_publisher.as_deref();
        if let Some(publisher) = publisher {
            publisher.on_solve_started(csp.num_variables(), csp.num_constraints());
        }

        let outcome = self.run(csp, deadline);
        self.metrics.stop();

        let result = match outcome {
            Ok(Outcome::PreprocessContradiction) => {
                SolverResult::unsatisfiable(self.metrics.snapshot())
            }
            Ok(Outcome::Finished(solutions)) => {
                if self.cancelled.load(Ordering::Relaxed) {
                    SolverResult::cancelled(solutions, self.metrics.snapshot())
                } else if Instant::now() > deadline {
                    SolverResult::timeout(solutions, self.metrics.snapshot())
                } else if solutions.is_empty() {
                    SolverResult::unsatisfiable(self.metrics.snapshot())
                } else {
                    SolverResult::satisfiable(solutions, self.metrics.snapshot())
                }
            }
            Err(error) => SolverResult::error(error.to_string(), self.metrics.snapshot()),
        };

        if let Some(publisher) = publisher {
            if !result.is_error() {
                publisher.on_solve_completed(result.solution_count() > 0, result.metrics());
            }
        }
        debug!(result = %result, "solve finished");

        self.solving.store(false, Ordering::Relaxed);
        result
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    fn is_solving(&self) -> bool {
        self.solving.load(Ordering::Relaxed)
    }

    fn configuration(&self) -> &SolverConfig<V> {
        &self.config
    }
}

enum Outcome<V: Value> {
    PreprocessContradiction,
    Finished(Vec<Assignment<V>>),
}

/// Per-solve search state: fresh heuristic instances, the deadline, and
/// the solutions gathered so far.
struct Search<'a, V: Value> {
    csp: &'a Csp<V>,
    config: &'a SolverConfig<V>,
    metrics: &'a SolverMetrics,
    cancelled: &'a AtomicBool,
    deadline: Instant,
    variable_selector: Box<dyn VariableSelector<V>>,
    value_selector: Box<dyn ValueSelector<V>>,
    propagator: Box<dyn PropagationEngine<V>>,
    solutions: Vec<Assignment<V>>,
}

impl<V: Value> Search<'_, V> {
    fn stopped(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed) || Instant::now() > self.deadline
    }

    /// Returns `Ok(true)` when the search should unwind because enough
    /// solutions were found.
    fn backtrack(
        &mut self,
        assignment: &mut Assignment<V>,
        domains: &mut Vec<Domain<V>>,
        depth: usize,
    ) -> Result<bool> {
        if self.stopped() {
            return Ok(false);
        }

        if assignment.is_complete() {
            self.solutions.push(assignment.clone());
            self.metrics.increment_solutions_found();
            if let Some(publisher) = self.publisher() {
                publisher.on_solution_found(self.solutions.len(), &self.metrics.snapshot());
            }
            return Ok(
                !self.config.find_all_solutions || self.solutions.len() >= self.config.max_solutions
            );
        }

        let unassigned: Vec<VariableId> = (0..self.csp.num_variables())
            .filter(|&var| !assignment.is_assigned(var))
            .collect();
        let Some(variable) =
            self.variable_selector
                .select(&unassigned, domains, self.csp, assignment)
        else {
            return Ok(false);
        };
        if domains[variable].is_empty() {
            return Ok(false);
        }

        if let Some(publisher) = self.publisher() {
            publisher.on_variable_selected(
                self.csp.variable(variable).name(),
                domains[variable].size(),
                depth,
            );
        }

        let ordered = self.value_selector.order_values(
            variable,
            &domains[variable],
            self.csp,
            assignment,
            domains,
        );

        for value in ordered {
            if self.stopped() {
                return Ok(false);
            }
            self.metrics.increment_nodes_explored();

            // Save the whole domain store; propagation may touch any
            // domain.
            let saved = domains.clone();

            assignment.assign(variable, value.clone());
            domains[variable].reduce_to(&value)?;
            if let Some(publisher) = self.publisher() {
                publisher.on_value_assigned(self.csp.variable(variable).name(), &value, depth);
            }

            let propagation = self.propagator.propagate_after_assignment(
                variable,
                &value,
                self.csp,
                assignment,
                domains,
            );
            self.metrics
                .add_constraint_checks(propagation.constraint_checks);
            self.metrics.add_arc_revisions(propagation.arc_revisions);
            self.metrics
                .add_domain_reductions(propagation.domain_reductions);

            if propagation.is_ok() && self.backtrack(assignment, domains, depth + 1)? {
                return Ok(true);
            }

            // Abandoning this candidate value counts as a backtrack.
            self.metrics.increment_backtracks();
            assignment.unassign(variable);
            *domains = saved;

            if propagation.contradiction {
                if let Some(failed) = propagation.failed_constraint {
                    self.variable_selector.record_failure(variable, failed);
                }
            }

            if let Some(publisher) = self.publisher() {
                publisher.on_backtrack(self.csp.variable(variable).name(), depth);
                if self.metrics.nodes_explored() % 1000 == 0 {
                    publisher.on_progress(&self.metrics.snapshot());
                }
            }
        }

        Ok(false)
    }

    fn publisher(&self) -> Option<&dyn SolverEventPublisher<V>> {
        self.config.event_publisher.as_deref()
    }
}
