use std::sync::Arc;
use std::time::Duration;

use crate::{
    model::Value,
    propagation::{Ac3Propagator, ForwardChecker, PropagationEngine},
    solver::{
        events::SolverEventPublisher,
        heuristics::{
            value::{DefaultValueSelector, LcvSelector, ValueSelector},
            variable::{
                DegreeSelector, DomWdegSelector, MrvDegreeSelector, MrvSelector, VariableSelector,
            },
        },
    },
};

/// Variable-ordering heuristics the solver can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableHeuristic {
    /// Minimum remaining values (fail-first).
    Mrv,
    /// Most constraints to other unassigned variables.
    Degree,
    /// Domain size over learned weighted degree.
    DomWdeg,
    /// MRV with Degree tie-breaking.
    MrvDegree,
}

/// Value-ordering heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueHeuristic {
    /// Universe order.
    Default,
    /// Least constraining value, active while the domain is at most
    /// `max_domain_size` wide.
    Lcv { max_domain_size: usize },
}

impl ValueHeuristic {
    /// LCV with its default activation threshold of 20.
    pub fn lcv() -> Self {
        ValueHeuristic::Lcv {
            max_domain_size: LcvSelector::DEFAULT_MAX_DOMAIN_SIZE,
        }
    }
}

/// Propagation engine used after each assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagator {
    ForwardChecking,
    Ac3,
}

/// Everything that parameterizes a solve.
///
/// Plain data: selectors and propagators are instantiated fresh from
/// these enums at the start of every solve, so stateful heuristics
/// (Dom/WDeg) never leak learned weights between solves or between
/// concurrent solver instances.
pub struct SolverConfig<V: Value> {
    pub variable_heuristic: VariableHeuristic,
    pub value_heuristic: ValueHeuristic,
    pub propagator: Propagator,
    pub ac3_preprocessing: bool,
    pub timeout: Duration,
    pub find_all_solutions: bool,
    pub max_solutions: usize,
    pub event_publisher: Option<Arc<dyn SolverEventPublisher<V>>>,
}

impl<V: Value> Default for SolverConfig<V> {
    fn default() -> Self {
        Self {
            variable_heuristic: VariableHeuristic::MrvDegree,
            value_heuristic: ValueHeuristic::Default,
            propagator: Propagator::ForwardChecking,
            ac3_preprocessing: true,
            timeout: Duration::from_millis(60_000),
            find_all_solutions: false,
            max_solutions: 1,
            event_publisher: None,
        }
    }
}

impl<V: Value> SolverConfig<V> {
    pub fn with_variable_heuristic(mut self, heuristic: VariableHeuristic) -> Self {
        self.variable_heuristic = heuristic;
        self
    }

    pub fn with_value_heuristic(mut self, heuristic: ValueHeuristic) -> Self {
        self.value_heuristic = heuristic;
        self
    }

    pub fn with_propagator(mut self, propagator: Propagator) -> Self {
        self.propagator = propagator;
        self
    }

    pub fn with_ac3_preprocessing(mut self, enabled: bool) -> Self {
        self.ac3_preprocessing = enabled;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Search for every solution, without a cap.
    pub fn find_all_solutions(mut self) -> Self {
        self.find_all_solutions = true;
        self.max_solutions = usize::MAX;
        self
    }

    /// Search for up to `max_solutions` solutions. A cap above one
    /// implies find-all behavior up to that cap.
    pub fn find_solutions(mut self, max_solutions: usize) -> Self {
        self.find_all_solutions = max_solutions > 1;
        self.max_solutions = max_solutions;
        self
    }

    pub fn with_event_publisher(mut self, publisher: Arc<dyn SolverEventPublisher<V>>) -> Self {
        self.event_publisher = Some(publisher);
        self
    }

    pub(crate) fn make_variable_selector(&self) -> Box<dyn VariableSelector<V>> {
        match self.variable_heuristic {
            VariableHeuristic::Mrv => Box::new(MrvSelector),
            VariableHeuristic::Degree => Box::new(DegreeSelector),
            VariableHeuristic::DomWdeg => Box::new(DomWdegSelector::new()),
            VariableHeuristic::MrvDegree => Box::new(MrvDegreeSelector),
        }
    }

    pub(crate) fn make_value_selector(&self) -> Box<dyn ValueSelector<V>> {
        match self.value_heuristic {
            ValueHeuristic::Default => Box::new(DefaultValueSelector),
            ValueHeuristic::Lcv { max_domain_size } => Box::new(LcvSelector::new(max_domain_size)),
        }
    }

    pub(crate) fn make_propagator(&self) -> Box<dyn PropagationEngine<V>> {
        match self.propagator {
            Propagator::ForwardChecking => Box::new(ForwardChecker::new()),
            Propagator::Ac3 => Box::new(Ac3Propagator::new()),
        }
    }
}

impl<V: Value> Clone for SolverConfig<V> {
    fn clone(&self) -> Self {
        Self {
            variable_heuristic: self.variable_heuristic,
            value_heuristic: self.value_heuristic,
            propagator: self.propagator,
            ac3_preprocessing: self.ac3_preprocessing,
            timeout: self.timeout,
            find_all_solutions: self.find_all_solutions,
            max_solutions: self.max_solutions,
            event_publisher: self.event_publisher.clone(),
        }
    }
}

impl<V: Value> std::fmt::Debug for SolverConfig<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverConfig")
            .field("variable_heuristic", &self.variable_heuristic)
            .field("value_heuristic", &self.value_heuristic)
            .field("propagator", &self.propagator)
            .field("ac3_preprocessing", &self.ac3_preprocessing)
            .field("timeout", &self.timeout)
            .field("find_all_solutions", &self.find_all_solutions)
            .field("max_solutions", &self.max_solutions)
            .field("event_publisher", &self.event_publisher.is_some())
            .finish()
    }
}
