//! Constraint propagation engines: forward checking and AC-3.

pub mod ac3;
pub mod forward_checking;
pub mod work_list;

pub use ac3::Ac3Propagator;
pub use forward_checking::ForwardChecker;

use crate::model::{Assignment, ConstraintId, Csp, Domain, Value, VariableId};

/// Outcome of one propagation call: whether a domain wiped out, how
/// much work was done, and which constraint forced the wipeout (when
/// attributable — this feeds Dom/WDeg learning).
#[derive(Debug, Clone, Copy, Default)]
pub struct PropagationResult {
    pub contradiction: bool,
    pub domain_reductions: u64,
    pub constraint_checks: u64,
    pub arc_revisions: u64,
    pub failed_constraint: Option<ConstraintId>,
}

impl PropagationResult {
    pub fn success(domain_reductions: u64, constraint_checks: u64, arc_revisions: u64) -> Self {
        Self {
            contradiction: false,
            domain_reductions,
            constraint_checks,
            arc_revisions,
            failed_constraint: None,
        }
    }

    pub fn contradiction(
        domain_reductions: u64,
        constraint_checks: u64,
        arc_revisions: u64,
        failed_constraint: ConstraintId,
    ) -> Self {
        Self {
            contradiction: true,
            domain_reductions,
            constraint_checks,
            arc_revisions,
            failed_constraint: Some(failed_constraint),
        }
    }

    pub fn is_ok(&self) -> bool {
        !self.contradiction
    }

    /// Accumulates another result's statistics; the first contradiction
    /// wins the attribution.
    pub fn combine(self, other: PropagationResult) -> Self {
        Self {
            contradiction: self.contradiction || other.contradiction,
            domain_reductions: self.domain_reductions + other.domain_reductions,
            constraint_checks: self.constraint_checks + other.constraint_checks,
            arc_revisions: self.arc_revisions + other.arc_revisions,
            failed_constraint: self.failed_constraint.or(other.failed_constraint),
        }
    }
}

/// A domain-reduction engine invoked around the search.
///
/// `preprocess` runs once before search starts; `propagate_after_assignment`
/// runs at every search node, after the assignment has been recorded
/// and the assigned variable's domain reduced to a singleton.
pub trait PropagationEngine<V: Value> {
    fn preprocess(&self, csp: &Csp<V>, domains: &mut [Domain<V>]) -> PropagationResult;

    fn propagate_after_assignment(
        &self,
        variable: VariableId,
        value: &V,
        csp: &Csp<V>,
        assignment: &Assignment<V>,
        domains: &mut [Domain<V>],
    ) -> PropagationResult;

    fn name(&self) -> &'static str;
}
