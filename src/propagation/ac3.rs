use tracing::debug;

use crate::{
    model::{Assignment, Csp, Domain, Value, VariableId},
    propagation::{work_list::WorkList, PropagationEngine, PropagationResult},
};

/// The AC-3 arc-consistency algorithm.
///
/// Used by default as a preprocessing step before search; the
/// after-assignment variant (arc-consistency maintenance) is available
/// but not the default propagator.
#[derive(Debug, Default)]
pub struct Ac3Propagator;

impl Ac3Propagator {
    pub fn new() -> Self {
        Self
    }

    fn process_queue<V: Value>(
        &self,
        worklist: &mut WorkList,
        csp: &Csp<V>,
        domains: &mut [Domain<V>],
    ) -> PropagationResult {
        let mut arc_revisions = 0u64;
        let mut domain_reductions = 0u64;

        while let Some(arc) = worklist.pop() {
            arc_revisions += 1;

            let constraint = csp.constraint(arc.constraint);
            let size_before = domains[arc.x].size();

            if constraint.revise(arc.x, arc.y, domains) {
                domain_reductions += (size_before - domains[arc.x].size()) as u64;

                if domains[arc.x].is_empty() {
                    debug!(
                        constraint = %constraint.name(),
                        variable = arc.x,
                        "domain wipeout during arc revision"
                    );
                    return PropagationResult::contradiction(
                        domain_reductions,
                        0,
                        arc_revisions,
                        arc.constraint,
                    );
                }

                // D(x) shrank: everything revising against x must be
                // reconsidered, except the arc we just came from.
                for &cid in csp.network().constraints_on(arc.x) {
                    for &candidate in csp.network().arcs_of(cid) {
                        if candidate.y == arc.x && candidate.x != arc.y {
                            worklist.push(candidate);
                        }
                    }
                }
            }
        }

        PropagationResult::success(domain_reductions, 0, arc_revisions)
    }
}

impl<V: Value> PropagationEngine<V> for Ac3Propagator {
    /// Establishes arc consistency over the whole problem.
    fn preprocess(&self, csp: &Csp<V>, domains: &mut [Domain<V>]) -> PropagationResult {
        let mut worklist = WorkList::new();
        for arc in csp.network().all_arcs() {
            worklist.push(arc);
        }
        let result = self.process_queue(&mut worklist, csp, domains);
        debug!(
            revisions = result.arc_revisions,
            reductions = result.domain_reductions,
            contradiction = result.contradiction,
            "AC-3 preprocessing finished"
        );
        result
    }

    fn propagate_after_assignment(
        &self,
        variable: VariableId,
        value: &V,
        csp: &Csp<V>,
        assignment: &Assignment<V>,
        domains: &mut [Domain<V>],
    ) -> PropagationResult {
        if domains[variable].size() > 1 {
            let _ = domains[variable].reduce_to(value);
        }

        // Seed with the arcs pointing at the assigned variable from its
        // still-unassigned neighbors.
        let mut worklist = WorkList::new();
        for &cid in csp.network().constraints_on(variable) {
            for &arc in csp.network().arcs_of(cid) {
                if arc.y == variable && !assignment.is_assigned(arc.x) {
                    worklist.push(arc);
                }
            }
        }

        self.process_queue(&mut worklist, csp, domains)
    }

    fn name(&self) -> &'static str {
        "AC-3"
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        constraint::{all_different::AllDifferent, not_equal::NotEqual},
        model::{Csp, Domain},
    };

    fn chain_csp() -> Csp<i64> {
        // A fixed to 1 forces B to 2, which forces C to 1.
        let mut builder = Csp::builder("chain");
        let a = builder.variable("A", Domain::singleton(1)).unwrap();
        let b = builder.variable("B", Domain::range(1, 2)).unwrap();
        let c = builder.variable("C", Domain::range(1, 2)).unwrap();
        builder.constraint(NotEqual::new(a, b)).unwrap();
        builder.constraint(NotEqual::new(b, c)).unwrap();
        builder.build()
    }

    #[test]
    fn preprocessing_cascades_singletons() {
        let csp = chain_csp();
        let mut domains = csp.working_domains();

        let result = Ac3Propagator::new().preprocess(&csp, &mut domains);

        assert!(result.is_ok());
        assert_eq!(domains[0].values(), vec![1]);
        assert_eq!(domains[1].values(), vec![2]);
        assert_eq!(domains[2].values(), vec![1]);
        assert!(result.domain_reductions >= 2);
    }

    #[test]
    fn preprocessing_is_idempotent() {
        let csp = chain_csp();
        let mut domains = csp.working_domains();

        let first = Ac3Propagator::new().preprocess(&csp, &mut domains);
        let after_first: Vec<Vec<i64>> = domains.iter().map(Domain::values).collect();

        let second = Ac3Propagator::new().preprocess(&csp, &mut domains);
        let after_second: Vec<Vec<i64>> = domains.iter().map(Domain::values).collect();

        assert!(first.is_ok());
        assert!(second.is_ok());
        assert_eq!(second.domain_reductions, 0);
        assert_eq!(after_first, after_second);
    }

    #[test]
    fn detects_contradiction() {
        let mut builder = Csp::builder("conflict");
        let a = builder.variable("A", Domain::singleton(1)).unwrap();
        let b = builder.variable("B", Domain::singleton(1)).unwrap();
        builder.constraint(NotEqual::new(a, b)).unwrap();
        let csp = builder.build();

        let mut domains = csp.working_domains();
        let result = Ac3Propagator::new().preprocess(&csp, &mut domains);

        assert!(result.contradiction);
        assert_eq!(result.failed_constraint, Some(0));
    }

    #[test]
    fn all_different_singletons_propagate() {
        let mut builder = Csp::builder("alldiff");
        let a = builder.variable("A", Domain::singleton(3)).unwrap();
        let b = builder.variable("B", Domain::range(1, 3)).unwrap();
        let c = builder.variable("C", Domain::range(1, 3)).unwrap();
        builder
            .constraint(AllDifferent::new(vec![a, b, c]))
            .unwrap();
        let csp = builder.build();

        let mut domains = csp.working_domains();
        let result = Ac3Propagator::new().preprocess(&csp, &mut domains);

        assert!(result.is_ok());
        assert_eq!(domains[1].values(), vec![1, 2]);
        assert_eq!(domains[2].values(), vec![1, 2]);
    }

    #[test]
    fn after_assignment_revises_neighbors() {
        let csp = chain_csp();
        let mut domains = csp.working_domains();
        let mut assignment = csp.empty_assignment();

        assignment.assign(1, 2);
        domains[1].reduce_to(&2).unwrap();

        let result = Ac3Propagator::new()
            .propagate_after_assignment(1, &2, &csp, &assignment, &mut domains);

        assert!(result.is_ok());
        assert_eq!(domains[2].values(), vec![1]);
    }
}
