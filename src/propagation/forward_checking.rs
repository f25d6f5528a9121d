use crate::{
    model::{Assignment, Csp, Domain, Value, VariableId},
    propagation::{PropagationEngine, PropagationResult},
};

/// Forward checking: after each assignment, remove inconsistent values
/// from the domains of unassigned variables sharing a constraint with
/// the assigned one. Does no preprocessing.
#[derive(Debug, Default)]
pub struct ForwardChecker;

impl ForwardChecker {
    pub fn new() -> Self {
        Self
    }
}

impl<V: Value> PropagationEngine<V> for ForwardChecker {
    fn preprocess(&self, _csp: &Csp<V>, _domains: &mut [Domain<V>]) -> PropagationResult {
        PropagationResult::default()
    }

    fn propagate_after_assignment(
        &self,
        variable: VariableId,
        value: &V,
        csp: &Csp<V>,
        assignment: &Assignment<V>,
        domains: &mut [Domain<V>],
    ) -> PropagationResult {
        let mut constraint_checks = 0u64;
        let mut domain_reductions = 0u64;

        if domains[variable].size() > 1 {
            // The search normally reduces the domain before calling us;
            // make it a singleton if it has not.
            let _ = domains[variable].reduce_to(value);
        }

        for &cid in csp.network().constraints_on(variable) {
            let constraint = csp.constraint(cid);
            for &future in constraint.scope() {
                if future == variable || assignment.is_assigned(future) {
                    continue;
                }
                if domains[future].is_empty() {
                    continue;
                }

                let removed = domains[future].retain(|candidate| {
                    constraint_checks += 1;
                    constraint.is_consistent_with(future, candidate, assignment)
                });
                domain_reductions += removed as u64;

                if domains[future].is_empty() {
                    return PropagationResult::contradiction(
                        domain_reductions,
                        constraint_checks,
                        0,
                        cid,
                    );
                }
            }
        }

        PropagationResult::success(domain_reductions, constraint_checks, 0)
    }

    fn name(&self) -> &'static str {
        "Forward Checking"
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        constraint::not_equal::NotEqual,
        model::{Csp, Domain},
    };

    fn pair_csp() -> Csp<i64> {
        let mut builder = Csp::builder("fc-test");
        let a = builder.variable("A", Domain::range(1, 2)).unwrap();
        let b = builder.variable("B", Domain::range(1, 2)).unwrap();
        builder.constraint(NotEqual::new(a, b)).unwrap();
        builder.build()
    }

    #[test]
    fn prunes_neighbor_domains() {
        let csp = pair_csp();
        let mut domains = csp.working_domains();
        let mut assignment = csp.empty_assignment();

        assignment.assign(0, 1);
        domains[0].reduce_to(&1).unwrap();

        let checker = ForwardChecker::new();
        let result = checker.propagate_after_assignment(0, &1, &csp, &assignment, &mut domains);

        assert!(result.is_ok());
        assert_eq!(result.domain_reductions, 1);
        assert!(result.constraint_checks > 0);
        assert_eq!(domains[1].values(), vec![2]);
    }

    #[test]
    fn reports_wipeout_with_the_guilty_constraint() {
        let csp = pair_csp();
        let mut domains = csp.working_domains();
        let mut assignment = csp.empty_assignment();

        // Leave B with only the conflicting value.
        domains[1].reduce_to(&1).unwrap();
        assignment.assign(0, 1);
        domains[0].reduce_to(&1).unwrap();

        let checker = ForwardChecker::new();
        let result = checker.propagate_after_assignment(0, &1, &csp, &assignment, &mut domains);

        assert!(result.contradiction);
        assert_eq!(result.failed_constraint, Some(0));
        assert!(domains[1].is_empty());
    }

    #[test]
    fn preprocessing_is_a_no_op() {
        let csp = pair_csp();
        let mut domains = csp.working_domains();

        let checker = ForwardChecker::new();
        let result = PropagationEngine::<i64>::preprocess(&checker, &csp, &mut domains);

        assert!(result.is_ok());
        assert_eq!(result.domain_reductions, 0);
        assert_eq!(domains[0].size(), 2);
    }
}
