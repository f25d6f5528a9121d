use crate::{
    constraint::Constraint,
    error::{Error, Result},
    model::{Assignment, Domain, Variable, VariableId},
};

/// Comparison operator of a [`LinearConstraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Le,
    Ge,
    Lt,
    Gt,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Le => "<=",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Gt => ">",
        }
    }

    fn evaluate(&self, sum: i64, rhs: i64) -> bool {
        match self {
            Operator::Eq => sum == rhs,
            Operator::Le => sum <= rhs,
            Operator::Ge => sum >= rhs,
            Operator::Lt => sum < rhs,
            Operator::Gt => sum > rhs,
        }
    }

    /// Can a sum within `[min, max]` still satisfy `sum op rhs`?
    fn feasible(&self, min: i64, max: i64, rhs: i64) -> bool {
        match self {
            Operator::Eq => min <= rhs && rhs <= max,
            Operator::Le => min <= rhs,
            Operator::Lt => min < rhs,
            Operator::Ge => max >= rhs,
            Operator::Gt => max > rhs,
        }
    }
}

/// Global constraint `Σ cᵢ·xᵢ op rhs` over integer variables.
///
/// Consistency is judged by bounds analysis: the reachable sum interval
/// is computed from the assigned values plus each free variable's
/// initial-domain bounds (paired min/max by coefficient sign), and the
/// constraint is consistent iff that interval intersects the half-plane
/// the operator describes. Linear constraints contribute no arcs; all
/// pruning happens through [`propagate`](Constraint::propagate).
#[derive(Debug, Clone)]
pub struct LinearConstraint {
    vars: Vec<VariableId>,
    coefficients: Vec<i64>,
    operator: Operator,
    rhs: i64,
    // Initial-domain (min, max) per scope position.
    bounds: Vec<(i64, i64)>,
    label: Option<String>,
}

impl LinearConstraint {
    pub fn new(
        scope: &[&Variable<i64>],
        coefficients: &[i64],
        operator: Operator,
        rhs: i64,
    ) -> Result<Self> {
        if coefficients.len() != scope.len() {
            return Err(Error::CoefficientMismatch {
                coefficients: coefficients.len(),
                variables: scope.len(),
            });
        }
        let mut bounds = Vec::with_capacity(scope.len());
        for var in scope {
            let domain = var.initial_domain();
            match (domain.min_value(), domain.max_value()) {
                (Some(&min), Some(&max)) => bounds.push((min, max)),
                _ => {
                    return Err(Error::InvalidInput(format!(
                        "variable {} has an empty domain",
                        var.name()
                    )))
                }
            }
        }
        Ok(Self {
            vars: scope.iter().map(|v| v.index()).collect(),
            coefficients: coefficients.to_vec(),
            operator,
            rhs,
            bounds,
            label: None,
        })
    }

    /// `Σ xᵢ op rhs` with unit coefficients.
    pub fn sum(scope: &[&Variable<i64>], operator: Operator, rhs: i64) -> Result<Self> {
        let coefficients = vec![1; scope.len()];
        Self::new(scope, &coefficients, operator, rhs)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sum interval reachable from the current assignment, with
    /// `variable` (if given) pinned to `pinned_value`.
    fn sum_interval(
        &self,
        assignment: &Assignment<i64>,
        pinned: Option<(VariableId, i64)>,
    ) -> (i64, i64) {
        let mut min = 0;
        let mut max = 0;
        for (i, &var) in self.vars.iter().enumerate() {
            let coefficient = self.coefficients[i];
            let fixed = match pinned {
                Some((pinned_var, value)) if pinned_var == var => Some(value),
                _ => assignment.value(var).copied(),
            };
            match fixed {
                Some(value) => {
                    min += coefficient * value;
                    max += coefficient * value;
                }
                None => {
                    let (lo, hi) = self.bounds[i];
                    if coefficient >= 0 {
                        min += coefficient * lo;
                        max += coefficient * hi;
                    } else {
                        min += coefficient * hi;
                        max += coefficient * lo;
                    }
                }
            }
        }
        (min, max)
    }
}

impl Constraint<i64> for LinearConstraint {
    fn scope(&self) -> &[VariableId] {
        &self.vars
    }

    fn name(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }
        let mut out = String::new();
        for (i, &var) in self.vars.iter().enumerate() {
            let c = self.coefficients[i];
            if i > 0 && c >= 0 {
                out.push('+');
            }
            match c {
                1 => {}
                -1 => out.push('-'),
                _ => out.push_str(&c.to_string()),
            }
            out.push_str(&format!("v{}", var));
        }
        format!("{} {} {}", out, self.operator.symbol(), self.rhs)
    }

    fn is_satisfied(&self, assignment: &Assignment<i64>) -> bool {
        let mut sum = 0;
        for (i, &var) in self.vars.iter().enumerate() {
            match assignment.value(var) {
                Some(&value) => sum += self.coefficients[i] * value,
                None => return false,
            }
        }
        self.operator.evaluate(sum, self.rhs)
    }

    fn is_consistent(&self, assignment: &Assignment<i64>) -> bool {
        let (min, max) = self.sum_interval(assignment, None);
        if min == max {
            return self.operator.evaluate(min, self.rhs);
        }
        self.operator.feasible(min, max, self.rhs)
    }

    fn is_consistent_with(
        &self,
        variable: VariableId,
        value: &i64,
        assignment: &Assignment<i64>,
    ) -> bool {
        if !self.vars.contains(&variable) {
            return true;
        }
        let (min, max) = self.sum_interval(assignment, Some((variable, *value)));
        if min == max {
            return self.operator.evaluate(min, self.rhs);
        }
        self.operator.feasible(min, max, self.rhs)
    }

    /// Bounds filtering: every candidate of every free variable is
    /// tested against the reachable sum interval.
    fn propagate(
        &self,
        _assigned: VariableId,
        domains: &mut [Domain<i64>],
        assignment: &Assignment<i64>,
    ) -> bool {
        let mut changed = false;
        for &var in &self.vars {
            if assignment.is_assigned(var) {
                continue;
            }
            let removed = domains[var].retain(|value| {
                self.is_consistent_with(var, value, assignment)
            });
            changed |= removed > 0;
        }
        changed
    }

    /// No pairwise decomposition; the sum does not revise arc-wise.
    fn arcs(&self) -> Vec<(VariableId, VariableId)> {
        Vec::new()
    }

    fn revise(&self, _x: VariableId, _y: VariableId, _domains: &mut [Domain<i64>]) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{Csp, CspBuilder};

    fn builder_with_range_vars(n: usize, min: i64, max: i64) -> CspBuilder<i64> {
        let mut builder = Csp::builder("linear-test");
        for i in 0..n {
            builder
                .variable(format!("X{}", i), Domain::range(min, max))
                .unwrap();
        }
        builder
    }

    #[test]
    fn coefficient_mismatch_is_rejected() {
        let builder = builder_with_range_vars(2, 0, 9);
        let scope = [builder.get(0), builder.get(1)];

        let err = LinearConstraint::new(&scope, &[1], Operator::Eq, 5).unwrap_err();
        assert!(matches!(
            err,
            Error::CoefficientMismatch {
                coefficients: 1,
                variables: 2
            }
        ));
    }

    #[test]
    fn satisfied_evaluates_weighted_sum() {
        let builder = builder_with_range_vars(2, 0, 9);
        let constraint = LinearConstraint::new(
            &[builder.get(0), builder.get(1)],
            &[2, -1],
            Operator::Eq,
            3,
        )
        .unwrap();

        let mut assignment = Assignment::new(2);
        assignment.assign(0, 4);
        assignment.assign(1, 5);
        assert!(constraint.is_satisfied(&assignment)); // 2*4 - 5 = 3

        assignment.assign(1, 4);
        assert!(!constraint.is_satisfied(&assignment));
    }

    #[test]
    fn partial_consistency_uses_bounds() {
        // X0 + X1 = 15 with domains 0..=9: always reachable until the
        // partial sum pins it down.
        let builder = builder_with_range_vars(2, 0, 9);
        let constraint =
            LinearConstraint::sum(&[builder.get(0), builder.get(1)], Operator::Eq, 15).unwrap();

        let mut assignment = Assignment::new(2);
        assert!(constraint.is_consistent(&assignment));

        assignment.assign(0, 2);
        // Max reachable is 2 + 9 = 11 < 15.
        assert!(!constraint.is_consistent(&assignment));

        assignment.assign(0, 9);
        assert!(constraint.is_consistent(&assignment));
        assert!(constraint.is_consistent_with(1, &6, &assignment));
        assert!(!constraint.is_consistent_with(1, &5, &assignment));
    }

    #[test]
    fn propagate_filters_free_variables() {
        let builder = builder_with_range_vars(2, 0, 9);
        let constraint =
            LinearConstraint::sum(&[builder.get(0), builder.get(1)], Operator::Eq, 15).unwrap();

        let mut domains = vec![Domain::range(0, 9), Domain::range(0, 9)];
        let mut assignment = Assignment::new(2);
        assignment.assign(0, 8);
        domains[0].reduce_to(&8).unwrap();

        assert!(constraint.propagate(0, &mut domains, &assignment));
        assert_eq!(domains[1].values(), vec![7]);
    }

    #[test]
    fn strict_operators() {
        let builder = builder_with_range_vars(1, 0, 9);
        let lt = LinearConstraint::sum(&[builder.get(0)], Operator::Lt, 3).unwrap();
        let gt = LinearConstraint::sum(&[builder.get(0)], Operator::Gt, 7).unwrap();

        let mut assignment = Assignment::new(1);
        assignment.assign(0, 3);
        assert!(!lt.is_satisfied(&assignment));
        assert!(!gt.is_satisfied(&assignment));

        assignment.assign(0, 2);
        assert!(lt.is_satisfied(&assignment));
        assignment.assign(0, 8);
        assert!(gt.is_satisfied(&assignment));
    }

    #[test]
    fn no_arcs() {
        let builder = builder_with_range_vars(2, 0, 9);
        let constraint =
            LinearConstraint::sum(&[builder.get(0), builder.get(1)], Operator::Eq, 5).unwrap();
        assert!(Constraint::arcs(&constraint).is_empty());
    }
}
