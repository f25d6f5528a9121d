use std::collections::HashSet;

use crate::{
    constraint::{domain_pair, Constraint},
    model::{Assignment, Domain, Value, VariableId},
};

/// Global constraint: every variable in the scope takes a distinct
/// value.
#[derive(Debug, Clone)]
pub struct AllDifferent {
    vars: Vec<VariableId>,
    label: Option<String>,
}

impl AllDifferent {
    pub fn new(vars: Vec<VariableId>) -> Self {
        Self { vars, label: None }
    }

    /// Attaches a display label (e.g. `Row3` for a Sudoku row).
    pub fn named(vars: Vec<VariableId>, label: impl Into<String>) -> Self {
        Self {
            vars,
            label: Some(label.into()),
        }
    }
}

impl<V: Value> Constraint<V> for AllDifferent {
    fn scope(&self) -> &[VariableId] {
        &self.vars
    }

    fn name(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => format!("AllDifferent[{} vars]", self.vars.len()),
        }
    }

    fn is_satisfied(&self, assignment: &Assignment<V>) -> bool {
        let mut seen = HashSet::with_capacity(self.vars.len());
        for &var in &self.vars {
            match assignment.value(var) {
                Some(value) => {
                    if !seen.insert(value) {
                        return false;
                    }
                }
                None => return false,
            }
        }
        true
    }

    fn is_consistent(&self, assignment: &Assignment<V>) -> bool {
        let mut seen = HashSet::with_capacity(self.vars.len());
        for &var in &self.vars {
            if let Some(value) = assignment.value(var) {
                if !seen.insert(value) {
                    return false;
                }
            }
        }
        true
    }

    fn is_consistent_with(
        &self,
        variable: VariableId,
        value: &V,
        assignment: &Assignment<V>,
    ) -> bool {
        if !self.vars.contains(&variable) {
            return true;
        }
        for &var in &self.vars {
            if var != variable {
                if let Some(assigned) = assignment.value(var) {
                    if assigned == value {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Removes the just-assigned value from every other unassigned
    /// variable in the scope.
    fn propagate(
        &self,
        assigned: VariableId,
        domains: &mut [Domain<V>],
        assignment: &Assignment<V>,
    ) -> bool {
        if !self.vars.contains(&assigned) {
            return false;
        }
        let Some(value) = assignment.value(assigned) else {
            return false;
        };
        let mut changed = false;
        for &other in &self.vars {
            if other != assigned && !assignment.is_assigned(other) {
                changed |= domains[other].remove(value);
            }
        }
        changed
    }

    /// Pairwise singleton pruning, matching the binary decomposition
    /// AC-3 works over.
    fn revise(&self, x: VariableId, y: VariableId, domains: &mut [Domain<V>]) -> bool {
        let (dx, dy) = domain_pair(domains, x, y);
        if !dy.is_singleton() {
            return false;
        }
        match dy.first().cloned() {
            Some(value) => dx.remove(&value),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn satisfied_only_without_duplicates() {
        let constraint = AllDifferent::new(vec![0, 1, 2]);
        let mut assignment: Assignment<i64> = Assignment::new(3);
        assignment.assign(0, 1);
        assignment.assign(1, 2);
        assignment.assign(2, 3);
        assert!(Constraint::is_satisfied(&constraint, &assignment));

        assignment.assign(2, 1);
        assert!(!Constraint::is_satisfied(&constraint, &assignment));
    }

    #[test]
    fn partial_consistency_scans_assigned_only() {
        let constraint = AllDifferent::new(vec![0, 1, 2]);
        let mut assignment: Assignment<i64> = Assignment::new(3);
        assignment.assign(0, 1);
        assert!(Constraint::is_consistent(&constraint, &assignment));

        assignment.assign(2, 1);
        assert!(!Constraint::is_consistent(&constraint, &assignment));
    }

    #[test]
    fn consistent_with_proposed_value() {
        let constraint = AllDifferent::new(vec![0, 1, 2]);
        let mut assignment: Assignment<i64> = Assignment::new(3);
        assignment.assign(0, 5);

        assert!(!constraint.is_consistent_with(1, &5, &assignment));
        assert!(constraint.is_consistent_with(1, &6, &assignment));
        // Variables outside the scope are unconstrained.
        let outside = AllDifferent::new(vec![0, 1]);
        assert!(outside.is_consistent_with(2, &5, &assignment));
    }

    #[test]
    fn propagate_strips_assigned_value() {
        let constraint = AllDifferent::new(vec![0, 1, 2]);
        let mut domains = vec![Domain::range(1, 3), Domain::range(1, 3), Domain::range(1, 3)];
        let mut assignment: Assignment<i64> = Assignment::new(3);
        assignment.assign(0, 2);
        domains[0].reduce_to(&2).unwrap();

        assert!(constraint.propagate(0, &mut domains, &assignment));
        assert_eq!(domains[1].values(), vec![1, 3]);
        assert_eq!(domains[2].values(), vec![1, 3]);
        // The assigned variable's own domain is untouched here.
        assert_eq!(domains[0].values(), vec![2]);
    }

    #[test]
    fn revise_is_singleton_pruning() {
        let constraint = AllDifferent::new(vec![0, 1]);
        let mut domains = vec![Domain::range(1, 3), Domain::singleton(3)];

        assert!(Constraint::<i64>::revise(&constraint, 0, 1, &mut domains));
        assert_eq!(domains[0].values(), vec![1, 2]);
    }
}
