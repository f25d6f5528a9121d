use std::collections::HashMap;

use crate::{
    constraint::{domain_pair, Constraint},
    error::{Error, Result},
    model::{Assignment, Domain, Value, VariableId},
};

/// Extensional constraint defined by explicit tuples.
///
/// With `allowed = true` the tuples enumerate the admissible
/// combinations; with `allowed = false` they enumerate the forbidden
/// ones. Allowed tables keep a per-position value → tuple support index
/// so consistency checks and revision avoid scanning the whole table.
/// Disallowed tables only reject complete combinations and are
/// conservative on partial ones.
#[derive(Debug, Clone)]
pub struct TableConstraint<V: Value> {
    vars: Vec<VariableId>,
    tuples: Vec<Vec<V>>,
    allowed: bool,
    // Position → value → indices into `tuples`. Empty for disallowed
    // tables.
    supports: Vec<HashMap<V, Vec<usize>>>,
}

impl<V: Value> TableConstraint<V> {
    pub fn new(vars: Vec<VariableId>, tuples: Vec<Vec<V>>, allowed: bool) -> Result<Self> {
        let mut unique: Vec<Vec<V>> = Vec::with_capacity(tuples.len());
        for tuple in tuples {
            if tuple.len() != vars.len() {
                return Err(Error::InvalidInput(format!(
                    "tuple of length {} for a table over {} variables",
                    tuple.len(),
                    vars.len()
                )));
            }
            if !unique.contains(&tuple) {
                unique.push(tuple);
            }
        }

        let mut supports: Vec<HashMap<V, Vec<usize>>> = vec![HashMap::new(); vars.len()];
        if allowed {
            for (t, tuple) in unique.iter().enumerate() {
                for (position, value) in tuple.iter().enumerate() {
                    supports[position]
                        .entry(value.clone())
                        .or_default()
                        .push(t);
                }
            }
        }

        Ok(Self {
            vars,
            tuples: unique,
            allowed,
            supports,
        })
    }

    /// Table of admissible combinations.
    pub fn allowed(vars: Vec<VariableId>, tuples: Vec<Vec<V>>) -> Result<Self> {
        Self::new(vars, tuples, true)
    }

    /// Table of forbidden combinations.
    pub fn disallowed(vars: Vec<VariableId>, tuples: Vec<Vec<V>>) -> Result<Self> {
        Self::new(vars, tuples, false)
    }

    pub fn is_allowed_table(&self) -> bool {
        self.allowed
    }

    fn position_of(&self, variable: VariableId) -> Option<usize> {
        self.vars.iter().position(|&v| v == variable)
    }

    /// Does the tuple agree with every assigned scope variable, with
    /// `skip` (the position under test) exempt?
    fn matches_assigned(
        &self,
        tuple: &[V],
        assignment: &Assignment<V>,
        skip: Option<usize>,
    ) -> bool {
        for (position, &var) in self.vars.iter().enumerate() {
            if Some(position) == skip {
                continue;
            }
            if let Some(assigned) = assignment.value(var) {
                if assigned != &tuple[position] {
                    return false;
                }
            }
        }
        true
    }

    fn complete_tuple(&self, assignment: &Assignment<V>) -> Option<Vec<V>> {
        self.vars
            .iter()
            .map(|&var| assignment.value(var).cloned())
            .collect()
    }
}

impl<V: Value> Constraint<V> for TableConstraint<V> {
    fn scope(&self) -> &[VariableId] {
        &self.vars
    }

    fn name(&self) -> String {
        format!(
            "Table{}[{} tuples]",
            if self.allowed { "+" } else { "-" },
            self.tuples.len()
        )
    }

    fn is_satisfied(&self, assignment: &Assignment<V>) -> bool {
        let Some(tuple) = self.complete_tuple(assignment) else {
            return false;
        };
        let in_table = self.tuples.contains(&tuple);
        if self.allowed {
            in_table
        } else {
            !in_table
        }
    }

    fn is_consistent(&self, assignment: &Assignment<V>) -> bool {
        if let Some(tuple) = self.complete_tuple(assignment) {
            let in_table = self.tuples.contains(&tuple);
            return if self.allowed { in_table } else { !in_table };
        }
        if !self.allowed {
            // A forbidden tuple can only be recognized once complete.
            return true;
        }
        self.tuples
            .iter()
            .any(|tuple| self.matches_assigned(tuple, assignment, None))
    }

    fn is_consistent_with(
        &self,
        variable: VariableId,
        value: &V,
        assignment: &Assignment<V>,
    ) -> bool {
        let Some(position) = self.position_of(variable) else {
            return true;
        };

        if !self.allowed {
            // Reject only when the proposed value completes a forbidden
            // tuple.
            let complete = self
                .vars
                .iter()
                .all(|&v| v == variable || assignment.is_assigned(v));
            if !complete {
                return true;
            }
            let tuple: Vec<V> = self
                .vars
                .iter()
                .map(|&v| {
                    if v == variable {
                        value.clone()
                    } else {
                        assignment.value(v).cloned().unwrap()
                    }
                })
                .collect();
            return !self.tuples.contains(&tuple);
        }

        match self.supports[position].get(value) {
            Some(candidates) => candidates
                .iter()
                .any(|&t| self.matches_assigned(&self.tuples[t], assignment, Some(position))),
            None => false,
        }
    }

    fn propagate(
        &self,
        _assigned: VariableId,
        domains: &mut [Domain<V>],
        assignment: &Assignment<V>,
    ) -> bool {
        if !self.allowed {
            return false;
        }
        let mut changed = false;
        for &var in &self.vars {
            if assignment.is_assigned(var) {
                continue;
            }
            let removed =
                domains[var].retain(|value| self.is_consistent_with(var, value, assignment));
            changed |= removed > 0;
        }
        changed
    }

    fn arcs(&self) -> Vec<(VariableId, VariableId)> {
        if !self.allowed {
            return Vec::new();
        }
        let mut arcs = Vec::new();
        for &x in &self.vars {
            for &y in &self.vars {
                if x != y {
                    arcs.push((x, y));
                }
            }
        }
        arcs
    }

    fn revise(&self, x: VariableId, y: VariableId, domains: &mut [Domain<V>]) -> bool {
        if !self.allowed {
            return false;
        }
        let (Some(x_position), Some(y_position)) = (self.position_of(x), self.position_of(y))
        else {
            return false;
        };
        let (dx, dy) = domain_pair(domains, x, y);
        let removed = dx.retain(|x_value| match self.supports[x_position].get(x_value) {
            Some(candidates) => candidates
                .iter()
                .any(|&t| dy.contains(&self.tuples[t][y_position])),
            None => false,
        });
        removed > 0
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn xy_table() -> TableConstraint<i64> {
        TableConstraint::allowed(vec![0, 1], vec![vec![1, 2], vec![2, 3], vec![2, 1]]).unwrap()
    }

    #[test]
    fn tuple_arity_is_validated() {
        let err = TableConstraint::allowed(vec![0, 1], vec![vec![1]]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn satisfied_by_listed_tuples_only() {
        let table = xy_table();
        let mut assignment = Assignment::new(2);
        assignment.assign(0, 2);
        assignment.assign(1, 3);
        assert!(table.is_satisfied(&assignment));

        assignment.assign(1, 2);
        assert!(!table.is_satisfied(&assignment));
    }

    #[test]
    fn consistent_with_uses_supports() {
        let table = xy_table();
        let mut assignment = Assignment::new(2);

        // No value 3 for position 0 in any tuple.
        assert!(!table.is_consistent_with(0, &3, &assignment));
        assert!(table.is_consistent_with(0, &2, &assignment));

        assignment.assign(1, 1);
        // Only (2, 1) supports y = 1.
        assert!(!table.is_consistent_with(0, &1, &assignment));
        assert!(table.is_consistent_with(0, &2, &assignment));
    }

    #[test]
    fn revise_keeps_supported_values_only() {
        let table = xy_table();
        let mut domains = vec![Domain::range(1, 3), Domain::range(1, 3)];

        assert!(table.revise(0, 1, &mut domains));
        // x = 3 never appears at position 0.
        assert_eq!(domains[0].values(), vec![1, 2]);

        domains[1].reduce_to(&2).unwrap();
        assert!(table.revise(0, 1, &mut domains));
        // Only (1, 2) remains compatible.
        assert_eq!(domains[0].values(), vec![1]);
    }

    #[test]
    fn disallowed_rejects_complete_match() {
        let table =
            TableConstraint::disallowed(vec![0, 1], vec![vec![1, 1]]).unwrap();
        let mut assignment = Assignment::new(2);
        assignment.assign(0, 1);

        // Partial: conservative.
        assert!(Constraint::is_consistent(&table, &assignment));
        assert!(!table.is_consistent_with(1, &1, &assignment));
        assert!(table.is_consistent_with(1, &2, &assignment));

        assignment.assign(1, 1);
        assert!(!table.is_satisfied(&assignment));
        assert!(Constraint::arcs(&table).is_empty());
    }
}
