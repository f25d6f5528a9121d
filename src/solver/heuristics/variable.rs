use std::collections::HashMap;

use crate::model::{Assignment, ConstraintId, Csp, Domain, Value, VariableId};

/// Strategy for choosing the next variable to branch on.
///
/// Selectors may carry learned state (Dom/WDeg does), so the solver
/// creates a fresh instance per solve and calls [`reset`]
/// (VariableSelector::reset) before searching.
pub trait VariableSelector<V: Value> {
    /// Picks one of the unassigned variables, or `None` if the list is
    /// empty.
    fn select(
        &mut self,
        unassigned: &[VariableId],
        domains: &[Domain<V>],
        csp: &Csp<V>,
        assignment: &Assignment<V>,
    ) -> Option<VariableId>;

    fn name(&self) -> &'static str;

    /// Notification that `constraint` wiped out a domain after
    /// `variable` was assigned. Learning selectors update weights here.
    fn record_failure(&mut self, _variable: VariableId, _constraint: ConstraintId) {}

    /// Clears any learned state.
    fn reset(&mut self) {}
}

/// Number of constraints linking `variable` to at least one other
/// still-unassigned variable.
fn active_degree<V: Value>(
    variable: VariableId,
    csp: &Csp<V>,
    assignment: &Assignment<V>,
) -> usize {
    csp.network()
        .constraints_on(variable)
        .iter()
        .filter(|&&cid| {
            csp.constraint(cid)
                .scope()
                .iter()
                .any(|&other| other != variable && !assignment.is_assigned(other))
        })
        .count()
}

/// Minimum remaining values: pick the variable with the smallest
/// current domain. Ties go to the earlier variable.
#[derive(Debug, Default)]
pub struct MrvSelector;

impl<V: Value> VariableSelector<V> for MrvSelector {
    fn select(
        &mut self,
        unassigned: &[VariableId],
        domains: &[Domain<V>],
        _csp: &Csp<V>,
        _assignment: &Assignment<V>,
    ) -> Option<VariableId> {
        unassigned
            .iter()
            .copied()
            .min_by_key(|&var| domains[var].size())
    }

    fn name(&self) -> &'static str {
        "MRV"
    }
}

/// Degree heuristic: pick the variable constraining the most other
/// unassigned variables.
#[derive(Debug, Default)]
pub struct DegreeSelector;

impl<V: Value> VariableSelector<V> for DegreeSelector {
    fn select(
        &mut self,
        unassigned: &[VariableId],
        _domains: &[Domain<V>],
        csp: &Csp<V>,
        assignment: &Assignment<V>,
    ) -> Option<VariableId> {
        let mut best = None;
        let mut best_degree = 0;
        for &var in unassigned {
            let degree = active_degree(var, csp, assignment);
            // Strict improvement keeps the earliest variable on ties.
            if best.is_none() || degree > best_degree {
                best = Some(var);
                best_degree = degree;
            }
        }
        best
    }

    fn name(&self) -> &'static str {
        "Degree"
    }
}

/// MRV with Degree tie-breaking: collect every variable tied on the
/// smallest domain, then take the one with the highest active degree.
#[derive(Debug, Default)]
pub struct MrvDegreeSelector;

impl<V: Value> VariableSelector<V> for MrvDegreeSelector {
    fn select(
        &mut self,
        unassigned: &[VariableId],
        domains: &[Domain<V>],
        csp: &Csp<V>,
        assignment: &Assignment<V>,
    ) -> Option<VariableId> {
        if unassigned.len() <= 1 {
            return unassigned.first().copied();
        }

        let min_size = unassigned.iter().map(|&var| domains[var].size()).min()?;
        let ties: Vec<VariableId> = unassigned
            .iter()
            .copied()
            .filter(|&var| domains[var].size() == min_size)
            .collect();

        if ties.len() == 1 {
            return ties.first().copied();
        }
        DegreeSelector.select(&ties, domains, csp, assignment)
    }

    fn name(&self) -> &'static str {
        "MRV+Degree"
    }
}

/// Dom/WDeg: domain size divided by the summed weights of the
/// constraints connecting the variable to other unassigned variables.
/// Weights start at 1.0 and grow by 1.0 each time the constraint is
/// blamed for a domain wipeout, steering the search toward the
/// historically hard part of the problem.
#[derive(Debug, Default)]
pub struct DomWdegSelector {
    weights: HashMap<ConstraintId, f64>,
}

impl DomWdegSelector {
    const INITIAL_WEIGHT: f64 = 1.0;
    const EPSILON: f64 = 1e-4;

    pub fn new() -> Self {
        Self::default()
    }

    /// The current weight of a constraint.
    pub fn weight(&self, constraint: ConstraintId) -> f64 {
        self.weights
            .get(&constraint)
            .copied()
            .unwrap_or(Self::INITIAL_WEIGHT)
    }

    fn weighted_degree<V: Value>(
        &self,
        variable: VariableId,
        csp: &Csp<V>,
        assignment: &Assignment<V>,
    ) -> f64 {
        csp.network()
            .constraints_on(variable)
            .iter()
            .filter(|&&cid| {
                csp.constraint(cid)
                    .scope()
                    .iter()
                    .any(|&other| other != variable && !assignment.is_assigned(other))
            })
            .map(|&cid| self.weight(cid))
            .sum()
    }
}

impl<V: Value> VariableSelector<V> for DomWdegSelector {
    fn select(
        &mut self,
        unassigned: &[VariableId],
        domains: &[Domain<V>],
        csp: &Csp<V>,
        assignment: &Assignment<V>,
    ) -> Option<VariableId> {
        let mut best = None;
        let mut best_score = f64::MAX;

        for &var in unassigned {
            let size = domains[var].size();
            if size == 0 {
                // Propagation should have caught this; fail on it first.
                return Some(var);
            }
            let wdeg = self.weighted_degree(var, csp, assignment);
            let score = size as f64 / wdeg.max(Self::EPSILON);
            if score < best_score {
                best_score = score;
                best = Some(var);
            }
        }

        best
    }

    fn name(&self) -> &'static str {
        "Dom/WDeg"
    }

    fn record_failure(&mut self, _variable: VariableId, constraint: ConstraintId) {
        *self
            .weights
            .entry(constraint)
            .or_insert(Self::INITIAL_WEIGHT) += 1.0;
    }

    fn reset(&mut self) {
        self.weights.clear();
    }
}
